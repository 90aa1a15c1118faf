mod point;

pub use point::{Point, Rectangle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft,
    BottomRight,
}

/// Two-point selection over a `width` x `height` image.
///
/// The UI forwards secondary clicks (in image coordinates) and the close
/// request here; the state itself never touches a window.
#[derive(Debug, Clone)]
pub struct SelectionState {
    top_left: Point,
    bottom_right: Point,
    width: u32,
    height: u32,
}

impl SelectionState {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            top_left: Point::new(0, 0),
            bottom_right: Point::new(width, height),
            width,
            height,
        }
    }

    pub fn image_size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn current(&self) -> Rectangle {
        Rectangle::new(self.top_left, self.bottom_right)
    }

    /// Moves whichever corner is nearer to `(x, y)`. Ties go to the
    /// bottom-right corner.
    pub fn on_secondary_click(&mut self, x: f64, y: f64) -> Corner {
        let to_top_left = self.top_left.distance_to(x, y);
        let to_bottom_right = self.bottom_right.distance_to(x, y);
        let point = Point::from_pointer(x, y, self.width, self.height);

        let corner = if to_top_left < to_bottom_right {
            self.top_left = point;
            Corner::TopLeft
        } else {
            self.bottom_right = point;
            Corner::BottomRight
        };
        log::debug!("right click at ({x:.1}, {y:.1}) moved {corner:?} to {point}");
        corner
    }

    /// Ends the session and hands back the final corners, unvalidated.
    pub fn on_close(self) -> Rectangle {
        let rect = self.current();
        log::info!(
            "selection closed, top-left {}, bottom-right {}",
            rect.top_left,
            rect.bottom_right
        );
        rect
    }

    pub fn label(&self, corner: Corner) -> String {
        match corner {
            Corner::TopLeft => format!("top-left: {}", self.top_left),
            Corner::BottomRight => format!("bottom-right: {}", self.bottom_right),
        }
    }
}
