use std::{fmt, str::FromStr};

use crate::error::ConfigError;

/// A pixel coordinate on the source image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Point {
    pub x: u32,
    pub y: u32,
}

impl Point {
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Converts pointer input to a pixel coordinate: truncated toward zero,
    /// then clamped into `0..=width` x `0..=height`.
    pub fn from_pointer(x: f64, y: f64, width: u32, height: u32) -> Self {
        fn axis(v: f64, max: u32) -> u32 {
            if v.is_nan() {
                return 0;
            }
            v.trunc().clamp(0.0, f64::from(max)) as u32
        }
        Self {
            x: axis(x, width),
            y: axis(y, height),
        }
    }

    pub fn distance_to(&self, x: f64, y: f64) -> f64 {
        (x - f64::from(self.x)).hypot(y - f64::from(self.y))
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Two corners of a crop region. Nothing forces `top_left` to actually be
/// above and left of `bottom_right`; see [`Rectangle::normalized`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rectangle {
    pub top_left: Point,
    pub bottom_right: Point,
}

impl Rectangle {
    pub const fn new(top_left: Point, bottom_right: Point) -> Self {
        Self {
            top_left,
            bottom_right,
        }
    }

    /// The rectangle covering a whole `width` x `height` image.
    pub const fn full(width: u32, height: u32) -> Self {
        Self::new(Point::new(0, 0), Point::new(width, height))
    }

    pub fn left(&self) -> u32 {
        self.top_left.x.min(self.bottom_right.x)
    }

    pub fn right(&self) -> u32 {
        self.top_left.x.max(self.bottom_right.x)
    }

    pub fn top(&self) -> u32 {
        self.top_left.y.min(self.bottom_right.y)
    }

    pub fn bottom(&self) -> u32 {
        self.top_left.y.max(self.bottom_right.y)
    }

    /// Orders the corners per axis so that left <= right and top <= bottom.
    pub fn normalized(&self) -> Self {
        Self::new(
            Point::new(self.left(), self.top()),
            Point::new(self.right(), self.bottom()),
        )
    }

    /// Normalizes, then clamps both corners into a `width` x `height` image.
    pub fn clamped(&self, width: u32, height: u32) -> Self {
        let n = self.normalized();
        Self::new(
            Point::new(n.top_left.x.min(width), n.top_left.y.min(height)),
            Point::new(n.bottom_right.x.min(width), n.bottom_right.y.min(height)),
        )
    }

    pub fn width(&self) -> u32 {
        self.right() - self.left()
    }

    pub fn height(&self) -> u32 {
        self.bottom() - self.top()
    }

    pub fn is_empty(&self) -> bool {
        self.width() == 0 || self.height() == 0
    }
}

impl fmt::Display for Rectangle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.top_left, self.bottom_right)
    }
}

/// Parses `x1,y1,x2,y2`.
impl FromStr for Rectangle {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let coords = s
            .split(',')
            .map(|c| c.trim().parse::<u32>())
            .collect::<Result<Vec<_>, _>>()
            .map_err(|_| ConfigError::InvalidRegion(s.to_string()))?;

        let &[x1, y1, x2, y2] = coords.as_slice() else {
            return Err(ConfigError::InvalidRegion(s.to_string()));
        };
        Ok(Self::new(Point::new(x1, y1), Point::new(x2, y2)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pointer_input_is_truncated_and_clamped() {
        assert_eq!(Point::from_pointer(12.9, 3.2, 100, 50), Point::new(12, 3));
        assert_eq!(Point::from_pointer(-4.0, 70.5, 100, 50), Point::new(0, 50));
        assert_eq!(Point::from_pointer(100.7, 0.0, 100, 50), Point::new(100, 0));
        assert_eq!(Point::from_pointer(f64::NAN, 1.0, 100, 50), Point::new(0, 1));
    }

    #[test]
    fn inverted_rectangle_is_normalized() {
        let rect = Rectangle::new(Point::new(90, 80), Point::new(10, 20));
        let n = rect.normalized();
        assert_eq!(n.top_left, Point::new(10, 20));
        assert_eq!(n.bottom_right, Point::new(90, 80));
        assert_eq!((rect.width(), rect.height()), (80, 60));
    }

    #[test]
    fn clamping_keeps_the_rectangle_inside_the_image() {
        let rect = Rectangle::new(Point::new(50, 150), Point::new(300, 10));
        let c = rect.clamped(200, 100);
        assert_eq!(c, Rectangle::new(Point::new(50, 10), Point::new(200, 100)));

        let outside = Rectangle::new(Point::new(250, 0), Point::new(300, 50));
        assert!(outside.clamped(200, 100).is_empty());
    }

    #[test]
    fn parses_region_strings() {
        let rect: Rectangle = "10, 20,90,80".parse().unwrap();
        assert_eq!(rect, Rectangle::new(Point::new(10, 20), Point::new(90, 80)));

        assert_eq!(
            "1,2,3".parse::<Rectangle>(),
            Err(ConfigError::InvalidRegion("1,2,3".into()))
        );
        assert!("a,b,c,d".parse::<Rectangle>().is_err());
    }
}
