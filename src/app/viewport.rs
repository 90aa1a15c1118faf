/// Fraction of the screen the viewer window may cover.
const SCREEN_FILL: f64 = 0.85;
/// Vertical space left for task bars and title bars.
const SCREEN_RESERVED_HEIGHT: u32 = 100;

/// Where the image sits on the surface: scaled to fit, centered, aspect kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub origin: (f64, f64),
    pub scale: f64,
    pub image: (u32, u32),
}

impl Viewport {
    pub fn fit(surface: (u32, u32), image: (u32, u32)) -> Self {
        let (sw, sh) = (f64::from(surface.0), f64::from(surface.1));
        let (iw, ih) = (f64::from(image.0.max(1)), f64::from(image.1.max(1)));
        let scale = (sw / iw).min(sh / ih);
        Self {
            origin: ((sw - iw * scale) / 2.0, (sh - ih * scale) / 2.0),
            scale,
            image,
        }
    }

    /// Size of the drawn image in surface pixels.
    pub fn extent(&self) -> (f64, f64) {
        (
            f64::from(self.image.0) * self.scale,
            f64::from(self.image.1) * self.scale,
        )
    }

    /// Surface position to image position, unclamped.
    pub fn to_image(&self, x: f64, y: f64) -> (f64, f64) {
        if self.scale <= 0.0 {
            return (0.0, 0.0);
        }
        (
            (x - self.origin.0) / self.scale,
            (y - self.origin.1) / self.scale,
        )
    }

    /// Whether a surface position lands on the drawn image.
    pub fn contains(&self, x: f64, y: f64) -> bool {
        let (w, h) = self.extent();
        let (dx, dy) = (x - self.origin.0, y - self.origin.1);
        (0.0..=w).contains(&dx) && (0.0..=h).contains(&dy)
    }
}

/// Initial window size for an image on a screen, and the scale used.
pub fn window_size(screen: (u32, u32), image: (u32, u32)) -> ((u32, u32), f64) {
    let sw = f64::from(screen.0) * SCREEN_FILL;
    let sh = f64::from(screen.1.saturating_sub(SCREEN_RESERVED_HEIGHT)) * SCREEN_FILL;
    let (iw, ih) = (f64::from(image.0.max(1)), f64::from(image.1.max(1)));
    let scale = (sw / iw).min(sh / ih);
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let size = (
        ((iw * scale).round() as u32).max(1),
        ((ih * scale).round() as u32).max(1),
    );
    (size, scale)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn letterboxed_corners_map_to_image_corners() {
        let view = Viewport::fit((800, 600), (400, 200));
        assert_eq!(view.scale, 2.0);
        assert_eq!(view.origin, (0.0, 100.0));
        assert_eq!(view.to_image(0.0, 100.0), (0.0, 0.0));
        assert_eq!(view.to_image(800.0, 500.0), (400.0, 200.0));
    }

    #[test]
    fn clicks_on_the_bars_are_outside() {
        let view = Viewport::fit((800, 600), (400, 200));
        assert!(view.contains(400.0, 300.0));
        assert!(!view.contains(400.0, 50.0));
        assert!(!view.contains(400.0, 550.0));
    }

    #[test]
    fn window_fits_the_usable_screen() {
        let ((w, h), scale) = window_size((1920, 1180), (3840, 2160));
        assert!((scale - 0.85 * 1080.0 / 2160.0).abs() < 1e-9);
        assert_eq!((w, h), (1632, 918));

        let ((w, h), _) = window_size((1920, 1180), (100, 50));
        assert_eq!((w, h), (1632, 816));
    }
}
