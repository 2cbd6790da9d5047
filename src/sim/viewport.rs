//! Letterboxed 4:3 viewport
//!
//! Gameplay coordinates are CSS pixels of the fitted surface. Device pixels
//! only matter for the backing store size.

use crate::consts::{BASE_HEIGHT, BASE_WIDTH};

/// Result of fitting the logical play area into a display
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Fit factor relative to the 800x600 base size
    pub scale: f32,
    /// Logical (CSS pixel) size; all gameplay happens in this space
    pub css_width: f32,
    pub css_height: f32,
    /// Backing store size in device pixels
    pub device_width: u32,
    pub device_height: u32,
    pub device_pixel_ratio: f32,
}

impl Default for Viewport {
    /// Unscaled base size at DPR 1
    fn default() -> Self {
        Self::fit(BASE_WIDTH, BASE_HEIGHT, 1.0)
    }
}

impl Viewport {
    /// Best fit of the 4:3 base size into `display_w` x `display_h`
    pub fn fit(display_w: f32, display_h: f32, device_pixel_ratio: f32) -> Self {
        let dpr = if device_pixel_ratio.is_finite() && device_pixel_ratio > 0.0 {
            device_pixel_ratio
        } else {
            1.0
        };
        let scale = (display_w / BASE_WIDTH).min(display_h / BASE_HEIGHT).max(0.0);
        let css_width = (BASE_WIDTH * scale).floor().max(1.0);
        let css_height = (BASE_HEIGHT * scale).floor().max(1.0);

        Self {
            scale,
            css_width,
            css_height,
            device_width: (css_width * dpr).round() as u32,
            device_height: (css_height * dpr).round() as u32,
            device_pixel_ratio: dpr,
        }
    }

    /// Backing store size limited to `max_dimension` on either side
    ///
    /// Shrinks both sides by the same factor so the aspect ratio holds. CSS
    /// size and gameplay coordinates are unaffected.
    pub fn backing_size(&self, max_dimension: u32) -> (u32, u32) {
        let max_dimension = max_dimension.max(1);
        let longest = self.device_width.max(self.device_height);
        if longest <= max_dimension {
            return (self.device_width.max(1), self.device_height.max(1));
        }
        let shrink = |v: u32| {
            let scaled = u64::from(v) * u64::from(max_dimension) / u64::from(longest);
            (scaled as u32).clamp(1, max_dimension)
        };
        (shrink(self.device_width), shrink(self.device_height))
    }

    /// Half-height line the fish never crosses
    pub fn water_line(&self) -> f32 {
        self.css_height / 2.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fit_exact_base() {
        let vp = Viewport::fit(800.0, 600.0, 1.0);
        assert_eq!(vp.scale, 1.0);
        assert_eq!((vp.css_width, vp.css_height), (800.0, 600.0));
        assert_eq!((vp.device_width, vp.device_height), (800, 600));
    }

    #[test]
    fn test_fit_portrait_phone() {
        // Width limits: 390/800 < 844/600
        let vp = Viewport::fit(390.0, 844.0, 3.0);
        assert!((vp.scale - 0.4875).abs() < 1e-6);
        assert_eq!(vp.css_width, 390.0);
        assert_eq!(vp.css_height, 292.0); // floor(292.5)
        assert_eq!(vp.device_width, 1170);
        assert_eq!(vp.device_height, 876);
    }

    #[test]
    fn test_fit_never_below_one_pixel() {
        let vp = Viewport::fit(0.0, 0.0, 2.0);
        assert_eq!((vp.css_width, vp.css_height), (1.0, 1.0));
        assert_eq!((vp.device_width, vp.device_height), (2, 2));
    }

    #[test]
    fn test_fit_rounds_fractional_dpr() {
        let vp = Viewport::fit(1000.0, 600.0, 1.25);
        assert_eq!(vp.css_width, 800.0);
        assert_eq!(vp.device_width, 1000);
        assert_eq!(vp.device_height, 750);
    }

    #[test]
    fn test_fit_bad_dpr_falls_back() {
        let vp = Viewport::fit(800.0, 600.0, f32::NAN);
        assert_eq!(vp.device_pixel_ratio, 1.0);
        assert_eq!(vp.device_width, 800);
    }

    #[test]
    fn test_backing_size_within_limit_unchanged() {
        let vp = Viewport::fit(390.0, 844.0, 3.0);
        assert_eq!(vp.backing_size(2048), (1170, 876));
    }

    #[test]
    fn test_backing_size_clamped_to_texture_limit() {
        // Retina laptop: 1200x900 CSS at dpr 2 wants 2400x1800
        let vp = Viewport::fit(1440.0, 900.0, 2.0);
        assert_eq!((vp.device_width, vp.device_height), (2400, 1800));
        let (w, h) = vp.backing_size(2048);
        assert_eq!((w, h), (2048, 1536));
        // Logical size is untouched
        assert_eq!((vp.css_width, vp.css_height), (1200.0, 900.0));
    }

    #[test]
    fn test_backing_size_zero_limit() {
        let vp = Viewport::default();
        assert_eq!(vp.backing_size(0), (1, 1));
    }

    #[test]
    fn test_fit_idempotent() {
        assert_eq!(Viewport::fit(1280.0, 720.0, 2.0), Viewport::fit(1280.0, 720.0, 2.0));
    }
}
