// Display configuration and window events
//
// The window size lives here instead of in global state: the event loop
// turns resize notifications into `DisplayEvent`s and applies them, and the
// renderer and level builder read the current values from this struct.

use crate::core::math::Rect;

/// Window and logical presentation settings
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    /// Window title
    pub title: String,
    /// Current window width in physical pixels
    pub window_width: u32,
    /// Current window height in physical pixels
    pub window_height: u32,
    /// Width of the fixed virtual resolution the game is laid out in
    pub logical_width: u32,
    /// Height of the fixed virtual resolution the game is laid out in
    pub logical_height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            title: "Tile Runner".to_string(),
            window_width: 1600,
            window_height: 900,
            logical_width: 640,
            logical_height: 320,
        }
    }
}

/// Window events that change the display configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayEvent {
    Resized { width: u32, height: u32 },
}

impl DisplayConfig {
    /// Apply a window event, returning whether anything changed
    pub fn apply(&mut self, event: DisplayEvent) -> bool {
        match event {
            DisplayEvent::Resized { width, height } => {
                let changed = self.window_width != width || self.window_height != height;
                self.window_width = width;
                self.window_height = height;
                changed
            }
        }
    }

    /// Largest viewport with the logical aspect ratio that fits the window, centered
    ///
    /// Returns `None` while the window has no area (e.g. minimized).
    pub fn letterbox(&self) -> Option<Rect> {
        if self.window_width == 0 || self.window_height == 0 {
            return None;
        }

        let window_w = self.window_width as f32;
        let window_h = self.window_height as f32;
        let logical_w = self.logical_width as f32;
        let logical_h = self.logical_height as f32;

        let scale = (window_w / logical_w).min(window_h / logical_h);
        let w = logical_w * scale;
        let h = logical_h * scale;

        Some(Rect::new((window_w - w) / 2.0, (window_h - h) / 2.0, w, h))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DisplayConfig::default();
        assert_eq!((config.window_width, config.window_height), (1600, 900));
        assert_eq!((config.logical_width, config.logical_height), (640, 320));
    }

    #[test]
    fn test_apply_resize() {
        let mut config = DisplayConfig::default();
        assert!(config.apply(DisplayEvent::Resized { width: 800, height: 600 }));
        assert_eq!((config.window_width, config.window_height), (800, 600));

        // Same size again is not a change
        assert!(!config.apply(DisplayEvent::Resized { width: 800, height: 600 }));
    }

    #[test]
    fn test_letterbox_wide_window() {
        let config = DisplayConfig {
            window_width: 1600,
            window_height: 900,
            ..Default::default()
        };

        // Width limited: scale 2.5 -> 1600x800, bars top and bottom
        assert_eq!(config.letterbox(), Some(Rect::new(0.0, 50.0, 1600.0, 800.0)));
    }

    #[test]
    fn test_letterbox_tall_window() {
        let config = DisplayConfig {
            window_width: 640,
            window_height: 640,
            ..Default::default()
        };

        assert_eq!(config.letterbox(), Some(Rect::new(0.0, 160.0, 640.0, 320.0)));
    }

    #[test]
    fn test_letterbox_pillarbox() {
        let config = DisplayConfig {
            window_width: 1000,
            window_height: 320,
            ..Default::default()
        };

        assert_eq!(config.letterbox(), Some(Rect::new(180.0, 0.0, 640.0, 320.0)));
    }

    #[test]
    fn test_letterbox_minimized() {
        let mut config = DisplayConfig::default();
        config.apply(DisplayEvent::Resized { width: 0, height: 0 });
        assert_eq!(config.letterbox(), None);
    }
}
