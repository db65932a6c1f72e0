//! Canvas sizing inside a container

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum FitMode {
    /// Whole canvas visible, letterboxed
    #[default]
    Contain,
    /// Container filled, canvas cropped
    Cover,
}

/// Target size and offset of the canvas inside its container
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Fit {
    pub width: f32,
    pub height: f32,
    pub x: f32,
    pub y: f32,
}

/// Scale a `width` x `height` canvas into a container, keeping its aspect
/// ratio, and center it
pub fn object_fit(
    mode: FitMode,
    container_width: f32,
    container_height: f32,
    width: f32,
    height: f32,
) -> Fit {
    let ratio = width / height;
    let container_ratio = container_width / container_height;
    let match_width = match mode {
        FitMode::Contain => ratio > container_ratio,
        FitMode::Cover => ratio < container_ratio,
    };

    let (target_width, target_height) = if match_width {
        (container_width, container_width / ratio)
    } else {
        (container_height * ratio, container_height)
    };

    Fit {
        width: target_width,
        height: target_height,
        x: (container_width - target_width) / 2.0,
        y: (container_height - target_height) / 2.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn test_contain_letterboxes() {
        // Tall canvas in a wide container: pillarboxed
        let fit = object_fit(FitMode::Contain, 1000.0, 600.0, 400.0, 600.0);
        assert!(approx(fit.width, 400.0));
        assert!(approx(fit.height, 600.0));
        assert!(approx(fit.x, 300.0));
        assert!(approx(fit.y, 0.0));
    }

    #[test]
    fn test_contain_wide_canvas() {
        let fit = object_fit(FitMode::Contain, 400.0, 400.0, 800.0, 400.0);
        assert!(approx(fit.width, 400.0));
        assert!(approx(fit.height, 200.0));
        assert!(approx(fit.y, 100.0));
    }

    #[test]
    fn test_cover_crops() {
        let fit = object_fit(FitMode::Cover, 1000.0, 600.0, 400.0, 600.0);
        assert!(approx(fit.width, 1000.0));
        assert!(approx(fit.height, 1500.0));
        assert!(approx(fit.y, -450.0));
    }
}
