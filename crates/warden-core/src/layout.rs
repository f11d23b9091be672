//! Device layout adjustments
//!
//! Older Android system controls draw with extra insets, so entry cells and
//! stack layouts are nudged per OS version and display density. These are
//! plain functions of a [`DeviceInfo`]; applying the result is up to the UI.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default delay before focusing an input on platforms that need one
pub const DEFAULT_FOCUS_DELAY: Duration = Duration::from_millis(500);

/// Android API level that changed control insets (Lollipop)
const ANDROID_LOLLIPOP: u32 = 21;

/// Host platform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Platform {
    /// Android
    Android,
    /// iOS
    Ios,
    /// Windows
    Windows,
    /// Anything else
    Other,
}

/// Device descriptor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceInfo {
    /// Host platform
    pub platform: Platform,
    /// OS version (API level on Android)
    pub os_version: u32,
    /// Display scale factor (1.0 = mdpi)
    pub scale: f64,
}

/// Edge insets: left, top, right, bottom
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Thickness {
    /// Left inset
    pub left: f64,
    /// Top inset
    pub top: f64,
    /// Right inset
    pub right: f64,
    /// Bottom inset
    pub bottom: f64,
}

impl Thickness {
    /// Create from the four edges
    pub const fn new(left: f64, top: f64, right: f64, bottom: f64) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }
}

/// Margin correction for a single control, if the device needs one
pub fn margin_adjustment(device: &DeviceInfo) -> Option<Thickness> {
    if device.platform != Platform::Android {
        return None;
    }

    let margin = match device.os_version {
        v if v < ANDROID_LOLLIPOP => Thickness::new(-12.0, -5.0, -12.0, -6.0),
        ANDROID_LOLLIPOP => Thickness::new(-4.0, -2.0, -4.0, -11.0),
        _ => Thickness::new(-4.0, -7.0, -4.0, -11.0),
    };
    Some(margin)
}

/// Horizontal padding for a stack layout, keeping its vertical padding
pub fn padding_adjustment(device: &DeviceInfo, current: Thickness) -> Option<Thickness> {
    if device.platform != Platform::Android {
        return None;
    }

    let horizontal = if device.scale == 1.0 {
        21.0 // mdpi
    } else if device.scale < 2.0 {
        19.0 // hdpi
    } else if device.scale < 3.0 {
        17.0 // xhdpi
    } else {
        15.0 // xxhdpi and up
    };
    Some(Thickness::new(
        horizontal,
        current.top,
        horizontal,
        current.bottom,
    ))
}

/// How long to wait before focusing an input
///
/// Android drops focus requests made while a page is still animating in, so
/// focus is deferred there; elsewhere `None` means focus immediately.
pub fn focus_delay(platform: Platform, requested: Duration) -> Option<Duration> {
    match platform {
        Platform::Android => Some(requested),
        _ => None,
    }
}

/// Page orientation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    /// Taller than wide
    Portrait,
    /// Wider than tall, or square
    Landscape,
}

impl Orientation {
    /// Orientation of a page with the given dimensions
    pub fn from_size(width: f64, height: f64) -> Self {
        if width < height {
            Self::Portrait
        } else {
            Self::Landscape
        }
    }
}

/// Page dimensions
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    /// Width
    pub width: f64,
    /// Height
    pub height: f64,
}

impl Size {
    /// Orientation of this size
    pub fn orientation(&self) -> Orientation {
        Orientation::from_size(self.width, self.height)
    }

    /// Portrait check
    pub fn is_portrait(&self) -> bool {
        self.orientation() == Orientation::Portrait
    }

    /// Landscape check
    pub fn is_landscape(&self) -> bool {
        !self.is_portrait()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn android(os_version: u32, scale: f64) -> DeviceInfo {
        DeviceInfo {
            platform: Platform::Android,
            os_version,
            scale,
        }
    }

    #[test]
    fn test_margin_by_api_level() {
        assert_eq!(
            margin_adjustment(&android(19, 2.0)),
            Some(Thickness::new(-12.0, -5.0, -12.0, -6.0))
        );
        assert_eq!(
            margin_adjustment(&android(21, 2.0)),
            Some(Thickness::new(-4.0, -2.0, -4.0, -11.0))
        );
        assert_eq!(
            margin_adjustment(&android(28, 2.0)),
            Some(Thickness::new(-4.0, -7.0, -4.0, -11.0))
        );
    }

    #[test]
    fn test_no_adjustment_off_android() {
        let ios = DeviceInfo {
            platform: Platform::Ios,
            os_version: 17,
            scale: 3.0,
        };
        assert_eq!(margin_adjustment(&ios), None);
        assert_eq!(padding_adjustment(&ios, Thickness::default()), None);
    }

    #[test]
    fn test_padding_by_density() {
        let current = Thickness::new(5.0, 8.0, 5.0, 9.0);
        let cases = [(1.0, 21.0), (1.5, 19.0), (2.0, 17.0), (2.75, 17.0), (3.0, 15.0), (4.0, 15.0)];

        for (scale, expected) in cases {
            let padding = padding_adjustment(&android(26, scale), current).unwrap();
            assert_eq!(padding, Thickness::new(expected, 8.0, expected, 9.0), "scale {scale}");
        }
    }

    #[test]
    fn test_focus_delay() {
        assert_eq!(
            focus_delay(Platform::Android, DEFAULT_FOCUS_DELAY),
            Some(Duration::from_millis(500))
        );
        assert_eq!(focus_delay(Platform::Ios, DEFAULT_FOCUS_DELAY), None);
    }

    #[test]
    fn test_orientation() {
        assert!(Size { width: 320.0, height: 640.0 }.is_portrait());
        assert!(Size { width: 640.0, height: 320.0 }.is_landscape());
        assert!(Size { width: 500.0, height: 500.0 }.is_landscape());
    }
}
