use std::time::Duration;

/// Terminal platform family, used to pick the scroll animation duration.
///
/// Mobile terminals animate noticeably slower than desktop ones to stay in
/// step with the host platform's own transition timing, so the strip uses a
/// longer duration there.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlatformFamily {
    /// iSH and other iOS-hosted terminals
    Ios,
    /// Termux and other Android-hosted terminals
    Android,
    /// Everything else
    Desktop,
}

impl PlatformFamily {
    /// Detect the platform family from the process environment.
    ///
    /// Termux exports `TERMUX_VERSION`; iSH exports `ISH_VERSION`. Neither
    /// marker present means a desktop terminal.
    pub fn detect() -> Self {
        if std::env::var_os("TERMUX_VERSION").is_some() {
            PlatformFamily::Android
        } else if std::env::var_os("ISH_VERSION").is_some() {
            PlatformFamily::Ios
        } else {
            PlatformFamily::Desktop
        }
    }

    /// Scroll animation duration for this platform family.
    pub fn scroll_duration(&self) -> Duration {
        match self {
            PlatformFamily::Ios => Duration::from_millis(450),
            PlatformFamily::Android => Duration::from_millis(400),
            PlatformFamily::Desktop => Duration::from_millis(300),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scroll_durations() {
        assert_eq!(
            PlatformFamily::Ios.scroll_duration(),
            Duration::from_millis(450)
        );
        assert_eq!(
            PlatformFamily::Android.scroll_duration(),
            Duration::from_millis(400)
        );
        assert_eq!(
            PlatformFamily::Desktop.scroll_duration(),
            Duration::from_millis(300)
        );
    }
}
