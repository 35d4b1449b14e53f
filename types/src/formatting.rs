//! Time formatting for countdown display.
//!
//! Note countdowns are always shown as zero-padded `MM:SS`, so every caller
//! goes through this module to keep overlays and text front ends consistent.

/// Format whole seconds as zero-padded `MM:SS`.
///
/// Minutes are not wrapped into hours; a 100 minute countdown is `100:00`.
///
/// # Examples
/// ```
/// use zonenotes_types::formatting::format_mm_ss;
/// assert_eq!(format_mm_ss(330), "05:30");
/// assert_eq!(format_mm_ss(0), "00:00");
/// assert_eq!(format_mm_ss(5999), "99:59");
/// ```
pub fn format_mm_ss(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_mm_ss() {
        assert_eq!(format_mm_ss(0), "00:00");
        assert_eq!(format_mm_ss(9), "00:09");
        assert_eq!(format_mm_ss(60), "01:00");
        assert_eq!(format_mm_ss(330), "05:30");
        assert_eq!(format_mm_ss(6000), "100:00");
    }
}
