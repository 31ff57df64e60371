//! Compact human-readable durations.

const SECOND_MS: u64 = 1_000;
const MINUTE_MS: u64 = 60 * SECOND_MS;
const HOUR_MS: u64 = 60 * MINUTE_MS;
const DAY_MS: u64 = 24 * HOUR_MS;

/// Format a millisecond duration as `"3d 5h"`, `"2h 14m"`, `"37m"` or `"42s"`.
///
/// Values are truncated to the displayed unit. Negative durations keep
/// their sign.
pub fn format_duration(ms: f64) -> String {
    if !ms.is_finite() {
        return "-".to_string();
    }
    if ms < 0.0 {
        return format!("-{}", format_duration(-ms));
    }

    let ms = ms as u64;
    if ms >= DAY_MS {
        format!("{}d {}h", ms / DAY_MS, (ms % DAY_MS) / HOUR_MS)
    } else if ms >= HOUR_MS {
        format!("{}h {}m", ms / HOUR_MS, (ms % HOUR_MS) / MINUTE_MS)
    } else if ms >= MINUTE_MS {
        format!("{}m", ms / MINUTE_MS)
    } else {
        format!("{}s", ms / SECOND_MS)
    }
}
