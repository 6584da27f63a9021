/// Format a duration as `m:ss`, or `h:mm:ss` from one hour upwards.
pub fn format_duration(seconds: f64) -> String {
    let total = if seconds.is_finite() && seconds > 0.0 {
        seconds.round() as u64
    } else {
        0
    };
    let (h, m, s) = (total / 3600, (total / 60) % 60, total % 60);
    if h > 0 {
        format!("{h}:{m:02}:{s:02}")
    } else {
        format!("{m}:{s:02}")
    }
}

/// `elapsed/total` label shown next to the play/pause affordance.
pub fn position_label(elapsed: f64, total: f64) -> String {
    format!("{}/{}", format_duration(elapsed), format_duration(total))
}
