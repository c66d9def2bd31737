//! Elapsed/remaining labels and progress ratio derived from the media clock.

/// Display values derived from the media clock.
#[derive(Debug, Clone, PartialEq)]
pub struct Progress {
    /// Position over duration, in percent (0-100).
    pub ratio: f64,
    /// `MM:SS` of the elapsed time.
    pub elapsed_label: String,
    /// `MM:SS` of the time left.
    pub remaining_label: String,
}

impl Default for Progress {
    fn default() -> Self {
        Self {
            ratio: 0.0,
            elapsed_label: "00:00".to_string(),
            remaining_label: "00:00".to_string(),
        }
    }
}

/// Truncate `x` toward zero and render it with at least two digits.
pub fn format_component(x: f64) -> String {
    let x = x.trunc() as i64;
    if x < 10 {
        format!("0{x}")
    } else {
        x.to_string()
    }
}

fn format_label(secs: f64) -> String {
    format!(
        "{}:{}",
        format_component(secs / 60.0),
        format_component(secs % 60.0)
    )
}

/// Compute labels and ratio for `current_time` seconds into a track of
/// `duration` seconds.
///
/// An unknown duration (no media loaded, NaN, infinite or non-positive) yields
/// the all-zero `Progress`.
pub fn compute_progress(current_time: f64, duration: Option<f64>) -> Progress {
    let Some(duration) = duration.filter(|d| d.is_finite() && *d > 0.0) else {
        return Progress::default();
    };

    let elapsed = current_time.trunc();
    // Position can overshoot the reported duration by a tick at the very end.
    let remaining = (duration.trunc() - elapsed).max(0.0);

    Progress {
        ratio: current_time / duration * 100.0,
        elapsed_label: format_label(elapsed),
        remaining_label: format_label(remaining),
    }
}
