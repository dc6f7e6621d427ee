use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GoalProgress {
    pub current: f64,
    pub target: f64,
    /// Whole percent, clamped to 0..=100.
    pub percent: u8,
    pub achieved: bool,
}

pub fn progress(current: f64, target: f64) -> GoalProgress {
    let current = if current.is_finite() { current.max(0.0) } else { 0.0 };
    let ratio = if target > 0.0 { current / target } else { 1.0 };
    let percent = (ratio * 100.0).floor().clamp(0.0, 100.0) as u8;

    GoalProgress {
        current,
        target,
        percent,
        achieved: current >= target,
    }
}
