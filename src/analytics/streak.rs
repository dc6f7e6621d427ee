use chrono::NaiveDate;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StreakSummary {
    pub current: u32,
    pub best: u32,
    pub last_workout: Option<NaiveDate>,
}

/// Computes the current and best streak of consecutive workout days.
///
/// `dates` may be unsorted and contain duplicates (several logs on one day).
/// Dates after `today` are ignored. The current streak is alive when the most
/// recent workout was today or yesterday; a gap of two or more days resets it
/// to zero.
pub fn calculate_streak(dates: &[NaiveDate], today: NaiveDate) -> StreakSummary {
    let mut days: Vec<NaiveDate> = dates.iter().copied().filter(|d| *d <= today).collect();
    days.sort_unstable_by(|a, b| b.cmp(a));
    days.dedup();

    let Some(&last) = days.first() else {
        return StreakSummary::default();
    };

    // Lengths of each run of consecutive days, newest run first
    let mut runs: Vec<u32> = vec![1];
    for pair in days.windows(2) {
        if (pair[0] - pair[1]).num_days() == 1 {
            if let Some(run) = runs.last_mut() {
                *run += 1;
            }
        } else {
            runs.push(1);
        }
    }

    let days_since_last = (today - last).num_days();
    let current = if days_since_last <= 1 { runs[0] } else { 0 };
    let best = runs.iter().copied().max().unwrap_or(0);

    StreakSummary {
        current,
        best,
        last_workout: Some(last),
    }
}
