use std::collections::{BTreeMap, HashMap};

use chrono::{Duration, NaiveDate};
use serde::Serialize;

/// One logged exercise, flattened with its workout date and muscle group.
#[derive(Debug, Clone, PartialEq)]
pub struct VolumeRow {
    pub performed_on: NaiveDate,
    pub muscle_group: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
}

impl VolumeRow {
    pub fn volume(&self) -> f64 {
        f64::from(self.sets) * f64::from(self.reps) * self.weight
    }
}

/// Inclusive range of calendar days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateWindow {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateWindow {
    /// The `days` calendar days ending at `today`, both ends included.
    /// A zero-day window is treated as one day.
    pub fn trailing(today: NaiveDate, days: u32) -> Self {
        let span = i64::from(days.max(1)) - 1;
        Self {
            start: today - Duration::days(span),
            end: today,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyVolume {
    pub date: NaiveDate,
    pub volume: f64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MuscleGroupLoad {
    pub muscle_group: String,
    pub sets: i64,
}

/// Volume for every day of `window`, oldest first. Days without training
/// report zero so the series can be charted directly.
pub fn daily_volume(rows: &[VolumeRow], window: DateWindow) -> Vec<DailyVolume> {
    let mut by_day: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for row in rows.iter().filter(|r| window.contains(r.performed_on)) {
        *by_day.entry(row.performed_on).or_insert(0.0) += row.volume();
    }

    window
        .days()
        .map(|date| DailyVolume {
            date,
            volume: by_day.get(&date).copied().unwrap_or(0.0),
        })
        .collect()
}

/// Total sets per muscle group inside `window`, heaviest group first.
pub fn muscle_heatmap(rows: &[VolumeRow], window: DateWindow) -> Vec<MuscleGroupLoad> {
    let mut by_group: HashMap<&str, i64> = HashMap::new();
    for row in rows.iter().filter(|r| window.contains(r.performed_on)) {
        *by_group.entry(row.muscle_group.as_str()).or_insert(0) += i64::from(row.sets);
    }

    let mut loads: Vec<MuscleGroupLoad> = by_group
        .into_iter()
        .map(|(muscle_group, sets)| MuscleGroupLoad {
            muscle_group: muscle_group.to_string(),
            sets,
        })
        .collect();
    loads.sort_by(|a, b| {
        b.sets
            .cmp(&a.sets)
            .then_with(|| a.muscle_group.cmp(&b.muscle_group))
    });
    loads
}

pub fn total_volume(rows: &[VolumeRow]) -> f64 {
    rows.iter().map(VolumeRow::volume).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, day).unwrap()
    }

    fn row(day: u32, muscle_group: &str, sets: i32, reps: i32, weight: f64) -> VolumeRow {
        VolumeRow {
            performed_on: date(day),
            muscle_group: muscle_group.to_string(),
            sets,
            reps,
            weight,
        }
    }

    #[test]
    fn test_trailing_window_is_inclusive() {
        let window = DateWindow::trailing(date(30), 30);
        assert_eq!(window.start, date(1));
        assert_eq!(window.days().count(), 30);
        assert!(window.contains(date(1)));
        assert!(window.contains(date(30)));
        assert!(!window.contains(date(31)));
    }

    #[test]
    fn test_zero_day_window_is_today() {
        let window = DateWindow::trailing(date(10), 0);
        assert_eq!(window.start, window.end);
    }

    #[test]
    fn test_daily_volume_matches_naive_sum() {
        let rows = vec![
            row(10, "chest", 3, 10, 60.0),
            row(10, "legs", 5, 5, 100.0),
            row(10, "chest", 2, 8, 70.0),
            row(12, "back", 4, 8, 80.0),
        ];

        let series = daily_volume(&rows, DateWindow::trailing(date(12), 3));
        assert_eq!(
            series,
            vec![
                DailyVolume {
                    date: date(10),
                    volume: 1800.0 + 2500.0 + 1120.0,
                },
                DailyVolume {
                    date: date(11),
                    volume: 0.0,
                },
                DailyVolume {
                    date: date(12),
                    volume: 2560.0,
                },
            ]
        );

        let naive: f64 = rows
            .iter()
            .filter(|r| r.performed_on == date(10))
            .map(VolumeRow::volume)
            .sum();
        assert_eq!(series[0].volume, naive);
    }

    #[test]
    fn test_daily_volume_ignores_rows_outside_window() {
        let rows = vec![row(1, "chest", 3, 10, 60.0), row(20, "chest", 1, 1, 10.0)];
        let series = daily_volume(&rows, DateWindow::trailing(date(20), 7));
        assert_eq!(series.len(), 7);
        assert_eq!(series.iter().map(|d| d.volume).sum::<f64>(), 10.0);
    }

    #[test]
    fn test_muscle_heatmap_sums_sets() {
        let rows = vec![
            row(10, "chest", 3, 10, 60.0),
            row(11, "legs", 5, 5, 100.0),
            row(12, "chest", 4, 8, 70.0),
            row(12, "arms", 5, 12, 20.0),
            row(1, "back", 20, 5, 100.0),
        ];

        let heatmap = muscle_heatmap(&rows, DateWindow::trailing(date(12), 7));
        let pairs: Vec<(&str, i64)> = heatmap
            .iter()
            .map(|l| (l.muscle_group.as_str(), l.sets))
            .collect();
        assert_eq!(pairs, vec![("chest", 7), ("arms", 5), ("legs", 5)]);
    }

    #[test]
    fn test_total_volume() {
        let rows = vec![row(1, "chest", 3, 10, 50.0), row(2, "legs", 1, 1, 0.0)];
        assert_eq!(total_volume(&rows), 1500.0);
        assert_eq!(total_volume(&[]), 0.0);
    }
}
