use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardMetric {
    #[default]
    Volume,
    Workouts,
    Streak,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LeaderboardPeriod {
    #[default]
    Week,
    Month,
    All,
}

impl LeaderboardPeriod {
    /// Length of the trailing window in days, `None` for all time.
    pub fn days(&self) -> Option<u32> {
        match self {
            LeaderboardPeriod::Week => Some(7),
            LeaderboardPeriod::Month => Some(30),
            LeaderboardPeriod::All => None,
        }
    }
}

/// A participant's unranked score.
#[derive(Debug, Clone, PartialEq)]
pub struct Standing {
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LeaderboardEntry {
    pub rank: u32,
    pub user_id: String,
    pub username: String,
    pub display_name: String,
    pub value: f64,
}

/// Scores are compared in thousandths (grams for volume), so sums of the
/// same lifts added in a different order still tie.
fn score_key(value: f64) -> i64 {
    (value * 1000.0).round() as i64
}

/// Orders standings by value, highest first, and assigns competition ranks:
/// equal values share a rank and the next rank skips (1, 2, 2, 4).
/// Ties are listed by username.
pub fn rank(standings: Vec<Standing>) -> Vec<LeaderboardEntry> {
    let mut keyed: Vec<(i64, Standing)> = standings
        .into_iter()
        .map(|s| (score_key(s.value), s))
        .collect();
    keyed.sort_by(|(a_key, a), (b_key, b)| {
        b_key
            .cmp(a_key)
            .then_with(|| a.username.cmp(&b.username))
    });

    let mut entries: Vec<LeaderboardEntry> = Vec::with_capacity(keyed.len());
    let mut prev_key = None;
    for (index, (key, standing)) in keyed.into_iter().enumerate() {
        let rank = match entries.last() {
            Some(prev) if prev_key == Some(key) => prev.rank,
            _ => index as u32 + 1,
        };
        prev_key = Some(key);
        entries.push(LeaderboardEntry {
            rank,
            user_id: standing.user_id,
            username: standing.username,
            display_name: standing.display_name,
            value: key as f64 / 1000.0,
        });
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standing(username: &str, value: f64) -> Standing {
        Standing {
            user_id: format!("id-{username}"),
            username: username.to_string(),
            display_name: username.to_string(),
            value,
        }
    }

    fn ranks(entries: &[LeaderboardEntry]) -> Vec<(u32, &str)> {
        entries
            .iter()
            .map(|e| (e.rank, e.username.as_str()))
            .collect()
    }

    #[test]
    fn test_rank_orders_by_value() {
        let entries = rank(vec![
            standing("amy", 100.0),
            standing("bob", 300.0),
            standing("cat", 200.0),
        ]);
        assert_eq!(ranks(&entries), vec![(1, "bob"), (2, "cat"), (3, "amy")]);
    }

    #[test]
    fn test_ties_share_rank_and_next_skips() {
        let entries = rank(vec![
            standing("dan", 50.0),
            standing("cat", 200.0),
            standing("bob", 200.0),
            standing("amy", 300.0),
        ]);
        assert_eq!(
            ranks(&entries),
            vec![(1, "amy"), (2, "bob"), (2, "cat"), (4, "dan")]
        );
    }

    #[test]
    fn test_float_sums_in_different_order_tie() {
        let entries = rank(vec![
            standing("bob", 0.1 + 0.2),
            standing("amy", 0.3),
            standing("cat", 1.25 * 3.0 + 80.5 * 12.0),
            standing("dan", 80.5 * 12.0 + 3.75),
        ]);
        assert_eq!(
            ranks(&entries),
            vec![(1, "cat"), (1, "dan"), (3, "amy"), (3, "bob")]
        );
        assert_eq!(entries[2].value, entries[3].value);
        assert_eq!(entries[3].value, 0.3);
    }

    #[test]
    fn test_everyone_at_zero() {
        let entries = rank(vec![standing("bob", 0.0), standing("amy", 0.0)]);
        assert_eq!(ranks(&entries), vec![(1, "amy"), (1, "bob")]);
    }

    #[test]
    fn test_empty() {
        assert!(rank(Vec::new()).is_empty());
    }

    #[test]
    fn test_period_days() {
        assert_eq!(LeaderboardPeriod::Week.days(), Some(7));
        assert_eq!(LeaderboardPeriod::Month.days(), Some(30));
        assert_eq!(LeaderboardPeriod::All.days(), None);
    }
}
