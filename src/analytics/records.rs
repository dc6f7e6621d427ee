use std::collections::HashMap;

use serde::Serialize;

/// One logged exercise weight, as needed for record detection.
#[derive(Debug, Clone, PartialEq)]
pub struct LiftSample {
    pub entry_id: String,
    pub workout_log_id: String,
    pub exercise_id: String,
    pub weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonalRecordHit {
    pub entry_id: String,
    pub exercise_id: String,
    pub weight: f64,
    pub previous_best: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BestLift {
    pub exercise_id: String,
    pub weight: f64,
    pub workout_log_id: String,
}

/// Flags exercises in `entries` whose heaviest weight beats every earlier
/// weight for that exercise.
///
/// Samples in `history` belonging to `current_log_id` are skipped, so the
/// history may include the log that was just written. An exercise with no
/// earlier samples has nothing to beat and is not flagged; a tie is not a
/// record either.
pub fn detect_personal_records(
    current_log_id: &str,
    entries: &[LiftSample],
    history: &[LiftSample],
) -> Vec<PersonalRecordHit> {
    let mut prior_best: HashMap<&str, f64> = HashMap::new();
    for sample in history.iter().filter(|s| s.workout_log_id != current_log_id) {
        prior_best
            .entry(sample.exercise_id.as_str())
            .and_modify(|best| *best = best.max(sample.weight))
            .or_insert(sample.weight);
    }

    // Heaviest entry per exercise, keeping the first one on ties
    let mut heaviest: Vec<&LiftSample> = Vec::new();
    for entry in entries {
        match heaviest.iter_mut().find(|h| h.exercise_id == entry.exercise_id) {
            Some(current) if entry.weight > current.weight => *current = entry,
            Some(_) => {}
            None => heaviest.push(entry),
        }
    }

    heaviest
        .into_iter()
        .filter_map(|entry| {
            let previous_best = *prior_best.get(entry.exercise_id.as_str())?;
            (entry.weight > previous_best).then(|| PersonalRecordHit {
                entry_id: entry.entry_id.clone(),
                exercise_id: entry.exercise_id.clone(),
                weight: entry.weight,
                previous_best,
            })
        })
        .collect()
}

/// Maximum weight per exercise, ordered by exercise id. The earliest sample
/// in `history` wins a tie.
pub fn best_lifts(history: &[LiftSample]) -> Vec<BestLift> {
    let mut best: HashMap<&str, &LiftSample> = HashMap::new();
    for sample in history {
        best.entry(sample.exercise_id.as_str())
            .and_modify(|b| {
                if sample.weight > b.weight {
                    *b = sample;
                }
            })
            .or_insert(sample);
    }

    let mut lifts: Vec<BestLift> = best
        .into_values()
        .map(|s| BestLift {
            exercise_id: s.exercise_id.clone(),
            weight: s.weight,
            workout_log_id: s.workout_log_id.clone(),
        })
        .collect();
    lifts.sort_by(|a, b| a.exercise_id.cmp(&b.exercise_id));
    lifts
}
