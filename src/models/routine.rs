use chrono::{DateTime, Utc};
use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Routine {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl FromSqliteRow for Routine {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            user_id: row.get("user_id")?,
            name: row.get("name")?,
            notes: row.get("notes")?,
            created_at: row.get("created_at")?,
        })
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoutineExercise {
    pub id: String,
    pub routine_id: String,
    pub exercise_id: String,
    pub exercise_name: String,
    pub position: i32,
    pub sets: i32,
    pub reps: i32,
    pub weight: Option<f64>,
    pub superset_group: Option<i32>,
}

impl FromSqliteRow for RoutineExercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            routine_id: row.get("routine_id")?,
            exercise_id: row.get("exercise_id")?,
            exercise_name: row.get("exercise_name")?,
            position: row.get("position")?,
            sets: row.get("sets")?,
            reps: row.get("reps")?,
            weight: row.get("weight")?,
            superset_group: row.get("superset_group")?,
        })
    }
}

/// Exercises performed back to back. A block without a superset group holds
/// exactly one exercise.
#[derive(Debug, Clone, Serialize)]
pub struct RoutineBlock {
    pub superset_group: Option<i32>,
    pub exercises: Vec<RoutineExercise>,
}

impl RoutineBlock {
    pub fn is_superset(&self) -> bool {
        self.exercises.len() > 1
    }
}

#[derive(Debug, Serialize)]
pub struct RoutineDetail {
    #[serde(flatten)]
    pub routine: Routine,
    pub blocks: Vec<RoutineBlock>,
}

/// Groups position-ordered exercises into blocks. Consecutive exercises that
/// share a superset group end up in the same block.
pub fn group_into_blocks(exercises: Vec<RoutineExercise>) -> Vec<RoutineBlock> {
    let mut blocks: Vec<RoutineBlock> = Vec::new();

    for exercise in exercises {
        match (blocks.last_mut(), exercise.superset_group) {
            (Some(block), Some(group)) if block.superset_group == Some(group) => {
                block.exercises.push(exercise);
            }
            _ => blocks.push(RoutineBlock {
                superset_group: exercise.superset_group,
                exercises: vec![exercise],
            }),
        }
    }

    blocks
}

/// Moves the item at `from` to `to`, shifting everything in between.
/// Returns `false` and leaves `items` untouched when either index is out of
/// range.
pub fn move_item<T>(items: &mut Vec<T>, from: usize, to: usize) -> bool {
    if from >= items.len() || to >= items.len() {
        return false;
    }
    let item = items.remove(from);
    items.insert(to, item);
    true
}

#[derive(Debug, Deserialize)]
pub struct CreateRoutine {
    pub name: String,
    pub notes: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct AddRoutineExercise {
    pub exercise_id: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: Option<f64>,
    pub superset_group: Option<i32>,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRoutineExercise {
    pub from: usize,
    pub to: usize,
}
