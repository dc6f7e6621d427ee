use rusqlite::Row;
use serde::{Deserialize, Serialize};

use super::FromSqliteRow;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Exercise {
    pub id: String,
    pub name: String,
    pub muscle_group: String,
    pub equipment: Option<String>,
    pub user_id: Option<String>,
}

impl Exercise {
    pub fn is_builtin(&self) -> bool {
        self.user_id.is_none()
    }

    /// Built-in exercises are visible to everyone, custom ones to their owner.
    pub fn is_visible_to(&self, user_id: &str) -> bool {
        self.is_builtin() || self.user_id.as_deref() == Some(user_id)
    }
}

impl FromSqliteRow for Exercise {
    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get("id")?,
            name: row.get("name")?,
            muscle_group: row.get("muscle_group")?,
            equipment: row.get("equipment")?,
            user_id: row.get("user_id")?,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateExercise {
    pub name: String,
    pub muscle_group: String,
    pub equipment: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct MuscleGroup {
    pub name: &'static str,
    pub display_name: &'static str,
}

pub const MUSCLE_GROUPS: &[MuscleGroup] = &[
    MuscleGroup {
        name: "chest",
        display_name: "Chest",
    },
    MuscleGroup {
        name: "back",
        display_name: "Back",
    },
    MuscleGroup {
        name: "legs",
        display_name: "Legs",
    },
    MuscleGroup {
        name: "shoulders",
        display_name: "Shoulders",
    },
    MuscleGroup {
        name: "arms",
        display_name: "Arms",
    },
    MuscleGroup {
        name: "core",
        display_name: "Core",
    },
    MuscleGroup {
        name: "cardio",
        display_name: "Cardio",
    },
];

pub fn is_known_muscle_group(name: &str) -> bool {
    MUSCLE_GROUPS.iter().any(|g| g.name == name)
}
