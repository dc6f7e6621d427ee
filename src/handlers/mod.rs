pub mod dashboard;
pub mod exercises;
pub mod goals;
pub mod health;
pub mod routines;
pub mod social;
pub mod stats;
pub mod suggestions;
pub mod workouts;

use chrono::NaiveDate;
use serde::Deserialize;

use crate::error::{AppError, Result};

pub const DEFAULT_WINDOW_DAYS: u32 = 30;
pub const MAX_WINDOW_DAYS: u32 = 365;

/// The user's calendar day, as the server sees it.
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

#[derive(Debug, Deserialize)]
pub struct WindowQuery {
    pub days: Option<u32>,
}

impl WindowQuery {
    pub fn days(&self) -> Result<u32> {
        match self.days {
            None => Ok(DEFAULT_WINDOW_DAYS),
            Some(days) if (1..=MAX_WINDOW_DAYS).contains(&days) => Ok(days),
            Some(_) => Err(AppError::Validation(format!(
                "days must be between 1 and {MAX_WINDOW_DAYS}"
            ))),
        }
    }
}
