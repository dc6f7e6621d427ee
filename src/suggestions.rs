//! Workout suggestions from an OpenAI-compatible chat completion endpoint.

use std::fmt::Write as _;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::analytics::{MuscleGroupLoad, StreakSummary};
use crate::config::LlmConfig;
use crate::error::{AppError, Result};
use crate::models::MUSCLE_GROUPS;

const SYSTEM_PROMPT: &str = "You are a strength coach. Suggest one workout for today as a short \
list of exercises with sets, reps and a target weight. Keep it under 150 words.";

/// Everything the prompt is built from, already loaded by the handler.
#[derive(Debug, Clone)]
pub struct SuggestionContext {
    pub today: NaiveDate,
    pub streak: StreakSummary,
    pub recent_workouts: Vec<RecentWorkout>,
    pub heatmap: Vec<MuscleGroupLoad>,
    pub goals: Vec<String>,
    pub focus: Option<String>,
}

#[derive(Debug, Clone)]
pub struct RecentWorkout {
    pub performed_on: NaiveDate,
    pub exercises: Vec<RecentExercise>,
}

#[derive(Debug, Clone)]
pub struct RecentExercise {
    pub name: String,
    pub sets: i32,
    pub reps: i32,
    pub weight: f64,
}

/// Muscle groups with no sets in the heatmap, in display order.
pub fn untrained_groups(heatmap: &[MuscleGroupLoad]) -> Vec<&'static str> {
    MUSCLE_GROUPS
        .iter()
        .filter(|g| {
            !heatmap
                .iter()
                .any(|load| load.muscle_group == g.name && load.sets > 0)
        })
        .map(|g| g.name)
        .collect()
}

pub fn build_prompt(ctx: &SuggestionContext) -> String {
    let mut prompt = String::new();

    let _ = writeln!(prompt, "Today is {}.", ctx.today);
    let _ = writeln!(
        prompt,
        "Current streak: {} days (best {}).",
        ctx.streak.current, ctx.streak.best
    );

    if ctx.recent_workouts.is_empty() {
        prompt.push_str("No workouts logged yet.\n");
    } else {
        prompt.push_str("\nRecent workouts:\n");
        for workout in &ctx.recent_workouts {
            let _ = writeln!(prompt, "- {}:", workout.performed_on);
            for e in &workout.exercises {
                let _ = writeln!(
                    prompt,
                    "  - {}: {}x{} @ {}kg",
                    e.name, e.sets, e.reps, e.weight
                );
            }
        }
    }

    if !ctx.heatmap.is_empty() {
        prompt.push_str("\nSets per muscle group, last 30 days:\n");
        for load in &ctx.heatmap {
            let _ = writeln!(prompt, "- {}: {}", load.muscle_group, load.sets);
        }
    }

    let untrained = untrained_groups(&ctx.heatmap);
    if !untrained.is_empty() {
        let _ = writeln!(prompt, "\nNot trained in the last 30 days: {}.", untrained.join(", "));
    }

    if !ctx.goals.is_empty() {
        prompt.push_str("\nGoals:\n");
        for goal in &ctx.goals {
            let _ = writeln!(prompt, "- {goal}");
        }
    }

    if let Some(focus) = ctx.focus.as_deref().map(str::trim).filter(|f| !f.is_empty()) {
        let _ = writeln!(prompt, "\nThe user wants to focus on: {focus}.");
    }

    prompt.push_str("\nSuggest today's workout.");
    prompt
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

#[derive(Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

#[derive(Clone)]
pub struct SuggestionClient {
    http: reqwest::Client,
    config: LlmConfig,
}

impl SuggestionClient {
    pub fn new(config: LlmConfig) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Internal(e.to_string()))?;
        Ok(Self { http, config })
    }

    pub async fn suggest(&self, prompt: &str) -> Result<String> {
        let request = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: SYSTEM_PROMPT,
                },
                ChatMessage {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: 0.4,
        };

        let mut builder = self.http.post(&self.config.endpoint).json(&request);
        if let Some(key) = &self.config.api_key {
            builder = builder.bearer_auth(key);
        }

        tracing::debug!(model = %self.config.model, "Requesting workout suggestion");

        let response = builder
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        let body: ChatResponse = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(e.to_string()))?;

        body.choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .filter(|c| !c.is_empty())
            .ok_or_else(|| AppError::Upstream("empty completion".to_string()))
    }
}
