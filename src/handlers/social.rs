use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use axum_extra::extract::WithRejection;
use serde::{Deserialize, Serialize};

use super::today;
use crate::analytics::leaderboard::rank;
use crate::analytics::streak::calculate_streak;
use crate::analytics::volume::total_volume;
use crate::analytics::{
    DateWindow, LeaderboardEntry, LeaderboardMetric, LeaderboardPeriod, Standing,
};
use crate::error::{AppError, Result};
use crate::middleware::AuthUser;
use crate::models::User;
use crate::repositories::{SocialRepository, UserRepository, WorkoutRepository};

#[derive(Clone)]
pub struct SocialState {
    pub social_repo: SocialRepository,
    pub user_repo: UserRepository,
    pub workout_repo: WorkoutRepository,
}

#[derive(Deserialize)]
pub struct LeaderboardQuery {
    #[serde(default)]
    metric: LeaderboardMetric,
    #[serde(default)]
    period: LeaderboardPeriod,
}

#[derive(Serialize)]
pub struct LeaderboardResponse {
    metric: LeaderboardMetric,
    period: LeaderboardPeriod,
    entries: Vec<LeaderboardEntry>,
}

pub async fn follow(
    State(state): State<SocialState>,
    auth_user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<StatusCode> {
    if user_id == auth_user.id {
        return Err(AppError::Validation("You cannot follow yourself".to_string()));
    }
    if state.user_repo.find_by_id(&user_id).await?.is_none() {
        return Err(AppError::NotFound("User not found".to_string()));
    }

    if state.social_repo.follow(&auth_user.id, &user_id).await? {
        tracing::info!(follower = %auth_user.id, following = %user_id, "Followed user");
    }
    Ok(StatusCode::NO_CONTENT)
}

pub async fn unfollow(
    State(state): State<SocialState>,
    auth_user: AuthUser,
    Path(user_id): Path<String>,
) -> Result<StatusCode> {
    state.social_repo.unfollow(&auth_user.id, &user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

async fn standing_for(
    state: &SocialState,
    user: User,
    metric: LeaderboardMetric,
    window: Option<DateWindow>,
) -> Result<Standing> {
    let since = window.map(|w| w.start);
    let value = match metric {
        LeaderboardMetric::Volume => {
            let rows = state.workout_repo.find_volume_rows(&user.id, since).await?;
            total_volume(&rows)
        }
        LeaderboardMetric::Workouts => {
            state.workout_repo.count_logs_since(&user.id, since).await? as f64
        }
        // Streak is a point-in-time value, the period does not apply
        LeaderboardMetric::Streak => {
            let dates = state.workout_repo.find_workout_dates(&user.id).await?;
            calculate_streak(&dates, today()).current as f64
        }
    };

    Ok(Standing {
        display_name: user.public_name().to_string(),
        user_id: user.id,
        username: user.username,
        value,
    })
}

pub async fn leaderboard(
    State(state): State<SocialState>,
    auth_user: AuthUser,
    WithRejection(Query(query), _): WithRejection<Query<LeaderboardQuery>, AppError>,
) -> Result<Json<LeaderboardResponse>> {
    let me = state
        .user_repo
        .find_by_id(&auth_user.id)
        .await?
        .ok_or(AppError::Unauthorized)?;

    let mut participants = vec![me];
    participants.extend(state.social_repo.find_following(&auth_user.id).await?);

    let window = query
        .period
        .days()
        .map(|days| DateWindow::trailing(today(), days));

    let mut standings = Vec::with_capacity(participants.len());
    for user in participants {
        standings.push(standing_for(&state, user, query.metric, window).await?);
    }

    Ok(Json(LeaderboardResponse {
        metric: query.metric,
        period: query.period,
        entries: rank(standings),
    }))
}
