//! HTTP endpoint handlers

use std::{sync::Arc, time::Instant};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use chrono::Utc;
use tracing::{error, info, warn};

use crate::{
    error::TimerError,
    state::{Activation, AppState, TimerSnapshot},
};
use super::responses::{
    AdjustRequest, ApiResponse, HealthResponse, NotificationEntry, NotificationsResponse,
    StatusResponse,
};

/// Map a timer error to an HTTP status, logging it
fn error_status(context: &str, e: TimerError) -> StatusCode {
    match e {
        TimerError::NotificationNotFound(id) => {
            warn!("{}: notification {} not found", context, id);
            StatusCode::NOT_FOUND
        }
        other => {
            error!("{}: {}", context, other);
            StatusCode::INTERNAL_SERVER_ERROR
        }
    }
}

/// Record the action and wrap the snapshot in an `ApiResponse`
fn timer_response(
    state: &AppState,
    action: &str,
    message: &str,
    result: Result<TimerSnapshot, TimerError>,
) -> Result<Json<ApiResponse>, StatusCode> {
    match result {
        Ok(snapshot) => {
            state.record_action(action);
            info!("{} endpoint called - {} {} remaining", action, snapshot.phase, snapshot.display);
            Ok(Json(ApiResponse::from_snapshot(message.to_string(), snapshot)))
        }
        Err(e) => Err(error_status(&format!("Failed to {} timer", action), e)),
    }
}

/// Handle POST /timer/start - Start the countdown
pub async fn start_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    timer_response(&state, "start", "Timer started", state.timer.start())
}

/// Handle POST /timer/pause - Pause the countdown
pub async fn pause_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    timer_response(&state, "pause", "Timer paused", state.timer.pause())
}

/// Handle POST /timer/toggle - Tap on the timer face
pub async fn toggle_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    timer_response(&state, "toggle", "Timer toggled", state.timer.toggle())
}

/// Handle POST /timer/reset - Back to an idle work phase
pub async fn reset_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    timer_response(&state, "reset", "Timer reset", state.timer.reset())
}

/// Handle POST /timer/activate - Crown press, double press pauses
pub async fn activate_handler(State(state): State<Arc<AppState>>) -> Result<Json<ApiResponse>, StatusCode> {
    let (activation, snapshot) = state
        .timer
        .activate(Instant::now())
        .map_err(|e| error_status("Failed to handle crown activation", e))?;

    let message = match activation {
        Activation::Start => "Timer started by crown press",
        Activation::Pause => "Timer paused by double crown press",
        Activation::Ignored => "Crown press ignored",
    };
    timer_response(&state, "activate", message, Ok(snapshot))
}

/// Handle POST /timer/adjust - Crown rotation sets the phase length
pub async fn adjust_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AdjustRequest>,
) -> Result<Json<ApiResponse>, StatusCode> {
    let result = state.timer.adjust_minutes(request.minutes);
    timer_response(&state, "adjust", "Timer length adjusted", result)
}

/// Handle GET /timer - Current timer snapshot
pub async fn timer_handler(State(state): State<Arc<AppState>>) -> Result<Json<TimerSnapshot>, StatusCode> {
    state
        .timer
        .snapshot()
        .map(Json)
        .map_err(|e| error_status("Failed to read timer", e))
}

/// Handle GET /notifications - Inbox contents, newest first
pub async fn notifications_handler(
    State(state): State<Arc<AppState>>,
) -> Result<Json<NotificationsResponse>, StatusCode> {
    let (items, unread) = state
        .list_notifications()
        .map_err(|e| error_status("Failed to list notifications", e))?;

    let now = Utc::now();
    let notifications = items
        .into_iter()
        .map(|item| NotificationEntry {
            age: item.time_ago(now),
            item,
        })
        .collect();

    Ok(Json(NotificationsResponse { unread, notifications }))
}

/// Handle PATCH /notifications - Mark every notification read
pub async fn mark_all_read_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.mark_all_notifications_read() {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(e) => error_status("Failed to mark notifications read", e),
    }
}

/// Handle PATCH /notifications/:id - Mark one notification read
pub async fn mark_read_handler(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> StatusCode {
    match state.mark_notification_read(id) {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(e) => error_status("Failed to mark notification read", e),
    }
}

/// Handle DELETE /notifications/:id - Remove one notification
pub async fn remove_notification_handler(State(state): State<Arc<AppState>>, Path(id): Path<u64>) -> StatusCode {
    match state.remove_notification(id) {
        Ok(_) => StatusCode::NO_CONTENT,
        Err(e) => error_status("Failed to remove notification", e),
    }
}

/// Handle DELETE /notifications - Clear the inbox
pub async fn clear_notifications_handler(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.clear_notifications() {
        Ok(_) => StatusCode::NO_CONTENT,
        Err(e) => error_status("Failed to clear notifications", e),
    }
}

/// Handle GET /status - Return current status
pub async fn status_handler(State(state): State<Arc<AppState>>) -> Result<Json<StatusResponse>, StatusCode> {
    let timer = state
        .timer
        .snapshot()
        .map_err(|e| error_status("Failed to get timer state", e))?;
    let stats = state
        .get_stats()
        .map_err(|e| error_status("Failed to get focus stats", e))?;
    let (_, unread_notifications) = state
        .list_notifications()
        .map_err(|e| error_status("Failed to read inbox", e))?;

    let (last_action, last_action_time) = state.get_last_action();

    Ok(Json(StatusResponse {
        timer,
        stats,
        notifications_permitted: state.notifications_permitted(),
        unread_notifications,
        uptime: state.get_uptime(),
        port: state.port,
        host: state.host.clone(),
        last_action,
        last_action_time,
    }))
}

/// Handle GET /health - Health check endpoint
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::ok())
}
