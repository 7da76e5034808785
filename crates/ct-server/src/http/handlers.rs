use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use ct_app::TriggerSource;
use ct_core::{Settings, SettingsPatch};
use tracing::{info_span, warn, Instrument};

use super::dto::{AppliedChangesDto, HistoryItemDto};
use super::error::ApiError;
use super::state::AppState;

pub async fn history(State(state): State<AppState>) -> Result<Json<Vec<HistoryItemDto>>, ApiError> {
    let entries = state.runtime.usecases().list_history().execute().await?;
    Ok(Json(entries.into_iter().map(HistoryItemDto::from).collect()))
}

pub async fn clear(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.runtime.usecases().clear_history().execute().await?;
    Ok(StatusCode::OK)
}

/// Starts a job and answers before it finishes.
pub async fn refresh(State(state): State<AppState>) -> StatusCode {
    state.dispatcher.fire(TriggerSource::Http);
    StatusCode::ACCEPTED
}

/// The API key comes back masked.
pub async fn get_config(State(state): State<AppState>) -> Json<Settings> {
    let settings = state.runtime.usecases().get_settings().execute().await;
    Json(settings.redacted())
}

/// Sections missing from the body keep their current values.
pub async fn update_config(
    State(state): State<AppState>,
    payload: Result<Json<SettingsPatch>, JsonRejection>,
) -> Result<Json<AppliedChangesDto>, ApiError> {
    let span = info_span!("http.update_config");

    async move {
        let Json(patch) = payload.map_err(|rejection| {
            warn!(error = %rejection.body_text(), "Rejected config update");
            ApiError::from(rejection)
        })?;
        let applied = state
            .runtime
            .usecases()
            .update_settings()
            .execute_patch(patch)
            .await?;
        Ok(Json(applied.into()))
    }
    .instrument(span)
    .await
}

pub async fn health() -> &'static str {
    "OK"
}
