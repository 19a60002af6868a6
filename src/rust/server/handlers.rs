use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form, Json,
};

use crate::classifier::{ModelInfo, Prediction, RawPatientInput};
use crate::server::error::ApiError;
use crate::server::state::AppState;

pub const MODEL_NOT_FOUND: &str = "Model not found. Please train the model first.";

// ── Pages ───────────────────────────────────────────────────────────

async fn render_page(state: &AppState, name: &str) -> Response {
    let path = state.templates_dir.join(name);
    match tokio::fs::read_to_string(&path).await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            log::warn!("Failed to read page {:?}: {}", path, e);
            (StatusCode::NOT_FOUND, format!("{} not found", name)).into_response()
        }
    }
}

pub async fn home(State(state): State<AppState>) -> Response {
    render_page(&state, "index.html").await
}

pub async fn about(State(state): State<AppState>) -> Response {
    render_page(&state, "about.html").await
}

// ── Prediction ──────────────────────────────────────────────────────

pub async fn predict(
    State(state): State<AppState>,
    form: Result<Form<RawPatientInput>, FormRejection>,
) -> Result<Json<Prediction>, ApiError> {
    let classifier = state
        .artifacts
        .classifier()
        .ok_or_else(|| ApiError::service_unavailable(MODEL_NOT_FOUND))?;

    let Form(raw) = form.map_err(|e| ApiError::invalid_input(e.body_text()))?;
    let input = raw.parse()?;
    let prediction = classifier.predict(&input)?;

    log::info!(
        "Predicted {} for age={} sex={} bp={} cholesterol={} na_to_k={}",
        prediction.prediction,
        input.age,
        input.sex,
        input.bp,
        input.cholesterol,
        input.na_to_k
    );
    Ok(Json(prediction))
}

// ── Introspection ───────────────────────────────────────────────────

pub async fn model_info(State(state): State<AppState>) -> Result<Json<ModelInfo>, ApiError> {
    let classifier = state
        .artifacts
        .classifier()
        .ok_or_else(|| ApiError::not_found("Model not found"))?;
    Ok(Json(classifier.info()))
}
