//! Route handlers.

use axum::extract::rejection::{FormRejection, JsonRejection, QueryRejection};
use axum::extract::{Query, State};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::{Form, Json};
use tracing::{debug, info, warn};

use threatlens_core::ScanError;

use crate::error::{ApiError, Result};
use crate::models::{FlashQuery, ScanForm, ScanRequest, ScanResponse, StatusResponse};
use crate::pages::{self, FlashLevel};
use crate::state::AppState;

/// GET / - Scan form, with an optional flash message.
///
/// An undecodable query string renders the form without a flash.
pub async fn index(query: std::result::Result<Query<FlashQuery>, QueryRejection>) -> Html<String> {
    let query = match query {
        Ok(Query(query)) => query,
        Err(e) => {
            debug!(error = %e, "Ignoring unreadable flash query");
            FlashQuery::default()
        }
    };

    let level = query
        .level
        .as_deref()
        .map(FlashLevel::parse)
        .unwrap_or(FlashLevel::Info);
    let flash = query
        .flash
        .as_deref()
        .filter(|m| !m.is_empty())
        .map(|m| (level, m));

    Html(pages::render_index(flash))
}

/// POST /scan - Classify the submitted token and render the lookup result.
///
/// Every failure redirects back to the form with a flash message. A body
/// that cannot be read as a form counts as empty input.
pub async fn scan_form(
    State(state): State<AppState>,
    form: std::result::Result<Form<ScanForm>, FormRejection>,
) -> Response {
    let form = match form {
        Ok(Form(form)) => form,
        Err(e) => {
            debug!(error = %e, "Unreadable scan form");
            ScanForm::default()
        }
    };

    debug!(input_len = form.scan_input.len(), "Scan form submitted");

    match state.scanner.scan(&form.scan_input).await {
        Ok(report) => {
            info!(scan_type = ?report.kind, "Rendering scan results");
            Html(pages::render_results(&report)).into_response()
        }
        Err(ScanError::Validation(message)) => {
            let level = if form.scan_input.trim().is_empty() {
                FlashLevel::Warning
            } else {
                FlashLevel::Error
            };
            Redirect::to(&pages::flash_location(level, &message)).into_response()
        }
        Err(e) => {
            warn!(error = %e, "Scan failed");
            let message = format!("Scan failed: {}", e);
            Redirect::to(&pages::flash_location(FlashLevel::Error, &message)).into_response()
        }
    }
}

/// POST /api/scan - Classify and look up a token, returning JSON.
pub async fn api_scan(
    State(state): State<AppState>,
    payload: std::result::Result<Json<ScanRequest>, JsonRejection>,
) -> Result<Json<ScanResponse>> {
    let Json(req) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;

    let report = state.scanner.scan(&req.scan_input).await?;

    Ok(Json(report.into()))
}

/// GET /api/status - Which lookups have credentials.
pub async fn api_status(State(state): State<AppState>) -> Json<StatusResponse> {
    Json(StatusResponse {
        ip_lookup_enabled: state.scanner.ip_lookup_enabled(),
        hash_lookup_enabled: state.scanner.hash_lookup_enabled(),
    })
}

/// Fallback for unknown routes.
pub async fn not_found() -> Redirect {
    Redirect::to(&pages::flash_location(FlashLevel::Error, "Page not found."))
}
