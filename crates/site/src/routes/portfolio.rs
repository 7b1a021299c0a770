//! Portfolio content route handler.

use axum::{Json, extract::State};

use crate::content::Portfolio;
use crate::state::AppState;

/// Portfolio content.
///
/// GET /api/portfolio
pub async fn show(State(state): State<AppState>) -> Json<Portfolio> {
    Json(state.portfolio().clone())
}
