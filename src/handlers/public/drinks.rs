use axum::extract::State;

use crate::database::models::DrinkSummary;
use crate::error::ApiError;
use crate::middleware::{ApiResponse, ApiResult, DrinkList};
use crate::state::AppState;

/// GET /drinks - every drink in summary form (ingredient names hidden)
///
/// An empty menu is answered with 404 rather than an empty list.
pub async fn list(State(state): State<AppState>) -> ApiResult<DrinkList<DrinkSummary>> {
    let drinks = state.drinks.list_all().await?;
    if drinks.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(ApiResponse::drinks(drinks.iter().map(|d| d.summary()).collect()))
}
