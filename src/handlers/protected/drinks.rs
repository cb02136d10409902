use axum::{
    extract::{rejection::JsonRejection, rejection::PathRejection, Path, State},
    Json,
};
use tracing::{debug, info};

use crate::database::models::{Drink, DrinkPayload};
use crate::error::ApiError;
use crate::middleware::{
    ApiResponse, ApiResult, Authorized, Deleted, DeleteDrinks, DrinkList, GetDrinksDetail,
    PatchDrinks, PostDrinks,
};
use crate::state::AppState;

/// GET /drinks-detail - every drink in detail form
pub async fn detail(
    State(state): State<AppState>,
    _auth: Authorized<GetDrinksDetail>,
) -> ApiResult<DrinkList<Drink>> {
    let drinks = state.drinks.list_all().await?;
    if drinks.is_empty() {
        return Err(ApiError::NotFound);
    }

    Ok(ApiResponse::drinks(drinks))
}

/**
 * POST /drinks - create a drink
 *
 * Expected Input:
 * ```json
 * {
 *   "title": "Water",
 *   "recipe": [{ "name": "H2O", "color": "blue", "parts": 1 }]
 * }
 * ```
 *
 * Both fields are required. Any failure, including a title that already
 * exists, is answered with 422.
 */
pub async fn create(
    State(state): State<AppState>,
    auth: Authorized<PostDrinks>,
    payload: Result<Json<DrinkPayload>, JsonRejection>,
) -> ApiResult<DrinkList<Drink>> {
    let Json(payload) = payload.map_err(|rejection| {
        debug!("Rejected drink body: {}", rejection);
        ApiError::Unprocessable
    })?;
    let new_drink = payload.into_new_drink().ok_or(ApiError::Unprocessable)?;

    let drink = state.drinks.insert(&new_drink).await?;
    info!("Drink {} '{}' created by {}", drink.id, drink.title, auth.subject());

    Ok(ApiResponse::drinks(vec![drink]))
}

/// PATCH /drinks/:id - overwrite `title` and/or `recipe` when supplied
pub async fn update(
    State(state): State<AppState>,
    auth: Authorized<PatchDrinks>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<DrinkPayload>, JsonRejection>,
) -> ApiResult<DrinkList<Drink>> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;

    let changes = match payload.map(|Json(p)| p.into_changes()) {
        Ok(Some(changes)) => changes,
        invalid => {
            if let Err(rejection) = invalid {
                debug!("Rejected drink body: {}", rejection);
            }
            // An unknown id wins over a bad body
            return match state.drinks.get_by_id(id).await? {
                Some(_) => Err(ApiError::Unprocessable),
                None => Err(ApiError::NotFound),
            };
        }
    };

    let drink = state
        .drinks
        .update(id, &changes)
        .await?
        .ok_or(ApiError::NotFound)?;
    info!("Drink {} updated by {}", drink.id, auth.subject());

    Ok(ApiResponse::drinks(vec![drink]))
}

/// DELETE /drinks/:id - permanently remove a drink
pub async fn delete(
    State(state): State<AppState>,
    auth: Authorized<DeleteDrinks>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Deleted> {
    let Path(id) = id.map_err(|_| ApiError::NotFound)?;

    if !state.drinks.delete(id).await? {
        return Err(ApiError::NotFound);
    }
    info!("Drink {} deleted by {}", id, auth.subject());

    Ok(ApiResponse::deleted(id))
}
