//! REST API endpoints for offer operations.
//!
//! Offers can be created, replaced, deleted, fetched individually and listed
//! a page at a time. Every endpoint performs exactly one store operation, and
//! the derived `_expired`/`_active` flags are evaluated against the
//! application's clock when the response is rendered.

use crate::{ApiApplication, config::AxumConfig};
use aide::axum::{ApiRouter, routing::get};
use axum::{
    Extension, Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use offers_core::ports::{OfferRepository as _, Replaced};
use std::sync::Arc;
use tracing::{Level, event};

mod extract;
mod representation;
mod response;

use extract::{ListQuery, OfferBody, OfferPath};
use representation::{OfferResource, OffersPage, offer_href};
use response::Located;

/// Creates a router with offer-related endpoints.
pub fn router<T: ApiApplication>() -> ApiRouter<T> {
    ApiRouter::new()
        .api_route_with(
            "/",
            get(list_offers::<T>).post(create_offer::<T>),
            |route| route.tag("offers"),
        )
        .api_route_with(
            "/{offer_id}",
            get(get_offer::<T>)
                .put(replace_offer::<T>)
                .delete(delete_offer::<T>),
            |route| route.tag("offers"),
        )
}

/// Create a new offer.
///
/// The store assigns the id and stamps the creation time.
///
/// # Returns
///
/// - `201 Created`: Empty body, `Location` points at the new offer
/// - `400 Bad Request`: The body is missing, malformed or invalid
/// - `500 Internal Server Error`: Database operation failed
async fn create_offer<T: ApiApplication>(
    State(app): State<T>,
    Extension(config): Extension<Arc<AxumConfig>>,
    OfferBody(data): OfferBody,
) -> Result<Located, (StatusCode, String)> {
    let as_of = app.now();
    let db = app.database();

    let offer_id = db.create_offer(data, as_of).await.map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to create offer".to_string(),
        )
    })?;

    Ok(Located::created(offer_href(&config, offer_id)))
}

/// Retrieve an offer.
///
/// The response includes whether the offer has expired and whether it is
/// still active, as of the time of the request.
///
/// # Returns
///
/// - `200 OK`: The offer
/// - `400 Bad Request`: The id is not a positive integer
/// - `404 Not Found`: No offer has this id
/// - `500 Internal Server Error`: Database query failed
async fn get_offer<T: ApiApplication>(
    State(app): State<T>,
    Extension(config): Extension<Arc<AxumConfig>>,
    Path(OfferPath { offer_id }): Path<OfferPath>,
) -> Result<Json<OfferResource>, (StatusCode, String)> {
    let db = app.database();

    let record = db
        .get_offer(offer_id)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to get offer {}", offer_id),
            )
        })?
        .ok_or((StatusCode::NOT_FOUND, String::new()))?;

    Ok(Json(OfferResource::new(record, app.now(), &config)))
}

/// Replace an offer, creating it under this id if it does not exist.
///
/// An existing offer keeps its creation time.
///
/// # Returns
///
/// - `201 Created`: No offer had this id; one was created
/// - `204 No Content`: The existing offer was replaced
/// - `400 Bad Request`: The id or body is invalid, or no offer has this id
///   and it is above [`OfferId::MAX_CHOSEN`](offers_core::models::OfferId::MAX_CHOSEN)
/// - `500 Internal Server Error`: Database operation failed
async fn replace_offer<T: ApiApplication>(
    State(app): State<T>,
    Extension(config): Extension<Arc<AxumConfig>>,
    Path(OfferPath { offer_id }): Path<OfferPath>,
    OfferBody(data): OfferBody,
) -> Result<Located, (StatusCode, String)> {
    let as_of = app.now();
    let db = app.database();

    // Only the store may create offers above the chosen range
    if let Err(err) = offer_id.chosen() {
        let exists = db
            .get_offer(offer_id)
            .await
            .map_err(|err| {
                event!(Level::ERROR, err = err.to_string());
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    format!("failed to replace offer {}", offer_id),
                )
            })?
            .is_some();
        if !exists {
            return Err((StatusCode::BAD_REQUEST, err.to_string()));
        }
    }

    let replaced = db
        .replace_offer(offer_id, data, as_of)
        .await
        .map_err(|err| {
            event!(Level::ERROR, err = err.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("failed to replace offer {}", offer_id),
            )
        })?;

    let location = offer_href(&config, offer_id);
    Ok(match replaced {
        Replaced::Created => Located::created(location),
        Replaced::Updated => Located::updated(location),
    })
}

/// Delete an offer.
///
/// # Returns
///
/// - `204 No Content`: The offer was deleted
/// - `400 Bad Request`: The id is not a positive integer
/// - `404 Not Found`: No offer has this id
/// - `500 Internal Server Error`: Database operation failed
async fn delete_offer<T: ApiApplication>(
    State(app): State<T>,
    Path(OfferPath { offer_id }): Path<OfferPath>,
) -> Result<StatusCode, (StatusCode, String)> {
    let db = app.database();

    let deleted = db.delete_offer(offer_id).await.map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            format!("failed to delete offer {}", offer_id),
        )
    })?;

    if deleted {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err((StatusCode::NOT_FOUND, String::new()))
    }
}

/// List offers a page at a time.
///
/// Pages are zero-indexed. Without a `sort`, offers come in the order they
/// were created. A page past the end is empty rather than an error.
///
/// # Returns
///
/// - `200 OK`: The page, its metadata and navigation links
/// - `400 Bad Request`: `page` or `size` is not a number, or `sort` is invalid
/// - `500 Internal Server Error`: Database query failed
async fn list_offers<T: ApiApplication>(
    State(app): State<T>,
    Extension(config): Extension<Arc<AxumConfig>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<OffersPage>, (StatusCode, String)> {
    let request = query
        .page_request(&config)
        .map_err(|err| (StatusCode::BAD_REQUEST, err.to_string()))?;
    let db = app.database();

    let page = db.list_offers(request).await.map_err(|err| {
        event!(Level::ERROR, err = err.to_string());
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "failed to list offers".to_string(),
        )
    })?;

    Ok(Json(OffersPage::new(page, &request, app.now(), &config)))
}
