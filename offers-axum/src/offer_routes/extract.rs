//! Request inputs for the offer endpoints.

use crate::config::AxumConfig;
use aide::{OperationInput, generate::GenContext, openapi::Operation};
use axum::{
    Json,
    extract::{FromRequest, Request},
    http::StatusCode,
};
use offers_core::models::{OfferData, OfferId, PageRequest, Sort, ValidationError};
use schemars::JsonSchema;
use serde::Deserialize;

/// Path parameter for offer-specific endpoints.
#[derive(Deserialize, JsonSchema)]
#[schemars(inline)]
pub(crate) struct OfferPath {
    /// The identifier of the offer
    pub offer_id: OfferId,
}

/// Query parameters for listing offers.
#[derive(Deserialize, JsonSchema)]
pub(crate) struct ListQuery {
    /// The zero-based page index, 0 if omitted
    pub page: Option<u64>,
    /// The number of offers per page
    pub size: Option<u64>,
    /// An ordering such as `price,desc`
    pub sort: Option<String>,
}

impl ListQuery {
    pub fn page_request(&self, config: &AxumConfig) -> Result<PageRequest, ValidationError> {
        let request = PageRequest::new(self.page.unwrap_or(0), config.page_size(self.size));
        match self.sort.as_deref() {
            None | Some("") => Ok(request),
            Some(sort) => Ok(request.sorted(sort.parse::<Sort>()?)),
        }
    }
}

/// A validated offer body.
///
/// Every way of failing to produce one (no body, wrong content type,
/// malformed JSON, a field violating its constraint) is a `400 Bad Request`
/// carrying the reason as plain text.
pub(crate) struct OfferBody(pub OfferData);

impl<S: Send + Sync> FromRequest<S> for OfferBody {
    type Rejection = (StatusCode, String);

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<OfferData>::from_request(req, state).await {
            Ok(Json(data)) => Ok(Self(data)),
            Err(rejection) => Err((StatusCode::BAD_REQUEST, rejection.body_text())),
        }
    }
}

impl OperationInput for OfferBody {
    fn operation_input(ctx: &mut GenContext, operation: &mut Operation) {
        Json::<OfferData>::operation_input(ctx, operation);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use offers_core::models::{Direction, SortProperty};

    fn query(page: Option<u64>, size: Option<u64>, sort: Option<&str>) -> ListQuery {
        ListQuery {
            page,
            size,
            sort: sort.map(str::to_string),
        }
    }

    #[test]
    fn defaults_to_first_page_in_insertion_order() {
        let request = query(None, None, None)
            .page_request(&AxumConfig::default())
            .unwrap();
        assert_eq!(request.number, 0);
        assert_eq!(request.size.get(), 20);
        assert_eq!(request.sort, None);
    }

    #[test]
    fn parses_sort() {
        let request = query(Some(3), Some(500), Some("createdAt,desc"))
            .page_request(&AxumConfig::default())
            .unwrap();
        assert_eq!(request.number, 3);
        assert_eq!(request.size.get(), 100);
        assert_eq!(
            request.sort,
            Some(Sort {
                property: SortProperty::CreatedAt,
                direction: Direction::Desc,
            })
        );
    }

    #[test]
    fn rejects_unknown_sort() {
        assert_eq!(
            query(None, None, Some("colour"))
                .page_request(&AxumConfig::default())
                .unwrap_err(),
            ValidationError::UnknownSortProperty("colour".to_string())
        );
    }
}
