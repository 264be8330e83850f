//! The hypermedia shapes offers are rendered in.
//!
//! Derived state (`_expired`, `_active`) and links are computed here, at
//! serialization time, from the stored record and the application's clock.

use crate::config::AxumConfig;
use offers_core::models::{OfferData, OfferId, OfferRecord, Page, PageMetadata, PageRequest};
use schemars::JsonSchema;
use serde::Serialize;
use time::OffsetDateTime;

/// A reference to another resource.
#[derive(Debug, Serialize, JsonSchema)]
pub(crate) struct Link {
    /// The target URL
    pub href: String,
}

/// The location of a single offer.
pub(crate) fn offer_href(config: &AxumConfig, offer_id: OfferId) -> String {
    format!("{}/offers/{}", config.base_url(), offer_id)
}

fn page_href(config: &AxumConfig, request: &PageRequest, number: u64) -> String {
    let mut href = format!(
        "{}/offers?page={}&size={}",
        config.base_url(),
        number,
        request.size
    );
    if let Some(sort) = request.sort {
        href.push_str("&sort=");
        href.push_str(&sort.to_string());
    }
    href
}

/// Links carried by a single offer.
#[derive(Debug, Serialize, JsonSchema)]
pub(crate) struct OfferLinks {
    #[serde(rename = "self")]
    self_: Link,
}

/// An offer together with its state at the time of the request.
#[derive(Debug, Serialize, JsonSchema)]
pub(crate) struct OfferResource {
    #[serde(flatten)]
    data: OfferData,

    /// The offer's duration ran out before the time of the request
    #[serde(rename = "_expired")]
    expired: bool,

    /// The offer is neither cancelled nor expired
    #[serde(rename = "_active")]
    active: bool,

    #[serde(rename = "_links")]
    links: OfferLinks,
}

impl OfferResource {
    pub fn new(record: OfferRecord, now: OffsetDateTime, config: &AxumConfig) -> Self {
        let status = record.status(now);
        Self {
            links: OfferLinks {
                self_: Link {
                    href: offer_href(config, record.id),
                },
            },
            data: record.data,
            expired: status.expired,
            active: status.active,
        }
    }
}

#[derive(Debug, Serialize, JsonSchema)]
pub(crate) struct EmbeddedOffers {
    offers: Vec<OfferResource>,
}

/// Navigation between the pages of a listing.
#[derive(Debug, Serialize, JsonSchema)]
pub(crate) struct PageLinks {
    #[serde(rename = "self")]
    self_: Link,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    prev: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first: Option<Link>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last: Option<Link>,
}

/// One page of offers.
#[derive(Debug, Serialize, JsonSchema)]
pub(crate) struct OffersPage {
    #[serde(rename = "_embedded")]
    embedded: EmbeddedOffers,
    #[serde(rename = "_links")]
    links: PageLinks,
    page: PageMetadata,
}

impl OffersPage {
    pub fn new(
        page: Page<OfferRecord>,
        request: &PageRequest,
        now: OffsetDateTime,
        config: &AxumConfig,
    ) -> Self {
        let metadata = PageMetadata::new(request, page.total);
        let link = |number: u64| Link {
            href: page_href(config, request, number),
        };

        Self {
            embedded: EmbeddedOffers {
                offers: page
                    .items
                    .into_iter()
                    .map(|record| OfferResource::new(record, now, config))
                    .collect(),
            },
            links: PageLinks {
                self_: link(metadata.number),
                next: metadata.next().map(link),
                prev: metadata.prev().map(link),
                first: metadata.first().map(link),
                last: metadata.last().map(link),
            },
            page: metadata,
        }
    }
}
