use super::Repository;
use crate::models::{OfferData, OfferId, OfferRecord, Page, PageRequest};
use std::future::Future;
use time::OffsetDateTime;

/// The outcome of [`OfferRepository::replace_offer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Replaced {
    /// No offer had the id; a new one was stored under it
    Created,
    /// An existing offer was overwritten
    Updated,
}

/// Repository interface for offer storage and retrieval.
///
/// Implementations own identifier assignment: ids are handed out in strictly
/// increasing order and are never reused, including ids of deleted offers and
/// ids chosen by callers of `replace_offer`. Concurrent callers must never
/// observe a partially written offer.
pub trait OfferRepository: Repository {
    /// Store a new offer, stamping it with `as_of` as its creation time.
    ///
    /// # Returns
    ///
    /// The newly assigned id, greater than every id assigned before.
    fn create_offer(
        &self,
        data: OfferData,
        as_of: OffsetDateTime,
    ) -> impl Future<Output = Result<OfferId, Self::Error>> + Send;

    /// Overwrite the offer with the given id, or create it under that id.
    ///
    /// An existing offer keeps its id and creation time; every other field is
    /// replaced. A missing offer is created with `as_of` as its creation time,
    /// which fails if `offer_id` is above [`OfferId::MAX_CHOSEN`].
    fn replace_offer(
        &self,
        offer_id: OfferId,
        data: OfferData,
        as_of: OffsetDateTime,
    ) -> impl Future<Output = Result<Replaced, Self::Error>> + Send;

    /// Remove an offer.
    ///
    /// # Returns
    ///
    /// - Ok(true) if the offer existed and was removed
    /// - Ok(false) if no such offer exists
    /// - Err otherwise
    fn delete_offer(
        &self,
        offer_id: OfferId,
    ) -> impl Future<Output = Result<bool, Self::Error>> + Send;

    /// Retrieve an offer, returning Option::None if it does not exist.
    fn get_offer(
        &self,
        offer_id: OfferId,
    ) -> impl Future<Output = Result<Option<OfferRecord>, Self::Error>> + Send;

    /// Retrieve one page of offers along with the total number of offers.
    ///
    /// Pages past the end are empty rather than an error.
    fn list_offers(
        &self,
        request: PageRequest,
    ) -> impl Future<Output = Result<Page<OfferRecord>, Self::Error>> + Send;
}
