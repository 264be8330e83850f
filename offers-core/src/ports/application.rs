use super::OfferRepository;
use time::OffsetDateTime;

/// Ties together the pieces an offers service needs at runtime.
///
/// Handlers are written against this trait, so an application chooses its
/// storage backend and its notion of "now" in one place. Tests typically
/// implement it with a fixed or controllable clock.
pub trait Application {
    /// The storage backend
    type Repository: OfferRepository;

    /// Access the repository
    fn database(&self) -> &Self::Repository;

    /// The current instant. Creation timestamps are taken from here, and
    /// derived offer state is evaluated against it.
    fn now(&self) -> OffsetDateTime;
}
