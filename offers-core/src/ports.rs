mod application;
mod offer;

pub use application::Application;
pub use offer::{OfferRepository, Replaced};

/// The base trait shared by all repositories, fixing the error type.
pub trait Repository {
    /// The error type for failures of the underlying storage.
    ///
    /// "Not found" is not an error; operations report it in their return value.
    type Error: std::error::Error + Send + Sync + 'static;
}
