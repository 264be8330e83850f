#![warn(missing_docs)]
// Note: this overwrites the link in the README to point to the rust docs of the offers-core crate.
//! [offers_core]: https://docs.rs/offers_core/latest/offers_core/index.html
//! [offers_sqlite]: https://docs.rs/offers_sqlite/latest/offers_sqlite/index.html
//! [offers_axum]: https://docs.rs/offers_axum/latest/offers_axum/index.html
#![doc = include_str!(concat!(env!("CARGO_MANIFEST_DIR"), "/README.md"))]

/// Core domain models for the offers service.
///
/// This module contains the offer entity and its value objects, the rules
/// for deriving an offer's status, and the pagination contract used when
/// listing offers.
///
/// Aside from validation and the status rules, the models are plain data,
/// following the principles of the hexagonal architecture to separate domain
/// entities from their persistence and presentation.
pub mod models;

/// Interface traits for the offers service.
///
/// This module contains the "ports" in the hexagonal architecture pattern.
///
/// These traits define the contract between the domain and external adapters
/// (such as databases or HTTP servers) without specifying implementation
/// details, so storage can be swapped without touching the HTTP layer.
pub mod ports;
