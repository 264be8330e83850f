//! The production application: a SQLite store and the system clock.

use offers_core::ports::Application;
use offers_sqlite::Db;
use time::OffsetDateTime;

/// Offers served from SQLite, with "now" taken from the system clock in UTC.
#[derive(Clone)]
pub struct OffersApp {
    /// The offer store
    pub db: Db,
}

impl Application for OffersApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
