use offers_core::ports::Application;
use offers_sqlite::{Db, config::SqliteConfig};
use time::OffsetDateTime;

/// An application over a fresh in-memory database.
///
/// The clock is either the real one or pinned to a fixed instant, which lets
/// tests sit exactly on an expiry boundary.
#[derive(Clone)]
pub struct TestApp {
    db: Db,
    fixed_now: Option<OffsetDateTime>,
}

impl TestApp {
    pub async fn new() -> Self {
        Self {
            db: Db::open(&SqliteConfig::default()).await.unwrap(),
            fixed_now: None,
        }
    }

    #[allow(dead_code)]
    pub async fn at(now: OffsetDateTime) -> Self {
        Self {
            fixed_now: Some(now),
            ..Self::new().await
        }
    }
}

impl Application for TestApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn now(&self) -> OffsetDateTime {
        self.fixed_now.unwrap_or_else(OffsetDateTime::now_utc)
    }
}
