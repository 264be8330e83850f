use offers_core::{
    models::{Currency, Decimal, OfferData, Period, Price},
    ports::Application,
};
use offers_sqlite::{Db, config::SqliteConfig};
use std::path::PathBuf;
use time::OffsetDateTime;

pub struct TestApp {
    pub db: Db,
    pub now: OffsetDateTime,
}

impl TestApp {
    pub async fn new(now: OffsetDateTime) -> anyhow::Result<Self> {
        let db = Db::open(&SqliteConfig::default()).await?;
        Ok(Self { db, now })
    }

    /// A store backed by a file, so readers and the writer use separate connections
    pub async fn on_disk(path: PathBuf, now: OffsetDateTime) -> anyhow::Result<Self> {
        let db = Db::open(&SqliteConfig {
            database_path: Some(path),
            ..Default::default()
        })
        .await?;
        Ok(Self { db, now })
    }
}

impl Application for TestApp {
    type Repository = Db;

    fn database(&self) -> &Self::Repository {
        &self.db
    }

    fn now(&self) -> OffsetDateTime {
        self.now
    }
}

pub fn offer(description: &str, value: i64, duration: Period) -> OfferData {
    OfferData::new(
        description,
        Price::new(Currency::GBP, Decimal::new(value, 0)),
        duration,
        false,
    )
    .expect("valid offer")
}
