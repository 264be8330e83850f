//! Repository trait implementations for the SQLite database.
//!
//! This module contains the implementations of the repository traits defined in
//! `offers-core` for the SQLite database backend.

use crate::Db;
use offers_core::ports::Repository;

mod offer;

impl Repository for Db {
    type Error = sqlx::Error;
}
