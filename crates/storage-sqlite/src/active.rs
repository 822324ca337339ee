//! Soft-delete filters.
//!
//! A row with a non-null `deleted_at` is logically absent. Every query that
//! reads current rows filters through one of these instead of repeating the
//! null check.

use diesel::helper_types::IsNull;
use diesel::prelude::*;

use crate::schema::{news_feeds, school_members, school_news, schools, users};

pub fn user() -> IsNull<users::deleted_at> {
    users::deleted_at.is_null()
}

pub fn school() -> IsNull<schools::deleted_at> {
    schools::deleted_at.is_null()
}

pub fn school_member() -> IsNull<school_members::deleted_at> {
    school_members::deleted_at.is_null()
}

pub fn school_news() -> IsNull<school_news::deleted_at> {
    school_news::deleted_at.is_null()
}

pub fn news_feed() -> IsNull<news_feeds::deleted_at> {
    news_feeds::deleted_at.is_null()
}
