use axum::http::Uri;
use chrono::{NaiveDateTime, Utc};
use log::info;

use crate::errors::AppError;
use crate::flash::IncomingFlashes;
use crate::responses::{Empty, Page};

pub mod artists;
pub mod shows;
pub mod venues;

/// Reference instant for the past/upcoming split, taken once per request.
pub(crate) fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Ids that are not integers cannot name a record.
pub(crate) fn parse_id(raw: &str) -> Result<i32, AppError> {
    raw.trim().parse().map_err(|_| AppError::NotFound)
}

/// "Venue The Musical Hop", or just "Venue" when no name was submitted.
pub(crate) fn titled(kind: &str, name: &str) -> String {
    let name = name.trim();
    if name.is_empty() {
        kind.to_string()
    } else {
        format!("{kind} {name}")
    }
}

pub async fn index(flashes: IncomingFlashes) -> Page<Empty> {
    Page::home().with_flashes(flashes)
}

pub async fn not_found(uri: Uri) -> Page<Empty> {
    info!("Nothing to serve at {}", uri);
    Page::not_found()
}
