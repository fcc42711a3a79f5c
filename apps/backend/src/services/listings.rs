//! Pieces shared by lost-pet and sighting listings: request parsing, list
//! paging, and the joined location view.

use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::entities::locations;
use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::repos::ListingFilter;

pub const DEFAULT_LIMIT: u64 = 50;
pub const MAX_LIMIT: u64 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct Coords {
    pub lat: f64,
    pub lng: f64,
}

/// Raw list query string. Unparseable values fall back to their defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub is_found: Option<String>,
    pub animal_type: Option<String>,
    pub mine: Option<String>,
    pub limit: Option<String>,
    pub offset: Option<String>,
}

impl ListQuery {
    pub fn wants_mine(&self) -> bool {
        self.mine.as_deref() == Some("true")
    }

    /// Clamp paging and drop filters that do not parse. `owner` is only
    /// consulted when `mine=true`.
    pub fn into_filter(self, owner: Option<uuid::Uuid>) -> ListingFilter {
        let limit = self
            .limit
            .as_deref()
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .filter(|n| (1..=MAX_LIMIT).contains(n))
            .unwrap_or(DEFAULT_LIMIT);
        // Offsets are bound as signed 64-bit values.
        let offset = self
            .offset
            .as_deref()
            .and_then(|raw| raw.trim().parse::<i64>().ok())
            .and_then(|n| u64::try_from(n).ok())
            .unwrap_or(0);
        let mine = self.wants_mine();

        ListingFilter {
            is_found: self.is_found.as_deref().and_then(parse_bool),
            animal_type: non_blank(self.animal_type),
            owner: if mine { owner } else { None },
            limit,
            offset,
        }
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" | "TRUE" | "True" | "1" | "t" | "T" => Some(true),
        "false" | "FALSE" | "False" | "0" | "f" | "F" => Some(false),
        _ => None,
    }
}

#[derive(Debug, Serialize)]
pub struct ListPage<T> {
    pub data: Vec<T>,
    pub count: usize,
    pub limit: u64,
    pub offset: u64,
}

impl<T> ListPage<T> {
    pub fn new(data: Vec<T>, filter: &ListingFilter) -> Self {
        Self {
            count: data.len(),
            data,
            limit: filter.limit,
            offset: filter.offset,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LocationView {
    pub id: i32,
    pub street_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub postal_code: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub city_id: Option<i32>,
}

impl From<locations::Model> for LocationView {
    fn from(model: locations::Model) -> Self {
        Self {
            id: model.id,
            street_address: model.street_address,
            postal_code: model.postal_code,
            latitude: model.latitude,
            longitude: model.longitude,
            city_id: model.city_id,
        }
    }
}

/// Accept RFC 3339 timestamps or bare `YYYY-MM-DD` dates (midnight UTC).
pub fn parse_date(raw: &str, field: &str) -> Result<OffsetDateTime, AppError> {
    let raw = raw.trim();
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Ok(ts);
    }
    Date::parse(raw, format_description!("[year]-[month]-[day]"))
        .map(|date| date.midnight().assume_utc())
        .map_err(|_| {
            AppError::invalid(
                ErrorCode::InvalidDate,
                format!("invalid date format for {field}: expected RFC 3339 or YYYY-MM-DD"),
            )
        })
}

/// `Some` only for strings with non-whitespace content.
pub fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// `Some` only for non-empty lists.
pub fn non_empty(list: Option<Vec<String>>) -> Option<Vec<String>> {
    list.filter(|l| !l.is_empty())
}

pub fn parse_listing_id(raw: &str) -> Result<i32, AppError> {
    raw.trim()
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
        .ok_or_else(|| {
            AppError::bad_request(
                ErrorCode::InvalidListingId,
                format!("listing id must be a positive integer, got '{raw}'"),
            )
        })
}
