//! Typed records for the three LightBnB tables and the conversions from raw rows.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::StoreError;
use crate::results::CustomDbRow;
use crate::types::RowValues;

fn mismatch(column: &str, expected: &str, found: &RowValues) -> StoreError {
    StoreError::RowMapping(format!("column `{column}`: expected {expected}, found {found:?}"))
}

fn int(row: &CustomDbRow, column: &str) -> Result<i64, StoreError> {
    let value = row.require(column)?;
    value
        .as_int()
        .copied()
        .ok_or_else(|| mismatch(column, "integer", value))
}

fn text(row: &CustomDbRow, column: &str) -> Result<String, StoreError> {
    let value = row.require(column)?;
    value
        .as_text()
        .map(str::to_string)
        .ok_or_else(|| mismatch(column, "text", value))
}

fn opt_text(row: &CustomDbRow, column: &str) -> Result<Option<String>, StoreError> {
    match row.require(column)? {
        RowValues::Null => Ok(None),
        RowValues::Text(s) => Ok(Some(s.clone())),
        other => Err(mismatch(column, "text", other)),
    }
}

fn boolean(row: &CustomDbRow, column: &str) -> Result<bool, StoreError> {
    let value = row.require(column)?;
    value
        .as_bool()
        .ok_or_else(|| mismatch(column, "boolean", value))
}

fn date(row: &CustomDbRow, column: &str) -> Result<NaiveDate, StoreError> {
    let value = row.require(column)?;
    value
        .as_date()
        .ok_or_else(|| mismatch(column, "date", value))
}

// Absent and NULL both mean "no rating": a freshly inserted listing has no review aggregate.
fn opt_float(row: &CustomDbRow, column: &str) -> Result<Option<f64>, StoreError> {
    match row.get(column) {
        None | Some(RowValues::Null) => Ok(None),
        Some(value) => value
            .as_float()
            .map(Some)
            .ok_or_else(|| mismatch(column, "number", value)),
    }
}

/// A registered user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: i64,
    pub name: String,
    pub email: String,
    /// Stored password hash. Never serialized back out.
    #[serde(skip_serializing)]
    pub password: String,
}

impl TryFrom<&CustomDbRow> for User {
    type Error = StoreError;

    fn try_from(row: &CustomDbRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: int(row, "id")?,
            name: text(row, "name")?,
            email: text(row, "email")?,
            password: text(row, "password")?,
        })
    }
}

/// Fields supplied when registering a user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// A property listing, with the average of its review ratings when it has been reviewed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Property {
    pub id: i64,
    pub owner_id: i64,
    pub title: String,
    pub description: Option<String>,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Nightly price in cents.
    pub cost_per_night: i64,
    pub parking_spaces: i64,
    pub number_of_bathrooms: i64,
    pub number_of_bedrooms: i64,
    pub country: String,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub active: bool,
    pub average_rating: Option<f64>,
}

impl Property {
    /// Nightly price in whole currency units.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn price_per_night(&self) -> f64 {
        self.cost_per_night as f64 / 100.0
    }

    fn from_row_with_id(row: &CustomDbRow, id_column: &str) -> Result<Self, StoreError> {
        Ok(Self {
            id: int(row, id_column)?,
            owner_id: int(row, "owner_id")?,
            title: text(row, "title")?,
            description: opt_text(row, "description")?,
            thumbnail_photo_url: text(row, "thumbnail_photo_url")?,
            cover_photo_url: text(row, "cover_photo_url")?,
            cost_per_night: int(row, "cost_per_night")?,
            parking_spaces: int(row, "parking_spaces")?,
            number_of_bathrooms: int(row, "number_of_bathrooms")?,
            number_of_bedrooms: int(row, "number_of_bedrooms")?,
            country: text(row, "country")?,
            street: text(row, "street")?,
            city: text(row, "city")?,
            province: text(row, "province")?,
            post_code: text(row, "post_code")?,
            active: boolean(row, "active")?,
            average_rating: opt_float(row, "average_rating")?,
        })
    }
}

impl TryFrom<&CustomDbRow> for Property {
    type Error = StoreError;

    fn try_from(row: &CustomDbRow) -> Result<Self, Self::Error> {
        Self::from_row_with_id(row, "id")
    }
}

/// Fields supplied when listing a new property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProperty {
    pub owner_id: i64,
    pub title: String,
    pub description: String,
    pub thumbnail_photo_url: String,
    pub cover_photo_url: String,
    /// Nightly price in whole currency units; stored in cents.
    pub cost_per_night: f64,
    pub street: String,
    pub city: String,
    pub province: String,
    pub post_code: String,
    pub country: String,
    pub parking_spaces: i64,
    pub number_of_bathrooms: i64,
    pub number_of_bedrooms: i64,
}

/// A booking of one property by one guest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reservation {
    pub id: i64,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub property_id: i64,
    pub guest_id: i64,
}

/// One of a guest's reservations, with the reserved property and its rating.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GuestReservation {
    pub reservation: Reservation,
    pub property: Property,
}

impl TryFrom<&CustomDbRow> for GuestReservation {
    type Error = StoreError;

    /// Expects the reservation id aliased as `reservation_id`; `id` is the property's.
    fn try_from(row: &CustomDbRow) -> Result<Self, Self::Error> {
        let property = Property::from_row_with_id(row, "id")?;
        let reservation = Reservation {
            id: int(row, "reservation_id")?,
            start_date: date(row, "start_date")?,
            end_date: date(row, "end_date")?,
            property_id: property.id,
            guest_id: int(row, "guest_id")?,
        };
        Ok(Self {
            reservation,
            property,
        })
    }
}
