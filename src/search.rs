use std::str::FromStr;

use serde::{Deserialize, Deserializer};

use crate::error::StoreError;
use crate::statement::{BuiltStatement, StatementBuilder};
use crate::types::RowValues;

/// Row cap used when the caller does not supply one.
pub const DEFAULT_SEARCH_LIMIT: u32 = 10;

const PROPERTY_SEARCH_BASE: &str = "SELECT properties.*, average_rating
FROM properties
JOIN (SELECT property_id, CAST(avg(property_reviews.rating) AS DOUBLE PRECISION) AS average_rating
      FROM property_reviews
      GROUP BY property_id
) AS prop_reviews ON prop_reviews.property_id = properties.id";

/// Optional filters for a property search. Every field left `None` places no constraint.
///
/// Prices are in whole currency units (dollars); they are compared against
/// `cost_per_night`, which is stored in cents. When deserialized from a submitted form, numeric
/// fields may arrive as strings and a blank one means the same as an absent one.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PropertySearch {
    /// Case-sensitive substring of the property's city.
    pub city: Option<String>,
    #[serde(deserialize_with = "blank_as_none")]
    pub owner_id: Option<i64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub minimum_price_per_night: Option<f64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub maximum_price_per_night: Option<f64>,
    #[serde(deserialize_with = "blank_as_none")]
    pub minimum_rating: Option<f64>,
}

fn blank_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + FromStr,
    T::Err: std::fmt::Display,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum FormField<T> {
        Value(T),
        Text(String),
    }

    match Option::<FormField<T>>::deserialize(deserializer)? {
        None => Ok(None),
        Some(FormField::Value(v)) => Ok(Some(v)),
        Some(FormField::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(FormField::Text(s)) => s.trim().parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl PropertySearch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn city(mut self, city: impl Into<String>) -> Self {
        self.city = Some(city.into());
        self
    }

    #[must_use]
    pub fn owner_id(mut self, owner_id: i64) -> Self {
        self.owner_id = Some(owner_id);
        self
    }

    #[must_use]
    pub fn minimum_price_per_night(mut self, price: f64) -> Self {
        self.minimum_price_per_night = Some(price);
        self
    }

    #[must_use]
    pub fn maximum_price_per_night(mut self, price: f64) -> Self {
        self.maximum_price_per_night = Some(price);
        self
    }

    #[must_use]
    pub fn minimum_rating(mut self, rating: f64) -> Self {
        self.minimum_rating = Some(rating);
        self
    }
}

/// Convert a price in whole currency units to the cents stored in `cost_per_night`.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn to_minor_units(price: f64) -> i64 {
    (price * 100.0).round() as i64
}

/// Build the property search statement for `criteria`, capped at `limit` rows.
///
/// Conditions are bound in a fixed order (city, owner, minimum price, maximum price, minimum
/// rating) regardless of how the criteria were populated, then the limit is bound last.
///
/// # Errors
/// Returns [`StoreError::InvalidArgument`] for a zero limit or a non-finite price or rating.
pub fn build_property_search(
    criteria: &PropertySearch,
    limit: u32,
) -> Result<BuiltStatement, StoreError> {
    if limit == 0 {
        return Err(StoreError::InvalidArgument(
            "search limit must be at least 1".to_string(),
        ));
    }
    let numeric = [
        ("minimum_price_per_night", criteria.minimum_price_per_night),
        ("maximum_price_per_night", criteria.maximum_price_per_night),
        ("minimum_rating", criteria.minimum_rating),
    ];
    for (name, value) in numeric {
        if value.is_some_and(|v| !v.is_finite()) {
            return Err(StoreError::InvalidArgument(format!(
                "{name} must be a finite number"
            )));
        }
    }

    let city = criteria
        .city
        .as_deref()
        .filter(|c| !c.is_empty())
        .map(|c| RowValues::Text(format!("%{c}%")));

    let builder = StatementBuilder::new(PROPERTY_SEARCH_BASE)
        .filter_opt("city", "LIKE", city)
        .filter_opt("owner_id", "=", criteria.owner_id.map(RowValues::Int))
        .filter_opt(
            "cost_per_night",
            ">=",
            criteria
                .minimum_price_per_night
                .map(|p| RowValues::Int(to_minor_units(p))),
        )
        .filter_opt(
            "cost_per_night",
            "<=",
            criteria
                .maximum_price_per_night
                .map(|p| RowValues::Int(to_minor_units(p))),
        )
        .filter_opt(
            "average_rating",
            ">=",
            criteria.minimum_rating.map(RowValues::Float),
        );

    tracing::trace!(conditions = builder.condition_count(), "property search filter built");

    Ok(builder
        .tail("GROUP BY properties.id, average_rating")
        .tail("ORDER BY cost_per_night")
        .tail_bind("LIMIT", RowValues::Int(i64::from(limit)))
        .finish())
}
