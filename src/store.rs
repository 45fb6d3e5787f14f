use crate::error::StoreError;
use crate::executor::QueryExecutor;
use crate::models::{GuestReservation, NewProperty, NewUser, Property, User};
use crate::results::{CustomDbRow, ResultSet};
use crate::search::{PropertySearch, build_property_search, to_minor_units};
use crate::statement::BuiltStatement;
use crate::types::RowValues;

const USER_BY_EMAIL: &str = "SELECT * FROM users WHERE email = $1";

const USER_BY_ID: &str = "SELECT * FROM users WHERE id = $1";

const INSERT_USER: &str = "INSERT INTO users (name, email, password) VALUES ($1, $2, $3) RETURNING *";

const INSERT_PROPERTY: &str = "INSERT INTO properties (
    owner_id, title, description, thumbnail_photo_url, cover_photo_url, cost_per_night,
    street, city, province, post_code, country,
    parking_spaces, number_of_bathrooms, number_of_bedrooms
) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14) RETURNING *";

const GUEST_RESERVATIONS: &str = "SELECT reservations.id AS reservation_id,
       reservations.start_date, reservations.end_date, reservations.guest_id,
       properties.*,
       CAST(avg(property_reviews.rating) AS DOUBLE PRECISION) AS average_rating
FROM reservations
JOIN properties ON reservations.property_id = properties.id
JOIN property_reviews ON properties.id = property_reviews.property_id
WHERE reservations.guest_id = $1
GROUP BY properties.id, reservations.id
ORDER BY reservations.start_date
LIMIT $2";

/// The LightBnB data-access surface over an injected [`QueryExecutor`].
///
/// The store holds no state of its own; every call builds a fresh statement and parameter list,
/// runs it once, and returns either the rows or the executor's error.
///
/// ```rust,no_run
/// use lightbnb_store::prelude::*;
///
/// # async fn demo() -> Result<(), StoreError> {
/// let pool = ConfigAndPool::new_postgres(lightbnb_pg_config())?;
/// let store = LightBnbStore::new(pool);
/// let cheap_in_vancouver = store
///     .search_properties(
///         &PropertySearch::new().city("Vancouver").maximum_price_per_night(150.0),
///         DEFAULT_SEARCH_LIMIT,
///     )
///     .await?;
/// # let _ = cheap_in_vancouver;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct LightBnbStore<E> {
    executor: E,
}

impl<E: QueryExecutor> LightBnbStore<E> {
    #[must_use]
    pub fn new(executor: E) -> Self {
        Self { executor }
    }

    #[must_use]
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Give the executor back, e.g. to close its pool at shutdown.
    #[must_use]
    pub fn into_inner(self) -> E {
        self.executor
    }

    async fn run(&self, statement: &BuiltStatement) -> Result<ResultSet, StoreError> {
        tracing::debug!(sql = %statement.sql, params = statement.params.len(), "executing");
        self.executor.run(statement).await
    }

    async fn first_row<T>(&self, statement: &BuiltStatement) -> Result<Option<T>, StoreError>
    where
        T: for<'r> TryFrom<&'r CustomDbRow, Error = StoreError>,
    {
        let rs = self.run(statement).await?;
        rs.results.first().map(T::try_from).transpose()
    }

    /// Property search returning the raw rows, each carrying `average_rating`.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidArgument`] for a zero limit or non-finite number, otherwise
    /// whatever the executor reports.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn search_properties_rows(
        &self,
        criteria: &PropertySearch,
        limit: u32,
    ) -> Result<ResultSet, StoreError> {
        let statement = build_property_search(criteria, limit)?;
        self.run(&statement).await
    }

    /// Every reviewed property matching all supplied criteria, cheapest first, at most `limit`.
    ///
    /// No match is `Ok` with an empty `Vec`.
    ///
    /// # Errors
    /// See [`LightBnbStore::search_properties_rows`]; also [`StoreError::RowMapping`] if a row
    /// does not have the `properties` shape.
    pub async fn search_properties(
        &self,
        criteria: &PropertySearch,
        limit: u32,
    ) -> Result<Vec<Property>, StoreError> {
        let rs = self.search_properties_rows(criteria, limit).await?;
        rs.iter().map(Property::try_from).collect()
    }

    /// # Errors
    /// Returns the executor's error; an unknown email is `Ok(None)`.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn user_with_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let statement =
            BuiltStatement::fixed(USER_BY_EMAIL, vec![RowValues::Text(email.to_string())]);
        self.first_row(&statement).await
    }

    /// # Errors
    /// Returns the executor's error; an unknown id is `Ok(None)`.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn user_with_id(&self, id: i64) -> Result<Option<User>, StoreError> {
        let statement = BuiltStatement::fixed(USER_BY_ID, vec![RowValues::Int(id)]);
        self.first_row(&statement).await
    }

    /// Insert a user and return the stored row.
    ///
    /// # Errors
    /// Returns the executor's error (e.g. a unique-email violation).
    #[tracing::instrument(skip(self, user), fields(email = %user.email), level = "debug")]
    pub async fn add_user(&self, user: &NewUser) -> Result<User, StoreError> {
        let statement = BuiltStatement::fixed(
            INSERT_USER,
            vec![
                RowValues::Text(user.name.clone()),
                RowValues::Text(user.email.clone()),
                RowValues::Text(user.password.clone()),
            ],
        );
        self.first_row(&statement).await?.ok_or_else(|| {
            StoreError::ExecutionError("INSERT INTO users returned no row".to_string())
        })
    }

    /// Insert a property and return the stored row. Its `average_rating` is `None`.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidArgument`] for a non-finite price, otherwise the executor's
    /// error (e.g. an unknown `owner_id`).
    #[tracing::instrument(skip(self, property), fields(owner_id = property.owner_id), level = "debug")]
    pub async fn add_property(&self, property: &NewProperty) -> Result<Property, StoreError> {
        if !property.cost_per_night.is_finite() {
            return Err(StoreError::InvalidArgument(
                "cost_per_night must be a finite number".to_string(),
            ));
        }
        let statement = BuiltStatement::fixed(
            INSERT_PROPERTY,
            vec![
                RowValues::Int(property.owner_id),
                RowValues::Text(property.title.clone()),
                RowValues::Text(property.description.clone()),
                RowValues::Text(property.thumbnail_photo_url.clone()),
                RowValues::Text(property.cover_photo_url.clone()),
                RowValues::Int(to_minor_units(property.cost_per_night)),
                RowValues::Text(property.street.clone()),
                RowValues::Text(property.city.clone()),
                RowValues::Text(property.province.clone()),
                RowValues::Text(property.post_code.clone()),
                RowValues::Text(property.country.clone()),
                RowValues::Int(property.parking_spaces),
                RowValues::Int(property.number_of_bathrooms),
                RowValues::Int(property.number_of_bedrooms),
            ],
        );
        self.first_row(&statement).await?.ok_or_else(|| {
            StoreError::ExecutionError("INSERT INTO properties returned no row".to_string())
        })
    }

    /// A guest's reservations with their properties, earliest start date first.
    ///
    /// Only reservations of reviewed properties are returned.
    ///
    /// # Errors
    /// Returns [`StoreError::InvalidArgument`] for a zero limit, otherwise the executor's error.
    #[tracing::instrument(skip(self), level = "debug")]
    pub async fn reservations_for_guest(
        &self,
        guest_id: i64,
        limit: u32,
    ) -> Result<Vec<GuestReservation>, StoreError> {
        if limit == 0 {
            return Err(StoreError::InvalidArgument(
                "reservation limit must be at least 1".to_string(),
            ));
        }
        let statement = BuiltStatement::fixed(
            GUEST_RESERVATIONS,
            vec![RowValues::Int(guest_id), RowValues::Int(i64::from(limit))],
        );
        let rs = self.run(&statement).await?;
        rs.iter().map(GuestReservation::try_from).collect()
    }
}
