#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use lightbnb_store::prelude::*;

pub const SQLITE_SCHEMA: &str = "
CREATE TABLE users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    email TEXT NOT NULL UNIQUE,
    password TEXT NOT NULL
);
CREATE TABLE properties (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title TEXT NOT NULL,
    description TEXT,
    thumbnail_photo_url TEXT NOT NULL,
    cover_photo_url TEXT NOT NULL,
    cost_per_night INTEGER NOT NULL DEFAULT 0,
    parking_spaces INTEGER NOT NULL DEFAULT 0,
    number_of_bathrooms INTEGER NOT NULL DEFAULT 0,
    number_of_bedrooms INTEGER NOT NULL DEFAULT 0,
    country TEXT NOT NULL,
    street TEXT NOT NULL,
    city TEXT NOT NULL,
    province TEXT NOT NULL,
    post_code TEXT NOT NULL,
    active BOOLEAN NOT NULL DEFAULT TRUE
);
CREATE TABLE reservations (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    property_id INTEGER NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
    guest_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
);
CREATE TABLE property_reviews (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    guest_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    property_id INTEGER NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
    reservation_id INTEGER NOT NULL REFERENCES reservations(id) ON DELETE CASCADE,
    rating SMALLINT NOT NULL DEFAULT 0,
    message TEXT
);
";

pub const POSTGRES_SCHEMA: &str = "
CREATE TABLE users (
    id SERIAL PRIMARY KEY,
    name VARCHAR(255) NOT NULL,
    email VARCHAR(255) NOT NULL UNIQUE,
    password VARCHAR(255) NOT NULL
);
CREATE TABLE properties (
    id SERIAL PRIMARY KEY,
    owner_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    title VARCHAR(255) NOT NULL,
    description TEXT,
    thumbnail_photo_url VARCHAR(255) NOT NULL,
    cover_photo_url VARCHAR(255) NOT NULL,
    cost_per_night INTEGER NOT NULL DEFAULT 0,
    parking_spaces INTEGER NOT NULL DEFAULT 0,
    number_of_bathrooms INTEGER NOT NULL DEFAULT 0,
    number_of_bedrooms INTEGER NOT NULL DEFAULT 0,
    country VARCHAR(255) NOT NULL,
    street VARCHAR(255) NOT NULL,
    city VARCHAR(255) NOT NULL,
    province VARCHAR(255) NOT NULL,
    post_code VARCHAR(255) NOT NULL,
    active BOOLEAN NOT NULL DEFAULT TRUE
);
CREATE TABLE reservations (
    id SERIAL PRIMARY KEY,
    start_date DATE NOT NULL,
    end_date DATE NOT NULL,
    property_id INTEGER NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
    guest_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE
);
CREATE TABLE property_reviews (
    id SERIAL PRIMARY KEY,
    guest_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE,
    property_id INTEGER NOT NULL REFERENCES properties(id) ON DELETE CASCADE,
    reservation_id INTEGER NOT NULL REFERENCES reservations(id) ON DELETE CASCADE,
    rating SMALLINT NOT NULL DEFAULT 0,
    message TEXT
);
";

/// Portable seed data; ids are assigned in insertion order on both backends.
///
/// | id | title           | city            | owner | cents | avg rating |
/// |----|-----------------|-----------------|-------|-------|------------|
/// | 1  | Harbour loft    | Vancouver       | 1     | 12000 | 4.5        |
/// | 2  | Garden suite    | North Vancouver | 2     | 8000  | 3.0        |
/// | 3  | Brownstone flat | Boston          | 2     | 20000 | 4.5        |
/// | 4  | Back Bay studio | Boston          | 3     | 9500  | 3.0        |
/// | 5  | Lake cabin      | Boston          | 1     | 5000  | (none)     |
/// | 6  | Quiet condo     | Port Moody      | 3     | 7000  | 5.0        |
pub const SEED: &str = "
INSERT INTO users (name, email, password) VALUES
    ('Devin Sanders', 'tristanjacobs@gmail.com', '$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u.'),
    ('Iva Harrison', 'allisonjackson@mail.com', '$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u.'),
    ('Lloyd Jefferson', 'asherpoole@gmx.com', '$2a$10$FB/BOAVhpuLvpOREQVmvmezD4ED/.JBIDRh70tGevYzYzQgFId2u.');

INSERT INTO properties (owner_id, title, description, thumbnail_photo_url, cover_photo_url,
    cost_per_night, parking_spaces, number_of_bathrooms, number_of_bedrooms,
    country, street, city, province, post_code) VALUES
    (1, 'Harbour loft', 'Views of the harbour', 'https://img.example/1t.jpg', 'https://img.example/1c.jpg',
        12000, 1, 1, 2, 'Canada', '100 Water St', 'Vancouver', 'British Columbia', 'V6B 1A1'),
    (2, 'Garden suite', NULL, 'https://img.example/2t.jpg', 'https://img.example/2c.jpg',
        8000, 0, 1, 1, 'Canada', '22 Lonsdale Ave', 'North Vancouver', 'British Columbia', 'V7M 2E4'),
    (2, 'Brownstone flat', 'Classic brownstone', 'https://img.example/3t.jpg', 'https://img.example/3c.jpg',
        20000, 2, 2, 3, 'United States', '9 Beacon St', 'Boston', 'Massachusetts', '02108'),
    (3, 'Back Bay studio', 'Compact studio', 'https://img.example/4t.jpg', 'https://img.example/4c.jpg',
        9500, 0, 1, 1, 'United States', '300 Boylston St', 'Boston', 'Massachusetts', '02116'),
    (1, 'Lake cabin', 'No reviews yet', 'https://img.example/5t.jpg', 'https://img.example/5c.jpg',
        5000, 3, 1, 2, 'United States', '1 Jamaica Way', 'Boston', 'Massachusetts', '02130'),
    (3, 'Quiet condo', 'Near the inlet', 'https://img.example/6t.jpg', 'https://img.example/6c.jpg',
        7000, 1, 1, 1, 'Canada', '5 Inlet Dr', 'Port Moody', 'British Columbia', 'V3H 1X1');

INSERT INTO reservations (start_date, end_date, property_id, guest_id) VALUES
    ('2023-06-01', '2023-06-05', 1, 2),
    ('2023-03-10', '2023-03-12', 3, 2),
    ('2023-01-01', '2023-01-04', 2, 3),
    ('2023-07-01', '2023-07-08', 5, 2),
    ('2023-02-14', '2023-02-16', 4, 3),
    ('2023-05-20', '2023-05-22', 6, 1);

INSERT INTO property_reviews (guest_id, property_id, reservation_id, rating, message) VALUES
    (2, 1, 1, 5, 'Lovely'),
    (3, 1, 1, 4, 'Good'),
    (3, 2, 3, 3, 'Fine'),
    (2, 3, 2, 4, 'Great location'),
    (2, 3, 2, 5, 'Perfect'),
    (3, 4, 5, 2, 'Noisy'),
    (3, 4, 5, 4, 'Convenient'),
    (1, 6, 6, 5, 'Peaceful');
";

#[cfg(feature = "sqlite")]
/// File-backed SQLite database in its own temp directory, removed on drop.
pub struct SqliteFixture {
    pub cap: ConfigAndPool,
    _dir: tempfile::TempDir,
}

#[cfg(feature = "sqlite")]
pub async fn sqlite_fixture(seed: bool) -> Result<SqliteFixture, Box<dyn std::error::Error>> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("lightbnb.db");
    let options = SqliteOptions::new(path.to_string_lossy().into_owned()).with_max_size(4);
    let cap = ConfigAndPool::new_sqlite_with_options(options).await?;
    if seed {
        cap.execute_batch(SQLITE_SCHEMA).await?;
        cap.execute_batch(SEED).await?;
    }
    Ok(SqliteFixture { cap, _dir: dir })
}

/// Executor double that records every statement and answers from a script.
pub struct RecordingExecutor {
    pub calls: Mutex<Vec<(String, Vec<RowValues>)>>,
    respond: Box<dyn Fn() -> Result<ResultSet, StoreError> + Send + Sync>,
}

impl RecordingExecutor {
    pub fn empty() -> Arc<Self> {
        Self::with(|| Ok(ResultSet::default()))
    }

    pub fn failing(message: &'static str) -> Arc<Self> {
        Self::with(move || Err(StoreError::ConnectionError(message.to_string())))
    }

    pub fn with(
        respond: impl Fn() -> Result<ResultSet, StoreError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            respond: Box::new(respond),
        })
    }

    pub fn last(&self) -> (String, Vec<RowValues>) {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("no statement was executed")
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

#[async_trait]
impl QueryExecutor for RecordingExecutor {
    async fn execute_select(
        &self,
        query: &str,
        params: &[RowValues],
    ) -> Result<ResultSet, StoreError> {
        self.calls
            .lock()
            .unwrap()
            .push((query.to_string(), params.to_vec()));
        (self.respond)()
    }
}

pub fn new_property(owner_id: i64) -> NewProperty {
    NewProperty {
        owner_id,
        title: "Treehouse".to_string(),
        description: "Up in the cedars".to_string(),
        thumbnail_photo_url: "https://img.example/tt.jpg".to_string(),
        cover_photo_url: "https://img.example/tc.jpg".to_string(),
        cost_per_night: 85.5,
        street: "7 Forest Rd".to_string(),
        city: "Squamish".to_string(),
        province: "British Columbia".to_string(),
        post_code: "V8B 0A1".to_string(),
        country: "Canada".to_string(),
        parking_spaces: 1,
        number_of_bathrooms: 1,
        number_of_bedrooms: 1,
    }
}

pub fn titles(properties: &[Property]) -> Vec<&str> {
    properties.iter().map(|p| p.title.as_str()).collect()
}
