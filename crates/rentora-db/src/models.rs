/// Database row types — these map directly to SQLite rows.
/// Distinct from the rentora-types API models to keep the DB layer
/// independent of wire concerns.

pub struct UserRow {
    pub id: i64,
    pub username: String,
    pub password: String,
    pub created_at: String,
}

pub struct BookingRow {
    pub id: i64,
    pub user_id: i64,
    pub car_name: String,
    pub rent_per_day: f64,
    pub days: i64,
    pub status: String,
    pub created_at: String,
}
