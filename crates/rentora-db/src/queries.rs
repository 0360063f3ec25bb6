use crate::Database;
use crate::models::{BookingRow, UserRow};
use anyhow::{Result, anyhow};
use rusqlite::Connection;

use rentora_types::models::BookingStatus;

impl Database {
    // -- Users --

    pub fn create_user(&self, username: &str, password_hash: &str) -> Result<UserRow> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO users (username, password) VALUES (?1, ?2)",
                (username, password_hash),
            )?;
            let id = conn.last_insert_rowid();
            query_user_by_id(conn, id)?.ok_or_else(|| anyhow!("user {} missing after insert", id))
        })
    }

    pub fn get_user_by_username(&self, username: &str) -> Result<Option<UserRow>> {
        self.with_conn(|conn| query_user_by_username(conn, username))
    }

    // -- Bookings --

    pub fn insert_booking(
        &self,
        user_id: i64,
        car_name: &str,
        rent_per_day: f64,
        days: i64,
    ) -> Result<i64> {
        self.with_conn(|conn| {
            conn.execute(
                "INSERT INTO bookings (user_id, car_name, rent_per_day, days, status) VALUES (?1, ?2, ?3, ?4, ?5)",
                rusqlite::params![user_id, car_name, rent_per_day, days, BookingStatus::Booked.as_str()],
            )?;
            Ok(conn.last_insert_rowid())
        })
    }

    pub fn list_bookings(&self, user_id: i64) -> Result<Vec<BookingRow>> {
        self.with_conn(|conn| query_bookings(conn, user_id))
    }

    /// Conditionally move a booking between lifecycle states. The WHERE
    /// clause carries both ownership and the expected current status, so two
    /// concurrent transitions on one row cannot both report success, and a
    /// non-owner's request matches zero rows just like a nonexistent id.
    pub fn transition_booking(
        &self,
        id: i64,
        user_id: i64,
        from: BookingStatus,
        to: BookingStatus,
    ) -> Result<bool> {
        self.with_conn(|conn| {
            let changed = conn.execute(
                "UPDATE bookings SET status = ?1 WHERE id = ?2 AND user_id = ?3 AND status = ?4",
                rusqlite::params![to.as_str(), id, user_id, from.as_str()],
            )?;
            Ok(changed > 0)
        })
    }

    /// Owner-scoped delete; any status.
    pub fn delete_booking(&self, id: i64, user_id: i64) -> Result<bool> {
        self.with_conn(|conn| {
            let removed = conn.execute(
                "DELETE FROM bookings WHERE id = ?1 AND user_id = ?2",
                rusqlite::params![id, user_id],
            )?;
            Ok(removed > 0)
        })
    }
}

fn query_user_by_username(conn: &Connection, username: &str) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, username, password, created_at FROM users WHERE username = ?1")?;

    let row = stmt
        .query_row([username], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_user_by_id(conn: &Connection, id: i64) -> Result<Option<UserRow>> {
    let mut stmt =
        conn.prepare("SELECT id, username, password, created_at FROM users WHERE id = ?1")?;

    let row = stmt
        .query_row([id], |row| {
            Ok(UserRow {
                id: row.get(0)?,
                username: row.get(1)?,
                password: row.get(2)?,
                created_at: row.get(3)?,
            })
        })
        .optional()?;

    Ok(row)
}

fn query_bookings(conn: &Connection, user_id: i64) -> Result<Vec<BookingRow>> {
    let mut stmt = conn.prepare(
        "SELECT id, user_id, car_name, rent_per_day, days, status, created_at
         FROM bookings
         WHERE user_id = ?1
         ORDER BY created_at",
    )?;

    let rows = stmt
        .query_map([user_id], |row| {
            Ok(BookingRow {
                id: row.get(0)?,
                user_id: row.get(1)?,
                car_name: row.get(2)?,
                rent_per_day: row.get(3)?,
                days: row.get(4)?,
                status: row.get(5)?,
                created_at: row.get(6)?,
            })
        })?
        .collect::<std::result::Result<Vec<_>, _>>()?;

    Ok(rows)
}

/// Extension trait for optional query results
trait OptionalExt<T> {
    fn optional(self) -> Result<Option<T>>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> Result<Option<T>> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db_with_user(username: &str) -> (Database, i64) {
        let db = Database::open_in_memory().unwrap();
        let user = db.create_user(username, "argon2-hash").unwrap();
        (db, user.id)
    }

    #[test]
    fn create_user_roundtrip() {
        let (db, id) = db_with_user("alice");

        let found = db.get_user_by_username("alice").unwrap().unwrap();
        assert_eq!(found.id, id);
        assert_eq!(found.username, "alice");
        assert_eq!(found.password, "argon2-hash");
        assert!(!found.created_at.is_empty());

        assert!(db.get_user_by_username("bob").unwrap().is_none());
    }

    #[test]
    fn duplicate_username_hits_unique_constraint() {
        let (db, _) = db_with_user("alice");
        assert!(db.create_user("alice", "other-hash").is_err());
    }

    #[test]
    fn insert_and_list_bookings() {
        let (db, user_id) = db_with_user("alice");

        let id = db.insert_booking(user_id, "Tesla", 100.0, 3).unwrap();
        let bookings = db.list_bookings(user_id).unwrap();
        assert_eq!(bookings.len(), 1);
        assert_eq!(bookings[0].id, id);
        assert_eq!(bookings[0].car_name, "Tesla");
        assert_eq!(bookings[0].rent_per_day, 100.0);
        assert_eq!(bookings[0].days, 3);
        assert_eq!(bookings[0].status, "BOOKED");
    }

    #[test]
    fn list_scoped_to_owner() {
        let (db, alice) = db_with_user("alice");
        let bob = db.create_user("bob", "argon2-hash").unwrap().id;

        db.insert_booking(alice, "Tesla", 100.0, 3).unwrap();
        assert!(db.list_bookings(bob).unwrap().is_empty());
    }

    #[test]
    fn transition_succeeds_exactly_once() {
        let (db, user_id) = db_with_user("alice");
        let id = db.insert_booking(user_id, "Tesla", 100.0, 3).unwrap();

        assert!(
            db.transition_booking(id, user_id, BookingStatus::Booked, BookingStatus::Cancelled)
                .unwrap()
        );
        // Second transition sees zero matching rows: the status predicate no
        // longer holds.
        assert!(
            !db.transition_booking(id, user_id, BookingStatus::Booked, BookingStatus::Cancelled)
                .unwrap()
        );
        assert!(
            !db.transition_booking(id, user_id, BookingStatus::Booked, BookingStatus::Completed)
                .unwrap()
        );

        let bookings = db.list_bookings(user_id).unwrap();
        assert_eq!(bookings[0].status, "CANCELLED");
    }

    #[test]
    fn transition_scoped_to_owner() {
        let (db, alice) = db_with_user("alice");
        let bob = db.create_user("bob", "argon2-hash").unwrap().id;
        let id = db.insert_booking(alice, "Tesla", 100.0, 3).unwrap();

        assert!(
            !db.transition_booking(id, bob, BookingStatus::Booked, BookingStatus::Cancelled)
                .unwrap()
        );
        assert_eq!(db.list_bookings(alice).unwrap()[0].status, "BOOKED");
    }

    #[test]
    fn delete_ignores_status() {
        let (db, user_id) = db_with_user("alice");
        let id = db.insert_booking(user_id, "Tesla", 100.0, 3).unwrap();

        db.transition_booking(id, user_id, BookingStatus::Booked, BookingStatus::Completed)
            .unwrap();

        assert!(db.delete_booking(id, user_id).unwrap());
        assert!(!db.delete_booking(id, user_id).unwrap());
        assert!(db.list_bookings(user_id).unwrap().is_empty());
    }

    #[test]
    fn delete_scoped_to_owner() {
        let (db, alice) = db_with_user("alice");
        let bob = db.create_user("bob", "argon2-hash").unwrap().id;
        let id = db.insert_booking(alice, "Tesla", 100.0, 3).unwrap();

        assert!(!db.delete_booking(id, bob).unwrap());
        assert_eq!(db.list_bookings(alice).unwrap().len(), 1);
    }
}
