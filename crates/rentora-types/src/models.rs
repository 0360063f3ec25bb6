use serde::{Deserialize, Serialize};

/// Lifecycle states of a booking. Transitions are one-way: a booking leaves
/// BOOKED for CANCELLED or COMPLETED and never returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Booked,
    Cancelled,
    Completed,
}

impl BookingStatus {
    /// Stable string form used in the database `status` column.
    pub fn as_str(self) -> &'static str {
        match self {
            BookingStatus::Booked => "BOOKED",
            BookingStatus::Cancelled => "CANCELLED",
            BookingStatus::Completed => "COMPLETED",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "BOOKED" => Some(BookingStatus::Booked),
            "CANCELLED" => Some(BookingStatus::Cancelled),
            "COMPLETED" => Some(BookingStatus::Completed),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_string_forms_match_serde() {
        for status in [
            BookingStatus::Booked,
            BookingStatus::Cancelled,
            BookingStatus::Completed,
        ] {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            assert_eq!(BookingStatus::parse(status.as_str()), Some(status));
        }
    }

    #[test]
    fn unknown_status_rejected() {
        assert_eq!(BookingStatus::parse("PENDING"), None);
        assert_eq!(BookingStatus::parse("booked"), None);
    }
}
