use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Shared lifecycle for appointments and bed bookings. Every record starts
/// out `Pending`; `Confirmed` and `Canceled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Canceled,
}

impl BookingStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, BookingStatus::Confirmed | BookingStatus::Canceled)
    }

    pub fn can_transition_to(&self, next: BookingStatus) -> bool {
        match self {
            BookingStatus::Pending => {
                matches!(next, BookingStatus::Confirmed | BookingStatus::Canceled)
            }
            BookingStatus::Confirmed | BookingStatus::Canceled => false,
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookingStatus::Pending => write!(f, "PENDING"),
            BookingStatus::Confirmed => write!(f, "CONFIRMED"),
            BookingStatus::Canceled => write!(f, "CANCELED"),
        }
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PENDING" => Ok(BookingStatus::Pending),
            "CONFIRMED" => Ok(BookingStatus::Confirmed),
            "CANCELED" => Ok(BookingStatus::Canceled),
            other => Err(format!("Unknown booking status: {}", other)),
        }
    }
}
