//! Order lifecycle states.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fulfillment status of an order.
///
/// `pending → processing → for_delivery → delivered`, with `cancelled`
/// reachable from any non-terminal state. `delivered` and `cancelled` are
/// terminal. Administrators may set any enumerated status from any other
/// (kept as-is from the original system); the customer-facing transition is
/// limited to `for_delivery → delivered`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Pending,
    Processing,
    ForDelivery,
    Delivered,
    Cancelled,
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("invalid status value: {0:?}")]
pub struct ParseOrderStatusError(pub String);

impl OrderStatus {
    /// The status every order starts in.
    pub const INITIAL: Self = Self::Pending;

    /// No further transitions leave a terminal status.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }

    /// Whether the owner may mark the order as received right now. Only
    /// `for_delivery` qualifies; everything else is an invalid transition.
    #[must_use]
    pub const fn can_mark_received(self) -> bool {
        matches!(self, Self::ForDelivery)
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::ForDelivery => "for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for OrderStatus {
    type Err = ParseOrderStatusError;

    /// Case- and whitespace-normalized. Accepts both `for_delivery` and the
    /// legacy `for delivery` wire form.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "for_delivery" | "for delivery" => Ok(Self::ForDelivery),
            "delivered" => Ok(Self::Delivered),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(ParseOrderStatusError(other.to_string())),
        }
    }
}
