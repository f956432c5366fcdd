//! Flight search type definitions.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Airline alliance membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Alliance {
    #[serde(rename = "Star Alliance")]
    StarAlliance,
    Oneworld,
    SkyTeam,
    None,
}

impl Alliance {
    /// Catalog-facing name of the alliance.
    pub fn as_str(&self) -> &'static str {
        match self {
            Alliance::StarAlliance => "Star Alliance",
            Alliance::Oneworld => "Oneworld",
            Alliance::SkyTeam => "SkyTeam",
            Alliance::None => "None",
        }
    }
}

impl std::fmt::Display for Alliance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single flight offering from the static catalog.
///
/// Records are loaded once at startup and never mutated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FlightRecord {
    /// Unique flight identifier
    #[serde(rename = "flight_id")]
    pub id: String,

    /// Operating airline
    pub airline: String,

    /// Alliance membership of the operating airline
    pub alliance: Alliance,

    /// Departure location
    pub from: String,

    /// Arrival location
    pub to: String,

    /// Layover locations in order; empty means nonstop
    pub layovers: Vec<String>,

    /// Whether any layover is overnight
    pub overnight_layover: bool,

    /// Departure date
    pub departure_date: NaiveDate,

    /// Return date; absent means one-way
    pub return_date: Option<NaiveDate>,

    /// Ticket price in USD; always positive
    pub price_usd: f64,

    /// Whether the ticket is refundable
    pub refundable: bool,
}

/// A calendar-month departure window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartureWindow {
    /// Month (1-12)
    pub month: u32,

    /// Year
    pub year: i32,
}

/// Structured search constraints extracted from a free-text query.
///
/// Every field is independently optional; `None` (or `false` for the two
/// opt-in flags) means "no filter on this dimension", never "filter for
/// empty". A record must satisfy all present constraints to match.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchCriteria {
    /// Departure location
    pub origin: Option<String>,

    /// Arrival location
    pub destination: Option<String>,

    /// Calendar month the departure must fall in
    pub departure: Option<DepartureWindow>,

    /// Required alliance membership
    pub alliance: Option<Alliance>,

    /// Required operating airline
    pub airline: Option<String>,

    /// Inclusive price ceiling in USD
    pub max_price: Option<f64>,

    /// Only refundable tickets
    pub refundable_only: bool,

    /// Exclude flights with an overnight layover
    pub avoid_overnight_layover: bool,

    /// Inclusive ceiling on the number of layovers
    pub max_layovers: Option<u32>,
}

impl SearchCriteria {
    /// True when no dimension is constrained.
    pub fn is_unconstrained(&self) -> bool {
        self.origin.is_none()
            && self.destination.is_none()
            && self.departure.is_none()
            && self.alliance.is_none()
            && self.airline.is_none()
            && self.max_price.is_none()
            && !self.refundable_only
            && !self.avoid_overnight_layover
            && self.max_layovers.is_none()
    }
}
