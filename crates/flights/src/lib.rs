//! Flight search for the Wayfinder CLI.
//!
//! Turns free-text travel queries into structured search criteria and
//! applies them to a fixed in-memory catalog:
//! - `catalog`: loads and validates the flight catalog
//! - `extract`: free text -> `SearchCriteria` (never fails)
//! - `search`: pure filter/rank over the catalog
//! - `format`: user-facing flight listings

pub mod catalog;
pub mod extract;
pub mod format;
pub mod search;
pub mod types;

pub use catalog::FlightCatalog;
pub use extract::CriteriaExtractor;
pub use search::search;
pub use types::{Alliance, DepartureWindow, FlightRecord, SearchCriteria};

use chrono::NaiveDate;

/// Search flights from a free-text query.
///
/// Composes criteria extraction and the filter/rank engine. `today` is the
/// reference date used to resolve month names without an explicit year.
pub fn flight_search(
    catalog: &FlightCatalog,
    extractor: &CriteriaExtractor,
    text: &str,
    today: NaiveDate,
) -> Vec<FlightRecord> {
    let criteria = extractor.extract(text, today);
    tracing::debug!("Extracted criteria: {:?}", criteria);

    search(catalog.records(), &criteria)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokyo_catalog() -> FlightCatalog {
        let records = vec![
            FlightRecord {
                id: "FL-101".to_string(),
                airline: "Emirates".to_string(),
                alliance: Alliance::None,
                from: "Dubai".to_string(),
                to: "Tokyo".to_string(),
                layovers: vec!["Bangkok".to_string()],
                overnight_layover: true,
                departure_date: NaiveDate::from_ymd_opt(2026, 8, 14).unwrap(),
                return_date: Some(NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()),
                price_usd: 950.0,
                refundable: false,
            },
            FlightRecord {
                id: "FL-102".to_string(),
                airline: "Japan Airlines".to_string(),
                alliance: Alliance::Oneworld,
                from: "Dubai".to_string(),
                to: "Tokyo".to_string(),
                layovers: vec![],
                overnight_layover: false,
                departure_date: NaiveDate::from_ymd_opt(2026, 8, 15).unwrap(),
                return_date: Some(NaiveDate::from_ymd_opt(2026, 8, 29).unwrap()),
                price_usd: 1200.0,
                refundable: true,
            },
        ];
        FlightCatalog::from_records(records).unwrap()
    }

    #[test]
    fn test_flight_search_avoids_overnight_layovers() {
        let catalog = tokyo_catalog();
        let extractor = CriteriaExtractor::new(&catalog);
        let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();

        let results = flight_search(
            &catalog,
            &extractor,
            "flights to Tokyo avoiding overnight layovers",
            today,
        );

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "FL-102");
        assert_eq!(results[0].price_usd, 1200.0);
        assert!(results[0].layovers.is_empty());
    }

    #[test]
    fn test_flight_search_unconstrained_returns_all_by_price() {
        let catalog = tokyo_catalog();
        let extractor = CriteriaExtractor::new(&catalog);
        let today = NaiveDate::from_ymd_opt(2026, 8, 1).unwrap();

        let results = flight_search(&catalog, &extractor, "", today);

        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "FL-101"); // 950 before 1200
        assert_eq!(results[1].id, "FL-102");
    }
}
