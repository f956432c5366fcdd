//! Flight filter/rank engine.
//!
//! A pure hard-filter over the catalog: every present criterion is an
//! independent predicate and a record must satisfy all of them. No fuzzy
//! or partial-match scoring. Results are ordered by ascending price, ties
//! by ascending id, so identical inputs always produce identical output.

use crate::types::{FlightRecord, SearchCriteria};
use chrono::Datelike;
use std::cmp::Ordering;

/// Apply the criteria to the catalog and return the matching records,
/// cheapest first. An empty result is a valid outcome, not an error.
pub fn search(catalog: &[FlightRecord], criteria: &SearchCriteria) -> Vec<FlightRecord> {
    let mut results: Vec<FlightRecord> = catalog
        .iter()
        .filter(|record| matches(record, criteria))
        .cloned()
        .collect();

    results.sort_by(|a, b| {
        a.price_usd
            .partial_cmp(&b.price_usd)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.id.cmp(&b.id))
    });

    tracing::debug!(
        "Flight search matched {} of {} records",
        results.len(),
        catalog.len()
    );

    results
}

/// True when the record satisfies every present constraint.
fn matches(record: &FlightRecord, criteria: &SearchCriteria) -> bool {
    if let Some(ref origin) = criteria.origin {
        if !location_matches(&record.from, origin) {
            return false;
        }
    }

    if let Some(ref destination) = criteria.destination {
        if !location_matches(&record.to, destination) {
            return false;
        }
    }

    if let Some(window) = criteria.departure {
        if record.departure_date.month() != window.month
            || record.departure_date.year() != window.year
        {
            return false;
        }
    }

    if let Some(alliance) = criteria.alliance {
        if record.alliance != alliance {
            return false;
        }
    }

    if let Some(ref airline) = criteria.airline {
        if !location_matches(&record.airline, airline) {
            return false;
        }
    }

    if let Some(max_price) = criteria.max_price {
        if record.price_usd > max_price {
            return false;
        }
    }

    if criteria.refundable_only && !record.refundable {
        return false;
    }

    if criteria.avoid_overnight_layover && record.overnight_layover {
        return false;
    }

    if let Some(max_layovers) = criteria.max_layovers {
        if record.layovers.len() > max_layovers as usize {
            return false;
        }
    }

    true
}

/// Case-insensitive exact or prefix match for names.
fn location_matches(field: &str, query: &str) -> bool {
    let field = field.to_lowercase();
    let query = query.to_lowercase();
    field == query || field.starts_with(&query)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Alliance, DepartureWindow};
    use chrono::NaiveDate;

    fn record(id: &str, price: f64) -> FlightRecord {
        FlightRecord {
            id: id.to_string(),
            airline: "Emirates".to_string(),
            alliance: Alliance::None,
            from: "Dubai".to_string(),
            to: "Tokyo".to_string(),
            layovers: vec![],
            overnight_layover: false,
            departure_date: NaiveDate::from_ymd_opt(2026, 8, 14).unwrap(),
            return_date: None,
            price_usd: price,
            refundable: false,
        }
    }

    fn catalog() -> Vec<FlightRecord> {
        let mut overnight = record("FL-OVR", 950.0);
        overnight.layovers = vec!["Bangkok".to_string()];
        overnight.overnight_layover = true;

        let mut refundable = record("FL-REF", 1400.0);
        refundable.refundable = true;
        refundable.alliance = Alliance::StarAlliance;
        refundable.airline = "Lufthansa".to_string();

        let mut paris = record("FL-PAR", 620.0);
        paris.to = "Paris".to_string();
        paris.departure_date = NaiveDate::from_ymd_opt(2026, 9, 2).unwrap();

        vec![record("FL-NON", 1200.0), overnight, refundable, paris]
    }

    #[test]
    fn test_unconstrained_returns_all_sorted() {
        let results = search(&catalog(), &SearchCriteria::default());

        assert_eq!(results.len(), 4);
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["FL-PAR", "FL-OVR", "FL-NON", "FL-REF"]);
    }

    #[test]
    fn test_price_tie_broken_by_id() {
        let records = vec![record("FL-B", 500.0), record("FL-A", 500.0)];
        let results = search(&records, &SearchCriteria::default());

        assert_eq!(results[0].id, "FL-A");
        assert_eq!(results[1].id, "FL-B");
    }

    #[test]
    fn test_all_constraints_must_hold() {
        let criteria = SearchCriteria {
            destination: Some("Tokyo".to_string()),
            avoid_overnight_layover: true,
            ..Default::default()
        };

        let results = search(&catalog(), &criteria);

        // Every returned record satisfies every present predicate
        for record in &results {
            assert!(record.to.eq_ignore_ascii_case("tokyo"));
            assert!(!record.overnight_layover);
        }
        let ids: Vec<&str> = results.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["FL-NON", "FL-REF"]);
    }

    #[test]
    fn test_max_price_is_inclusive() {
        let criteria = SearchCriteria {
            max_price: Some(1200.0),
            ..Default::default()
        };

        let results = search(&catalog(), &criteria);
        assert!(results.iter().any(|r| r.id == "FL-NON")); // exactly 1200
        assert!(results.iter().all(|r| r.price_usd <= 1200.0));
    }

    #[test]
    fn test_max_layovers_is_inclusive() {
        let criteria = SearchCriteria {
            max_layovers: Some(1),
            ..Default::default()
        };
        let results = search(&catalog(), &criteria);
        assert_eq!(results.len(), 4); // FL-OVR has exactly one layover

        let nonstop_only = SearchCriteria {
            max_layovers: Some(0),
            ..Default::default()
        };
        let results = search(&catalog(), &nonstop_only);
        assert!(results.iter().all(|r| r.layovers.is_empty()));
    }

    #[test]
    fn test_departure_window() {
        let criteria = SearchCriteria {
            departure: Some(DepartureWindow {
                month: 9,
                year: 2026,
            }),
            ..Default::default()
        };

        let results = search(&catalog(), &criteria);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "FL-PAR");
    }

    #[test]
    fn test_alliance_and_refundable() {
        let criteria = SearchCriteria {
            alliance: Some(Alliance::StarAlliance),
            refundable_only: true,
            ..Default::default()
        };

        let results = search(&catalog(), &criteria);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "FL-REF");
    }

    #[test]
    fn test_location_prefix_match() {
        let criteria = SearchCriteria {
            destination: Some("Tok".to_string()),
            ..Default::default()
        };

        let results = search(&catalog(), &criteria);
        assert!(!results.is_empty());
        assert!(results.iter().all(|r| r.to == "Tokyo"));
    }

    #[test]
    fn test_empty_result_is_valid() {
        let criteria = SearchCriteria {
            destination: Some("Reykjavik".to_string()),
            ..Default::default()
        };

        let results = search(&catalog(), &criteria);
        assert!(results.is_empty());
    }

    #[test]
    fn test_tokyo_overnight_scenario() {
        // Two Tokyo flights: overnight layover at 950, nonstop at 1200.
        // Avoiding overnight layovers returns only the nonstop flight.
        let mut overnight = record("FL-OVR", 950.0);
        overnight.layovers = vec!["Bangkok".to_string()];
        overnight.overnight_layover = true;
        let nonstop = record("FL-NON", 1200.0);

        let criteria = SearchCriteria {
            destination: Some("Tokyo".to_string()),
            avoid_overnight_layover: true,
            ..Default::default()
        };

        let results = search(&[overnight, nonstop], &criteria);
        assert_eq!(results.len(), 1);
        assert_eq!(results[0].id, "FL-NON");
        assert_eq!(results[0].price_usd, 1200.0);
    }
}
