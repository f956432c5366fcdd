//! Flight catalog store.
//!
//! Loads the static flight catalog into memory, validating each record
//! individually so load failures name the offending record and field. The
//! catalog is built once at startup and read-only afterwards.

use crate::types::FlightRecord;
use std::collections::HashSet;
use std::path::Path;
use wayfinder_core::{AppError, AppResult};

/// In-memory collection of flight records.
#[derive(Debug, Clone)]
pub struct FlightCatalog {
    records: Vec<FlightRecord>,
}

impl FlightCatalog {
    /// Load the catalog from a JSON file.
    pub fn load(path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Data(format!("Failed to read flight catalog {:?}: {}", path, e))
        })?;

        let raw: Vec<serde_json::Value> = serde_json::from_str(&contents).map_err(|e| {
            AppError::Data(format!(
                "Flight catalog {:?} is not a JSON array of records: {}",
                path, e
            ))
        })?;

        let mut records = Vec::with_capacity(raw.len());
        for (position, value) in raw.into_iter().enumerate() {
            let record = parse_record(value, position)?;
            records.push(record);
        }

        let catalog = Self::from_records(records)?;
        tracing::info!(
            "Loaded flight catalog: {} records from {:?}",
            catalog.len(),
            path
        );

        Ok(catalog)
    }

    /// Build a catalog from already-deserialized records, validating the
    /// record invariants.
    pub fn from_records(records: Vec<FlightRecord>) -> AppResult<Self> {
        let mut seen_ids = HashSet::new();
        for record in &records {
            validate_record(record)?;
            if !seen_ids.insert(record.id.clone()) {
                return Err(AppError::Data(format!(
                    "flight record '{}': duplicate flight_id",
                    record.id
                )));
            }
        }

        Ok(Self { records })
    }

    /// All records, in catalog order.
    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    /// Number of records in the catalog.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// True when the catalog holds no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct origin/destination names, first-seen casing preserved.
    ///
    /// Used by the criteria extractor as its location gazetteer.
    pub fn locations(&self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut locations = Vec::new();

        for record in &self.records {
            for name in [&record.from, &record.to] {
                if seen.insert(name.to_lowercase()) {
                    locations.push(name.clone());
                }
            }
        }

        locations
    }
}

/// Deserialize one catalog entry, naming the record on failure.
fn parse_record(value: serde_json::Value, position: usize) -> AppResult<FlightRecord> {
    let label = value
        .get("flight_id")
        .and_then(|v| v.as_str())
        .map(|id| format!("flight record '{}'", id))
        .unwrap_or_else(|| format!("flight record at index {}", position));

    serde_json::from_value(value).map_err(|e| AppError::Data(format!("{}: {}", label, e)))
}

/// Check the per-record invariants.
fn validate_record(record: &FlightRecord) -> AppResult<()> {
    if record.id.trim().is_empty() {
        return Err(AppError::Data(
            "flight record with empty flight_id".to_string(),
        ));
    }

    if record.price_usd <= 0.0 {
        return Err(AppError::Data(format!(
            "flight record '{}': price_usd must be positive (got {})",
            record.id, record.price_usd
        )));
    }

    if let Some(return_date) = record.return_date {
        if return_date <= record.departure_date {
            return Err(AppError::Data(format!(
                "flight record '{}': return_date {} must be after departure_date {}",
                record.id, return_date, record.departure_date
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Alliance;
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

    #[test]
    fn test_load_valid_catalog() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("flights.json");
        std::fs::write(
            &path,
            r#"[{
                "flight_id": "FL-301",
                "airline": "KLM",
                "alliance": "SkyTeam",
                "from": "Dubai",
                "to": "Amsterdam",
                "layovers": [],
                "overnight_layover": false,
                "departure_date": "2026-11-02",
                "return_date": "2026-11-16",
                "price_usd": 640.0,
                "refundable": true
            }]"#,
        )
        .unwrap();

        let catalog = FlightCatalog::load(&path).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.records()[0].id, "FL-301");
    }

    #[test]
    fn test_load_missing_field_names_record() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("flights.json");
        // price_usd missing
        std::fs::write(
            &path,
            r#"[{
                "flight_id": "FL-302",
                "airline": "KLM",
                "alliance": "SkyTeam",
                "from": "Dubai",
                "to": "Amsterdam",
                "layovers": [],
                "overnight_layover": false,
                "departure_date": "2026-11-02",
                "refundable": true
            }]"#,
        )
        .unwrap();

        let err = FlightCatalog::load(&path).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("FL-302"), "message: {}", message);
        assert!(message.contains("price_usd"), "message: {}", message);
    }

    #[test]
    fn test_nonpositive_price_rejected() {
        let err = FlightCatalog::from_records(vec![record("FL-303", 0.0)]).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("FL-303"));
        assert!(message.contains("price_usd"));
    }

    #[test]
    fn test_return_before_departure_rejected() {
        let mut bad = record("FL-304", 500.0);
        bad.return_date = Some(NaiveDate::from_ymd_opt(2026, 8, 14).unwrap()); // == departure

        let err = FlightCatalog::from_records(vec![bad]).unwrap_err();
        assert!(err.to_string().contains("return_date"));
    }

    #[test]
    fn test_duplicate_id_rejected() {
        let err =
            FlightCatalog::from_records(vec![record("FL-305", 100.0), record("FL-305", 200.0)])
                .unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    #[test]
    fn test_locations_deduplicated() {
        let mut other = record("FL-306", 300.0);
        other.from = "dubai".to_string(); // different casing, same place
        other.to = "Paris".to_string();

        let catalog =
            FlightCatalog::from_records(vec![record("FL-307", 100.0), other]).unwrap();
        let locations = catalog.locations();

        assert_eq!(locations, vec!["Dubai", "Tokyo", "Paris"]);
    }
}
