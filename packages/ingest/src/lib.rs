#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions)]

//! Seed ingestion for the parking spot collection.
//!
//! Two sources: a CSV file with `name,lat,lng,type,fee,access` columns, and
//! the built-in Bengaluru dataset in [`seed`]. Ingestion is lenient where
//! the data is dirty: missing categorical fields get defaults, and rows
//! whose coordinates do not parse to valid degrees are dropped with a
//! warning rather than failing the whole load. Every ingested spot enters
//! the collection as `available`; the demo status distribution lives in
//! [`seed::assign_demo_statuses`], deliberately outside the parse path.

pub mod seed;

use std::io::Read;
use std::path::Path;

use thiserror::Error;
use where2park_spot_models::{
    Fee, ParkingSpot, SpotAccess, SpotId, SpotStatus, SpotType, validate_lat_lng,
};

/// Errors that can occur while loading seed data.
///
/// Per-row coordinate problems are not errors; those rows are dropped.
#[derive(Debug, Error)]
pub enum IngestError {
    /// The seed file could not be read.
    #[error("failed to read seed file: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV structure itself was unreadable.
    #[error("failed to parse seed CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Parses seed spots from CSV text.
///
/// The header row is skipped. Column order is
/// `name,lat,lng,type,fee,access`. Defaults: name `"Parking Spot {row}"`,
/// type `surface`, fee `no`, access `permissive`. Rows with unparseable or
/// out-of-range coordinates are dropped with a warning. Assigned IDs are
/// `csv-1`, `csv-2`, ... by data row.
///
/// # Errors
///
/// Returns [`IngestError::Csv`] if the CSV structure cannot be read at all.
pub fn parse_seed_csv(input: impl Read) -> Result<Vec<ParkingSpot>, IngestError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(input);

    let mut spots = Vec::new();

    for (row, result) in reader.records().enumerate() {
        let record = result?;
        let row = row + 1;

        let field = |i: usize| record.get(i).map(str::trim).unwrap_or_default();

        let (Ok(lat), Ok(lng)) = (field(1).parse::<f64>(), field(2).parse::<f64>()) else {
            log::warn!("seed row {row}: unparseable coordinates, dropping");
            continue;
        };
        if let Err(e) = validate_lat_lng(lat, lng) {
            log::warn!("seed row {row}: {e}, dropping");
            continue;
        }

        let name = match field(0) {
            "" => format!("Parking Spot {row}"),
            name => name.to_owned(),
        };
        let spot_type = match field(3) {
            "" => SpotType::Surface,
            tag => SpotType::from(tag.to_owned()),
        };
        let fee = field(4).parse::<Fee>().unwrap_or(Fee::No);
        let access = match field(5) {
            "" => SpotAccess::Permissive,
            tag => SpotAccess::from(tag.to_owned()),
        };

        spots.push(ParkingSpot {
            id: SpotId::new(format!("csv-{row}")),
            name,
            lat,
            lng,
            spot_type,
            fee,
            access,
            status: SpotStatus::Available,
            added_by: None,
            created_at: None,
            updated_at: None,
        });
    }

    log::info!("ingested {} seed spots from CSV", spots.len());
    Ok(spots)
}

/// Reads and parses a seed CSV file from disk.
///
/// # Errors
///
/// Returns [`IngestError::Io`] if the file cannot be opened or
/// [`IngestError::Csv`] if its structure cannot be read.
pub fn load_seed_csv(path: &Path) -> Result<Vec<ParkingSpot>, IngestError> {
    let file = std::fs::File::open(path)?;
    parse_seed_csv(file)
}

#[cfg(test)]
mod tests {
    use super::*;

    const CSV: &str = "\
name,lat,lng,type,fee,access
Garuda Mall Parking,12.9703806,77.6094191,underground,yes,customers
Street Parking Near Metro,12.9600641,77.6454368,street_side,no,permissive
Broken Row,not-a-number,77.6,surface,no,public
Too Far North,91.5,77.6,surface,no,public
,12.9752226,77.5955056,,,
";

    #[test]
    fn parses_valid_rows_and_drops_malformed_ones() {
        let spots = parse_seed_csv(CSV.as_bytes()).unwrap();
        assert_eq!(spots.len(), 3);
        assert_eq!(spots[0].name, "Garuda Mall Parking");
        assert_eq!(spots[0].spot_type, SpotType::Underground);
        assert_eq!(spots[0].fee, Fee::Yes);
        assert_eq!(spots[1].spot_type, SpotType::StreetSide);
    }

    #[test]
    fn applies_defaults_for_missing_fields() {
        let spots = parse_seed_csv(CSV.as_bytes()).unwrap();
        let defaulted = &spots[2];
        assert_eq!(defaulted.name, "Parking Spot 5");
        assert_eq!(defaulted.spot_type, SpotType::Surface);
        assert_eq!(defaulted.fee, Fee::No);
        assert_eq!(defaulted.access, SpotAccess::Permissive);
    }

    #[test]
    fn assigns_row_based_ids_and_available_status() {
        let spots = parse_seed_csv(CSV.as_bytes()).unwrap();
        assert_eq!(spots[0].id, SpotId::from("csv-1"));
        assert_eq!(spots[1].id, SpotId::from("csv-2"));
        assert!(spots.iter().all(|spot| spot.status.is_available()));
    }

    #[test]
    fn unknown_type_tag_passes_through() {
        let csv = "name,lat,lng,type,fee,access\nRoof Lot,12.97,77.59,rooftop,no,public\n";
        let spots = parse_seed_csv(csv.as_bytes()).unwrap();
        assert_eq!(spots[0].spot_type, SpotType::Other("rooftop".to_owned()));
    }

    #[test]
    fn empty_input_yields_empty_collection() {
        let spots = parse_seed_csv("name,lat,lng,type,fee,access\n".as_bytes()).unwrap();
        assert!(spots.is_empty());
    }
}
