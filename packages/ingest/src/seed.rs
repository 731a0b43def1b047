//! Built-in Bengaluru seed dataset and the demo status generator.
//!
//! The dataset is the fallback when no seed CSV is supplied. Spots are
//! seeded `available`; the randomized status distribution exists only for
//! demo data and is a separate, explicit step.

use rand::Rng as _;
use where2park_spot_models::{Fee, ParkingSpot, SpotAccess, SpotId, SpotStatus, SpotType};

/// name, lat, lng, type, fee, access
type SeedRow = (&'static str, f64, f64, &'static str, &'static str, &'static str);

const BENGALURU_SEED: &[SeedRow] = &[
    ("Garuda Mall Parking", 12.970_380_6, 77.609_419_1, "underground", "yes", "customers"),
    ("Street Parking Near Metro", 12.960_064_1, 77.645_436_8, "street_side", "no", "permissive"),
    ("Nandini Restaurant Parking", 12.989_144, 77.733_771_6, "surface", "no", "customers"),
    ("Corporation Circle Parking", 12.975_222_6, 77.595_505_6, "surface", "yes", "private"),
    ("ISKCON Temple Parking", 13.009_272_4, 77.551_624_4, "surface", "yes", "permissive"),
    ("Phoenix Market Underground", 12.996_845, 77.696_101_2, "underground", "yes", "customers"),
    ("Nexus Mall Parking", 12.934_854_1, 77.611_007_6, "multi-storey", "yes", "customers"),
    ("Yeswantapur Station Parking", 13.023_561_5, 77.550_700_8, "surface", "yes", "public"),
    ("Brigade Road Parking", 12.969_819_6, 77.620_545_2, "surface", "no", "permissive"),
    ("Cubbon Park Parking", 12.976_230_8, 77.590_673_5, "surface", "yes", "public"),
    ("UB City Mall Parking", 12.9716, 77.5946, "underground", "yes", "customers"),
    ("Forum Mall Koramangala", 12.9279, 77.6271, "multi-storey", "yes", "customers"),
    ("Orion Mall Parking", 13.0827, 77.5877, "multi-storey", "no", "permissive"),
    ("Electronic City Parking", 12.8456, 77.6603, "surface", "no", "permissive"),
    ("Whitefield Tech Park", 12.9698, 77.75, "surface", "no", "permissive"),
    ("Indiranagar Metro Station", 12.9784, 77.6408, "surface", "yes", "permissive"),
    ("Koramangala Forum Parking", 12.9352, 77.6245, "underground", "yes", "customers"),
    ("JP Nagar Metro Parking", 12.9081, 77.5831, "surface", "yes", "permissive"),
    ("Bangalore Central Mall", 12.927_923_2, 77.627_107_8, "multi-storey", "yes", "customers"),
    ("Lalbagh Main Gate", 12.950_716_7, 77.584_806_1, "surface", "yes", "permissive"),
    ("MG Road Metro Station", 12.9758, 77.6063, "surface", "yes", "permissive"),
    ("Commercial Street Parking", 12.9833, 77.6089, "street_side", "no", "permissive"),
    ("Vidhana Soudha Parking", 12.9794, 77.5912, "surface", "yes", "public"),
    ("Chinnaswamy Stadium", 12.9792, 77.5999, "surface", "yes", "public"),
    ("Kanteerava Stadium", 12.9667, 77.5833, "surface", "no", "public"),
    ("Banashankari Metro", 12.925, 77.5583, "surface", "yes", "permissive"),
    ("Jayanagar 4th Block", 12.925, 77.5833, "surface", "no", "permissive"),
    ("HSR Layout Parking", 12.9083, 77.6417, "surface", "no", "permissive"),
    ("BTM Layout Metro", 12.9167, 77.61, "surface", "yes", "permissive"),
    ("Silk Board Junction", 12.9167, 77.625, "surface", "no", "permissive"),
];

/// Returns the built-in Bengaluru spot dataset.
///
/// IDs are `local-1` through `local-30`, every spot `available`.
#[must_use]
pub fn bengaluru_spots() -> Vec<ParkingSpot> {
    BENGALURU_SEED
        .iter()
        .enumerate()
        .map(|(i, &(name, lat, lng, spot_type, fee, access))| ParkingSpot {
            id: SpotId::new(format!("local-{}", i + 1)),
            name: name.to_owned(),
            lat,
            lng,
            spot_type: SpotType::from(spot_type.to_owned()),
            fee: fee.parse().unwrap_or(Fee::No),
            access: SpotAccess::from(access.to_owned()),
            status: SpotStatus::Available,
            added_by: None,
            created_at: None,
            updated_at: None,
        })
        .collect()
}

/// Draws a status from the demo distribution: 65% available, 20% occupied,
/// 15% booked.
#[must_use]
pub fn random_status() -> SpotStatus {
    let roll: f64 = rand::rng().random();
    if roll < 0.65 {
        SpotStatus::Available
    } else if roll < 0.85 {
        SpotStatus::Occupied
    } else {
        SpotStatus::Booked
    }
}

/// Overwrites every spot's status with a draw from the demo distribution.
pub fn assign_demo_statuses(spots: &mut [ParkingSpot]) {
    for spot in spots {
        spot.status = random_status();
    }
}
