// In-memory inventory standing in for a booking backend
use crate::models::{Airport, FlightOffer, Hotel, HotelRoom, Package, VisaRequirement};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

// Mock inventory shipped with the crate
pub const MOCK_CATALOG_JSON: &str = include_str!("../samples/catalog.json");

// Suites are priced off the hotel's nightly rate
const SUITE_PRICE_FACTOR: f64 = 1.6;
const DEFAULT_DELUXE_AVAILABILITY: u32 = 5;
const DEFAULT_SUITE_AVAILABILITY: u32 = 3;

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Catalog {
    pub airports: Vec<Airport>,
    pub flights: Vec<FlightOffer>,
    pub hotels: Vec<Hotel>,
    pub packages: Vec<Package>,
    pub visas: Vec<VisaRequirement>,
}

impl Catalog {
    pub fn mock() -> Result<Self, CatalogError> {
        Self::from_json(MOCK_CATALOG_JSON)
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        tracing::debug!(
            flights = catalog.flights.len(),
            hotels = catalog.hotels.len(),
            packages = catalog.packages.len(),
            visas = catalog.visas.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    pub fn flight(&self, id: &str) -> Option<&FlightOffer> {
        self.flights.iter().find(|f| f.id == id)
    }

    pub fn hotel(&self, id: &str) -> Option<&Hotel> {
        self.hotels.iter().find(|h| h.id == id)
    }

    pub fn package(&self, id: &str) -> Option<&Package> {
        self.packages.iter().find(|p| p.id == id)
    }

    pub fn visa(&self, id: &str) -> Option<&VisaRequirement> {
        self.visas.iter().find(|v| v.id == id)
    }

    pub fn airport_label(&self, code: &str) -> String {
        match self.airports.iter().find(|a| a.code == code) {
            Some(airport) => format!("{} — {}", code, airport.city),
            None => code.to_string(),
        }
    }
}

/// Bookable rooms for a hotel.
///
/// Hotels without an explicit room list get a deluxe room at the nightly
/// rate and an executive suite at 1.6x, rounded to whole rupees.
pub fn room_options(hotel: &Hotel) -> Vec<HotelRoom> {
    if !hotel.rooms.is_empty() {
        return hotel.rooms.clone();
    }

    let nightly = hotel.price_per_night;
    vec![
        HotelRoom {
            id: "deluxe".to_string(),
            name: "Deluxe Room".to_string(),
            size: "32 sqm".to_string(),
            bed_type: "King Bed".to_string(),
            max_occupancy: 2,
            amenities: ["WiFi", "Air Conditioning", "TV", "Mini Bar", "Work Desk"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            price: nightly,
            available: hotel.available_rooms.unwrap_or(DEFAULT_DELUXE_AVAILABILITY),
        },
        HotelRoom {
            id: "suite".to_string(),
            name: "Executive Suite".to_string(),
            size: "55 sqm".to_string(),
            bed_type: "King Bed + Sofa Bed".to_string(),
            max_occupancy: 4,
            amenities: [
                "WiFi",
                "Air Conditioning",
                "TV",
                "Mini Bar",
                "Work Desk",
                "Living Area",
                "Bathtub",
            ]
            .iter()
            .map(|s| s.to_string())
            .collect(),
            price: (nightly as f64 * SUITE_PRICE_FACTOR).round() as u64,
            available: DEFAULT_SUITE_AVAILABILITY,
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_catalog_loads() {
        let catalog = Catalog::mock().unwrap();

        assert_eq!(catalog.airports.len(), 5);
        assert_eq!(catalog.flights.len(), 3);
        assert_eq!(catalog.hotels.len(), 6);
        assert_eq!(catalog.packages.len(), 6);
        assert_eq!(catalog.visas.len(), 6);

        let indigo = catalog.flight("6E-2045").unwrap();
        assert_eq!(indigo.price, 5499);
        assert_eq!(indigo.stops(), 0);

        // Mixed price field spellings all land on the canonical field
        assert_eq!(catalog.hotel("1").unwrap().price_per_night, 15000);
        assert_eq!(catalog.hotel("2").unwrap().price_per_night, 18000);
        assert_eq!(catalog.package("1").unwrap().price_per_person, 35000);
        assert_eq!(catalog.package("2").unwrap().price_per_person, 28000);
    }

    #[test]
    fn test_lookup_misses() {
        let catalog = Catalog::mock().unwrap();
        assert!(catalog.flight("nope").is_none());
        assert!(catalog.visa("42").is_none());
    }

    #[test]
    fn test_airport_label() {
        let catalog = Catalog::mock().unwrap();
        assert_eq!(catalog.airport_label("DEL"), "DEL — Delhi");
        assert_eq!(catalog.airport_label("JFK"), "JFK");
    }

    #[test]
    fn test_bad_json_is_reported() {
        let result = Catalog::from_json("{ \"flights\": 3 }");
        assert!(matches!(result, Err(CatalogError::Parse(_))));
    }

    #[test]
    fn test_derived_rooms() {
        let catalog = Catalog::mock().unwrap();
        let hotel = catalog.hotel("6").unwrap();
        let rooms = room_options(hotel);

        assert_eq!(rooms.len(), 2);
        assert_eq!(rooms[0].price, 5000);
        assert_eq!(rooms[0].available, 15);
        assert_eq!(rooms[1].price, 8000);
        assert_eq!(rooms[1].available, 3);
    }
}
