// Selection stage: predicate filters and single-key sorts over the catalog
use crate::models::{FlightOffer, Hotel, Package, VisaRequirement};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::ops::RangeInclusive;

pub const DEFAULT_FLIGHT_PRICE_RANGE: RangeInclusive<u64> = 0..=50_000;
pub const DEFAULT_FLIGHT_DURATION_HOURS: RangeInclusive<f64> = 1.0..=24.0;
pub const DEFAULT_HOTEL_PRICE_RANGE: RangeInclusive<u64> = 0..=25_000;

// Theme chips offered on the holidays page; "All" disables the filter
pub const PACKAGE_THEMES: [&str; 9] = [
    "All",
    "Beach",
    "Adventure",
    "Heritage",
    "Wellness",
    "Mountains",
    "Wildlife",
    "Honeymoon",
    "Family",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum StopFilter {
    NonStop,
    #[serde(rename = "1-stop")]
    OneStop,
    #[serde(rename = "2-plus")]
    TwoPlus,
}

impl StopFilter {
    pub fn matches(&self, stops: usize) -> bool {
        match self {
            StopFilter::NonStop => stops == 0,
            StopFilter::OneStop => stops == 1,
            StopFilter::TwoPlus => stops >= 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FlightFilter {
    pub price_range: RangeInclusive<u64>,
    pub stops: Vec<StopFilter>,
    pub airlines: Vec<String>,
    pub cabin_classes: Vec<String>,
    pub duration_hours: RangeInclusive<f64>,
}

impl Default for FlightFilter {
    fn default() -> Self {
        Self {
            price_range: DEFAULT_FLIGHT_PRICE_RANGE,
            stops: Vec::new(),
            airlines: Vec::new(),
            cabin_classes: Vec::new(),
            duration_hours: DEFAULT_FLIGHT_DURATION_HOURS,
        }
    }
}

impl FlightFilter {
    // True when anything differs from the cleared state
    pub fn is_active(&self) -> bool {
        !self.stops.is_empty()
            || !self.airlines.is_empty()
            || !self.cabin_classes.is_empty()
            || *self.price_range.start() > 0
            || *self.price_range.end() < *DEFAULT_FLIGHT_PRICE_RANGE.end()
    }

    pub fn matches(&self, flight: &FlightOffer) -> bool {
        if !self.price_range.contains(&flight.price) {
            return false;
        }

        if !self.stops.is_empty() && !self.stops.iter().any(|s| s.matches(flight.stops())) {
            return false;
        }

        if !any_substring(&self.airlines, &flight.airline) {
            return false;
        }

        if !any_substring(&self.cabin_classes, &flight.cabin) {
            return false;
        }

        let hours = flight.duration as f64 / 60.0;
        self.duration_hours.contains(&hours)
    }
}

// Empty needles match everything
fn any_substring(needles: &[String], haystack: &str) -> bool {
    if needles.is_empty() {
        return true;
    }
    let haystack = haystack.to_lowercase();
    needles
        .iter()
        .any(|needle| haystack.contains(&needle.to_lowercase()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlightSort {
    #[default]
    Price,
    Duration,
    Departure,
}

pub fn filter_flights(
    flights: &[FlightOffer],
    filter: &FlightFilter,
    sort: FlightSort,
) -> Vec<FlightOffer> {
    let mut filtered: Vec<FlightOffer> = flights
        .iter()
        .filter(|f| filter.matches(f))
        .cloned()
        .collect();

    match sort {
        FlightSort::Price => filtered.sort_by_key(|f| f.price),
        FlightSort::Duration => filtered.sort_by_key(|f| f.duration),
        // offers without segments have no departure and go last
        FlightSort::Departure => filtered.sort_by_key(|f| (f.departure().is_none(), f.departure())),
    }

    filtered
}

#[derive(Debug, Clone, PartialEq)]
pub struct HotelFilter {
    pub price_range: RangeInclusive<u64>,
    pub stars: Vec<u8>,
}

impl Default for HotelFilter {
    fn default() -> Self {
        Self {
            price_range: DEFAULT_HOTEL_PRICE_RANGE,
            stars: Vec::new(),
        }
    }
}

impl HotelFilter {
    pub fn matches(&self, hotel: &Hotel) -> bool {
        let matches_price = self.price_range.contains(&hotel.price_per_night);
        let matches_stars = self.stars.is_empty() || self.stars.contains(&hotel.stars.unwrap_or(0));
        matches_price && matches_stars
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HotelSort {
    Price,
    #[default]
    Rating,
    // Catalog order; distances are free text
    Distance,
}

pub fn filter_hotels(hotels: &[Hotel], filter: &HotelFilter, sort: HotelSort) -> Vec<Hotel> {
    let mut filtered: Vec<Hotel> = hotels.iter().filter(|h| filter.matches(h)).cloned().collect();

    match sort {
        HotelSort::Price => filtered.sort_by_key(|h| h.price_per_night),
        HotelSort::Rating => {
            filtered.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(Ordering::Equal))
        }
        HotelSort::Distance => {}
    }

    filtered
}

pub fn filter_packages(packages: &[Package], theme: &str) -> Vec<Package> {
    if theme == "All" {
        return packages.to_vec();
    }
    packages
        .iter()
        .filter(|p| p.themes.iter().any(|t| t == theme))
        .cloned()
        .collect()
}

pub fn search_visas(visas: &[VisaRequirement], query: &str) -> Vec<VisaRequirement> {
    if query.is_empty() {
        return visas.to_vec();
    }
    let query = query.to_lowercase();
    visas
        .iter()
        .filter(|v| v.country.to_lowercase().contains(&query))
        .cloned()
        .collect()
}
