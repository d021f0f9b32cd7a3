// Catalog and booking records shared by every flow
use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Airport {
    pub code: String,
    pub city: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightSegment {
    pub from: String,
    pub to: String,
    pub departure: NaiveDateTime,
    pub arrival: NaiveDateTime,
    // minutes
    pub duration: u32,
    pub cabin: String,
    pub flight_number: String,
}

#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Baggage {
    pub cabin: String,
    pub checked: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FlightOffer {
    pub id: String,
    pub airline: String,
    pub flight_number: String,
    #[serde(default)]
    pub segments: Vec<FlightSegment>,
    // total minutes, layovers included
    pub duration: u32,
    pub price: u64,
    pub cabin: String,
    #[serde(default)]
    pub refundable: bool,
    #[serde(default)]
    pub changeable: bool,
    #[serde(default)]
    pub baggage: Baggage,
    #[serde(default)]
    pub amenities: Vec<String>,
}

impl FlightOffer {
    /// Number of intermediate stops. An offer without segments counts as non-stop.
    pub fn stops(&self) -> usize {
        self.segments.len().saturating_sub(1)
    }

    pub fn origin(&self) -> Option<&str> {
        self.segments.first().map(|s| s.from.as_str())
    }

    pub fn destination(&self) -> Option<&str> {
        self.segments.last().map(|s| s.to.as_str())
    }

    pub fn departure(&self) -> Option<NaiveDateTime> {
        self.segments.first().map(|s| s.departure)
    }

    pub fn route_title(&self) -> String {
        match (self.origin(), self.destination()) {
            (Some(from), Some(to)) => format!("{} → {}", from, to),
            _ => self.airline.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Hotel {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    pub location: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    pub rating: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stars: Option<u8>,
    // Older catalog entries carry the nightly rate as `price`
    #[serde(flatten, with = "nightly_rate")]
    pub price_per_night: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_rooms: Option<u32>,
    #[serde(default, deserialize_with = "deserialize_amenities")]
    pub amenities: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub rooms: Vec<HotelRoom>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HotelRoom {
    pub id: String,
    pub name: String,
    pub size: String,
    pub bed_type: String,
    pub max_occupancy: u32,
    #[serde(default)]
    pub amenities: Vec<String>,
    pub price: u64,
    pub available: u32,
}

// Amenities arrive either as plain labels or as `{ "label": ... }` objects
#[derive(Deserialize)]
#[serde(untagged)]
enum AmenityRepr {
    Plain(String),
    Labeled { label: String },
}

fn deserialize_amenities<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<AmenityRepr>::deserialize(deserializer)?;
    Ok(raw
        .into_iter()
        .map(|a| match a {
            AmenityRepr::Plain(label) | AmenityRepr::Labeled { label } => label,
        })
        .collect())
}

// A non-zero `price` wins over the specific rate key; neither means zero
fn resolve_price(price: Option<u64>, specific: Option<u64>) -> u64 {
    price.filter(|p| *p > 0).or(specific).unwrap_or(0)
}

mod nightly_rate {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Written {
        price_per_night: u64,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Read {
        price: Option<u64>,
        price_per_night: Option<u64>,
    }

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        Written {
            price_per_night: *value,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let read = Read::deserialize(deserializer)?;
        Ok(super::resolve_price(read.price, read.price_per_night))
    }
}

mod per_person_rate {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};

    #[derive(Serialize)]
    #[serde(rename_all = "camelCase")]
    struct Written {
        price_per_person: u64,
    }

    #[derive(Deserialize)]
    #[serde(rename_all = "camelCase")]
    struct Read {
        price: Option<u64>,
        price_per_person: Option<u64>,
    }

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        Written {
            price_per_person: *value,
        }
        .serialize(serializer)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        let read = Read::deserialize(deserializer)?;
        Ok(super::resolve_price(read.price, read.price_per_person))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct StayLength {
    pub days: u32,
    pub nights: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Package {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default)]
    pub duration: StayLength,
    #[serde(flatten, with = "per_person_rate")]
    pub price_per_person: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review_count: Option<u32>,
    #[serde(rename = "theme", default)]
    pub themes: Vec<String>,
    #[serde(default)]
    pub inclusions: Vec<String>,
    #[serde(default)]
    pub highlights: Vec<String>,
    #[serde(default)]
    pub itinerary: Vec<ItineraryDay>,
}

// Both the short (`desc`) and long (`description`) day shapes collapse here
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ItineraryDay {
    pub day: u32,
    pub title: String,
    #[serde(alias = "desc", default)]
    pub description: String,
    #[serde(default)]
    pub activities: Vec<String>,
    #[serde(default)]
    pub meals: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub accommodation: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VisaRequirement {
    pub id: String,
    pub country: String,
    pub country_code: String,
    pub visa_type: String,
    pub processing_time: String,
    pub validity: String,
    pub price: u64,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default)]
    pub description: String,
}

// Guest form used by the unified hotel/flight/package wizard
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub zip_code: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_requests: Option<String>,
}

impl GuestDetails {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub enum Title {
    Mr,
    Ms,
    Mrs,
    Dr,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
    Other,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TravelerDetails {
    pub title: Title,
    pub first_name: String,
    pub last_name: String,
    pub date_of_birth: String,
    pub gender: Gender,
    pub nationality: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub passport_number: Option<String>,
}

impl TravelerDetails {
    pub fn display_name(&self) -> String {
        format!("{:?} {} {}", self.title, self.first_name, self.last_name)
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactDetails {
    pub email: String,
    pub phone: String,
    pub country_code: String,
    #[serde(default)]
    pub receive_updates: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FareBreakdown {
    pub base_fare: u64,
    pub taxes: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_selection: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baggage: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<u64>,
    pub total: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    Upi,
    #[default]
    Card,
    NetBanking,
    Wallet,
}

impl PaymentMethod {
    pub const ALL: [PaymentMethod; 4] = [
        PaymentMethod::Card,
        PaymentMethod::Upi,
        PaymentMethod::NetBanking,
        PaymentMethod::Wallet,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            PaymentMethod::Card => "Credit / Debit Card",
            PaymentMethod::Upi => "UPI",
            PaymentMethod::NetBanking => "Net Banking",
            PaymentMethod::Wallet => "Wallet",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingData {
    pub booking_id: String,
    pub flight: FlightOffer,
    pub travelers: Vec<TravelerDetails>,
    pub contact: ContactDetails,
    pub fare_breakdown: FareBreakdown,
    pub payment_method: PaymentMethod,
    pub payment_status: PaymentStatus,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BookingKind {
    Flight,
    Hotel,
    Package,
}

impl BookingKind {
    pub fn reference_prefix(&self) -> &'static str {
        match self {
            BookingKind::Flight => "FLT",
            BookingKind::Hotel => "HTL",
            BookingKind::Package => "PKG",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BookingKind::Flight => "Flight",
            BookingKind::Hotel => "Hotel",
            BookingKind::Package => "Package",
        }
    }
}

impl fmt::Display for BookingKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The item a booking session was opened for.
///
/// Visas go through the package flow and are priced per applicant.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", content = "item", rename_all = "lowercase")]
pub enum BookingItem {
    Flight(FlightOffer),
    Hotel(Hotel),
    Package(Package),
    Visa(VisaRequirement),
}

impl BookingItem {
    pub fn kind(&self) -> BookingKind {
        match self {
            BookingItem::Flight(_) => BookingKind::Flight,
            BookingItem::Hotel(_) => BookingKind::Hotel,
            BookingItem::Package(_) | BookingItem::Visa(_) => BookingKind::Package,
        }
    }

    pub fn id(&self) -> &str {
        match self {
            BookingItem::Flight(f) => &f.id,
            BookingItem::Hotel(h) => &h.id,
            BookingItem::Package(p) => &p.id,
            BookingItem::Visa(v) => &v.id,
        }
    }

    pub fn title(&self) -> String {
        match self {
            BookingItem::Flight(f) => f.route_title(),
            BookingItem::Hotel(h) => h.name.clone(),
            BookingItem::Package(p) => p.title.clone(),
            BookingItem::Visa(v) => format!("{} {}", v.country, v.visa_type),
        }
    }

    pub fn subtitle(&self) -> String {
        match self {
            BookingItem::Flight(f) => f.airline.clone(),
            BookingItem::Hotel(h) => h.location.clone(),
            BookingItem::Package(p) if p.duration.days > 0 && p.duration.nights > 0 => {
                format!("{} Days / {} Nights", p.duration.days, p.duration.nights)
            }
            BookingItem::Package(p) => p
                .destination
                .clone()
                .unwrap_or_else(|| "Travel Package".to_string()),
            BookingItem::Visa(v) => v.country.clone(),
        }
    }
}
