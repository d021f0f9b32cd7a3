// Pricing calculator: base price, flat tax and total per booking kind
use crate::config::TaxRates;
use crate::models::{BookingItem, FareBreakdown, FlightOffer, VisaRequirement};
use crate::session::BookingMetadata;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PriceQuote {
    pub base_price: u64,
    pub taxes: u64,
    pub total: u64,
    pub label: String,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct PricingCalculator {
    rates: TaxRates,
}

impl PricingCalculator {
    pub fn new(rates: TaxRates) -> Self {
        Self { rates }
    }

    pub fn rates(&self) -> TaxRates {
        self.rates
    }

    /// Quote for a session item. Counts of zero fall back to one, and hotel
    /// stays shorter than a night are billed as one night.
    pub fn quote(&self, item: &BookingItem, metadata: &BookingMetadata) -> PriceQuote {
        let (base_price, rate, label) = match item {
            BookingItem::Flight(flight) => {
                let passengers = at_least_one(metadata.passengers);
                (
                    flight.price.saturating_mul(passengers as u64),
                    self.rates.flight,
                    "Flight Fare".to_string(),
                )
            }
            BookingItem::Hotel(hotel) => {
                let rooms = at_least_one(metadata.rooms);
                let nights = nights_between(metadata.check_in, metadata.check_out);
                (
                    hotel
                        .price_per_night
                        .saturating_mul(nights as u64)
                        .saturating_mul(rooms as u64),
                    self.rates.hotel,
                    format!("{} × {}", plural(nights, "Night"), plural(rooms, "Room")),
                )
            }
            BookingItem::Package(package) => {
                let guests = at_least_one(metadata.guests);
                (
                    package.price_per_person.saturating_mul(guests as u64),
                    self.rates.package,
                    plural(guests, "Traveler"),
                )
            }
            BookingItem::Visa(visa) => {
                let guests = at_least_one(metadata.guests);
                (
                    visa.price.saturating_mul(guests as u64),
                    self.rates.package,
                    plural(guests, "Traveler"),
                )
            }
        };

        let taxes = apply_rate(base_price, rate);
        let quote = PriceQuote {
            base_price,
            taxes,
            total: base_price.saturating_add(taxes),
            label,
        };
        tracing::debug!(item = item.id(), kind = %item.kind(), total = quote.total, "priced booking");
        quote
    }
}

fn at_least_one(count: Option<u32>) -> u32 {
    count.filter(|c| *c > 0).unwrap_or(1)
}

fn plural(count: u32, noun: &str) -> String {
    if count > 1 {
        format!("{} {}s", count, noun)
    } else {
        format!("{} {}", count, noun)
    }
}

// Rounded to whole rupees, half away from zero
fn apply_rate(base: u64, rate: f64) -> u64 {
    (base as f64 * rate).round() as u64
}

/// Nights billed for a stay: whole days between the dates, never below one.
/// Missing dates and reversed ranges also bill a single night.
pub fn nights_between(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> u32 {
    match (check_in, check_out) {
        (Some(check_in), Some(check_out)) => {
            let days = (check_out - check_in).num_days();
            days.max(1) as u32
        }
        _ => 1,
    }
}

// Guard used before offering a hotel booking
pub fn stay_is_valid(check_in: Option<NaiveDate>, check_out: Option<NaiveDate>) -> bool {
    matches!((check_in, check_out), (Some(i), Some(o)) if o > i)
}

impl FareBreakdown {
    /// Itemized fare shown during flight checkout: the ticket price split
    /// 75/25 into fare and taxes, each floored. The total stays the ticket
    /// price even when flooring drops a rupee from the parts.
    pub fn for_flight(flight: &FlightOffer) -> Self {
        Self {
            base_fare: flight.price * 3 / 4,
            taxes: flight.price / 4,
            seat_selection: Some(0),
            baggage: Some(0),
            discount: Some(0),
            total: flight.price,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeeLine {
    pub label: &'static str,
    pub amount: f64,
}

// Embassy/service/processing split shown on the visa detail page
pub fn visa_fee_breakdown(visa: &VisaRequirement) -> Vec<FeeLine> {
    let price = visa.price as f64;
    vec![
        FeeLine {
            label: "Embassy Fee",
            amount: price * 0.7,
        },
        FeeLine {
            label: "Service Charge",
            amount: price * 0.2,
        },
        FeeLine {
            label: "Processing Fee",
            amount: price * 0.1,
        },
    ]
}

/// Formats rupees with Indian digit grouping, e.g. `1,23,456`.
pub fn format_inr(amount: u64) -> String {
    let digits = amount.to_string();
    if digits.len() <= 3 {
        return digits;
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();
    format!("{},{}", groups.join(","), tail)
}
