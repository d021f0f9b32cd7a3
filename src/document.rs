// Downloadable HTML documents: booking confirmation, e-ticket, trip itinerary
use crate::config::BrandConfig;
use crate::models::BookingData;
use crate::planner::TripPlan;
use crate::pricing::format_inr;
use crate::wizard::Confirmation;
use bytes::Bytes;
use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::writer::Writer;
use regex::Regex;
use thiserror::Error;

pub const HTML_CONTENT_TYPE: &str = "text/html";

static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid whitespace pattern"));
static UNSAFE_FILENAME_CHARS: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^\w.-]").expect("valid filename pattern"));

const STYLE: &str = "
    body { font-family: Arial, sans-serif; max-width: 800px; margin: 0 auto; padding: 40px; color: #1f2937; }
    .header { text-align: center; border-bottom: 4px solid #667eea; padding-bottom: 24px; margin-bottom: 32px; }
    .logo { font-size: 32px; font-weight: bold; color: #667eea; }
    .confirmed { text-align: center; color: #16a34a; font-size: 24px; font-weight: bold; }
    .booking-ref { font-size: 28px; font-weight: bold; color: #7c3aed; text-align: center; }
    .section { margin: 24px 0; padding: 20px; background: #f9fafb; border-radius: 12px; }
    .section-title { font-size: 18px; font-weight: bold; margin-bottom: 12px; }
    .detail-row { display: flex; justify-content: space-between; padding: 6px 0; }
    .label { color: #6b7280; }
    .value { font-weight: 600; }
    .total { color: #7c3aed; font-size: 20px; }
    .footer { text-align: center; color: #6b7280; margin-top: 40px; font-size: 14px; }
";

#[derive(Error, Debug)]
pub enum DocumentError {
    #[error("Failed to write document: {0}")]
    Write(String),
}

/// A generated file, ready to hand to the browser as a download.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadArtifact {
    pub filename: String,
    pub content_type: &'static str,
    pub body: Bytes,
}

impl DownloadArtifact {
    fn html(filename: String, body: Vec<u8>) -> Self {
        Self {
            filename,
            content_type: HTML_CONTENT_TYPE,
            body: Bytes::from(body),
        }
    }

    pub fn as_str(&self) -> &str {
        std::str::from_utf8(&self.body).unwrap_or_default()
    }
}

// Thin layer over the quick-xml writer; text and attribute values are escaped by it
struct HtmlWriter {
    writer: Writer<Vec<u8>>,
}

impl HtmlWriter {
    fn begin(title: &str) -> Result<Self, DocumentError> {
        let mut html = Self {
            writer: Writer::new_with_indent(Vec::new(), b' ', 2),
        };
        html.event(Event::DocType(BytesText::from_escaped("html")))?;
        html.open("html", None)?;
        html.open("head", None)?;
        html.event(Event::Empty(BytesStart::new("meta").with_attributes([("charset", "UTF-8")])))?;
        html.element("title", None, title)?;
        html.open("style", None)?;
        html.event(Event::Text(BytesText::from_escaped(STYLE)))?;
        html.close("style")?;
        html.close("head")?;
        html.open("body", None)?;
        Ok(html)
    }

    fn event(&mut self, event: Event<'_>) -> Result<(), DocumentError> {
        self.writer
            .write_event(event)
            .map_err(|e| DocumentError::Write(e.to_string()))
    }

    fn open(&mut self, tag: &str, class: Option<&str>) -> Result<(), DocumentError> {
        let mut start = BytesStart::new(tag);
        if let Some(class) = class {
            start.push_attribute(("class", class));
        }
        self.event(Event::Start(start))
    }

    fn close(&mut self, tag: &str) -> Result<(), DocumentError> {
        self.event(Event::End(BytesEnd::new(tag)))
    }

    fn element(&mut self, tag: &str, class: Option<&str>, text: &str) -> Result<(), DocumentError> {
        self.open(tag, class)?;
        self.event(Event::Text(BytesText::new(text)))?;
        self.close(tag)
    }

    fn div(&mut self, class: &str, text: &str) -> Result<(), DocumentError> {
        self.element("div", Some(class), text)
    }

    fn detail_row(&mut self, label: &str, value: &str) -> Result<(), DocumentError> {
        self.open("div", Some("detail-row"))?;
        self.element("span", Some("label"), label)?;
        self.element("span", Some("value"), value)?;
        self.close("div")
    }

    fn section_start(&mut self, title: &str) -> Result<(), DocumentError> {
        self.open("div", Some("section"))?;
        self.div("section-title", title)
    }

    fn brand_header(&mut self, brand: &BrandConfig, logo: &str) -> Result<(), DocumentError> {
        self.open("div", Some("header"))?;
        self.div("logo", logo)?;
        self.div("tagline", &brand.tagline)?;
        self.close("div")
    }

    fn support(&mut self, brand: &BrandConfig) -> Result<(), DocumentError> {
        self.section_start("Need Assistance?")?;
        self.element("p", None, &format!("📧 Email: {}", brand.support_email))?;
        self.element("p", None, &format!("📞 Phone: {}", brand.support_phone))?;
        self.element("p", None, "🕐 Available: 24/7")?;
        self.close("div")
    }

    fn finish(mut self) -> Result<Vec<u8>, DocumentError> {
        self.close("body")?;
        self.close("html")?;
        Ok(self.writer.into_inner())
    }
}

fn money(brand: &BrandConfig, amount: u64) -> String {
    format!("{}{}", brand.currency_symbol, format_inr(amount))
}

fn footer(html: &mut HtmlWriter, brand: &BrandConfig, year: i32) -> Result<(), DocumentError> {
    html.open("div", Some("footer"))?;
    html.open("p", None)?;
    html.element("strong", None, &brand.name)?;
    html.close("p")?;
    html.element("p", None, "Making your travel dreams come true")?;
    html.element("p", None, &format!("© {} {}. All rights reserved.", year, brand.name))?;
    html.close("div")
}

// Keeps file names to word characters, dots and dashes
fn safe_filename(stem: &str) -> String {
    let dashed = WHITESPACE.replace_all(stem.trim(), "-");
    UNSAFE_FILENAME_CHARS.replace_all(&dashed, "").into_owned()
}

/// The booking confirmation offered from the wizard's last step.
pub fn confirmation_document(
    confirmation: &Confirmation,
    brand: &BrandConfig,
) -> Result<DownloadArtifact, DocumentError> {
    let guest = &confirmation.guest;
    let quote = &confirmation.quote;

    let mut html = HtmlWriter::begin(&format!(
        "Booking Confirmation - {}",
        confirmation.booking_ref
    ))?;
    html.brand_header(brand, &brand.name)?;
    html.div("confirmed", "✓ Booking Confirmed!")?;

    html.open("div", Some("reference"))?;
    html.div("label", "Booking Reference")?;
    html.div("booking-ref", &confirmation.booking_ref)?;
    html.close("div")?;

    html.section_start("Booking Details")?;
    html.detail_row(confirmation.kind.label(), &confirmation.item_title)?;
    html.detail_row("Details", &confirmation.item_subtitle)?;
    html.close("div")?;

    html.section_start("Guest Information")?;
    html.detail_row("Name", &guest.full_name())?;
    html.detail_row("Email", &guest.email)?;
    html.detail_row("Phone", &guest.phone)?;
    html.detail_row(
        "Address",
        &format!("{}, {} - {}", guest.address, guest.city, guest.zip_code),
    )?;
    if let Some(requests) = guest.special_requests.as_deref().filter(|r| !r.trim().is_empty()) {
        html.detail_row("Special Requests", requests)?;
    }
    html.close("div")?;

    html.section_start("Payment Summary")?;
    html.detail_row(&quote.label, &money(brand, quote.base_price))?;
    html.detail_row("Taxes & Fees", &money(brand, quote.taxes))?;
    html.detail_row("Payment Method", confirmation.payment_method.label())?;
    html.open("div", Some("detail-row"))?;
    html.element("span", Some("label"), "Total Amount Paid")?;
    html.element("span", Some("value total"), &money(brand, quote.total))?;
    html.close("div")?;
    html.close("div")?;

    html.support(brand)?;
    footer(&mut html, brand, confirmation.confirmed_at.year())?;

    let artifact = DownloadArtifact::html(
        format!("Booking-Confirmation-{}.html", safe_filename(&confirmation.booking_ref)),
        html.finish()?,
    );
    tracing::debug!(file = %artifact.filename, bytes = artifact.body.len(), "confirmation document");
    Ok(artifact)
}

/// E-ticket for a completed flight checkout.
pub fn ticket_document(
    booking: &BookingData,
    brand: &BrandConfig,
) -> Result<DownloadArtifact, DocumentError> {
    let flight = &booking.flight;
    let fare = &booking.fare_breakdown;

    let mut html = HtmlWriter::begin(&format!("E-Ticket - {}", booking.booking_id))?;
    html.brand_header(brand, &brand.name)?;
    html.div("confirmed", "✓ E-Ticket")?;

    html.open("div", Some("reference"))?;
    html.div("label", "Booking ID")?;
    html.div("booking-ref", &booking.booking_id)?;
    html.close("div")?;

    html.section_start("Flight")?;
    html.detail_row(&flight.airline, &flight.route_title())?;
    for segment in &flight.segments {
        html.detail_row(
            &format!("{} · {}", segment.flight_number, segment.cabin),
            &format!(
                "{} {} → {} {}",
                segment.from,
                segment.departure.format("%d %b %Y, %H:%M"),
                segment.to,
                segment.arrival.format("%d %b %Y, %H:%M"),
            ),
        )?;
    }
    html.detail_row(
        "Baggage",
        &format!("Cabin {} · Check-in {}", flight.baggage.cabin, flight.baggage.checked),
    )?;
    html.close("div")?;

    html.section_start("Travelers")?;
    for traveler in &booking.travelers {
        html.detail_row(
            &traveler.display_name(),
            &format!("{} · {}", traveler.date_of_birth, traveler.nationality),
        )?;
    }
    let contact = &booking.contact;
    html.detail_row(
        "Contact",
        &format!("{} · {} {}", contact.email, contact.country_code, contact.phone),
    )?;
    html.close("div")?;

    html.section_start("Fare Summary")?;
    html.detail_row("Base Fare", &money(brand, fare.base_fare))?;
    html.detail_row("Taxes & Fees", &money(brand, fare.taxes))?;
    html.detail_row("Payment Method", booking.payment_method.label())?;
    html.open("div", Some("detail-row"))?;
    html.element("span", Some("label"), "Total Amount Paid")?;
    html.element("span", Some("value total"), &money(brand, fare.total))?;
    html.close("div")?;
    html.close("div")?;

    html.support(brand)?;
    footer(&mut html, brand, booking.created_at.year())?;

    Ok(DownloadArtifact::html(
        format!("E-Ticket-{}.html", safe_filename(&booking.booking_id)),
        html.finish()?,
    ))
}

/// Export of a generated trip plan.
pub fn itinerary_document(
    plan: &TripPlan,
    brand: &BrandConfig,
    generated_on: NaiveDate,
) -> Result<DownloadArtifact, DocumentError> {
    let prefs = &plan.preferences;
    let destination = plan.destination();
    let duration = prefs.duration.as_deref().unwrap_or_default();

    let mut html = HtmlWriter::begin(&format!("{} Itinerary - {}", destination, brand.name))?;
    html.brand_header(brand, &format!("✈️ {}", brand.name.to_uppercase()))?;
    html.div("title", "Your Personalized Travel Itinerary")?;
    html.div("subtitle", &format!("{} • {}", destination, duration))?;

    html.section_start("Trip Details")?;
    html.detail_row("📍 Destination", destination)?;
    html.detail_row("⏱️ Duration", duration)?;
    html.detail_row("💰 Budget", prefs.budget.as_deref().unwrap_or_default())?;
    html.detail_row("👥 Travelers", prefs.travelers.as_deref().unwrap_or_default())?;
    html.detail_row("❤️ Interests", &prefs.interests.join(", "))?;
    html.close("div")?;

    for day in &plan.days {
        html.section_start(&day.title)?;
        for activity in &day.activities {
            html.open("div", Some("activity"))?;
            html.div("activity-time", &format!("🕐 {}", activity.time))?;
            html.div("activity-title", &activity.title)?;
            html.div("activity-description", &activity.description)?;
            html.div("activity-duration", &format!("Duration: {}", activity.duration))?;
            html.close("div")?;
        }
        html.close("div")?;
    }

    html.open("div", Some("footer"))?;
    html.div("footer-logo", &brand.name.to_uppercase())?;
    html.element("p", None, &format!("Thank you for choosing {}!", brand.name))?;
    html.element(
        "p",
        None,
        &format!("Generated on {}", generated_on.format("%B %-d, %Y")),
    )?;
    html.element(
        "p",
        None,
        &format!("📧 {} | 📞 {}", brand.support_email, brand.support_phone),
    )?;
    html.close("div")?;

    let brand_stem: String = brand.name.split_whitespace().collect();
    Ok(DownloadArtifact::html(
        format!(
            "{}-Itinerary-{}.html",
            safe_filename(destination),
            safe_filename(&brand_stem)
        ),
        html.finish()?,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::{
        BookingKind, ContactDetails, FareBreakdown, Gender, GuestDetails, PaymentMethod,
        PaymentStatus, Title, TravelerDetails,
    };
    use crate::planner::{build_plan, TripPreferences};
    use crate::pricing::PriceQuote;
    use chrono::{TimeZone, Utc};
    use quick_xml::reader::Reader;

    fn confirmation(guest_name: &str) -> Confirmation {
        Confirmation {
            booking_ref: "SE-FLT-LREJL98G".to_string(),
            kind: BookingKind::Flight,
            item_title: "DEL → BOM".to_string(),
            item_subtitle: "IndiGo".to_string(),
            guest: GuestDetails {
                first_name: guest_name.to_string(),
                last_name: "Mehta".to_string(),
                email: "rahul.mehta@example.com".to_string(),
                phone: "9876543210".to_string(),
                address: "4 MG Road".to_string(),
                city: "Bengaluru".to_string(),
                zip_code: "560001".to_string(),
                special_requests: None,
            },
            quote: PriceQuote {
                base_price: 5499,
                taxes: 660,
                total: 6159,
                label: "Flight Fare".to_string(),
            },
            payment_method: PaymentMethod::Card,
            confirmed_at: Utc.with_ymd_and_hms(2025, 1, 15, 10, 0, 0).unwrap(),
        }
    }

    // Text of every element carrying the given class, in document order
    fn texts_by_class(html: &str, class: &str) -> Vec<String> {
        let mut reader = Reader::from_str(html);
        reader.config_mut().trim_text(true);
        let mut found = Vec::new();
        loop {
            match reader.read_event() {
                Ok(Event::Start(e)) => {
                    let matches = e
                        .try_get_attribute("class")
                        .ok()
                        .flatten()
                        .map(|a| a.unescape_value().unwrap().split(' ').any(|c| c == class))
                        .unwrap_or(false);
                    if matches {
                        let raw = format!("{}", reader.read_text(e.name()).unwrap());
                        found.push(quick_xml::escape::unescape(raw.trim()).unwrap().into_owned());
                    }
                }
                Ok(Event::Eof) => break,
                Err(e) => panic!("malformed document at {}: {:?}", reader.error_position(), e),
                _ => (),
            }
        }
        found
    }

    #[test]
    fn test_confirmation_document() {
        let artifact = confirmation_document(&confirmation("Rahul"), &BrandConfig::default()).unwrap();
        let html = artifact.as_str();

        assert_eq!(artifact.filename, "Booking-Confirmation-SE-FLT-LREJL98G.html");
        assert_eq!(artifact.content_type, "text/html");
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(texts_by_class(html, "booking-ref"), vec!["SE-FLT-LREJL98G"]);
        assert_eq!(texts_by_class(html, "total"), vec!["₹6,159"]);
        assert!(html.contains("✓ Booking Confirmed!"));
        assert!(html.contains("Rahul Mehta"));
        assert!(html.contains("support@suvidhaescapes.com"));
        assert!(html.contains("© 2025 Suvidha Escapes"));
    }

    #[test]
    fn test_user_text_is_escaped() {
        let artifact = confirmation_document(
            &confirmation("<script>alert(1)</script>"),
            &BrandConfig::default(),
        )
        .unwrap();
        let html = artifact.as_str();

        assert!(!html.contains("<script>"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn test_ticket_document() {
        let catalog = Catalog::mock().unwrap();
        let flight = catalog.flight("AI-804").unwrap().clone();
        let booking = BookingData {
            booking_id: "SE300000000".to_string(),
            fare_breakdown: FareBreakdown::for_flight(&flight),
            flight,
            travelers: vec![TravelerDetails {
                title: Title::Dr,
                first_name: "Meera".to_string(),
                last_name: "Nair".to_string(),
                date_of_birth: "1985-06-30".to_string(),
                gender: Gender::Female,
                nationality: "Indian".to_string(),
                passport_number: None,
            }],
            contact: ContactDetails {
                email: "meera@example.com".to_string(),
                phone: "9988776655".to_string(),
                country_code: "+91".to_string(),
                receive_updates: true,
            },
            payment_method: PaymentMethod::Upi,
            payment_status: PaymentStatus::Completed,
            created_at: Utc.with_ymd_and_hms(2024, 1, 10, 9, 0, 0).unwrap(),
        };

        let artifact = ticket_document(&booking, &BrandConfig::default()).unwrap();
        let html = artifact.as_str();

        assert_eq!(artifact.filename, "E-Ticket-SE300000000.html");
        assert!(html.contains("AI-805"));
        assert!(html.contains("Dr Meera Nair"));
        assert_eq!(texts_by_class(html, "total"), vec!["₹4,899"]);
    }

    #[test]
    fn test_itinerary_document() {
        let plan = build_plan(&TripPreferences {
            destination: Some("Goa Beaches".to_string()),
            duration: Some("3-4 days".to_string()),
            budget: Some("Budget (₹20k-40k)".to_string()),
            travelers: Some("Solo".to_string()),
            interests: vec!["Food".to_string()],
        });
        let generated_on = NaiveDate::from_ymd_opt(2025, 2, 3).unwrap();

        let artifact = itinerary_document(&plan, &BrandConfig::default(), generated_on).unwrap();
        let html = artifact.as_str();

        assert_eq!(artifact.filename, "Goa-Beaches-Itinerary-SuvidhaEscapes.html");
        assert_eq!(texts_by_class(html, "activity").len(), 12);
        assert_eq!(texts_by_class(html, "activity-title")[0], "Airport Pickup & Hotel Check-in");
        assert!(html.contains("Generated on February 3, 2025"));
    }

    #[test]
    fn test_filenames_drop_path_characters() {
        assert_eq!(safe_filename("../etc/passwd"), "..etcpasswd");
        assert_eq!(safe_filename("  New   Delhi "), "New-Delhi");
    }
}
