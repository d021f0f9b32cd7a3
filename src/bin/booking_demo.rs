// Walks one flight booking from search to the downloadable confirmation
use anyhow::{Context, Result};
use std::path::PathBuf;
use std::sync::Arc;
use suvidha_booking::{
    confirmation_document, format_inr, BookingConfig, BookingItem, BookingMetadata, BookingWizard,
    Catalog, FlightFilter, FlightSort, GuestDetails, InventorySupplier, MockSupplier, Page,
    PaymentMethod, ReferenceGenerator, SessionContext,
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = BookingConfig::load().context("loading booking configuration")?;
    let catalog = Arc::new(Catalog::mock().context("loading bundled catalog")?);
    let supplier = MockSupplier::new(Arc::clone(&catalog), &config);

    let results = supplier
        .search_flights(&FlightFilter::default(), FlightSort::Duration)
        .await?;
    let flight = results
        .items
        .first()
        .cloned()
        .context("no flights in the catalog")?;
    println!(
        "Found {} flights in {} ms, fastest {} at ₹{}",
        results.len(),
        results.elapsed_ms,
        flight.id,
        format_inr(flight.price)
    );

    let context = SessionContext::new();
    context.navigate(Page::Flights);
    let session = context.begin(BookingItem::Flight(flight), BookingMetadata::default());

    let references = Arc::new(ReferenceGenerator::default());
    let mut wizard = BookingWizard::new(session, &config, references);
    wizard.submit_details(GuestDetails {
        first_name: "Rahul".to_string(),
        last_name: "Mehta".to_string(),
        email: "rahul.mehta@example.com".to_string(),
        phone: "+91 98765 43210".to_string(),
        address: "4 MG Road".to_string(),
        city: "Bengaluru".to_string(),
        zip_code: "560001".to_string(),
        special_requests: None,
    })?;
    wizard.select_payment_method(PaymentMethod::Upi)?;
    let confirmation = wizard.pay().await?;
    println!(
        "Confirmed {} for ₹{}",
        confirmation.booking_ref,
        format_inr(confirmation.quote.total)
    );

    let artifact = confirmation_document(&confirmation, &config.brand)?;
    let path = PathBuf::from(&artifact.filename);
    std::fs::write(&path, &artifact.body)
        .with_context(|| format!("writing {}", path.display()))?;
    println!("Saved {}", path.display());

    context.navigate(Page::Home);
    Ok(())
}
