use chrono::NaiveDate;
use std::sync::Arc;
use std::time::Duration;
use suvidha_booking::planner::{interests, DONE_OPTION};
use suvidha_booking::{
    confirmation_document, is_booking_ref, itinerary_document, ticket_document, BookingConfig,
    BookingItem, BookingMetadata, BookingWizard, Catalog, CheckoutStep, ContactDetails,
    FlightCheckout, FlightFilter, FlightSort, GuestDetails, InventorySupplier, MockSupplier, Page,
    PaymentMethod, PlannerStep, ReferenceGenerator, SessionContext, TravelerDetails, TripPlanner,
    WizardStep,
};
use tokio::time::Instant;

fn guest() -> GuestDetails {
    GuestDetails {
        first_name: "Priya".to_string(),
        last_name: "Sharma".to_string(),
        email: "priya.sharma@example.com".to_string(),
        phone: "+91 91234 56789".to_string(),
        address: "22 Park Street".to_string(),
        city: "Kolkata".to_string(),
        zip_code: "700016".to_string(),
        special_requests: Some("Window seat".to_string()),
    }
}

#[tokio::test(start_paused = true)]
async fn test_flight_booking_end_to_end() {
    let config = BookingConfig::default();
    let catalog = Arc::new(Catalog::mock().unwrap());
    let supplier = MockSupplier::new(Arc::clone(&catalog), &config);

    let started = Instant::now();
    let results = supplier
        .search_flights(&FlightFilter::default(), FlightSort::Duration)
        .await
        .unwrap();
    let flight = results.items[0].clone();
    assert_eq!(flight.id, "6E-2045");

    let context = SessionContext::new();
    context.navigate(Page::Flights);
    let session = context.begin(BookingItem::Flight(flight), BookingMetadata::default());

    let mut wizard = BookingWizard::new(session, &config, Arc::new(ReferenceGenerator::default()));
    wizard.submit_details(guest()).unwrap();
    let confirmation = wizard.pay().await.unwrap();

    // search plus payment, all simulated
    assert!(started.elapsed() >= Duration::from_millis(4000));
    assert_eq!(wizard.step(), WizardStep::Confirmation);
    assert_eq!(confirmation.quote.base_price, 5499);
    assert_eq!(confirmation.quote.taxes, 660);
    assert_eq!(confirmation.quote.total, 6159);
    assert!(is_booking_ref(&confirmation.booking_ref));
    assert!(confirmation.booking_ref.starts_with("SE-FLT-"));

    let artifact = confirmation_document(&confirmation, &config.brand).unwrap();
    let html = artifact.as_str();
    assert_eq!(
        artifact.filename,
        format!("Booking-Confirmation-{}.html", confirmation.booking_ref)
    );
    assert!(html.contains("6,159"));
    assert!(html.contains(&confirmation.booking_ref));
    assert!(html.contains("Window seat"));

    // leaving the confirmation page drops the session
    context.navigate(Page::Home);
    assert!(context.current().is_none());
}

#[tokio::test]
async fn test_hotel_stay_is_priced_per_night_and_room() {
    let config = BookingConfig::instant();
    let catalog = Catalog::mock().unwrap();
    let context = SessionContext::new();

    let session = context.begin(
        BookingItem::Hotel(catalog.hotel("1").unwrap().clone()),
        BookingMetadata {
            check_in: NaiveDate::from_ymd_opt(2025, 3, 10),
            check_out: NaiveDate::from_ymd_opt(2025, 3, 12),
            rooms: Some(2),
            ..Default::default()
        },
    );
    let mut wizard = BookingWizard::new(session, &config, Arc::new(ReferenceGenerator::default()));

    let quote = wizard.quote();
    assert_eq!(quote.base_price, 60000);
    assert_eq!(quote.taxes, 7200);
    assert_eq!(quote.label, "2 Nights × 2 Rooms");

    wizard.submit_details(guest()).unwrap();
    let confirmation = wizard.pay().await.unwrap();
    assert!(confirmation.booking_ref.starts_with("SE-HTL-"));
    assert_eq!(confirmation.item_title, "The Taj Mahal Palace");
}

#[tokio::test]
async fn test_package_and_visa_share_the_package_prefix() {
    let config = BookingConfig::instant();
    let catalog = Catalog::mock().unwrap();
    let references = Arc::new(ReferenceGenerator::default());
    let metadata = BookingMetadata {
        guests: Some(2),
        ..Default::default()
    };

    let items = [
        BookingItem::Package(catalog.package("2").unwrap().clone()),
        BookingItem::Visa(catalog.visa("3").unwrap().clone()),
    ];
    let mut issued = Vec::new();
    for item in items {
        let context = SessionContext::new();
        let session = context.begin(item, metadata.clone());
        let mut wizard = BookingWizard::new(session, &config, Arc::clone(&references));
        wizard.submit_details(guest()).unwrap();
        issued.push(wizard.pay().await.unwrap());
    }

    assert!(issued.iter().all(|c| c.booking_ref.starts_with("SE-PKG-")));
    assert_ne!(issued[0].booking_ref, issued[1].booking_ref);
    assert_eq!(issued[0].quote.base_price, 56000);
    assert_eq!(issued[1].quote.base_price, 19000);
    assert_eq!(issued[1].quote.taxes, 950);
}

#[tokio::test]
async fn test_flight_checkout_issues_ticket() {
    let config = BookingConfig::instant();
    let catalog = Catalog::mock().unwrap();
    let mut checkout = FlightCheckout::new(
        catalog.flight("UK-911").unwrap().clone(),
        1,
        &config,
        Arc::new(ReferenceGenerator::default()),
    );

    checkout.continue_review().unwrap();
    let traveler: TravelerDetails = serde_json::from_str(
        r#"{ "title": "Ms", "firstName": "Priya", "lastName": "Sharma",
             "dateOfBirth": "1992-07-21", "gender": "female", "nationality": "Indian" }"#,
    )
    .unwrap();
    let contact = ContactDetails {
        email: "priya.sharma@example.com".to_string(),
        phone: "9123456789".to_string(),
        country_code: "+91".to_string(),
        receive_updates: false,
    };
    checkout.submit_travelers(vec![traveler], contact).unwrap();
    let booking = checkout.pay(PaymentMethod::Card).await.unwrap();

    assert_eq!(checkout.step(), CheckoutStep::Confirmed);
    assert!(booking.booking_id.starts_with("SE"));
    assert_eq!(booking.booking_id.len(), 11);

    let ticket = ticket_document(&booking, &config.brand).unwrap();
    assert_eq!(ticket.filename, format!("E-Ticket-{}.html", booking.booking_id));
    assert!(ticket.as_str().contains("Ms Priya Sharma"));
    assert!(ticket.as_str().contains("6,299"));
}

#[tokio::test]
async fn test_trip_planner_export() {
    let config = BookingConfig::instant();
    let mut planner = TripPlanner::new(&config);
    planner.start();

    for chip in ["Plan a trip to Bali", "1 week", "Mid-range (₹40k-80k)", "Family (3-4)"] {
        planner.quick_reply(chip).await.unwrap();
    }
    planner.quick_reply(interests()[1]).await.unwrap();
    planner.quick_reply(DONE_OPTION).await.unwrap();
    assert_eq!(planner.step(), PlannerStep::Complete);

    let plan = planner.plan().unwrap();
    // "1 week" reads as one day
    assert_eq!(plan.days.len(), 1);

    let artifact = itinerary_document(
        plan,
        &config.brand,
        NaiveDate::from_ymd_opt(2025, 5, 1).unwrap(),
    )
    .unwrap();
    assert_eq!(artifact.filename, "Bali-Itinerary-SuvidhaEscapes.html");
    assert!(artifact.as_str().contains("Day 1 - Arrival &amp; Bali Welcome"));
}
