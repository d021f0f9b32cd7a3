// Booking core for the Suvidha Escapes storefront

pub mod catalog;
pub mod checkout;
pub mod config;
pub mod document;
pub mod models;
pub mod planner;
pub mod pricing;
pub mod reference;
pub mod search;
pub mod session;
pub mod supplier;
pub mod validation;
pub mod wizard;

// Re-export key types for convenience
pub use catalog::{Catalog, CatalogError};
pub use checkout::{CheckoutError, CheckoutStep, FlightCheckout};
pub use config::{BookingConfig, BrandConfig, ConfigError, TaxRates};
pub use document::{
    confirmation_document, itinerary_document, ticket_document, DocumentError, DownloadArtifact,
};
pub use models::{
    BookingData, BookingItem, BookingKind, ContactDetails, FareBreakdown, FlightOffer,
    GuestDetails, Hotel, Package, PaymentMethod, PaymentStatus, TravelerDetails, VisaRequirement,
};
pub use planner::{ChatMessage, PlannerError, PlannerStep, TripPlan, TripPlanner};
pub use pricing::{format_inr, PriceQuote, PricingCalculator};
pub use reference::{is_booking_ref, Clock, FixedClock, ReferenceGenerator, SystemClock};
pub use search::{FlightFilter, FlightSort, HotelFilter, HotelSort, StopFilter};
pub use session::{BookingMetadata, BookingSession, Page, SessionContext};
pub use supplier::{InventorySupplier, MockSupplier, SearchResults, SupplierError};
pub use validation::ValidationErrors;
pub use wizard::{BookingWizard, Confirmation, WizardError, WizardStep};
