// Three-step booking wizard shared by hotels, flights and packages
use crate::config::BookingConfig;
use crate::models::{BookingKind, GuestDetails, PaymentMethod};
use crate::pricing::{PriceQuote, PricingCalculator};
use crate::reference::ReferenceGenerator;
use crate::session::BookingSession;
use crate::validation::{validate_guest, ValidationErrors};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum WizardStep {
    Details,
    Payment,
    Confirmation,
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WizardStep::Details => "details",
            WizardStep::Payment => "payment",
            WizardStep::Confirmation => "confirmation",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum WizardError {
    #[error("Cannot {action} from the {from} step")]
    InvalidTransition {
        from: WizardStep,
        action: &'static str,
    },

    #[error(transparent)]
    Validation(#[from] ValidationErrors),
}

// Everything the confirmation page and its download need
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Confirmation {
    pub booking_ref: String,
    pub kind: BookingKind,
    pub item_title: String,
    pub item_subtitle: String,
    pub guest: GuestDetails,
    pub quote: PriceQuote,
    pub payment_method: PaymentMethod,
    pub confirmed_at: DateTime<Utc>,
}

/// Drives one booking session from guest details to a confirmed reference.
///
/// Steps only move `Details -> Payment -> Confirmation`, with a single way
/// back from payment to details. Guest details survive going back.
pub struct BookingWizard {
    session: BookingSession,
    pricing: PricingCalculator,
    references: Arc<ReferenceGenerator>,
    payment_latency: Duration,
    step: WizardStep,
    guest: Option<GuestDetails>,
    payment_method: PaymentMethod,
    confirmation: Option<Confirmation>,
}

impl BookingWizard {
    pub fn new(
        session: BookingSession,
        config: &BookingConfig,
        references: Arc<ReferenceGenerator>,
    ) -> Self {
        Self {
            session,
            pricing: PricingCalculator::new(config.tax_rates),
            references,
            payment_latency: config.payment_latency(),
            step: WizardStep::Details,
            guest: None,
            payment_method: PaymentMethod::default(),
            confirmation: None,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn session(&self) -> &BookingSession {
        &self.session
    }

    pub fn guest(&self) -> Option<&GuestDetails> {
        self.guest.as_ref()
    }

    pub fn payment_method(&self) -> PaymentMethod {
        self.payment_method
    }

    pub fn quote(&self) -> PriceQuote {
        self.pricing.quote(&self.session.item, &self.session.metadata)
    }

    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    fn expect_step(&self, expected: WizardStep, action: &'static str) -> Result<(), WizardError> {
        if self.step == expected {
            return Ok(());
        }
        tracing::warn!(from = %self.step, action, "rejected wizard transition");
        Err(WizardError::InvalidTransition {
            from: self.step,
            action,
        })
    }

    fn advance(&mut self, to: WizardStep) {
        tracing::info!(from = %self.step, to = %to, kind = %self.session.kind(), "wizard step");
        self.step = to;
    }

    /// Validates the guest form and moves on to payment. On failure the
    /// wizard stays on the details step and reports every bad field.
    pub fn submit_details(&mut self, guest: GuestDetails) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Details, "submit details")?;
        validate_guest(&guest)?;
        self.guest = Some(guest);
        self.advance(WizardStep::Payment);
        Ok(())
    }

    pub fn back(&mut self) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Payment, "go back")?;
        self.advance(WizardStep::Details);
        Ok(())
    }

    pub fn select_payment_method(&mut self, method: PaymentMethod) -> Result<(), WizardError> {
        self.expect_step(WizardStep::Payment, "select a payment method")?;
        self.payment_method = method;
        Ok(())
    }

    /// Simulates the payment round trip, then issues the booking reference.
    /// No money moves and the payment never fails.
    pub async fn pay(&mut self) -> Result<Confirmation, WizardError> {
        self.expect_step(WizardStep::Payment, "pay")?;
        let guest = match &self.guest {
            Some(guest) => guest.clone(),
            None => {
                return Err(WizardError::InvalidTransition {
                    from: self.step,
                    action: "pay",
                })
            }
        };

        tokio::time::sleep(self.payment_latency).await;

        let kind = self.session.kind();
        let confirmation = Confirmation {
            booking_ref: self.references.booking_ref(kind),
            kind,
            item_title: self.session.item.title(),
            item_subtitle: self.session.item.subtitle(),
            guest,
            quote: self.quote(),
            payment_method: self.payment_method,
            confirmed_at: self.references.now(),
        };
        tracing::info!(
            booking_ref = %confirmation.booking_ref,
            total = confirmation.quote.total,
            "booking confirmed"
        );

        self.advance(WizardStep::Confirmation);
        self.confirmation = Some(confirmation.clone());
        Ok(confirmation)
    }

    // "Back to home": ends the wizard, handing back the confirmation if any
    pub fn finish(self) -> Option<Confirmation> {
        self.confirmation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::models::BookingItem;
    use crate::reference::{is_booking_ref, FixedClock};
    use crate::session::BookingMetadata;
    use chrono::TimeZone;
    use tokio::time::Instant;

    fn guest() -> GuestDetails {
        GuestDetails {
            first_name: "Rahul".to_string(),
            last_name: "Mehta".to_string(),
            email: "rahul.mehta@example.com".to_string(),
            phone: "9876543210".to_string(),
            address: "4 MG Road".to_string(),
            city: "Bengaluru".to_string(),
            zip_code: "560001".to_string(),
            special_requests: None,
        }
    }

    fn flight_wizard(config: &BookingConfig) -> BookingWizard {
        let catalog = Catalog::mock().unwrap();
        let session = BookingSession::new(
            BookingItem::Flight(catalog.flight("6E-2045").unwrap().clone()),
            BookingMetadata::default(),
        );
        let clock = FixedClock(Utc.with_ymd_and_hms(2024, 1, 10, 8, 30, 0).unwrap());
        BookingWizard::new(session, config, Arc::new(ReferenceGenerator::new(Arc::new(clock))))
    }

    #[tokio::test(start_paused = true)]
    async fn test_happy_path_confirms_flight() {
        let mut wizard = flight_wizard(&BookingConfig::default());
        assert_eq!(wizard.step(), WizardStep::Details);

        wizard.submit_details(guest()).unwrap();
        assert_eq!(wizard.step(), WizardStep::Payment);
        wizard.select_payment_method(PaymentMethod::Upi).unwrap();

        let started = Instant::now();
        let confirmation = wizard.pay().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(2500));

        assert_eq!(wizard.step(), WizardStep::Confirmation);
        assert!(is_booking_ref(&confirmation.booking_ref));
        assert!(confirmation.booking_ref.starts_with("SE-FLT-"));
        assert_eq!(confirmation.quote.base_price, 5499);
        assert_eq!(confirmation.quote.taxes, 660);
        assert_eq!(confirmation.quote.total, 6159);
        assert_eq!(confirmation.item_title, "DEL → BOM");
        assert_eq!(confirmation.payment_method, PaymentMethod::Upi);
        assert_eq!(wizard.finish(), Some(confirmation));
    }

    #[tokio::test]
    async fn test_invalid_details_keep_wizard_on_details() {
        let mut wizard = flight_wizard(&BookingConfig::instant());
        let mut details = guest();
        details.email = "rahul-at-example".to_string();

        let err = wizard.submit_details(details).unwrap_err();
        match err {
            WizardError::Validation(errors) => assert!(errors.get("email").is_some()),
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(wizard.step(), WizardStep::Details);
        assert!(wizard.guest().is_none());
    }

    #[tokio::test]
    async fn test_back_keeps_guest_details() {
        let mut wizard = flight_wizard(&BookingConfig::instant());
        wizard.submit_details(guest()).unwrap();
        wizard.back().unwrap();

        assert_eq!(wizard.step(), WizardStep::Details);
        assert_eq!(wizard.guest().unwrap().first_name, "Rahul");
    }

    #[tokio::test]
    async fn test_illegal_transitions_are_rejected() {
        let mut wizard = flight_wizard(&BookingConfig::instant());

        assert!(matches!(
            wizard.pay().await,
            Err(WizardError::InvalidTransition { from: WizardStep::Details, .. })
        ));
        assert!(wizard.back().is_err());
        assert!(wizard.select_payment_method(PaymentMethod::Wallet).is_err());

        wizard.submit_details(guest()).unwrap();
        wizard.pay().await.unwrap();

        // nothing moves once confirmed
        assert!(wizard.back().is_err());
        assert!(wizard.submit_details(guest()).is_err());
        assert!(wizard.pay().await.is_err());
        assert_eq!(wizard.step(), WizardStep::Confirmation);
    }

    #[tokio::test]
    async fn test_hotel_wizard_uses_hotel_prefix() {
        let catalog = Catalog::mock().unwrap();
        let session = BookingSession::new(
            BookingItem::Hotel(catalog.hotel("2").unwrap().clone()),
            BookingMetadata {
                rooms: Some(1),
                ..Default::default()
            },
        );
        let mut wizard = BookingWizard::new(
            session,
            &BookingConfig::instant(),
            Arc::new(ReferenceGenerator::default()),
        );
        wizard.submit_details(guest()).unwrap();
        let confirmation = wizard.pay().await.unwrap();

        assert!(confirmation.booking_ref.starts_with("SE-HTL-"));
        assert_eq!(confirmation.quote.label, "1 Night × 1 Room");
        assert_eq!(confirmation.kind, BookingKind::Hotel);
    }

    #[test]
    fn test_transition_error_message() {
        let err = WizardError::InvalidTransition {
            from: WizardStep::Confirmation,
            action: "go back",
        };
        assert_eq!(err.to_string(), "Cannot go back from the confirmation step");
    }
}
