// Flight checkout: review, travelers, payment, confirmed
use crate::config::BookingConfig;
use crate::models::{
    BookingData, ContactDetails, FareBreakdown, FlightOffer, PaymentMethod, PaymentStatus,
    TravelerDetails,
};
use crate::reference::ReferenceGenerator;
use crate::validation::{validate_travelers, ValidationErrors};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CheckoutStep {
    Review,
    Travelers,
    Payment,
    Confirmed,
}

impl CheckoutStep {
    pub const ALL: [CheckoutStep; 4] = [
        CheckoutStep::Review,
        CheckoutStep::Travelers,
        CheckoutStep::Payment,
        CheckoutStep::Confirmed,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            CheckoutStep::Review => "Review",
            CheckoutStep::Travelers => "Travelers",
            CheckoutStep::Payment => "Payment",
            CheckoutStep::Confirmed => "Confirmed",
        }
    }
}

impl fmt::Display for CheckoutStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}

#[derive(Error, Debug)]
pub enum CheckoutError {
    #[error("Cannot {action} from the {from} step")]
    InvalidTransition {
        from: CheckoutStep,
        action: &'static str,
    },

    #[error(transparent)]
    Validation(#[from] ValidationErrors),

    #[error("Expected {expected} travelers, got {actual}")]
    PassengerCountMismatch { expected: usize, actual: usize },

    #[error("Traveler and contact details are missing")]
    MissingContact,
}

/// Checkout for a single flight offer.
///
/// The fare is itemized once on creation and does not change afterwards.
/// Earlier steps can be revisited by jumping back, but never once the
/// booking is confirmed.
pub struct FlightCheckout {
    flight: FlightOffer,
    passenger_count: usize,
    fare: FareBreakdown,
    references: Arc<ReferenceGenerator>,
    payment_latency: Duration,
    success_hold: Duration,
    step: CheckoutStep,
    travelers: Vec<TravelerDetails>,
    contact: Option<ContactDetails>,
    booking: Option<BookingData>,
}

impl FlightCheckout {
    pub fn new(
        flight: FlightOffer,
        passenger_count: usize,
        config: &BookingConfig,
        references: Arc<ReferenceGenerator>,
    ) -> Self {
        let fare = FareBreakdown::for_flight(&flight);
        Self {
            flight,
            passenger_count: passenger_count.max(1),
            fare,
            references,
            payment_latency: config.checkout_payment_latency(),
            success_hold: config.payment_success_hold(),
            step: CheckoutStep::Review,
            travelers: Vec::new(),
            contact: None,
            booking: None,
        }
    }

    pub fn step(&self) -> CheckoutStep {
        self.step
    }

    pub fn flight(&self) -> &FlightOffer {
        &self.flight
    }

    pub fn passenger_count(&self) -> usize {
        self.passenger_count
    }

    pub fn fare(&self) -> &FareBreakdown {
        &self.fare
    }

    pub fn travelers(&self) -> &[TravelerDetails] {
        &self.travelers
    }

    pub fn booking(&self) -> Option<&BookingData> {
        self.booking.as_ref()
    }

    fn reject(&self, action: &'static str) -> CheckoutError {
        tracing::warn!(from = %self.step, action, "rejected checkout transition");
        CheckoutError::InvalidTransition {
            from: self.step,
            action,
        }
    }

    fn advance(&mut self, to: CheckoutStep) {
        tracing::info!(flight = %self.flight.id, from = %self.step, to = %to, "checkout step");
        self.step = to;
    }

    pub fn continue_review(&mut self) -> Result<(), CheckoutError> {
        if self.step != CheckoutStep::Review {
            return Err(self.reject("continue review"));
        }
        self.advance(CheckoutStep::Travelers);
        Ok(())
    }

    pub fn submit_travelers(
        &mut self,
        travelers: Vec<TravelerDetails>,
        contact: ContactDetails,
    ) -> Result<(), CheckoutError> {
        if self.step != CheckoutStep::Travelers {
            return Err(self.reject("submit travelers"));
        }
        if travelers.len() != self.passenger_count {
            return Err(CheckoutError::PassengerCountMismatch {
                expected: self.passenger_count,
                actual: travelers.len(),
            });
        }
        validate_travelers(&travelers, &contact)?;

        self.travelers = travelers;
        self.contact = Some(contact);
        self.advance(CheckoutStep::Payment);
        Ok(())
    }

    /// Runs the simulated payment: the processing wait, then the success
    /// screen hold, then the booking record. Payment always succeeds.
    pub async fn pay(&mut self, method: PaymentMethod) -> Result<BookingData, CheckoutError> {
        if self.step != CheckoutStep::Payment {
            return Err(self.reject("pay"));
        }
        let contact = self.contact.clone().ok_or(CheckoutError::MissingContact)?;

        tracing::debug!(method = method.label(), "processing payment");
        tokio::time::sleep(self.payment_latency).await;
        tokio::time::sleep(self.success_hold).await;

        let booking = BookingData {
            booking_id: self.references.booking_id(),
            flight: self.flight.clone(),
            travelers: self.travelers.clone(),
            contact,
            fare_breakdown: self.fare.clone(),
            payment_method: method,
            payment_status: PaymentStatus::Completed,
            created_at: self.references.now(),
        };
        tracing::info!(booking_id = %booking.booking_id, total = booking.fare_breakdown.total, "flight booked");

        self.booking = Some(booking.clone());
        self.advance(CheckoutStep::Confirmed);
        Ok(booking)
    }

    // Step indicator clicks: earlier steps only, and only until confirmed
    pub fn go_to(&mut self, step: CheckoutStep) -> Result<(), CheckoutError> {
        if self.step == CheckoutStep::Confirmed || step >= self.step {
            return Err(self.reject("jump to that step"));
        }
        self.advance(step);
        Ok(())
    }
}
