// Current booking session, passed explicitly to whoever needs it
use crate::models::{BookingItem, BookingKind};
use chrono::NaiveDate;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Home,
    Flights,
    Hotels,
    Holidays,
    Visa,
}

// Optional booking parameters collected on the detail pages
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookingMetadata {
    #[serde(default, rename = "checkInDate")]
    pub check_in: Option<NaiveDate>,
    #[serde(default, rename = "checkOutDate")]
    pub check_out: Option<NaiveDate>,
    #[serde(default)]
    pub rooms: Option<u32>,
    #[serde(default)]
    pub guests: Option<u32>,
    #[serde(default)]
    pub passengers: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BookingSession {
    pub item: BookingItem,
    #[serde(default)]
    pub metadata: BookingMetadata,
}

impl BookingSession {
    pub fn new(item: BookingItem, metadata: BookingMetadata) -> Self {
        Self { item, metadata }
    }

    pub fn kind(&self) -> BookingKind {
        self.item.kind()
    }
}

#[derive(Debug, Default)]
struct SessionState {
    page: Page,
    active: Option<BookingSession>,
}

/// Shared handle to the page the user is on and the booking they opened.
///
/// Cloning the context shares the same state. Navigating to any page drops
/// the active booking.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    state: Arc<RwLock<SessionState>>,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn page(&self) -> Page {
        self.state.read().page
    }

    pub fn current(&self) -> Option<BookingSession> {
        self.state.read().active.clone()
    }

    pub fn begin(&self, item: BookingItem, metadata: BookingMetadata) -> BookingSession {
        let session = BookingSession::new(item, metadata);
        tracing::info!(kind = %session.kind(), item = session.item.id(), "booking session started");
        self.state.write().active = Some(session.clone());
        session
    }

    pub fn navigate(&self, page: Page) {
        let mut state = self.state.write();
        if state.active.take().is_some() {
            tracing::debug!(?page, "navigation reset the active booking");
        }
        state.page = page;
    }

    pub fn clear(&self) -> Option<BookingSession> {
        self.state.write().active.take()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    #[test]
    fn test_session_lifecycle() {
        let catalog = Catalog::mock().unwrap();
        let context = SessionContext::new();
        assert_eq!(context.page(), Page::Home);
        assert!(context.current().is_none());

        context.navigate(Page::Hotels);
        let hotel = catalog.hotel("1").unwrap().clone();
        context.begin(
            BookingItem::Hotel(hotel),
            BookingMetadata {
                rooms: Some(1),
                ..Default::default()
            },
        );

        let session = context.current().unwrap();
        assert_eq!(session.kind(), BookingKind::Hotel);
        assert_eq!(session.metadata.rooms, Some(1));

        // clones observe the same state
        let shared = context.clone();
        shared.navigate(Page::Flights);
        assert!(context.current().is_none());
        assert_eq!(context.page(), Page::Flights);
    }

    #[test]
    fn test_clear_returns_session() {
        let catalog = Catalog::mock().unwrap();
        let context = SessionContext::new();
        context.begin(
            BookingItem::Flight(catalog.flights[0].clone()),
            BookingMetadata::default(),
        );

        assert!(context.clear().is_some());
        assert!(context.clear().is_none());
    }

    #[test]
    fn test_metadata_wire_names() {
        let metadata: BookingMetadata = serde_json::from_str(
            r#"{ "checkInDate": "2025-03-01", "checkOutDate": "2025-03-03", "rooms": 2 }"#,
        )
        .unwrap();
        assert_eq!(metadata.check_in, NaiveDate::from_ymd_opt(2025, 3, 1));
        assert_eq!(metadata.rooms, Some(2));
        assert_eq!(metadata.guests, None);
    }
}
