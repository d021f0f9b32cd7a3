// Inventory supplier: the catalog behind an artificial network delay
use crate::catalog::Catalog;
use crate::config::BookingConfig;
use crate::models::{FlightOffer, Hotel, Package, VisaRequirement};
use crate::search::{
    filter_flights, filter_hotels, filter_packages, search_visas, FlightFilter, FlightSort,
    HotelFilter, HotelSort,
};
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::time::{sleep, Instant};

#[derive(Error, Debug)]
pub enum SupplierError {
    #[error("Supplier unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct SearchResults<T> {
    pub items: Vec<T>,
    pub elapsed_ms: u64,
}

impl<T> SearchResults<T> {
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
pub trait InventorySupplier: Send + Sync + 'static {
    async fn search_flights(
        &self,
        filter: &FlightFilter,
        sort: FlightSort,
    ) -> Result<SearchResults<FlightOffer>, SupplierError>;

    async fn search_hotels(
        &self,
        filter: &HotelFilter,
        sort: HotelSort,
    ) -> Result<SearchResults<Hotel>, SupplierError>;

    // "All" returns every package
    async fn search_packages(&self, theme: &str) -> Result<SearchResults<Package>, SupplierError>;

    async fn search_visas(
        &self,
        query: &str,
    ) -> Result<SearchResults<VisaRequirement>, SupplierError>;
}

/// Serves the bundled catalog. Each call waits the configured search
/// latency before filtering, however small the result set.
#[derive(Clone)]
pub struct MockSupplier {
    catalog: Arc<Catalog>,
    latency: Duration,
}

impl MockSupplier {
    pub fn new(catalog: Arc<Catalog>, config: &BookingConfig) -> Self {
        Self {
            catalog,
            latency: config.search_latency(),
        }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    async fn respond<T>(
        &self,
        what: &str,
        run: impl FnOnce(&Catalog) -> Vec<T> + Send,
    ) -> SearchResults<T> {
        let started = Instant::now();
        sleep(self.latency).await;
        let items = run(&self.catalog);
        let elapsed_ms = started.elapsed().as_millis() as u64;
        tracing::debug!(search = what, results = items.len(), elapsed_ms, "search finished");
        SearchResults { items, elapsed_ms }
    }
}

#[async_trait]
impl InventorySupplier for MockSupplier {
    async fn search_flights(
        &self,
        filter: &FlightFilter,
        sort: FlightSort,
    ) -> Result<SearchResults<FlightOffer>, SupplierError> {
        Ok(self
            .respond("flights", |c| filter_flights(&c.flights, filter, sort))
            .await)
    }

    async fn search_hotels(
        &self,
        filter: &HotelFilter,
        sort: HotelSort,
    ) -> Result<SearchResults<Hotel>, SupplierError> {
        Ok(self
            .respond("hotels", |c| filter_hotels(&c.hotels, filter, sort))
            .await)
    }

    async fn search_packages(&self, theme: &str) -> Result<SearchResults<Package>, SupplierError> {
        Ok(self
            .respond("packages", |c| filter_packages(&c.packages, theme))
            .await)
    }

    async fn search_visas(
        &self,
        query: &str,
    ) -> Result<SearchResults<VisaRequirement>, SupplierError> {
        Ok(self
            .respond("visas", |c| search_visas(&c.visas, query))
            .await)
    }
}
