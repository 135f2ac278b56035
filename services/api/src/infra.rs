use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use lettings_books::books::{BooksState, CategoryTable, InvoiceService, ReconciliationService};
use lettings_books::directory::{
    DirectoryState, LandlordService, PropertyService, TenantService,
};
use lettings_books::memory::InMemoryStore;
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// The wired-up service graph over one shared store.
pub(crate) struct Services {
    pub(crate) books: BooksState<InMemoryStore>,
    pub(crate) directory: DirectoryState<InMemoryStore>,
}

pub(crate) fn build_services(categories: Arc<CategoryTable>) -> Services {
    let store = Arc::new(InMemoryStore::default());

    let books = BooksState {
        reconciliation: Arc::new(ReconciliationService::new(
            store.clone(),
            categories.clone(),
        )),
        invoices: Arc::new(InvoiceService::new(store.clone(), categories)),
        store: store.clone(),
    };

    let directory = DirectoryState {
        landlords: Arc::new(LandlordService::new(store.clone())),
        tenants: Arc::new(TenantService::new(store.clone())),
        properties: Arc::new(PropertyService::new(store)),
    };

    Services { books, directory }
}
