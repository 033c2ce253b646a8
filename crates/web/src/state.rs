use importer::TopChartsImporter;
use std::sync::Arc;
use storage::GameStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn GameStore>,
    pub importer: Arc<TopChartsImporter>,
}

impl AppState {
    pub fn new(store: Arc<dyn GameStore>, importer: TopChartsImporter) -> Self {
        Self {
            store,
            importer: Arc::new(importer),
        }
    }
}
