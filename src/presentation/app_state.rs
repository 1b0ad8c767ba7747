// Application state for HTTP handlers
use crate::application::refresh::RefreshController;
use crate::presentation::page::PageOptions;
use std::collections::HashMap;

#[derive(Clone)]
pub struct AppState {
    /// Configured server ids, in configuration order.
    pub server_ids: Vec<String>,
    pub dashboards: HashMap<String, RefreshController>,
    pub page_options: PageOptions,
}

impl AppState {
    pub fn new(controllers: Vec<RefreshController>, page_options: PageOptions) -> Self {
        let server_ids = controllers.iter().map(|c| c.server_id().to_string()).collect();
        let dashboards = controllers
            .into_iter()
            .map(|c| (c.server_id().to_string(), c))
            .collect();
        Self {
            server_ids,
            dashboards,
            page_options,
        }
    }

    pub fn dashboard(&self, server_id: &str) -> Option<&RefreshController> {
        self.dashboards.get(server_id)
    }
}
