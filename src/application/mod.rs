// Application layer - Use cases and the refresh lifecycle
pub mod chart_container;
pub mod dashboard_service;
pub mod refresh;
pub mod sample_source;
