// Domain layer - Samples, servers, chart configuration and the dashboard view-model
pub mod chart;
pub mod dashboard;
pub mod sample;
pub mod server;
