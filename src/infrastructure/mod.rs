// Infrastructure layer - External dependencies and adapters
pub mod backend_repository;
pub mod config;
pub mod http_client;
pub mod http_response;
pub mod svg;
