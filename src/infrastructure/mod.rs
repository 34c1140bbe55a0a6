// Infrastructure layer - External dependencies and adapters
pub mod config;
pub mod flux_csv;
pub mod http_response;
pub mod influx_repository;
pub mod sops;
pub mod ssm_store;
