// Application layer - Use cases and the ports they depend on
pub mod data_service;
pub mod error;
pub mod secrets_publisher;
pub mod timeseries_repository;

#[cfg(test)]
pub mod testing;
