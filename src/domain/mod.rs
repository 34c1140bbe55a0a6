// Domain layer - Values with no I/O
pub mod data_point;
pub mod data_request;
pub mod deletion;
pub mod secrets;
