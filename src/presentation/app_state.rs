// Application state for HTTP handlers
use crate::application::data_service::DataService;

#[derive(Clone)]
pub struct AppState {
    pub data_service: DataService,
}
