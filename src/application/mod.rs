// Application layer - Session state, API port and view use cases
pub mod auth_service;
pub mod dashboard_service;
pub mod error;
pub mod measurement_service;
pub mod navigation;
pub mod session;
pub mod view_state;
pub mod water_quality_api;

#[cfg(test)]
pub mod test_support;
