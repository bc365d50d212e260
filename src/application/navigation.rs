// Navigation targets returned instead of performing redirects
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Overview,
    Trends,
    Parameters,
    ParameterDetail(String),
    NewMeasurement,
}

impl Route {
    /// Command that opens this view
    pub fn command(&self) -> String {
        match self {
            Route::Login => "wq login".to_string(),
            Route::Signup => "wq signup".to_string(),
            Route::Overview => "wq overview".to_string(),
            Route::Trends => "wq trends".to_string(),
            Route::Parameters => "wq parameters".to_string(),
            Route::ParameterDetail(parameter) => format!("wq parameter {}", parameter),
            Route::NewMeasurement => "wq measure".to_string(),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let path = match self {
            Route::Login => "/login".to_string(),
            Route::Signup => "/login?tab=signup".to_string(),
            Route::Overview => "/dashboard/overview".to_string(),
            Route::Trends => "/dashboard/trends".to_string(),
            Route::Parameters => "/dashboard/parameters".to_string(),
            Route::ParameterDetail(parameter) => format!("/dashboard/parameters/{}", parameter),
            Route::NewMeasurement => "/measurements/new".to_string(),
        };
        f.write_str(&path)
    }
}
