// Loading / error / ready state shared by every view
use crate::application::error::ApiError;
use std::future::Future;

#[derive(Debug, Clone, PartialEq)]
pub enum ViewState<T> {
    Loading,
    Failed(String),
    Ready(T),
}

impl<T> Default for ViewState<T> {
    fn default() -> Self {
        ViewState::Loading
    }
}

impl<T> ViewState<T> {
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }

    pub fn data(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            ViewState::Failed(message) => Some(message),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> ViewState<U> {
        match self {
            ViewState::Loading => ViewState::Loading,
            ViewState::Failed(message) => ViewState::Failed(message),
            ViewState::Ready(data) => ViewState::Ready(f(data)),
        }
    }

    /// Resolves a fetch. The cause is logged; the view shows `failure`.
    pub fn resolve(result: Result<T, ApiError>, failure: impl Into<String>) -> Self {
        match result {
            Ok(data) => ViewState::Ready(data),
            Err(e) => {
                let failure = failure.into();
                if e.is_unauthorized() {
                    tracing::warn!("Session token was rejected; sign in again");
                }
                tracing::error!("{}: {}", failure, e);
                ViewState::Failed(failure)
            }
        }
    }
}

/// Drives a view from `Loading` to its final state
pub async fn load<T, F>(fetch: F, failure: impl Into<String>) -> ViewState<T>
where
    F: Future<Output = Result<T, ApiError>>,
{
    ViewState::resolve(fetch.await, failure)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_load_ready() {
        let state = load(async { Ok::<_, ApiError>(42) }, "Failed").await;
        assert_eq!(state, ViewState::Ready(42));
        assert_eq!(state.data(), Some(&42));
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn test_load_failed_uses_view_message() {
        let fetch = async {
            Err::<i32, _>(ApiError::Http {
                status: 500,
                message: "Internal Server Error".into(),
            })
        };
        let state = load(fetch, "Failed to load dashboard data. Please try again later.").await;
        assert_eq!(
            state.error(),
            Some("Failed to load dashboard data. Please try again later.")
        );
        assert!(state.data().is_none());
    }

    #[test]
    fn test_default_is_loading() {
        let state: ViewState<()> = ViewState::default();
        assert!(state.is_loading());
        assert_eq!(state.map(|_| 1), ViewState::Loading);
    }
}
