// Auth service - Login, signup and logout use cases
use crate::application::error::ApiError;
use crate::application::navigation::Route;
use crate::application::session::{AuthState, Session};
use crate::application::water_quality_api::{Credentials, Registration, WaterQualityApi};
use std::sync::Arc;

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    /// Signed in; continue to the given view
    SignedIn(Route),
    Failed(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum SignupOutcome {
    /// Account created; the user still has to log in
    Registered(Route),
    Failed(String),
}

#[derive(Clone)]
pub struct AuthService {
    api: Arc<dyn WaterQualityApi>,
    session: Session,
}

impl AuthService {
    pub fn new(api: Arc<dyn WaterQualityApi>, session: Session) -> Self {
        Self { api, session }
    }

    pub fn auth_state(&self) -> AuthState {
        let mut state = AuthState::new(self.session.clone());
        state.initialize();
        state
    }

    pub async fn login(&self, username: &str, password: &str) -> LoginOutcome {
        if username.trim().is_empty() || password.is_empty() {
            return LoginOutcome::Failed("Username and password are required".to_string());
        }

        tracing::info!("Attempting login with username: {}", username);
        let credentials = Credentials {
            username: username.to_string(),
            password: password.to_string(),
        };

        match self.api.login(&credentials).await {
            Ok(token) if token.access_token.trim().is_empty() => {
                tracing::warn!("Login response carried an empty token");
                LoginOutcome::Failed("Invalid username or password".to_string())
            }
            Ok(token) => match self.session.set_token(&token.access_token) {
                Ok(()) => {
                    tracing::info!("Login successful ({} token)", token.token_type);
                    LoginOutcome::SignedIn(Route::Overview)
                }
                Err(e) => {
                    tracing::error!("Failed to persist session: {:#}", e);
                    LoginOutcome::Failed("Could not save the session".to_string())
                }
            },
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                LoginOutcome::Failed(failure_message(&e, "Invalid username or password"))
            }
        }
    }

    pub async fn register(&self, username: &str, email: &str, password: &str) -> SignupOutcome {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return SignupOutcome::Failed("Username, email and password are required".to_string());
        }

        tracing::info!("Attempting signup with username: {}", username);
        let registration = Registration {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };

        match self.api.register(&registration).await {
            Ok(()) => SignupOutcome::Registered(Route::Login),
            Err(e) => {
                tracing::warn!("Signup failed: {}", e);
                SignupOutcome::Failed(failure_message(
                    &e,
                    "Registration failed. Please try again.",
                ))
            }
        }
    }

    pub fn logout(&self) -> anyhow::Result<Route> {
        self.auth_state().logout()
    }
}

fn failure_message(error: &ApiError, fallback: &str) -> String {
    match error {
        ApiError::Http { message, .. } => message.clone(),
        _ => fallback.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::test_support::FakeApi;
    use crate::application::water_quality_api::AccessToken;
    use crate::infrastructure::token_store::MemoryTokenStore;

    fn setup(api: &Arc<FakeApi>) -> (AuthService, Session) {
        let session = Session::new(Arc::new(MemoryTokenStore::default()));
        (AuthService::new(api.clone(), session.clone()), session)
    }

    #[tokio::test]
    async fn test_login_stores_token() {
        let api = Arc::new(FakeApi::default());
        *api.login.lock().unwrap() = Some(Ok(AccessToken {
            access_token: "tok-1".to_string(),
            token_type: "bearer".to_string(),
        }));
        let (service, session) = setup(&api);
        let mut listener = session.subscribe();

        let outcome = service.login("alice", "secret").await;

        assert_eq!(outcome, LoginOutcome::SignedIn(Route::Overview));
        assert_eq!(session.token().as_deref(), Some("tok-1"));
        assert!(listener.try_recv().is_ok());
        assert_eq!(api.last_login.lock().unwrap().as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn test_login_with_empty_token_fails() {
        let api = Arc::new(FakeApi::default());
        *api.login.lock().unwrap() = Some(Ok(AccessToken {
            access_token: "".to_string(),
            token_type: "bearer".to_string(),
        }));
        let (service, session) = setup(&api);
        let mut view = service.auth_state();

        let outcome = service.login("alice", "secret").await;
        view.sync();

        assert_eq!(
            outcome,
            LoginOutcome::Failed("Invalid username or password".to_string())
        );
        assert!(!session.is_authenticated());
        assert!(!view.is_authenticated());
        assert_eq!(view.guard(), Err(Route::Login));
    }

    #[tokio::test]
    async fn test_login_failure_uses_server_detail() {
        let api = Arc::new(FakeApi::default());
        *api.login.lock().unwrap() = Some(Err(ApiError::Http {
            status: 401,
            message: "Incorrect username or password".to_string(),
        }));
        let (service, session) = setup(&api);

        let outcome = service.login("alice", "wrong").await;

        assert_eq!(
            outcome,
            LoginOutcome::Failed("Incorrect username or password".to_string())
        );
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_login_requires_fields() {
        let (service, _) = setup(&Arc::new(FakeApi::default()));
        let outcome = service.login("  ", "secret").await;
        assert!(matches!(outcome, LoginOutcome::Failed(_)));
    }

    #[tokio::test]
    async fn test_register_redirects_to_login() {
        let api = Arc::new(FakeApi::default());
        *api.register.lock().unwrap() = Some(Ok(()));
        let (service, session) = setup(&api);

        let outcome = service.register("bob", "bob@example.com", "pw").await;

        assert_eq!(outcome, SignupOutcome::Registered(Route::Login));
        assert!(!session.is_authenticated());
    }

    #[tokio::test]
    async fn test_register_network_failure_is_generic() {
        let (service, _) = setup(&Arc::new(FakeApi::default()));
        let outcome = service.register("bob", "bob@example.com", "pw").await;
        assert_eq!(
            outcome,
            SignupOutcome::Failed("Registration failed. Please try again.".to_string())
        );
    }

    #[test]
    fn test_logout_clears_session() {
        let (service, session) = setup(&Arc::new(FakeApi::default()));
        session.set_token("tok-1").unwrap();

        assert_eq!(service.logout().unwrap(), Route::Login);
        assert!(!service.auth_state().is_authenticated());
    }
}
