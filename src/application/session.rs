// Session state: the persisted bearer token and change notifications
use crate::application::navigation::Route;
use std::sync::Arc;
use tokio::sync::broadcast;

const EVENT_CAPACITY: usize = 16;

/// Persistence backend for the bearer token
pub trait TokenStore: Send + Sync {
    fn load(&self) -> anyhow::Result<Option<String>>;
    fn save(&self, token: &str) -> anyhow::Result<()>;
    fn clear(&self) -> anyhow::Result<()>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    SignedIn,
    SignedOut,
}

impl SessionEvent {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionEvent::SignedIn)
    }
}

/// Shared handle to the token. Clones observe the same store and channel.
#[derive(Clone)]
pub struct Session {
    store: Arc<dyn TokenStore>,
    events: broadcast::Sender<SessionEvent>,
}

impl Session {
    pub fn new(store: Arc<dyn TokenStore>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self { store, events }
    }

    /// Reads the token from the store on every call
    pub fn token(&self) -> Option<String> {
        match self.store.load() {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                tracing::warn!("Failed to read session token: {:#}", e);
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.token().is_some()
    }

    /// Persists `token` and announces the sign-in. Blank tokens are rejected.
    pub fn set_token(&self, token: &str) -> anyhow::Result<()> {
        if token.trim().is_empty() {
            anyhow::bail!("Refusing to store an empty session token");
        }
        self.store.save(token)?;
        tracing::debug!("Session token stored");
        self.notify(SessionEvent::SignedIn);
        Ok(())
    }

    pub fn clear(&self) -> anyhow::Result<()> {
        self.store.clear()?;
        tracing::debug!("Session token removed");
        self.notify(SessionEvent::SignedOut);
        Ok(())
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn notify(&self, event: SessionEvent) {
        // No receivers is fine: nobody is watching the session
        let _ = self.events.send(event);
    }
}

/// Per-view view of the session, kept in step through session events
pub struct AuthState {
    session: Session,
    events: broadcast::Receiver<SessionEvent>,
    authenticated: bool,
    loading: bool,
}

impl AuthState {
    pub fn new(session: Session) -> Self {
        let events = session.subscribe();
        Self {
            session,
            events,
            authenticated: false,
            loading: true,
        }
    }

    /// Reads the persisted token and leaves the loading state
    pub fn initialize(&mut self) {
        self.authenticated = self.session.is_authenticated();
        self.loading = false;
    }

    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Applies any session events published since the last call
    pub fn sync(&mut self) {
        loop {
            match self.events.try_recv() {
                Ok(event) => self.authenticated = event.is_authenticated(),
                Err(broadcast::error::TryRecvError::Lagged(skipped)) => {
                    tracing::debug!("Missed {} session events, re-reading token", skipped);
                    self.authenticated = self.session.is_authenticated();
                }
                Err(broadcast::error::TryRecvError::Empty)
                | Err(broadcast::error::TryRecvError::Closed) => break,
            }
        }
    }

    /// Views that need a token redirect to login when there is none
    pub fn guard(&self) -> Result<(), Route> {
        if !self.loading && !self.authenticated {
            return Err(Route::Login);
        }
        Ok(())
    }

    pub fn logout(&mut self) -> anyhow::Result<Route> {
        tracing::info!("Logging out");
        self.session.clear()?;
        self.authenticated = false;
        Ok(Route::Login)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::token_store::MemoryTokenStore;

    fn session() -> Session {
        Session::new(Arc::new(MemoryTokenStore::default()))
    }

    #[test]
    fn test_unauthenticated_redirects_to_login() {
        let mut auth = AuthState::new(session());
        assert!(auth.is_loading());
        assert_eq!(auth.guard(), Ok(()));

        auth.initialize();
        assert!(!auth.is_loading());
        assert!(!auth.is_authenticated());
        assert_eq!(auth.guard(), Err(Route::Login));
    }

    #[test]
    fn test_set_token_notifies_other_handles() {
        let session = session();
        let mut first = AuthState::new(session.clone());
        let mut second = AuthState::new(session.clone());
        first.initialize();
        second.initialize();

        session.set_token("abc123").unwrap();
        first.sync();
        second.sync();

        assert!(first.is_authenticated());
        assert!(second.is_authenticated());
        assert_eq!(second.guard(), Ok(()));
    }

    #[tokio::test]
    async fn test_subscriber_receives_sign_in() {
        let session = session();
        let mut listener = session.subscribe();

        session.set_token("abc123").unwrap();

        assert_eq!(listener.recv().await.unwrap(), SessionEvent::SignedIn);
    }

    #[test]
    fn test_logout_clears_token() {
        let session = session();
        session.set_token("abc123").unwrap();

        let mut auth = AuthState::new(session.clone());
        auth.initialize();
        assert!(auth.is_authenticated());

        let route = auth.logout().unwrap();
        assert_eq!(route, Route::Login);
        assert!(session.token().is_none());

        let mut fresh = AuthState::new(session);
        fresh.initialize();
        assert!(!fresh.is_authenticated());
    }

    #[test]
    fn test_logout_broadcasts_to_other_handles() {
        let session = session();
        session.set_token("abc123").unwrap();

        let mut first = AuthState::new(session.clone());
        let mut second = AuthState::new(session);
        first.initialize();
        second.initialize();

        first.logout().unwrap();
        second.sync();
        assert!(!second.is_authenticated());
    }

    #[test]
    fn test_blank_token_rejected_without_event() {
        let session = session();
        let mut view = AuthState::new(session.clone());
        view.initialize();

        assert!(session.set_token("").is_err());
        assert!(session.set_token("   ").is_err());
        view.sync();

        assert!(!session.is_authenticated());
        assert!(!view.is_authenticated());
        assert_eq!(view.guard(), Err(Route::Login));
    }

    #[test]
    fn test_empty_stored_token_is_absent() {
        let store = Arc::new(MemoryTokenStore::default());
        store.save("").unwrap();
        let session = Session::new(store);
        assert!(!session.is_authenticated());
    }
}
