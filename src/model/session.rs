//! Session store: the process-wide record of who is signed in.

use tokio::sync::watch;

/// The authenticated principal.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: String,
    pub email: String,
    pub nickname: String,
}

impl User {
    /// Build a user whose nickname falls back to the email local-part.
    pub fn from_email(id: impl Into<String>, email: impl Into<String>) -> Self {
        let email = email.into();
        let nickname = nickname_from_email(&email);
        Self {
            id: id.into(),
            email,
            nickname,
        }
    }
}

pub fn nickname_from_email(email: &str) -> String {
    email.split('@').next().unwrap_or(email).to_string()
}

/// Exactly one variant holds at any time; a `User` exists iff signed in.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Session {
    #[default]
    SignedOut,
    SignedIn(User),
}

/// Single-writer, multi-reader session state.
///
/// Mutations publish through a watch channel: `send_replace` swaps the value
/// and wakes subscribers before the mutating call returns, so a renderer
/// polling per tick never observes a partial transition.
#[derive(Clone)]
pub struct SessionStore {
    tx: watch::Sender<Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(Session::SignedOut);
        Self { tx }
    }

    /// Sign in. Last write wins: a different user simply replaces the
    /// current one, no error.
    pub fn login(&self, user: User) {
        tracing::info!(nickname = %user.nickname, "session signed in");
        self.tx.send_replace(Session::SignedIn(user));
    }

    /// Sign out unconditionally.
    pub fn logout(&self) {
        let previous = self.tx.send_replace(Session::SignedOut);
        match previous {
            Session::SignedIn(user) => tracing::info!(nickname = %user.nickname, "session signed out"),
            Session::SignedOut => tracing::debug!("logout with no active session"),
        }
    }

    pub fn current_user(&self) -> Option<User> {
        match &*self.tx.borrow() {
            Session::SignedIn(user) => Some(user.clone()),
            Session::SignedOut => None,
        }
    }

    pub fn is_signed_in(&self) -> bool {
        matches!(&*self.tx.borrow(), Session::SignedIn(_))
    }

    pub fn snapshot(&self) -> Session {
        self.tx.borrow().clone()
    }

    /// Receiver that is marked changed on every mutation.
    pub fn subscribe(&self) -> watch::Receiver<Session> {
        self.tx.subscribe()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(email: &str) -> User {
        User::from_email("1", email)
    }

    #[test]
    fn nickname_derives_from_local_part() {
        assert_eq!(nickname_from_email("a@b.com"), "a");
        assert_eq!(user("carol@example.com").nickname, "carol");
    }

    #[test]
    fn starts_signed_out() {
        let store = SessionStore::new();
        assert!(!store.is_signed_in());
        assert_eq!(store.current_user(), None);
    }

    #[test]
    fn visible_state_equals_last_call() {
        let store = SessionStore::new();

        store.login(user("a@b.com"));
        assert_eq!(store.current_user().unwrap().email, "a@b.com");

        // Different user overwrites, no error
        store.login(user("c@d.com"));
        assert_eq!(store.current_user().unwrap().email, "c@d.com");

        store.logout();
        assert_eq!(store.snapshot(), Session::SignedOut);

        // Logout while signed out stays a no-op
        store.logout();
        assert_eq!(store.snapshot(), Session::SignedOut);

        store.login(user("e@f.com"));
        assert!(store.is_signed_in());
    }

    #[test]
    fn login_is_idempotent_for_same_user() {
        let store = SessionStore::new();
        store.login(user("a@b.com"));
        store.login(user("a@b.com"));
        assert_eq!(store.snapshot(), Session::SignedIn(user("a@b.com")));
    }

    #[test]
    fn subscribers_see_every_mutation() {
        let store = SessionStore::new();
        let mut rx = store.subscribe();
        assert!(!rx.has_changed().unwrap());

        store.login(user("a@b.com"));
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Session::SignedIn(user("a@b.com")));

        store.logout();
        assert!(rx.has_changed().unwrap());
        assert_eq!(*rx.borrow_and_update(), Session::SignedOut);
    }
}
