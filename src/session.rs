//! Per-user session store for in-flight image requests.
//!
//! A session tracks the most recent photo reference and, once supplied, the
//! user's glyph ramp. The two states are an explicit tagged variant so an
//! action-ready session without a photo is unrepresentable. Sessions are
//! never deleted; a later photo overwrites the previous one, and memory
//! growth is bounded only by the number of distinct users seen.

use dashmap::DashMap;

/// Stable per-user identifier supplied by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct UserId(pub i64);

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "user:{}", self.0)
    }
}

/// Opaque handle to a platform-owned image. The session stores only the
/// reference, never the bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PhotoRef(pub String);

impl PhotoRef {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// One user's in-flight request state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Session {
    /// Photo received, waiting for the user to supply a glyph ramp.
    AwaitingCharset { photo: PhotoRef },
    /// Ramp captured, waiting for (any number of) action selections.
    AwaitingAction { photo: PhotoRef, charset: String },
}

impl Session {
    /// The photo reference, present in every state.
    pub fn photo(&self) -> &PhotoRef {
        match self {
            Session::AwaitingCharset { photo } => photo,
            Session::AwaitingAction { photo, .. } => photo,
        }
    }

    /// The glyph ramp charset, once captured.
    pub fn charset(&self) -> Option<&str> {
        match self {
            Session::AwaitingCharset { .. } => None,
            Session::AwaitingAction { charset, .. } => Some(charset),
        }
    }
}

/// Process-wide map from user id to session.
///
/// Backed by a sharded concurrent map, so every read-then-write on one
/// user's entry happens under that entry's shard guard and concurrent events
/// for the same user cannot lose updates. Cross-user operations need no
/// coordination.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<UserId, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create or overwrite the session for a user. Last photo wins.
    pub fn put(&self, user: UserId, session: Session) {
        self.sessions.insert(user, session);
    }

    /// Snapshot a user's session, if any.
    pub fn get(&self, user: UserId) -> Option<Session> {
        self.sessions.get(&user).map(|entry| entry.clone())
    }

    /// Capture a charset for a user whose session is awaiting one.
    ///
    /// Returns true when the charset was stored. Returns false when the user
    /// has no session, or when the charset is already set (the charset is
    /// set exactly once per photo; later text is ignored, not reinterpreted).
    /// The read-then-write runs under the entry's shard guard.
    pub fn capture_charset(&self, user: UserId, charset: &str) -> bool {
        match self.sessions.get_mut(&user) {
            Some(mut entry) => match &*entry {
                Session::AwaitingCharset { photo } => {
                    let photo = photo.clone();
                    *entry = Session::AwaitingAction {
                        photo,
                        charset: charset.to_string(),
                    };
                    true
                }
                Session::AwaitingAction { .. } => false,
            },
            None => false,
        }
    }

    /// Number of users with a session.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(id: &str) -> PhotoRef {
        PhotoRef(id.to_string())
    }

    #[test]
    fn test_capture_charset_without_session() {
        let store = SessionStore::new();
        assert!(!store.capture_charset(UserId(1), "#."));
        assert!(store.is_empty());
    }

    #[test]
    fn test_capture_charset_transitions_state() {
        let store = SessionStore::new();
        store.put(
            UserId(1),
            Session::AwaitingCharset { photo: photo("p1") },
        );
        assert!(store.capture_charset(UserId(1), "#."));

        let session = store.get(UserId(1)).unwrap();
        assert_eq!(session.charset(), Some("#."));
        assert_eq!(session.photo(), &photo("p1"));
    }

    #[test]
    fn test_charset_set_exactly_once() {
        let store = SessionStore::new();
        store.put(
            UserId(1),
            Session::AwaitingCharset { photo: photo("p1") },
        );
        assert!(store.capture_charset(UserId(1), "first"));
        assert!(!store.capture_charset(UserId(1), "second"));
        assert_eq!(store.get(UserId(1)).unwrap().charset(), Some("first"));
    }

    #[test]
    fn test_new_photo_overwrites_and_clears_charset() {
        let store = SessionStore::new();
        store.put(
            UserId(1),
            Session::AwaitingCharset { photo: photo("p1") },
        );
        store.capture_charset(UserId(1), "#.");

        store.put(
            UserId(1),
            Session::AwaitingCharset { photo: photo("p2") },
        );
        let session = store.get(UserId(1)).unwrap();
        assert_eq!(session.photo(), &photo("p2"));
        assert_eq!(session.charset(), None);
    }

    #[test]
    fn test_users_are_independent() {
        let store = SessionStore::new();
        store.put(
            UserId(1),
            Session::AwaitingCharset { photo: photo("p1") },
        );
        store.put(
            UserId(2),
            Session::AwaitingCharset { photo: photo("p2") },
        );
        store.capture_charset(UserId(1), "ab");

        assert_eq!(store.get(UserId(1)).unwrap().charset(), Some("ab"));
        assert_eq!(store.get(UserId(2)).unwrap().charset(), None);
        assert_eq!(store.len(), 2);
    }
}
