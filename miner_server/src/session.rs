use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::fmt;
use uuid::Uuid;

pub const SESSION_COOKIE: &str = "miner_session";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SessionId(Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Running score per session. The engine only ever hands out gains; the
/// store is the single owner of totals.
pub trait ScoreStore: Send + Sync {
    /// Current total; unknown sessions read as 0 and are not stored.
    fn get(&self, session: &SessionId) -> u64;
    /// Adds `delta` atomically and returns the new total.
    fn increment(&self, session: &SessionId, delta: u64) -> u64;
}

#[derive(Debug, Default)]
pub struct InMemoryScoreStore {
    scores: Mutex<HashMap<SessionId, u64>>,
}

impl InMemoryScoreStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.scores.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.scores.lock().is_empty()
    }
}

impl ScoreStore for InMemoryScoreStore {
    fn get(&self, session: &SessionId) -> u64 {
        self.scores.lock().get(session).copied().unwrap_or(0)
    }

    fn increment(&self, session: &SessionId, delta: u64) -> u64 {
        let mut scores = self.scores.lock();
        let total = scores.entry(*session).or_insert(0);
        *total = total.saturating_add(delta);
        *total
    }
}

/// Reads the session cookie, or starts a new session and sets the cookie.
pub fn resolve_session(jar: CookieJar) -> (CookieJar, SessionId, bool) {
    if let Some(id) = jar.get(SESSION_COOKIE).and_then(|c| SessionId::parse(c.value())) {
        return (jar, id, false);
    }
    let id = SessionId::new();
    let cookie = Cookie::build((SESSION_COOKIE, id.to_string()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), id, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn unknown_session_reads_zero_without_an_entry() {
        let store = InMemoryScoreStore::new();
        let id = SessionId::new();
        assert_eq!(store.get(&id), 0);
        assert!(store.is_empty());
        store.increment(&id, 0);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn increments_accumulate_per_session() {
        let store = InMemoryScoreStore::new();
        let (a, b) = (SessionId::new(), SessionId::new());
        assert_eq!(store.increment(&a, 5), 5);
        assert_eq!(store.increment(&a, 7), 12);
        assert_eq!(store.increment(&b, 1), 1);
        assert_eq!(store.get(&a), 12);
        assert_eq!(store.increment(&a, u64::MAX), u64::MAX);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let store = Arc::new(InMemoryScoreStore::new());
        let id = SessionId::new();
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let store = store.clone();
                std::thread::spawn(move || {
                    for _ in 0..1_000 {
                        store.increment(&id, 1);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        assert_eq!(store.get(&id), 8_000);
    }

    #[test]
    fn session_cookie_round_trip() {
        let (jar, id, fresh) = resolve_session(CookieJar::new());
        assert!(fresh);
        let cookie = jar.get(SESSION_COOKIE).unwrap();
        assert_eq!(cookie.value(), id.to_string());
        assert_eq!(cookie.http_only(), Some(true));

        let (_, again, fresh) = resolve_session(jar.clone());
        assert!(!fresh);
        assert_eq!(again, id);
    }

    #[test]
    fn garbage_cookie_starts_a_new_session() {
        let jar = CookieJar::new().add(Cookie::new(SESSION_COOKIE, "not-a-uuid"));
        let (_, _, fresh) = resolve_session(jar);
        assert!(fresh);
    }
}
