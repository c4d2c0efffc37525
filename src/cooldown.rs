//! Per-client vote cooldown
//!
//! The client holds the only state: a `lastVotedAt` cookie carrying the epoch
//! milliseconds of its last accepted vote. The service reads the marker as an
//! explicit input and hands a fresh marker back for the transport to attach,
//! so nothing here touches ambient request state.

use crate::types::Timestamp;

/// Cookie carrying the cooldown marker
pub const COOKIE_NAME: &str = "lastVotedAt";

/// Default cooldown window (60 seconds)
pub const DEFAULT_COOLDOWN_MS: u64 = 60_000;

/// Epoch-millisecond time of the client's last accepted vote
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CooldownMarker(pub Timestamp);

impl CooldownMarker {
    /// Parse a raw cookie value
    ///
    /// Anything that is not a base-10 integer yields `None` and the caller is
    /// treated as having no marker.
    pub fn parse(raw: &str) -> Option<Self> {
        raw.trim().parse::<Timestamp>().ok().map(Self)
    }

    /// Marker value as stored in the cookie
    pub fn value(&self) -> Timestamp {
        self.0
    }
}

/// Outcome of checking a marker against the cooldown window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CooldownCheck {
    /// No marker, or the window has fully elapsed
    Clear,

    /// Still cooling down
    Active { remaining_seconds: u64 },
}

/// Cooldown window and marker handling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CooldownPolicy {
    window_ms: u64,
}

impl Default for CooldownPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_COOLDOWN_MS)
    }
}

impl CooldownPolicy {
    /// Create a policy with the given window length in milliseconds
    pub fn new(window_ms: u64) -> Self {
        Self { window_ms }
    }

    /// Window length in milliseconds
    pub fn window_ms(&self) -> u64 {
        self.window_ms
    }

    /// Window length in whole seconds, rounded up (cookie `Max-Age`)
    pub fn window_seconds(&self) -> u64 {
        self.window_ms.div_ceil(1000)
    }

    /// Check a marker against the window at `now`
    ///
    /// `remaining_seconds` is `ceil((window - elapsed) / 1000)`. A marker
    /// stamped in the future is still cooling down, capped at the full window.
    pub fn check(&self, marker: Option<CooldownMarker>, now: Timestamp) -> CooldownCheck {
        let Some(CooldownMarker(voted_at)) = marker else {
            return CooldownCheck::Clear;
        };

        let window = i128::from(self.window_ms);
        let elapsed = i128::from(now) - i128::from(voted_at);
        if elapsed >= window {
            return CooldownCheck::Clear;
        }

        let left_ms = window - elapsed;
        let remaining = left_ms.div_euclid(1000) + i128::from(left_ms.rem_euclid(1000) != 0);
        let remaining_seconds = u64::try_from(remaining)
            .unwrap_or(u64::MAX)
            .min(self.window_seconds());

        CooldownCheck::Active { remaining_seconds }
    }

    /// Render the `Set-Cookie` value carrying `marker`
    pub fn cookie(&self, marker: CooldownMarker, secure: bool) -> String {
        let mut cookie = format!(
            "{}={}; Path=/; Max-Age={}; HttpOnly; SameSite=Lax",
            COOKIE_NAME,
            marker.value(),
            self.window_seconds()
        );
        if secure {
            cookie.push_str("; Secure");
        }
        cookie
    }
}

/// Pull the raw `lastVotedAt` value out of a `Cookie` request header
pub fn marker_from_cookie_header(header: &str) -> Option<&str> {
    header
        .split(';')
        .map(str::trim)
        .filter_map(|pair| pair.split_once('='))
        .find(|(name, _)| *name == COOKIE_NAME)
        .map(|(_, value)| value)
}
