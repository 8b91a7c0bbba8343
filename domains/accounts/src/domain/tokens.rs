//! Signed single-purpose tokens for email links
//!
//! Tokens are ephemeral and never persisted. A token is
//! `<base36 day>-<truncated hex HMAC-SHA256>` where the MAC covers the
//! user id, the day the token was minted, and (for registration tokens)
//! the account's activation flag. Flipping `is_active` on confirmation
//! therefore invalidates every outstanding registration token for that
//! user, making confirmation links single-use without any server-side
//! token state.
//!
//! Email links also carry the user id as URL-safe base64 (`uidb64`), so
//! verification can load the user before checking the MAC.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use uuid::Uuid;

use crate::domain::entities::User;

type HmacSha256 = Hmac<Sha256>;

/// Token validity window in days (inclusive of the mint day)
const TOKEN_TIMEOUT_DAYS: u64 = 3;

/// Length of the truncated hex MAC in the token string
const MAC_HEX_LEN: usize = 20;

const SECONDS_PER_DAY: i64 = 86_400;

/// What a token authorizes. Purposes are cryptographically separated so a
/// password-reset token can never pass as a registration token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenPurpose {
    Registration,
    PasswordReset,
}

impl TokenPurpose {
    fn salt(self) -> &'static str {
        match self {
            TokenPurpose::Registration => "accounts.registration",
            TokenPurpose::PasswordReset => "accounts.password-reset",
        }
    }
}

/// Mints and checks signed tokens for one purpose.
#[derive(Clone)]
pub struct TokenGenerator {
    key: Vec<u8>,
    purpose: TokenPurpose,
    timeout_days: u64,
}

impl TokenGenerator {
    pub fn new(secret: &str, purpose: TokenPurpose) -> Self {
        Self {
            key: format!("{}:{}", purpose.salt(), secret).into_bytes(),
            purpose,
            timeout_days: TOKEN_TIMEOUT_DAYS,
        }
    }

    /// Mint a token for `user`, valid for the configured window.
    pub fn mint(&self, user: &User) -> String {
        self.mint_at(user, current_day())
    }

    /// Check a token against `user`.
    ///
    /// Fails on malformed input, a day stamp in the future or outside the
    /// validity window, or a MAC mismatch. The MAC comparison is
    /// constant-time.
    pub fn check(&self, user: &User, token: &str) -> bool {
        let Some((day_part, mac_part)) = token.split_once('-') else {
            return false;
        };
        let Some(day) = base36_decode(day_part) else {
            return false;
        };

        let today = current_day();
        if day > today || today - day >= self.timeout_days {
            return false;
        }

        constant_time_eq(mac_part, &self.mac(user, day))
    }

    fn mint_at(&self, user: &User, day: u64) -> String {
        format!("{}-{}", base36_encode(day), self.mac(user, day))
    }

    fn mac(&self, user: &User, day: u64) -> String {
        let value = match self.purpose {
            TokenPurpose::Registration => {
                format!("{}{}{}", user.id, day, user.is_active)
            }
            TokenPurpose::PasswordReset => format!("{}{}", user.id, day),
        };

        let mut mac = HmacSha256::new_from_slice(&self.key)
            .expect("HMAC accepts keys of any length");
        mac.update(value.as_bytes());

        let digest = hex::encode(mac.finalize().into_bytes());
        digest[..MAC_HEX_LEN].to_string()
    }
}

/// Days since the Unix epoch
fn current_day() -> u64 {
    (chrono::Utc::now().timestamp() / SECONDS_PER_DAY) as u64
}

fn base36_encode(mut value: u64) -> String {
    const DIGITS: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";

    if value == 0 {
        return "0".to_string();
    }

    let mut out = Vec::new();
    while value > 0 {
        out.push(DIGITS[(value % 36) as usize]);
        value /= 36;
    }
    out.reverse();
    String::from_utf8_lossy(&out).into_owned()
}

fn base36_decode(s: &str) -> Option<u64> {
    if s.is_empty() || !s.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    u64::from_str_radix(s, 36).ok()
}

/// Byte-wise constant-time string comparison
fn constant_time_eq(a: &str, b: &str) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.bytes()
        .zip(b.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}

/// Encode a user id for URL embedding.
pub fn uid_encode(id: Uuid) -> String {
    URL_SAFE_NO_PAD.encode(id.to_string().as_bytes())
}

/// Decode a `uidb64` path segment back into a user id.
pub fn uid_decode(uidb64: &str) -> Option<Uuid> {
    let bytes = URL_SAFE_NO_PAD.decode(uidb64).ok()?;
    let s = String::from_utf8(bytes).ok()?;
    Uuid::parse_str(&s).ok()
}
