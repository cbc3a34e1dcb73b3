use std::fmt;

use zeroize::{Zeroize, ZeroizeOnDrop};

/// Opaque bearer token issued by the authentication provider.
///
/// The secret is wiped from memory when the token is dropped and never printed.
#[derive(Clone, PartialEq, Eq, Zeroize, ZeroizeOnDrop)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(****)")
    }
}

/// Supplies the current access token, if a user is signed in.
pub trait SessionProvider: Send + Sync {
    fn access_token(&self) -> Option<AccessToken>;
}

/// Session holding a token handed over by the login flow.
#[derive(Debug, Default)]
pub struct StaticSession {
    token: std::sync::RwLock<Option<AccessToken>>,
}

impl StaticSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sign_in(&self, token: AccessToken) {
        if let Ok(mut slot) = self.token.write() {
            *slot = Some(token);
        }
    }

    pub fn sign_out(&self) {
        if let Ok(mut slot) = self.token.write() {
            *slot = None;
        }
    }
}

impl SessionProvider for StaticSession {
    fn access_token(&self) -> Option<AccessToken> {
        self.token.read().ok().and_then(|t| t.clone())
    }
}
