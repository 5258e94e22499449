use serde::{Deserialize, Serialize};

/// Claims carried by the bearer token issued at login.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct SessionClaims {
    /// Identifier of the signed-in user.
    pub id: String,
    /// Expiry as seconds since the Unix epoch.
    pub exp: i64,
}

impl SessionClaims {
    pub fn is_expired(&self, now_epoch_secs: i64) -> bool {
        self.exp < now_epoch_secs
    }
}

/// User restored from a valid session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: String,
    pub token: String,
    pub expires_at: i64,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: SessionClaims, token: String) -> Self {
        Self {
            id: claims.id,
            token,
            expires_at: claims.exp,
        }
    }
}
