//! Sign-in and session restoration.

use crate::domain::auth::AuthenticatedUser;
use crate::forms::auth::{Credentials, LoginForm};
use crate::repository::AuthGateway;
use crate::repository::errors::RepositoryError;
use crate::services::{ServiceError, ServiceResult};
use crate::session::{TokenStore, decode_claims};

/// Exchanges credentials for a token and stores it.
pub fn login<R>(repo: &R, store: &TokenStore, form: LoginForm) -> ServiceResult<AuthenticatedUser>
where
    R: AuthGateway + ?Sized,
{
    let credentials = Credentials::try_from(form).map_err(|err| {
        log::error!("Failed to validate login form: {err}");
        ServiceError::from(err)
    })?;

    let token = repo
        .login(&credentials.email, &credentials.password)
        .map_err(|err| {
            log::error!("Login failed for {}: {err}", credentials.email);
            ServiceError::from(err)
        })?;

    let claims = decode_claims(&token)?;
    store.save(&token)?;
    log::info!("Signed in as {}", claims.id);

    Ok(AuthenticatedUser::from_claims(claims, token))
}

/// Restores the stored session.
///
/// Returns `None` when there is no token. Tokens that cannot be decoded, have
/// expired or are refused by the backend are removed and also yield `None`.
/// Connection failures are propagated and leave the token in place.
pub fn restore_session<R>(
    repo: &R,
    store: &TokenStore,
    now_epoch_secs: i64,
) -> ServiceResult<Option<AuthenticatedUser>>
where
    R: AuthGateway + ?Sized,
{
    let Some(token) = store.load()? else {
        return Ok(None);
    };

    let claims = match decode_claims(&token) {
        Ok(claims) => claims,
        Err(err) => {
            log::warn!("Discarding unreadable session token: {err}");
            store.clear()?;
            return Ok(None);
        }
    };

    if claims.is_expired(now_epoch_secs) {
        log::info!("Session expired, signing out");
        store.clear()?;
        return Ok(None);
    }

    match repo.verify_token(&token) {
        Ok(()) => Ok(Some(AuthenticatedUser::from_claims(claims, token))),
        Err(err @ RepositoryError::ConnectionError(_)) => {
            log::error!("Failed to verify session: {err}");
            Err(ServiceError::from(err))
        }
        Err(err) => {
            log::warn!("Session rejected by backend: {err}");
            store.clear()?;
            Ok(None)
        }
    }
}

/// Like [`restore_session`] but fails with [`ServiceError::Unauthorized`]
/// when nobody is signed in.
pub fn require_session<R>(
    repo: &R,
    store: &TokenStore,
    now_epoch_secs: i64,
) -> ServiceResult<AuthenticatedUser>
where
    R: AuthGateway + ?Sized,
{
    restore_session(repo, store, now_epoch_secs)?.ok_or(ServiceError::Unauthorized)
}

pub fn logout(store: &TokenStore) -> ServiceResult<()> {
    store.clear()?;
    log::info!("Signed out");
    Ok(())
}
