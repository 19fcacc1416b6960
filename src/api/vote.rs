use chrono::{DateTime, Utc};
use log::{info, warn};

use crate::error::{Error, Result, SubmissionError};
use crate::model::auth::Claims;
use crate::model::ballot::Roster;
use crate::model::session::{SessionStore, Storage};

use super::client::{PortalClient, ReferenceCode};

/// Complete a login: exchange the identity assertion, validate the
/// resulting credential, and replace the session view wholesale.
/// Returns the raw token for the caller to place in the auth cookie.
pub async fn sign_in<S: Storage>(
    client: &PortalClient,
    store: &mut SessionStore<S>,
    id_token: &str,
    now: DateTime<Utc>,
) -> Result<String> {
    let token = client.exchange_identity(id_token).await?;
    let claims: Claims = token.parse()?;
    if claims.is_expired(now) {
        return Err(Error::ExpiredCredential);
    }
    store.login(&claims)?;
    Ok(token)
}

/// Candidate reference data is fetched once per session; later calls are
/// served from the cache.
pub async fn load_roster<'s, S: Storage>(
    client: &PortalClient,
    store: &'s mut SessionStore<S>,
) -> Result<&'s Roster> {
    if store.roster().is_none() {
        let roster = client.fetch_candidates().await?;
        store.set_roster(roster)?;
    }
    Ok(store.roster().unwrap()) // Cached just above.
}

/// Submit the current ballot and settle the session state.
///
/// The caller has already obtained explicit user confirmation and must
/// disable its submit trigger while this is in flight.
///
/// - `has_voted` already set: no request is made at all.
/// - Incomplete ballot: fails locally, no request is made.
/// - Success: the selection is cleared and `has_voted` ratchets to true.
/// - `AlreadyVoted`: a concurrent submission (another tab or device)
///   won the race; `has_voted` still ratchets, since the vote IS
///   recorded, and the error is passed on for the caller to treat as
///   terminal success.
/// - Any other failure: the selection is preserved so a retry never
///   loses the voter's choices.
pub async fn cast_ballot<S: Storage>(
    client: &PortalClient,
    store: &mut SessionStore<S>,
) -> Result<ReferenceCode> {
    if store.has_voted() {
        return Err(SubmissionError::AlreadyVoted.into());
    }
    let payload = store.ballot().to_payload()?;

    match client.submit(&payload).await {
        Ok(reference_code) => {
            info!("Ballot accepted, reference {reference_code}");
            store.mark_voted()?;
            Ok(reference_code)
        }
        Err(Error::Submission(SubmissionError::AlreadyVoted)) => {
            warn!("Concurrent submission already recorded this vote");
            store.mark_voted()?;
            Err(SubmissionError::AlreadyVoted.into())
        }
        Err(err) => Err(err),
    }
}
