use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::model::auth::{Claims, Role};
use crate::model::ballot::{Ballot, CandidateId, Category, Roster};

use super::storage::Storage;

/// The locally reconciled view of the logged-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    pub id: String,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub faculty_code: String,
    pub faculty_name: String,
    has_voted: bool,
}

impl SessionUser {
    fn from_claims(claims: &Claims, has_voted: bool) -> Self {
        Self {
            id: claims.id.clone(),
            name: claims.name.clone(),
            email: claims.email.clone(),
            role: claims.role,
            faculty_code: claims.faculty_code.clone(),
            faculty_name: claims.faculty_name.clone(),
            has_voted,
        }
    }

    /// Once true this can only be reset by a fresh login.
    pub fn has_voted(&self) -> bool {
        self.has_voted
    }
}

/// The durable record. The in-progress ballot is deliberately absent so
/// it can never outlive the session that started it.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    user: Option<SessionUser>,
    is_logged_in: bool,
    candidates_data: Option<Roster>,
}

/// The single shared mutable resource of the portal.
///
/// `has_voted` moves through exactly three actions: `login` replaces the
/// view wholesale, `mark_voted` ratchets it to true, and `logout` clears
/// the session. `refresh` reconciles against the token with a monotonic
/// OR, so a stale not-yet-reissued credential can never reopen a
/// completed ballot.
pub struct SessionStore<S: Storage> {
    storage: S,
    namespace: String,
    user: Option<SessionUser>,
    is_logged_in: bool,
    roster: Option<Roster>,
    ballot: Ballot,
}

impl<S: Storage> SessionStore<S> {
    /// Rebuild the store from durable storage at application start.
    /// An unreadable record falls back to a clean session.
    pub fn hydrate(storage: S, namespace: &str) -> Result<Self> {
        let persisted = match storage.read(namespace)? {
            Some(raw) => serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("Discarding corrupt session record: {err}");
                PersistedSession::default()
            }),
            None => PersistedSession::default(),
        };

        Ok(Self {
            storage,
            namespace: namespace.to_string(),
            user: persisted.user,
            is_logged_in: persisted.is_logged_in,
            roster: persisted.candidates_data,
            ballot: Ballot::default(),
        })
    }

    pub fn user(&self) -> Option<&SessionUser> {
        self.user.as_ref()
    }

    pub fn is_logged_in(&self) -> bool {
        self.is_logged_in
    }

    pub fn role(&self) -> Option<Role> {
        self.user.as_ref().map(|user| user.role)
    }

    pub fn has_voted(&self) -> bool {
        self.user.as_ref().is_some_and(SessionUser::has_voted)
    }

    /// A fresh login replaces the user view wholesale, including
    /// `has_voted` as asserted by the new credential.
    pub fn login(&mut self, claims: &Claims) -> Result<()> {
        info!("Login: {} ({})", claims.id, claims.role);
        self.user = Some(SessionUser::from_claims(claims, claims.has_voted));
        self.is_logged_in = true;
        self.ballot.clear();
        self.persist()
    }

    /// Reconcile the session against the current credential.
    ///
    /// Invalid or expired tokens clear the user view. Otherwise the view
    /// is rebuilt from the claims with
    /// `has_voted = has_voted_local OR has_voted_from_claims`.
    pub fn refresh(&mut self, token: Option<&str>, now: DateTime<Utc>) -> Result<()> {
        let Some(raw) = token else {
            return Ok(());
        };

        let claims = match raw.parse::<Claims>() {
            Ok(claims) if !claims.is_expired(now) => claims,
            Ok(_) => {
                warn!("Session credential expired, clearing user view");
                return self.clear_user();
            }
            Err(err) => {
                warn!("Unparseable session credential, clearing user view: {err}");
                return self.clear_user();
            }
        };

        let voted_locally = self.has_voted();
        self.user = Some(SessionUser::from_claims(
            &claims,
            voted_locally || claims.has_voted,
        ));
        self.is_logged_in = true;
        self.persist()
    }

    pub fn roster(&self) -> Option<&Roster> {
        self.roster.as_ref()
    }

    /// Cache the candidate reference data for the rest of the session.
    pub fn set_roster(&mut self, roster: Roster) -> Result<()> {
        self.roster = Some(roster);
        self.persist()
    }

    pub fn ballot(&self) -> &Ballot {
        &self.ballot
    }

    /// Forward one toggle event to the selection engine.
    pub fn toggle(&mut self, category: Category, id: CandidateId) {
        self.ballot.toggle(category, id);
    }

    /// Ratchet `has_voted` after a confirmed (or concurrently won)
    /// submission and discard the now-cast selection.
    pub fn mark_voted(&mut self) -> Result<()> {
        if let Some(user) = &mut self.user {
            info!("Vote recorded for {}", user.id);
            user.has_voted = true;
        }
        self.ballot.clear();
        self.persist()
    }

    /// End the session: user view, cached roster, in-progress selection,
    /// and the durable record all go, so nothing leaks to the next user
    /// of the same machine.
    pub fn logout(&mut self) -> Result<()> {
        info!("Logout");
        self.user = None;
        self.is_logged_in = false;
        self.roster = None;
        self.ballot.clear();
        self.storage.delete(&self.namespace)
    }

    fn clear_user(&mut self) -> Result<()> {
        self.user = None;
        self.is_logged_in = false;
        self.persist()
    }

    fn persist(&mut self) -> Result<()> {
        let record = PersistedSession {
            user: self.user.clone(),
            is_logged_in: self.is_logged_in,
            candidates_data: self.roster.clone(),
        };
        self.storage
            .write(&self.namespace, &serde_json::to_string(&record)?)
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use crate::model::auth::{example_claims, token_for};
    use crate::model::ballot::{Selection, ABSTAIN};
    use crate::model::session::MemoryStorage;

    use super::*;

    const NAMESPACE: &str = "vote-storage";

    fn fresh_store() -> SessionStore<MemoryStorage> {
        SessionStore::hydrate(MemoryStorage::default(), NAMESPACE).unwrap()
    }

    fn future_exp() -> i64 {
        (Utc::now() + chrono::Duration::hours(1)).timestamp()
    }

    #[test]
    fn hydrate_empty_storage() {
        let store = fresh_store();
        assert!(!store.is_logged_in());
        assert!(store.user().is_none());
        assert!(!store.has_voted());
    }

    #[test]
    fn login_replaces_view_wholesale() {
        let mut store = fresh_store();
        store
            .login(&example_claims(Role::Member, false, future_exp()))
            .unwrap();

        assert!(store.is_logged_in());
        assert_eq!(Some(Role::Member), store.role());
        assert!(!store.has_voted());
    }

    #[test]
    fn refresh_ratchets_has_voted() {
        let mut store = fresh_store();
        store
            .login(&example_claims(Role::Member, false, future_exp()))
            .unwrap();
        store.mark_voted().unwrap();

        // The token has not been reissued and still claims has_voted=false.
        let stale = token_for(&example_claims(Role::Member, false, future_exp()));
        store.refresh(Some(&stale), Utc::now()).unwrap();
        assert!(store.has_voted(), "ratchet must not regress");

        // A fresh login, by contrast, trusts the new credential.
        store
            .login(&example_claims(Role::Member, false, future_exp()))
            .unwrap();
        assert!(!store.has_voted());
    }

    #[test]
    fn refresh_adopts_server_confirmed_vote() {
        // A vote submitted from another device: the reissued token is the
        // first place we learn about it.
        let mut store = fresh_store();
        store
            .login(&example_claims(Role::Member, false, future_exp()))
            .unwrap();

        let reissued = token_for(&example_claims(Role::Member, true, future_exp()));
        store.refresh(Some(&reissued), Utc::now()).unwrap();
        assert!(store.has_voted());
    }

    #[test]
    fn refresh_with_expired_token_clears_user() {
        let mut store = fresh_store();
        store
            .login(&example_claims(Role::Member, false, future_exp()))
            .unwrap();

        let expired = token_for(&example_claims(Role::Member, false, 1));
        store.refresh(Some(&expired), Utc::now()).unwrap();
        assert!(!store.is_logged_in());
        assert!(store.user().is_none());
    }

    #[test]
    fn refresh_without_token_is_a_noop() {
        let mut store = fresh_store();
        store
            .login(&example_claims(Role::Member, false, future_exp()))
            .unwrap();
        store.refresh(None, Utc::now()).unwrap();
        assert!(store.is_logged_in());
    }

    #[test]
    fn selection_is_not_persisted() {
        let mut storage = MemoryStorage::default();
        {
            let mut store = SessionStore::hydrate(&mut storage, NAMESPACE).unwrap();
            store
                .login(&example_claims(Role::Member, false, future_exp()))
                .unwrap();
            store.toggle(Category::Organization, 1);
            store.toggle(Category::Council, 2);
        }

        let rehydrated = SessionStore::hydrate(&mut storage, NAMESPACE).unwrap();
        assert!(rehydrated.is_logged_in());
        assert_eq!(
            Selection::Unselected,
            *rehydrated.ballot().selection(Category::Organization)
        );
        assert_eq!(
            Selection::Unselected,
            *rehydrated.ballot().selection(Category::Council)
        );
    }

    #[test]
    fn mark_voted_clears_selection() {
        let mut store = fresh_store();
        store
            .login(&example_claims(Role::Member, false, future_exp()))
            .unwrap();
        store.toggle(Category::Organization, 1);
        store.toggle(Category::Club, ABSTAIN);
        store.toggle(Category::Council, 2);

        store.mark_voted().unwrap();
        assert!(store.has_voted());
        assert!(!store.ballot().is_complete());
    }

    #[test]
    fn logout_clears_everything() {
        let mut storage = MemoryStorage::default();
        {
            let mut store = SessionStore::hydrate(&mut storage, NAMESPACE).unwrap();
            store
                .login(&example_claims(Role::Member, false, future_exp()))
                .unwrap();
            store.set_roster(Roster::default()).unwrap();
            store.toggle(Category::Organization, 1);
            store.logout().unwrap();

            assert!(!store.is_logged_in());
            assert!(store.roster().is_none());
            assert!(!store.ballot().is_complete());
        }

        // The durable record is gone too.
        assert_eq!(None, storage.read(NAMESPACE).unwrap());
    }

    #[test]
    fn corrupt_record_falls_back_to_clean_session() {
        let mut storage = MemoryStorage::default();
        storage.write(NAMESPACE, "not json at all").unwrap();

        let store = SessionStore::hydrate(&mut storage, NAMESPACE).unwrap();
        assert!(!store.is_logged_in());
    }
}
