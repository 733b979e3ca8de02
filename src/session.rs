use crate::store::{SessionStore, SESSION_KEY};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub id: String,
    pub email: String,
}

#[derive(Debug, Error)]
pub enum AuthError {
    /// Wrong credentials, an empty identity list, or a failed verification
    /// call. Deliberately one variant: the user-facing message never reveals
    /// which of those happened.
    #[error("Invalid credentials")]
    InvalidCredentials,
}

/// Verifies admin credentials against an external backend. One-shot call, no
/// retries. A non-empty identity list means success; the first entry is the
/// authenticated identity.
pub trait CredentialVerifier {
    fn verify(&self, email: &str, password: &str) -> anyhow::Result<Vec<AdminIdentity>>;
}

/// POSTs `{email, password}` to the configured endpoint and expects a JSON
/// array of identity objects back.
pub struct HttpCredentialVerifier {
    endpoint: String,
    client: reqwest::blocking::Client,
}

impl HttpCredentialVerifier {
    pub fn new(endpoint: String) -> Self {
        HttpCredentialVerifier {
            endpoint,
            client: reqwest::blocking::Client::new(),
        }
    }
}

impl CredentialVerifier for HttpCredentialVerifier {
    fn verify(&self, email: &str, password: &str) -> anyhow::Result<Vec<AdminIdentity>> {
        let resp = self
            .client
            .post(&self.endpoint)
            .json(&serde_json::json!({ "email": email, "password": password }))
            .send()?
            .error_for_status()?;
        let identities: Vec<AdminIdentity> = resp.json()?;
        Ok(identities)
    }
}

/// Holds the current authenticated admin, if any. All roster mutation goes
/// through a gate check at the request layer.
#[derive(Default)]
pub struct SessionGate {
    current: Option<AdminIdentity>,
}

impl SessionGate {
    /// Best-effort restore of a persisted session. The snapshot is untrusted
    /// input: anything that fails to read or deserialize leaves the gate
    /// anonymous instead of failing the caller.
    pub fn restore(store: &SessionStore) -> Self {
        let current = match store.get_json(SESSION_KEY) {
            Ok(Some(value)) => match serde_json::from_value::<AdminIdentity>(value) {
                Ok(identity) => Some(identity),
                Err(e) => {
                    log::warn!("persisted session snapshot is malformed, ignoring: {e}");
                    None
                }
            },
            Ok(None) => None,
            Err(e) => {
                log::warn!("failed to read persisted session, starting anonymous: {e}");
                None
            }
        };
        SessionGate { current }
    }

    pub fn current(&self) -> Option<&AdminIdentity> {
        self.current.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.current.is_some()
    }

    /// Delegates to the verifier and, on success, persists the snapshot.
    /// Persist failures are logged and do not fail the login.
    pub fn login(
        &mut self,
        store: &SessionStore,
        verifier: &dyn CredentialVerifier,
        email: &str,
        password: &str,
    ) -> Result<AdminIdentity, AuthError> {
        let identities = match verifier.verify(email, password) {
            Ok(v) => v,
            Err(e) => {
                log::warn!("credential verification call failed: {e}");
                return Err(AuthError::InvalidCredentials);
            }
        };

        let Some(identity) = identities.into_iter().next() else {
            return Err(AuthError::InvalidCredentials);
        };

        match serde_json::to_value(&identity) {
            Ok(snapshot) => {
                if let Err(e) = store.set_json(SESSION_KEY, &snapshot) {
                    log::warn!("failed to persist session snapshot: {e}");
                }
            }
            Err(e) => log::warn!("failed to serialize session snapshot: {e}"),
        }

        self.current = Some(identity.clone());
        Ok(identity)
    }

    /// Clears the in-memory identity and removes the persisted snapshot.
    pub fn logout(&mut self, store: &SessionStore) {
        self.current = None;
        if let Err(e) = store.delete(SESSION_KEY) {
            log::warn!("failed to remove persisted session snapshot: {e}");
        }
    }
}
