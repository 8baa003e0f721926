//! One-time nonce records for OIDC replay protection
//!
//! FranceConnect echoes the nonce sent with the code exchange inside the
//! signed ID token. The value on the wire is a composite
//! `<nonce>-<record-id>`: the raw nonce lives in the caller's session, the
//! record id points at a persisted copy, and validation cross-checks the
//! echoed claim against both before consuming the record.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::core::{SocialAuthError, TOKEN_LENGTH, secure_token};
use crate::session::Session;

/// Session key holding the raw nonce between redirect and callback
pub const OPENID_SESSION_NONCE: &str = "open_id_session_nonce";

/// Separator joining nonce and record id in the composite wire value
const COMPOSITE_SEPARATOR: char = '-';

/// A persisted one-time nonce
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NonceRecord {
	/// Store-assigned identifier; never contains `-`
	pub id: String,
	/// Random token generated at redirect time
	pub nonce: String,
	/// Creation timestamp
	pub created_at: DateTime<Utc>,
}

/// Storage capability for one-time nonce records
///
/// Implementations back the record with whatever the host application uses
/// for short-lived data (a database row, a Redis key). Assigned ids must
/// be unique and must not contain `-`, which delimits the composite wire
/// value.
#[async_trait]
pub trait NonceStore: Send + Sync {
	/// Persists a new record for `nonce` and assigns its id
	async fn create(&self, nonce: &str) -> Result<NonceRecord, SocialAuthError>;

	/// Looks a record up by its nonce value without consuming it
	async fn find_by_nonce(&self, nonce: &str) -> Result<Option<NonceRecord>, SocialAuthError>;

	/// Removes the record with `id` and returns it
	///
	/// Get-and-delete must be atomic: of two concurrent callbacks replaying
	/// the same id, at most one may receive the record.
	async fn take_by_id(&self, id: &str) -> Result<Option<NonceRecord>, SocialAuthError>;
}

/// In-memory nonce store for development and testing
///
/// Records live in process memory, so this implementation is not suitable
/// for multi-instance deployments. Ids are monotonically increasing
/// decimal integers, mirroring an autoincrement column.
pub struct InMemoryNonceStore {
	inner: RwLock<StoreInner>,
	ttl: Option<Duration>,
}

struct StoreInner {
	records: HashMap<String, NonceRecord>,
	next_id: u64,
}

impl InMemoryNonceStore {
	/// Creates a store whose records never expire
	pub fn new() -> Self {
		Self {
			inner: RwLock::new(StoreInner {
				records: HashMap::new(),
				next_id: 1,
			}),
			ttl: None,
		}
	}

	/// Creates a store that drops records older than `ttl` on insert
	///
	/// Reclaims records from abandoned logins; a TTL shorter than the time
	/// a user can spend on the provider's pages will fail legitimate
	/// callbacks.
	pub fn with_ttl(ttl: Duration) -> Self {
		Self {
			inner: RwLock::new(StoreInner {
				records: HashMap::new(),
				next_id: 1,
			}),
			ttl: Some(ttl),
		}
	}

	async fn cleanup_expired(&self) {
		if let Some(ttl) = self.ttl {
			let cutoff = Utc::now() - ttl;
			let mut inner = self.inner.write().await;
			inner.records.retain(|_, record| record.created_at > cutoff);
		}
	}
}

impl Default for InMemoryNonceStore {
	fn default() -> Self {
		Self::new()
	}
}

#[async_trait]
impl NonceStore for InMemoryNonceStore {
	async fn create(&self, nonce: &str) -> Result<NonceRecord, SocialAuthError> {
		// Cleanup expired entries before storing
		self.cleanup_expired().await;

		let mut inner = self.inner.write().await;
		let id = inner.next_id.to_string();
		inner.next_id += 1;

		let record = NonceRecord {
			id: id.clone(),
			nonce: nonce.to_string(),
			created_at: Utc::now(),
		};
		inner.records.insert(id, record.clone());
		Ok(record)
	}

	async fn find_by_nonce(&self, nonce: &str) -> Result<Option<NonceRecord>, SocialAuthError> {
		let inner = self.inner.read().await;
		Ok(inner
			.records
			.values()
			.find(|record| record.nonce == nonce)
			.cloned())
	}

	async fn take_by_id(&self, id: &str) -> Result<Option<NonceRecord>, SocialAuthError> {
		// Single write-lock acquisition keeps get-and-delete atomic
		let mut inner = self.inner.write().await;
		Ok(inner.records.remove(id))
	}
}

/// Issues, composes, and validates one-time nonces over an injected store
#[derive(Clone)]
pub struct NonceManager {
	store: Arc<dyn NonceStore>,
}

impl NonceManager {
	/// Creates a manager over the given store
	pub fn new(store: Arc<dyn NonceStore>) -> Self {
		Self { store }
	}

	/// Redirect-time step: creates a record and mirrors its nonce into the
	/// session under [`OPENID_SESSION_NONCE`]
	pub async fn issue(&self, session: &mut Session) -> Result<NonceRecord, SocialAuthError> {
		let nonce = secure_token(TOKEN_LENGTH);
		let record = self.store.create(&nonce).await?;
		session.set(OPENID_SESSION_NONCE, serde_json::Value::String(nonce));

		tracing::debug!(record_id = %record.id, "Issued one-time nonce");
		Ok(record)
	}

	/// Code-exchange step: rebuilds the composite wire value from the
	/// session nonce and its persisted record
	///
	/// A missing session value or record means the redirect step never ran
	/// for this session, or the record was tampered with; both are fatal.
	pub async fn compose(&self, session: &Session) -> Result<String, SocialAuthError> {
		let nonce = session.get_str(OPENID_SESSION_NONCE).ok_or_else(|| {
			SocialAuthError::NonceRecordNotFound("no nonce in session".to_string())
		})?;

		let record = self.store.find_by_nonce(nonce).await?.ok_or_else(|| {
			SocialAuthError::NonceRecordNotFound(
				"no record matching the session nonce".to_string(),
			)
		})?;

		Ok(format!("{}{}{}", nonce, COMPOSITE_SEPARATOR, record.id))
	}

	/// Callback step: checks the nonce claim echoed in the ID token
	///
	/// Splits the claim on its last `-` into `(nonce, record id)`, consumes
	/// the record, and compares the stored nonce with the echoed one. The
	/// record is gone after this call whatever the outcome, so a replayed
	/// ID token can never validate twice.
	///
	/// Returns whether the claim is invalid; storage failures surface as
	/// errors, never as validity.
	pub async fn is_invalid(&self, claim: Option<&str>) -> Result<bool, SocialAuthError> {
		let Some(claim) = claim else {
			return Ok(true);
		};

		let Some((nonce, record_id)) = claim.rsplit_once(COMPOSITE_SEPARATOR) else {
			return Ok(true);
		};

		let Some(record) = self.store.take_by_id(record_id).await? else {
			tracing::warn!(record_id = %record_id, "Nonce record missing or already consumed");
			return Ok(true);
		};

		Ok(record.nonce != nonce)
	}
}
