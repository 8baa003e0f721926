//! Browser-session surface
//!
//! The host web framework owns session storage and cookies; the login flow
//! only needs a key-value view of the current session to park the state
//! and nonce values between the redirect and the callback.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Session data for the current browser session
///
/// # Examples
///
/// ```
/// use franceconnect_auth::Session;
///
/// let session = Session::new();
/// assert!(session.is_empty());
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
	/// Session data as key-value pairs
	pub data: HashMap<String, serde_json::Value>,
}

impl Session {
	/// Create a new empty session
	pub fn new() -> Self {
		Self {
			data: HashMap::new(),
		}
	}

	/// Set a value in the session
	///
	/// # Examples
	///
	/// ```
	/// use franceconnect_auth::Session;
	/// use serde_json::json;
	///
	/// let mut session = Session::new();
	/// session.set("user_id", json!("123"));
	/// assert_eq!(session.get("user_id"), Some(&json!("123")));
	/// ```
	pub fn set(&mut self, key: impl Into<String>, value: serde_json::Value) {
		self.data.insert(key.into(), value);
	}

	/// Get a value from the session
	pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
		self.data.get(key)
	}

	/// Get a string value from the session
	///
	/// # Examples
	///
	/// ```
	/// use franceconnect_auth::Session;
	/// use serde_json::json;
	///
	/// let mut session = Session::new();
	/// session.set("nonce", json!("abc123"));
	/// assert_eq!(session.get_str("nonce"), Some("abc123"));
	/// assert_eq!(session.get_str("missing"), None);
	/// ```
	pub fn get_str(&self, key: &str) -> Option<&str> {
		self.data.get(key).and_then(serde_json::Value::as_str)
	}

	/// Remove a value from the session, returning it
	///
	/// # Examples
	///
	/// ```
	/// use franceconnect_auth::Session;
	/// use serde_json::json;
	///
	/// let mut session = Session::new();
	/// session.set("state", json!("xyz"));
	/// assert_eq!(session.remove("state"), Some(json!("xyz")));
	/// assert_eq!(session.get("state"), None);
	/// ```
	pub fn remove(&mut self, key: &str) -> Option<serde_json::Value> {
		self.data.remove(key)
	}

	/// Check if the session is empty
	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	/// Clear all session data
	pub fn clear(&mut self) {
		self.data.clear();
	}
}

impl Default for Session {
	fn default() -> Self {
		Self::new()
	}
}
