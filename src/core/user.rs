//! Normalized user identity

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Identity produced by a completed FranceConnect login
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialUser {
	/// Stable subject identifier (the `sub` claim)
	pub id: String,

	/// Display name assembled as `"<given_name> <family_name>"`
	pub name: String,

	/// Email address
	pub email: String,

	/// Never populated by FranceConnect
	#[serde(skip_serializing_if = "Option::is_none")]
	pub nickname: Option<String>,

	/// Never populated by FranceConnect
	#[serde(skip_serializing_if = "Option::is_none")]
	pub avatar: Option<String>,

	/// Every claim the userinfo endpoint returned, untouched
	pub raw: Map<String, Value>,

	/// Access token from the code exchange; filled in by `user()`
	pub access_token: String,

	/// Refresh token, when granted
	#[serde(skip_serializing_if = "Option::is_none")]
	pub refresh_token: Option<String>,

	/// Access token lifetime in seconds
	#[serde(skip_serializing_if = "Option::is_none")]
	pub expires_in: Option<i64>,
}
