//! Generic OAuth2 client configuration

use serde::{Deserialize, Serialize};

/// Credentials and scopes shared by the OAuth2 flows
///
/// Provider adapters build this from their own configuration and hand it
/// to the flow components at construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
	/// OAuth2 client ID
	pub client_id: String,
	/// OAuth2 client secret
	pub client_secret: String,
	/// Redirect URI registered with the provider
	pub redirect_uri: String,
	/// Scopes requested at authorization
	pub scopes: Vec<String>,
}

impl ClientConfig {
	/// Creates a new client configuration
	pub fn new(
		client_id: String,
		client_secret: String,
		redirect_uri: String,
		scopes: Vec<String>,
	) -> Self {
		Self {
			client_id,
			client_secret,
			redirect_uri,
			scopes,
		}
	}

	/// Scope string for the authorize request, space-delimited per RFC 6749
	pub fn scope(&self) -> String {
		self.scopes.join(" ")
	}
}
