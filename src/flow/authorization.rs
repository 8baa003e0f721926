//! Authorization redirect construction and state handling

use serde::Deserialize;
use url::Url;

use crate::core::{ClientConfig, SocialAuthError, TOKEN_LENGTH, secure_token};
use crate::session::Session;

/// Session key holding the CSRF state between redirect and callback
pub const SESSION_STATE_KEY: &str = "oauth_state";

/// Query parameters received on the OAuth2 callback
#[derive(Debug, Clone, Deserialize)]
pub struct CallbackParams {
	/// Authorization code to exchange at the token endpoint
	pub code: String,
	/// State parameter echoed by the provider
	pub state: String,
}

/// Builds authorize URLs and owns the state parameter lifecycle
pub struct AuthorizationFlow {
	config: ClientConfig,
}

impl AuthorizationFlow {
	/// Creates a new authorization flow
	pub fn new(config: ClientConfig) -> Self {
		Self { config }
	}

	/// Builds the authorization redirect URL
	///
	/// # Arguments
	///
	/// * `authorize_endpoint` - The authorization endpoint URL
	/// * `state` - CSRF token echoed back on the callback
	/// * `extra_params` - Provider-specific query parameters, appended last
	///
	/// # Returns
	///
	/// The full URL to redirect the user agent to
	pub fn build_url(
		&self,
		authorize_endpoint: &str,
		state: &str,
		extra_params: &[(&str, &str)],
	) -> Result<String, SocialAuthError> {
		let mut url = Url::parse(authorize_endpoint).map_err(|e| {
			SocialAuthError::Configuration(format!("Invalid authorize endpoint: {}", e))
		})?;

		{
			let mut pairs = url.query_pairs_mut();
			pairs.append_pair("client_id", &self.config.client_id);
			pairs.append_pair("redirect_uri", &self.config.redirect_uri);
			pairs.append_pair("scope", &self.config.scope());
			pairs.append_pair("response_type", "code");
			pairs.append_pair("state", state);
			for (key, value) in extra_params {
				pairs.append_pair(key, value);
			}
		}

		Ok(url.into())
	}

	/// Issues a fresh state token and parks it in the session
	pub fn issue_state(&self, session: &mut Session) -> String {
		let state = secure_token(TOKEN_LENGTH);
		session.set(SESSION_STATE_KEY, serde_json::Value::String(state.clone()));
		state
	}

	/// One-time check of the callback state against the session copy
	///
	/// The session copy is removed whatever the outcome, so a state value
	/// never survives its first check.
	pub fn validate_state(
		&self,
		session: &mut Session,
		inbound_state: &str,
	) -> Result<(), SocialAuthError> {
		let stored = session.remove(SESSION_STATE_KEY);
		match stored.as_ref().and_then(serde_json::Value::as_str) {
			Some(stored) if stored == inbound_state => Ok(()),
			_ => Err(SocialAuthError::InvalidState),
		}
	}
}
