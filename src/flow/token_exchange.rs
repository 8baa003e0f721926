//! Authorization-code-for-token exchange
//!
//! Trades the callback's authorization code for tokens using the
//! authorization_code grant type.

use std::collections::HashMap;

use crate::core::{ClientConfig, OAuth2Client, SocialAuthError, TokenResponse};

/// Code exchange flow handler
pub struct TokenExchangeFlow {
	client: OAuth2Client,
	config: ClientConfig,
}

impl TokenExchangeFlow {
	/// Creates a new code exchange flow
	pub fn new(client: OAuth2Client, config: ClientConfig) -> Self {
		Self { client, config }
	}

	/// Exchanges an authorization code for a token response
	///
	/// # Arguments
	///
	/// * `token_endpoint` - The token endpoint URL
	/// * `code` - The authorization code received on the callback
	/// * `extra_params` - Provider-specific body parameters
	///
	/// # Returns
	///
	/// The token response containing an access_token and, for OpenID
	/// Connect providers, an id_token
	pub async fn exchange(
		&self,
		token_endpoint: &str,
		code: &str,
		extra_params: &[(&str, &str)],
	) -> Result<TokenResponse, SocialAuthError> {
		let mut params = HashMap::new();
		params.insert("grant_type", "authorization_code");
		params.insert("client_id", &self.config.client_id);
		params.insert("client_secret", &self.config.client_secret);
		params.insert("code", code);
		params.insert("redirect_uri", &self.config.redirect_uri);
		params.extend(extra_params.iter().copied());

		let response = self
			.client
			.client()
			.post(token_endpoint)
			.form(&params)
			.send()
			.await
			.map_err(|e| SocialAuthError::Network(e.to_string()))?;

		if !response.status().is_success() {
			let status = response.status();
			let error_body = response
				.text()
				.await
				.unwrap_or_else(|_| "Unknown error".to_string());

			return Err(SocialAuthError::TokenExchange(format!(
				"{}: {}",
				status, error_body
			)));
		}

		let token_response: TokenResponse = response
			.json()
			.await
			.map_err(|e| SocialAuthError::InvalidResponse(e.to_string()))?;

		Ok(token_response)
	}
}
