//! UserInfo endpoint client

use crate::core::{OAuth2Client, SocialAuthError, UserInfoClaims};

/// Fetches identity claims from a provider's UserInfo endpoint
pub struct UserInfoClient {
	client: OAuth2Client,
}

impl UserInfoClient {
	/// Creates a new UserInfo client
	pub fn new(client: OAuth2Client) -> Self {
		Self { client }
	}

	/// Requests the claims for `access_token` with bearer authentication
	///
	/// # Arguments
	///
	/// * `userinfo_endpoint` - The UserInfo endpoint URL
	/// * `access_token` - Access token obtained from the code exchange
	pub async fn get_user_info(
		&self,
		userinfo_endpoint: &str,
		access_token: &str,
	) -> Result<UserInfoClaims, SocialAuthError> {
		let response = self
			.client
			.client()
			.get(userinfo_endpoint)
			.bearer_auth(access_token)
			.send()
			.await
			.map_err(|e| SocialAuthError::Network(e.to_string()))?;

		if !response.status().is_success() {
			let status = response.status();
			let error_body = response
				.text()
				.await
				.unwrap_or_else(|_| "Unknown error".to_string());

			return Err(SocialAuthError::UserInfo(format!(
				"{}: {}",
				status, error_body
			)));
		}

		let claims: UserInfoClaims = response
			.json()
			.await
			.map_err(|e| SocialAuthError::InvalidResponse(e.to_string()))?;

		Ok(claims)
	}
}
