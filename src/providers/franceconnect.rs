//! FranceConnect OIDC provider
//!
//! Adapter for the French state identity federation. FranceConnect is an
//! OpenID Connect provider with fixed `/api/v1` endpoints, HS256-signed ID
//! tokens, and a mandatory one-time nonce carried in the token request and
//! echoed back inside the ID token.

use std::sync::Arc;

use url::Url;

use crate::core::{
	ClientConfig, OAuth2Client, SocialAuthError, SocialUser, TOKEN_LENGTH, UserInfoClaims,
	secure_token,
};
use crate::flow::{AuthorizationFlow, CallbackParams, NonceManager, NonceStore, TokenExchangeFlow};
use crate::oidc::{IdTokenDecoder, UserInfoClient};
use crate::session::Session;

/// Production FranceConnect host
pub const PRODUCTION_BASE_URL: &str = "https://app.franceconnect.gouv.fr";

/// Integration (sandbox) FranceConnect host
pub const SANDBOX_BASE_URL: &str = "https://fcp.integ01.dev-franceconnect.fr";

const AUTHORIZE_PATH: &str = "/api/v1/authorize";
const TOKEN_PATH: &str = "/api/v1/token";
const USERINFO_PATH: &str = "/api/v1/userinfo";
const LOGOUT_PATH: &str = "/api/v1/logout";

/// FranceConnect provider configuration
///
/// Credentials are issued per environment by the FranceConnect partner
/// portal; sandbox credentials only work against the integration host.
#[derive(Debug, Clone)]
pub struct FranceConnectConfig {
	/// Client ID issued by FranceConnect
	pub client_id: String,
	/// Client secret; also the HS256 key for ID token signatures
	pub client_secret: String,
	/// Redirect URI registered with FranceConnect
	pub redirect_uri: String,
	/// Selects the integration host instead of production
	pub sandbox: bool,
	/// Overrides both hosts; for tests against a local IdP
	pub base_url: Option<String>,
}

impl FranceConnectConfig {
	/// Creates a production configuration
	pub fn new(client_id: String, client_secret: String, redirect_uri: String) -> Self {
		Self {
			client_id,
			client_secret,
			redirect_uri,
			sandbox: false,
			base_url: None,
		}
	}

	/// Creates a sandbox configuration against the integration host
	pub fn sandbox(client_id: String, client_secret: String, redirect_uri: String) -> Self {
		Self {
			sandbox: true,
			..Self::new(client_id, client_secret, redirect_uri)
		}
	}

	/// Points the adapter at an explicit base URL
	pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
		self.base_url = Some(base_url.into());
		self
	}
}

/// FranceConnect OIDC provider
///
/// Composes the generic OAuth2 flows with FranceConnect's fixed endpoints,
/// nonce handling, and claim mapping. `redirect()` and `user()` are the
/// two halves of a login attempt.
pub struct FranceConnectProvider {
	config: FranceConnectConfig,
	auth_flow: AuthorizationFlow,
	token_exchange: TokenExchangeFlow,
	userinfo_client: UserInfoClient,
	nonce_manager: NonceManager,
	id_token_decoder: IdTokenDecoder,
}

impl FranceConnectProvider {
	/// Create a new FranceConnect provider
	///
	/// Validates the credentials and constructs all sub-components. No
	/// network calls are made.
	///
	/// # Arguments
	///
	/// * `config` - Provider configuration
	/// * `nonce_store` - Storage backend for one-time nonce records
	pub fn new(
		config: FranceConnectConfig,
		nonce_store: Arc<dyn NonceStore>,
	) -> Result<Self, SocialAuthError> {
		if config.client_id.is_empty() || config.client_secret.is_empty() {
			return Err(SocialAuthError::Configuration(
				"FranceConnect requires a client_id and client_secret".into(),
			));
		}

		let client_config = ClientConfig::new(
			config.client_id.clone(),
			config.client_secret.clone(),
			config.redirect_uri.clone(),
			vec!["openid".to_string(), "profile".to_string()],
		);

		let client = OAuth2Client::new();
		let auth_flow = AuthorizationFlow::new(client_config.clone());
		let token_exchange = TokenExchangeFlow::new(client.clone(), client_config);
		let userinfo_client = UserInfoClient::new(client);
		let nonce_manager = NonceManager::new(nonce_store);
		let id_token_decoder = IdTokenDecoder::new(config.client_secret.clone());

		Ok(Self {
			config,
			auth_flow,
			token_exchange,
			userinfo_client,
			nonce_manager,
			id_token_decoder,
		})
	}

	/// Provider identifier
	pub fn name(&self) -> &str {
		"franceconnect"
	}

	/// Base service URL selected by the configuration
	pub fn service_url(&self) -> &str {
		match &self.config.base_url {
			Some(base_url) => base_url,
			None if self.config.sandbox => SANDBOX_BASE_URL,
			None => PRODUCTION_BASE_URL,
		}
	}

	/// Authorization endpoint URL with standard query parameters
	///
	/// FranceConnect receives the nonce with the token request, not here.
	pub fn authorize_url(&self, state: &str) -> Result<String, SocialAuthError> {
		let endpoint = format!("{}{}", self.service_url(), AUTHORIZE_PATH);
		self.auth_flow.build_url(&endpoint, state, &[])
	}

	/// Token endpoint URL
	pub fn token_url(&self) -> String {
		format!("{}{}", self.service_url(), TOKEN_PATH)
	}

	/// UserInfo endpoint URL
	pub fn userinfo_url(&self) -> String {
		format!("{}{}", self.service_url(), USERINFO_PATH)
	}

	/// Logout endpoint URL terminating the FranceConnect session
	///
	/// The `state` query parameter is fresh randomness the IdP reflects on
	/// return; nothing checks it, it only keeps the redirect uncacheable.
	///
	/// # Arguments
	///
	/// * `post_logout_redirect_uri` - Absolute URL the IdP sends the
	///   browser back to
	/// * `id_token` - Raw ID token from the login, passed as
	///   `id_token_hint`
	pub fn logout_url(
		&self,
		post_logout_redirect_uri: &str,
		id_token: &str,
	) -> Result<String, SocialAuthError> {
		let endpoint = format!("{}{}", self.service_url(), LOGOUT_PATH);
		let mut url = Url::parse(&endpoint)
			.map_err(|e| SocialAuthError::Configuration(e.to_string()))?;

		url.query_pairs_mut()
			.append_pair("id_token_hint", id_token)
			.append_pair("state", &secure_token(TOKEN_LENGTH))
			.append_pair("post_logout_redirect_uri", post_logout_redirect_uri);

		Ok(url.into())
	}

	/// First half of a login attempt
	///
	/// Issues the CSRF state and the one-time nonce into the session and
	/// returns the authorization URL to redirect the browser to.
	pub async fn redirect(&self, session: &mut Session) -> Result<String, SocialAuthError> {
		let state = self.auth_flow.issue_state(session);
		self.nonce_manager.issue(session).await?;

		tracing::debug!(provider = self.name(), "Redirecting to authorization endpoint");
		self.authorize_url(&state)
	}

	/// Second half of a login attempt, handling the IdP callback
	///
	/// Validates the state, exchanges the code (carrying the composite
	/// nonce), verifies the ID token and its echoed nonce, fetches
	/// userinfo, and returns the mapped user with tokens attached. Every
	/// step gates the next; nothing is retried.
	pub async fn user(
		&self,
		session: &mut Session,
		params: &CallbackParams,
	) -> Result<SocialUser, SocialAuthError> {
		if let Err(err) = self.auth_flow.validate_state(session, &params.state) {
			tracing::warn!(provider = self.name(), "Rejected callback with invalid state");
			return Err(err);
		}

		let composite_nonce = self.nonce_manager.compose(session).await?;
		let tokens = self
			.token_exchange
			.exchange(
				&self.token_url(),
				&params.code,
				&[("nonce", composite_nonce.as_str())],
			)
			.await?;

		let id_token = tokens.id_token.as_deref().ok_or_else(|| {
			SocialAuthError::InvalidResponse("token response carried no id_token".to_string())
		})?;
		let id_claims = self.id_token_decoder.decode(id_token)?;

		if self
			.nonce_manager
			.is_invalid(id_claims.nonce.as_deref())
			.await?
		{
			tracing::warn!(provider = self.name(), "Rejected ID token with invalid nonce");
			return Err(SocialAuthError::InvalidNonce);
		}

		let claims = self
			.userinfo_client
			.get_user_info(&self.userinfo_url(), &tokens.access_token)
			.await?;

		let mut user = map_user(&claims)?;
		user.access_token = tokens.access_token;
		user.refresh_token = tokens.refresh_token;
		user.expires_in = tokens.expires_in;

		tracing::debug!(
			provider = self.name(),
			user_id = %user.id,
			"Authenticated FranceConnect user"
		);
		Ok(user)
	}
}

/// Maps userinfo claims into the normalized user record
///
/// FranceConnect userinfo has no nickname or avatar notion; those stay
/// `None`. Token fields are attached by the caller.
fn map_user(claims: &UserInfoClaims) -> Result<SocialUser, SocialAuthError> {
	let sub = claims.sub.as_deref().ok_or_else(|| {
		SocialAuthError::UserMapping("missing required claim: sub".to_string())
	})?;
	let given_name = claims.given_name.as_deref().ok_or_else(|| {
		SocialAuthError::UserMapping("missing required claim: given_name".to_string())
	})?;
	let family_name = claims.family_name.as_deref().ok_or_else(|| {
		SocialAuthError::UserMapping("missing required claim: family_name".to_string())
	})?;
	let email = claims.email.as_deref().ok_or_else(|| {
		SocialAuthError::UserMapping("missing required claim: email".to_string())
	})?;

	let raw = match serde_json::to_value(claims)? {
		serde_json::Value::Object(map) => map,
		_ => serde_json::Map::new(),
	};

	Ok(SocialUser {
		id: sub.to_string(),
		name: format!("{} {}", given_name, family_name),
		email: email.to_string(),
		nickname: None,
		avatar: None,
		raw,
		access_token: String::new(),
		refresh_token: None,
		expires_in: None,
	})
}
