//! FranceConnect Authentication Adapter
//!
//! Provides OAuth2/OIDC-based login support for FranceConnect, the French
//! state identity federation.
//!
//! # Login Flow
//!
//! - **Redirect**: `redirect()` issues a CSRF state and a one-time nonce
//!   into the session and returns the authorization URL
//! - **Callback**: `user()` validates the state, exchanges the code,
//!   verifies the HS256 ID token and its echoed nonce, fetches userinfo,
//!   and returns the normalized user
//!
//! # Security Features
//!
//! - **CSRF Protection**: State parameter validation with one-time session
//!   pull
//! - **Nonce Validation**: One-time persisted records make a replayed ID
//!   token unverifiable
//! - **ID Token Validation**: HS256 signature and time claims checked with
//!   a 130 second clock-skew leeway
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//!
//! use franceconnect_auth::{
//!     CallbackParams, FranceConnectConfig, FranceConnectProvider, InMemoryNonceStore, Session,
//! };
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = FranceConnectConfig::sandbox(
//!         "client_id".to_string(),
//!         "client_secret".to_string(),
//!         "https://app.example.fr/callback".to_string(),
//!     );
//!     let provider =
//!         FranceConnectProvider::new(config, Arc::new(InMemoryNonceStore::new())).unwrap();
//!
//!     // Redirect leg: session travels in the user's cookie
//!     let mut session = Session::new();
//!     let auth_url = provider.redirect(&mut session).await.unwrap();
//!
//!     // Callback leg: params come from the IdP redirect
//!     let params = CallbackParams {
//!         code: "authorization_code".to_string(),
//!         state: "state_from_query".to_string(),
//!     };
//!     let user = provider.user(&mut session, &params).await.unwrap();
//!     println!("Welcome {}", user.name);
//! }
//! ```

pub mod core;
pub mod flow;
pub mod oidc;
pub mod providers;
pub mod session;

// Re-export core types
pub use self::core::{
	ClientConfig, IdTokenClaims, OAuth2Client, SocialAuthError, SocialUser, TokenResponse,
	UserInfoClaims,
};

// Re-export flow types
pub use self::flow::{
	AuthorizationFlow, CallbackParams, InMemoryNonceStore, NonceManager, NonceRecord, NonceStore,
	TokenExchangeFlow,
};

// Re-export OIDC types
pub use self::oidc::{IdTokenDecoder, UserInfoClient};

// Re-export providers
pub use self::providers::{FranceConnectConfig, FranceConnectProvider};

// Re-export session
pub use self::session::Session;
