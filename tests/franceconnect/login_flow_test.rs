//! End-to-end login flow tests
//!
//! Drives `redirect()` and `user()` against the mock IdP exactly as a host
//! application would, with the session travelling between the two calls.

use std::sync::Arc;

use franceconnect_auth::flow::{
	CallbackParams, InMemoryNonceStore, NonceStore, OPENID_SESSION_NONCE, SESSION_STATE_KEY,
};
use franceconnect_auth::providers::FranceConnectProvider;
use franceconnect_auth::{Session, SocialAuthError};
use helpers::mock_server::{ErrorMode, MockFranceConnectServer};
use helpers::{TestFixtures, assert_composite_nonce, assert_user_normalized};
use rstest::*;
use url::Url;

#[path = "../helpers.rs"]
mod helpers;

fn provider_over(
	server: &MockFranceConnectServer,
) -> (FranceConnectProvider, Arc<InMemoryNonceStore>) {
	let store = Arc::new(InMemoryNonceStore::new());
	let provider =
		FranceConnectProvider::new(TestFixtures::mock_config(&server.base_url()), store.clone())
			.unwrap();
	(provider, store)
}

/// Runs the redirect leg and plays the IdP callback role
async fn begin_login(provider: &FranceConnectProvider, session: &mut Session) -> CallbackParams {
	let auth_url = provider.redirect(session).await.unwrap();
	let state = Url::parse(&auth_url)
		.unwrap()
		.query_pairs()
		.find(|(key, _)| key == "state")
		.map(|(_, value)| value.into_owned())
		.unwrap();

	CallbackParams {
		code: "test_code".to_string(),
		state,
	}
}

#[rstest]
#[tokio::test]
async fn test_full_login_maps_user() {
	// Arrange
	let server = MockFranceConnectServer::new().await;
	let (provider, _store) = provider_over(&server);
	let mut session = Session::new();
	let params = begin_login(&provider, &mut session).await;

	// Act
	let user = provider.user(&mut session, &params).await.unwrap();

	// Assert
	assert_user_normalized(&user, "fc_user_1", "Angela Dubois", "angela.dubois@example.fr");
	assert_eq!(user.access_token, "test_access_token");
	assert_eq!(user.refresh_token, Some("test_refresh_token".to_string()));
	assert_eq!(user.expires_in, Some(3600));
	assert_eq!(user.raw.get("birthdate"), Some(&serde_json::json!("1962-08-24")));
}

#[rstest]
#[tokio::test]
async fn test_token_request_carries_composite_nonce() {
	// Arrange
	let server = MockFranceConnectServer::new().await;
	let (provider, _store) = provider_over(&server);
	let mut session = Session::new();
	let params = begin_login(&provider, &mut session).await;
	let session_nonce = session.get_str(OPENID_SESSION_NONCE).unwrap().to_string();

	// Act
	provider.user(&mut session, &params).await.unwrap();

	// Assert
	let request = server.token_request().unwrap();
	assert_composite_nonce(&request, &session_nonce);
	assert_eq!(
		request.get("grant_type").map(String::as_str),
		Some("authorization_code")
	);
	assert_eq!(request.get("code").map(String::as_str), Some("test_code"));
}

#[rstest]
#[tokio::test]
async fn test_userinfo_request_uses_exchanged_token() {
	// Arrange
	let server = MockFranceConnectServer::new().await;
	let (provider, _store) = provider_over(&server);
	let mut session = Session::new();
	let params = begin_login(&provider, &mut session).await;

	// Act
	provider.user(&mut session, &params).await.unwrap();

	// Assert
	assert_eq!(
		server.userinfo_authorization(),
		Some("Bearer test_access_token".to_string())
	);
}

#[rstest]
#[tokio::test]
async fn test_rejects_mismatched_state() {
	// Arrange
	let server = MockFranceConnectServer::new().await;
	let (provider, _store) = provider_over(&server);
	let mut session = Session::new();
	let mut params = begin_login(&provider, &mut session).await;
	params.state = "forged_state".to_string();

	// Act
	let result = provider.user(&mut session, &params).await;

	// Assert - rejected before any outbound call, session copy consumed
	assert_eq!(result, Err(SocialAuthError::InvalidState));
	assert!(session.get_str(SESSION_STATE_KEY).is_none());
	assert!(server.token_request().is_none());
}

#[rstest]
#[tokio::test]
async fn test_rejects_callback_without_redirect() {
	// Arrange
	let server = MockFranceConnectServer::new().await;
	let (provider, _store) = provider_over(&server);
	let mut session = Session::new();
	let params = CallbackParams {
		code: "test_code".to_string(),
		state: "never_issued".to_string(),
	};

	// Act
	let result = provider.user(&mut session, &params).await;

	// Assert
	assert_eq!(result, Err(SocialAuthError::InvalidState));
}

#[rstest]
#[tokio::test]
async fn test_rejects_tampered_nonce_claim() {
	// Arrange
	let mut server = MockFranceConnectServer::new().await;
	let (provider, store) = provider_over(&server);
	let mut session = Session::new();
	let params = begin_login(&provider, &mut session).await;
	let session_nonce = session.get_str(OPENID_SESSION_NONCE).unwrap().to_string();

	// The IdP echoes a nonce pointing at the right record with the wrong
	// value
	server.set_id_token_nonce("tampered_nonce-1");

	// Act
	let result = provider.user(&mut session, &params).await;

	// Assert - rejected, and the record burns anyway
	assert_eq!(result, Err(SocialAuthError::InvalidNonce));
	assert!(store.find_by_nonce(&session_nonce).await.unwrap().is_none());
}

#[rstest]
#[tokio::test]
async fn test_replayed_id_token_fails_second_login() {
	// Arrange - first login completes and consumes its record
	let mut server = MockFranceConnectServer::new().await;
	let (provider, _store) = provider_over(&server);
	let mut session = Session::new();
	let params = begin_login(&provider, &mut session).await;
	provider.user(&mut session, &params).await.unwrap();

	let replayed_composite = server.token_request().unwrap().get("nonce").cloned().unwrap();

	// Second login, but the IdP replays the first attempt's ID token nonce
	let mut second_session = Session::new();
	let second_params = begin_login(&provider, &mut second_session).await;
	server.set_id_token_nonce(&replayed_composite);

	// Act
	let result = provider.user(&mut second_session, &second_params).await;

	// Assert
	assert_eq!(result, Err(SocialAuthError::InvalidNonce));
}

#[rstest]
#[tokio::test]
async fn test_second_callback_requires_new_redirect() {
	// Arrange
	let server = MockFranceConnectServer::new().await;
	let (provider, _store) = provider_over(&server);
	let mut session = Session::new();
	let params = begin_login(&provider, &mut session).await;
	provider.user(&mut session, &params).await.unwrap();

	// Act - the browser re-posts the same callback
	let result = provider.user(&mut session, &params).await;

	// Assert - the one-time state is already gone
	assert_eq!(result, Err(SocialAuthError::InvalidState));
}

#[rstest]
#[tokio::test]
async fn test_missing_id_token_is_invalid_response() {
	// Arrange
	let mut server = MockFranceConnectServer::new().await;
	server.omit_id_token();
	let (provider, _store) = provider_over(&server);
	let mut session = Session::new();
	let params = begin_login(&provider, &mut session).await;

	// Act
	let result = provider.user(&mut session, &params).await;

	// Assert
	assert!(matches!(result, Err(SocialAuthError::InvalidResponse(_))));
}

#[rstest]
#[tokio::test]
async fn test_expired_id_token_rejected() {
	// Arrange
	let mut server = MockFranceConnectServer::new().await;
	server.set_id_token_time_offset(-4000);
	let (provider, _store) = provider_over(&server);
	let mut session = Session::new();
	let params = begin_login(&provider, &mut session).await;

	// Act
	let result = provider.user(&mut session, &params).await;

	// Assert
	assert!(matches!(result, Err(SocialAuthError::TokenValidation(_))));
}

#[rstest]
#[tokio::test]
async fn test_id_token_with_foreign_signature_rejected() {
	// Arrange
	let mut server = MockFranceConnectServer::new().await;
	server.set_id_token_secret("not_the_client_secret");
	let (provider, _store) = provider_over(&server);
	let mut session = Session::new();
	let params = begin_login(&provider, &mut session).await;

	// Act
	let result = provider.user(&mut session, &params).await;

	// Assert
	assert!(matches!(result, Err(SocialAuthError::TokenValidation(_))));
}

#[rstest]
#[tokio::test]
async fn test_token_endpoint_failure_surfaces() {
	// Arrange
	let mut server = MockFranceConnectServer::new().await;
	let (provider, _store) = provider_over(&server);
	let mut session = Session::new();
	let params = begin_login(&provider, &mut session).await;

	server.set_error_mode(ErrorMode::ServerError);

	// Act
	let result = provider.user(&mut session, &params).await;

	// Assert
	assert!(matches!(result, Err(SocialAuthError::TokenExchange(_))));
}

#[rstest]
#[tokio::test]
async fn test_userinfo_failure_surfaces() {
	// Arrange
	let mut server = MockFranceConnectServer::new().await;
	server.fail_userinfo();
	let (provider, _store) = provider_over(&server);
	let mut session = Session::new();
	let params = begin_login(&provider, &mut session).await;

	// Act
	let result = provider.user(&mut session, &params).await;

	// Assert
	assert!(matches!(result, Err(SocialAuthError::UserInfo(_))));
}

#[rstest]
#[tokio::test]
async fn test_missing_required_claim_fails_mapping() {
	// Arrange
	let mut server = MockFranceConnectServer::new().await;
	server.set_userinfo_response(serde_json::json!({
		"sub": "fc_user_1",
		"given_name": "Angela",
		"email": "angela.dubois@example.fr",
	}));
	let (provider, _store) = provider_over(&server);
	let mut session = Session::new();
	let params = begin_login(&provider, &mut session).await;

	// Act
	let result = provider.user(&mut session, &params).await;

	// Assert
	match result {
		Err(SocialAuthError::UserMapping(message)) => {
			assert!(message.contains("family_name"), "got '{}'", message);
		}
		other => panic!("Expected UserMapping error, got {:?}", other),
	}
}
