//! One-time nonce lifecycle tests

use franceconnect_auth::Session;
use franceconnect_auth::SocialAuthError;
use franceconnect_auth::flow::{
	InMemoryNonceStore, NonceManager, NonceStore, OPENID_SESSION_NONCE,
};
use rstest::*;
use std::sync::Arc;

fn manager() -> (NonceManager, Arc<InMemoryNonceStore>) {
	let store = Arc::new(InMemoryNonceStore::new());
	(NonceManager::new(store.clone()), store)
}

#[rstest]
#[tokio::test]
async fn test_issue_compose_validate_lifecycle() {
	// Arrange
	let (manager, _store) = manager();
	let mut session = Session::new();

	// Act
	let record = manager.issue(&mut session).await.unwrap();
	let composite = manager.compose(&session).await.unwrap();
	let invalid = manager.is_invalid(Some(&composite)).await.unwrap();

	// Assert
	assert_eq!(
		session.get_str(OPENID_SESSION_NONCE),
		Some(record.nonce.as_str())
	);
	assert_eq!(composite, format!("{}-{}", record.nonce, record.id));
	assert!(!invalid, "A freshly issued nonce must validate");
}

#[rstest]
#[tokio::test]
async fn test_validation_consumes_record() {
	// Arrange
	let (manager, store) = manager();
	let mut session = Session::new();
	let record = manager.issue(&mut session).await.unwrap();
	let composite = manager.compose(&session).await.unwrap();

	// Act
	let first = manager.is_invalid(Some(&composite)).await.unwrap();
	let second = manager.is_invalid(Some(&composite)).await.unwrap();

	// Assert - the record is gone after the first check
	assert!(!first);
	assert!(second, "A replayed claim must be rejected");
	assert!(store.find_by_nonce(&record.nonce).await.unwrap().is_none());
}

#[rstest]
#[tokio::test]
async fn test_failed_comparison_also_consumes_record() {
	// Arrange
	let (manager, store) = manager();
	let record = store.create("expected_nonce").await.unwrap();

	// Act
	let invalid = manager
		.is_invalid(Some(&format!("tampered_nonce-{}", record.id)))
		.await
		.unwrap();

	// Assert
	assert!(invalid);
	assert!(
		store.find_by_nonce("expected_nonce").await.unwrap().is_none(),
		"A record touched by validation must be unreachable afterwards"
	);
}

#[rstest]
#[tokio::test]
async fn test_compose_requires_prior_issue() {
	// Arrange
	let (manager, _store) = manager();
	let session = Session::new();

	// Act
	let result = manager.compose(&session).await;

	// Assert
	assert!(matches!(
		result,
		Err(SocialAuthError::NonceRecordNotFound(_))
	));
}

#[rstest]
#[case::absent_claim(None)]
#[case::no_separator(Some("plainvalue"))]
#[case::unknown_record(Some("nonce-9999"))]
#[case::empty_record_id(Some("nonce-"))]
#[tokio::test]
async fn test_malformed_claims_are_invalid(#[case] claim: Option<&str>) {
	// Arrange
	let (manager, _store) = manager();

	// Act
	let invalid = manager.is_invalid(claim).await.unwrap();

	// Assert - structural failures report invalid, never an error
	assert!(invalid);
}

#[rstest]
#[tokio::test]
async fn test_parallel_logins_use_distinct_records() {
	// Arrange
	let (manager, _store) = manager();
	let mut first_session = Session::new();
	let mut second_session = Session::new();

	// Act
	let first = manager.issue(&mut first_session).await.unwrap();
	let second = manager.issue(&mut second_session).await.unwrap();

	let first_composite = manager.compose(&first_session).await.unwrap();
	let second_composite = manager.compose(&second_session).await.unwrap();

	// Assert - consuming one attempt leaves the other valid
	assert_ne!(first.id, second.id);
	assert!(!manager.is_invalid(Some(&first_composite)).await.unwrap());
	assert!(!manager.is_invalid(Some(&second_composite)).await.unwrap());
}

#[rstest]
#[tokio::test]
async fn test_concurrent_validation_has_single_winner() {
	// Arrange
	let (manager, _store) = manager();
	let mut session = Session::new();
	manager.issue(&mut session).await.unwrap();
	let composite = manager.compose(&session).await.unwrap();

	// Act - two callbacks race on the same claim
	let (first, second) = tokio::join!(
		manager.is_invalid(Some(&composite)),
		manager.is_invalid(Some(&composite)),
	);

	// Assert - exactly one validation may succeed
	let outcomes = [first.unwrap(), second.unwrap()];
	assert_eq!(
		outcomes.iter().filter(|invalid| !**invalid).count(),
		1,
		"At most one concurrent validation may accept the claim"
	);
}
