//! Shared HTTP client for OAuth2 flows

/// Thin wrapper around a shared `reqwest::Client`
///
/// Cloning is cheap; every clone reuses the same connection pool, so one
/// client serves all flows of a provider.
#[derive(Debug, Clone, Default)]
pub struct OAuth2Client {
	client: reqwest::Client,
}

impl OAuth2Client {
	/// Creates a client with reqwest defaults
	pub fn new() -> Self {
		Self {
			client: reqwest::Client::new(),
		}
	}

	/// Wraps a caller-tuned client (timeouts, proxies, TLS settings)
	pub fn with_client(client: reqwest::Client) -> Self {
		Self { client }
	}

	/// The underlying reqwest client
	pub fn client(&self) -> &reqwest::Client {
		&self.client
	}
}
