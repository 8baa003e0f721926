//! OAuth2/OIDC flow implementations

pub mod authorization;
pub mod nonce;
pub mod token_exchange;

pub use authorization::{AuthorizationFlow, CallbackParams, SESSION_STATE_KEY};
pub use nonce::{
	InMemoryNonceStore, NonceManager, NonceRecord, NonceStore, OPENID_SESSION_NONCE,
};
pub use token_exchange::TokenExchangeFlow;
