//! OpenID Connect building blocks

pub mod id_token;
pub mod userinfo;

pub use id_token::{ID_TOKEN_LEEWAY_SECS, IdTokenDecoder};
pub use userinfo::UserInfoClient;
