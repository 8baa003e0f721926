//! Core types shared across the authentication flows

pub mod claims;
pub mod client;
pub mod config;
pub mod error;
pub mod random;
pub mod token;
pub mod user;

pub use claims::{IdTokenClaims, UserInfoClaims};
pub use client::OAuth2Client;
pub use config::ClientConfig;
pub use error::SocialAuthError;
pub use random::{TOKEN_LENGTH, secure_token};
pub use token::TokenResponse;
pub use user::SocialUser;
