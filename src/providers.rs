//! Provider adapters

pub mod franceconnect;

pub use franceconnect::{
	FranceConnectConfig, FranceConnectProvider, PRODUCTION_BASE_URL, SANDBOX_BASE_URL,
};
