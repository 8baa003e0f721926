//! Random token generation for state and nonce values

use rand::Rng;

/// Length of generated state and nonce tokens
///
/// 40 alphanumeric characters carry roughly 238 bits of entropy, well above
/// the 160-bit floor expected of one-time nonces.
pub const TOKEN_LENGTH: usize = 40;

/// Generates a random alphanumeric token from the thread-local CSPRNG
///
/// The alphabet contains no `-`, so generated nonces stay unambiguous
/// inside the `<nonce>-<record-id>` composite value.
pub fn secure_token(length: usize) -> String {
	rand::rng()
		.sample_iter(&rand::distr::Alphanumeric)
		.take(length)
		.map(char::from)
		.collect()
}
