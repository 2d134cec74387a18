//! Password reset token generation.

use rand::RngCore;

/// Number of random bytes in a reset token.
pub const RESET_TOKEN_BYTES: usize = 32;

/// Generate a random reset token encoded as lowercase hex.
pub fn generate_reset_token() -> String {
    let mut bytes = [0u8; RESET_TOKEN_BYTES];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
