use crate::CodeGenerator;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use minilink_core::shortcode::CODE_LENGTH;
use minilink_core::ShortCode;
use rand::rngs::OsRng;
use rand::RngCore;

/// Number of random bytes drawn per candidate.
///
/// 8 bytes encode to 11 base64 characters (ignoring padding), leaving
/// headroom for the `+`/`/` symbols stripped below while still
/// yielding the 9 characters a short code needs.
const CODE_BYTES: usize = 8;

/// Generates candidates from cryptographically strong OS randomness.
///
/// Each candidate is a batch of random bytes, base64-encoded, with the
/// URL-unsafe symbols (`+`, `/`) and padding (`=`) removed, truncated
/// to 9 characters. A batch that strips below 9 characters is redrawn.
#[derive(Debug, Clone, Default)]
pub struct RandomCodeGenerator;

impl RandomCodeGenerator {
    pub fn new() -> Self {
        Self
    }
}

impl CodeGenerator for RandomCodeGenerator {
    fn generate(&self) -> ShortCode {
        loop {
            let mut bytes = [0u8; CODE_BYTES];
            OsRng.fill_bytes(&mut bytes);

            let candidate: String = STANDARD
                .encode(bytes)
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .take(CODE_LENGTH)
                .collect();

            if candidate.len() == CODE_LENGTH {
                return ShortCode::new_unchecked(candidate);
            }
        }
    }
}
