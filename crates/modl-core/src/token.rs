//! Verification token generation

use modl_shared::constants::{VERIFICATION_TOKEN_BYTES, VERIFY_EMAIL_PATH};
use rand::RngCore;

/// 256 random bits from the thread-local CSPRNG, hex encoded.
pub fn generate_verification_token() -> String {
    let mut bytes = [0u8; VERIFICATION_TOKEN_BYTES];
    rand::rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// `{scheme}://{subdomain}.{domain}/verify-email?token={token}`
pub fn verification_link(scheme: &str, subdomain: &str, domain: &str, token: &str) -> String {
    format!(
        "{}://{}.{}{}?token={}",
        scheme,
        subdomain,
        domain.trim_start_matches('.'),
        VERIFY_EMAIL_PATH,
        token
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_is_64_hex_chars() {
        let token = generate_verification_token();
        assert_eq!(token.len(), VERIFICATION_TOKEN_BYTES * 2);
        assert!(token.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn tokens_do_not_repeat() {
        let a = generate_verification_token();
        let b = generate_verification_token();
        assert_ne!(a, b);
    }

    #[test]
    fn link_embeds_subdomain_and_token() {
        let link = verification_link("http", "acme", "modl.gg", "abc123");
        assert_eq!(link, "http://acme.modl.gg/verify-email?token=abc123");
    }

    #[test]
    fn link_tolerates_leading_dot_in_domain() {
        let link = verification_link("https", "acme", ".modl.gg", "t");
        assert_eq!(link, "https://acme.modl.gg/verify-email?token=t");
    }
}
