//! Utility functions

/// Masks the local part of an email so addresses can be logged.
pub fn mask_email(email: &str) -> String {
    if let Some(at_pos) = email.find('@') {
        let (local, domain) = email.split_at(at_pos);
        let keep = local.chars().count().clamp(1, 2);
        let prefix: String = local.chars().take(keep).collect();
        if prefix.is_empty() {
            format!("***{}", domain)
        } else {
            format!("{}***{}", prefix, domain)
        }
    } else {
        "***".to_string()
    }
}

/// Shortens an opaque token for log lines.
pub fn token_fingerprint(token: &str) -> String {
    let head: String = token.chars().take(8).collect();
    format!("{}…", head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masks_local_part() {
        assert_eq!(mask_email("alice@example.com"), "al***@example.com");
        assert_eq!(mask_email("a@b.com"), "a***@b.com");
        assert_eq!(mask_email("@b.com"), "***@b.com");
        assert_eq!(mask_email("no-at-sign"), "***");
    }

    #[test]
    fn fingerprint_keeps_prefix_only() {
        assert_eq!(token_fingerprint("0123456789abcdef"), "01234567…");
        assert_eq!(token_fingerprint("abc"), "abc…");
    }
}
