//! Issuance defaults for transfer codes.

/// Tunable issuance defaults, sourced from daemon configuration.
#[derive(Clone, Debug)]
pub struct CodePolicy {
    /// Expiration window applied when the issuer gives no override.
    pub default_expiration_hours: u64,
    /// Use limit stamped on every issued code.
    pub default_max_uses: u32,
}

impl Default for CodePolicy {
    fn default() -> Self {
        Self {
            default_expiration_hours: 1,
            default_max_uses: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_single_use_one_hour() {
        let policy = CodePolicy::default();
        assert_eq!(policy.default_expiration_hours, 1);
        assert_eq!(policy.default_max_uses, 1);
    }
}
