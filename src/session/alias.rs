//! Alias name derivation
//!
//! Aliasing is structural, never textual: an alias is a second table entry
//! referencing the same command spec. This module only derives the alias
//! name for a canonical command, if one applies.

/// Reserved prefix carried by every canonical command name
pub const RESERVED_PREFIX: &str = "chief";

/// Derive the aliased name for `canonical` under `custom_prefix`.
///
/// Returns `None` when the command does not carry the reserved prefix or
/// when the custom prefix equals the reserved prefix (rewriting to itself
/// would self-collide).
pub fn alias_name(custom_prefix: &str, canonical: &str) -> Option<String> {
    if custom_prefix == RESERVED_PREFIX {
        return None;
    }
    let rest = canonical.strip_prefix(RESERVED_PREFIX)?.strip_prefix('.')?;
    Some(format!("{custom_prefix}.{rest}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alias_for_reserved_command() {
        assert_eq!(
            alias_name("cf", "chief.whoami"),
            Some("cf.whoami".to_string())
        );
    }

    #[test]
    fn test_non_reserved_names_not_aliased() {
        assert_eq!(alias_name("cf", "helper.whoami"), None);
        assert_eq!(alias_name("cf", "chiefly.whoami"), None);
        assert_eq!(alias_name("cf", "chief"), None);
    }

    #[test]
    fn test_custom_prefix_equal_to_reserved_is_skipped() {
        assert_eq!(alias_name("chief", "chief.whoami"), None);
    }
}
