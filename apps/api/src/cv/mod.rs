// CV tooling: bullet generation from the impact inventory, saved CV versions,
// and plain-text export.

pub mod bullets;
pub mod handlers;
pub mod plain_text;
pub mod store;

/// Role key used when a draft is not scoped to a specific target role.
pub const GENERAL_ROLE_KEY: &str = "general";

/// Normalizes a role key: trimmed, lower-cased, blanks collapse to `general`.
pub fn normalize_role_key(raw: Option<&str>) -> String {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(key) => key.to_lowercase(),
        None => GENERAL_ROLE_KEY.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_role_key() {
        assert_eq!(normalize_role_key(None), "general");
        assert_eq!(normalize_role_key(Some("   ")), "general");
        assert_eq!(normalize_role_key(Some(" Product-Lead ")), "product-lead");
    }
}
