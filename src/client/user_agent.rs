//! User agent handling for backend requests.

pub const USER_AGENT: &str = concat!("localcast/", env!("CARGO_PKG_VERSION"));

/// Resolve user agent from config value.
/// - None or empty => default localcast user agent
/// - custom => custom user agent string
pub fn resolve_user_agent(config_value: Option<&str>) -> String {
    match config_value.map(str::trim) {
        Some(custom) if !custom.is_empty() => custom.to_string(),
        _ => USER_AGENT.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_user_agent() {
        assert_eq!(resolve_user_agent(None), USER_AGENT);
        assert_eq!(resolve_user_agent(Some("  ")), USER_AGENT);
        assert_eq!(resolve_user_agent(Some("probe/1.0")), "probe/1.0");
        assert!(USER_AGENT.starts_with("localcast/"));
    }
}
