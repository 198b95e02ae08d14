use super::*;

#[test]
fn default_endpoint_is_secure_socket_on_default_host() {
    let parsed = Endpoint::parse(&format!("https://{DEFAULT_HOST}")).expect("default endpoint");
    assert_eq!(ChatConfig::default().endpoint, parsed);
}

#[test]
fn defaults_match_widget_copy() {
    let config = ChatConfig::default();
    assert_eq!(config.title, "Personal AI Assistant");
    assert_eq!(config.status, "● Online");
    assert_eq!(config.greeting, GREETING);
    assert!(!config.escape_markup);
}

#[test]
fn resolve_without_sources_returns_defaults() {
    let config = ChatConfig::resolve(None, None, None).expect("config");
    assert_eq!(config, ChatConfig::default());
}

#[test]
fn build_endpoint_overrides_default() {
    let config = ChatConfig::resolve(Some("http://localhost:3000"), None, None).expect("config");
    assert_eq!(config.endpoint.websocket_url(), "ws://localhost:3000/socket.io/?EIO=4&transport=websocket");
}

#[test]
fn query_endpoint_wins_over_build_endpoint() {
    let config =
        ChatConfig::resolve(Some("http://localhost:3000"), None, Some("https://staging.example.com/")).expect("config");
    assert_eq!(config.endpoint.authority, "staging.example.com");
}

#[test]
fn query_endpoint_forces_escaped_markup() {
    let config = ChatConfig::resolve(None, None, Some("wss://other-backend.example")).expect("config");
    assert_eq!(config.endpoint.authority, "other-backend.example");
    assert!(config.escape_markup);

    let config = ChatConfig::resolve(None, Some("0"), Some("wss://other-backend.example")).expect("config");
    assert!(config.escape_markup, "a build-time opt-out does not apply to query endpoints");

    let lenient = ChatConfig::resolve_lenient(None, Some("false"), Some("wss://other-backend.example"));
    assert!(lenient.escape_markup);
}

#[test]
fn build_endpoint_keeps_configured_escaping() {
    let config = ChatConfig::resolve(Some("https://own-backend.example"), None, None).expect("config");
    assert!(!config.escape_markup);
}

#[test]
fn blank_values_count_as_unset() {
    let config = ChatConfig::resolve(Some("  "), Some(""), Some("")).expect("config");
    assert_eq!(config, ChatConfig::default());
}

#[test]
fn invalid_endpoint_is_rejected() {
    let err = ChatConfig::resolve(None, None, Some("javascript:alert(1)")).expect_err("endpoint should fail");
    assert!(matches!(err, ConfigError::Endpoint(_)));
}

#[test]
fn escape_markup_accepts_common_boolean_spellings() {
    for raw in ["1", "true", "YES", " on "] {
        assert!(ChatConfig::resolve(None, Some(raw), None).expect("config").escape_markup, "{raw}");
    }
    for raw in ["0", "false", "No", "off"] {
        assert!(!ChatConfig::resolve(None, Some(raw), None).expect("config").escape_markup, "{raw}");
    }
}

#[test]
fn escape_markup_rejects_other_values() {
    let err = ChatConfig::resolve(None, Some("maybe"), None).expect_err("bool should fail");
    assert!(matches!(err, ConfigError::InvalidBool { value, .. } if value == "maybe"));
}

// =============================================================
// Lenient resolution
// =============================================================

#[test]
fn rejected_query_endpoint_keeps_escape_switch() {
    let config = ChatConfig::resolve_lenient(None, Some("1"), Some("javascript:alert(1)"));
    assert!(config.escape_markup);
    assert_eq!(config.endpoint, ChatConfig::default().endpoint);
}

#[test]
fn rejected_query_endpoint_falls_back_to_build_endpoint() {
    let config = ChatConfig::resolve_lenient(Some("http://localhost:3000"), None, Some("ftp://nope"));
    assert_eq!(config.endpoint.authority, "localhost:3000");
    assert!(!config.escape_markup);
}

#[test]
fn rejected_escape_value_keeps_valid_endpoint() {
    let config = ChatConfig::resolve_lenient(Some("http://localhost:3000"), Some("maybe"), None);
    assert_eq!(config.endpoint.authority, "localhost:3000");
    assert!(!config.escape_markup);
}

#[test]
fn lenient_matches_strict_when_everything_is_valid() {
    let sources = (Some("https://a.io/assistant"), Some("yes"), None);
    assert_eq!(
        ChatConfig::resolve_lenient(sources.0, sources.1, sources.2),
        ChatConfig::resolve(sources.0, sources.1, sources.2).expect("config")
    );
}

#[cfg(not(feature = "csr"))]
#[test]
fn load_outside_browser_uses_build_time_values() {
    let expected = ChatConfig::resolve_lenient(
        option_env!("ASSISTANT_CHAT_ENDPOINT"),
        option_env!("ASSISTANT_CHAT_ESCAPE_MARKUP"),
        None,
    );
    assert_eq!(ChatConfig::load(), expected);
}
