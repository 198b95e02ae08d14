use super::*;

#[test]
fn endpoint_maps_https_to_wss() {
    let endpoint = Endpoint::parse("https://assistant.example.com").expect("endpoint");
    assert_eq!(endpoint.scheme, "wss");
    assert_eq!(endpoint.authority, "assistant.example.com");
    assert_eq!(endpoint.namespace, "/");
    assert_eq!(
        endpoint.websocket_url(),
        "wss://assistant.example.com/socket.io/?EIO=4&transport=websocket"
    );
}

#[test]
fn endpoint_maps_http_to_ws_and_keeps_port() {
    let endpoint = Endpoint::parse("http://localhost:3000/").expect("endpoint");
    assert_eq!(endpoint.websocket_url(), "ws://localhost:3000/socket.io/?EIO=4&transport=websocket");
    assert_eq!(endpoint.namespace, "/");
}

#[test]
fn endpoint_accepts_websocket_schemes_verbatim() {
    assert_eq!(Endpoint::parse("wss://a.io").expect("endpoint").scheme, "wss");
    assert_eq!(Endpoint::parse("ws://a.io").expect("endpoint").scheme, "ws");
}

#[test]
fn endpoint_path_selects_namespace() {
    let endpoint = Endpoint::parse("https://a.io/assistant/").expect("endpoint");
    assert_eq!(endpoint.namespace, "/assistant");
    assert_eq!(endpoint.websocket_url(), "wss://a.io/socket.io/?EIO=4&transport=websocket");
}

#[test]
fn endpoint_rejects_unsupported_scheme() {
    let err = Endpoint::parse("ftp://a.io").expect_err("scheme should be rejected");
    assert!(matches!(err, CodecError::InvalidEndpoint(_, _)));
}

#[test]
fn endpoint_rejects_missing_host() {
    let err = Endpoint::parse("https:///chat").expect_err("host should be required");
    assert!(matches!(err, CodecError::InvalidEndpoint(_, "missing host")));
}

#[test]
fn endpoint_rejects_query_string() {
    assert!(Endpoint::parse("https://a.io/?token=1").is_err());
}

#[test]
fn encode_message_prefixes_engine_message_type() {
    let packet = SocketPacket::event("/", "ai-res", vec![serde_json::json!("hello")]);
    assert_eq!(encode_message(&packet), r#"42["ai-res","hello"]"#);
}

#[test]
fn encode_message_for_namespace_connect() {
    assert_eq!(encode_message(&SocketPacket::connect("/")), "40");
    assert_eq!(encode_message(&SocketPacket::connect("/assistant")), "40/assistant,");
}
