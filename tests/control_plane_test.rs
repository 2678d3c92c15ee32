//! End-to-end checks against a mock control plane over real HTTP.

use std::time::{Duration, Instant};

use tunnel_auth::control_plane::{AuthError, ControlPlaneClient, DecodeStage};
use tunnel_auth::proxy::{BandwidthLimitMode, NewProxy, ProxyBaseConfig};
use tunnel_auth::transport::{HttpTransport, Transport, TransportError};

mod common;

const GRANT_300KB: &str =
    r#"{"status":200,"success":true,"message":"{\"inbound\":0,\"outbound\":300,\"type\":2}"}"#;

fn client(url: &str, timeout: Duration) -> ControlPlaneClient {
    ControlPlaneClient::new(url, timeout).unwrap()
}

#[tokio::test]
async fn test_check_token_over_http() {
    let cp = common::start_mock_control_plane(200, r#"{"status":200,"success":true}"#).await;
    let client = client(&cp.url(), Duration::from_secs(5));

    assert!(client.check_token("46414e6574f2969e", "wobushitoken9527|1").await.unwrap());

    let requests = cp.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].method, "GET");
    assert_eq!(
        requests[0].query(),
        Some("action=checktoken&user=46414e6574f2969e&apitoken=wobushitoken9527%7C1")
    );
}

#[tokio::test]
async fn test_non_success_status_is_still_decoded() {
    let cp = common::start_mock_control_plane(500, r#"{"status":500,"success":false}"#).await;
    let client = client(&cp.url(), Duration::from_secs(5));

    assert!(!client.check_token("alice", "tok").await.unwrap());
}

#[tokio::test]
async fn test_html_error_page_is_decode_error() {
    let cp = common::start_mock_control_plane(502, "<html>Bad Gateway</html>").await;
    let client = client(&cp.url(), Duration::from_secs(5));

    let err = client.check_token("alice", "tok").await.unwrap_err();
    assert!(matches!(err, AuthError::Decode { stage: DecodeStage::TokenEnvelope, .. }));
}

#[tokio::test]
async fn test_check_proxy_applies_limit() {
    let cp = common::start_mock_control_plane(200, GRANT_300KB).await;
    let client = client(&cp.url(), Duration::from_secs(5));

    let mut proxy = ProxyBaseConfig::new("46414e6574f2969e.MyProxy", "tcp");
    let msg = NewProxy {
        remote_port: Some(46008),
        ..Default::default()
    };

    let granted = client
        .check_proxy("46414e6574f2969e", &mut proxy, &msg, "wobushitoken9527")
        .await
        .unwrap();

    assert!(granted);
    assert_eq!(proxy.transport.bandwidth_limit_mode, BandwidthLimitMode::Server);
    let limit = proxy.transport.bandwidth_limit.clone().unwrap();
    assert_eq!(limit.as_str(), "300KB");
    assert_eq!(limit.bytes(), 300 * 1024);

    assert_eq!(
        cp.requests()[0].query(),
        Some(
            "action=checkproxy&user=46414e6574f2969e&apitoken=wobushitoken9527\
             &proxy_name=46414e6574f2969e.MyProxy&proxy_type=tcp&remote_port=46008"
        )
    );
}

#[tokio::test]
async fn test_check_proxy_denied() {
    let cp = common::start_mock_control_plane(
        200,
        r#"{"status":403,"success":false,"message":"proxy name taken"}"#,
    )
    .await;
    let client = client(&cp.url(), Duration::from_secs(5));

    let mut proxy = ProxyBaseConfig::new("alice.web", "http");
    let before = proxy.clone();
    let msg = NewProxy {
        custom_domains: vec!["www.example.com".into()],
        ..Default::default()
    };

    assert!(!client.check_proxy("alice", &mut proxy, &msg, "tok").await.unwrap());
    assert_eq!(proxy, before);
    assert!(cp.requests()[0].target.contains("customdomains=www.example.com"));
}

#[tokio::test]
async fn test_check_proxy_is_idempotent() {
    let cp = common::start_mock_control_plane(200, GRANT_300KB).await;
    let client = client(&cp.url(), Duration::from_secs(5));
    let msg = NewProxy::default();

    let mut first = ProxyBaseConfig::new("alice.ssh", "tcp");
    assert!(client.check_proxy("alice", &mut first, &msg, "tok").await.unwrap());

    let mut second = first.clone();
    assert!(client.check_proxy("alice", &mut second, &msg, "tok").await.unwrap());

    assert_eq!(first, second);
    assert_eq!(cp.requests().len(), 2);
}

#[tokio::test]
async fn test_slow_control_plane_times_out() {
    let cp = common::start_programmable_control_plane(|_| async {
        tokio::time::sleep(Duration::from_secs(3)).await;
        (200, r#"{"status":200,"success":true}"#.to_string())
    })
    .await;
    let client = client(&cp.url(), Duration::from_secs(1));

    let started = Instant::now();
    let err = client.check_token("alice", "tok").await.unwrap_err();
    assert!(matches!(err, AuthError::Transport(TransportError::Timeout { .. })));
    assert!(started.elapsed() < Duration::from_secs(3));

    let mut proxy = ProxyBaseConfig::new("alice.ssh", "tcp");
    let err = client
        .check_proxy("alice", &mut proxy, &NewProxy::default(), "tok")
        .await
        .unwrap_err();
    assert!(matches!(err, AuthError::Transport(TransportError::Timeout { .. })));
    assert_eq!(proxy.transport.bandwidth_limit_mode, BandwidthLimitMode::Client);
}

#[tokio::test]
async fn test_unreachable_control_plane() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = client(&format!("http://{addr}/api"), Duration::from_secs(2));
    let err = client.check_token("alice", "secret-token").await.unwrap_err();

    assert!(matches!(err, AuthError::Transport(TransportError::Request { .. })));
    assert!(!err.to_string().contains("secret-token"));
}

#[tokio::test]
async fn test_post_json_sends_payload() {
    let cp = common::start_mock_control_plane(200, r#"{"ok":true}"#).await;
    let transport = HttpTransport::new(Duration::from_secs(5)).unwrap();
    let url = url::Url::parse(&cp.url()).unwrap();

    let body = transport
        .post_json(&url, &serde_json::json!({"user": "alice", "proxies": 2}))
        .await
        .unwrap();

    assert_eq!(body, r#"{"ok":true}"#);
    let requests = cp.requests();
    assert_eq!(requests[0].method, "POST");
    let sent: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
    assert_eq!(sent["user"], "alice");
    assert_eq!(sent["proxies"], 2);
}
