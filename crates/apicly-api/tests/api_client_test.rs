#![allow(clippy::unwrap_used)]
// Integration tests for `ApicClient` using wiremock.

use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use apicly_api::{ApicClient, Error, HostType, ServiceTicket, TransportConfig};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, ApicClient) {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let client = ApicClient::with_client(reqwest::Client::new(), base_url);
    (server, client)
}

fn envelope(response: serde_json::Value) -> serde_json::Value {
    json!({ "response": response, "version": "1.0" })
}

// ── Ticket tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_request_ticket_success() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/ticket"))
        .and(body_json(json!({"username": "devnetuser", "password": "s3cret"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "serviceTicket": "ST-1234-cas",
            "idleTimeout": 1800,
            "sessionTimeout": 21600
        }))))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "s3cret".to_string().into();
    let ticket = client.request_ticket("devnetuser", &secret).await.unwrap();
    assert_eq!(ticket.expose(), "ST-1234-cas");
}

#[tokio::test]
async fn test_request_ticket_rejected() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/ticket"))
        .respond_with(ResponseTemplate::new(401).set_body_json(envelope(json!({
            "errorCode": "RBAC",
            "message": "Invalid credentials"
        }))))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "wrong".to_string().into();
    let result = client.request_ticket("devnetuser", &secret).await;

    match result {
        Err(Error::Authentication { ref message }) => {
            assert!(
                message.contains("Invalid credentials"),
                "expected controller message, got: {message}"
            );
        }
        other => panic!("expected Authentication error, got: {other:?}"),
    }
}

#[tokio::test]
async fn test_request_ticket_empty_body_is_auth_failure() {
    let (server, client) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/v1/ticket"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({}))))
        .mount(&server)
        .await;

    let secret: secrecy::SecretString = "s3cret".to_string().into();
    let result = client.request_ticket("devnetuser", &secret).await;

    assert!(
        matches!(result, Err(Error::Authentication { .. })),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_ticket_is_sent_on_lookups() {
    let server = MockServer::start().await;
    let base_url = Url::parse(&server.uri()).unwrap();
    let ticket = ServiceTicket::new("ST-abc");
    let client = ApicClient::with_ticket(base_url, &ticket, &TransportConfig::default()).unwrap();

    Mock::given(method("GET"))
        .and(path("/api/v1/network-device"))
        .and(header("X-Auth-Token", "ST-abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .expect(1)
        .mount(&server)
        .await;

    let devices = client.list_devices().await.unwrap();
    assert!(devices.is_empty());
}

// ── Host tests ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_find_hosts_by_ip() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/host"))
        .and(query_param("hostIp", "10.1.15.117"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "id": "host-1",
            "hostIp": "10.1.15.117",
            "hostMac": "00:24:d7:43:59:d8",
            "hostType": "wireless",
            "connectedNetworkDeviceId": "dev-ap",
            "connectedNetworkDeviceIpAddress": "10.1.14.3",
            "vlanId": "600"
        }]))))
        .mount(&server)
        .await;

    let hosts = client.find_hosts_by_ip("10.1.15.117").await.unwrap();

    assert_eq!(hosts.len(), 1);
    assert_eq!(hosts[0].host_type, HostType::Wireless);
    assert_eq!(hosts[0].connected_network_device_id, "dev-ap");
    assert_eq!(hosts[0].vlan_id.as_deref(), Some("600"));
}

#[tokio::test]
async fn test_find_hosts_empty() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/host"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([]))))
        .mount(&server)
        .await;

    let hosts = client.find_hosts_by_ip("10.9.9.9").await.unwrap();
    assert!(hosts.is_empty());
}

// ── Interface tests ─────────────────────────────────────────────────

#[tokio::test]
async fn test_interfaces_by_ip_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/interface/ip-address/10.2.2.2"))
        .respond_with(ResponseTemplate::new(404).set_body_json(envelope(json!({
            "errorCode": "NCND01040",
            "message": "Interface not found"
        }))))
        .mount(&server)
        .await;

    let interfaces = client.interfaces_by_ip("10.2.2.2").await.unwrap();
    assert!(interfaces.is_empty());
}

#[tokio::test]
async fn test_interfaces_by_ip_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/interface/ip-address/10.2.1.1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([{
            "id": "if-1",
            "portName": "GigabitEthernet0/0/1",
            "deviceId": "dev-router",
            "ipv4Address": "10.2.1.1",
            "ipv4Mask": "255.255.255.0",
            "status": "up"
        }]))))
        .mount(&server)
        .await;

    let interfaces = client.interfaces_by_ip("10.2.1.1").await.unwrap();
    assert_eq!(interfaces.len(), 1);
    assert_eq!(interfaces[0].port_name, "GigabitEthernet0/0/1");
    assert_eq!(interfaces[0].device_id, "dev-router");
}

// ── Device tests ────────────────────────────────────────────────────

#[tokio::test]
async fn test_get_device() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/network-device/dev-A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!({
            "id": "dev-A",
            "hostname": "hostA",
            "type": "Cisco ASR 1001-X Router",
            "serialNumber": "SN-A",
            "managementIpAddress": "10.1.1.1"
        }))))
        .mount(&server)
        .await;

    let device = client.get_device("dev-A").await.unwrap().unwrap();
    assert_eq!(device.hostname.as_deref(), Some("hostA"));
    assert_eq!(device.device_type.as_deref(), Some("Cisco ASR 1001-X Router"));
    assert_eq!(device.serial_number.as_deref(), Some("SN-A"));
}

#[tokio::test]
async fn test_get_device_by_ip_not_found() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/network-device/ip-address/10.3.3.3"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let device = client.get_device_by_ip("10.3.3.3").await.unwrap();
    assert!(device.is_none());
}

#[tokio::test]
async fn test_list_devices_preserves_order() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/network-device"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            {"id": "dev-B", "hostname": "hostB"},
            {"id": "dev-A", "hostname": "hostA"},
            {"id": "dev-C"}
        ]))))
        .mount(&server)
        .await;

    let ids: Vec<String> = client
        .list_devices()
        .await
        .unwrap()
        .into_iter()
        .map(|d| d.id)
        .collect();
    assert_eq!(ids, vec!["dev-B", "dev-A", "dev-C"]);
}

// ── License tests ───────────────────────────────────────────────────

#[tokio::test]
async fn test_device_licenses() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/license-info/network-device/dev-A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(envelope(json!([
            {"name": "ipbase", "status": "INUSE"},
            {"name": "sec", "status": "EXPIRED"}
        ]))))
        .mount(&server)
        .await;

    let licenses = client.device_licenses("dev-A").await.unwrap();
    assert_eq!(licenses.len(), 2);
    assert!(licenses[0].is_in_use());
    assert!(!licenses[1].is_in_use());
}

#[tokio::test]
async fn test_device_licenses_malformed() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/license-info/network-device/dev-B"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"version": "1.0"})))
        .mount(&server)
        .await;

    let result = client.device_licenses("dev-B").await;
    assert!(
        matches!(result, Err(Error::Deserialization { .. })),
        "expected Deserialization error, got: {result:?}"
    );
}

// ── Error tests ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_expired_ticket() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = client.list_devices().await;
    assert!(
        result.as_ref().is_err_and(Error::is_auth_failure),
        "expected Authentication error, got: {result:?}"
    );
}

#[tokio::test]
async fn test_server_error_carries_controller_message() {
    let (server, client) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/v1/network-device/dev-X"))
        .respond_with(ResponseTemplate::new(500).set_body_json(envelope(json!({
            "errorCode": "Internal",
            "message": "Inventory service unavailable"
        }))))
        .mount(&server)
        .await;

    match client.get_device("dev-X").await {
        Err(Error::Api { status, ref message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("Inventory service unavailable"));
        }
        other => panic!("expected Api error, got: {other:?}"),
    }
}
