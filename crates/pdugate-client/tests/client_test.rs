//! Client tests against a live server
//!
//! The same lifecycle runs over both transports and must produce the same
//! acks.

use pdugate_client::{
    BinaryTransport, Client, ClientError, HttpTransport, INVALID_CHOICE, render_ack,
    run_interactive,
};
use pdugate_core::SharedRegistry;
use pdugate_proto::StatusCode;
use pdugate_server::{BinaryServer, HttpServer, SystemEnv};

async fn binary_client() -> (Client, SharedRegistry<SystemEnv>) {
    let registry = SharedRegistry::new(SystemEnv::new());
    let server = BinaryServer::bind("127.0.0.1:0", registry.clone()).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());

    (Client::new(BinaryTransport::new(addr.to_string())), registry)
}

async fn http_client() -> (Client, SharedRegistry<SystemEnv>) {
    let registry = SharedRegistry::new(SystemEnv::new());
    let server = HttpServer::bind("127.0.0.1:0", registry.clone()).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());

    (Client::new(HttpTransport::new(format!("http://{addr}"))), registry)
}

async fn lifecycle(client: &Client, registry: &SharedRegistry<SystemEnv>) {
    let ack = client.register(10).await.unwrap();
    assert_eq!(ack.status, StatusCode::Ok);
    assert!(registry.is_registered(10));

    let ack = client.register(10).await.unwrap();
    assert_eq!(ack.status, StatusCode::BadRequest);
    assert_eq!(ack.message, "User Already Registered");

    let ack = client.establish_pdu_session(10, 1, "00ab").await.unwrap();
    assert_eq!(ack.status, StatusCode::Ok);
    assert!(ack.pdu_id.is_some_and(|id| (1..=15).contains(&id)));

    let ack = client.establish_pdu_session(11, 1, "00ab").await.unwrap();
    assert_eq!(ack.status, StatusCode::Forbidden);
    assert_eq!(ack.pdu_id, None);

    let ack = client.establish_pdu_session(10, 256, "00ab").await.unwrap();
    assert_eq!(ack.status, StatusCode::BadRequest);

    let ack = client.deregister(10).await.unwrap();
    assert_eq!(ack.status, StatusCode::Ok);
    assert!(registry.is_empty());

    let ack = client.deregister(10).await.unwrap();
    assert_eq!(ack.status, StatusCode::BadRequest);
}

#[tokio::test]
async fn binary_lifecycle() {
    let (client, registry) = binary_client().await;
    lifecycle(&client, &registry).await;
}

#[tokio::test]
async fn http_lifecycle() {
    let (client, registry) = http_client().await;
    lifecycle(&client, &registry).await;
}

#[tokio::test]
async fn rendered_output_matches_transport() {
    let (binary, _) = binary_client().await;
    let (http, _) = http_client().await;

    for client in [&binary, &http] {
        let ack = client.send(pdugate_proto::RegistrationRequest { id: 1 }.into()).await.unwrap();
        assert_eq!(render_ack(&ack), "Server Response: Registration Successful");

        let ack = client
            .send(pdugate_proto::PduSessionRequest { id: 2, sst: 1, sd: "0001".into() }.into())
            .await
            .unwrap();
        assert_eq!(render_ack(&ack), "PDU Allocated: 0 - PDU Session Denied: ID Not Registered");
    }
}

#[tokio::test]
async fn http_transport_against_binary_port_fails() {
    let registry = SharedRegistry::new(SystemEnv::new());
    let server = BinaryServer::bind("127.0.0.1:0", registry.clone()).await.unwrap();
    let addr = server.local_addr().unwrap();
    tokio::spawn(server.run());

    let client = Client::new(HttpTransport::new(format!("http://{addr}")));
    let err = client.register(1).await.unwrap_err();
    assert!(matches!(err, ClientError::Http(_)));
    assert!(registry.is_empty());
}

/// Prompts end without a newline, so replies share their line.
fn strip_prompts(mut line: &str) -> &str {
    const PROMPTS: [&str; 4] = [
        "Enter choice: ",
        "Enter User ID: ",
        "Enter SST (1-255): ",
        "Enter SD (4 hex digits, e.g., 00ab): ",
    ];

    while let Some(rest) = PROMPTS.iter().find_map(|prompt| line.strip_prefix(prompt)) {
        line = rest;
    }
    line
}

#[tokio::test]
async fn interactive_menu_over_http() {
    let (client, registry) = http_client().await;
    let input = "1\n7\n1\n7\n2\n7\n1\n00ab\n2 8 1 00ab\n5\n3 7\n3\n7\n4\n1\n9\n";

    let mut output = Vec::new();
    run_interactive(&client, input.as_bytes(), &mut output).await.unwrap();
    let output = String::from_utf8(output).unwrap();

    let responses: Vec<&str> = output
        .lines()
        .map(strip_prompts)
        .filter(|line| {
            line.starts_with("Server Response")
                || line.starts_with("PDU Allocated")
                || line.starts_with("Invalid")
        })
        .collect();

    assert_eq!(responses.len(), 7, "{output}");
    assert_eq!(responses[0], "Server Response: Registration Successful");
    assert_eq!(responses[1], "Server Response: User Already Registered");
    assert!(responses[2].starts_with("PDU Allocated: "));
    assert!(responses[2].ends_with(" - PDU Session Established"));
    assert_ne!(responses[2], "PDU Allocated: 0 - PDU Session Established");
    assert_eq!(responses[3], "PDU Allocated: 0 - PDU Session Denied: ID Not Registered");
    assert_eq!(responses[4], INVALID_CHOICE);
    assert_eq!(responses[5], "Server Response: Deregistration Successful");
    assert_eq!(responses[6], "Server Response: Deregistration Failed: ID Not Found");

    // Choice 4 stopped the loop before the trailing registration
    assert!(!registry.is_registered(9));
    assert!(registry.is_empty());
}
