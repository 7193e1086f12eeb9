mod support;

use reqwest::{header, Client, StatusCode};
use serde_json::Value;
use std::time::{Duration, Instant};
use support::TestServer;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;

async fn put_surname(client: &Client, server: &TestServer, surname: &str) -> reqwest::Response {
    client
        .put(server.url("/travellers"))
        .json(&serde_json::json!({ "surname": surname }))
        .send()
        .await
        .expect("PUT /travellers")
}

async fn submit_form(client: &Client, server: &TestServer, surname: &str) -> String {
    let resp = client
        .post(server.url("/travellers"))
        .header(header::ACCEPT, "text/html,application/xhtml+xml,*/*;q=0.8")
        .form(&[("surname", surname), ("submit", "submit")])
        .send()
        .await
        .expect("form submission");
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.headers()[header::CONTENT_TYPE]
        .to_str()
        .unwrap()
        .starts_with("text/html"));
    resp.text().await.expect("form response body")
}

/// Send `GET /hello` over a raw socket and read until the greeting arrives
async fn raw_hello(stream: &mut TcpStream) -> String {
    stream
        .write_all(b"GET /hello HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await
        .expect("write request");
    let mut response = Vec::new();
    let mut buf = [0u8; 1024];
    while !response.ends_with(b"hello Guest") {
        let n = stream.read(&mut buf).await.expect("read response");
        if n == 0 {
            break;
        }
        response.extend_from_slice(&buf[..n]);
    }
    String::from_utf8_lossy(&response).into_owned()
}

fn span_text<'a>(html: &'a str, id: &str) -> Option<&'a str> {
    let open = format!(r#"<span id="{id}">"#);
    let start = html.find(&open)? + open.len();
    let end = html[start..].find("</span>")?;
    Some(&html[start..start + end])
}

#[tokio::test]
async fn hello_without_name_greets_guest() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let resp = client.get(server.url("/hello")).send().await.expect("GET /hello");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "hello Guest");

    let resp = client.get(server.url("/hello?name=")).send().await.unwrap();
    assert_eq!(resp.text().await.unwrap(), "hello Guest");

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn hello_with_name() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let resp = client
        .get(server.url("/hello?name=xy_z"))
        .send()
        .await
        .expect("GET /hello?name=xy_z");
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.text().await.unwrap(), "hello xy_z");

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn travellers_returns_json_records() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    for (surname, name) in [("Colombo", "Cristoforo"), ("da Verrazzano", "Giovanni")] {
        let resp = put_surname(&client, &server, surname).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(resp.headers()[header::CONTENT_TYPE], "application/json");
        let body: Value = resp.json().await.expect("JSON body");
        assert_eq!(body["name"], name);
        assert_eq!(body["surname"], surname);
        assert!(body["dates"].is_string());
    }

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn travellers_unknown_surname_falls_back() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let resp = put_surname(&client, &server, "Caboto").await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], "unknown");
    assert_eq!(body["surname"], "Caboto");

    let resp = client
        .put(server.url("/travellers"))
        .header(header::CONTENT_TYPE, "application/json")
        .body("{ definitely not json")
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["name"], "unknown");

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn form_page_and_submission() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let resp = client.get(server.url("/")).send().await.expect("GET /");
    assert_eq!(resp.status(), StatusCode::OK);
    let page = resp.text().await.unwrap();
    assert!(page.contains(r#"name="surname""#));
    assert!(page.contains(r#"name="submit""#));

    for (surname, name) in [("Colombo", "Cristoforo"), ("Vespucci", "Amerigo")] {
        let html = submit_form(&client, &server, surname).await;
        assert_eq!(span_text(&html, "name"), Some(name));
        assert_eq!(span_text(&html, "surname"), Some(surname));
        assert_eq!(html.matches(r#"<span id="dates">"#).count(), 1);
    }

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn repeated_requests_are_idempotent() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let first: Value = put_surname(&client, &server, "Colombo").await.json().await.unwrap();
    let first_page = submit_form(&client, &server, "Vespucci").await;
    for _ in 0..10 {
        let again: Value = put_surname(&client, &server, "Colombo").await.json().await.unwrap();
        assert_eq!(again, first);
        assert_eq!(submit_form(&client, &server, "Vespucci").await, first_page);
        let hello = client.get(server.url("/hello?name=xy_z")).send().await.unwrap();
        assert_eq!(hello.text().await.unwrap(), "hello xy_z");
    }

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn health_and_unknown_routes() {
    let server = TestServer::spawn().await;
    let client = Client::new();

    let resp = client.get(server.url("/healthz")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers()[header::SERVER], "travellers-server");
    assert_eq!(resp.text().await.unwrap(), "ok");

    let resp = client.get(server.url("/missing")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = client.delete(server.url("/travellers")).send().await.unwrap();
    assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn custom_dataset_with_case_insensitive_matching() {
    let dir = tempfile::tempdir().unwrap();
    let dataset = dir.path().join("explorers.toml");
    std::fs::write(
        &dataset,
        r#"
[[explorer]]
name = "Giovanni"
surname = "Caboto"
dates = "1450 - 1500"
aliases = ["Cabot"]
"#,
    )
    .unwrap();

    let path = dataset.to_str().unwrap().to_string();
    let server = TestServer::spawn_with(move |config| {
        config.dataset.path = Some(path);
        config.dataset.match_mode = travellers_server::explorers::MatchMode::CaseInsensitive;
    })
    .await;
    let client = Client::new();

    let body: Value = put_surname(&client, &server, " cabot ").await.json().await.unwrap();
    assert_eq!(body["name"], "Giovanni");
    assert_eq!(body["surname"], "Caboto");

    // Built-in explorers are replaced by the dataset file
    let body: Value = put_surname(&client, &server, "Colombo").await.json().await.unwrap();
    assert_eq!(body["name"], "unknown");

    drop(client);
    server.stop().await;
}

#[tokio::test]
async fn stop_closes_idle_keep_alive_connections() {
    let server = TestServer::spawn_with(|config| {
        config.performance.keep_alive_timeout = 30;
        config.performance.read_timeout = 30;
        config.performance.write_timeout = 30;
    })
    .await;
    let client = Client::new();

    let resp = client.get(server.url("/hello")).send().await.unwrap();
    assert_eq!(resp.text().await.unwrap(), "hello Guest");

    // The pooled connection is still open while the server stops
    tokio::time::timeout(Duration::from_secs(5), server.stop())
        .await
        .expect("shutdown waited on an idle connection");
    drop(client);
}

#[tokio::test]
async fn idle_connection_closed_after_keep_alive_timeout() {
    let server = TestServer::spawn_with(|config| {
        config.performance.keep_alive_timeout = 1;
        config.performance.read_timeout = 30;
        config.performance.write_timeout = 30;
    })
    .await;

    let mut stream = TcpStream::connect(server.addr()).await.unwrap();
    let response = raw_hello(&mut stream).await;
    assert!(response.starts_with("HTTP/1.1 200"));

    let idle_since = Instant::now();
    let mut buf = [0u8; 64];
    let read = tokio::time::timeout(Duration::from_secs(5), stream.read(&mut buf))
        .await
        .expect("idle connection was not closed");
    assert!(matches!(read, Ok(0)));
    assert!(idle_since.elapsed() >= Duration::from_millis(900));

    server.stop().await;
}

#[tokio::test]
async fn connections_beyond_limit_are_refused() {
    let server = TestServer::spawn_with(|config| {
        config.performance.max_connections = Some(1);
    })
    .await;

    let mut first = TcpStream::connect(server.addr()).await.unwrap();
    assert!(raw_hello(&mut first).await.starts_with("HTTP/1.1 200"));

    // The first connection stays open, so the second is dropped on accept
    let mut second = TcpStream::connect(server.addr()).await.unwrap();
    let _ = second
        .write_all(b"GET /hello HTTP/1.1\r\nHost: localhost\r\n\r\n")
        .await;
    let mut buf = [0u8; 256];
    let read = tokio::time::timeout(Duration::from_secs(5), second.read(&mut buf))
        .await
        .expect("refused connection was left open");
    match read {
        Ok(n) => assert_eq!(n, 0, "unexpected response on refused connection"),
        Err(err) => assert!(matches!(
            err.kind(),
            std::io::ErrorKind::ConnectionReset | std::io::ErrorKind::BrokenPipe
        )),
    }

    // The open connection is still served
    assert!(raw_hello(&mut first).await.starts_with("HTTP/1.1 200"));

    drop(first);
    drop(second);
    server.stop().await;
}
