use std::net::SocketAddr;

use roster_config::AppConfig;
use roster_gateway::create_router;
use roster_runtime::RosterServices;
use tempfile::TempDir;
use tokio::{
    io::{AsyncReadExt, AsyncWriteExt},
    net::{TcpListener, TcpStream},
    sync::oneshot,
};

async fn spawn_server() -> (SocketAddr, oneshot::Sender<()>, TempDir) {
    let db_dir = TempDir::new().expect("create temp dir");
    let mut config = AppConfig::default();
    config.database.url = format!(
        "sqlite://{}",
        db_dir.path().join("roster-e2e.db").to_string_lossy()
    );
    config.auth.hashing.memory_kib = 1024;
    config.auth.hashing.iterations = 1;

    let services = RosterServices::initialise(&config)
        .await
        .expect("initialise services");
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let (stop_tx, stop_rx) = oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, create_router(services))
            .with_graceful_shutdown(async {
                let _ = stop_rx.await;
            })
            .await
            .expect("serve");
    });

    (addr, stop_tx, db_dir)
}

async fn raw_request(addr: SocketAddr, request: String) -> String {
    let mut stream = TcpStream::connect(addr).await.expect("connect");
    stream
        .write_all(request.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    response
}

fn post(path: &str, body: &str) -> String {
    format!(
        "POST {path} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\
         Content-Type: application/json\r\nContent-Length: {}\r\n\r\n{body}",
        body.len()
    )
}

#[tokio::test(flavor = "multi_thread")]
async fn serves_registration_and_login_over_tcp() {
    let (addr, stop, _db_dir) = spawn_server().await;

    let health = raw_request(
        addr,
        "GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n".to_string(),
    )
    .await;
    assert!(health.starts_with("HTTP/1.1 200"));
    assert!(health.contains(r#""status":"ok""#));

    let registered = raw_request(
        addr,
        post(
            "/api/members/register",
            r#"{"identifier":1001,"displayName":"Alice","email":"alice@school.example","password":"pw","passwordConfirmation":"pw"}"#,
        ),
    )
    .await;
    assert!(registered.contains(r#""code":200"#), "{registered}");

    let login = raw_request(
        addr,
        post("/api/members/login", r#"{"identifier":1001,"password":"pw"}"#),
    )
    .await;
    assert!(login.contains(r#""token":""#), "{login}");

    let _ = stop.send(());
}
