//! HTTP surface tests against a live listener.

use strictly_sos_server::{AppState, RoomRegistry, ServerSettings, router};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

async fn serve() -> std::net::SocketAddr {
    let settings = ServerSettings::default();
    let app = router(&settings, AppState::new(RoomRegistry::default()));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn get(addr: std::net::SocketAddr, path: &str) -> String {
    let mut stream = TcpStream::connect(addr).await.unwrap();
    let request = format!(
        "GET {} HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n",
        path
    );
    stream.write_all(request.as_bytes()).await.unwrap();
    let mut response = String::new();
    stream.read_to_string(&mut response).await.unwrap();
    response
}

#[tokio::test]
async fn test_health_returns_ok() {
    let addr = serve().await;
    let response = get(addr, "/health").await;
    assert!(response.starts_with("HTTP/1.1 200"));
    assert!(response.ends_with("ok"));
}

#[tokio::test]
async fn test_room_path_requires_upgrade() {
    let addr = serve().await;
    let response = get(addr, "/sos_room").await;
    assert!(!response.starts_with("HTTP/1.1 200"));
    assert!(!response.starts_with("HTTP/1.1 404"));
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let addr = serve().await;
    let response = get(addr, "/other_room").await;
    assert!(response.starts_with("HTTP/1.1 404"));
}
