//! Helpers for tests that need a live upstream

use axum::Router;

/// Serve `router` on an ephemeral local port, returning `http://127.0.0.1:<port>`
pub async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test upstream");
    let addr = listener.local_addr().expect("test upstream addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, router).await;
    });
    format!("http://{}", addr)
}

/// An address nothing is listening on
pub fn refused_url() -> String {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind unused port");
    let addr = listener.local_addr().expect("unused port addr");
    drop(listener);
    format!("http://{}", addr)
}
