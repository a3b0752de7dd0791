pub mod manager;
pub mod sources;

pub use manager::NewsAggregator;
pub use sources::{available_sources, build_sources, DEFAULT_SOURCES};

pub mod prelude {
    pub use super::manager::NewsAggregator;
    pub use tn_core::{Article, Error, NewsSource, Result};
}

#[cfg(test)]
pub(crate) mod test_support {
    use axum::Router;
    use std::time::Duration;

    /// Serves `app` on an ephemeral local port and returns its base URL.
    pub async fn spawn(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    pub fn http_client() -> reqwest::Client {
        tn_core::http_client(Duration::from_secs(5)).unwrap()
    }
}
