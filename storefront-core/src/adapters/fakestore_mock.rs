//! Mock products API server for testing
//!
//! Serves `GET /products` with a generated JSON array shaped like the real
//! Fake Store API, or a configured failure, so the catalog client can be
//! exercised without network access.

use std::io::{Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;

use serde::Serialize;

/// Mock products server
pub struct MockCatalogServer {
    port: u16,
    running: Arc<AtomicBool>,
    requests: Arc<AtomicUsize>,
    thread_handle: Option<thread::JoinHandle<()>>,
}

/// Configuration for the mock server
#[derive(Debug, Clone)]
pub struct MockConfig {
    /// Number of products to generate
    pub num_products: usize,
    /// Respond with this HTTP status instead of products
    pub fail_status: Option<u16>,
    /// Respond 200 with a body that is not a product array
    pub malformed_body: bool,
    /// Delay in milliseconds before responding
    pub delay_ms: u64,
}

impl Default for MockConfig {
    fn default() -> Self {
        Self {
            num_products: 5,
            fail_status: None,
            malformed_body: false,
            delay_ms: 0,
        }
    }
}

#[derive(Serialize)]
struct MockProduct {
    id: i64,
    title: String,
    price: f64,
    description: String,
    category: String,
    image: String,
    rating: MockRating,
}

#[derive(Serialize)]
struct MockRating {
    rate: f64,
    count: u32,
}

impl MockCatalogServer {
    /// Start a new mock server on a random available port
    pub fn start(config: MockConfig) -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0")?;
        let port = listener.local_addr()?.port();
        let running = Arc::new(AtomicBool::new(true));
        let requests = Arc::new(AtomicUsize::new(0));
        let running_clone = running.clone();
        let requests_clone = requests.clone();

        // Non-blocking accept so stop() can end the loop
        listener.set_nonblocking(true)?;

        let thread_handle = thread::spawn(move || {
            while running_clone.load(Ordering::SeqCst) {
                match listener.accept() {
                    Ok((stream, _)) => {
                        requests_clone.fetch_add(1, Ordering::SeqCst);
                        let cfg = config.clone();
                        thread::spawn(move || {
                            handle_connection(stream, &cfg);
                        });
                    }
                    Err(ref e) if e.kind() == std::io::ErrorKind::WouldBlock => {
                        thread::sleep(std::time::Duration::from_millis(10));
                    }
                    Err(_) => break,
                }
            }
        });

        Ok(Self {
            port,
            running,
            requests,
            thread_handle: Some(thread_handle),
        })
    }

    /// URL of the products endpoint
    pub fn products_url(&self) -> String {
        format!("http://127.0.0.1:{}/products", self.port)
    }

    /// Number of connections accepted so far
    pub fn request_count(&self) -> usize {
        self.requests.load(Ordering::SeqCst)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(handle) = self.thread_handle.take() {
            let _ = handle.join();
        }
    }
}

impl Drop for MockCatalogServer {
    fn drop(&mut self) {
        self.stop();
    }
}

fn handle_connection(mut stream: TcpStream, config: &MockConfig) {
    let _ = stream.set_nonblocking(false);
    let mut buffer = [0; 4096];

    if let Ok(n) = stream.read(&mut buffer) {
        let request = String::from_utf8_lossy(&buffer[..n]);

        if config.delay_ms > 0 {
            thread::sleep(std::time::Duration::from_millis(config.delay_ms));
        }

        let first_line = request.lines().next().unwrap_or("");
        let parts: Vec<&str> = first_line.split_whitespace().collect();
        if parts.len() < 2 {
            send_response(&mut stream, 400, "Bad Request", r#"{"error": "Invalid request"}"#);
            return;
        }

        if let Some(status) = config.fail_status {
            send_response(&mut stream, status, "Error", r#"{"error": "Simulated failure"}"#);
            return;
        }

        let path = parts[1].split('?').next().unwrap_or(parts[1]);
        match (parts[0], path) {
            ("GET", "/products") => {
                if config.malformed_body {
                    send_response(&mut stream, 200, "OK", r#"{"products": "oops"}"#);
                    return;
                }
                let products = generate_mock_products(config.num_products);
                let json = serde_json::to_string(&products).unwrap();
                send_response(&mut stream, 200, "OK", &json);
            }
            ("GET", _) => {
                send_response(&mut stream, 404, "Not Found", r#"{"error": "Not found"}"#);
            }
            _ => {
                send_response(
                    &mut stream,
                    405,
                    "Method Not Allowed",
                    r#"{"error": "Method not allowed"}"#,
                );
            }
        }
    }
}

fn send_response(stream: &mut TcpStream, status: u16, status_text: &str, body: &str) {
    let response = format!(
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        status_text,
        body.len(),
        body
    );
    let _ = stream.write_all(response.as_bytes());
    let _ = stream.flush();
}

fn generate_mock_products(count: usize) -> Vec<MockProduct> {
    const CATEGORIES: [&str; 4] = ["men's clothing", "jewelery", "electronics", "women's clothing"];

    (1..=count as i64)
        .map(|id| MockProduct {
            id,
            title: format!("Mock Product {}", id),
            price: id as f64 * 10.0 + 0.99,
            description: format!("Description for mock product {}", id),
            category: CATEGORIES[(id as usize) % CATEGORIES.len()].to_string(),
            image: format!("https://example.com/img/{}.jpg", id),
            rating: MockRating {
                rate: 4.1,
                count: 120,
            },
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;
    use crate::adapters::fakestore::{FakeStoreClient, FakeStoreProvider};
    use crate::domain::result::Error;
    use crate::ports::CatalogProvider;

    #[tokio::test]
    async fn test_mock_server_products() {
        let server = MockCatalogServer::start(MockConfig {
            num_products: 3,
            ..Default::default()
        })
        .unwrap();

        let client = FakeStoreClient::new(&server.products_url(), 5).unwrap();
        let products = client.get_products().await.unwrap();

        assert_eq!(products.len(), 3);
        assert_eq!(products[0].id, 1);
        assert_eq!(products[0].price, Decimal::new(1099, 2));
        assert_eq!(products[2].title, "Mock Product 3");
    }

    #[tokio::test]
    async fn test_mock_server_error_status() {
        let server = MockCatalogServer::start(MockConfig {
            fail_status: Some(500),
            ..Default::default()
        })
        .unwrap();

        let client = FakeStoreClient::new(&server.products_url(), 5).unwrap();
        let err = client.get_products().await.unwrap_err();

        assert!(err.to_string().contains("500"), "got: {}", err);
    }

    #[tokio::test]
    async fn test_mock_server_malformed_body() {
        let server = MockCatalogServer::start(MockConfig {
            malformed_body: true,
            ..Default::default()
        })
        .unwrap();

        let client = FakeStoreClient::new(&server.products_url(), 5).unwrap();
        let err = client.get_products().await.unwrap_err();

        assert!(err.to_string().contains("parse"), "got: {}", err);
    }

    #[tokio::test]
    async fn test_provider_maps_errors_to_catalog() {
        let server = MockCatalogServer::start(MockConfig {
            fail_status: Some(404),
            ..Default::default()
        })
        .unwrap();

        let provider = FakeStoreProvider::new(&server.products_url(), 5).unwrap();
        let result = provider.fetch_products().await;

        assert!(matches!(result, Err(Error::Catalog(_))));
    }
}
