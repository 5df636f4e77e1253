// tests/common/mod.rs
pub use axum::Router;
pub use serde_json::json;
pub use tokio::task::JoinHandle;

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Result};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Form, Json};
use reqwest::Client;
use serde_json::Value;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use crate::cache::token_store::TokenStore;
use crate::products::fetcher::ProductFetcher;
use crate::sources::credentials::CredentialTable;
use crate::sources::token_provider::TokenProvider;

pub const TOKEN_PATH: &str = "/oauth/token";
pub const PRODUCT_PATH: &str = "/product/detailInfo";

/// Spawn an Axum router on an ephemeral port and return (JoinHandle, SocketAddr)
pub async fn spawn_axum(router: Router) -> (JoinHandle<()>, SocketAddr) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        axum::serve(listener, router).await.expect("server failed");
    });
    (handle, addr)
}

pub fn build_reqwest_client() -> Client {
    Client::builder()
        .timeout(std::time::Duration::from_secs(5))
        .build()
        .expect("reqwest client")
}

/// US -> us_client/us_secret; DE -> de_client without secret.
pub fn credentials() -> CredentialTable {
    CredentialTable::new(
        HashMap::from([
            ("US".to_owned(), "us_client".to_owned()),
            ("DE".to_owned(), "de_client".to_owned()),
        ]),
        HashMap::from([("us_client".to_owned(), "us_secret".to_owned())]),
    )
}

// -------------------------------
// Token store that records every call
// -------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreWrite {
    pub key: String,
    pub value: String,
    pub ttl_seconds: u64,
}

#[derive(Default)]
pub struct RecordingStore {
    entries: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<StoreWrite>>,
    reads: AtomicUsize,
    fail_reads: bool,
}

impl RecordingStore {
    pub fn with_entry(key: &str, value: &str) -> Self {
        let store = Self::default();
        store.entries.lock().unwrap().insert(key.to_owned(), value.to_owned());
        store
    }

    pub fn failing_reads() -> Self {
        Self { fail_reads: true, ..Self::default() }
    }

    pub fn writes(&self) -> Vec<StoreWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }
}

impl TokenStore for RecordingStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if self.fail_reads {
            return Err(anyhow!("store unavailable"));
        }
        Ok(self.entries.lock().unwrap().get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str, ttl_seconds: u64) -> Result<()> {
        self.writes.lock().unwrap().push(StoreWrite {
            key: key.to_owned(),
            value: value.to_owned(),
            ttl_seconds,
        });
        self.entries.lock().unwrap().insert(key.to_owned(), value.to_owned());
        Ok(())
    }
}

// -------------------------------
// Scripted vendor API
// -------------------------------

#[derive(Clone)]
pub struct VendorScript {
    pub token_status: StatusCode,
    pub token_body: String,
    pub product_status: StatusCode,
    pub product_body: String,
}

impl VendorScript {
    /// Issues `{access_token: T, expires_in: 3600}` and answers with `products`.
    pub fn ok(products: Value) -> Self {
        Self {
            token_status: StatusCode::OK,
            token_body: json!({"access_token": "T", "expires_in": 3600, "token_type": "bearer"}).to_string(),
            product_status: StatusCode::OK,
            product_body: json!({"success": true, "data": products}).to_string(),
        }
    }

    pub fn token(mut self, status: StatusCode, body: Value) -> Self {
        self.token_status = status;
        self.token_body = body.to_string();
        self
    }

    pub fn product(mut self, status: StatusCode, body: &str) -> Self {
        self.product_status = status;
        self.product_body = body.to_owned();
        self
    }
}

#[derive(Clone, Default)]
pub struct VendorCalls {
    pub token: Arc<AtomicUsize>,
    pub product: Arc<AtomicUsize>,
    pub last_form: Arc<Mutex<Option<HashMap<String, String>>>>,
    pub last_authorization: Arc<Mutex<Option<String>>>,
    pub last_product_body: Arc<Mutex<Option<Value>>>,
}

impl VendorCalls {
    pub fn token_calls(&self) -> usize {
        self.token.load(Ordering::SeqCst)
    }

    pub fn product_calls(&self) -> usize {
        self.product.load(Ordering::SeqCst)
    }
}

pub struct MockVendor {
    pub addr: SocketAddr,
    pub calls: VendorCalls,
    handle: JoinHandle<()>,
}

impl MockVendor {
    pub fn token_url(&self) -> String {
        format!("http://{}{}", self.addr, TOKEN_PATH)
    }

    pub fn product_url(&self) -> String {
        format!("http://{}{}", self.addr, PRODUCT_PATH)
    }
}

impl Drop for MockVendor {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Token endpoint only accepts form bodies and the product endpoint only JSON
/// bodies; anything else is rejected by the extractors and not counted.
pub async fn spawn_vendor(script: VendorScript) -> MockVendor {
    let calls = VendorCalls::default();

    let token_calls = calls.clone();
    let token_script = script.clone();
    let product_calls = calls.clone();
    let product_script = script;

    let router = Router::new()
        .route(
            TOKEN_PATH,
            post(move |Form(form): Form<HashMap<String, String>>| {
                let calls = token_calls.clone();
                let script = token_script.clone();
                async move {
                    calls.token.fetch_add(1, Ordering::SeqCst);
                    *calls.last_form.lock().unwrap() = Some(form);
                    (script.token_status, [(CONTENT_TYPE, "application/json")], script.token_body)
                }
            }),
        )
        .route(
            PRODUCT_PATH,
            post(move |headers: HeaderMap, Json(body): Json<Value>| {
                let calls = product_calls.clone();
                let script = product_script.clone();
                async move {
                    calls.product.fetch_add(1, Ordering::SeqCst);
                    *calls.last_authorization.lock().unwrap() = headers
                        .get(AUTHORIZATION)
                        .and_then(|v| v.to_str().ok())
                        .map(str::to_owned);
                    *calls.last_product_body.lock().unwrap() = Some(body);
                    (script.product_status, [(CONTENT_TYPE, "application/json")], script.product_body)
                }
            }),
        );

    let (handle, addr) = spawn_axum(router).await;
    MockVendor { addr, calls, handle }
}

/// Answers every request with `status_line` and a body that stops short of
/// its declared Content-Length, so reading the body fails after the status
/// has arrived.
pub async fn spawn_truncated_response(status_line: &'static str) -> (JoinHandle<()>, SocketAddr) {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind failed");
    let addr = listener.local_addr().unwrap();
    let handle = tokio::spawn(async move {
        while let Ok((mut socket, _)) = listener.accept().await {
            read_request(&mut socket).await;
            let head = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: 512\r\nConnection: close\r\n\r\n{{\"err",
                status_line
            );
            let _ = socket.write_all(head.as_bytes()).await;
            let _ = socket.shutdown().await;
        }
    });
    (handle, addr)
}

/// Consumes headers plus a Content-Length body.
async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];
    loop {
        let n = match socket.read(&mut chunk).await {
            Ok(0) | Err(_) => return,
            Ok(n) => n,
        };
        buf.extend_from_slice(&chunk[..n]);
        let text = String::from_utf8_lossy(&buf);
        if let Some(end) = text.find("\r\n\r\n") {
            let content_length = text[..end]
                .lines()
                .filter_map(|line| line.split_once(':'))
                .find(|(name, _)| name.trim().eq_ignore_ascii_case("content-length"))
                .and_then(|(_, value)| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + content_length {
                return;
            }
        }
    }
}

pub fn provider<S: TokenStore>(vendor: &MockVendor, store: Arc<S>) -> TokenProvider<S> {
    TokenProvider::new(build_reqwest_client(), vendor.token_url(), credentials(), store)
}

pub fn fetcher<S: TokenStore>(vendor: &MockVendor, store: Arc<S>) -> ProductFetcher<S> {
    ProductFetcher::new(build_reqwest_client(), vendor.product_url(), provider(vendor, store))
}

/// Three records in vendor order.
pub fn sample_products() -> Value {
    json!([
        {
            "sku": "W1658P191740",
            "name": "Modern Fabric Sofa",
            "category": "Sofas",
            "categoryCode": "SOFA",
            "weight": 95.2,
            "weightUnit": "lb",
            "length": 84.0,
            "width": 35.0,
            "height": 33.0,
            "lengthUnit": "in",
            "imageUrls": ["https://img/sofa-1.jpg", "https://img/sofa-2.jpg"],
            "attributes": {"Main Color": "Gray", "Scene": "Living Room", "Main Material": "Linen"},
            "comboFlag": false,
            "mainImageUrl": "https://img/sofa-main.jpg"
        },
        {
            "sku": "N725P170323",
            "name": "Bed Frame",
            "comboFlag": true,
            "comboInfo": [
                {"sku": "N725P170323-A", "qty": 1, "weightKg": 20.5},
                {"sku": "N725P170323-B", "qty": 2, "weightKg": 8.0}
            ]
        },
        {
            "sku": "WF288172AAP"
        }
    ])
}

/// `count` distinct SKUs.
pub fn skus(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("SKU{:04}", i)).collect()
}
