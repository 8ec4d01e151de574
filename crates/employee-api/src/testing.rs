use axum::http::HeaderMap;
use sea_orm::{ConnectionTrait, DatabaseConnection, DbErr, Schema};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::config::Config;
use crate::models::employee;

/// Create the `employee` table from the entity definition.
///
/// Production databases are provisioned out of band; this exists so tests
/// can run against an empty SQLite database.
pub async fn create_employee_table(db: &DatabaseConnection) -> Result<(), DbErr> {
    let backend = db.get_database_backend();
    let mut stmt = Schema::new(backend).create_table_from_entity(employee::Entity);
    stmt.if_not_exists();
    db.execute_raw(backend.build(&stmt)).await?;
    Ok(())
}

/// Configuration for tests: in-memory SQLite, ephemeral port, no request tracing.
pub fn test_config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_host: "127.0.0.1".to_string(),
        server_port: 0, // OS assigns a random port
        environment: "test".to_string(),
    }
}

/// A test application builder for integration testing.
///
/// Spins up the server with an in-memory SQLite database.
///
/// ```rust,ignore
/// #[tokio::test]
/// async fn test_create() {
///     let app = TestApp::new().await;
///     let res = app.client.post(&app.url("/employees"), r#"{"emp_name":"A","emp_role":"B","emp_salary":"1"}"#).await;
///     assert_eq!(res.status, 200);
/// }
/// ```
pub struct TestApp {
    pub addr: SocketAddr,
    pub client: TestClient,
    pub db: DatabaseConnection,
}

impl TestApp {
    /// Create a new test app with an in-memory SQLite database.
    pub async fn new() -> Self {
        Self::with_config(test_config()).await
    }

    /// Create a new test app with a custom config.
    pub async fn with_config(config: Config) -> Self {
        let app = crate::App::with_config(config)
            .await
            .expect("Failed to create test app");

        create_employee_table(&app.db)
            .await
            .expect("Failed to create employee table");

        let router = app.router();
        let listener = TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test server");
        let addr = listener.local_addr().expect("Failed to get local addr");

        // Spawn the server in the background
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });

        TestApp {
            addr,
            client: TestClient::new(addr),
            db: app.db,
        }
    }

    /// Get the base URL for the test server.
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    /// Create an employee through the API and assert it succeeded.
    pub async fn create_employee(&self, name: &str, role: &str, salary: &str) -> TestResponse {
        let body = serde_json::json!({
            "emp_name": name,
            "emp_role": role,
            "emp_salary": salary,
        });

        let res = self
            .client
            .post(&self.url("/employees"), &body.to_string())
            .await;

        assert_eq!(res.status, 200, "Create failed: {}", res.body);
        res
    }

    /// Fetch all employees through the API.
    pub async fn list_employees(&self) -> Vec<serde_json::Value> {
        let res = self.client.get(&self.url("/employees")).await;
        assert_eq!(res.status, 200, "List failed: {}", res.body);
        res.json().as_array().cloned().unwrap_or_default()
    }
}

/// A simple HTTP test client with helper methods.
#[derive(Clone)]
pub struct TestClient {
    inner: reqwest::Client,
    base_addr: SocketAddr,
}

impl TestClient {
    /// Create a new test client pointing at the given address.
    pub fn new(addr: SocketAddr) -> Self {
        TestClient {
            inner: reqwest::Client::new(),
            base_addr: addr,
        }
    }

    /// Send a GET request.
    pub async fn get(&self, url: &str) -> TestResponse {
        self.send(self.inner.get(url)).await
    }

    /// Send a GET request with extra headers.
    pub async fn get_with_headers(&self, url: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut req = self.inner.get(url);
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        self.send(req).await
    }

    /// Send a POST request with a JSON body.
    pub async fn post(&self, url: &str, body: &str) -> TestResponse {
        self.send(
            self.inner
                .post(url)
                .header("Content-Type", "application/json")
                .body(body.to_string()),
        )
        .await
    }

    /// Send a PUT request with a JSON body.
    pub async fn put(&self, url: &str, body: &str) -> TestResponse {
        self.send(
            self.inner
                .put(url)
                .header("Content-Type", "application/json")
                .body(body.to_string()),
        )
        .await
    }

    /// Send a DELETE request.
    pub async fn delete(&self, url: &str) -> TestResponse {
        self.send(self.inner.delete(url)).await
    }

    /// Send an OPTIONS request with extra headers (e.g. a CORS preflight).
    pub async fn options(&self, url: &str, headers: &[(&str, &str)]) -> TestResponse {
        let mut req = self.inner.request(reqwest::Method::OPTIONS, url);
        for (name, value) in headers {
            req = req.header(*name, *value);
        }
        self.send(req).await
    }

    /// Get the base URL.
    pub fn base_url(&self) -> String {
        format!("http://{}", self.base_addr)
    }

    async fn send(&self, req: reqwest::RequestBuilder) -> TestResponse {
        let res = req.send().await.expect("request failed");
        TestResponse::from_response(res).await
    }
}

/// A simplified HTTP response for test assertions.
#[derive(Debug)]
pub struct TestResponse {
    pub status: u16,
    pub body: String,
    pub headers: HeaderMap,
}

impl TestResponse {
    async fn from_response(res: reqwest::Response) -> Self {
        let status = res.status().as_u16();
        let headers = res.headers().clone();
        let body = res.text().await.unwrap_or_default();
        TestResponse {
            status,
            body,
            headers,
        }
    }

    /// Parse the body as JSON.
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_str(&self.body).expect("Failed to parse response as JSON")
    }

    /// Look up a response header as a string.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Get the error field from a failed response.
    pub fn error(&self) -> serde_json::Value {
        self.json()["error"].clone()
    }
}
