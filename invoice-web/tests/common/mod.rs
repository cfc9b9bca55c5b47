#![allow(dead_code)]

use invoice_web::config::InvoiceConfig;
use invoice_web::services::{init_metrics, Database};
use invoice_web::startup::Application;
use reqwest::redirect::Policy;
use std::sync::Once;
use tempfile::TempDir;

static METRICS: Once = Once::new();

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub db: Database,
    pub client: reqwest::Client,
    pub upload_dir: String,
    // Dropped with the app; holds the database file and uploads.
    _dir: TempDir,
}

impl TestApp {
    pub async fn spawn() -> Self {
        METRICS.call_once(|| {
            init_metrics().expect("Failed to install metrics recorder");
        });

        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let upload_dir = dir.path().join("uploads").to_string_lossy().to_string();

        let mut config = InvoiceConfig::load().expect("Failed to load configuration");
        config.common.port = 0; // Random port for testing
        config.database.url = format!("sqlite://{}", dir.path().join("test.db").display());
        config.storage.upload_dir = upload_dir.clone();

        let app = Application::build(config)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let db = app.db().clone();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Cookies carry the flash session; redirects are asserted, not followed.
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .redirect(Policy::none())
            .build()
            .expect("Failed to build HTTP client");

        // Wait for HTTP server to be ready by polling health endpoint
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            db,
            client,
            upload_dir,
            _dir: dir,
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("Failed to execute request")
    }

    pub async fn get_html(&self, path: &str) -> String {
        let response = self.get(path).await;
        assert_eq!(response.status().as_u16(), 200, "GET {} failed", path);
        response.text().await.expect("Failed to read body")
    }

    /// Submit the invoice form. `items` are (description, quantity, price).
    pub async fn post_invoice(
        &self,
        customer_name: &str,
        status: &str,
        items: &[(&str, &str, &str)],
        discount: &str,
    ) -> reqwest::Response {
        let mut form = vec![
            ("customer_name", customer_name.to_string()),
            ("status", status.to_string()),
            ("discount", discount.to_string()),
        ];
        for (description, quantity, price) in items {
            form.push(("description", description.to_string()));
            form.push(("quantity", quantity.to_string()));
            form.push(("price", price.to_string()));
        }

        self.client
            .post(self.url("/create"))
            .form(&form)
            .send()
            .await
            .expect("Failed to execute request")
    }
}

pub fn location(response: &reqwest::Response) -> &str {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .unwrap_or("")
}
