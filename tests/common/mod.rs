#![allow(dead_code)]

use std::process::{Child, Command, Stdio};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use reqwest::StatusCode;

pub const JWT_SECRET: &str = "integration-secret";

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        let mut cmd = Command::new(env!("CARGO_BIN_EXE_catalog-admin-api"));
        cmd.env("PORT", port.to_string())
            .env("JWT_SECRET", JWT_SECRET)
            .env("BCRYPT_COST", "4")
            .env("RUST_LOG", "warn")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        // DATABASE_URL is inherited from the test environment
        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline {
                break;
            }
            if let Ok(resp) = client.get(format!("{}/", self.base_url)).send().await {
                if resp.status() == StatusCode::OK {
                    return Ok(());
                }
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

/// Fresh server for one test, or `None` when no database is configured for this run
pub async fn ensure_server() -> Result<Option<TestServer>> {
    let _ = dotenvy::dotenv();
    if std::env::var("DATABASE_URL").map(|v| v.is_empty()).unwrap_or(true) {
        eprintln!("DATABASE_URL not set; skipping integration test");
        return Ok(None);
    }

    let server = TestServer::spawn()?;
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(Some(server))
}

/// Suffix that keeps names unique across runs against the same database
pub fn unique(prefix: &str) -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos())
        .unwrap_or_default();
    format!("{}_{}", prefix, nanos)
}

/// Sign up a fresh admin and log in, returning the bearer token
pub async fn admin_token(server: &TestServer) -> Result<String> {
    let client = reqwest::Client::new();
    let username = unique("admin");
    let password = "integration-password";

    let res = client
        .post(format!("{}/api/auth/signup", server.base_url))
        .json(&serde_json::json!({
            "username": username,
            "password": password,
            "email": format!("{}@example.com", username),
        }))
        .send()
        .await?;
    anyhow::ensure!(res.status() == StatusCode::CREATED, "signup failed: {}", res.status());

    let body: serde_json::Value = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&serde_json::json!({ "username": username, "password": password }))
        .send()
        .await?
        .json()
        .await?;

    body["token"]
        .as_str()
        .map(str::to_string)
        .context("login response carried no token")
}
