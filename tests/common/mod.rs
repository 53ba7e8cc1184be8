#![allow(dead_code)]

use async_trait::async_trait;
use axum::extract::ConnectInfo;
use axum_test::TestServer;
use chrono::Utc;
use serde_json::json;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::mpsc;
use tower::Layer;

use linkcut::application::services::TokenService;
use linkcut::domain::click_event::ClickEvent;
use linkcut::domain::click_worker::run_click_worker;
use linkcut::domain::entities::{Link, NewLink, NewUser, User};
use linkcut::domain::repositories::{LinkRepository, UserRepository};
use linkcut::error::AppError;
use linkcut::routes::api_router;
use linkcut::state::AppState;

pub const TEST_SECRET: &str = "test-jwt-secret";
pub const TEST_BASE_URL: &str = "http://localhost:3000";

/// Link store backed by a vector, enforcing the unique short code.
#[derive(Default)]
pub struct InMemoryLinkRepository {
    links: Mutex<Vec<Link>>,
    down: AtomicBool,
}

impl InMemoryLinkRepository {
    /// Makes every subsequent call fail like a lost database.
    pub fn set_down(&self, down: bool) {
        self.down.store(down, Ordering::SeqCst);
    }

    pub fn all(&self) -> Vec<Link> {
        self.links.lock().unwrap().clone()
    }

    pub fn get(&self, code: &str) -> Option<Link> {
        self.all().into_iter().find(|l| l.code == code)
    }

    fn check(&self) -> Result<(), AppError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(AppError::internal("Database error", json!({})));
        }
        Ok(())
    }
}

#[async_trait]
impl LinkRepository for InMemoryLinkRepository {
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        self.check()?;
        let mut links = self.links.lock().unwrap();

        if links.iter().any(|l| l.code == new_link.code) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "urls_short_code_key" }),
            ));
        }

        let link = Link::new(
            links.len() as i64 + 1,
            new_link.code,
            new_link.long_url,
            new_link.user_id,
            0,
            Utc::now(),
            new_link.ip_address,
        );
        links.push(link.clone());
        Ok(link)
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<Link>, AppError> {
        self.check()?;
        Ok(self.get(code))
    }

    async fn list_by_owner(&self, user_id: i64) -> Result<Vec<Link>, AppError> {
        self.check()?;
        let mut owned: Vec<Link> = self
            .all()
            .into_iter()
            .filter(|l| l.is_owned_by(user_id))
            .collect();
        owned.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));
        Ok(owned)
    }

    async fn increment_clicks(&self, link_id: i64) -> Result<bool, AppError> {
        self.check()?;
        let mut links = self.links.lock().unwrap();
        match links.iter_mut().find(|l| l.id == link_id) {
            Some(link) => {
                link.click_count += 1;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn count(&self) -> Result<i64, AppError> {
        self.check()?;
        Ok(self.links.lock().unwrap().len() as i64)
    }

    async fn total_clicks(&self) -> Result<i64, AppError> {
        self.check()?;
        Ok(self.links.lock().unwrap().iter().map(|l| l.click_count).sum())
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.check()
    }
}

/// User store backed by a vector, enforcing unique username and email.
#[derive(Default)]
pub struct InMemoryUserRepository {
    users: Mutex<Vec<User>>,
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn exists(&self, username: &str, email: &str) -> Result<bool, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .any(|u| u.username == username || u.email == email))
    }

    async fn create(&self, new_user: NewUser) -> Result<User, AppError> {
        let mut users = self.users.lock().unwrap();

        if users
            .iter()
            .any(|u| u.username == new_user.username || u.email == new_user.email)
        {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "users_email_key" }),
            ));
        }

        let user = User {
            id: users.len() as i64 + 1,
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            created_at: Utc::now(),
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(&self) -> Result<Vec<User>, AppError> {
        Ok(self.users.lock().unwrap().clone())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.users.lock().unwrap().len() as i64)
    }
}

/// Builds state over fresh in-memory stores. The click receiver is returned
/// undrained so tests can inspect queued events.
pub fn create_test_state() -> (
    AppState,
    mpsc::Receiver<ClickEvent>,
    Arc<InMemoryLinkRepository>,
) {
    let links = Arc::new(InMemoryLinkRepository::default());
    let users = Arc::new(InMemoryUserRepository::default());
    let tokens = Arc::new(TokenService::new(TEST_SECRET, 3600));
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(links.clone(), users, tokens, TEST_BASE_URL, tx);

    (state, rx, links)
}

/// A running test server with the click worker attached.
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub links: Arc<InMemoryLinkRepository>,
}

pub fn spawn_app() -> TestApp {
    let (state, rx, links) = create_test_state();
    tokio::spawn(run_click_worker(rx, links.clone()));

    let server = TestServer::new(api_router(state.clone())).unwrap();

    TestApp {
        server,
        state,
        links,
    }
}

/// Like [`spawn_app`], but every request appears to come from `127.0.0.1:12345`.
pub fn spawn_app_with_peer() -> TestApp {
    let (state, rx, links) = create_test_state();
    tokio::spawn(run_click_worker(rx, links.clone()));

    let app = api_router(state.clone()).layer(MockConnectInfoLayer);
    let server = TestServer::new(app).unwrap();

    TestApp {
        server,
        state,
        links,
    }
}

impl TestApp {
    pub async fn register(&self, username: &str, email: &str, password: &str) {
        let response = self
            .server
            .post("/api/register")
            .json(&json!({ "username": username, "email": email, "password": password }))
            .await;
        assert_eq!(response.status_code(), 201, "{}", response.text());
    }

    /// Registers an account and returns a session token for it.
    pub async fn login_as(&self, username: &str) -> String {
        let email = format!("{username}@example.com");
        self.register(username, &email, "secret1").await;

        let response = self
            .server
            .post("/api/login")
            .json(&json!({ "email": email, "password": "secret1" }))
            .await;
        assert_eq!(response.status_code(), 200, "{}", response.text());

        response.json::<serde_json::Value>()["token"]
            .as_str()
            .unwrap()
            .to_string()
    }

    /// Shortens `url`, optionally as the owner of `token`; returns the short code.
    pub async fn shorten(&self, url: &str, token: Option<&str>) -> String {
        let mut request = self
            .server
            .post("/api/shorten")
            .json(&json!({ "longUrl": url }));
        if let Some(token) = token {
            request = request.add_header("Authorization", format!("Bearer {token}"));
        }

        let response = request.await;
        assert_eq!(response.status_code(), 201, "{}", response.text());

        let short_url = response.json::<serde_json::Value>()["shortUrl"]
            .as_str()
            .unwrap()
            .to_string();
        short_url.rsplit('/').next().unwrap().to_string()
    }

    /// Waits for the click worker to bring `code` to `expected` clicks.
    pub async fn wait_for_clicks(&self, code: &str, expected: i64) -> i64 {
        for _ in 0..100 {
            let count = self.links.get(code).map(|l| l.click_count).unwrap_or(0);
            if count >= expected {
                return count;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        self.links.get(code).map(|l| l.click_count).unwrap_or(0)
    }
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = "127.0.0.1:12345".parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
