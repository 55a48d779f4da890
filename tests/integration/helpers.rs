//! Shared test helpers for integration tests.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use axum::Router;
use axum::body::Body;
use async_trait::async_trait;
use axum::http::{Request, StatusCode};
use bytes::Bytes;
use serde_json::Value;
use sqlx::PgPool;
use tempfile::TempDir;
use tower::ServiceExt;
use uuid::Uuid;

use rental_api::{build_app, build_state};
use rental_auth::JwtEncoder;
use rental_cache::CacheManager;
use rental_core::config::{AppConfig, DatabaseConfig};
use rental_core::error::AppError;
use rental_core::result::AppResult;
use rental_core::traits::storage::StorageProvider;
use rental_core::types::UserId;
use rental_database::DatabasePool;
use rental_database::migration::run_migrations;
use rental_database::repositories::category::{CategoryRecord, CategoryRepository};
use rental_database::repositories::user::{CreateUser, UserRepository};
use rental_entity::user::UserRole;
use rental_storage::StorageManager;
use rental_storage::providers::LocalStorageProvider;

const BOUNDARY: &str = "rentboard-test-boundary";

/// Test application context
pub struct TestApp {
    /// The Axum router for making test requests
    pub router: Router,
    /// Database pool for direct queries
    pub db_pool: PgPool,
    /// Application config
    pub config: AppConfig,
    /// Local media root, removed on drop
    pub media_dir: TempDir,
    /// Media store behind the router
    pub storage: Arc<SwitchableStorage>,
}

/// Local storage whose uploads can be made to fail on demand.
#[derive(Debug)]
pub struct SwitchableStorage {
    inner: LocalStorageProvider,
    failing: AtomicBool,
}

impl SwitchableStorage {
    /// Make every following `put` fail.
    pub fn fail_uploads(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl StorageProvider for SwitchableStorage {
    fn provider_type(&self) -> &str {
        self.inner.provider_type()
    }

    async fn health_check(&self) -> AppResult<bool> {
        self.inner.health_check().await
    }

    async fn put(&self, key: &str, content_type: &str, data: Bytes) -> AppResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(AppError::storage(format!("Upload of {key} refused")));
        }
        self.inner.put(key, content_type, data).await
    }

    async fn delete(&self, key: &str) -> AppResult<()> {
        self.inner.delete(key).await
    }
}

/// A seeded user together with a bearer token.
#[derive(Debug, Clone)]
pub struct TestUser {
    pub id: UserId,
    pub token: String,
}

/// A file part of a multipart request.
pub struct FilePart<'a> {
    pub field: &'a str,
    pub file_name: &'a str,
    pub content_type: &'a str,
    pub bytes: &'a [u8],
}

impl<'a> FilePart<'a> {
    /// A small PNG image part.
    pub fn image(file_name: &'a str) -> Self {
        Self {
            field: "images",
            file_name,
            content_type: "image/png",
            bytes: b"\x89PNG\r\n\x1a\nnot-really-a-png",
        }
    }
}

impl TestApp {
    /// Create a test application with default settings, or `None` when no
    /// database is configured.
    pub async fn new() -> Option<Self> {
        Self::with_config(|_| {}).await
    }

    /// Like [`TestApp::new`] with a hook to adjust the configuration.
    pub async fn with_config(adjust: impl FnOnce(&mut AppConfig)) -> Option<Self> {
        let Ok(url) = std::env::var("DATABASE_URL") else {
            eprintln!("DATABASE_URL not set; skipping integration test");
            return None;
        };
        let media_dir = TempDir::new().expect("Failed to create media dir");

        let mut config = AppConfig {
            server: Default::default(),
            database: DatabaseConfig {
                url,
                max_connections: 5,
                min_connections: 0,
                connect_timeout_seconds: 10,
                idle_timeout_seconds: 60,
                run_migrations: true,
            },
            cache: Default::default(),
            auth: Default::default(),
            storage: Default::default(),
            media: Default::default(),
            rate_limit: Default::default(),
            catalog: Default::default(),
            logging: Default::default(),
        };
        config.cache.provider = "memory".to_string();
        config.storage.provider = "local".to_string();
        config.storage.local.root_path = media_dir.path().to_string_lossy().into_owned();
        adjust(&mut config);

        let db_pool = DatabasePool::connect(&config.database)
            .await
            .expect("Failed to connect to test database")
            .into_pool();
        run_migrations(&db_pool)
            .await
            .expect("Failed to run migrations");

        let cache = Arc::new(
            CacheManager::new(&config.cache)
                .await
                .expect("Failed to init cache"),
        );
        let storage = Arc::new(SwitchableStorage {
            inner: LocalStorageProvider::new(&config.storage.local.root_path)
                .await
                .expect("Failed to init storage"),
            failing: AtomicBool::new(false),
        });
        let manager = Arc::new(StorageManager::from_provider(storage.clone()));

        let router = build_app(build_state(config.clone(), db_pool.clone(), cache, manager));

        Some(Self {
            router,
            db_pool,
            config,
            media_dir,
            storage,
        })
    }

    /// Seed a user and mint a token for them.
    pub async fn create_user(&self, role: UserRole, has_subscription_fee: bool) -> TestUser {
        let phone_number = format!("09{:09}", Uuid::new_v4().as_u128() % 1_000_000_000);
        let user = UserRepository::new(self.db_pool.clone())
            .create(&CreateUser {
                phone_number,
                role,
                is_active: true,
                has_subscription_fee,
            })
            .await
            .expect("Failed to create test user");

        let (token, _) = JwtEncoder::new(&self.config.auth)
            .access_token(user.id, role)
            .expect("Failed to mint token");
        TestUser { id: user.id, token }
    }

    /// A member who has paid the subscription fee.
    pub async fn paid_user(&self) -> TestUser {
        self.create_user(UserRole::User, true).await
    }

    pub async fn admin(&self) -> TestUser {
        self.create_user(UserRole::Admin, false).await
    }

    /// Seed a category with a unique name and return that name.
    pub async fn create_category(&self, label: &str, parent: Option<&str>) -> String {
        let repo = CategoryRepository::new(self.db_pool.clone());
        let parent_id = match parent {
            Some(name) => Some(
                repo.find_by_name(name)
                    .await
                    .expect("Failed to look up parent")
                    .expect("Parent category missing")
                    .id,
            ),
            None => None,
        };
        let suffix = Uuid::new_v4().simple().to_string();
        let name = format!("{label} {}", &suffix[..8]);
        repo.create(&CategoryRecord {
            name: name.clone(),
            slug: suffix,
            parent_id,
        })
        .await
        .expect("Failed to create category");
        name
    }

    /// Standard valid listing fields, overridable by `overrides`.
    pub fn listing_fields<'a>(
        category: &'a str,
        overrides: &[(&'a str, &'a str)],
    ) -> Vec<(&'a str, &'a str)> {
        let mut fields = vec![
            ("title", "Cordless drill"),
            ("description", "18V drill with two batteries"),
            ("place", "Shiraz"),
            ("categoryName", category),
            ("dayPrice", "15"),
            ("days", "2030-05-01,2030-05-02"),
        ];
        for &(key, value) in overrides {
            fields.retain(|&(k, _)| k != key);
            fields.push((key, value));
        }
        fields
    }

    /// Create a listing through the API and return its id.
    pub async fn create_listing(&self, owner: &TestUser, category: &str, title: &str) -> String {
        let fields = Self::listing_fields(category, &[("title", title)]);
        let response = self
            .multipart(
                "POST",
                "/api/advertisements",
                &fields,
                &[FilePart::image("front.png"), FilePart::image("side.png")],
                Some(&owner.token),
            )
            .await;
        assert_eq!(
            response.status,
            StatusCode::CREATED,
            "Create failed: {:?}",
            response.body
        );
        response.body["data"]["id"]
            .as_str()
            .expect("No id in create response")
            .to_string()
    }

    /// Create a listing and publish it as `admin`.
    pub async fn published_listing(
        &self,
        owner: &TestUser,
        admin: &TestUser,
        category: &str,
        title: &str,
    ) -> String {
        let id = self.create_listing(owner, category, title).await;
        let response = self
            .request(
                "POST",
                &format!("/api/admin/advertisements/{id}/publish"),
                None,
                Some(&admin.token),
            )
            .await;
        assert_eq!(response.status, StatusCode::NO_CONTENT);
        id
    }

    /// Make a JSON HTTP request to the test app
    pub async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        token: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("Failed to serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        let req = req
            .body(Body::from(body_str))
            .expect("Failed to build request");

        self.send(req).await
    }

    /// Send `body` verbatim as a JSON request, well-formed or not.
    pub async fn raw_json(
        &self,
        method: &str,
        path: &str,
        body: &'static str,
        token: Option<&str>,
    ) -> TestResponse {
        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        let req = req.body(Body::from(body)).expect("Failed to build request");

        self.send(req).await
    }

    /// Make a multipart/form-data request to the test app
    pub async fn multipart(
        &self,
        method: &str,
        path: &str,
        fields: &[(&str, &str)],
        files: &[FilePart<'_>],
        token: Option<&str>,
    ) -> TestResponse {
        let mut body: Vec<u8> = Vec::new();
        for (name, value) in fields {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n"
                )
                .as_bytes(),
            );
        }
        for file in files {
            body.extend_from_slice(
                format!(
                    "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\nContent-Type: {}\r\n\r\n",
                    file.field, file.file_name, file.content_type
                )
                .as_bytes(),
            );
            body.extend_from_slice(file.bytes);
            body.extend_from_slice(b"\r\n");
        }
        body.extend_from_slice(format!("--{BOUNDARY}--\r\n").as_bytes());

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(
                "Content-Type",
                format!("multipart/form-data; boundary={BOUNDARY}"),
            );
        if let Some(token) = token {
            req = req.header("Authorization", format!("Bearer {token}"));
        }
        let req = req.body(Body::from(body)).expect("Failed to build request");

        self.send(req).await
    }

    async fn send(&self, req: Request<Body>) -> TestResponse {
        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("Failed to send request");

        let status = response.status();
        let body_bytes = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("Failed to read body");
        let body: Value = serde_json::from_slice(&body_bytes).unwrap_or(Value::Null);

        TestResponse { status, body }
    }

    /// Does a blob with this key exist in the media root?
    pub fn blob_exists(&self, key: &str) -> bool {
        self.media_dir.path().join(key).exists()
    }
}

/// Response from a test request
#[derive(Debug)]
pub struct TestResponse {
    /// HTTP status code
    pub status: StatusCode,
    /// Parsed JSON body
    pub body: Value,
}

impl TestResponse {
    /// The `error.reason` of a failed request.
    pub fn reason(&self) -> Option<&str> {
        self.body["error"]["reason"].as_str()
    }
}

/// Storage key at the end of a media URL.
pub fn key_of(url: &Value) -> String {
    url.as_str()
        .and_then(|u| u.rsplit('/').next())
        .expect("media URL expected")
        .to_string()
}
