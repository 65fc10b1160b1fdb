#![allow(dead_code)]

use reqwest::Client;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Once};

static INIT: Once = Once::new();
static APP_COUNTER: AtomicUsize = AtomicUsize::new(0);

fn init_env() {
    INIT.call_once(|| {
        dotenv::dotenv().ok();
    });
}

pub struct TestApp {
    pub addr: String,
    pub db: DatabaseConnection,
    pub client: Client,
    pub upload_dir: PathBuf,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }
}

/// Boot the full router against a throwaway sqlite database on an
/// ephemeral port. Every call gets its own database and upload directory.
pub async fn spawn_app() -> TestApp {
    init_env();

    let run = APP_COUNTER.fetch_add(1, Ordering::SeqCst);
    let base = std::env::temp_dir().join(format!("reportes_test_{}_{}", std::process::id(), run));
    std::fs::create_dir_all(&base).expect("Failed to create test directory");

    let db_path = base.join("reportes.db");
    let upload_dir = base.join("images");

    let database_url = format!("sqlite://{}?mode=rwc", db_path.display());
    let db = sea_orm::Database::connect(&database_url)
        .await
        .expect("Failed to connect to test database");

    reportes::migration::Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");

    let upload_config = reportes::services::upload::UploadConfig {
        upload_dir: upload_dir.display().to_string(),
    };
    let clock: reportes::utils::SharedClock = Arc::new(reportes::utils::SystemClock);

    let app = axum::Router::new()
        .merge(reportes::routes::create_routes())
        .nest_service(
            "/static/images",
            tower_http::services::ServeDir::new(&upload_dir),
        )
        .layer(axum::extract::Extension(db.clone()))
        .layer(axum::extract::Extension(upload_config))
        .layer(axum::extract::Extension(clock));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        addr: format!("http://{}", addr),
        db,
        client: Client::new(),
        upload_dir,
    }
}

/// A complete, valid creation payload.
pub fn reporte_json(tipo: &str) -> serde_json::Value {
    serde_json::json!({
        "tipo": tipo,
        "nombre": "Juan",
        "descripcion": "Hueco grande",
        "lat": 4.65,
        "lng": -74.05,
        "entidad": "IDU"
    })
}

/// POST a JSON report and return the created id.
pub async fn crear_reporte(app: &TestApp, body: &serde_json::Value) -> i64 {
    let resp = app
        .client
        .post(app.url("/reporte"))
        .json(body)
        .send()
        .await
        .expect("Failed to send create request");

    let status = resp.status();
    let body: serde_json::Value = resp.json().await.expect("Failed to parse create response");
    assert_eq!(status, 201, "create failed: {}", body);

    body["data"]["id"].as_i64().expect("created id")
}

/// GET /api/reportes as a JSON array.
pub async fn listar_reportes(app: &TestApp) -> Vec<serde_json::Value> {
    let resp = app
        .client
        .get(app.url("/api/reportes"))
        .send()
        .await
        .expect("Failed to send list request");
    assert_eq!(resp.status(), 200);

    let body: serde_json::Value = resp.json().await.expect("Failed to parse list response");
    body.as_array().expect("list response is an array").clone()
}
