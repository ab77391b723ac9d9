use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use migration::MigratorTrait;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use server::routes::{self, users};
use service::user::{repo::seaorm::SeaOrmUserRepository, UserService};

fn cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

struct TestApp {
    base_url: String,
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Ensure models prefer env over config file
    std::env::set_var("CONFIG_PATH", "/nonexistent-config-for-tests.toml");

    // Use DATABASE_URL from environment; if not present, skip tests gracefully
    if std::env::var("DATABASE_URL").is_err() {
        eprintln!("DATABASE_URL missing; skip e2e tests. Provide .env.test or env var.");
        return Err(anyhow::anyhow!("missing DATABASE_URL"));
    }

    // Connect DB and run migrations
    let db = models::db::connect().await?;
    if let Err(e) = migration::Migrator::up(&db, None).await {
        eprintln!("migrations notice: {}", e);
    }

    let state = users::ServerState {
        users: Arc::new(UserService::new(Arc::new(SeaOrmUserRepository { db }))),
    };

    let app: Router = routes::build_router(state, cors());
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await {
            eprintln!("server error: {}", e);
        }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client().get(format!("{}/health", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_user_lifecycle() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let c = client();

    // unique marker so runs against a shared database do not collide
    let email = format!("ana_{}@x.com", Uuid::new_v4());

    // Create
    let res = c
        .post(format!("{}/user", app.base_url))
        .json(&json!({"name": "Ana", "lastname": "Diaz", "email": email}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let created = res.json::<serde_json::Value>().await?;
    let id = created["id"].as_i64().expect("assigned id");
    assert_eq!(created["name"], "Ana");
    assert_eq!(created["lastname"], "Diaz");
    assert_eq!(created["email"], email.as_str());

    // Read back
    let res = c.get(format!("{}/user/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let fetched = res.json::<serde_json::Value>().await?;
    assert_eq!(fetched, created);

    // Listed
    let res = c.get(format!("{}/user", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let listed = res.json::<Vec<serde_json::Value>>().await?;
    assert!(listed.iter().any(|u| u["id"].as_i64() == Some(id)));

    // Update overwrites the three fields; unset ones become null
    let res = c
        .put(format!("{}/user/{}", app.base_url, id))
        .json(&json!({"name": "Ana María"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["id"].as_i64(), Some(id));
    assert_eq!(updated["name"], "Ana María");
    assert!(updated["lastname"].is_null());
    assert!(updated["email"].is_null());

    // Delete renders a message, not an error code
    let res = c.delete(format!("{}/user/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, format!("User with ID {} was deleted", id));

    // Second delete reports not found, still with success framing
    let res = c.delete(format!("{}/user/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, format!("User with ID {} was not found", id));

    // Reads now surface a structured 404
    let res = c.get(format!("{}/user/{}", app.base_url, id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["error"], "user not found");

    Ok(())
}

#[tokio::test]
async fn e2e_update_unknown_user_is_404() -> anyhow::Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() {
        return Ok(());
    }
    let app = match start_server().await {
        Ok(a) => a,
        Err(_) => return Ok(()),
    };
    let res = client()
        .put(format!("{}/user/{}", app.base_url, i64::MAX))
        .json(&json!({"name": "nobody"}))
        .send()
        .await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    Ok(())
}
