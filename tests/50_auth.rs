mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

#[tokio::test]
async fn login_rejects_missing_and_wrong_credentials() -> Result<()> {
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    // Make sure the admin exists before probing the failure paths
    let _ = common::admin_token(server).await?;
    let client = reqwest::Client::new();
    let url = format!("{}/api/auth/login", server.base_url);

    let res = client.post(&url).json(&json!({ "email": "" })).send().await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    // Unknown account and wrong password answer identically
    let res = client
        .post(&url)
        .json(&json!({ "email": "nobody@test.local", "password": "whatever-123" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let unknown_body = res.json::<Value>().await?;

    let res = client
        .post(&url)
        .json(&json!({ "email": common::ADMIN_EMAIL, "password": "wrong-password" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let wrong_body = res.json::<Value>().await?;

    assert_eq!(unknown_body["message"], wrong_body["message"]);
    assert_eq!(wrong_body["message"], "Invalid credentials");
    Ok(())
}

#[tokio::test]
async fn login_returns_token_and_sanitized_user() -> Result<()> {
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let _ = common::admin_token(server).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/auth/login", server.base_url))
        .json(&json!({
            "email": common::ADMIN_EMAIL,
            "password": common::ADMIN_PASSWORD
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    assert!(body["data"]["token"].as_str().unwrap().contains('.'));
    let user = &body["data"]["user"];
    assert_eq!(user["email"], common::ADMIN_EMAIL);
    assert_eq!(user["role"], "admin");
    assert!(user.get("password").is_none(), "hash must never leave the server");
    Ok(())
}

#[tokio::test]
async fn verify_resolves_token_back_to_user() -> Result<()> {
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let token = common::admin_token(server).await?;
    let client = reqwest::Client::new();
    let url = format!("{}/api/auth/verify", server.base_url);

    let res = client.get(&url).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["data"]["user"]["email"], common::ADMIN_EMAIL);

    // Same token via the auth-token cookie also works
    let res = client
        .get(&url)
        .header("cookie", format!("auth-token={}", token))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // No token or a garbage token: 401
    let res = client.get(&url).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let res = client.get(&url).bearer_auth("not.a.token").send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    Ok(())
}

#[tokio::test]
async fn setup_refuses_once_an_admin_exists() -> Result<()> {
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let _ = common::admin_token(server).await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/api/setup/admin", server.base_url))
        .json(&json!({
            "email": "second@test.local",
            "password": "another-password-1"
        }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);

    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "Admin user already exists");
    Ok(())
}

#[tokio::test]
async fn dashboard_requires_admin_and_reports_counts() -> Result<()> {
    if !common::db_available() {
        eprintln!("skipping: DATABASE_URL not set");
        return Ok(());
    }
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();
    let url = format!("{}/api/admin/dashboard", server.base_url);

    let res = client.get(&url).send().await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);

    let token = common::admin_token(server).await?;
    let res = client.get(&url).bearer_auth(&token).send().await?;
    assert_eq!(res.status(), StatusCode::OK);

    let body = res.json::<Value>().await?;
    let stats = &body["data"];
    for key in [
        "totalProperties",
        "totalBlogs",
        "totalInquiries",
        "newInquiries",
        "totalViews",
        "monthlyRevenue",
    ] {
        assert!(
            stats[key].as_i64().is_some(),
            "{} missing from dashboard payload",
            key
        );
    }
    Ok(())
}
