mod common;

use catalog::db;
use serde_json::{json, Value};

#[tokio::test]
async fn registration_verification_login_flow() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let client = reqwest::Client::new();
    let email = format!("flow-{}@example.com", uuid::Uuid::new_v4());

    let response = client
        .post(format!("{}/users/register", app.address))
        .json(&json!({"name": "Flow", "email": email, "password": "secret1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);

    // registering the same email twice is rejected
    let response = client
        .post(format!("{}/users/register", app.address))
        .json(&json!({"name": "Flow", "email": email, "password": "secret1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    // an unverified account cannot log in
    let response = client
        .post(format!("{}/users/login", app.address))
        .json(&json!({"email": email, "password": "secret1"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let user = db::user::fetch_by_email(&app.db_pool, &email)
        .await
        .unwrap()
        .expect("registered user must exist");
    let token = user.verification_token.expect("token must be set");

    let response = client
        .get(format!("{}/users/verify/{}", app.address, token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let body: Value = client
        .post(format!("{}/users/login", app.address))
        .json(&json!({"email": email, "password": "secret1"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert!(body["item"]["token"].as_str().is_some());

    // a wrong password still fails after verification
    let response = client
        .post(format!("{}/users/login", app.address))
        .json(&json!({"email": email, "password": "wrong-pass"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    // the verification token is single-use
    let response = client
        .get(format!("{}/users/verify/{}", app.address, token))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn sole_admin_cannot_be_demoted_or_deleted() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let client = reqwest::Client::new();
    let (admin, admin_token) = common::seed_user(&app, true).await;

    let response = client
        .put(format!("{}/users/{}", app.address, admin.id))
        .bearer_auth(&admin_token)
        .json(&json!({"isAdmin": false}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    let response = client
        .delete(format!("{}/users/{}", app.address, admin.id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    // with a second admin around, the first one may step down
    let (_other_admin, _other_token) = common::seed_user(&app, true).await;
    let response = client
        .put(format!("{}/users/{}", app.address, admin.id))
        .bearer_auth(&admin_token)
        .json(&json!({"isAdmin": false}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}

#[tokio::test]
async fn user_listing_is_admin_gated_and_hides_secrets() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let client = reqwest::Client::new();
    let (_user, user_token) = common::seed_user(&app, false).await;
    let (_admin, admin_token) = common::seed_user(&app, true).await;

    let response = client
        .get(format!("{}/users", app.address))
        .bearer_auth(&user_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let body: Value = client
        .get(format!("{}/users", app.address))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let users = body["list"].as_array().unwrap();
    assert!(users.len() >= 2);
    for user in users {
        assert!(user.get("passwordHash").is_none());
        assert!(user.get("verificationToken").is_none());
    }
}
