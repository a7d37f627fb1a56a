mod common;

use serde_json::{json, Value};

#[tokio::test]
async fn category_crud_requires_admin() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let client = reqwest::Client::new();

    // anonymous create is rejected
    let response = client
        .post(format!("{}/categories", app.address))
        .json(&json!({"name": "Laptops"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    // a plain user is rejected as well
    let (_user, user_token) = common::seed_user(&app, false).await;
    let response = client
        .post(format!("{}/categories", app.address))
        .bearer_auth(&user_token)
        .json(&json!({"name": "Laptops"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 401);

    let (_admin, admin_token) = common::seed_user(&app, true).await;
    let response = client
        .post(format!("{}/categories", app.address))
        .bearer_auth(&admin_token)
        .json(&json!({"name": "Laptops"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 201);

    // duplicate name is a validation error
    let response = client
        .post(format!("{}/categories", app.address))
        .bearer_auth(&admin_token)
        .json(&json!({"name": "Laptops"}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    // the category shows up in the public listing
    let body: Value = client
        .get(format!("{}/categories", app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let names: Vec<&str> = body["list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|category| category["name"].as_str().unwrap())
        .collect();
    assert!(names.contains(&"Laptops"));
}

#[tokio::test]
async fn category_with_products_cannot_be_deleted() {
    let app = match common::spawn_app().await {
        Some(app) => app,
        None => return,
    };
    let client = reqwest::Client::new();
    let (_admin, admin_token) = common::seed_user(&app, true).await;

    let body: Value = client
        .post(format!("{}/categories", app.address))
        .bearer_auth(&admin_token)
        .json(&json!({"name": "Tablets"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let category_id = body["item"]["id"].as_i64().unwrap();

    let body: Value = client
        .post(format!("{}/products", app.address))
        .bearer_auth(&admin_token)
        .json(&json!({"name": "Slab 11", "price": 499.0, "category": category_id}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let product_id = body["item"]["id"].as_i64().unwrap();

    // referenced category is protected
    let response = client
        .delete(format!("{}/categories/{}", app.address, category_id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 400);

    // once the product is gone the category can be removed
    let response = client
        .delete(format!("{}/products/{}", app.address, product_id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);

    let response = client
        .delete(format!("{}/categories/{}", app.address, category_id))
        .bearer_auth(&admin_token)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
}
