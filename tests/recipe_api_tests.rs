// Copyright (c) 2025 - Cowboy AI, Inc.
//! HTTP tests for recipes, steps, tools and the admin routes

mod fixtures;

use axum::http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use serde_json::json;

use cookbook::domain::RecipeId;
use fixtures::*;

fn recipe_body(name: &str) -> serde_json::Value {
    json!({ "name": name, "imageUrl": "https://img.example.com/x.png", "prepTimeMinutes": 15 })
}

async fn create_recipe(app: &TestApp, caller: cookbook::domain::UserId, name: &str) -> RecipeId {
    let response = app
        .send(Method::POST, "/api/recipes", Some(caller), Some(recipe_body(name)))
        .await;
    assert_eq!(response.status, StatusCode::CREATED);
    response.body["id"]
        .as_str()
        .and_then(|id| id.parse().ok())
        .expect("created recipe id")
}

#[tokio::test]
async fn health_reports_ok() {
    let app = TestApp::new();

    let response = app.send(Method::GET, "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn create_recipe_returns_location_and_owner() {
    let app = TestApp::new();

    let response = app
        .send(Method::POST, "/api/recipes", Some(owner()), Some(recipe_body("Pancakes")))
        .await;

    assert_eq!(response.status, StatusCode::CREATED);
    let id = response.body["id"].as_str().unwrap().to_string();
    assert_eq!(response.location(), Some(format!("/api/recipes/{}", id).as_str()));

    let view = app
        .send(Method::GET, &format!("/api/recipes/{}", id), None, None)
        .await;
    assert_eq!(view.status, StatusCode::OK);
    assert_eq!(view.body["ownerId"], OWNER_ID);
    assert_eq!(view.body["prepTimeMinutes"], 15);
    assert_eq!(view.body["version"], 1);
}

#[tokio::test]
async fn create_recipe_requires_identity() {
    let app = TestApp::new();

    let response = app
        .send(Method::POST, "/api/recipes", None, Some(recipe_body("Pancakes")))
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"]["type"], "unauthenticated");
}

#[tokio::test]
async fn create_recipe_rejects_zero_prep_time() {
    let app = TestApp::new();

    let response = app
        .send(
            Method::POST,
            "/api/recipes",
            Some(owner()),
            Some(json!({ "name": "Soup", "imageUrl": "Url", "prepTimeMinutes": 0 })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn get_unknown_recipe_returns_not_found() {
    let app = TestApp::new();

    let response = app
        .send(Method::GET, &format!("/api/recipes/{}", RecipeId::new()), None, None)
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn malformed_recipe_id_returns_bad_request() {
    let app = TestApp::new();

    let response = app
        .send(Method::GET, "/api/recipes/not-a-uuid", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn update_recipe_by_stranger_is_unauthorized() {
    let app = TestApp::new();
    let id = create_recipe(&app, owner(), "Pancakes").await;

    let response = app
        .send(
            Method::PUT,
            &format!("/api/recipes/{}", id),
            Some(stranger()),
            Some(recipe_body("Stolen")),
        )
        .await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn update_recipe_changes_read_model() {
    let app = TestApp::new();
    let id = create_recipe(&app, owner(), "Pancakes").await;

    let response = app
        .send(
            Method::PUT,
            &format!("/api/recipes/{}", id),
            Some(owner()),
            Some(recipe_body("Crêpes")),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let view = app
        .send(Method::GET, &format!("/api/recipes/{}", id), None, None)
        .await;
    assert_eq!(view.body["name"], "Crêpes");
    assert_eq!(view.body["version"], 2);
}

#[tokio::test]
async fn delete_recipe_twice_returns_not_found() {
    let app = TestApp::new();
    let id = create_recipe(&app, owner(), "Pancakes").await;
    let uri = format!("/api/recipes/{}", id);

    let first = app.send(Method::DELETE, &uri, Some(owner()), None).await;
    let second = app.send(Method::DELETE, &uri, Some(owner()), None).await;
    let view = app.send(Method::GET, &uri, None, None).await;

    assert_eq!(first.status, StatusCode::NO_CONTENT);
    assert_eq!(second.status, StatusCode::NOT_FOUND);
    assert_eq!(view.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_recipes_filters_by_owner_and_search() {
    let app = TestApp::new();
    create_recipe(&app, owner(), "Pancakes").await;
    create_recipe(&app, owner(), "Pea Soup").await;
    create_recipe(&app, stranger(), "Pancake Stack").await;

    let mine = app
        .send(Method::GET, &format!("/api/recipes?owner={}", OWNER_ID), None, None)
        .await;
    let pancakes = app
        .send(Method::GET, "/api/recipes?search=pancake", None, None)
        .await;

    assert_eq!(mine.body.as_array().unwrap().len(), 2);
    let names: Vec<_> = pancakes
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Pancake Stack", "Pancakes"]);
}

#[tokio::test]
async fn list_recipes_rejects_malformed_owner() {
    let app = TestApp::new();

    let response = app
        .send(Method::GET, "/api/recipes?owner=nobody", None, None)
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn steps_are_numbered_and_renumbered() {
    let app = TestApp::new();
    let id = create_recipe(&app, owner(), "Pancakes").await;
    let steps_uri = format!("/api/recipes/{}/steps", id);

    for description in ["Mix", "Rest", "Fry"] {
        let response = app
            .send(
                Method::POST,
                &steps_uri,
                Some(owner()),
                Some(json!({ "description": description })),
            )
            .await;
        assert_eq!(response.status, StatusCode::CREATED);
    }

    let removed = app
        .send(Method::DELETE, &format!("{}/1", steps_uri), Some(owner()), None)
        .await;
    assert_eq!(removed.status, StatusCode::NO_CONTENT);

    let updated = app
        .send(
            Method::PUT,
            &format!("{}/2", steps_uri),
            Some(owner()),
            Some(json!({ "description": "Fry both sides" })),
        )
        .await;
    assert_eq!(updated.status, StatusCode::OK);

    let steps = app.send(Method::GET, &steps_uri, None, None).await;
    assert_eq!(
        steps.body,
        json!([
            { "number": 1, "description": "Rest" },
            { "number": 2, "description": "Fry both sides" },
        ])
    );
}

#[tokio::test]
async fn add_step_returns_location() {
    let app = TestApp::new();
    let id = create_recipe(&app, owner(), "Pancakes").await;

    let response = app
        .send(
            Method::POST,
            &format!("/api/recipes/{}/steps", id),
            Some(owner()),
            Some(json!({ "description": "Mix" })),
        )
        .await;

    assert_eq!(
        response.location(),
        Some(format!("/api/recipes/{}/steps/1", id).as_str())
    );
}

#[tokio::test]
async fn missing_step_returns_not_found() {
    let app = TestApp::new();
    let id = create_recipe(&app, owner(), "Pancakes").await;

    let response = app
        .send(
            Method::PUT,
            &format!("/api/recipes/{}/steps/4", id),
            Some(owner()),
            Some(json!({ "description": "Plate" })),
        )
        .await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_step_description_returns_bad_request() {
    let app = TestApp::new();
    let id = create_recipe(&app, owner(), "Pancakes").await;

    let response = app
        .send(
            Method::POST,
            &format!("/api/recipes/{}/steps", id),
            Some(owner()),
            Some(json!({ "description": "   " })),
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn tools_can_be_added_and_removed() {
    let app = TestApp::new();
    let id = create_recipe(&app, owner(), "Pancakes").await;
    let tools_uri = format!("/api/recipes/{}/tools", id);

    let added = app
        .send(Method::POST, &tools_uri, Some(owner()), Some(json!({ "name": "Frying pan" })))
        .await;
    let duplicate = app
        .send(Method::POST, &tools_uri, Some(owner()), Some(json!({ "name": "frying PAN" })))
        .await;

    assert_eq!(added.status, StatusCode::CREATED);
    assert_eq!(
        added.location(),
        Some(format!("/api/recipes/{}/tools/Frying%20pan", id).as_str())
    );
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let removed = app
        .send(
            Method::DELETE,
            &format!("{}/frying%20pan", tools_uri),
            Some(owner()),
            None,
        )
        .await;
    let missing = app
        .send(
            Method::DELETE,
            &format!("{}/frying%20pan", tools_uri),
            Some(owner()),
            None,
        )
        .await;

    assert_eq!(removed.status, StatusCode::NO_CONTENT);
    assert_eq!(missing.status, StatusCode::NOT_FOUND);
    assert_eq!(
        app.send(Method::GET, &tools_uri, None, None).await.body,
        json!([])
    );
}

#[tokio::test]
async fn total_calories_follow_ingredients() {
    let app = TestApp::new();
    let id = create_recipe(&app, owner(), "Pancakes").await;
    let ingredients_uri = format!("/api/recipes/{}/ingredients", id);

    app.send(
        Method::POST,
        &ingredients_uri,
        Some(owner()),
        Some(ingredient_body("Flour", 200.0, 364.0)),
    )
    .await;
    app.send(
        Method::POST,
        &ingredients_uri,
        Some(owner()),
        Some(ingredient_body("Milk", 300.0, 64.0)),
    )
    .await;

    let view = app
        .send(Method::GET, &format!("/api/recipes/{}", id), None, None)
        .await;

    assert_eq!(view.body["totalCalories"], 920.0);
}

#[tokio::test]
async fn rebuild_requires_admin_role() {
    let app = TestApp::new();

    let denied = app
        .send(Method::POST, "/api/admin/read-models/rebuild", Some(owner()), None)
        .await;

    assert_eq!(denied.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn rebuild_restores_read_models_from_write_store() {
    let app = TestApp::new();
    app.repository_only(recipe_with_ingredients(owner(), &["Salt"])).await;

    let response = app
        .send_with_roles(
            Method::POST,
            "/api/admin/read-models/rebuild",
            Some(admin()),
            Some("admin"),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body, json!({ "projected": 1 }));

    let list = app.send(Method::GET, "/api/recipes", None, None).await;
    assert_eq!(list.body.as_array().unwrap().len(), 1);
}
