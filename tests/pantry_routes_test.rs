// ABOUTME: Integration tests for the pantry matching endpoint
// ABOUTME: Covers bucket partitioning, staples, percentages, and the food equipment and tag gates
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;
mod helpers;

use axum::http::StatusCode;
use axum::Router;
use common::{create_fixture_router, ids};
use helpers::axum_test::AxumTestRequest;
use serde_json::{json, Value};

async fn pantry_match(app: Router, body: &Value) -> Value {
    AxumTestRequest::post("/api/pantry/match")
        .json(body)
        .send(app)
        .await
        .assert_status(StatusCode::OK)
        .json()
}

fn bucket_ids(result: &Value, bucket: &str) -> Vec<i64> {
    result[bucket]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["id"].as_i64().unwrap())
        .collect()
}

#[tokio::test]
async fn test_single_ingredient_needs_shopping_without_staples() {
    let app = create_fixture_router().await.unwrap();

    let result = pantry_match(
        app,
        &json!({"kind": "beverage", "session": {"ingredients": ["Rhum blanc"]}}),
    )
    .await;

    assert!(bucket_ids(&result, "available").is_empty());
    assert_eq!(bucket_ids(&result, "needToBuy"), vec![ids::MOJITO]);

    let mojito = &result["needToBuy"][0];
    assert_eq!(mojito["title"], "Mojito");
    assert_eq!(mojito["matchPercentage"], 20);
    assert_eq!(
        mojito["missingIngredients"],
        json!(["jus de citron vert", "menthe"])
    );
}

#[tokio::test]
async fn test_full_pantry_makes_recipe_available() {
    let app = create_fixture_router().await.unwrap();

    let result = pantry_match(
        app,
        &json!({
            "kind": "beverage",
            "session": {"ingredients": ["ginger beer", "Jus de citron vert.", "MENTHE"]}
        }),
    )
    .await;

    assert_eq!(bucket_ids(&result, "available"), vec![ids::VIRGIN_MULE]);
    assert_eq!(result["available"][0]["matchPercentage"], 100);
    assert_eq!(result["available"][0]["missingIngredients"], json!([]));

    // Shares two ingredients with the mule, nothing else in the pantry
    assert_eq!(bucket_ids(&result, "needToBuy"), vec![ids::MOJITO]);
    assert_eq!(result["needToBuy"][0]["matchPercentage"], 40);
}

#[tokio::test]
async fn test_empty_pantry_gives_empty_buckets() {
    let app = create_fixture_router().await.unwrap();

    let result = pantry_match(app, &json!({"kind": "beverage"})).await;

    assert_eq!(result, json!({"available": [], "needToBuy": []}));
}

#[tokio::test]
async fn test_unvalidated_recipes_are_not_matched() {
    let app = create_fixture_router().await.unwrap();

    let result = pantry_match(
        app,
        &json!({"kind": "beverage", "session": {"ingredients": ["Gin"]}}),
    )
    .await;

    assert!(bucket_ids(&result, "available").is_empty());
    assert_eq!(bucket_ids(&result, "needToBuy"), vec![ids::NEGRONI]);
}

#[tokio::test]
async fn test_food_selected_tags_must_all_be_present() {
    let app = create_fixture_router().await.unwrap();

    let result = pantry_match(
        app.clone(),
        &json!({
            "kind": "food",
            "session": {"ingredients": ["Parmesan", "Citrons"], "selectedTags": ["umami"]}
        }),
    )
    .await;
    assert_eq!(bucket_ids(&result, "needToBuy"), vec![ids::SALADE_CESAR]);
    assert_eq!(result["needToBuy"][0]["matchPercentage"], 33);

    let result = pantry_match(
        app,
        &json!({
            "kind": "food",
            "session": {"ingredients": ["Parmesan", "Citrons"], "selectedTags": ["umami", "sucré"]}
        }),
    )
    .await;
    assert_eq!(result, json!({"available": [], "needToBuy": []}));
}

#[tokio::test]
async fn test_food_requires_owned_equipment() {
    let app = create_fixture_router().await.unwrap();

    AxumTestRequest::post("/api/recipes")
        .json(&json!({
            "kind": "food",
            "type": "plat",
            "title": "Gratin dauphinois",
            "ingredients": ["Pommes de terre", "Crème", "Ail"],
            "tags": ["gratiné"],
            "equipment": ["Four"],
            "validated": true
        }))
        .send(app.clone())
        .await
        .assert_status(StatusCode::CREATED);

    let without_oven = pantry_match(
        app.clone(),
        &json!({"kind": "food", "session": {"ingredients": ["Crème"]}}),
    )
    .await;
    assert!(without_oven["needToBuy"].as_array().unwrap().is_empty());

    let with_oven = pantry_match(
        app,
        &json!({"kind": "food", "session": {"ingredients": ["Crème"], "equipment": [" four "]}}),
    )
    .await;
    let gratin = &with_oven["needToBuy"][0];
    assert_eq!(gratin["title"], "Gratin dauphinois");
    assert_eq!(gratin["matchPercentage"], 33);
}

#[tokio::test]
async fn test_buckets_are_exclusive_and_sorted() {
    let app = create_fixture_router().await.unwrap();

    let result = pantry_match(
        app,
        &json!({
            "kind": "beverage",
            "session": {"ingredients": ["Menthe", "Jus de citron vert", "Gin"]}
        }),
    )
    .await;

    let available = bucket_ids(&result, "available");
    let need_to_buy = bucket_ids(&result, "needToBuy");
    assert!(available.iter().all(|id| !need_to_buy.contains(id)));

    let percentages: Vec<u64> = result["needToBuy"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["matchPercentage"].as_u64().unwrap())
        .collect();
    assert!(percentages.iter().all(|p| *p > 0 && *p <= 100));
    assert!(percentages.windows(2).all(|w| w[0] >= w[1]));
    // Virgin Mule 67, Mojito 40, Negroni 33
    assert_eq!(need_to_buy, vec![ids::VIRGIN_MULE, ids::MOJITO, ids::NEGRONI]);
}

#[tokio::test]
async fn test_invalid_pantry_request_is_rejected() {
    let app = create_fixture_router().await.unwrap();

    let response = AxumTestRequest::post("/api/pantry/match")
        .json(&json!({"kind": "snack", "session": {}}))
        .send(app.clone())
        .await;
    assert_eq!(response.status(), 400);

    let too_many: Vec<String> = (0..=200).map(|i| format!("ingrédient {i}")).collect();
    let response = AxumTestRequest::post("/api/pantry/match")
        .json(&json!({"kind": "beverage", "session": {"ingredients": too_many}}))
        .send(app)
        .await;
    assert_eq!(response.status(), 400);
    let error: Value = response.json();
    assert_eq!(error["error"]["code"], "VALUE_OUT_OF_RANGE");
}
