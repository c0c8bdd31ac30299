// ABOUTME: Integration tests for the SQLite recipe, profile, and feedback storage
// ABOUTME: Covers denormalized reads, filters, profile upserts, feedback, seeding, and on-disk files
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]
#![allow(missing_docs)]

mod common;

use choose_my_cocktail::database::Database;
use choose_my_cocktail::errors::ErrorCode;
use choose_my_cocktail::seed;
use cocktail_core::models::{FeedbackAction, ItemProfile, NewPairingFeedback, RecipeKind, Step};
use cocktail_intelligence::{Ingredient, RecipeFilter, RecipeRepository};
use common::{create_test_database, ids, insert_fixture_catalogue, new_recipe};
use serde_json::json;

fn feedback(action: FeedbackAction, rating: Option<u8>) -> NewPairingFeedback {
    NewPairingFeedback {
        food_id: ids::SALADE_CESAR,
        beverage_id: ids::NEGRONI,
        action,
        rating,
        reason_tag: None,
        session_id: Some("session-1".into()),
        meta: None,
    }
}

#[tokio::test]
async fn test_create_recipe_round_trips_children_in_order() {
    let database = create_test_database().await.unwrap();

    let mut request = new_recipe(
        RecipeKind::Beverage,
        "  Mojito ",
        &["Rhum blanc", "Citrons verts", "Menthe (fraîche)"],
        &["Citrusy", " HERBAL "],
        true,
    );
    request.equipment = vec!["Shaker".into(), "Pilon".into()];
    request.steps = vec![
        Step {
            title: "Piler".into(),
            description: "Piler la menthe".into(),
        },
        Step {
            title: "Servir".into(),
            description: "Allonger d'eau gazeuse".into(),
        },
    ];

    let created = database.create_recipe(&request).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.title, "Mojito");
    assert!(created.validated);

    let ingredient_keys: Vec<&str> = created
        .ingredients
        .iter()
        .map(|i| i.normalized_name.as_str())
        .collect();
    assert_eq!(ingredient_keys, vec!["rhum blanc", "citron vert", "menthe"]);
    assert_eq!(created.ingredients[1].display_name, "Citrons verts");
    assert_eq!(created.tags, vec!["citrusy", "herbal"]);
    assert_eq!(created.equipment, vec!["Shaker", "Pilon"]);
    assert_eq!(created.steps[1].title, "Servir");

    let fetched = database.get_recipe(created.id).await.unwrap().unwrap();
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn test_create_recipe_rejects_blank_title() {
    let database = create_test_database().await.unwrap();
    let request = new_recipe(RecipeKind::Food, "   ", &["Riz"], &[], true);

    let error = database.create_recipe(&request).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);
    assert_eq!(database.count_recipes(RecipeFilter::default()).await.unwrap(), 0);
}

#[tokio::test]
async fn test_create_recipe_rejects_unusable_ingredient_lists() {
    let database = create_test_database().await.unwrap();

    let unnamed = new_recipe(
        RecipeKind::Beverage,
        "Daiquiri",
        &["Rhum blanc", "(facultatif)"],
        &[],
        true,
    );
    let error = database.create_recipe(&unnamed).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    let names: Vec<String> = (0..=200).map(|n| format!("Épice {n}")).collect();
    let mut oversized = new_recipe(RecipeKind::Food, "Curry infini", &[], &[], true);
    oversized.ingredients = names.iter().map(|n| Ingredient::named(n.as_str())).collect();
    let error = database.create_recipe(&oversized).await.unwrap_err();
    assert_eq!(error.code, ErrorCode::InvalidInput);

    oversized.ingredients.pop();
    let created = database.create_recipe(&oversized).await.unwrap();
    assert_eq!(created.ingredients.len(), 200);
    assert_eq!(database.count_recipes(RecipeFilter::default()).await.unwrap(), 1);
}

#[tokio::test]
async fn test_list_and_count_apply_filters() {
    let database = create_test_database().await.unwrap();
    insert_fixture_catalogue(&database).await.unwrap();

    let all = database.list_recipes(RecipeFilter::default()).await.unwrap();
    assert_eq!(all.len(), 6);
    assert!(all.windows(2).all(|w| w[0].id < w[1].id));

    let beverages = database
        .list_recipes(RecipeFilter::validated_of_kind(RecipeKind::Beverage))
        .await
        .unwrap();
    let titles: Vec<&str> = beverages.iter().map(|r| r.title.as_str()).collect();
    assert_eq!(titles, vec!["Negroni", "Mojito", "Virgin Mule"]);
    assert_eq!(beverages[1].ingredients.len(), 5);

    let drafts = RecipeFilter {
        kind: None,
        validated: Some(false),
    };
    assert_eq!(database.count_recipes(drafts).await.unwrap(), 1);
    assert_eq!(
        database
            .count_recipes(RecipeFilter {
                kind: Some(RecipeKind::Food),
                validated: None,
            })
            .await
            .unwrap(),
        2
    );
}

#[tokio::test]
async fn test_unknown_recipe_is_none() {
    let database = create_test_database().await.unwrap();
    insert_fixture_catalogue(&database).await.unwrap();

    assert!(database.get_recipe(999).await.unwrap().is_none());
    assert!(database.get_recipe_by_id(999).await.unwrap().is_none());
}

#[tokio::test]
async fn test_item_profile_upsert_replaces_values() {
    let database = create_test_database().await.unwrap();
    insert_fixture_catalogue(&database).await.unwrap();

    assert_eq!(
        database.get_item_profile(ids::NEGRONI).await.unwrap().unwrap().abv,
        Some(24.0)
    );

    database
        .upsert_item_profile(&ItemProfile {
            item_id: ids::NEGRONI,
            abv: Some(22.5),
            bitterness: Some(8.0),
            ..ItemProfile::default()
        })
        .await
        .unwrap();

    let profile = database.get_item_profile(ids::NEGRONI).await.unwrap().unwrap();
    assert_eq!(profile.abv, Some(22.5));
    assert_eq!(profile.bitterness, Some(8.0));
    assert!(profile.sweetness.is_none());

    assert!(database
        .get_item_profile(ids::SALADE_CESAR)
        .await
        .unwrap()
        .is_none());
}

#[tokio::test]
async fn test_profile_for_unknown_item_is_not_found() {
    let database = create_test_database().await.unwrap();

    let error = database
        .upsert_item_profile(&ItemProfile {
            item_id: 42,
            abv: Some(40.0),
            ..ItemProfile::default()
        })
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ResourceNotFound);
    assert_eq!(error.resource_id.as_deref(), Some("42"));
}

#[tokio::test]
async fn test_feedback_is_appended_and_listed_per_food() {
    let database = create_test_database().await.unwrap();
    insert_fixture_catalogue(&database).await.unwrap();

    let first = database
        .record_feedback(&feedback(FeedbackAction::View, None))
        .await
        .unwrap();
    let mut favorite = feedback(FeedbackAction::Favorite, Some(5));
    favorite.reason_tag = Some("refreshing".into());
    favorite.meta = Some(json!({"screen": "pairings", "position": 1}));
    let second = database.record_feedback(&favorite).await.unwrap();
    assert!(second > first);

    let mut other_food = feedback(FeedbackAction::Reject, Some(1));
    other_food.food_id = ids::TARTE_AU_CITRON;
    database.record_feedback(&other_food).await.unwrap();

    let stored = database
        .list_feedback_for_food(ids::SALADE_CESAR)
        .await
        .unwrap();
    assert_eq!(stored.len(), 2);
    assert_eq!(stored[0].id, first);
    assert_eq!(stored[0].feedback.action, FeedbackAction::View);
    assert_eq!(stored[1].feedback, favorite);
}

#[tokio::test]
async fn test_feedback_rating_out_of_range_is_rejected() {
    let database = create_test_database().await.unwrap();

    let error = database
        .record_feedback(&feedback(FeedbackAction::Favorite, Some(0)))
        .await
        .unwrap_err();
    assert_eq!(error.code, ErrorCode::ValueOutOfRange);
    assert!(database.list_feedback_for_food(ids::SALADE_CESAR).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_seed_only_fills_an_empty_catalogue() {
    let database = create_test_database().await.unwrap();

    let inserted = seed::seed_if_empty(&database).await.unwrap();
    assert_eq!(inserted, seed::demo_catalogue().len());
    assert_eq!(seed::seed_if_empty(&database).await.unwrap(), 0);

    let total = database.count_recipes(RecipeFilter::default()).await.unwrap();
    assert_eq!(usize::try_from(total).unwrap(), inserted);

    let mojito = database
        .list_recipes(RecipeFilter::validated_of_kind(RecipeKind::Beverage))
        .await
        .unwrap()
        .into_iter()
        .find(|r| r.title == "Mojito")
        .unwrap();
    assert_eq!(mojito.steps.len(), 2);
    assert_eq!(
        database.get_item_profile(mojito.id).await.unwrap().unwrap().abv,
        Some(10.0)
    );
}

#[tokio::test]
async fn test_on_disk_database_persists_between_connections() {
    common::init_test_logging();
    let dir = tempfile::tempdir().unwrap();
    let url = format!("sqlite:{}", dir.path().join("cocktails.db").display());

    {
        let database = Database::new(&url).await.unwrap();
        insert_fixture_catalogue(&database).await.unwrap();
        database.pool().close().await;
    }

    let reopened = Database::new(&url).await.unwrap();
    assert_eq!(reopened.count_recipes(RecipeFilter::default()).await.unwrap(), 6);
    reopened.ping().await.unwrap();
}
