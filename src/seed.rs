// ABOUTME: Demo recipe catalogue loaded into an empty database
// ABOUTME: A handful of dishes and drinks covering every pairing rule, with ABV profiles
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 ChooseMyCocktail

//! Demo catalogue
//!
//! Used by the `seed-demo-recipes` binary and by the server when
//! `SEED_DEMO_DATA` is set. Seeding only happens on an empty catalogue so it
//! is safe to run at every start.

use crate::database::{CreateRecipeRequest, Database};
use crate::errors::AppResult;
use cocktail_core::models::{ItemProfile, RecipeKind, Step};
use cocktail_intelligence::{Ingredient, RecipeFilter};
use tracing::info;

/// One demo entry: the recipe and its ABV, when known
pub struct DemoRecipe {
    /// Recipe payload
    pub request: CreateRecipeRequest,
    /// Alcohol by volume recorded as the item profile
    pub abv: Option<f64>,
}

fn recipe(
    kind: RecipeKind,
    category: &str,
    title: &str,
    ingredients: &[&str],
    tags: &[&str],
    equipment: &[&str],
) -> CreateRecipeRequest {
    CreateRecipeRequest {
        kind,
        category: category.to_owned(),
        title: title.to_owned(),
        description: String::new(),
        ingredients: ingredients.iter().map(|name| Ingredient::named(*name)).collect(),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        equipment: equipment.iter().map(|e| (*e).to_owned()).collect(),
        steps: Vec::new(),
        validated: true,
    }
}

fn step(title: &str, description: &str) -> Step {
    Step {
        title: title.to_owned(),
        description: description.to_owned(),
    }
}

fn food(title: &str, category: &str, ingredients: &[&str], tags: &[&str], equipment: &[&str]) -> DemoRecipe {
    DemoRecipe {
        request: recipe(RecipeKind::Food, category, title, ingredients, tags, equipment),
        abv: None,
    }
}

fn drink(title: &str, ingredients: &[&str], tags: &[&str], abv: f64) -> DemoRecipe {
    DemoRecipe {
        request: recipe(RecipeKind::Beverage, "cocktail", title, ingredients, tags, &[]),
        abv: Some(abv),
    }
}

/// The demo catalogue, foods first, in insertion order
#[must_use]
pub fn demo_catalogue() -> Vec<DemoRecipe> {
    let mut mojito = drink(
        "Mojito",
        &["Rhum blanc", "Jus de citron vert", "Menthe", "Sucre de canne", "Eau gazeuse"],
        &["citrusy", "herbal", "sparkling", "alcoholic"],
        10.0,
    );
    mojito.request.description = "Rhum, citron vert et menthe fraîche, allongé d'eau gazeuse".to_owned();
    mojito.request.steps = vec![
        step("Piler", "Piler la menthe avec le sucre et le jus de citron vert"),
        step("Servir", "Ajouter le rhum et la glace pilée, compléter d'eau gazeuse"),
    ];

    let mut draft = drink("Cocktail du jour", &["Jus de fraise", "Prosecco"], &["fruity"], 8.0);
    draft.request.validated = false;

    vec![
        food(
            "Salade César",
            "entrée",
            &["Laitue romaine", "Parmesan", "Croûtons", "Poulet", "Sauce César"],
            &["salé", "umami"],
            &[],
        ),
        food(
            "Curry thaï épicé",
            "plat",
            &["Poulet", "Lait de coco", "Pâte de curry rouge", "Riz"],
            &["spicy", "umami"],
            &["Wok"],
        ),
        food(
            "Tarte au citron",
            "dessert",
            &["Pâte sablée", "Citrons", "Sucre", "Œufs", "Beurre"],
            &["sucré"],
            &["Four"],
        ),
        food(
            "Plateau d'huîtres",
            "entrée",
            &["Huîtres", "Citron", "Échalote", "Vinaigre de vin rouge"],
            &["seafood", "salé"],
            &[],
        ),
        food(
            "Côte de bœuf fumée",
            "plat",
            &["Côte de bœuf", "Sel", "Poivre"],
            &["smoky", "fatty"],
            &["Barbecue"],
        ),
        mojito,
        drink(
            "Negroni",
            &["Gin", "Campari", "Vermouth rouge"],
            &["bitter", "herbal", "alcoholic", "high_abv"],
            24.0,
        ),
        drink(
            "Virgin Mule",
            &["Ginger beer", "Jus de citron vert", "Menthe"],
            &["citrusy", "sparkling", "low_abv"],
            0.0,
        ),
        drink(
            "Piña Colada",
            &["Rhum blanc", "Jus d'ananas", "Crème de coco"],
            &["sweet", "creamy", "fruity", "alcoholic"],
            13.0,
        ),
        drink(
            "Old Fashioned",
            &["Bourbon", "Angostura", "Sucre", "Zeste d'orange"],
            &["smoky", "bitter", "alcoholic", "high_abv"],
            32.0,
        ),
        drink(
            "Spritz",
            &["Apérol", "Prosecco", "Eau gazeuse"],
            &["bitter", "sparkling", "citrusy", "alcoholic"],
            11.0,
        ),
        drink(
            "Limonade maison",
            &["Citrons", "Sucre", "Eau gazeuse"],
            &["sweet", "citrusy", "sparkling"],
            0.0,
        ),
        draft,
    ]
}

/// Load the demo catalogue when the database holds no recipe
///
/// Returns the number of recipes inserted, zero when the catalogue was not empty.
///
/// # Errors
///
/// Returns a database error if an insert fails
pub async fn seed_if_empty(database: &Database) -> AppResult<usize> {
    let existing = database.count_recipes(RecipeFilter::default()).await?;
    if existing > 0 {
        info!(existing, "Catalogue already populated, skipping demo seed");
        return Ok(0);
    }

    let catalogue = demo_catalogue();
    for entry in &catalogue {
        let recipe = database.create_recipe(&entry.request).await?;
        if let Some(abv) = entry.abv {
            database
                .upsert_item_profile(&ItemProfile {
                    item_id: recipe.id,
                    abv: Some(abv),
                    ..ItemProfile::default()
                })
                .await?;
        }
    }

    info!(inserted = catalogue.len(), "Demo catalogue seeded");
    Ok(catalogue.len())
}
