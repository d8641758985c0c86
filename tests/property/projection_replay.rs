// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests for the Read-Model Projection
//!
//! Random command sequences are run against a Recipe; the events it raises
//! are then folded into a read model in different ways:
//!
//! 1. **Consistency**: folding the history equals snapshotting the aggregate
//! 2. **Idempotency**: delivering every event twice changes nothing
//! 3. **Replay**: rebuilding the aggregate from its history reproduces it

use chrono::{DateTime, Utc};
use proptest::prelude::*;
use uuid::Uuid;

use cookbook::aggregate::Recipe;
use cookbook::domain::{ImageUrl, Ingredient, PrepTime, RecipeId, RecipeName, Step, Tool, UserId};
use cookbook::events::{DomainEvent, EventContext};
use cookbook::projection::{apply_to_read_model, RecipeReadModel, RecipeView};

const NAMES: &[&str] = &["Flour", "flour", "Milk", "Egg", "Salt", "Sugar"];

#[derive(Debug, Clone)]
enum Op {
    AddIngredient { name: usize, grams: u16 },
    UpdateIngredient { from: usize, to: usize, grams: u16 },
    RemoveIngredient { name: usize },
    AddStep { text: String },
    UpdateStep { number: usize, text: String },
    RemoveStep { number: usize },
    AddTool { name: usize },
    RemoveTool { name: usize },
    Rename { text: String },
}

fn op_strategy() -> impl Strategy<Value = Op> {
    let name = 0..NAMES.len();
    prop_oneof![
        (name.clone(), 1u16..1000).prop_map(|(name, grams)| Op::AddIngredient { name, grams }),
        (name.clone(), name.clone(), 1u16..1000)
            .prop_map(|(from, to, grams)| Op::UpdateIngredient { from, to, grams }),
        name.clone().prop_map(|name| Op::RemoveIngredient { name }),
        "[a-z]{1,12}".prop_map(|text| Op::AddStep { text }),
        (0usize..5, "[a-z]{1,12}").prop_map(|(number, text)| Op::UpdateStep { number, text }),
        (0usize..5).prop_map(|number| Op::RemoveStep { number }),
        name.clone().prop_map(|name| Op::AddTool { name }),
        name.prop_map(|name| Op::RemoveTool { name }),
        "[A-Za-z]{1,20}".prop_map(|text| Op::Rename { text }),
    ]
}

fn timestamp() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-01-19T12:00:00Z")
        .unwrap()
        .with_timezone(&Utc)
}

fn run(ops: &[Op]) -> (Recipe, Vec<DomainEvent>) {
    let owner = UserId::from_uuid(Uuid::from_u128(42));
    let ctx = EventContext::new(owner, timestamp(), Uuid::from_u128(7));
    let mut recipe = Recipe::create(
        RecipeId::from_uuid(Uuid::from_u128(1)),
        owner,
        RecipeName::new("Base").unwrap(),
        ImageUrl::new("Url").unwrap(),
        PrepTime::from_minutes(10).unwrap(),
        &ctx,
    );

    // Rejected commands raise nothing, which is part of what is tested
    for op in ops {
        let _ = match op {
            Op::AddIngredient { name, grams } => recipe.add_ingredient(
                Ingredient::new(NAMES[*name], f64::from(*grams), 50.0).unwrap(),
                &ctx,
            ),
            Op::UpdateIngredient { from, to, grams } => recipe.update_ingredient(
                NAMES[*from],
                Ingredient::new(NAMES[*to], f64::from(*grams), 80.0).unwrap(),
                &ctx,
            ),
            Op::RemoveIngredient { name } => recipe.remove_ingredient(NAMES[*name], &ctx),
            Op::AddStep { text } => recipe.add_step(Step::new(text).unwrap(), &ctx).map(|_| ()),
            Op::UpdateStep { number, text } => {
                recipe.update_step(*number, Step::new(text).unwrap(), &ctx)
            }
            Op::RemoveStep { number } => recipe.remove_step(*number, &ctx),
            Op::AddTool { name } => recipe.add_tool(Tool::new(NAMES[*name]).unwrap(), &ctx),
            Op::RemoveTool { name } => recipe.remove_tool(NAMES[*name], &ctx),
            Op::Rename { text } => recipe.update_details(
                RecipeName::new(text).unwrap(),
                ImageUrl::new("Url").unwrap(),
                PrepTime::from_minutes(10).unwrap(),
                &ctx,
            ),
        };
    }

    let events = recipe.take_events();
    (recipe, events)
}

fn fold<'a>(events: impl IntoIterator<Item = &'a DomainEvent>) -> Option<RecipeView> {
    events.into_iter().fold(None, |view, event| {
        apply_to_read_model(view.as_ref(), event)
            .expect("in-order history projects")
            .or(view)
    })
}

proptest! {
    #[test]
    fn prop_fold_matches_snapshot(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (recipe, events) = run(&ops);

        let view = fold(&events);

        prop_assert_eq!(view, Some(RecipeView::Live(RecipeReadModel::from_recipe(&recipe))));
    }

    #[test]
    fn prop_duplicate_delivery_is_idempotent(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (_, events) = run(&ops);

        let once = fold(&events);
        let twice = fold(events.iter().flat_map(|event| [event, event]));
        let replayed = fold(events.iter().chain(events.iter()));

        prop_assert_eq!(&once, &twice);
        prop_assert_eq!(&once, &replayed);
    }

    #[test]
    fn prop_sequences_are_contiguous(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (recipe, events) = run(&ops);

        for (index, event) in events.iter().enumerate() {
            prop_assert_eq!(event.sequence, index as u64 + 1);
        }
        prop_assert_eq!(recipe.version(), events.len() as u64);
    }

    #[test]
    fn prop_replay_reproduces_aggregate(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (recipe, events) = run(&ops);

        let replayed = Recipe::from_events(&events);

        prop_assert_eq!(replayed, Some(recipe));
    }

    #[test]
    fn prop_total_calories_is_sum_of_ingredients(ops in prop::collection::vec(op_strategy(), 0..40)) {
        let (recipe, _) = run(&ops);
        let view = RecipeReadModel::from_recipe(&recipe);

        let expected: f64 = view.ingredients.iter().map(|i| i.grams * i.calories_per_hundred_grams / 100.0).sum();
        prop_assert!((view.total_calories - expected).abs() < 1e-9);
    }
}
