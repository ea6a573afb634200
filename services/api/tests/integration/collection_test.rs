use foodgram_api::domain::repository::RecipeRepository;
use foodgram_api::domain::types::{Collection, IngredientAmount, RecipeDraft};
use foodgram_api::error::FoodgramError;
use foodgram_api::usecase::collection::{AddToCollectionUseCase, RemoveFromCollectionUseCase};
use foodgram_api::usecase::shopping_list::DownloadShoppingListUseCase;
use foodgram_domain::id::{IngredientId, RecipeId, UserId};

use crate::helpers::MemoryStore;

fn line(ingredient_id: IngredientId, amount: i32) -> IngredientAmount {
    IngredientAmount {
        ingredient_id,
        amount,
    }
}

async fn recipe(
    store: &MemoryStore,
    author: UserId,
    name: &str,
    lines: Vec<IngredientAmount>,
) -> RecipeId {
    let tag = store.add_tag(name, &name.to_lowercase());
    let draft = RecipeDraft {
        name: name.to_owned(),
        image: "data:image/png;base64,AAAA".to_owned(),
        text: "Mix.".to_owned(),
        cooking_time: 15,
        tags: vec![tag],
        ingredients: lines,
    };
    RecipeRepository::create(store, author, &draft).await.unwrap().id
}

fn add(store: &MemoryStore) -> AddToCollectionUseCase<MemoryStore, MemoryStore> {
    AddToCollectionUseCase {
        recipes: store.clone(),
        collections: store.clone(),
    }
}

fn remove(store: &MemoryStore) -> RemoveFromCollectionUseCase<MemoryStore, MemoryStore> {
    RemoveFromCollectionUseCase {
        recipes: store.clone(),
        collections: store.clone(),
    }
}

// ── AddToCollectionUseCase ───────────────────────────────────────────────────

#[tokio::test]
async fn should_add_recipe_once_per_collection() {
    let store = MemoryStore::new();
    let user = store.add_user("user").id;
    let egg = store.add_ingredient("Egg", "pcs");
    let id = recipe(&store, user, "Omelette", vec![line(egg, 3)]).await;

    let summary = add(&store)
        .execute(Collection::Favorites, user, id)
        .await
        .unwrap();
    assert_eq!(summary.id, id);
    assert_eq!(summary.name, "Omelette");

    let again = add(&store).execute(Collection::Favorites, user, id).await;
    assert!(
        matches!(
            again,
            Err(FoodgramError::AlreadyInCollection(Collection::Favorites))
        ),
        "expected AlreadyInCollection, got {again:?}"
    );
    assert_eq!(store.state().favorites.len(), 1);

    add(&store)
        .execute(Collection::ShoppingCart, user, id)
        .await
        .unwrap();
    assert_eq!(store.state().carts.len(), 1);
}

#[tokio::test]
async fn should_reject_adding_missing_recipe() {
    let store = MemoryStore::new();
    let user = store.add_user("user").id;

    let result = add(&store)
        .execute(Collection::ShoppingCart, user, RecipeId(404))
        .await;
    assert!(
        matches!(result, Err(FoodgramError::RecipeUnavailable)),
        "expected RecipeUnavailable, got {result:?}"
    );
}

// ── RemoveFromCollectionUseCase ──────────────────────────────────────────────

#[tokio::test]
async fn should_reject_removing_recipe_not_in_collection() {
    let store = MemoryStore::new();
    let user = store.add_user("user").id;
    let egg = store.add_ingredient("Egg", "pcs");
    let id = recipe(&store, user, "Omelette", vec![line(egg, 3)]).await;

    let result = remove(&store).execute(Collection::Favorites, user, id).await;
    assert!(
        matches!(
            result,
            Err(FoodgramError::NotInCollection(Collection::Favorites))
        ),
        "expected NotInCollection, got {result:?}"
    );
}

#[tokio::test]
async fn should_remove_only_the_join_row() {
    let store = MemoryStore::new();
    let user = store.add_user("user").id;
    let egg = store.add_ingredient("Egg", "pcs");
    let id = recipe(&store, user, "Omelette", vec![line(egg, 3)]).await;
    add(&store)
        .execute(Collection::ShoppingCart, user, id)
        .await
        .unwrap();

    remove(&store)
        .execute(Collection::ShoppingCart, user, id)
        .await
        .unwrap();

    let state = store.state();
    assert!(state.carts.is_empty());
    assert_eq!(state.recipes.len(), 1);
}

#[tokio::test]
async fn should_return_not_found_when_removing_missing_recipe() {
    let store = MemoryStore::new();
    let user = store.add_user("user").id;

    let result = remove(&store)
        .execute(Collection::Favorites, user, RecipeId(404))
        .await;
    assert!(
        matches!(result, Err(FoodgramError::RecipeNotFound)),
        "expected RecipeNotFound, got {result:?}"
    );
}

// ── DownloadShoppingListUseCase ──────────────────────────────────────────────

#[tokio::test]
async fn should_sum_ingredients_across_cart_recipes() {
    let store = MemoryStore::new();
    let user = store.add_user("user").id;
    let flour = store.add_ingredient("Flour", "g");
    let milk = store.add_ingredient("Milk", "ml");
    let bread = recipe(&store, user, "Bread", vec![line(flour, 200)]).await;
    let crepes = recipe(
        &store,
        user,
        "Crepes",
        vec![
            line(flour, 300),
            line(milk, 500),
        ],
    )
    .await;
    for id in [bread, crepes] {
        add(&store)
            .execute(Collection::ShoppingCart, user, id)
            .await
            .unwrap();
    }

    let text = DownloadShoppingListUseCase {
        collections: store.clone(),
    }
    .execute(user)
    .await
    .unwrap();

    assert_eq!(text, "Shopping list:\nFlour --- 500 g.\nMilk --- 500 ml.\n");
}

#[tokio::test]
async fn should_render_header_only_for_empty_cart() {
    let store = MemoryStore::new();
    let user = store.add_user("user").id;

    let text = DownloadShoppingListUseCase {
        collections: store,
    }
    .execute(user)
    .await
    .unwrap();

    assert_eq!(text, "Shopping list:\n");
}
