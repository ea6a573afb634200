use foodgram_api::domain::repository::RecipeRepository;
use foodgram_api::domain::types::{IngredientAmount, RecipeDraft};
use foodgram_api::error::FoodgramError;
use foodgram_api::usecase::follow::{
    ListSubscriptionsUseCase, SubscribeUseCase, UnsubscribeUseCase,
};
use foodgram_domain::id::UserId;
use foodgram_domain::pagination::PageRequest;

use crate::helpers::MemoryStore;

async fn publish(store: &MemoryStore, author: UserId, names: &[&str]) {
    let tag = store.add_tag("Breakfast", "breakfast");
    let egg = store.add_ingredient("Egg", "pcs");
    for name in names {
        let draft = RecipeDraft {
            name: (*name).to_owned(),
            image: "data:image/png;base64,AAAA".to_owned(),
            text: "Cook it.".to_owned(),
            cooking_time: 10,
            tags: vec![tag],
            ingredients: vec![IngredientAmount {
                ingredient_id: egg,
                amount: 2,
            }],
        };
        RecipeRepository::create(store, author, &draft).await.unwrap();
    }
}

fn subscribe_use_case(
    store: &MemoryStore,
) -> SubscribeUseCase<MemoryStore, MemoryStore, MemoryStore> {
    SubscribeUseCase {
        users: store.clone(),
        follows: store.clone(),
        recipes: store.clone(),
    }
}

// ── SubscribeUseCase ─────────────────────────────────────────────────────────

#[tokio::test]
async fn should_subscribe_and_return_limited_recipe_preview() {
    let store = MemoryStore::new();
    let reader = store.add_user("reader");
    let author = store.add_user("author");
    publish(&store, author.id, &["Omelette", "Scramble", "Frittata"]).await;

    let profile = subscribe_use_case(&store)
        .execute(reader.id, author.id, Some(2))
        .await
        .unwrap();

    assert!(profile.profile.is_subscribed);
    assert_eq!(profile.recipes_count, 3);
    assert_eq!(profile.recipes.len(), 2);
    assert_eq!(profile.recipes[0].name, "Frittata");
    assert_eq!(store.state().follows, vec![(reader.id, author.id)]);
}

#[tokio::test]
async fn should_treat_zero_recipes_limit_as_no_cap() {
    let store = MemoryStore::new();
    let reader = store.add_user("reader");
    let author = store.add_user("author");
    publish(&store, author.id, &["Omelette", "Scramble", "Frittata"]).await;

    let profile = subscribe_use_case(&store)
        .execute(reader.id, author.id, Some(0))
        .await
        .unwrap();

    assert_eq!(profile.recipes.len(), 3);
    assert_eq!(profile.recipes_count, 3);
}

#[tokio::test]
async fn should_reject_self_follow() {
    let store = MemoryStore::new();
    let user = store.add_user("narcissus");

    let result = subscribe_use_case(&store)
        .execute(user.id, user.id, None)
        .await;
    assert!(
        matches!(result, Err(FoodgramError::SelfFollow)),
        "expected SelfFollow, got {result:?}"
    );
    assert!(store.state().follows.is_empty());
}

#[tokio::test]
async fn should_reject_second_subscription() {
    let store = MemoryStore::new();
    let reader = store.add_user("reader");
    let author = store.add_user("author");
    let uc = subscribe_use_case(&store);

    uc.execute(reader.id, author.id, None).await.unwrap();
    let result = uc.execute(reader.id, author.id, None).await;

    assert!(
        matches!(result, Err(FoodgramError::AlreadySubscribed)),
        "expected AlreadySubscribed, got {result:?}"
    );
    assert_eq!(store.state().follows.len(), 1);
}

#[tokio::test]
async fn should_return_not_found_for_unknown_author() {
    let store = MemoryStore::new();
    let reader = store.add_user("reader");

    let result = subscribe_use_case(&store)
        .execute(reader.id, UserId(999), None)
        .await;
    assert!(
        matches!(result, Err(FoodgramError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

// ── UnsubscribeUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_unsubscribe_existing_edge() {
    let store = MemoryStore::new();
    let reader = store.add_user("reader");
    let author = store.add_user("author");
    store.follow(reader.id, author.id);
    let uc = UnsubscribeUseCase {
        users: store.clone(),
        follows: store.clone(),
    };

    uc.execute(reader.id, author.id).await.unwrap();
    assert!(store.state().follows.is_empty());
}

#[tokio::test]
async fn should_reject_unsubscribe_without_subscription() {
    let store = MemoryStore::new();
    let reader = store.add_user("reader");
    let author = store.add_user("author");
    let uc = UnsubscribeUseCase {
        users: store.clone(),
        follows: store.clone(),
    };

    let result = uc.execute(reader.id, author.id).await;
    assert!(
        matches!(result, Err(FoodgramError::NotSubscribed)),
        "expected NotSubscribed, got {result:?}"
    );
}

// ── ListSubscriptionsUseCase ─────────────────────────────────────────────────

#[tokio::test]
async fn should_list_only_followed_authors() {
    let store = MemoryStore::new();
    let reader = store.add_user("reader");
    let followed = store.add_user("followed");
    store.add_user("stranger");
    store.follow(reader.id, followed.id);
    publish(&store, followed.id, &["Pancakes"]).await;
    let uc = ListSubscriptionsUseCase {
        follows: store.clone(),
        recipes: store.clone(),
    };

    let (authors, count) = uc
        .execute(reader.id, PageRequest::default(), None)
        .await
        .unwrap();

    assert_eq!(count, 1);
    assert_eq!(authors[0].profile.user.username, "followed");
    assert_eq!(authors[0].recipes.len(), 1);
    assert_eq!(authors[0].recipes_count, 1);
}
