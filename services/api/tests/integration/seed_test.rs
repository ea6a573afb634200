use foodgram_api::error::FoodgramError;
use foodgram_api::infra::seed_file::{IngredientRecord, TagRecord, UserRecord, read_records};
use foodgram_api::usecase::seed::{SeedIngredientsUseCase, SeedTagsUseCase, SeedUsersUseCase};

use crate::helpers::MemoryStore;

#[tokio::test]
async fn should_seed_ingredients_and_skip_existing_pairs() {
    let store = MemoryStore::new();
    store.add_ingredient("salt", "g");
    let records: Vec<IngredientRecord> =
        read_records("salt,g\nsalt,pinch\nflour, g\n".as_bytes()).unwrap();

    let report = SeedIngredientsUseCase {
        repo: store.clone(),
    }
    .execute(records)
    .await
    .unwrap();

    assert_eq!(report.created, 2);
    assert_eq!(report.skipped, 1);
    assert_eq!(store.state().ingredients.len(), 3);
}

#[tokio::test]
async fn should_be_idempotent_on_second_run() {
    let store = MemoryStore::new();
    let uc = SeedIngredientsUseCase {
        repo: store.clone(),
    };
    let records = || read_records::<IngredientRecord, _>("egg,pcs\nmilk,ml\n".as_bytes()).unwrap();

    uc.execute(records()).await.unwrap();
    let second = uc.execute(records()).await.unwrap();

    assert_eq!(second.created, 0);
    assert_eq!(second.skipped, 2);
}

#[tokio::test]
async fn should_reject_tag_file_with_bad_color_before_writing() {
    let store = MemoryStore::new();
    let records: Vec<TagRecord> =
        read_records("Breakfast,#E26C2D,breakfast\nLunch,orange,lunch\n".as_bytes()).unwrap();

    let result = SeedTagsUseCase {
        repo: store.clone(),
    }
    .execute(records)
    .await;

    match result {
        Err(FoodgramError::Validation(errors)) => assert!(errors.has("row 2")),
        other => panic!("expected Validation, got {other:?}"),
    }
    assert!(store.state().tags.is_empty());
}

#[tokio::test]
async fn should_seed_users_with_hashed_passwords() {
    let store = MemoryStore::new();
    store.add_user("taken");
    let records: Vec<UserRecord> = read_records(
        "chef,Secret123!,Anna,Ivanova,chef@example.org\ntaken,Secret123!,T,K,other@example.org\n"
            .as_bytes(),
    )
    .unwrap();

    let report = SeedUsersUseCase {
        repo: store.clone(),
    }
    .execute(records)
    .await
    .unwrap();

    assert_eq!(report.created, 1);
    assert_eq!(report.skipped, 1);
    let state = store.state();
    let chef = state.users.iter().find(|u| u.username == "chef").unwrap();
    assert_ne!(chef.password_hash, "Secret123!");
}
