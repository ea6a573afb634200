use foodgram_api::error::{FieldErrors, FoodgramError};
use foodgram_api::infra::password::verify_password;
use foodgram_api::usecase::user::{
    GetUserUseCase, ListUsersUseCase, RegisterUserInput, RegisterUserUseCase, SetPasswordInput,
    SetPasswordUseCase,
};
use foodgram_domain::id::UserId;
use foodgram_domain::pagination::PageRequest;

use crate::helpers::{MemoryStore, TEST_PASSWORD};

fn registration(username: &str) -> RegisterUserInput {
    RegisterUserInput {
        email: format!("{username}@example.org"),
        username: username.to_owned(),
        first_name: "Vasya".to_owned(),
        last_name: "Pupkin".to_owned(),
        password: "Qwerty123!".to_owned(),
    }
}

fn validation_errors<T: std::fmt::Debug>(result: Result<T, FoodgramError>) -> FieldErrors {
    match result {
        Err(FoodgramError::Validation(errors)) => errors,
        other => panic!("expected Validation, got {other:?}"),
    }
}

// ── RegisterUserUseCase ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_register_user_with_hashed_password() {
    let store = MemoryStore::new();
    let uc = RegisterUserUseCase {
        repo: store.clone(),
    };

    let user = uc.execute(registration("vasya")).await.unwrap();

    assert_eq!(user.username, "vasya");
    assert_ne!(user.password_hash, "Qwerty123!");
    assert!(verify_password("Qwerty123!", &user.password_hash));
    assert_eq!(store.state().users.len(), 1);
}

#[tokio::test]
async fn should_reject_reserved_username_me() {
    let uc = RegisterUserUseCase {
        repo: MemoryStore::new(),
    };

    let errors = validation_errors(uc.execute(registration("me")).await);
    assert!(errors.has("username"));
}

#[tokio::test]
async fn should_reject_taken_email_and_username() {
    let store = MemoryStore::new();
    store.add_user("vasya");
    let uc = RegisterUserUseCase { repo: store };

    let errors = validation_errors(uc.execute(registration("vasya")).await);
    assert!(errors.has("email"));
    assert!(errors.has("username"));
}

#[tokio::test]
async fn should_reject_password_equal_to_username() {
    let uc = RegisterUserUseCase {
        repo: MemoryStore::new(),
    };
    let mut input = registration("longusername");
    input.password = "longusername".to_owned();

    let errors = validation_errors(uc.execute(input).await);
    assert!(errors.has("password"));
}

#[tokio::test]
async fn should_reject_identical_first_and_last_name() {
    let uc = RegisterUserUseCase {
        repo: MemoryStore::new(),
    };
    let mut input = registration("vasya");
    input.last_name = input.first_name.clone();

    let errors = validation_errors(uc.execute(input).await);
    assert!(errors.has("last_name"));
    assert!(!errors.has("first_name"));
}

#[tokio::test]
async fn should_collect_every_missing_field() {
    let uc = RegisterUserUseCase {
        repo: MemoryStore::new(),
    };
    let input = RegisterUserInput {
        email: String::new(),
        username: String::new(),
        first_name: String::new(),
        last_name: String::new(),
        password: String::new(),
    };

    let errors = validation_errors(uc.execute(input).await);
    for field in ["email", "username", "first_name", "last_name", "password"] {
        assert!(errors.has(field), "missing error for {field}");
    }
}

// ── GetUserUseCase / ListUsersUseCase ────────────────────────────────────────

#[tokio::test]
async fn should_report_subscription_from_viewer_perspective() {
    let store = MemoryStore::new();
    let reader = store.add_user("reader");
    let author = store.add_user("author");
    store.follow(reader.id, author.id);
    let uc = GetUserUseCase {
        repo: store.clone(),
        follows: store.clone(),
    };

    let seen_by_reader = uc.execute(Some(reader.id), author.id).await.unwrap();
    assert!(seen_by_reader.is_subscribed);

    let seen_by_author = uc.execute(Some(author.id), reader.id).await.unwrap();
    assert!(!seen_by_author.is_subscribed);

    let anonymous = uc.execute(None, author.id).await.unwrap();
    assert!(!anonymous.is_subscribed);
}

#[tokio::test]
async fn should_return_user_not_found_for_unknown_id() {
    let store = MemoryStore::new();
    let uc = GetUserUseCase {
        repo: store.clone(),
        follows: store,
    };

    let result = uc.execute(None, UserId(404)).await;
    assert!(
        matches!(result, Err(FoodgramError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_paginate_users_in_id_order() {
    let store = MemoryStore::new();
    for name in ["anna", "boris", "clara", "dmitry"] {
        store.add_user(name);
    }
    let uc = ListUsersUseCase {
        repo: store.clone(),
        follows: store,
    };

    let (profiles, count) = uc
        .execute(None, PageRequest { limit: 3, page: 2 })
        .await
        .unwrap();

    assert_eq!(count, 4);
    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].user.username, "dmitry");
}

// ── SetPasswordUseCase ───────────────────────────────────────────────────────

#[tokio::test]
async fn should_change_password_when_current_one_matches() {
    let store = MemoryStore::new();
    let user = store.add_user("vasya");
    let uc = SetPasswordUseCase {
        repo: store.clone(),
    };

    uc.execute(
        user.id,
        SetPasswordInput {
            current_password: TEST_PASSWORD.to_owned(),
            new_password: "brand-new-secret".to_owned(),
        },
    )
    .await
    .unwrap();

    let stored = store.state().users[0].password_hash.clone();
    assert!(verify_password("brand-new-secret", &stored));
    assert!(!verify_password(TEST_PASSWORD, &stored));
}

#[tokio::test]
async fn should_reject_wrong_current_password() {
    let store = MemoryStore::new();
    let user = store.add_user("vasya");
    let uc = SetPasswordUseCase {
        repo: store.clone(),
    };

    let errors = validation_errors(
        uc.execute(
            user.id,
            SetPasswordInput {
                current_password: "not-my-password".to_owned(),
                new_password: "brand-new-secret".to_owned(),
            },
        )
        .await,
    );
    assert!(errors.has("current_password"));
    assert!(verify_password(
        TEST_PASSWORD,
        &store.state().users[0].password_hash
    ));
}
