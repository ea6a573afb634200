use foodgram_api::error::FoodgramError;
use foodgram_api::usecase::auth::{LoginInput, LoginUseCase};
use foodgram_auth_types::token::validate_access_token;
use foodgram_testing::auth::MockAuth;

use crate::helpers::{MemoryStore, TEST_PASSWORD};

fn login_use_case(store: MemoryStore) -> LoginUseCase<MemoryStore> {
    LoginUseCase {
        repo: store,
        secret: MockAuth::secret(),
        ttl_secs: 3600,
    }
}

#[tokio::test]
async fn should_issue_token_for_valid_credentials() {
    let store = MemoryStore::new();
    let user = store.add_user("vasya");
    let uc = login_use_case(store);

    let output = uc
        .execute(LoginInput {
            email: user.email.clone(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await
        .unwrap();

    let info = validate_access_token(&output.auth_token, &MockAuth::secret()).unwrap();
    assert_eq!(info.user_id, user.id);
    assert_eq!(info.expires_at, output.expires_at);
}

#[tokio::test]
async fn should_reject_wrong_password() {
    let store = MemoryStore::new();
    let user = store.add_user("vasya");
    let uc = login_use_case(store);

    let result = uc
        .execute(LoginInput {
            email: user.email,
            password: "definitely-wrong".to_owned(),
        })
        .await;
    assert!(
        matches!(result, Err(FoodgramError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_not_reveal_unknown_email() {
    let uc = login_use_case(MemoryStore::new());

    let result = uc
        .execute(LoginInput {
            email: "ghost@example.org".to_owned(),
            password: TEST_PASSWORD.to_owned(),
        })
        .await;
    assert!(
        matches!(result, Err(FoodgramError::InvalidCredentials)),
        "expected InvalidCredentials, got {result:?}"
    );
}

#[tokio::test]
async fn should_require_email_and_password() {
    let uc = login_use_case(MemoryStore::new());

    let result = uc
        .execute(LoginInput {
            email: String::new(),
            password: String::new(),
        })
        .await;
    match result {
        Err(FoodgramError::Validation(errors)) => {
            assert!(errors.has("email"));
            assert!(errors.has("password"));
        }
        other => panic!("expected Validation, got {other:?}"),
    }
}
