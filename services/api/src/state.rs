use std::sync::Arc;

use axum::extract::FromRef;
use sea_orm::DatabaseConnection;

use foodgram_auth_types::token::TokenSecret;

use crate::infra::db::{
    DbCatalogRepository, DbCollectionRepository, DbFollowRepository, DbRecipeRepository,
    DbUserRepository,
};

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub token_secret: TokenSecret,
    pub token_ttl_secs: u64,
    pub shopping_list_filename: Arc<str>,
}

impl FromRef<AppState> for TokenSecret {
    fn from_ref(state: &AppState) -> Self {
        state.token_secret.clone()
    }
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn follow_repo(&self) -> DbFollowRepository {
        DbFollowRepository {
            db: self.db.clone(),
        }
    }

    pub fn catalog_repo(&self) -> DbCatalogRepository {
        DbCatalogRepository {
            db: self.db.clone(),
        }
    }

    pub fn recipe_repo(&self) -> DbRecipeRepository {
        DbRecipeRepository {
            db: self.db.clone(),
        }
    }

    pub fn collection_repo(&self) -> DbCollectionRepository {
        DbCollectionRepository {
            db: self.db.clone(),
        }
    }
}
