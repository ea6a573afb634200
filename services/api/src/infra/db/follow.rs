use std::collections::HashSet;

use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveValue::Set, ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, QuerySelect, sea_query::OnConflict,
};

use foodgram_api_schema::{follows, users};
use foodgram_core::sea_ext::Paginate as _;
use foodgram_domain::id::UserId;
use foodgram_domain::pagination::PageRequest;

use super::user::user_from_model;
use crate::domain::repository::FollowRepository;
use crate::domain::types::User;
use crate::error::FoodgramError;

#[derive(Clone)]
pub struct DbFollowRepository {
    pub db: DatabaseConnection,
}

impl FollowRepository for DbFollowRepository {
    async fn create(&self, user: UserId, author: UserId) -> Result<bool, FoodgramError> {
        let rows = follows::Entity::insert(follows::ActiveModel {
            user_id: Set(user.0),
            author_id: Set(author.0),
            created_at: Set(Utc::now()),
        })
        .on_conflict(
            OnConflict::columns([follows::Column::UserId, follows::Column::AuthorId])
                .do_nothing()
                .to_owned(),
        )
        .exec_without_returning(&self.db)
        .await
        .context("create follow")?;
        Ok(rows > 0)
    }

    async fn delete(&self, user: UserId, author: UserId) -> Result<bool, FoodgramError> {
        let result = follows::Entity::delete_many()
            .filter(follows::Column::UserId.eq(user.0))
            .filter(follows::Column::AuthorId.eq(author.0))
            .exec(&self.db)
            .await
            .context("delete follow")?;
        Ok(result.rows_affected > 0)
    }

    async fn followed_among(
        &self,
        user: UserId,
        authors: &[UserId],
    ) -> Result<HashSet<UserId>, FoodgramError> {
        if authors.is_empty() {
            return Ok(HashSet::new());
        }
        let ids: Vec<i32> = follows::Entity::find()
            .select_only()
            .column(follows::Column::AuthorId)
            .filter(follows::Column::UserId.eq(user.0))
            .filter(follows::Column::AuthorId.is_in(authors.iter().map(|a| a.0)))
            .into_tuple()
            .all(&self.db)
            .await
            .context("find followed authors")?;
        Ok(ids.into_iter().map(UserId).collect())
    }

    async fn list_authors(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<(Vec<User>, u64), FoodgramError> {
        let followed = users::Entity::find().filter(
            users::Column::Id.in_subquery(
                sea_orm::sea_query::Query::select()
                    .column(follows::Column::AuthorId)
                    .from(follows::Entity)
                    .and_where(follows::Column::UserId.eq(user.0))
                    .to_owned(),
            ),
        );
        let count = followed
            .clone()
            .count(&self.db)
            .await
            .context("count followed authors")?;
        let models = followed
            .order_by_asc(users::Column::Id)
            .paginate_by(page)
            .all(&self.db)
            .await
            .context("list followed authors")?;
        Ok((models.into_iter().map(user_from_model).collect(), count))
    }
}
