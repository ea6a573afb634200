use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_index(
                Index::create()
                    .table(Follows::Table)
                    .col(Follows::AuthorId)
                    .name("idx_follows_author_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Recipes::Table)
                    .col((Recipes::PubDate, IndexOrder::Desc))
                    .name("idx_recipes_pub_date")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(RecipeTags::Table)
                    .col(RecipeTags::TagId)
                    .name("idx_recipe_tags_tag_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(Favorites::Table)
                    .col(Favorites::RecipeId)
                    .name("idx_favorites_recipe_id")
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .table(ShoppingCarts::Table)
                    .col(ShoppingCarts::RecipeId)
                    .name("idx_shopping_carts_recipe_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        for name in [
            "idx_shopping_carts_recipe_id",
            "idx_favorites_recipe_id",
            "idx_recipe_tags_tag_id",
            "idx_recipes_pub_date",
            "idx_follows_author_id",
        ] {
            manager
                .drop_index(Index::drop().name(name).to_owned())
                .await?;
        }
        Ok(())
    }
}

#[derive(Iden)]
enum Follows {
    Table,
    AuthorId,
}

#[derive(Iden)]
enum Recipes {
    Table,
    PubDate,
}

#[derive(Iden)]
enum RecipeTags {
    Table,
    TagId,
}

#[derive(Iden)]
enum Favorites {
    Table,
    RecipeId,
}

#[derive(Iden)]
enum ShoppingCarts {
    Table,
    RecipeId,
}
