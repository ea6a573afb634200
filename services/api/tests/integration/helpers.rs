use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::{Duration, Utc};

use foodgram_api::domain::repository::{
    CatalogRepository, CollectionRepository, FollowRepository, RecipeRepository, UserRepository,
};
use foodgram_api::domain::types::{
    CartIngredientRow, Collection, Ingredient, NewUser, Recipe, RecipeDraft, RecipeFilter,
    RecipeIngredient, Tag, User,
};
use foodgram_api::error::FoodgramError;
use foodgram_api::infra::password::hash_password;
use foodgram_domain::id::{IngredientId, RecipeId, TagId, UserId};
use foodgram_domain::pagination::PageRequest;

pub const TEST_PASSWORD: &str = "sourdough-42";

// ── MemoryStore ──────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct StoreState {
    pub users: Vec<User>,
    pub follows: Vec<(UserId, UserId)>,
    pub ingredients: Vec<Ingredient>,
    pub tags: Vec<Tag>,
    pub recipes: Vec<Recipe>,
    pub recipe_tags: Vec<(RecipeId, TagId)>,
    pub recipe_ingredients: Vec<(RecipeId, IngredientId, i32)>,
    pub favorites: Vec<(UserId, RecipeId)>,
    pub carts: Vec<(UserId, RecipeId)>,
    next_id: i32,
}

impl StoreState {
    fn next_id(&mut self) -> i32 {
        self.next_id += 1;
        self.next_id
    }

    fn collection(&mut self, collection: Collection) -> &mut Vec<(UserId, RecipeId)> {
        match collection {
            Collection::Favorites => &mut self.favorites,
            Collection::ShoppingCart => &mut self.carts,
        }
    }

    fn write_components(&mut self, id: RecipeId, draft: &RecipeDraft) {
        self.recipe_tags.retain(|(r, _)| *r != id);
        self.recipe_ingredients.retain(|(r, _, _)| *r != id);
        for tag in &draft.tags {
            self.recipe_tags.push((id, *tag));
        }
        for line in &draft.ingredients {
            self.recipe_ingredients
                .push((id, line.ingredient_id, line.amount));
        }
    }
}

/// In-memory implementation of every repository trait, shared by clones.
#[derive(Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<StoreState>>,
}

fn paged<T: Clone>(items: &[T], page: PageRequest) -> Vec<T> {
    let page = page.clamped();
    items
        .iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .cloned()
        .collect()
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> MutexGuard<'_, StoreState> {
        self.state.lock().unwrap()
    }

    /// Insert a user whose password is [`TEST_PASSWORD`].
    pub fn add_user(&self, username: &str) -> User {
        let password_hash = hash_password(TEST_PASSWORD).unwrap();
        let mut state = self.state();
        let id = UserId(state.next_id());
        let user = User {
            id,
            email: format!("{username}@example.org"),
            username: username.to_owned(),
            first_name: format!("{username}-first"),
            last_name: format!("{username}-last"),
            password_hash,
        };
        state.users.push(user.clone());
        user
    }

    pub fn add_ingredient(&self, name: &str, unit: &str) -> IngredientId {
        let mut state = self.state();
        let id = IngredientId(state.next_id());
        state.ingredients.push(Ingredient {
            id,
            name: name.to_owned(),
            measurement_unit: unit.to_owned(),
        });
        id
    }

    pub fn add_tag(&self, name: &str, slug: &str) -> TagId {
        let mut state = self.state();
        let id = TagId(state.next_id());
        state.tags.push(Tag {
            id,
            name: name.to_owned(),
            color: "#E26C2D".to_owned(),
            slug: slug.to_owned(),
        });
        id
    }

    pub fn follow(&self, user: UserId, author: UserId) {
        self.state().follows.push((user, author));
    }
}

impl UserRepository for MemoryStore {
    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, FoodgramError> {
        Ok(self.state().users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_ids(&self, ids: &[UserId]) -> Result<Vec<User>, FoodgramError> {
        Ok(self
            .state()
            .users
            .iter()
            .filter(|u| ids.contains(&u.id))
            .cloned()
            .collect())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, FoodgramError> {
        Ok(self.state().users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, FoodgramError> {
        Ok(self
            .state()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn create(&self, user: &NewUser) -> Result<User, FoodgramError> {
        let mut state = self.state();
        if state
            .users
            .iter()
            .any(|u| u.email == user.email || u.username == user.username)
        {
            return Err(FoodgramError::UserAlreadyExists);
        }
        let created = User {
            id: UserId(state.next_id()),
            email: user.email.clone(),
            username: user.username.clone(),
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            password_hash: user.password_hash.clone(),
        };
        state.users.push(created.clone());
        Ok(created)
    }

    async fn list(&self, page: PageRequest) -> Result<(Vec<User>, u64), FoodgramError> {
        let state = self.state();
        let mut users = state.users.clone();
        users.sort_by_key(|u| u.id);
        Ok((paged(&users, page), users.len() as u64))
    }

    async fn update_password(
        &self,
        id: UserId,
        password_hash: &str,
    ) -> Result<(), FoodgramError> {
        let mut state = self.state();
        let user = state
            .users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(FoodgramError::UserNotFound)?;
        user.password_hash = password_hash.to_owned();
        Ok(())
    }
}

impl FollowRepository for MemoryStore {
    async fn create(&self, user: UserId, author: UserId) -> Result<bool, FoodgramError> {
        let mut state = self.state();
        if state.follows.contains(&(user, author)) {
            return Ok(false);
        }
        state.follows.push((user, author));
        Ok(true)
    }

    async fn delete(&self, user: UserId, author: UserId) -> Result<bool, FoodgramError> {
        let mut state = self.state();
        let before = state.follows.len();
        state.follows.retain(|edge| *edge != (user, author));
        Ok(state.follows.len() < before)
    }

    async fn followed_among(
        &self,
        user: UserId,
        authors: &[UserId],
    ) -> Result<HashSet<UserId>, FoodgramError> {
        Ok(self
            .state()
            .follows
            .iter()
            .filter(|(u, a)| *u == user && authors.contains(a))
            .map(|(_, a)| *a)
            .collect())
    }

    async fn list_authors(
        &self,
        user: UserId,
        page: PageRequest,
    ) -> Result<(Vec<User>, u64), FoodgramError> {
        let state = self.state();
        let mut authors: Vec<User> = state
            .users
            .iter()
            .filter(|u| state.follows.contains(&(user, u.id)))
            .cloned()
            .collect();
        authors.sort_by_key(|u| u.id);
        Ok((paged(&authors, page), authors.len() as u64))
    }
}

impl CatalogRepository for MemoryStore {
    async fn list_ingredients(
        &self,
        name_prefix: Option<&str>,
    ) -> Result<Vec<Ingredient>, FoodgramError> {
        let prefix = name_prefix.map(str::to_lowercase);
        let mut found: Vec<Ingredient> = self
            .state()
            .ingredients
            .iter()
            .filter(|i| {
                prefix
                    .as_deref()
                    .is_none_or(|p| i.name.to_lowercase().starts_with(p))
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
        Ok(found)
    }

    async fn find_ingredient(
        &self,
        id: IngredientId,
    ) -> Result<Option<Ingredient>, FoodgramError> {
        Ok(self.state().ingredients.iter().find(|i| i.id == id).cloned())
    }

    async fn existing_ingredient_ids(
        &self,
        ids: &[IngredientId],
    ) -> Result<HashSet<IngredientId>, FoodgramError> {
        Ok(self
            .state()
            .ingredients
            .iter()
            .map(|i| i.id)
            .filter(|id| ids.contains(id))
            .collect())
    }

    async fn list_tags(&self) -> Result<Vec<Tag>, FoodgramError> {
        Ok(self.state().tags.clone())
    }

    async fn find_tag(&self, id: TagId) -> Result<Option<Tag>, FoodgramError> {
        Ok(self.state().tags.iter().find(|t| t.id == id).cloned())
    }

    async fn existing_tag_ids(&self, ids: &[TagId]) -> Result<HashSet<TagId>, FoodgramError> {
        Ok(self
            .state()
            .tags
            .iter()
            .map(|t| t.id)
            .filter(|id| ids.contains(id))
            .collect())
    }

    async fn ensure_ingredient(&self, name: &str, unit: &str) -> Result<bool, FoodgramError> {
        let exists = self
            .state()
            .ingredients
            .iter()
            .any(|i| i.name == name && i.measurement_unit == unit);
        if exists {
            return Ok(false);
        }
        self.add_ingredient(name, unit);
        Ok(true)
    }

    async fn ensure_tag(
        &self,
        name: &str,
        color: &str,
        slug: &str,
    ) -> Result<bool, FoodgramError> {
        let mut state = self.state();
        if state.tags.iter().any(|t| t.slug == slug) {
            return Ok(false);
        }
        let id = TagId(state.next_id());
        state.tags.push(Tag {
            id,
            name: name.to_owned(),
            color: color.to_owned(),
            slug: slug.to_owned(),
        });
        Ok(true)
    }
}

impl RecipeRepository for MemoryStore {
    async fn find(&self, id: RecipeId) -> Result<Option<Recipe>, FoodgramError> {
        Ok(self.state().recipes.iter().find(|r| r.id == id).cloned())
    }

    async fn name_taken(
        &self,
        author: UserId,
        name: &str,
        exclude: Option<RecipeId>,
    ) -> Result<bool, FoodgramError> {
        Ok(self
            .state()
            .recipes
            .iter()
            .any(|r| r.author_id == author && r.name == name && Some(r.id) != exclude))
    }

    async fn create(&self, author: UserId, draft: &RecipeDraft) -> Result<Recipe, FoodgramError> {
        let mut state = self.state();
        let id = RecipeId(state.next_id());
        // Strictly increasing so newest-first ordering is deterministic.
        let pub_date = Utc::now() + Duration::seconds(i64::from(id.0));
        let recipe = Recipe {
            id,
            author_id: author,
            name: draft.name.clone(),
            image: draft.image.clone(),
            text: draft.text.clone(),
            cooking_time: draft.cooking_time,
            pub_date,
        };
        state.recipes.push(recipe.clone());
        state.write_components(id, draft);
        Ok(recipe)
    }

    async fn update(&self, id: RecipeId, draft: &RecipeDraft) -> Result<Recipe, FoodgramError> {
        let mut state = self.state();
        let recipe = state
            .recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(FoodgramError::RecipeNotFound)?;
        recipe.name = draft.name.clone();
        recipe.image = draft.image.clone();
        recipe.text = draft.text.clone();
        recipe.cooking_time = draft.cooking_time;
        let updated = recipe.clone();
        state.write_components(id, draft);
        Ok(updated)
    }

    async fn delete(&self, id: RecipeId) -> Result<bool, FoodgramError> {
        let mut state = self.state();
        let before = state.recipes.len();
        state.recipes.retain(|r| r.id != id);
        if state.recipes.len() == before {
            return Ok(false);
        }
        state.recipe_tags.retain(|(r, _)| *r != id);
        state.recipe_ingredients.retain(|(r, _, _)| *r != id);
        state.favorites.retain(|(_, r)| *r != id);
        state.carts.retain(|(_, r)| *r != id);
        Ok(true)
    }

    async fn list(
        &self,
        filter: &RecipeFilter,
        page: PageRequest,
    ) -> Result<(Vec<Recipe>, u64), FoodgramError> {
        let state = self.state();
        let tag_ids: HashSet<TagId> = state
            .tags
            .iter()
            .filter(|t| filter.tags.contains(&t.slug))
            .map(|t| t.id)
            .collect();
        let mut found: Vec<Recipe> = state
            .recipes
            .iter()
            .filter(|r| filter.author.is_none_or(|a| r.author_id == a))
            .filter(|r| {
                filter.tags.is_empty()
                    || state
                        .recipe_tags
                        .iter()
                        .any(|(rid, tid)| *rid == r.id && tag_ids.contains(tid))
            })
            .filter(|r| {
                filter
                    .favorited_by
                    .is_none_or(|u| state.favorites.contains(&(u, r.id)))
            })
            .filter(|r| {
                filter
                    .in_cart_of
                    .is_none_or(|u| state.carts.contains(&(u, r.id)))
            })
            .cloned()
            .collect();
        found.sort_by(|a, b| b.pub_date.cmp(&a.pub_date).then(b.id.cmp(&a.id)));
        Ok((paged(&found, page), found.len() as u64))
    }

    async fn list_by_author(
        &self,
        author: UserId,
        limit: Option<u64>,
    ) -> Result<Vec<Recipe>, FoodgramError> {
        let mut found: Vec<Recipe> = self
            .state()
            .recipes
            .iter()
            .filter(|r| r.author_id == author)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.pub_date.cmp(&a.pub_date));
        if let Some(limit) = limit {
            found.truncate(limit as usize);
        }
        Ok(found)
    }

    async fn count_by_author(&self, author: UserId) -> Result<u64, FoodgramError> {
        Ok(self
            .state()
            .recipes
            .iter()
            .filter(|r| r.author_id == author)
            .count() as u64)
    }

    async fn tags_for(
        &self,
        ids: &[RecipeId],
    ) -> Result<HashMap<RecipeId, Vec<Tag>>, FoodgramError> {
        let state = self.state();
        let mut by_recipe: HashMap<RecipeId, Vec<Tag>> = HashMap::new();
        for (recipe, tag) in &state.recipe_tags {
            if !ids.contains(recipe) {
                continue;
            }
            if let Some(tag) = state.tags.iter().find(|t| t.id == *tag) {
                by_recipe.entry(*recipe).or_default().push(tag.clone());
            }
        }
        Ok(by_recipe)
    }

    async fn ingredients_for(
        &self,
        ids: &[RecipeId],
    ) -> Result<HashMap<RecipeId, Vec<RecipeIngredient>>, FoodgramError> {
        let state = self.state();
        let mut by_recipe: HashMap<RecipeId, Vec<RecipeIngredient>> = HashMap::new();
        for (recipe, ingredient, amount) in &state.recipe_ingredients {
            if !ids.contains(recipe) {
                continue;
            }
            if let Some(ingredient) = state.ingredients.iter().find(|i| i.id == *ingredient) {
                by_recipe.entry(*recipe).or_default().push(RecipeIngredient {
                    ingredient: ingredient.clone(),
                    amount: *amount,
                });
            }
        }
        Ok(by_recipe)
    }
}

impl CollectionRepository for MemoryStore {
    async fn add(
        &self,
        collection: Collection,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<bool, FoodgramError> {
        let mut state = self.state();
        let rows = state.collection(collection);
        if rows.contains(&(user, recipe)) {
            return Ok(false);
        }
        rows.push((user, recipe));
        Ok(true)
    }

    async fn remove(
        &self,
        collection: Collection,
        user: UserId,
        recipe: RecipeId,
    ) -> Result<bool, FoodgramError> {
        let mut state = self.state();
        let rows = state.collection(collection);
        let before = rows.len();
        rows.retain(|row| *row != (user, recipe));
        Ok(rows.len() < before)
    }

    async fn marked_among(
        &self,
        collection: Collection,
        user: UserId,
        recipes: &[RecipeId],
    ) -> Result<HashSet<RecipeId>, FoodgramError> {
        let mut state = self.state();
        Ok(state
            .collection(collection)
            .iter()
            .filter(|(u, r)| *u == user && recipes.contains(r))
            .map(|(_, r)| *r)
            .collect())
    }

    async fn cart_ingredients(
        &self,
        user: UserId,
    ) -> Result<Vec<CartIngredientRow>, FoodgramError> {
        let state = self.state();
        let mut rows = Vec::new();
        for (_, recipe) in state.carts.iter().filter(|(u, _)| *u == user) {
            for (rid, iid, amount) in &state.recipe_ingredients {
                if rid != recipe {
                    continue;
                }
                if let Some(ingredient) = state.ingredients.iter().find(|i| i.id == *iid) {
                    rows.push(CartIngredientRow {
                        ingredient_id: ingredient.id,
                        name: ingredient.name.clone(),
                        measurement_unit: ingredient.measurement_unit.clone(),
                        amount: *amount,
                    });
                }
            }
        }
        Ok(rows)
    }
}
