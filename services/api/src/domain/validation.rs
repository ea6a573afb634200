//! Field rules shared by registration, recipe editing and the bulk loader.

use std::collections::HashSet;
use std::ops::RangeInclusive;

use foodgram_domain::id::{IngredientId, TagId};

use crate::domain::types::RecipeDraft;
use crate::error::FieldErrors;

pub const MAX_EMAIL_LEN: usize = 254;
pub const MAX_USER_FIELD_LEN: usize = 150;
pub const MAX_CATALOG_FIELD_LEN: usize = 200;
pub const MAX_RECIPE_NAME_LEN: usize = 200;
pub const MIN_PASSWORD_LEN: usize = 8;

pub const COOKING_TIME_RANGE: RangeInclusive<i32> = 1..=1440;
pub const AMOUNT_RANGE: RangeInclusive<i32> = 1..=5000;

/// Username reserved for the `users/me` route.
pub const RESERVED_USERNAME: &str = "me";

pub const REQUIRED: &str = "This field is required.";

fn too_long(max: usize) -> String {
    format!("Ensure this field has no more than {max} characters.")
}

/// Username: letters, digits and `_ . @ + -`, at most 150 characters, not `me`.
pub fn check_username(username: &str) -> Option<String> {
    if username.is_empty() {
        return Some(REQUIRED.to_owned());
    }
    if username.chars().count() > MAX_USER_FIELD_LEN {
        return Some(too_long(MAX_USER_FIELD_LEN));
    }
    if username.eq_ignore_ascii_case(RESERVED_USERNAME) {
        return Some(format!("Username \"{username}\" is reserved."));
    }
    let allowed = |c: char| c.is_alphanumeric() || matches!(c, '_' | '.' | '@' | '+' | '-');
    if !username.chars().all(allowed) {
        return Some("Username may contain only letters, digits and @/./+/-/_.".to_owned());
    }
    None
}

pub fn check_email(email: &str) -> Option<String> {
    if email.is_empty() {
        return Some(REQUIRED.to_owned());
    }
    if email.chars().count() > MAX_EMAIL_LEN {
        return Some(too_long(MAX_EMAIL_LEN));
    }
    let valid = match email.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !email.chars().any(char::is_whitespace)
        }
        None => false,
    };
    (!valid).then(|| "Enter a valid email address.".to_owned())
}

/// First or last name.
pub fn check_person_name(name: &str) -> Option<String> {
    if name.trim().is_empty() {
        return Some(REQUIRED.to_owned());
    }
    (name.chars().count() > MAX_USER_FIELD_LEN).then(|| too_long(MAX_USER_FIELD_LEN))
}

/// Password policy: at least 8 characters and not entirely numeric.
pub fn check_password(password: &str) -> Vec<String> {
    let mut problems = Vec::new();
    if password.is_empty() {
        problems.push(REQUIRED.to_owned());
        return problems;
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        problems.push(format!(
            "This password is too short. It must contain at least {MIN_PASSWORD_LEN} characters."
        ));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        problems.push("This password is entirely numeric.".to_owned());
    }
    problems
}

/// `#RRGGBB`.
pub fn is_hex_color(color: &str) -> bool {
    color.len() == 7
        && color.starts_with('#')
        && color[1..].chars().all(|c| c.is_ascii_hexdigit())
}

/// Catalog slug: ASCII letters, digits, `-` and `_`.
pub fn is_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug.len() <= MAX_CATALOG_FIELD_LEN
        && slug
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

/// Check a recipe draft against the catalog ids that exist.
///
/// Fields already carrying an error in `errors` are not checked again.
pub fn validate_recipe_draft(
    draft: &RecipeDraft,
    known_tags: &HashSet<TagId>,
    known_ingredients: &HashSet<IngredientId>,
    errors: &mut FieldErrors,
) {
    if !errors.has("name") {
        if draft.name.trim().is_empty() {
            errors.add("name", "This field may not be blank.");
        } else if draft.name.chars().count() > MAX_RECIPE_NAME_LEN {
            errors.add("name", too_long(MAX_RECIPE_NAME_LEN));
        }
    }
    if !errors.has("text") && draft.text.trim().is_empty() {
        errors.add("text", "This field may not be blank.");
    }
    if !errors.has("image") && draft.image.trim().is_empty() {
        errors.add("image", "This field may not be blank.");
    }
    if !errors.has("cooking_time") && !COOKING_TIME_RANGE.contains(&draft.cooking_time) {
        errors.add(
            "cooking_time",
            format!(
                "Cooking time must be between {} and {} minutes.",
                COOKING_TIME_RANGE.start(),
                COOKING_TIME_RANGE.end()
            ),
        );
    }

    if !errors.has("tags") {
        if draft.tags.is_empty() {
            errors.add("tags", "At least one tag is required.");
        }
        let mut seen = HashSet::new();
        for tag in &draft.tags {
            if !seen.insert(*tag) {
                errors.add("tags", format!("Tag {tag} is listed more than once."));
            } else if !known_tags.contains(tag) {
                errors.add("tags", format!("Tag {tag} does not exist."));
            }
        }
    }

    if !errors.has("ingredients") {
        if draft.ingredients.is_empty() {
            errors.add("ingredients", "At least one ingredient is required.");
        }
        let mut seen = HashSet::new();
        for line in &draft.ingredients {
            let id = line.ingredient_id;
            if !seen.insert(id) {
                errors.add(
                    "ingredients",
                    format!("Ingredient {id} is listed more than once."),
                );
            } else if !known_ingredients.contains(&id) {
                errors.add("ingredients", format!("Ingredient {id} does not exist."));
            }
            if !AMOUNT_RANGE.contains(&line.amount) {
                errors.add(
                    "ingredients",
                    format!(
                        "Amount of ingredient {id} must be between {} and {}.",
                        AMOUNT_RANGE.start(),
                        AMOUNT_RANGE.end()
                    ),
                );
            }
        }
    }
}
