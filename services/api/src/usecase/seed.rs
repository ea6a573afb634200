//! Get-or-create bulk import used by the `loaddata` CLI.

use crate::domain::repository::{CatalogRepository, UserRepository};
use crate::domain::types::{NewUser, SeedReport};
use crate::domain::validation::{
    MAX_CATALOG_FIELD_LEN, check_email, check_person_name, check_username, is_hex_color, is_slug,
};
use crate::error::FoodgramError;
use crate::infra::password::spawn_hash_password;
use crate::infra::seed_file::{IngredientRecord, TagRecord, UserRecord};

fn invalid_row(row: usize, message: impl Into<String>) -> FoodgramError {
    FoodgramError::field(&format!("row {}", row + 1), message)
}

fn check_catalog_text(row: usize, field: &str, value: &str) -> Result<(), FoodgramError> {
    if value.is_empty() {
        return Err(invalid_row(row, format!("{field} is empty")));
    }
    if value.chars().count() > MAX_CATALOG_FIELD_LEN {
        return Err(invalid_row(
            row,
            format!("{field} is longer than {MAX_CATALOG_FIELD_LEN} characters"),
        ));
    }
    Ok(())
}

// ── SeedIngredients ──────────────────────────────────────────────────────────

pub struct SeedIngredientsUseCase<R: CatalogRepository> {
    pub repo: R,
}

impl<R: CatalogRepository> SeedIngredientsUseCase<R> {
    pub async fn execute(&self, records: Vec<IngredientRecord>) -> Result<SeedReport, FoodgramError> {
        for (row, record) in records.iter().enumerate() {
            check_catalog_text(row, "name", &record.name)?;
            check_catalog_text(row, "measurement_unit", &record.measurement_unit)?;
        }
        let mut report = SeedReport::default();
        for record in &records {
            if self
                .repo
                .ensure_ingredient(&record.name, &record.measurement_unit)
                .await?
            {
                report.created += 1;
            } else {
                report.skipped += 1;
            }
        }
        Ok(report)
    }
}

// ── SeedTags ─────────────────────────────────────────────────────────────────

pub struct SeedTagsUseCase<R: CatalogRepository> {
    pub repo: R,
}

impl<R: CatalogRepository> SeedTagsUseCase<R> {
    pub async fn execute(&self, records: Vec<TagRecord>) -> Result<SeedReport, FoodgramError> {
        for (row, record) in records.iter().enumerate() {
            check_catalog_text(row, "name", &record.name)?;
            if !is_hex_color(&record.color) {
                return Err(invalid_row(row, format!("{:?} is not a #RRGGBB color", record.color)));
            }
            if !is_slug(&record.slug) {
                return Err(invalid_row(row, format!("{:?} is not a valid slug", record.slug)));
            }
        }
        let mut report = SeedReport::default();
        for record in &records {
            if self
                .repo
                .ensure_tag(&record.name, &record.color, &record.slug)
                .await?
            {
                report.created += 1;
            } else {
                report.skipped += 1;
            }
        }
        Ok(report)
    }
}

// ── SeedUsers ────────────────────────────────────────────────────────────────

pub struct SeedUsersUseCase<R: UserRepository> {
    pub repo: R,
}

impl<R: UserRepository> SeedUsersUseCase<R> {
    /// Existing email or username counts as skipped. Passwords are hashed
    /// before storage.
    pub async fn execute(&self, records: Vec<UserRecord>) -> Result<SeedReport, FoodgramError> {
        for (row, record) in records.iter().enumerate() {
            let problem = check_username(&record.username)
                .or_else(|| check_email(&record.email))
                .or_else(|| check_person_name(&record.first_name))
                .or_else(|| check_person_name(&record.last_name))
                .or_else(|| record.password.is_empty().then(|| "password is empty".to_owned()));
            if let Some(message) = problem {
                return Err(invalid_row(row, message));
            }
        }
        let mut report = SeedReport::default();
        for record in records {
            let taken = self.repo.find_by_email(&record.email).await?.is_some()
                || self.repo.find_by_username(&record.username).await?.is_some();
            if taken {
                report.skipped += 1;
                continue;
            }
            let created = self
                .repo
                .create(&NewUser {
                    password_hash: spawn_hash_password(record.password).await?,
                    email: record.email,
                    username: record.username,
                    first_name: record.first_name,
                    last_name: record.last_name,
                })
                .await;
            match created {
                Ok(_) => report.created += 1,
                Err(FoodgramError::UserAlreadyExists) => report.skipped += 1,
                Err(e) => return Err(e),
            }
        }
        Ok(report)
    }
}
