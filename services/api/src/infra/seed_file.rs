//! Header-less CSV seed files read by `loaddata`.
//!
//! | File | Columns |
//! |------|---------|
//! | ingredients | `name,measurement_unit` |
//! | tags | `name,color,slug` |
//! | users | `username,password,first_name,last_name,email` |

use std::io::Read;

use serde::Deserialize;
use serde::de::DeserializeOwned;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct IngredientRecord {
    pub name: String,
    pub measurement_unit: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TagRecord {
    pub name: String,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UserRecord {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

/// A row that could not be decoded. `row` is 1-based.
#[derive(Debug, thiserror::Error)]
#[error("malformed row {row}")]
pub struct SeedFileError {
    pub row: u64,
    #[source]
    pub source: csv::Error,
}

/// Decode every row, stopping at the first malformed one.
pub fn read_records<T, R>(reader: R) -> Result<Vec<T>, SeedFileError>
where
    T: DeserializeOwned,
    R: Read,
{
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .trim(csv::Trim::All)
        .from_reader(reader);
    csv_reader
        .deserialize()
        .enumerate()
        .map(|(index, record)| {
            record.map_err(|source| SeedFileError {
                row: index as u64 + 1,
                source,
            })
        })
        .collect()
}
