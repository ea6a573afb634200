//! Newtype wrappers for domain identifiers.
//!
//! Every entity uses a serial `i32` primary key; the wrappers keep a recipe id
//! from being passed where an ingredient id is expected.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! serial_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                self.0.fmt(f)
            }
        }

        impl FromStr for $name {
            type Err = std::num::ParseIntError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.parse()?))
            }
        }

        impl From<i32> for $name {
            fn from(id: i32) -> Self {
                Self(id)
            }
        }
    };
}

serial_id!(
    /// Identifies a user account.
    UserId
);

serial_id!(
    /// Identifies a recipe.
    RecipeId
);

serial_id!(
    /// Identifies a catalog ingredient.
    IngredientId
);

serial_id!(
    /// Identifies a catalog tag.
    TagId
);
