use std::collections::HashMap;
use std::fmt::Write as _;

use foodgram_domain::id::UserId;

use crate::domain::repository::CollectionRepository;
use crate::domain::types::{CartIngredientRow, ShoppingListLine};
use crate::error::FoodgramError;

pub const SHOPPING_LIST_HEADER: &str = "Shopping list:";

/// Sum amounts per ingredient, keeping first-seen order.
pub fn aggregate(rows: Vec<CartIngredientRow>) -> Vec<ShoppingListLine> {
    let mut lines: Vec<ShoppingListLine> = Vec::new();
    let mut index = HashMap::new();
    for row in rows {
        match index.get(&row.ingredient_id) {
            Some(&at) => {
                let line: &mut ShoppingListLine = &mut lines[at];
                line.total += i64::from(row.amount);
            }
            None => {
                index.insert(row.ingredient_id, lines.len());
                lines.push(ShoppingListLine {
                    name: row.name,
                    measurement_unit: row.measurement_unit,
                    total: i64::from(row.amount),
                });
            }
        }
    }
    lines
}

/// Header line followed by one `<name> --- <total> <unit>.` line each.
pub fn render(lines: &[ShoppingListLine]) -> String {
    let mut out = String::from(SHOPPING_LIST_HEADER);
    out.push('\n');
    for line in lines {
        let _ = writeln!(
            out,
            "{} --- {} {}.",
            line.name, line.total, line.measurement_unit
        );
    }
    out
}

pub struct DownloadShoppingListUseCase<C: CollectionRepository> {
    pub collections: C,
}

impl<C: CollectionRepository> DownloadShoppingListUseCase<C> {
    pub async fn execute(&self, user_id: UserId) -> Result<String, FoodgramError> {
        let rows = self.collections.cart_ingredients(user_id).await?;
        Ok(render(&aggregate(rows)))
    }
}
