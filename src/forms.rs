use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::{Category, CategoryInput, Product, ProductInput};

/// Client-side validation failure. Nothing is sent to the server.
#[derive(Error, Debug, PartialEq, Eq)]
pub enum FormError {
    #[error("Please fill in the product name and description")]
    MissingNameOrDescription,
    #[error("Price must be a positive number")]
    InvalidPrice,
    #[error("Stock must be a non-negative whole number")]
    InvalidStock,
    #[error("Please enter a category name")]
    MissingCategoryName,
    #[error("Unknown category")]
    InvalidCategory,
}

/// Raw admin product form. `edit_id` is empty when creating.
#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct ProductForm {
    #[serde(default)]
    pub edit_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub price: String,
    #[serde(default)]
    pub stock: String,
    #[serde(default)]
    pub image_url: String,
    #[serde(default)]
    pub category_id: String,
}

impl ProductForm {
    pub fn edit_id(&self) -> Option<i64> {
        parse_id(&self.edit_id)
    }

    pub fn validate(&self) -> Result<ProductInput, FormError> {
        let name = self.name.trim();
        let description = self.description.trim();
        if name.is_empty() || description.is_empty() {
            return Err(FormError::MissingNameOrDescription);
        }

        let price = self
            .price
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|price| price.is_finite() && *price > 0.0)
            .ok_or(FormError::InvalidPrice)?;

        let stock = self
            .stock
            .trim()
            .parse::<i64>()
            .ok()
            .filter(|stock| *stock >= 0)
            .ok_or(FormError::InvalidStock)?;

        let category_id = match self.category_id.trim() {
            "" => None,
            raw => Some(raw.parse::<i64>().map_err(|_| FormError::InvalidCategory)?),
        };

        Ok(ProductInput {
            name: name.to_string(),
            description: description.to_string(),
            price,
            stock,
            image_url: non_empty(&self.image_url),
            category_id,
        })
    }
}

#[derive(Deserialize, Serialize, Debug, Default, Clone)]
pub struct CategoryForm {
    #[serde(default)]
    pub edit_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image_url: String,
}

impl CategoryForm {
    pub fn edit_id(&self) -> Option<i64> {
        parse_id(&self.edit_id)
    }

    pub fn validate(&self) -> Result<CategoryInput, FormError> {
        let name = self.name.trim();
        if name.is_empty() {
            return Err(FormError::MissingCategoryName);
        }
        Ok(CategoryInput {
            name: name.to_string(),
            description: non_empty(&self.description),
            image_url: non_empty(&self.image_url),
        })
    }
}

impl From<&Product> for ProductForm {
    fn from(product: &Product) -> Self {
        let input = product.to_input();
        Self {
            edit_id: product.id.to_string(),
            name: input.name,
            description: input.description,
            price: input.price.to_string(),
            stock: input.stock.to_string(),
            image_url: input.image_url.unwrap_or_default(),
            category_id: input.category_id.map(|id| id.to_string()).unwrap_or_default(),
        }
    }
}

impl From<&Category> for CategoryForm {
    fn from(category: &Category) -> Self {
        let input = category.to_input();
        Self {
            edit_id: category.id.to_string(),
            name: input.name,
            description: input.description.unwrap_or_default(),
            image_url: input.image_url.unwrap_or_default(),
        }
    }
}

fn parse_id(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

fn non_empty(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}
