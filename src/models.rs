use serde::{Deserialize, Serialize};

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub price: f64,
    pub stock: i64,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub category_id: Option<i64>,
}

impl Product {
    /// The editable fields of this product, as the admin form submits them.
    pub fn to_input(&self) -> ProductInput {
        ProductInput {
            name: self.name.clone(),
            description: self.description.clone().unwrap_or_default(),
            price: self.price,
            stock: self.stock,
            image_url: self.image_url.clone(),
            category_id: self.category_id,
        }
    }
}

/// Body of `POST /api/products` and `PUT /api/products/{id}`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct ProductInput {
    pub name: String,
    pub description: String,
    pub price: f64,
    pub stock: i64,
    pub image_url: Option<String>,
    pub category_id: Option<i64>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Category {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
}

impl Category {
    pub fn to_input(&self) -> CategoryInput {
        CategoryInput {
            name: self.name.clone(),
            description: self.description.clone(),
            image_url: self.image_url.clone(),
        }
    }
}

/// Body of `POST /api/categories` and `PUT /api/categories/{id}`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CategoryInput {
    pub name: String,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

/// One line of `GET /api/cart`. Display fields are denormalised from the product.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct CartItem {
    pub id: i64,
    #[serde(default)]
    pub product_id: Option<i64>,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub image_url: Option<String>,
    pub quantity: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct AddToCart {
    pub product_id: i64,
    pub quantity: u32,
}

#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq)]
pub struct QuantityUpdate {
    pub quantity: u32,
}

/// Body of `POST /api/orders`.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OrderRequest {
    pub user_id: i64,
    pub delivery_address: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub telegram_username: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct OrderCreated {
    pub order_id: i64,
}

/// Query string shared by the catalog and admin product list.
#[derive(Deserialize, Debug, Default)]
pub struct PageQuery {
    pub category: Option<String>,
    pub notice: Option<String>,
    pub level: Option<String>,
}

/// Scope of a product list fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Category(i64),
}

impl CategoryFilter {
    /// `"all"`, an empty value or anything non-numeric means no filter.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.map(str::trim)
            .and_then(|value| value.parse::<i64>().ok())
            .map_or(Self::All, Self::Category)
    }

    /// Value used for the `<select>` option and query string.
    pub fn as_param(&self) -> String {
        match self {
            Self::All => "all".to_string(),
            Self::Category(id) => id.to_string(),
        }
    }
}
