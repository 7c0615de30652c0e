use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

pub const NAME_MAX_CHARS: u64 = 255;

/// A catalogue product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[schema(example = json!({
    "id": 1,
    "name": "Laptop",
    "description": "Ordinateur performant",
    "price": 899.99,
    "stock": 10,
    "created_at": "2024-01-01T10:00:00Z",
    "updated_at": "2024-01-01T10:00:00Z"
}))]
pub struct Product {
    /// Server-assigned identifier
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: f64,
    /// Units on hand
    pub stock: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Build a freshly stored product with both timestamps at `now`.
    pub fn new(id: i64, input: ProductInput, now: DateTime<Utc>) -> Self {
        Self {
            id,
            name: input.name,
            description: input.description,
            price: input.price,
            stock: input.stock,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace every editable field and bump `updated_at`.
    ///
    /// `updated_at` never moves backwards, even if the clock does.
    pub fn apply_update(&mut self, input: ProductInput, now: DateTime<Utc>) {
        self.name = input.name;
        self.description = input.description;
        self.price = input.price;
        self.stock = input.stock;
        self.updated_at = next_updated_at(self.updated_at, now);
    }
}

/// `max(now, previous)`
pub fn next_updated_at(previous: DateTime<Utc>, now: DateTime<Utc>) -> DateTime<Utc> {
    previous.max(now)
}

/// Editable product fields, used for both create and full update.
///
/// Built from a request body with `ProductInput::try_from(serde_json::Value)`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema, Validate)]
#[schema(example = json!({
    "name": "Laptop",
    "description": "Ordinateur performant",
    "price": 899.99,
    "stock": 10
}))]
pub struct ProductInput {
    /// At most 255 characters
    #[validate(
        custom(function = "not_blank", message = "The name field is required."),
        length(
            max = 255,
            message = "The name field must not be greater than 255 characters."
        )
    )]
    pub name: String,
    #[validate(custom(function = "not_blank", message = "The description field is required."))]
    pub description: String,
    /// JSON number or numeric string
    pub price: f64,
    /// JSON integer or integer string
    pub stock: i32,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required"));
    }
    Ok(())
}

/// Body carrying only a message, e.g. `{"message":"Product deleted"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MessageResponse {
    #[schema(example = "Product deleted")]
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Message plus the affected product, returned by create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductEnvelope {
    #[schema(example = "Product created")]
    pub message: String,
    pub product: Product,
}

impl ProductEnvelope {
    pub fn created(product: Product) -> Self {
        Self {
            message: "Product created".to_string(),
            product,
        }
    }

    pub fn updated(product: Product) -> Self {
        Self {
            message: "Product updated".to_string(),
            product,
        }
    }
}
