use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation of a product listed in the catalog.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique identifier of the product.
    pub id: String,
    /// Human-readable name of the product.
    pub name: String,
    /// Image URL, empty when the product has no picture.
    pub image: String,
    /// Longer description shown to users.
    pub description: String,
    /// Unit price of the product.
    pub price: f64,
    /// Identifier of the category the product belongs to.
    pub category_id: String,
    /// Identifier of the brand the product belongs to.
    pub brand_id: String,
    /// Timestamp for when the product record was created.
    pub created_at: NaiveDateTime,
    /// Timestamp for the last update to the product record.
    pub updated_at: NaiveDateTime,
}

/// Payload required to insert a new product together with its tag links.
#[derive(Debug, Clone, PartialEq)]
pub struct NewProduct {
    /// Human-readable name of the product.
    pub name: String,
    /// Image URL, stored as an empty string when not supplied.
    pub image: String,
    /// Longer description shown to users.
    pub description: String,
    /// Unit price of the product.
    pub price: f64,
    /// Category the product is connected to.
    pub category_id: String,
    /// Brand the product is connected to.
    pub brand_id: String,
    /// Tags linked to the product through the join table.
    pub tag_ids: Vec<String>,
}

impl NewProduct {
    /// Build a new product payload without image or tags.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        price: f64,
        category_id: impl Into<String>,
        brand_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            image: String::new(),
            description: description.into(),
            price,
            category_id: category_id.into(),
            brand_id: brand_id.into(),
            tag_ids: Vec::new(),
        }
    }

    /// Attach an image URL to the product payload.
    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = image.into();
        self
    }

    /// Link the product to the given tags.
    pub fn with_tags<I, S>(mut self, tag_ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tag_ids = tag_ids.into_iter().map(Into::into).collect();
        self
    }
}
