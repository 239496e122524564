use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Domain representation linking a product to a tag record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "camelCase")]
pub struct ProductTag {
    /// Unique identifier of the product-tag association.
    pub id: String,
    /// Identifier of the product the tag is attached to.
    pub product_id: String,
    /// Identifier of the referenced tag record.
    pub tag_id: String,
    /// Timestamp for when the association was created.
    pub created_at: NaiveDateTime,
}

/// Payload required to associate an existing tag with a product.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NewProductTag {
    /// Identifier of the product receiving the tag.
    pub product_id: String,
    /// Identifier of the tag being attached to the product.
    pub tag_id: String,
}

impl NewProductTag {
    /// Construct a new association payload between a product and a tag.
    pub fn new(product_id: impl Into<String>, tag_id: impl Into<String>) -> Self {
        Self {
            product_id: product_id.into(),
            tag_id: tag_id.into(),
        }
    }
}
