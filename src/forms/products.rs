use serde::Deserialize;
use thiserror::Error;
use validator::{Validate, ValidationErrors};

use crate::domain::product::NewProduct;

/// Maximum allowed length for a product name.
const NAME_MAX_LEN: usize = 128;
const NAME_MAX_LEN_VALIDATOR: u64 = NAME_MAX_LEN as u64;

/// Maximum allowed length for a product description.
const DESCRIPTION_MAX_LEN: usize = 4096;
const DESCRIPTION_MAX_LEN_VALIDATOR: u64 = DESCRIPTION_MAX_LEN as u64;

/// Maximum allowed length for an image URL.
const IMAGE_MAX_LEN: usize = 2048;
const IMAGE_MAX_LEN_VALIDATOR: u64 = IMAGE_MAX_LEN as u64;

/// Result type returned by the product form helpers.
pub type ProductFormResult<T> = Result<T, ProductFormError>;

/// Errors that can occur while processing product payloads.
#[derive(Debug, Error)]
pub enum ProductFormError {
    /// The request body could not be parsed as JSON at all.
    #[error("request body is not valid JSON: {0}")]
    Malformed(serde_json::Error),
    /// The JSON document does not match the expected field types.
    #[error("invalid product payload: {0}")]
    Schema(serde_json::Error),
    /// Validation failures from the `validator` crate.
    #[error("validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    /// The provided name is empty after sanitization.
    #[error("product name cannot be empty")]
    EmptyName,
    /// The provided description is empty after sanitization.
    #[error("product description cannot be empty")]
    EmptyDescription,
    /// A category or brand identifier is blank.
    #[error("{field} cannot be empty")]
    EmptyReference { field: &'static str },
    /// One of the supplied tag identifiers is blank.
    #[error("tag identifiers cannot be empty")]
    EmptyTag,
    /// The same tag identifier was supplied more than once.
    #[error("tag `{tag}` is listed more than once")]
    DuplicateTag { tag: String },
}

/// JSON payload accepted by `POST /api/product`.
///
/// Every field is optional at the serde level so that absent fields are
/// reported by the validator rather than by the deserializer.
#[derive(Debug, Default, Deserialize, Validate)]
pub struct AddProductForm {
    #[validate(
        required(message = "name is required"),
        length(
            min = 1,
            max = NAME_MAX_LEN_VALIDATOR,
            message = "name must be between 1 and 128 characters"
        )
    )]
    pub name: Option<String>,
    #[validate(length(
        max = IMAGE_MAX_LEN_VALIDATOR,
        message = "image must be at most 2048 characters"
    ))]
    pub image: Option<String>,
    #[validate(
        required(message = "description is required"),
        length(
            min = 1,
            max = DESCRIPTION_MAX_LEN_VALIDATOR,
            message = "description must be between 1 and 4096 characters"
        )
    )]
    pub description: Option<String>,
    #[validate(
        required(message = "category is required"),
        length(min = 1, message = "category cannot be empty")
    )]
    pub category: Option<String>,
    #[validate(
        required(message = "brand is required"),
        length(min = 1, message = "brand cannot be empty")
    )]
    pub brand: Option<String>,
    #[validate(
        required(message = "price is required"),
        range(min = 0.0, message = "price cannot be negative")
    )]
    pub price: Option<f64>,
    #[validate(required(message = "tags are required"))]
    pub tags: Option<Vec<String>>,
}

impl AddProductForm {
    /// Parse a raw request body.
    ///
    /// Bodies that are not JSON are reported as [`ProductFormError::Malformed`];
    /// JSON with mistyped fields is reported as [`ProductFormError::Schema`].
    pub fn from_json(body: &[u8]) -> ProductFormResult<Self> {
        let value: serde_json::Value =
            serde_json::from_slice(body).map_err(ProductFormError::Malformed)?;
        serde_json::from_value(value).map_err(ProductFormError::Schema)
    }

    /// Validates and sanitizes the payload into a domain `NewProduct`.
    pub fn into_new_product(self) -> ProductFormResult<NewProduct> {
        self.validate()?;

        let AddProductForm {
            name: Some(name),
            image,
            description: Some(description),
            category: Some(category),
            brand: Some(brand),
            price: Some(price),
            tags: Some(tags),
        } = self
        else {
            // `validate` already rejected missing required fields.
            return Err(ProductFormError::Validation(ValidationErrors::new()));
        };

        let sanitized_name = sanitize_inline_text(&name);
        if sanitized_name.is_empty() {
            return Err(ProductFormError::EmptyName);
        }

        let sanitized_description = sanitize_multiline_text(&description);
        if sanitized_description.is_empty() {
            return Err(ProductFormError::EmptyDescription);
        }

        let category = category.trim();
        if category.is_empty() {
            return Err(ProductFormError::EmptyReference { field: "category" });
        }

        let brand = brand.trim();
        if brand.is_empty() {
            return Err(ProductFormError::EmptyReference { field: "brand" });
        }

        let mut tag_ids: Vec<String> = Vec::with_capacity(tags.len());
        for tag in tags {
            let tag = tag.trim().to_string();
            if tag.is_empty() {
                return Err(ProductFormError::EmptyTag);
            }
            if tag_ids.contains(&tag) {
                return Err(ProductFormError::DuplicateTag { tag });
            }
            tag_ids.push(tag);
        }

        let image = image.map(|value| value.trim().to_string()).unwrap_or_default();

        Ok(NewProduct::new(
            sanitized_name,
            sanitized_description,
            price,
            category,
            brand,
        )
        .with_image(image)
        .with_tags(tag_ids))
    }
}

fn sanitize_inline_text(input: &str) -> String {
    let mut sanitized = String::with_capacity(input.len());
    let mut previous_whitespace = false;

    for ch in input.trim().chars() {
        if ch.is_whitespace() {
            if !previous_whitespace {
                sanitized.push(' ');
                previous_whitespace = true;
            }
        } else if ch.is_control() {
            continue;
        } else {
            sanitized.push(ch);
            previous_whitespace = false;
        }
    }

    sanitized
}

fn sanitize_multiline_text(input: &str) -> String {
    let lines: Vec<String> = input.lines().map(sanitize_inline_text).collect();

    let mut result: Vec<String> = Vec::with_capacity(lines.len());
    let mut previous_empty = false;
    for line in lines {
        let is_empty = line.is_empty();
        if is_empty && (previous_empty || result.is_empty()) {
            continue;
        }
        previous_empty = is_empty;
        result.push(line);
    }

    while matches!(result.last(), Some(line) if line.is_empty()) {
        result.pop();
    }

    result.join("\n")
}
