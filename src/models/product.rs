use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};

#[derive(Debug, Clone, Identifiable, Queryable, Selectable)]
#[diesel(table_name = crate::schema::products)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub image: String,
    pub description: String,
    pub price: f64,
    pub category_id: String,
    pub brand_id: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::products)]
pub struct NewProduct<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub image: &'a str,
    pub description: &'a str,
    pub price: f64,
    pub category_id: &'a str,
    pub brand_id: &'a str,
}

impl From<Product> for DomainProduct {
    fn from(value: Product) -> Self {
        Self {
            id: value.id,
            name: value.name,
            image: value.image,
            description: value.description,
            price: value.price,
            category_id: value.category_id,
            brand_id: value.brand_id,
            created_at: value.created_at,
            updated_at: value.updated_at,
        }
    }
}

impl<'a> NewProduct<'a> {
    /// Borrow the domain payload as an insertable row under the given identifier.
    pub fn with_id(id: &'a str, value: &'a DomainNewProduct) -> Self {
        Self {
            id,
            name: value.name.as_str(),
            image: value.image.as_str(),
            description: value.description.as_str(),
            price: value.price,
            category_id: value.category_id.as_str(),
            brand_id: value.brand_id.as_str(),
        }
    }
}
