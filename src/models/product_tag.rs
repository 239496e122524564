use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product_tag::{
    NewProductTag as DomainNewProductTag, ProductTag as DomainProductTag,
};

#[derive(Debug, Clone, Identifiable, Queryable, Associations, Selectable)]
#[diesel(
    table_name = crate::schema::product_tags,
    belongs_to(super::product::Product, foreign_key = product_id),
    belongs_to(super::tag::Tag, foreign_key = tag_id)
)]
pub struct ProductTag {
    pub id: String,
    pub product_id: String,
    pub tag_id: String,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::product_tags)]
pub struct NewProductTag<'a> {
    pub id: String,
    pub product_id: &'a str,
    pub tag_id: &'a str,
}

impl From<ProductTag> for DomainProductTag {
    fn from(value: ProductTag) -> Self {
        Self {
            id: value.id,
            product_id: value.product_id,
            tag_id: value.tag_id,
            created_at: value.created_at,
        }
    }
}

impl<'a> From<&'a DomainNewProductTag> for NewProductTag<'a> {
    fn from(value: &'a DomainNewProductTag) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            product_id: value.product_id.as_str(),
            tag_id: value.tag_id.as_str(),
        }
    }
}
