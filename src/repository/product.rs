use std::collections::HashSet;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use pushkind_common::repository::errors::{RepositoryError, RepositoryResult};
use uuid::Uuid;

use crate::{
    domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct},
    domain::product_tag::NewProductTag as DomainNewProductTag,
    models::brand::Brand as DbBrand,
    models::category::Category as DbCategory,
    models::product::{NewProduct as DbNewProduct, Product as DbProduct},
    models::product_tag::NewProductTag as DbNewProductTag,
    models::tag::Tag as DbTag,
    repository::{DieselRepository, ProductReader, ProductWriter},
};

impl ProductReader for DieselRepository {
    fn get_product_by_id(&self, id: &str) -> RepositoryResult<Option<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let product = products::table
            .filter(products::id.eq(id))
            .first::<DbProduct>(&mut conn)
            .optional()?;

        Ok(product.map(DomainProduct::from))
    }

    fn list_products(&self) -> RepositoryResult<Vec<DomainProduct>> {
        use crate::schema::products;

        let mut conn = self.conn()?;
        let items = products::table
            .order((products::created_at.asc(), products::id.asc()))
            .load::<DbProduct>(&mut conn)?;

        Ok(items.into_iter().map(DomainProduct::from).collect())
    }
}

impl ProductWriter for DieselRepository {
    fn create_product(&self, new_product: &DomainNewProduct) -> RepositoryResult<DomainProduct> {
        use crate::schema::{product_tags, products};

        let mut conn = self.conn()?;

        conn.transaction::<DomainProduct, RepositoryError, _>(|conn| {
            ensure_references(conn, new_product)?;

            let product_id = Uuid::new_v4().to_string();
            let db_new = DbNewProduct::with_id(&product_id, new_product);

            let created = diesel::insert_into(products::table)
                .values(&db_new)
                .get_result::<DbProduct>(conn)?;

            if !new_product.tag_ids.is_empty() {
                let new_links: Vec<DomainNewProductTag> = new_product
                    .tag_ids
                    .iter()
                    .map(|tag_id| DomainNewProductTag::new(created.id.as_str(), tag_id.as_str()))
                    .collect();
                let links: Vec<DbNewProductTag<'_>> =
                    new_links.iter().map(DbNewProductTag::from).collect();

                diesel::insert_into(product_tags::table)
                    .values(&links)
                    .execute(conn)?;
            }

            Ok(created.into())
        })
    }
}

/// Fails with `NotFound` unless the category, the brand and every tag exist.
fn ensure_references(
    conn: &mut SqliteConnection,
    new_product: &DomainNewProduct,
) -> RepositoryResult<()> {
    use crate::schema::{brands, categories, tags};

    let category = categories::table
        .find(new_product.category_id.as_str())
        .first::<DbCategory>(conn)
        .optional()?;
    if category.is_none() {
        log::warn!("Category {} does not exist", new_product.category_id);
        return Err(RepositoryError::NotFound);
    }

    let brand = brands::table
        .find(new_product.brand_id.as_str())
        .first::<DbBrand>(conn)
        .optional()?;
    if brand.is_none() {
        log::warn!("Brand {} does not exist", new_product.brand_id);
        return Err(RepositoryError::NotFound);
    }

    if new_product.tag_ids.is_empty() {
        return Ok(());
    }

    let found: HashSet<String> = tags::table
        .filter(tags::id.eq_any(&new_product.tag_ids))
        .load::<DbTag>(conn)?
        .into_iter()
        .map(|tag| tag.id)
        .collect();

    if let Some(missing) = new_product
        .tag_ids
        .iter()
        .find(|tag_id| !found.contains(tag_id.as_str()))
    {
        log::warn!("Tag {missing} does not exist");
        return Err(RepositoryError::NotFound);
    }

    Ok(())
}
