//! Helpers for integration tests.

use diesel::prelude::*;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

use pushkind_common::db::{DbPool, establish_connection_pool};
use pushkind_common::domain::auth::AuthenticatedUser;
use pushkind_products::domain::product_tag::ProductTag;
use pushkind_products::models::product_tag::ProductTag as DbProductTag;
use pushkind_products::models::{brand::NewBrand, category::NewCategory, tag::NewTag};
use pushkind_products::schema::{brands, categories, product_tags, products, tags};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// Temporary database used in integration tests.
pub struct TestDb {
    filename: String,
    pool: DbPool,
}

impl TestDb {
    pub fn new(filename: &str) -> Self {
        std::fs::remove_file(filename).ok(); // Clean up old DB

        let pool =
            establish_connection_pool(filename).expect("Failed to establish SQLite connection.");
        let mut conn = pool
            .get()
            .expect("Failed to get SQLite connection from pool.");
        conn.run_pending_migrations(MIGRATIONS)
            .expect("Migrations failed");
        TestDb {
            filename: filename.to_string(),
            pool,
        }
    }

    pub fn pool(&self) -> DbPool {
        self.pool.clone()
    }

    /// Insert the category, brand and tags a product can reference.
    pub fn seed_catalog(&self, category_id: &str, brand_id: &str, tag_ids: &[&str]) {
        let mut conn = self.pool.get().expect("connection");

        diesel::insert_into(categories::table)
            .values(&NewCategory {
                id: category_id,
                name: "Lighting",
            })
            .execute(&mut conn)
            .expect("insert category");

        diesel::insert_into(brands::table)
            .values(&NewBrand {
                id: brand_id,
                name: "Lumen",
            })
            .execute(&mut conn)
            .expect("insert brand");

        for &tag_id in tag_ids {
            diesel::insert_into(tags::table)
                .values(&NewTag {
                    id: tag_id,
                    name: tag_id,
                })
                .execute(&mut conn)
                .expect("insert tag");
        }
    }

    pub fn count_products(&self) -> i64 {
        let mut conn = self.pool.get().expect("connection");
        products::table
            .count()
            .get_result(&mut conn)
            .expect("count products")
    }

    pub fn tag_ids_for(&self, product_id: &str) -> Vec<String> {
        let mut conn = self.pool.get().expect("connection");
        let links: Vec<ProductTag> = product_tags::table
            .filter(product_tags::product_id.eq(product_id))
            .load::<DbProductTag>(&mut conn)
            .expect("load product tags")
            .into_iter()
            .map(ProductTag::from)
            .collect();
        assert!(links.iter().all(|link| link.product_id == product_id));
        let mut ids: Vec<String> = links.into_iter().map(|link| link.tag_id).collect();
        ids.sort();
        ids
    }

    pub fn count_product_tags(&self) -> i64 {
        let mut conn = self.pool.get().expect("connection");
        product_tags::table
            .count()
            .get_result(&mut conn)
            .expect("count product tags")
    }
}

impl Drop for TestDb {
    fn drop(&mut self) {
        std::fs::remove_file(&self.filename).ok();
        std::fs::remove_file(format!("{}-shm", &self.filename)).ok();
        std::fs::remove_file(format!("{}-wal", &self.filename)).ok();
    }
}

pub fn authenticated_user() -> AuthenticatedUser {
    AuthenticatedUser {
        sub: "user".into(),
        email: "user@example.com".into(),
        hub_id: 1,
        name: "User".into(),
        roles: vec![],
        exp: (chrono::Utc::now() + chrono::Duration::days(1)).timestamp() as _,
    }
}
