use pushkind_common::domain::auth::AuthenticatedUser;

use crate::domain::product::Product;
use crate::forms::products::AddProductForm;
use crate::repository::{ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Validates the raw JSON `body` and stores the product with its tag links.
///
/// The session is checked before the body is looked at, so anonymous callers
/// never reach the parser or the repository. `body` is `None` when the
/// request payload could not be read (for example, it exceeded the limit).
pub fn create_product<R>(
    repo: &R,
    user: Option<&AuthenticatedUser>,
    body: Option<&[u8]>,
) -> ServiceResult<Product>
where
    R: ProductWriter + ?Sized,
{
    if user.is_none() {
        return Err(ServiceError::Unauthorized);
    }

    let Some(body) = body else {
        return Err(ServiceError::Malformed(
            "request body could not be read".to_string(),
        ));
    };

    let new_product = AddProductForm::from_json(body)
        .and_then(AddProductForm::into_new_product)
        .map_err(ServiceError::from)?;

    let created = repo
        .create_product(&new_product)
        .map_err(ServiceError::from)?;

    log::info!("Created product: {created:?}");

    Ok(created)
}

/// Loads a single product. A missing record is not an error.
pub fn load_product<R>(
    repo: &R,
    user: Option<&AuthenticatedUser>,
    id: &str,
) -> ServiceResult<Option<Product>>
where
    R: ProductReader + ?Sized,
{
    if user.is_none() {
        return Err(ServiceError::Unauthorized);
    }

    repo.get_product_by_id(id).map_err(ServiceError::from)
}

/// Loads every stored product.
pub fn load_products<R>(repo: &R, user: Option<&AuthenticatedUser>) -> ServiceResult<Vec<Product>>
where
    R: ProductReader + ?Sized,
{
    if user.is_none() {
        return Err(ServiceError::Unauthorized);
    }

    repo.list_products().map_err(ServiceError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use pushkind_common::repository::errors::RepositoryError;
    use serde_json::json;

    use crate::repository::mock::{MockProductReader, MockProductWriter};

    fn datetime() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 1)
            .and_then(|date| date.and_hms_opt(0, 0, 0))
            .unwrap_or_default()
    }

    fn sample_product(id: &str, name: &str) -> Product {
        Product {
            id: id.to_string(),
            name: name.to_string(),
            image: String::new(),
            description: "Sample".to_string(),
            price: 10.0,
            category_id: "cat-1".to_string(),
            brand_id: "brand-1".to_string(),
            created_at: datetime(),
            updated_at: datetime(),
        }
    }

    fn user() -> AuthenticatedUser {
        AuthenticatedUser {
            sub: "user".to_string(),
            email: "user@example.com".to_string(),
            hub_id: 1,
            name: "User".to_string(),
            roles: Vec::new(),
            exp: 0,
        }
    }

    fn valid_body() -> Vec<u8> {
        serde_json::to_vec(&json!({
            "name": "Lamp",
            "description": "Desk lamp",
            "category": "cat-1",
            "brand": "brand-1",
            "price": 25,
            "tags": ["tag-1"]
        }))
        .expect("serialize body")
    }

    #[test]
    fn create_product_requires_session() {
        // No expectations: any repository call fails the test.
        let repo = MockProductWriter::new();

        let result = create_product(&repo, None, Some(valid_body().as_slice()));

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn create_product_checks_session_before_parsing() {
        let repo = MockProductWriter::new();

        let result = create_product(&repo, None, Some(&b"not json"[..]));

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn create_product_rejects_missing_fields_without_storing() {
        let repo = MockProductWriter::new();
        let user = user();
        let body = serde_json::to_vec(&json!({ "name": "Lamp" })).expect("serialize body");

        let result = create_product(&repo, Some(&user), Some(body.as_slice()));

        match result {
            Err(ServiceError::Validation(message)) => {
                assert!(message.contains("description"), "unexpected message: {message}");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_product_reports_malformed_body() {
        let repo = MockProductWriter::new();
        let user = user();

        let result = create_product(&repo, Some(&user), Some(&b"{"[..]));

        assert!(matches!(result, Err(ServiceError::Malformed(_))));
    }

    #[test]
    fn create_product_rejects_unreadable_body_after_session_check() {
        let repo = MockProductWriter::new();
        let user = user();

        assert!(matches!(
            create_product(&repo, None, None),
            Err(ServiceError::Unauthorized)
        ));
        assert!(matches!(
            create_product(&repo, Some(&user), None),
            Err(ServiceError::Malformed(_))
        ));
    }

    #[test]
    fn create_product_rejects_blank_category_as_validation() {
        let repo = MockProductWriter::new();
        let user = user();
        let body = serde_json::to_vec(&json!({
            "name": "Lamp",
            "description": "Desk lamp",
            "category": "   ",
            "brand": "brand-1",
            "price": 25,
            "tags": []
        }))
        .expect("serialize body");

        let result = create_product(&repo, Some(&user), Some(body.as_slice()));

        match result {
            Err(ServiceError::Validation(message)) => {
                assert!(message.contains("category"), "unexpected message: {message}");
            }
            other => panic!("expected validation error, got {other:?}"),
        }
    }

    #[test]
    fn create_product_persists_payload() {
        let mut repo = MockProductWriter::new();
        let user = user();

        repo.expect_create_product()
            .times(1)
            .withf(|new_product| {
                assert_eq!(new_product.name, "Lamp");
                assert_eq!(new_product.image, "");
                assert_eq!(new_product.category_id, "cat-1");
                assert_eq!(new_product.brand_id, "brand-1");
                assert_eq!(new_product.tag_ids, vec!["tag-1".to_string()]);
                true
            })
            .returning(|_| Ok(sample_product("p-1", "Lamp")));

        let result = create_product(&repo, Some(&user), Some(valid_body().as_slice()))
            .expect("expected success");

        assert_eq!(result.id, "p-1");
    }

    #[test]
    fn create_product_surfaces_repository_failure() {
        let mut repo = MockProductWriter::new();
        let user = user();

        repo.expect_create_product()
            .times(1)
            .returning(|_| Err(RepositoryError::NotFound));

        let result = create_product(&repo, Some(&user), Some(valid_body().as_slice()));

        assert!(matches!(
            result,
            Err(ServiceError::Repository(RepositoryError::NotFound))
        ));
    }

    #[test]
    fn load_product_requires_session() {
        let repo = MockProductReader::new();

        let result = load_product(&repo, None, "p-1");

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn load_product_returns_none_for_unknown_id() {
        let mut repo = MockProductReader::new();
        let user = user();

        repo.expect_get_product_by_id()
            .times(1)
            .withf(|id| id == "nonexistent")
            .returning(|_| Ok(None));

        let result = load_product(&repo, Some(&user), "nonexistent").expect("expected success");

        assert!(result.is_none());
    }

    #[test]
    fn load_products_requires_session() {
        let repo = MockProductReader::new();

        let result = load_products(&repo, None);

        assert!(matches!(result, Err(ServiceError::Unauthorized)));
    }

    #[test]
    fn load_products_returns_all_records() {
        let mut repo = MockProductReader::new();
        let user = user();

        repo.expect_list_products().times(1).returning(|| {
            Ok(vec![
                sample_product("p-1", "Lamp"),
                sample_product("p-2", "Chair"),
            ])
        });

        let result = load_products(&repo, Some(&user)).expect("expected success");

        assert_eq!(result.len(), 2);
        assert_eq!(result[1].name, "Chair");
    }

    #[test]
    fn load_products_surfaces_repository_failure() {
        let mut repo = MockProductReader::new();
        let user = user();

        repo.expect_list_products()
            .times(1)
            .returning(|| Err(RepositoryError::NotFound));

        let result = load_products(&repo, Some(&user));

        assert!(matches!(result, Err(ServiceError::Repository(_))));
    }
}
