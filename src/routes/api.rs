use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use actix_web::{HttpResponse, Responder, get, post, web};
use pushkind_common::domain::auth::AuthenticatedUser;
use serde::Deserialize;

use crate::repository::DieselRepository;
use crate::routes::responses::{ApiResponse, error_response};
use crate::services::{ServiceError, products};

/// Query parameters accepted by `GET /api/product`.
#[derive(Debug, Default, Deserialize)]
pub struct ProductQuery {
    /// Identifier of a single product; an empty value lists every product.
    pub id: Option<String>,
}

/// Largest request body accepted by `POST /api/product`.
pub const PRODUCT_PAYLOAD_LIMIT: usize = 1024 * 1024;

const UNAUTHORIZED_MESSAGE: &str = "You are Unauthorized. Please login to your account";

#[post("/api/product")]
/// Create a product from a JSON body.
///
/// Responds with plain-text bodies: `401 Unauthorized` without a session,
/// `422` carrying the validation message, `500` for any other failure.
/// A body that cannot be read (over the payload limit) is one of those
/// other failures, reported only after the session check.
pub async fn create_product(
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
    body: Option<web::Bytes>,
) -> impl Responder {
    match products::create_product(repo.get_ref(), user.as_ref(), body.as_deref()) {
        Ok(_) => HttpResponse::Ok()
            .content_type(ContentType::plaintext())
            .body("Product created successfully!"),
        Err(ServiceError::Unauthorized) => HttpResponse::Unauthorized()
            .content_type(ContentType::plaintext())
            .body("Unauthorized"),
        Err(ServiceError::Validation(message)) => {
            log::error!("Rejected product payload: {message}");
            HttpResponse::UnprocessableEntity()
                .content_type(ContentType::plaintext())
                .body(message)
        }
        Err(err) => {
            log::error!("Failed to create product: {err}");
            HttpResponse::InternalServerError()
                .content_type(ContentType::plaintext())
                .body("Could not create product")
        }
    }
}

#[get("/api/product")]
/// Return one product when `id` is given, otherwise every product, wrapped in
/// the JSON envelope. Unknown ids yield `data: null` with status 200.
pub async fn get_products(
    params: web::Query<ProductQuery>,
    user: Option<AuthenticatedUser>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let user = user.as_ref();
    let id = params.into_inner().id.filter(|id| !id.is_empty());

    match id {
        Some(id) => match products::load_product(repo.get_ref(), user, &id) {
            Ok(product) => HttpResponse::Ok().json(ApiResponse::success(
                "Product fetched successfully!",
                product,
            )),
            Err(ServiceError::Unauthorized) => {
                error_response(StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE)
            }
            Err(err) => {
                log::error!("Failed to fetch product {id}: {err}");
                error_response(StatusCode::INTERNAL_SERVER_ERROR, "Unable to fetch product")
            }
        },
        None => match products::load_products(repo.get_ref(), user) {
            Ok(items) => HttpResponse::Ok().json(ApiResponse::success(
                "Products fetched successfully!",
                items,
            )),
            Err(ServiceError::Unauthorized) => {
                error_response(StatusCode::UNAUTHORIZED, UNAUTHORIZED_MESSAGE)
            }
            Err(err) => {
                log::error!("Unable to fetch products: {err}");
                error_response(StatusCode::UNPROCESSABLE_ENTITY, "Unable to fetch products")
            }
        },
    }
}
