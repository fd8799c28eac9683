pub mod blog;
pub mod comment;
pub mod like;
pub mod user;

use actix_web::{
    web::{BytesMut, Payload, ServiceConfig},
    HttpRequest,
};
use futures::StreamExt as _;
use serde::de::DeserializeOwned;

use crate::{app::AppError, auth::Caller};

/// Largest request body accepted, in bytes.
const MAX_BODY_SIZE: usize = 256 * 1024;

/// Registers every endpoint of the API.
pub fn configure(cfg: &mut ServiceConfig) {
    cfg
        //Blog routes
        .service(blog::list_blogs)
        .service(blog::create_blog)
        .service(blog::get_blog)
        .service(blog::update_blog)
        .service(blog::delete_blog)
        //Comment routes
        .service(comment::create_comment)
        .service(comment::get_comments)
        //Like routes
        .service(like::like_blog)
        .service(like::unlike_blog)
        //User routes
        .service(user::get_blogs_by_user);
}

/// Reads a positive integer id from the matched path segment `name`.
fn path_id(req: &HttpRequest, name: &str) -> Option<i32> {
    req.match_info()
        .query(name)
        .parse::<i32>()
        .ok()
        .filter(|id| *id > 0)
}

/// The blog id from the path plus the caller, both required.
fn blog_and_caller(
    req: &HttpRequest,
    caller: Result<Caller, AppError>,
) -> Result<(i32, Caller), AppError> {
    match (path_id(req, "blog_id"), caller) {
        (Some(blog_id), Ok(caller)) => Ok((blog_id, caller)),
        _ => Err(AppError::Validation("Invalid blog ID or user ID")),
    }
}

/// Reads the whole request body and decodes it as json. Unreadable,
/// oversized and malformed bodies are all validation errors.
async fn read_json<T: DeserializeOwned>(mut payload: Payload) -> Result<T, AppError> {
    let mut body = BytesMut::new();

    while let Some(chunk) = payload.next().await {
        let chunk = chunk.map_err(|_| AppError::Validation("Invalid request body"))?;
        if body.len() + chunk.len() > MAX_BODY_SIZE {
            return Err(AppError::Validation("Request body too large"));
        }
        body.extend_from_slice(&chunk);
    }

    serde_json::from_slice(&body).map_err(|_| AppError::Validation("Invalid request body"))
}
