use actix_web::{delete, http::StatusCode, post, web::Data, HttpRequest, HttpResponse};
use log::info;

use super::blog_and_caller;
use crate::{
    app::{AppError, AppState, response::respond},
    auth::Caller,
    database::{models::like::LikeRef, store::StoreError},
};

/// Pipe for liking a blog as the caller
/// - url: `{domain}/api/blogs/{blog_id}/like`
///
/// A user likes a blog at most once. The unique (blog, user) constraint in
/// storage decides; a second like is answered with bad request.
///
/// # HTTP request requirements
/// ## header
/// - `x-user-id`: id of the liking user
///
/// # Response
/// ## Created
/// ```
/// { "success": true, "message": "Blog liked successfully!", "data": { "blogId": 7, "userId": 9 } }
/// ```
/// ## Error
/// - Bad request, also when the blog is already liked by the user
/// - Not found
/// - Internal server error
#[post("/api/blogs/{blog_id}/like")]
pub async fn like_blog(
    req: HttpRequest,
    caller: Result<Caller, AppError>,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (blog_id, caller) = blog_and_caller(&req, caller)?;
    let user_id = caller.id();

    let (blog_exists, user_exists) = app_state
        .run(move |store| {
            Ok((store.find_blog(blog_id)?.is_some(), store.user_exists(user_id)?))
        })
        .await
        .map_err(|err| AppError::internal("Error liking blog", err))?;
    if !blog_exists {
        return Err(AppError::NotFound("Blog not found"));
    }
    if !user_exists {
        return Err(AppError::NotFound("User not found"));
    }

    let like = app_state
        .run(move |store| store.create_like(blog_id, user_id))
        .await
        .map_err(like_error)?;
    info!("User {} liked blog {} (like {} at {})", user_id, blog_id, like.id, like.created_at);

    Ok(respond(StatusCode::CREATED, "Blog liked successfully!", LikeRef::from(&like)))
}

/// The blog or user can vanish between the existence checks and the insert;
/// the foreign key then rejects the like and it is reported as not found.
fn like_error(err: StoreError) -> AppError {
    match err {
        StoreError::Conflict => AppError::Conflict("Blog already liked by the user"),
        StoreError::MissingReference => AppError::NotFound("Blog not found"),
        err => AppError::internal("Error liking blog", err),
    }
}

/// Pipe for taking back the caller's like
/// - url: `{domain}/api/blogs/{blog_id}/like`
///
/// # Response
/// ## Ok
/// - `{ "blogId": 7, "userId": 9 }` in `data`
/// ## Error
/// - Bad request
/// - Not found, when the caller has not liked the blog
/// - Internal server error
#[delete("/api/blogs/{blog_id}/like")]
pub async fn unlike_blog(
    req: HttpRequest,
    caller: Result<Caller, AppError>,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (blog_id, caller) = blog_and_caller(&req, caller)?;
    let user_id = caller.id();

    let removed = app_state
        .run(move |store| store.delete_like(blog_id, user_id))
        .await
        .map_err(|err| AppError::internal("Error unliking blog", err))?;
    if !removed {
        return Err(AppError::NotFound("Like not found"));
    }

    Ok(respond(
        StatusCode::OK,
        "Blog unliked successfully!",
        LikeRef { blog_id, user_id },
    ))
}
