use actix_web::{
    get,
    http::StatusCode,
    post,
    web::{Data, Payload},
    HttpRequest, HttpResponse,
};
use serde_json::Value;

use super::{blog_and_caller, path_id, read_json};
use crate::{
    app::{response::respond, AppError, AppState},
    auth::Caller,
    database::{models::comment::NewComment, store::StoreError},
};

/// Pipe for commenting on a blog as the caller
/// - url: `{domain}/api/blogs/{blog_id}/comment`
///
/// # HTTP request requirements
/// ## header
/// - `x-user-id`: id of the commenting user
/// ## body
/// - json with a non-empty string `content`
///
/// # Response
/// ## Created
/// ```
/// {
///     "success": true,
///     "message": "Comment added successfully!",
///     "data": { "id": 3, "content": "Nice", "blogId": 7, "userId": 9, "createdAt": "..." }
/// }
/// ```
/// ## Error
/// - Bad request
/// - Not found, when either the blog or the user does not exist
/// - Internal server error
#[post("/api/blogs/{blog_id}/comment")]
pub async fn create_comment(
    req: HttpRequest,
    caller: Result<Caller, AppError>,
    payload: Payload,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (blog_id, caller) = blog_and_caller(&req, caller)?;

    let body: Value = read_json(payload).await?;
    let content = body
        .get("content")
        .and_then(Value::as_str)
        .filter(|content| !content.is_empty())
        .ok_or(AppError::Validation("Invalid comment content"))?
        .to_string();

    let blog = app_state
        .run(move |store| store.find_blog(blog_id))
        .await
        .map_err(|err| AppError::internal("Error adding comment", err))?;
    if blog.is_none() {
        return Err(AppError::NotFound("Blog not found"));
    }

    let user_id = caller.id();
    let user_exists = app_state
        .run(move |store| store.user_exists(user_id))
        .await
        .map_err(|err| AppError::internal("Error adding comment", err))?;
    if !user_exists {
        return Err(AppError::NotFound("User not found"));
    }

    let comment = app_state
        .run(move |store| store.create_comment(NewComment::new(blog_id, user_id, content)))
        .await
        .map_err(|err| match err {
            StoreError::MissingReference => AppError::NotFound("Blog not found"),
            err => AppError::internal("Error adding comment", err),
        })?;

    Ok(respond(StatusCode::CREATED, "Comment added successfully!", comment))
}

/// Pipe for getting the comments of a blog, oldest first
/// - url: `{domain}/api/blogs/{blog_id}/comments`
#[get("/api/blogs/{blog_id}/comments")]
pub async fn get_comments(
    req: HttpRequest,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let blog_id = path_id(&req, "blog_id").ok_or(AppError::Validation("Invalid blog ID"))?;

    let comments = app_state
        .run(move |store| match store.find_blog(blog_id)? {
            Some(_) => store.comments_for_blog(blog_id).map(Some),
            None => Ok(None),
        })
        .await
        .map_err(|err| AppError::internal("Error fetching comments", err))?
        .ok_or(AppError::NotFound("Blog not found"))?;

    Ok(respond(StatusCode::OK, "Comments fetched successfully!", comments))
}
