use actix_web::{
    delete, get,
    http::StatusCode,
    post, put,
    web::{Data, Payload},
    HttpRequest, HttpResponse,
};
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};

use super::{blog_and_caller, path_id, read_json};
use crate::{
    app::{response::respond, AppError, AppState},
    auth::Caller,
    database::models::{
        blog::{Blog, NewBlog},
        comment::CommentSummary,
    },
};

/// Body accepted by create and update. Unknown keys such as `tags` are ignored.
#[derive(Deserialize)]
struct BlogRequestBody {
    title: Option<String>,
    content: Option<String>,
}

impl BlogRequestBody {
    /// Title and content, when both are present and non-empty.
    fn into_fields(self) -> Option<(String, String)> {
        let title = self.title.filter(|title| !title.is_empty())?;
        let content = self.content.filter(|content| !content.is_empty())?;
        Some((title, content))
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BlogDetail {
    id: i32,
    title: String,
    content: String,
    author_id: i32,
    comments: Vec<CommentSummary>,
    likes: i64,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Pipe for listing every blog
/// - url: `{domain}/api/blogs`
///
/// # Response
/// ## Ok
/// - envelope whose `data` is the array of [blogs](Blog)
/// ```
/// {
///     "success": true,
///     "message": "Blogs fetched successfully!",
///     "data": [
///         {
///             "id": 73,
///             "title": "Blog title",
///             "content": "Blog content",
///             "authorId": 9,
///             "createdAt": "2024-05-04T09:22:30.664361Z",
///             "updatedAt": "2024-05-04T09:22:30.664361Z"
///         }
///     ]
/// }
/// ```
/// ## Error
/// - Internal server error
#[get("/api/blogs")]
pub async fn list_blogs(app_state: Data<AppState>) -> Result<HttpResponse, AppError> {
    let blogs = app_state
        .run(|store| store.list_blogs())
        .await
        .map_err(|err| AppError::internal("Error fetching blogs", err))?;

    Ok(respond(StatusCode::OK, "Blogs fetched successfully!", blogs))
}

/// Pipe for creating a new blog authored by the caller
/// - url: `{domain}/api/blogs`
///
/// # HTTP request requirements
/// ## header
/// - `x-user-id`: id of the authenticated user
/// ## body
/// - json with non-empty `title` and `content`, optional `tags`
///
/// # Response
/// ## Created
/// - the created [Blog]
/// ## Error
/// - Bad request
/// - Internal server error
#[post("/api/blogs")]
pub async fn create_blog(
    caller: Caller,
    payload: Payload,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (title, content) = read_json::<BlogRequestBody>(payload)
        .await?
        .into_fields()
        .ok_or(AppError::Validation("Title and content are required"))?;

    let new_blog = NewBlog::new(caller.id(), title, content);
    let blog = app_state
        .run(move |store| store.create_blog(new_blog))
        .await
        .map_err(|err| AppError::internal("Error creating blog", err))?;
    info!("User {} created blog {}", blog.author_id, blog.id);

    Ok(respond(StatusCode::CREATED, "Blog created successfully!", blog))
}

/// Pipe for reading one blog with its comments and like count
/// - url: `{domain}/api/blogs/{blog_id}`
///
/// # Response
/// ## Ok
/// ```
/// {
///     "success": true,
///     "message": "Blog fetched successfully!",
///     "data": {
///         "id": 7,
///         "title": "Blog title",
///         "content": "Blog content",
///         "authorId": 9,
///         "comments": [{ "id": 3, "userId": 4, "content": "Nice", "createdAt": "..." }],
///         "likes": 2,
///         "createdAt": "...",
///         "updatedAt": "..."
///     }
/// }
/// ```
/// ## Error
/// - Bad request
/// - Not found
/// - Internal server error
#[get("/api/blogs/{blog_id}")]
pub async fn get_blog(req: HttpRequest, app_state: Data<AppState>) -> Result<HttpResponse, AppError> {
    let blog_id = path_id(&req, "blog_id").ok_or(AppError::Validation("Invalid blog ID"))?;

    let detail = app_state
        .run(move |store| {
            let blog = match store.find_blog(blog_id)? {
                Some(blog) => blog,
                None => return Ok(None),
            };
            let comments = store.comments_for_blog(blog_id)?;
            let likes = store.count_likes(blog_id)?;

            Ok(Some(BlogDetail {
                id: blog.id,
                title: blog.title,
                content: blog.content,
                author_id: blog.author_id,
                comments: comments.into_iter().map(CommentSummary::from).collect(),
                likes,
                created_at: blog.created_at,
                updated_at: blog.updated_at,
            }))
        })
        .await
        .map_err(|err| AppError::internal("Error fetching blog", err))?
        .ok_or(AppError::NotFound("Blog not found"))?;

    Ok(respond(StatusCode::OK, "Blog fetched successfully!", detail))
}

/// Pipe for editing a blog the caller wrote
/// - url: `{domain}/api/blogs/{blog_id}`
///
/// # HTTP request requirements
/// ## header
/// - `x-user-id`: id of the author
/// ## body
/// - json with non-empty `title` and `content`
///
/// # Response
/// ## Ok
/// - the [Blog] as stored after the edit
/// ## Error
/// - Bad request
/// - Not found, also when the caller is not the author
/// - Internal server error
#[put("/api/blogs/{blog_id}")]
pub async fn update_blog(
    req: HttpRequest,
    caller: Result<Caller, AppError>,
    payload: Payload,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (blog_id, caller) = blog_and_caller(&req, caller)?;
    let (title, content) = read_json::<BlogRequestBody>(payload)
        .await?
        .into_fields()
        .ok_or(AppError::Validation("Missing required fields"))?;

    let author_id = caller.id();
    let blog: Blog = app_state
        .run(move |store| store.update_blog(blog_id, author_id, title, content))
        .await
        .map_err(|err| AppError::internal("Error updating blog", err))?
        .ok_or(AppError::NotFound("Blog not found or does not belong to user"))?;

    Ok(respond(StatusCode::OK, "Blog updated successfully!", blog))
}

/// Pipe for deleting a blog the caller wrote, together with its comments and likes
/// - url: `{domain}/api/blogs/{blog_id}`
///
/// # Response
/// ## Ok
/// - snapshot of the deleted [Blog]
/// ## Error
/// - Bad request
/// - Not found, also when the caller is not the author
/// - Internal server error
#[delete("/api/blogs/{blog_id}")]
pub async fn delete_blog(
    req: HttpRequest,
    caller: Result<Caller, AppError>,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let (blog_id, caller) = blog_and_caller(&req, caller)?;

    let author_id = caller.id();
    let blog = app_state
        .run(move |store| store.delete_blog(blog_id, author_id))
        .await
        .map_err(|err| AppError::internal("Error deleting blog", err))?
        .ok_or(AppError::NotFound("Blog not found or does not belong to user"))?;
    info!("User {} deleted blog {}", author_id, blog.id);

    Ok(respond(StatusCode::OK, "Blog deleted successfully!", blog))
}
