use actix_web::{get, http::StatusCode, web::Data, HttpRequest, HttpResponse};

use super::path_id;
use crate::app::{response::respond, AppError, AppState};

/// Pipe for getting the blogs written by a user, newest first
/// - url: `{domain}/api/users/{user_id}/blogs`
///
/// # Response
/// ## Ok
/// - envelope whose `data` is the array of the user's blogs
/// ## Error
/// - Bad request
/// - Not found
/// - Internal server error
#[get("/api/users/{user_id}/blogs")]
pub async fn get_blogs_by_user(
    req: HttpRequest,
    app_state: Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let user_id = path_id(&req, "user_id").ok_or(AppError::Validation("Invalid user ID"))?;

    let blogs = app_state
        .run(move |store| {
            if !store.user_exists(user_id)? {
                return Ok(None);
            }
            store.list_blogs_by_author(user_id).map(Some)
        })
        .await
        .map_err(|err| AppError::internal("Error fetching blogs", err))?
        .ok_or(AppError::NotFound("User not found"))?;

    Ok(respond(StatusCode::OK, "Blogs fetched successfully!", blogs))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::test::{self, call_service};
    use actix_web::App;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use crate::database::memory::MemoryStore;
    use crate::routes::{
        configure,
        testing::{app_state, read_envelope, seed_blog},
    };

    #[actix_rt::test]
    async fn test_get_blogs_by_user() {
        let store = Arc::new(MemoryStore::with_users(&[9, 10, 11]));
        let older = seed_blog(&store, 9, "older");
        let newer = seed_blog(&store, 9, "newer");
        seed_blog(&store, 10, "someone else");
        let app = test::init_service(App::new().app_data(app_state(&store)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/users/9/blogs").to_request();
        let (status, body) = read_envelope(call_service(&app, req).await).await;

        assert_eq!(status, 200);
        let ids: Vec<i64> = body["data"]
            .as_array()
            .unwrap()
            .iter()
            .map(|blog| blog["id"].as_i64().unwrap())
            .collect();
        assert_eq!(ids, vec![newer.id as i64, older.id as i64]);

        let req = test::TestRequest::get().uri("/api/users/11/blogs").to_request();
        let (status, body) = read_envelope(call_service(&app, req).await).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"], json!([]));
    }

    #[actix_rt::test]
    async fn test_get_blogs_by_unknown_user() {
        let store = Arc::new(MemoryStore::default());
        let app = test::init_service(App::new().app_data(app_state(&store)).configure(configure)).await;

        let req = test::TestRequest::get().uri("/api/users/5/blogs").to_request();
        let (status, body) = read_envelope(call_service(&app, req).await).await;
        assert_eq!(status, 404);
        assert_eq!(body, json!({ "success": false, "message": "User not found" }));

        let req = test::TestRequest::get().uri("/api/users/five/blogs").to_request();
        let (status, _) = read_envelope(call_service(&app, req).await).await;
        assert_eq!(status, 400);
    }
}
