use axum::Json;
use utoipa::OpenApi;

use crate::resources::{CommentResource, ThreadResource};
use crate::routes::{comments, health, threads};

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        threads::list_threads,
        threads::create_thread,
        threads::get_thread,
        threads::update_thread,
        threads::delete_thread,
        comments::list_comments,
        comments::create_comment,
        comments::get_comment,
        comments::update_comment,
        comments::delete_comment,
    ),
    components(schemas(ThreadResource, CommentResource, health::HealthResponse)),
    tags(
        (name = "threads", description = "Discussion threads"),
        (name = "comments", description = "Comments, always scoped to their thread"),
        (name = "health", description = "Service health")
    )
)]
pub struct ApiDoc;

pub async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}
