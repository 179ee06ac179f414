use askama::Template;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse},
};

use crate::AppState;
use crate::cache::HomeCacheOperations;

use super::model::{BlogCard, CourseCard, HomeData};

#[derive(Template)]
#[template(path = "index.html")]
struct IndexTemplate<'a> {
    blogs: &'a [BlogCard],
    free_courses: &'a [CourseCard],
    paid_courses: &'a [CourseCard],
}

/// 首页：先查缓存，未命中再查库并回填缓存
#[axum::debug_handler]
pub async fn index(State(state): State<AppState>) -> impl IntoResponse {
    // 缓存命中时直接使用，不再校验数据库内容是否更新
    let cached = match HomeCacheOperations::get_home(&state.redis).await {
        Ok(cached) => cached,
        Err(e) => {
            tracing::error!("Failed to read home cache: {}", e);
            return (StatusCode::INTERNAL_SERVER_ERROR, "内部服务器错误").into_response();
        }
    };

    let home = match cached {
        Some(home) => home,
        None => {
            let home = match HomeData::load(&state.pool).await {
                Ok(home) => home,
                Err(e) => {
                    tracing::error!("Failed to load home data: {}", e);
                    return (StatusCode::INTERNAL_SERVER_ERROR, "内部服务器错误").into_response();
                }
            };

            if let Err(e) = HomeCacheOperations::cache_home(&state.redis, &home).await {
                tracing::error!("Failed to populate home cache: {}", e);
                return (StatusCode::INTERNAL_SERVER_ERROR, "内部服务器错误").into_response();
            }

            home
        }
    };

    let template = IndexTemplate {
        blogs: &home.blogs,
        free_courses: &home.free_courses,
        paid_courses: &home.paid_courses,
    };

    match template.render() {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Failed to render index template: {}", e);
            (StatusCode::INTERNAL_SERVER_ERROR, "内部服务器错误").into_response()
        }
    }
}
