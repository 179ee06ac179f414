use std::path::Path;

use axum::{
    Json,
    extract::{Multipart, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::Serialize;

use crate::{
    AppState,
    cache::HomeCacheOperations,
    utils::{ApiResponse, error_codes, error_to_api_response, success_to_api_response},
};

use super::model::{NewBlog, NewCourse};
use super::upload::{UploadError, read_upload_form};

#[derive(Debug, Serialize)]
pub struct AddCourseResponse {}

#[derive(Debug, Serialize)]
pub struct AddBlogResponse {}

// 上传失败统一映射：客户端错误 400，解析和基础设施错误 500
fn upload_error_response<T>(e: UploadError) -> (StatusCode, Json<ApiResponse<T>>) {
    match e {
        UploadError::Parse(detail) => {
            tracing::error!("Form parsing error: {}", detail);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "解析表单数据失败".to_string()),
            )
        }
        UploadError::NoImage => (
            StatusCode::BAD_REQUEST,
            error_to_api_response(error_codes::VALIDATION_ERROR, "未上传图片".to_string()),
        ),
        UploadError::ImageTooLarge(size) => {
            tracing::error!("Image size exceeds limit: {}", size);
            (
                StatusCode::BAD_REQUEST,
                error_to_api_response(
                    error_codes::VALIDATION_ERROR,
                    "图片大小超过5MB限制".to_string(),
                ),
            )
        }
        UploadError::MissingField(name) => (
            StatusCode::BAD_REQUEST,
            error_to_api_response(error_codes::VALIDATION_ERROR, format!("缺少字段 {}", name)),
        ),
        UploadError::Io(e) => {
            tracing::error!("Upload staging error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "内部服务器错误".to_string()),
            )
        }
    }
}

// 新内容入库后尽力使首页缓存失效，失败只记录日志
async fn invalidate_home_cache(state: &AppState) {
    if let Err(e) = HomeCacheOperations::remove_home(&state.redis).await {
        tracing::warn!("Failed to invalidate home cache: {}", e);
    }
}

#[axum::debug_handler]
pub async fn add_course(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut form = match read_upload_form(
        &mut multipart,
        "courseImage",
        Path::new(&state.config.upload_dir),
    )
    .await
    {
        Ok(form) => form,
        Err(e) => return upload_error_response(e),
    };

    let coursename = match form.take("coursename") {
        Ok(value) => value,
        Err(e) => return upload_error_response(e),
    };
    let price_raw = match form.take("price") {
        Ok(value) => value,
        Err(e) => return upload_error_response(e),
    };
    let course_type = match form.take("coursetype") {
        Ok(value) => value,
        Err(e) => return upload_error_response(e),
    };
    let link = match form.take("courselink") {
        Ok(value) => value,
        Err(e) => return upload_error_response(e),
    };

    let price = match price_raw.trim().parse::<f64>() {
        Ok(price) => price,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                error_to_api_response(error_codes::VALIDATION_ERROR, "价格格式无效".to_string()),
            );
        }
    };

    let course = NewCourse {
        image: form.image,
        coursename,
        price,
        course_type,
        link,
    };

    match course.insert(&state.pool).await {
        Ok(()) => {
            invalidate_home_cache(&state).await;
            (StatusCode::OK, success_to_api_response(AddCourseResponse {}))
        }
        Err(e) => {
            tracing::error!("Database insertion error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "数据库错误".to_string()),
            )
        }
    }
}

#[axum::debug_handler]
pub async fn add_blog(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> impl IntoResponse {
    let mut form = match read_upload_form(
        &mut multipart,
        "BlogImage",
        Path::new(&state.config.upload_dir),
    )
    .await
    {
        Ok(form) => form,
        Err(e) => return upload_error_response(e),
    };

    let title = match form.take("BlogTitle") {
        Ok(value) => value,
        Err(e) => return upload_error_response(e),
    };
    let description = match form.take("BlogDescription") {
        Ok(value) => value,
        Err(e) => return upload_error_response(e),
    };
    let category = match form.take("BlogCategory") {
        Ok(value) => value,
        Err(e) => return upload_error_response(e),
    };
    let link = match form.take("bloglink") {
        Ok(value) => value,
        Err(e) => return upload_error_response(e),
    };

    let blog = NewBlog {
        title,
        description,
        image: form.image,
        category,
        link,
    };

    match blog.insert(&state.pool).await {
        Ok(()) => {
            invalidate_home_cache(&state).await;
            (StatusCode::OK, success_to_api_response(AddBlogResponse {}))
        }
        Err(e) => {
            tracing::error!("Database insertion error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "数据库错误".to_string()),
            )
        }
    }
}
