use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{Html, IntoResponse},
};

use crate::{
    AppState,
    utils::{
        error_codes, error_to_api_response, generate_admin_token, success_to_api_response,
        verify_password,
    },
};

use super::model::{LoginRequest, LoginResponse};

/// 管理员登录：校验口令，签发访问令牌
#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> impl IntoResponse {
    match verify_password(&req.password, &state.config.admin_password_hash) {
        Ok(true) => (),
        Ok(false) => {
            return (
                StatusCode::UNAUTHORIZED,
                error_to_api_response(error_codes::AUTH_FAILED, "口令无效".to_string()),
            );
        }
        Err(e) => {
            tracing::error!("Password verification error: {}", e);
            return (
                StatusCode::INTERNAL_SERVER_ERROR,
                error_to_api_response(error_codes::INTERNAL_ERROR, "内部服务器错误".to_string()),
            );
        }
    }

    match generate_admin_token(&state.config) {
        Ok(token) => (StatusCode::OK, success_to_api_response(LoginResponse { token })),
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            error_to_api_response(error_codes::INTERNAL_ERROR, "生成令牌失败".to_string()),
        ),
    }
}

/// 管理面板静态页
#[axum::debug_handler]
pub async fn adminpanel() -> impl IntoResponse {
    match tokio::fs::read_to_string("public/adminpanel/addnew.html").await {
        Ok(page) => Html(page).into_response(),
        Err(e) => {
            tracing::error!("Failed to read admin panel page: {}", e);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}
