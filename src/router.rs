use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    middleware::{admin_auth, log_errors},
    routes,
};

/// 组装全部路由：公开路由、需要认证的管理路由和静态资源
pub fn create_router(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/", get(routes::home::handler::index))
        .route("/admin/login", post(routes::admin::handler::login));

    let protected_routes = Router::new()
        .route("/adminpanel", get(routes::admin::handler::adminpanel))
        .route("/add-course", post(routes::content::handler::add_course))
        .route("/add-blog", post(routes::content::handler::add_blog))
        // 图片大小在上传流程内逐块检查，这里关闭框架默认的请求体上限
        .layer(DefaultBodyLimit::disable())
        // 管理路由全部要求认证
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            admin_auth,
        ));

    let router = Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .nest_service("/public", ServeDir::new("public"));

    // 添加日志中间件
    let router = router.layer(axum::middleware::from_fn(log_errors));

    // 根据编译模式决定是否添加CORS
    #[cfg(debug_assertions)]
    let router = {
        tracing::debug!("Adding CORS layer for development mode");
        router.layer(tower_http::cors::CorsLayer::permissive())
    };

    router.with_state(state)
}
