use std::path::Path;

use axum::{
    Router,
    middleware::{from_fn, from_fn_with_state},
    response::Redirect,
    routing::get,
};
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::{
    AppState,
    middleware::{log_errors, require_login},
    routes,
};

// 需要登录的页面，GET 和 POST 都接受，POST 可直接携带登录凭据
fn page_routes(state: &AppState) -> Router<AppState> {
    Router::new()
        .route(
            "/Index",
            get(routes::pages::index).post(routes::pages::index),
        )
        .route(
            "/Tables",
            get(routes::pages::tables).post(routes::pages::tables),
        )
        .route(
            "/Charts",
            get(routes::pages::charts).post(routes::pages::charts),
        )
        .route_layer(from_fn_with_state(state.clone(), require_login))
}

// 公开路由
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(|| async { Redirect::to("/Index") }))
        .route("/Login", get(routes::login::login).post(routes::login::login))
}

// 静态资源
fn static_routes(dir: &str) -> Router<AppState> {
    let dir = Path::new(dir);
    Router::new()
        .nest_service("/css", ServeDir::new(dir.join("css")))
        .nest_service("/js", ServeDir::new(dir.join("js")))
        .nest_service("/assets", ServeDir::new(dir.join("assets")))
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .merge(page_routes(&state))
        .merge(public_routes())
        .merge(static_routes(&state.config.static_dir))
        .layer(from_fn(log_errors))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
