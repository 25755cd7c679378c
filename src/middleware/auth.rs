use axum::{
    body::Body,
    extract::{Form, FromRequest, State},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::{
    AppState,
    cache::SessionKey,
    error::AppError,
    middleware::client::Client,
    routes::login::LoginForm,
    utils::sanitize_return,
};

/// 页面登录检查
///
/// 已登录直接放行；未登录时若请求带有登录凭据则尝试登录并跳回原页面，
/// 否则重定向到登录页。
pub async fn require_login(
    State(state): State<AppState>,
    Client(key): Client,
    req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    if state.sessions.is_logged_in(&key).await? {
        return Ok(next.run(req).await);
    }

    let page = sanitize_return(Some(req.uri().path()));
    let form = match Form::<LoginForm>::from_request(req, &state).await {
        Ok(Form(form)) => form,
        Err(_) => LoginForm::default(),
    };

    if attempt_login(&state, &key, &form).await? {
        let target = page.as_deref().unwrap_or("Index");
        return Ok(Redirect::to(&format!("/{}", target)).into_response());
    }

    let login = match page {
        Some(page) => format!("/Login?return={}", page),
        None => "/Login".to_string(),
    };
    Ok(Redirect::to(&login).into_response())
}

/// 使用表单中的凭据登录，未提交凭据时返回 false
pub async fn attempt_login(
    state: &AppState,
    key: &SessionKey,
    form: &LoginForm,
) -> Result<bool, AppError> {
    let Some((email, password)) = form.credentials() else {
        return Ok(false);
    };

    if let Some(limiter) = &state.limiter {
        limiter.check(&key.ip).await?;
    }

    let logged_in = state.sessions.login(key, email, password).await?;
    if logged_in {
        if let Some(limiter) = &state.limiter {
            limiter.reset(&key.ip).await;
        }
    }

    Ok(logged_in)
}
