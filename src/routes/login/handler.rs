use axum::{
    extract::{Form, Query, State, rejection::FormRejection},
    http::StatusCode,
    response::{Html, IntoResponse, Redirect, Response},
};

use crate::{
    AppState,
    error::{AppError, SessionError},
    middleware::{Client, attempt_login},
    utils::sanitize_return,
    view::login::login_page,
};

use super::model::LoginForm;

/// 登录页
///
/// 先处理注销，再处理已登录跳转和直接提交的凭据，最后显示登录表单。
pub async fn login(
    State(state): State<AppState>,
    Client(key): Client,
    Query(query): Query<LoginForm>,
    form: Result<Form<LoginForm>, FormRejection>,
) -> Result<Response, AppError> {
    let form = match form {
        Ok(Form(body)) => query.merge(body),
        Err(_) => query,
    };
    let target = sanitize_return(form.return_to.as_deref()).unwrap_or_else(|| "Index".into());
    let title = &state.config.page_title;

    if form.wants_logout() {
        match state.sessions.logout(&key).await {
            Ok(()) => {}
            Err(SessionError::NotLoggedIn) => {
                tracing::debug!("Logout requested by {} without a session", key);
            }
            Err(e) => return Err(e.into()),
        }
        return Ok(Html(login_page(title, &target, None)).into_response());
    }

    if state.sessions.is_logged_in(&key).await? {
        return Ok(Redirect::to(&format!("/{}", target)).into_response());
    }

    if form.credentials().is_some() {
        if attempt_login(&state, &key, &form).await? {
            return Ok(Redirect::to(&format!("/{}", target)).into_response());
        }
        return Ok((
            StatusCode::UNAUTHORIZED,
            Html(login_page(title, &target, Some("Invalid email or password"))),
        )
            .into_response());
    }

    Ok(Html(login_page(title, &target, None)).into_response())
}
