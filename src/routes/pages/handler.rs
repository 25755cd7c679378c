use std::collections::HashMap;

use axum::{extract::State, response::Html};

use crate::{
    AppState,
    database::{User, UserSession},
    error::AppError,
    middleware::Client,
    view::{
        components::{AreaChart, Chart, PieChart, TableColumn, TableList},
        escape,
        layout::{CHARTS, INDEX, NavEntry, PageChrome, TABLES, page},
    },
};

use super::model::{axis_max, sessions_per_day, sessions_per_user};

fn render(
    state: &AppState,
    entry: NavEntry,
    user: Option<&User>,
    content: &str,
    script: Option<&str>,
) -> Html<String> {
    let chrome = PageChrome {
        site_title: &state.config.page_title,
        page: entry,
        user,
    };
    Html(page(&chrome, content, script))
}

pub async fn index(State(state): State<AppState>, Client(key): Client) -> Html<String> {
    let user = state.sessions.get_user(&key);
    let name = user.as_ref().map(|u| u.firstname.as_str()).unwrap_or_default();

    let content = format!(
        "<div class=\"card mb-4\"><div class=\"card-body\">Welcome back, {}!</div></div>",
        escape(name)
    );
    render(&state, INDEX, user.as_ref(), &content, None)
}

pub async fn tables(
    State(state): State<AppState>,
    Client(key): Client,
) -> Result<Html<String>, AppError> {
    let users = state.store.list_users().await?;
    let sessions = state.store.list_sessions().await?;
    let emails: HashMap<i64, String> = users.iter().map(|u| (u.id, u.email.clone())).collect();

    let user_table = TableList::new("Users")
        .column(TableColumn::field("E-Mail", "email"))
        .column(TableColumn::field("First name", "firstname"))
        .column(TableColumn::field("Last name", "lastname"))
        .data(users);
    // 按字段名取值的列先校验，字段名写错时直接报错
    user_table.try_rows()?;

    let session_table = TableList::with_options("Sessions", true, true)
        .column(TableColumn::new("User", move |s: &UserSession| {
            emails
                .get(&s.user_id)
                .cloned()
                .unwrap_or_else(|| format!("#{}", s.user_id))
        }))
        .column(TableColumn::new("Agent", |s: &UserSession| s.agent.clone()))
        .column(TableColumn::new("IP", |s: &UserSession| s.ip.clone()))
        .column(TableColumn::new("Last seen", |s: &UserSession| {
            s.timestamp.format("%Y-%m-%d %H:%M:%S").to_string()
        }))
        .data(sessions);

    let content = format!("{}{}", user_table.render(), session_table.render());
    let user = state.sessions.get_user(&key);
    Ok(render(&state, TABLES, user.as_ref(), &content, None))
}

pub async fn charts(
    State(state): State<AppState>,
    Client(key): Client,
) -> Result<Html<String>, AppError> {
    let users = state.store.list_users().await?;
    let sessions = state.store.list_sessions().await?;

    let per_day = sessions_per_day(&sessions);
    let max = axis_max(&per_day);
    let area = AreaChart::new("Sessions by last activity", "sessionsByDay", per_day, 0, max);
    let pie = PieChart::new(
        "Sessions per user",
        "sessionsPerUser",
        sessions_per_user(&sessions, &users),
    );

    let content = format!(
        "<div class=\"row\"><div class=\"col-xl-6\">{}</div><div class=\"col-xl-6\">{}</div></div>",
        area.render(),
        pie.render()
    );
    let script = format!("{}{}", area.script(), pie.script());

    let user = state.sessions.get_user(&key);
    Ok(render(&state, CHARTS, user.as_ref(), &content, Some(&script)))
}
