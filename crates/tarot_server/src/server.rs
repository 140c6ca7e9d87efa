//! HTTP routes for the public read path and the operator write path.
//!
//! # Responsibility
//! - Map `GET /api/daily` onto `resolve_reading` and the admin routes onto
//!   `apply_override`.
//! - Validate dates before they reach the core; malformed input is
//!   rejected with 422, never silently mapped to today.
//!
//! # Invariants
//! - Admin routes are gated by a single shared-secret cookie.
//! - All store access goes through one connection behind a mutex, so
//!   per-date upsert atomicity holds trivially.

use axum::{
    extract::{Form, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{AppendHeaders, Html, IntoResponse, Redirect, Response},
    routing::{get, post},
    Json, Router,
};
use chrono::{Local, NaiveDate};
use log::{info, warn};
use rusqlite::Connection;
use serde::Deserialize;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::trace::TraceLayer;

use tarot_core::{ReadingService, SqliteReadingRepository};

const ADMIN_COOKIE: &str = "admin=1";

#[derive(Clone)]
pub struct AppState {
    pub conn: Arc<Mutex<Connection>>,
    pub admin_password: Option<String>,
}

struct ServerError(anyhow::Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": format!("{}", self.0) })),
        )
            .into_response()
    }
}

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(health))
        .route("/api/daily", get(get_daily))
        .route("/admin", get(admin_page))
        .route("/admin/login", get(admin_login_page).post(admin_login))
        .route("/admin/update", post(admin_update))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(bind: &str, state: AppState) -> anyhow::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(bind).await?;
    info!("event=server_start module=server status=ok bind={bind}");
    axum::serve(listener, app).await?;
    Ok(())
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

#[derive(Deserialize)]
struct DailyParams {
    date: Option<String>,
}

async fn get_daily(
    State(state): State<AppState>,
    Query(params): Query<DailyParams>,
) -> Result<Response, ServerError> {
    let date = match params.date {
        Some(raw) => match parse_date(&raw) {
            Some(date) => date,
            None => return Ok(invalid_date_response(&raw)),
        },
        None => Local::now().date_naive(),
    };

    let conn = state.conn.lock().await;
    let service = ReadingService::new(SqliteReadingRepository::new(&conn));
    let reading = service.resolve_reading(date)?;
    Ok(Json(reading).into_response())
}

async fn admin_login_page() -> Html<&'static str> {
    Html(
        "<html><body><h1>Operator login</h1>\
         <form method=\"post\" action=\"/admin/login\">\
         <input type=\"password\" name=\"password\">\
         <button type=\"submit\">Login</button>\
         </form></body></html>",
    )
}

#[derive(Deserialize)]
struct LoginForm {
    password: String,
}

async fn admin_login(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Response {
    match &state.admin_password {
        Some(expected) if *expected == form.password => {
            info!("event=admin_login module=server status=ok");
            (
                AppendHeaders([(
                    header::SET_COOKIE,
                    format!("{ADMIN_COOKIE}; Path=/; HttpOnly"),
                )]),
                Redirect::to("/admin"),
            )
                .into_response()
        }
        _ => {
            warn!("event=admin_login module=server status=rejected");
            Redirect::to("/admin/login?error=1").into_response()
        }
    }
}

async fn admin_page(headers: HeaderMap) -> Response {
    if !is_admin(&headers) {
        return Redirect::to("/admin/login").into_response();
    }
    Html(
        "<html><body><h1>Override daily message</h1>\
         <form method=\"post\" action=\"/admin/update\">\
         <input type=\"text\" name=\"date\" placeholder=\"YYYY-MM-DD\">\
         <input type=\"text\" name=\"message\" placeholder=\"Message\">\
         <button type=\"submit\">Save</button>\
         </form></body></html>",
    )
    .into_response()
}

#[derive(Deserialize)]
struct UpdateForm {
    date: String,
    message: String,
}

async fn admin_update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<UpdateForm>,
) -> Result<Response, ServerError> {
    if !is_admin(&headers) {
        return Ok(Redirect::to("/admin/login").into_response());
    }

    let date = match parse_date(&form.date) {
        Some(date) => date,
        None => return Ok(invalid_date_response(&form.date)),
    };

    let conn = state.conn.lock().await;
    let service = ReadingService::new(SqliteReadingRepository::new(&conn));
    service.apply_override(date, &form.message)?;
    info!("event=admin_update module=server status=ok date={date}");
    Ok(Redirect::to("/admin").into_response())
}

fn parse_date(raw: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").ok()
}

fn invalid_date_response(raw: &str) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Json(serde_json::json!({
            "error": format!("invalid date `{raw}`, expected YYYY-MM-DD")
        })),
    )
        .into_response()
}

fn is_admin(headers: &HeaderMap) -> bool {
    headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .map(|cookies| cookies.split(';').any(|part| part.trim() == ADMIN_COOKIE))
        .unwrap_or(false)
}
