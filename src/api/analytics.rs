use actix_web::{HttpResponse, web};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    analytics::{
        Analytics,
        predicates::AttendanceFilter,
        report::{AttendanceSummary, GroupRanking, OrgGroupSummary, SessionDetail, UserSummary},
        scope::Scope,
        window::DateWindow,
    },
    error::EngineError,
};

/// Window bounds shared by the analytics routes. Timestamps are RFC 3339.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct WindowQuery {
    /// Inclusive start; defaults to the first instant of the current month.
    #[param(example = "2025-03-01T00:00:00Z")]
    pub start_date: Option<DateTime<Utc>>,
    /// Inclusive end; defaults to now (full month for the ranking route).
    #[param(example = "2025-03-31T23:59:59Z")]
    pub end_date: Option<DateTime<Utc>>,
}

/// Parameters of the per-user report.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct UsersQuery {
    #[param(example = "2025-03-01T00:00:00Z")]
    pub start_date: Option<DateTime<Utc>>,
    #[param(example = "2025-03-31T23:59:59Z")]
    pub end_date: Option<DateTime<Utc>>,
    /// Session dimension to keep; defaults to `all`.
    pub filter: Option<AttendanceFilter>,
    /// Viewer's raw role, e.g. "team-leader".
    pub role: Option<String>,
    /// Viewer's user id; anchors the role's visibility rules.
    pub user_id: Option<u64>,
}

/// Parameters of the session drill-down.
#[derive(Debug, Deserialize, IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct SessionsQuery {
    #[param(example = "2025-03-01T00:00:00Z")]
    pub start_date: Option<DateTime<Utc>>,
    #[param(example = "2025-03-31T23:59:59Z")]
    pub end_date: Option<DateTime<Utc>>,
    /// Session dimension to keep; defaults to `all`.
    pub filter: Option<AttendanceFilter>,
    /// Viewer's raw role, e.g. "team-leader".
    pub role: Option<String>,
    /// Viewer's user id; anchors the role's visibility rules.
    pub logged_user_id: Option<u64>,
    /// Narrows the result to one user inside the visible scope.
    pub user_filter_id: Option<u64>,
}

/// Global attendance metrics
///
/// Counts and percentages over the whole window, normalized against the
/// rostered workday total.
#[utoipa::path(
    get,
    path = "/api/attendance/summary",
    params(WindowQuery),
    responses(
        (status = 200, description = "Metrics for the window", body = AttendanceSummary),
        (status = 503, description = "Record store unreachable")
    ),
    tag = "Attendance Analytics"
)]
pub async fn attendance_summary(
    engine: web::Data<Analytics>,
    query: web::Query<WindowQuery>,
) -> Result<HttpResponse, EngineError> {
    let window = DateWindow::or_month_to_date(query.start_date, query.end_date, Utc::now());
    let summary = engine
        .attendance_summary(&Scope::unrestricted(), window)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to compute attendance summary");
            e
        })?;
    Ok(HttpResponse::Ok().json(summary))
}

/// Attendance by organization and role group
///
/// One row per organization and role group cell, percentages normalized
/// against the cell's own rostered workdays.
#[utoipa::path(
    get,
    path = "/api/attendance/organizations",
    params(WindowQuery),
    responses(
        (status = 200, description = "Grouped metrics in tier order", body = [OrgGroupSummary]),
        (status = 503, description = "Record store unreachable")
    ),
    tag = "Attendance Analytics"
)]
pub async fn attendance_per_organization(
    engine: web::Data<Analytics>,
    query: web::Query<WindowQuery>,
) -> Result<HttpResponse, EngineError> {
    let window = DateWindow::or_month_to_date(query.start_date, query.end_date, Utc::now());
    let rows = engine
        .attendance_per_organization(&Scope::unrestricted(), window)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to compute organization breakdown");
            e
        })?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Per-user attendance counts
///
/// One row per user visible to the viewer, most sessions first.
#[utoipa::path(
    get,
    path = "/api/attendance/users",
    params(UsersQuery),
    responses(
        (status = 200, description = "Per-user counts", body = [UserSummary]),
        (status = 503, description = "Record store unreachable")
    ),
    tag = "Attendance Analytics"
)]
pub async fn attendance_users(
    engine: web::Data<Analytics>,
    query: web::Query<UsersQuery>,
) -> Result<HttpResponse, EngineError> {
    let window = DateWindow::or_month_to_date(query.start_date, query.end_date, Utc::now());
    let scope = engine
        .scope_for_viewer(query.role.as_deref(), query.user_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to resolve viewer scope");
            e
        })?;
    let rows = engine
        .attendance_users(&scope, window, query.filter.unwrap_or_default())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to compute per-user counts");
            e
        })?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Raw attendance sessions
///
/// Undigested session records for drill-down, newest first.
#[utoipa::path(
    get,
    path = "/api/attendance/sessions",
    params(SessionsQuery),
    responses(
        (status = 200, description = "Raw sessions", body = [SessionDetail]),
        (status = 503, description = "Record store unreachable")
    ),
    tag = "Attendance Analytics"
)]
pub async fn attendance_sessions(
    engine: web::Data<Analytics>,
    query: web::Query<SessionsQuery>,
) -> Result<HttpResponse, EngineError> {
    let window = DateWindow::or_month_to_date(query.start_date, query.end_date, Utc::now());
    let mut scope = engine
        .scope_for_viewer(query.role.as_deref(), query.logged_user_id)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to resolve viewer scope");
            e
        })?;
    if let Some(target) = query.user_filter_id {
        scope = scope.user(target);
    }
    let rows = engine
        .attendance_sessions(&scope, window, query.filter.unwrap_or_default())
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to fetch session details");
            e
        })?;
    Ok(HttpResponse::Ok().json(rows))
}

/// Top performers per role group
///
/// Top three composite scores for each ranked role group over the window,
/// defaulting to the full current calendar month.
#[utoipa::path(
    get,
    path = "/api/attendance/top-performers",
    params(WindowQuery),
    responses(
        (status = 200, description = "Rankings in tier order", body = [GroupRanking]),
        (status = 503, description = "Record store unreachable")
    ),
    tag = "Attendance Analytics"
)]
pub async fn top_performers(
    engine: web::Data<Analytics>,
    query: web::Query<WindowQuery>,
) -> Result<HttpResponse, EngineError> {
    let window = DateWindow::or_calendar_month(query.start_date, query.end_date, Utc::now());
    let rankings = engine
        .top_performers(&Scope::unrestricted(), window)
        .await
        .map_err(|e| {
            tracing::error!(error = %e, "Failed to compute top performers");
            e
        })?;
    Ok(HttpResponse::Ok().json(rankings))
}
