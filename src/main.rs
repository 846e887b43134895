mod auth;
mod codec;
mod config;
mod db;
mod error;
mod mailer;
mod review;
mod routes;
mod sar;
mod state;
mod validation;

use axum::{
    routing::{get, patch, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "matricula=info,tower_http=info".into()),
        )
        .init();

    let config = config::Config::from_env()?;

    let pool = db::create_pool(&config.database_url).await?;
    db::run_migrations(pool.as_ref()).await?;

    let mailer = Arc::new(mailer::Mailer::new(&config));

    let state = Arc::new(state::AppState { pool, mailer });

    let app = Router::new()
        .route("/health", get(routes::health))
        .route(
            "/sar/overview",
            get(routes::sar::get_overview).put(routes::sar::put_overview),
        )
        .route(
            "/sar/academic",
            get(routes::sar::list_academic).post(routes::sar::create_academic),
        )
        .route(
            "/sar/academic/:id",
            put(routes::sar::update_academic).delete(routes::sar::delete_academic),
        )
        .route(
            "/sar/internships",
            get(routes::sar::list_internships).post(routes::sar::create_internship),
        )
        .route(
            "/sar/internships/:id",
            put(routes::sar::update_internship).delete(routes::sar::delete_internship),
        )
        .route(
            "/sar/achievements",
            get(routes::sar::list_achievements).post(routes::sar::create_achievement),
        )
        .route(
            "/sar/achievements/:id",
            put(routes::sar::update_achievement).delete(routes::sar::delete_achievement),
        )
        .route("/sar/complete", get(routes::sar::complete))
        .route("/sar/statistics", get(routes::sar::statistics))
        .route("/sar/student/:enrollment_no", get(routes::sar::public_lookup))
        .route(
            "/sar/admin/student/:enrollment_no",
            get(routes::admin::lookup_by_enrollment),
        )
        .route("/admin/verify-student", post(routes::admin::verify_student))
        .route("/admin/pre-review", post(routes::admin::pre_review))
        .route(
            "/student/students/me/update-declined",
            patch(routes::student::update_declined),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state);

    let addr = format!("{}:{}", config.host, config.port);
    tracing::info!("Matricula listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
