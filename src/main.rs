use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use study_platform_backend::{
    config::{get_config, init_config},
    database::{pool::create_pool, seed::seed_sample_content},
    middleware, routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;
    seed_sample_content(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new().route("/health", get(routes::health::health));

    let public_api = Router::new()
        .route("/api/auth/register", post(routes::auth::register))
        .route("/api/auth/login", post(routes::auth::login))
        .route("/api/modules", get(routes::modules::list_modules))
        .route("/api/modules/:id", get(routes::modules::get_module))
        .route("/api/quizzes", get(routes::quizzes::list_quizzes))
        .route("/api/quizzes/:id", get(routes::quizzes::get_quiz))
        .route(
            "/api/quizzes/:id/questions",
            get(routes::quizzes::get_quiz_questions),
        );

    let study_api = Router::new()
        .route("/api/auth/me", get(routes::auth::me))
        .route("/api/modules", post(routes::modules::create_module))
        .route("/api/quizzes", post(routes::quizzes::create_quiz))
        .route("/api/quizzes/:id/submit", post(routes::quizzes::submit_quiz))
        .route("/api/progress", get(routes::progress::get_user_progress))
        .route(
            "/api/progress/:module_id/section/:section_id",
            post(routes::progress::mark_section_complete),
        )
        .route(
            "/api/progress/:module_id/time",
            post(routes::progress::add_time_spent),
        )
        .route(
            "/api/quiz-attempts",
            get(routes::attempts::list_quiz_attempts),
        )
        .route(
            "/api/quiz-attempts/:id",
            get(routes::attempts::get_quiz_attempt),
        )
        .route(
            "/api/dashboard/stats",
            get(routes::dashboard::get_dashboard_stats),
        )
        .layer(axum::middleware::from_fn(
            middleware::auth::require_bearer_auth,
        ));

    let app = base_routes
        .merge(public_api)
        .merge(study_api)
        .with_state(app_state)
        .layer(middleware::cors::permissive_cors())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
