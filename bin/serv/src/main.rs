use axum::{Router, middleware, routing::get};
use fd_api::{
    ApiConfig, ApiState,
    metrics::{init_metrics, metrics_handler, track_metrics},
    middleware::{
        cors::create_cors_layer, request_id::request_id_middleware,
        security_headers::apply_security_headers,
    },
    tracing::init_tracing,
};
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration from environment variables
    dotenvy::dotenv().ok();
    let config = ApiConfig::from_env()?;

    init_tracing(&config.env);

    let metrics_handle = init_metrics()?;

    let pool = fd_db::create_pool(&config.database_url, config.max_db_connections).await?;
    fd_db::ensure_db_and_migrate(&config.database_url, &pool).await?;
    tracing::info!("database ready");

    let bind_address = config.bind_address();
    let cors = create_cors_layer(config.parsed_allowed_origins());
    let environment = config.env.clone();

    let state = ApiState::new(config, pool)?;

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
        .on_response(DefaultOnResponse::new().level(Level::INFO));

    let metrics_app = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(metrics_handle);

    let app = fd_api::router::router()
        .with_state(state)
        .merge(metrics_app)
        .layer(cors)
        .layer(trace_layer)
        .layer(middleware::from_fn(track_metrics))
        .layer(middleware::from_fn(request_id_middleware));

    let app = apply_security_headers(app, environment.clone());

    let listener = tokio::net::TcpListener::bind(&bind_address).await?;
    tracing::info!(address = %bind_address, environment = ?environment, "server listening");
    axum::serve(listener, app).await?;

    Ok(())
}
