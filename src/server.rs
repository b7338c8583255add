use axum::{
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use std::{net::SocketAddr, sync::Arc};
use tower_http::services::{ServeDir, ServeFile};
use tracing::{info, warn};

use crate::api::{ApiAnalyzeRequest, ApiAnalyzeResponse};
use virality_engine::ViralityEngine;

#[derive(Clone)]
struct AppState {
    engine: Arc<ViralityEngine>,
}

pub async fn serve(args: crate::ServeArgs, engine: ViralityEngine) -> Result<(), String> {
    let state = AppState {
        engine: Arc::new(engine),
    };

    let mut app = Router::new()
        .route("/api/health", get(health))
        .route("/api/analyze", post(analyze_handler));

    if let Some(web_root) = args.web_root {
        let index_path = format!("{}/index.html", web_root.trim_end_matches('/'));
        let static_service = ServeDir::new(web_root).not_found_service(ServeFile::new(index_path));
        app = app.fallback_service(static_service);
    }

    let app = app.with_state(state);

    let addr: SocketAddr = format!("{}:{}", args.host, args.port)
        .parse()
        .map_err(|err| format!("invalid bind address: {}", err))?;

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .map_err(|err| format!("failed to bind server: {}", err))?;
    info!(%addr, "listening");

    axum::serve(listener, app)
        .await
        .map_err(|err| format!("server error: {}", err))?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    StatusCode::OK
}

async fn analyze_handler(
    State(state): State<AppState>,
    Json(request): Json<ApiAnalyzeRequest>,
) -> Result<Json<ApiAnalyzeResponse>, (StatusCode, String)> {
    let input = request.into_input().map_err(|err| {
        warn!(error = %err, "rejected analyze request");
        (StatusCode::BAD_REQUEST, err)
    })?;

    let analysis_id = input.fingerprint();
    let analysis = state
        .engine
        .analyze(&input.text, &input.options, &input.profile);
    info!(
        analysis_id = %analysis_id,
        virality_score = analysis.prediction.virality_score,
        "analyzed post"
    );

    Ok(Json(ApiAnalyzeResponse::from_analysis(analysis, analysis_id)))
}
