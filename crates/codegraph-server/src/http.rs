use std::path::PathBuf;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use axum::Router;
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};

use codegraph_core::store::QueryRow;
use codegraph_index::ParamTypeSnippet;

use crate::SharedCodeGraph;

/// Build the axum router with every codegraph HTTP endpoint.
pub fn router(graph: SharedCodeGraph) -> Router {
    let cors = CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any);

    Router::new()
        .route("/health", get(health))
        .route("/index", post(index))
        .route("/query", post(query))
        .route("/clean", post(clean))
        .route("/func-param-types", post(func_param_types))
        .layer(cors)
        .with_state(graph)
}

/// Start the HTTP server on the given port.
pub async fn serve(graph: SharedCodeGraph, port: u16) -> Result<(), Box<dyn std::error::Error>> {
    let app = router(graph);
    let listener = tokio::net::TcpListener::bind(format!("127.0.0.1:{port}")).await?;
    tracing::info!(port, "codegraph HTTP listening");
    axum::serve(listener, app).await?;
    Ok(())
}

#[derive(Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Deserialize, Default)]
pub struct IndexRequest {
    #[serde(default)]
    pub paths: Vec<PathBuf>,
    #[serde(default)]
    pub incremental: bool,
}

#[derive(Serialize)]
pub struct IndexResponse {
    pub files_visited: usize,
}

#[derive(Deserialize)]
pub struct QueryRequest {
    pub query: String,
}

#[derive(Serialize)]
pub struct QueryResponse {
    pub rows: Vec<QueryRow>,
}

#[derive(Deserialize, Default)]
pub struct CleanRequest {
    #[serde(default)]
    pub delete_dir: bool,
}

#[derive(Deserialize)]
pub struct FuncParamTypesRequest {
    pub file_path: String,
    pub line: u32,
}

#[derive(Serialize)]
pub struct FuncParamTypesResponse {
    pub snippets: Vec<ParamTypeSnippet>,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_string(), version: env!("CARGO_PKG_VERSION").to_string() })
}

async fn index(
    State(graph): State<SharedCodeGraph>,
    Json(req): Json<IndexRequest>,
) -> Result<Json<IndexResponse>, StatusCode> {
    let mut graph = graph.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let files_visited = graph.index(&req.paths, req.incremental).map_err(|e| {
        tracing::error!(error = %e, "index request failed");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    Ok(Json(IndexResponse { files_visited }))
}

async fn query(
    State(graph): State<SharedCodeGraph>,
    Json(req): Json<QueryRequest>,
) -> Result<Json<QueryResponse>, StatusCode> {
    let graph = graph.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    let rows = graph.query(&req.query).map_err(|e| {
        tracing::warn!(query = %req.query, error = %e, "query request rejected");
        StatusCode::BAD_REQUEST
    })?;
    Ok(Json(QueryResponse { rows }))
}

async fn clean(
    State(graph): State<SharedCodeGraph>,
    Json(req): Json<CleanRequest>,
) -> Result<StatusCode, StatusCode> {
    let mut graph = graph.lock().map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    graph.clean(req.delete_dir).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(StatusCode::NO_CONTENT)
}

async fn func_param_types(
    State(graph): State<SharedCodeGraph>,
    Json(req): Json<FuncParamTypesRequest>,
) -> Json<FuncParamTypesResponse> {
    let graph = graph.lock().unwrap();
    let snippets = graph.get_func_param_types(&req.file_path, req.line);
    Json(FuncParamTypesResponse { snippets })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use std::fs;
    use tempfile::tempdir;
    use tower::ServiceExt;

    fn test_server() -> (SharedCodeGraph, tempfile::TempDir, tempfile::TempDir) {
        let repo = tempdir().unwrap();
        let db = tempdir().unwrap();
        fs::write(repo.path().join("a.py"), "class Thing:\n    pass\n").unwrap();
        let server = crate::CodegraphServer::open(db.path(), repo.path().to_path_buf(), None).unwrap();
        (server.graph, repo, db)
    }

    #[tokio::test]
    async fn health_endpoint_reports_ok() {
        let (graph, _repo, _db) = test_server();
        let app = router(graph);
        let response = app
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn index_then_query_round_trips_through_http() {
        let (graph, _repo, _db) = test_server();
        let app = router(graph);

        let index_req = Request::builder()
            .method("POST")
            .uri("/index")
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&serde_json::json!({})).unwrap()))
            .unwrap();
        let response = app.clone().oneshot(index_req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let query_req = Request::builder()
            .method("POST")
            .uri("/query")
            .header("content-type", "application/json")
            .body(Body::from(
                serde_json::to_vec(&serde_json::json!({"query": "SELECT COUNT(*) FROM nodes"})).unwrap(),
            ))
            .unwrap();
        let response = app.oneshot(query_req).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let parsed: QueryResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(parsed.rows.len(), 1);
    }
}
