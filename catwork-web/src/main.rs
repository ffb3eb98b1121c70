use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    routing::post,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use catwork::config::{WorkbenchConfig, load_config_from_file};
use catwork::glossary::{ConsistencyReport, GlossaryTerm, parse_csv_content};
use catwork::quality::{QualityIssue, QualitySummary, summarize_issues};
use catwork::{
    Granularity, QualityChecker, ReadabilityResult, SegmentPair, TextAlignment, align_texts,
    calculate_readability, create_segment_pairs, ensure_segment_integrity, split_into_segments,
    validate_glossary_consistency,
};

#[derive(Deserialize)]
pub struct SegmentRequest {
    pub text: String,
    pub granularity: Option<Granularity>,
}

#[derive(Serialize)]
pub struct SegmentResponse {
    pub segments: Vec<String>,
    pub pairs: Vec<SegmentPair>,
}

#[derive(Deserialize)]
pub struct PairRequest {
    pub source: String,
    pub target: String,
}

#[derive(Serialize)]
pub struct QualityResponse {
    pub issues: Vec<QualityIssue>,
    pub summary: QualitySummary,
}

#[derive(Deserialize)]
pub struct ReadabilityRequest {
    pub text: String,
    pub language: Option<String>,
}

#[derive(Deserialize)]
pub struct GlossaryRequest {
    pub source: String,
    pub target: String,
    #[serde(default)]
    pub terms: Vec<GlossaryTerm>,
    /// Raw glossary CSV, merged with `terms`
    pub csv: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<WorkbenchConfig>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::var("CATWORK_CONFIG") {
        Ok(path) => load_config_from_file(Path::new(&path))?,
        Err(_) => WorkbenchConfig::default(),
    };

    let level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(level)),
        )
        .init();

    info!("Starting catwork web server");

    let state = AppState {
        config: Arc::new(config),
    };
    let addr = std::env::var("CATWORK_ADDR").unwrap_or_else(|_| "127.0.0.1:3000".to_string());
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server running at http://{}", addr);

    axum::serve(listener, app(state)).await?;

    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/segment", post(segment_text))
        .route("/api/quality", post(check_quality))
        .route("/api/align", post(align_pair))
        .route("/api/readability", post(readability))
        .route("/api/glossary/validate", post(validate_glossary))
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn segment_text(
    State(state): State<AppState>,
    Json(request): Json<SegmentRequest>,
) -> Json<SegmentResponse> {
    let granularity = request
        .granularity
        .unwrap_or(state.config.segmentation.granularity);
    let segments = split_into_segments(&request.text, granularity);
    info!("Segmented {} chars into {} segments", request.text.len(), segments.len());

    let pairs = ensure_segment_integrity(&create_segment_pairs(&segments, &Vec::<String>::new()));
    Json(SegmentResponse { segments, pairs })
}

async fn check_quality(
    State(state): State<AppState>,
    Json(request): Json<PairRequest>,
) -> Json<QualityResponse> {
    let checker = QualityChecker::new(state.config.quality.clone());
    let issues = checker.check(&request.source, &request.target);
    let summary = summarize_issues(&issues);
    Json(QualityResponse { issues, summary })
}

async fn align_pair(Json(request): Json<PairRequest>) -> Json<TextAlignment> {
    Json(align_texts(&request.source, &request.target))
}

async fn readability(
    State(state): State<AppState>,
    Json(request): Json<ReadabilityRequest>,
) -> Json<ReadabilityResult> {
    let language = request
        .language
        .unwrap_or_else(|| state.config.languages.target.clone());
    Json(calculate_readability(&request.text, &language))
}

async fn validate_glossary(
    Json(request): Json<GlossaryRequest>,
) -> Result<Json<ConsistencyReport>, ApiError> {
    let mut terms = request.terms;
    if let Some(csv) = &request.csv {
        terms.extend(parse_csv_content(csv));
    }
    if terms.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No glossary terms provided".to_string(),
            }),
        ));
    }

    Ok(Json(validate_glossary_consistency(
        &request.source,
        &request.target,
        &terms,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{Body, to_bytes};
    use axum::http::Request;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    async fn post_json(uri: &str, body: Value) -> (StatusCode, Value) {
        let state = AppState {
            config: Arc::new(WorkbenchConfig::default()),
        };
        let response = app(state)
            .oneshot(
                Request::post(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_segment_endpoint() {
        let (status, body) =
            post_json("/api/segment", json!({ "text": "Hello world.\nHow are you?" })).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["segments"], json!(["Hello world.", "\n", "How are you?"]));
        assert_eq!(body["pairs"][1]["isLineBreak"], true);
    }

    #[tokio::test]
    async fn test_quality_endpoint() {
        let (_, body) = post_json(
            "/api/quality",
            json!({ "source": "There are 5 apples.", "target": "Há maçãs." }),
        )
        .await;
        assert_eq!(body["issues"][0]["type"], "missing-number");
        assert_eq!(body["summary"]["errors"], 1);
    }

    #[tokio::test]
    async fn test_align_endpoint() {
        let (_, body) = post_json(
            "/api/align",
            json!({ "source": "Call 555 now", "target": "Ligue 555 agora" }),
        )
        .await;
        assert_eq!(body["matches"]["src-number-0"], "tgt-number-0");
    }

    #[tokio::test]
    async fn test_readability_endpoint() {
        let (_, body) = post_json(
            "/api/readability",
            json!({ "text": "The cat sat on the mat.", "language": "en" }),
        )
        .await;
        assert_eq!(body["statistics"]["words"], 6);
    }

    #[tokio::test]
    async fn test_glossary_endpoint_requires_terms() {
        let (status, body) = post_json(
            "/api/glossary/validate",
            json!({ "source": "cloud", "target": "nuvem" }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "No glossary terms provided");
    }

    #[tokio::test]
    async fn test_glossary_endpoint_with_csv() {
        let (status, body) = post_json(
            "/api/glossary/validate",
            json!({
                "source": "Deploy to the cloud",
                "target": "Implante na plataforma",
                "csv": "term,definition\ncloud,nuvem"
            }),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["isConsistent"], false);
        assert_eq!(body["issues"][0]["expectedTranslation"], "nuvem");
    }
}
