//! HTTP handlers for the worksheet API

use std::sync::Arc;

use axum::{
    extract::{Form, Json, Multipart, Query, State},
    response::IntoResponse,
};
use serde_json::json;
use tracing::info;
use uuid::Uuid;
use worksheet_core::{clamp_task_count, Difficulty, SourceImage};

use crate::error::ApiError;
use crate::models::{
    CompileRequest, CompileResponse, GenerateSimilarRequest, GenerateSimilarResponse,
    HistoryQuery, HistoryResponse, ProcessResponse, DEFAULT_MODEL,
};
use crate::state::AppState;

/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// POST /api/process
///
/// Multipart form: one or more `files` image parts, plus optional
/// `task_count` and `model` text fields. Returns extracted body markup for
/// client-side review; nothing is compiled or persisted here.
pub async fn process(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> Result<Json<ProcessResponse>, ApiError> {
    let mut images: Vec<SourceImage> = Vec::new();
    let mut task_count: Option<u32> = None;
    let mut model = DEFAULT_MODEL.to_string();

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("files") => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .unwrap_or_else(|| "page.jpg".to_string());
                let bytes = field.bytes().await?;
                if !bytes.is_empty() {
                    images.push(SourceImage::new(&file_name, bytes.to_vec()));
                }
            }
            Some("task_count") => {
                task_count = field.text().await?.trim().parse().ok();
            }
            Some("model") => {
                let value = field.text().await?;
                if !value.trim().is_empty() {
                    model = value.trim().to_string();
                }
            }
            _ => {}
        }
    }

    if images.is_empty() {
        return Err(ApiError::MissingUpload);
    }

    let task_count = clamp_task_count(task_count);
    info!(
        images = images.len(),
        task_count,
        model = model.as_str(),
        "extracting worksheet from uploaded pages"
    );

    let latex_code = state.provider.extract(&images, task_count, &model).await?;
    Ok(Json(ProcessResponse { latex_code, model }))
}

/// POST /api/compile
///
/// Takes reviewed body markup and produces the PDF (plus an answer-key PDF
/// when the body carries a trailing answers page), then records the result
/// in the history. A history write failure is logged and swallowed; the
/// client already has its PDF.
pub async fn compile(
    State(state): State<Arc<AppState>>,
    Json(req): Json<CompileRequest>,
) -> Result<Json<CompileResponse>, ApiError> {
    if req.latex_code.trim().is_empty() {
        return Err(ApiError::InvalidRequest("No LaTeX code provided".into()));
    }

    let prefix = if req.is_variant2 { "variant2" } else { "worksheet" };
    let output_id = format!("{prefix}_{}", Uuid::new_v4());

    let topic = if req.is_variant2 {
        format!("{} (Вариант 2)", req.topic)
    } else {
        req.topic.clone()
    };
    let layout = latex_engine::Layout::parse_lenient(&req.layout);

    info!(
        output_id = output_id.as_str(),
        topic = topic.as_str(),
        ?layout,
        "compiling worksheet"
    );
    let compiled = latex_engine::compile_worksheet(
        &state.compiler,
        &req.latex_code,
        &topic,
        &req.teacher_name,
        layout,
        &output_id,
    )
    .await?;

    let pdf_url = format!("/generated/{}", compiled.pdf_file);
    let keys_url = compiled
        .keys_file
        .as_ref()
        .map(|f| format!("/generated/{f}"));

    if let Err(err) = state
        .append_history(
            &topic,
            &req.teacher_name,
            &req.latex_code,
            &pdf_url,
            keys_url.as_deref(),
        )
        .await
    {
        tracing::error!("failed to record history for {output_id}: {err}");
    }

    Ok(Json(CompileResponse { pdf_url, keys_url }))
}

/// POST /api/generate_similar
///
/// Form body: existing worksheet markup plus regeneration knobs. Returns new
/// body markup only; the client compiles it via /api/compile.
pub async fn generate_similar(
    State(state): State<Arc<AppState>>,
    Form(req): Form<GenerateSimilarRequest>,
) -> Result<Json<GenerateSimilarResponse>, ApiError> {
    if req.original_text.trim().is_empty() {
        return Err(ApiError::InvalidRequest("No original text provided".into()));
    }

    let task_count = clamp_task_count(
        req.task_count
            .as_deref()
            .and_then(|v| v.trim().parse().ok()),
    );
    let difficulty = Difficulty::parse_lenient(&req.difficulty);

    info!(
        task_count,
        %difficulty,
        model = req.model.as_str(),
        "regenerating worksheet variant"
    );
    let latex_code = state
        .provider
        .regenerate(&req.original_text, task_count, &req.model, difficulty)
        .await?;
    Ok(Json(GenerateSimilarResponse { latex_code }))
}

/// GET /api/history
pub async fn history(
    State(state): State<Arc<AppState>>,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let limit = query.limit.unwrap_or(50).clamp(1, 500);
    let history = state.list_history(limit).await?;
    Ok(Json(HistoryResponse { history }))
}
