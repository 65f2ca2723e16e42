//! Route handlers.

use crate::error::ApiError;
use crate::AppState;
use axum::extract::multipart::MultipartRejection;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Multipart, Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use chrono::Utc;
use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use sheetmark_core::{
    aggregate, filter_topics, flatten, BackupService, DifficultyFilter, ImportStatus,
    ProfileService, ProfileServiceError, ProgressStats, Resource, ResultDocument, SheetConfig,
    SheetError, StatusFilter, StatusService, StatusServiceError, TopicFilter, UnifiedSheet,
    UnifiedTopic, SHEET_CONFIGS,
};
use std::collections::BTreeMap;

/// Multipart field carrying the backup archive.
pub const UPLOAD_FIELD: &str = "backup";

const IMPORT_SUCCESS_MESSAGE: &str =
    "Data imported successfully! Your progress, notes, and settings have been restored.";

/// `GET /health`
pub async fn health() -> impl IntoResponse {
    "OK"
}

// === Resources ===

/// `GET /resource/:resource`
pub async fn get_resource(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Response, ApiError> {
    let resource = parse_resource(&name)?;
    let store = state.store.as_ref();

    if resource == Resource::Profile {
        let profile = ProfileService::new(store)
            .get()
            .map_err(|_| ApiError::internal("Failed to read profile"))?;
        return Ok(Json(ResultDocument::new(profile)).into_response());
    }

    let snapshot = StatusService::new(store)
        .read(resource)
        .map_err(status_error)?;
    Ok(Json(ResultDocument::new(snapshot)).into_response())
}

/// `POST /resource/:resource`
///
/// Profile answers `{ "result": profile }`; map resources answer
/// `{ "success": true }`.
pub async fn post_resource(
    State(state): State<AppState>,
    Path(name): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Response, ApiError> {
    let resource = parse_resource(&name)?;
    let Json(body) = body.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let store = state.store.as_ref();

    if resource == Resource::Profile {
        let profile = ProfileService::new(store)
            .update_from_json(body)
            .map_err(|err| match err {
                ProfileServiceError::InvalidPatch(_) => ApiError::bad_request(err.to_string()),
                ProfileServiceError::Repo(_) => ApiError::internal("Failed to save profile"),
            })?;
        return Ok(Json(ResultDocument::new(profile)).into_response());
    }

    StatusService::new(store)
        .update_from_json(resource, &body)
        .map_err(status_error)?;
    Ok(Json(json!({ "success": true })).into_response())
}

fn parse_resource(name: &str) -> Result<Resource, ApiError> {
    Resource::parse(name).ok_or_else(|| ApiError::bad_request(format!("Unknown resource: {name}")))
}

fn status_error(err: StatusServiceError) -> ApiError {
    match err {
        StatusServiceError::Repo(_) => ApiError::internal(err.to_string()),
        StatusServiceError::NotAMapResource(_) | StatusServiceError::InvalidBody(_) => {
            ApiError::bad_request(err.to_string())
        }
    }
}

// === Sheets ===

#[derive(Debug, Default, Deserialize)]
pub struct SheetQuery {
    pub sheet: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TopicQuery {
    pub sheet: Option<String>,
    pub difficulty: Option<String>,
    pub search: Option<String>,
    pub status: Option<String>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct SheetResponse<T> {
    success: bool,
    data: T,
    sheet_id: &'static str,
    sheet_name: &'static str,
}

impl<T> SheetResponse<T> {
    fn new(config: &'static SheetConfig, data: T) -> Self {
        Self {
            success: true,
            data,
            sheet_id: config.id,
            sheet_name: config.name,
        }
    }
}

#[derive(Serialize)]
struct TopicList<'a> {
    total: usize,
    topics: Vec<&'a UnifiedTopic>,
}

/// `GET /sheets?sheet=<id>`: raw sheet document.
pub async fn get_sheet(
    State(state): State<AppState>,
    Query(query): Query<SheetQuery>,
) -> Result<Json<impl Serialize>, ApiError> {
    let config = resolve_sheet(&state, query.sheet.as_deref())?;
    let data = state.sheets.load_raw(config).map_err(|err| sheet_error(config, err))?;
    Ok(Json(SheetResponse::new(config, data)))
}

/// `POST /sheets`
pub async fn sheets_method_not_allowed() -> ApiError {
    ApiError::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// `GET /sheets/catalog`
pub async fn sheet_catalog() -> Json<&'static [SheetConfig]> {
    Json(SHEET_CONFIGS)
}

/// `GET /sheets/unified?sheet=<id>`
pub async fn unified_sheet(
    State(state): State<AppState>,
    Query(query): Query<SheetQuery>,
) -> Result<Json<impl Serialize>, ApiError> {
    let (config, sheet) = load_unified(&state, query.sheet.as_deref())?;
    Ok(Json(SheetResponse::new(config, sheet)))
}

/// `GET /sheets/topics?sheet=<id>&difficulty=&search=&status=`
pub async fn sheet_topics(
    State(state): State<AppState>,
    Query(query): Query<TopicQuery>,
) -> Result<Response, ApiError> {
    let difficulty = query.difficulty.as_deref().unwrap_or_default();
    let status = query.status.as_deref().unwrap_or_default();
    let filter = TopicFilter {
        difficulty: DifficultyFilter::parse(difficulty)
            .ok_or_else(|| ApiError::bad_request(format!("Invalid difficulty: {difficulty}")))?,
        search: query.search.unwrap_or_default(),
        status: StatusFilter::parse(status)
            .ok_or_else(|| ApiError::bad_request(format!("Invalid status: {status}")))?,
    };
    let (config, sheet) = load_unified(&state, query.sheet.as_deref())?;

    let statuses = StatusService::new(state.store.as_ref());
    let completed = statuses.completed();
    let revision = statuses.revision();
    let topics = filter_topics(flatten(&sheet), &filter, &completed, &revision);

    let list = TopicList {
        total: topics.len(),
        topics,
    };
    Ok(Json(SheetResponse::new(config, list)).into_response())
}

/// `GET /sheets/stats?sheet=<id>`
pub async fn sheet_stats(
    State(state): State<AppState>,
    Query(query): Query<SheetQuery>,
) -> Result<Json<impl Serialize>, ApiError> {
    let (config, sheet) = load_unified(&state, query.sheet.as_deref())?;
    let statuses = StatusService::new(state.store.as_ref());
    let stats: ProgressStats = aggregate(&sheet, &statuses.completed(), &statuses.revision());
    Ok(Json(SheetResponse::new(config, stats)))
}

fn resolve_sheet(state: &AppState, id: Option<&str>) -> Result<&'static SheetConfig, ApiError> {
    state
        .sheets
        .resolve(id)
        .map_err(|err| ApiError::bad_request(err.to_string()))
}

fn load_unified(
    state: &AppState,
    id: Option<&str>,
) -> Result<(&'static SheetConfig, UnifiedSheet), ApiError> {
    let config = resolve_sheet(state, id)?;
    let sheet = state
        .sheets
        .load_unified(config)
        .map_err(|err| sheet_error(config, err))?;
    Ok((config, sheet))
}

fn sheet_error(config: &SheetConfig, err: SheetError) -> ApiError {
    match err {
        SheetError::MissingSheetId | SheetError::UnknownSheet(_) => {
            ApiError::bad_request(err.to_string())
        }
        SheetError::Io { .. } | SheetError::InvalidJson { .. } => ApiError::internal(format!(
            "Failed to load sheet data: {}",
            config.file_name
        )),
        SheetError::Format { .. } => ApiError::internal(err.to_string()),
    }
}

// === Backup ===

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ImportResponse {
    success: bool,
    import_date: String,
    backup_date: String,
    results: BTreeMap<&'static str, ImportStatus>,
    message: &'static str,
}

/// `GET /backup`: zip download of every resource.
pub async fn export_backup(State(state): State<AppState>) -> Result<Response, ApiError> {
    let archive = BackupService::new(state.store.as_ref())
        .export(Utc::now())
        .map_err(|_| ApiError::internal("Failed to export data"))?;

    let headers = [
        (header::CONTENT_TYPE, "application/zip".to_string()),
        (
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", archive.file_name),
        ),
    ];
    Ok((headers, archive.bytes).into_response())
}

/// `POST /backup`: multipart upload with the archive in field `backup`.
pub async fn import_backup(
    State(state): State<AppState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<impl Serialize>, ApiError> {
    let mut multipart =
        multipart.map_err(|rejection| ApiError::bad_request(rejection.body_text()))?;
    let mut upload = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| ApiError::bad_request(err.body_text()))?
    {
        if field.name() != Some(UPLOAD_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let bytes = field
            .bytes()
            .await
            .map_err(|err| ApiError::bad_request(err.body_text()))?;
        upload = Some((file_name, bytes));
        break;
    }

    let (file_name, bytes) = upload.ok_or_else(|| {
        ApiError::bad_request("No backup file provided. Please select a ZIP file to import.")
    })?;
    if !file_name.to_ascii_lowercase().ends_with(".zip") {
        return Err(ApiError::bad_request(
            "Invalid file format. Please upload a ZIP file.",
        ));
    }

    let report = BackupService::new(state.store.as_ref())
        .import(&bytes, Utc::now())
        .map_err(|err| {
            if err.is_validation() {
                ApiError::bad_request(err.to_string())
            } else {
                ApiError::internal(
                    "Failed to import data. Please check that your backup file is valid and not corrupted.",
                )
            }
        })?;

    info!(
        "event=backup_upload module=server status=ok bytes={}",
        bytes.len()
    );
    Ok(Json(ImportResponse {
        success: true,
        import_date: report.import_date,
        backup_date: report.backup_date,
        results: report
            .results
            .into_iter()
            .map(|(resource, status)| (resource.name(), status))
            .collect(),
        message: IMPORT_SUCCESS_MESSAGE,
    }))
}
