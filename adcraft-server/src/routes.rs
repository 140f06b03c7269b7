//! API route handlers.

use adcraft_core::{
    render, Orientation, OrientationDescriptor, Scene, Session, TemplateDescriptor, TemplateId,
};
use adcraft_renderer::{
    export_image_from_data_url, export_pdf_from_data_url, ExportFormat, ImageExportFormat,
    ImageFormat, RenderError,
};
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, Multipart, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::metrics;
use crate::validation::{validate_data_url, validate_upload, ValidationError};
use crate::AppState;

/// Base name for downloaded files.
pub const DOWNLOAD_NAME: &str = "ad-creative";

/// DPI used when wrapping canvases in a PDF page.
pub const PDF_DPI: f32 = 96.0;

/// Response to a successful upload.
#[derive(Debug, Serialize, Deserialize)]
pub struct UploadResponse {
    /// Always `true`; failures use the error body.
    pub success: bool,
    /// The decoded image as a `data:` URL.
    pub data_url: String,
    /// MIME type of the stored image.
    pub mime: String,
    /// Natural width in pixels.
    pub width: u32,
    /// Natural height in pixels.
    pub height: u32,
}

/// Body of `POST /api/export/image`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportImageRequest {
    /// Flattened canvas as a `data:` URL.
    pub image_data: String,
    /// `png` (default), `jpg` or `jpeg`.
    #[serde(default)]
    pub format: Option<String>,
}

/// Body of `POST /api/export/pdf`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExportPdfRequest {
    /// Flattened canvas as a `data:` URL.
    pub image_data: String,
}

/// Body of `POST /api/render`.
#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    /// Editor session to lay out and export.
    #[serde(default)]
    pub session: Session,
    /// `png` (default), `jpg`, `svg` or `pdf`.
    #[serde(default)]
    pub format: Option<String>,
}

/// Accept a single image upload and return it as a `data:` URL.
///
/// # Errors
///
/// Fails when no file is present, the file is not an image, exceeds the
/// configured size, or cannot be decoded.
#[tracing::instrument(name = "upload", skip(state, multipart))]
pub async fn upload(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<UploadResponse>, ApiError> {
    while let Some(field) = multipart.next_field().await? {
        if field.file_name().is_none() && field.name() != Some("file") {
            continue;
        }

        let file_name = field.file_name().map(str::to_string);
        let mime = field
            .content_type()
            .map(str::to_string)
            .or_else(|| guess_mime(file_name.as_deref()))
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let bytes = field.bytes().await?;

        return decode_upload(&state, file_name.as_deref(), mime, bytes).await;
    }

    Err(ValidationError::MissingFile.into())
}

async fn decode_upload(
    state: &AppState,
    file_name: Option<&str>,
    mime: String,
    bytes: Bytes,
) -> Result<Json<UploadResponse>, ApiError> {
    let size = bytes.len();
    if let Err(err) = validate_upload(file_name, &mime, size, state.config.max_upload_bytes) {
        metrics::record_upload("rejected", size);
        return Err(err.into());
    }

    let decoder = state.decoder.clone();
    let decoded = tokio::task::spawn_blocking(move || decoder.decode(&mime, &bytes)).await?;
    let asset = match decoded {
        Ok(asset) => asset,
        Err(err) => {
            metrics::record_upload("rejected", size);
            return Err(err.into());
        }
    };

    metrics::record_upload("accepted", size);
    tracing::debug!(
        "Accepted upload {:?}: {} {}x{}",
        file_name,
        asset.mime,
        asset.width,
        asset.height
    );

    Ok(Json(UploadResponse {
        success: true,
        data_url: asset.data_url,
        mime: asset.mime,
        width: asset.width,
        height: asset.height,
    }))
}

fn guess_mime(file_name: Option<&str>) -> Option<String> {
    let ext = file_name?.rsplit_once('.')?.1;
    ImageFormat::from_extension(ext).mime().map(str::to_string)
}

/// Re-encode a posted canvas as a PNG or JPEG download.
///
/// # Errors
///
/// Fails on malformed bodies, unknown formats and undecodable images.
#[tracing::instrument(name = "export_image", skip(state, payload))]
pub async fn export_image(
    State(state): State<AppState>,
    payload: Result<Json<ExportImageRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let format: ImageExportFormat = request
        .format
        .as_deref()
        .unwrap_or("png")
        .parse()
        .map_err(|e: RenderError| ApiError::BadRequest(e.to_string()))?;
    validate_data_url(&request.image_data, state.config.max_body_bytes())?;

    let result =
        tokio::task::spawn_blocking(move || export_image_from_data_url(&request.image_data, format))
            .await?;
    metrics::record_export(format.extension(), result.is_ok());

    Ok(attachment(result?, format.mime(), format.extension()))
}

/// Wrap a posted canvas in a single-page PDF download.
///
/// # Errors
///
/// Fails on malformed bodies and undecodable images.
#[tracing::instrument(name = "export_pdf", skip(state, payload))]
pub async fn export_pdf(
    State(state): State<AppState>,
    payload: Result<Json<ExportPdfRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    validate_data_url(&request.image_data, state.config.max_body_bytes())?;

    let result =
        tokio::task::spawn_blocking(move || export_pdf_from_data_url(&request.image_data, PDF_DPI))
            .await?;
    metrics::record_export("pdf", result.is_ok());

    Ok(attachment(result?, "application/pdf", "pdf"))
}

/// Lay out a session server-side and export it.
///
/// # Errors
///
/// Fails on malformed bodies, unknown formats and export failures.
#[tracing::instrument(name = "render_session", skip(state, payload))]
pub async fn render_session(
    State(state): State<AppState>,
    payload: Result<Json<RenderRequest>, JsonRejection>,
) -> Result<Response, ApiError> {
    let Json(request) = payload?;
    let name = request.format.as_deref().unwrap_or("png");
    let format = ExportFormat::from_name(name)
        .ok_or_else(|| ApiError::BadRequest(format!("unsupported format: {name}")))?;

    let exporter = state.exporter.clone();
    let session = request.session;
    let result = tokio::task::spawn_blocking(move || {
        let mut scene = Scene::default();
        render(&mut scene, &session);
        exporter.export(&scene, format)
    })
    .await?;
    metrics::record_export(format.extension(), result.is_ok());

    Ok(attachment(result?, format.mime(), format.extension()))
}

/// List the layout templates.
pub async fn templates() -> Json<Vec<TemplateDescriptor>> {
    Json(TemplateId::ALL.iter().map(|t| t.descriptor()).collect())
}

/// List the canvas orientations.
pub async fn orientations() -> Json<Vec<OrientationDescriptor>> {
    Json(Orientation::ALL.iter().map(|o| o.descriptor()).collect())
}

fn attachment(bytes: Vec<u8>, mime: &str, extension: &str) -> Response {
    (
        [
            (header::CONTENT_TYPE, mime.to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{DOWNLOAD_NAME}.{extension}\""),
            ),
        ],
        bytes,
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn guesses_mime_from_extension() {
        assert_eq!(guess_mime(Some("hero.PNG")).as_deref(), Some("image/png"));
        assert_eq!(guess_mime(Some("photo.jpeg")).as_deref(), Some("image/jpeg"));
        assert_eq!(guess_mime(Some("notes.txt")), None);
        assert_eq!(guess_mime(Some("no-extension")), None);
        assert_eq!(guess_mime(None), None);
    }

    #[test]
    fn export_request_uses_camel_case() {
        let request: ExportImageRequest =
            serde_json::from_str(r#"{"imageData":"data:image/png;base64,AA==","format":"jpg"}"#)
                .expect("parse");
        assert_eq!(request.format.as_deref(), Some("jpg"));

        let request: ExportImageRequest =
            serde_json::from_str(r#"{"imageData":"data:,"}"#).expect("parse");
        assert!(request.format.is_none());
    }

    #[test]
    fn attachment_headers() {
        let response = attachment(vec![1, 2, 3], "image/png", "png");
        let headers = response.headers();
        assert_eq!(headers[header::CONTENT_TYPE], "image/png");
        assert_eq!(
            headers[header::CONTENT_DISPOSITION],
            "attachment; filename=\"ad-creative.png\""
        );
    }

    #[tokio::test]
    async fn catalog_lists_every_entry() {
        let Json(templates) = templates().await;
        assert_eq!(templates.len(), 5);
        assert_eq!(templates[0].id, "classic");

        let Json(orientations) = orientations().await;
        assert_eq!(orientations.len(), 3);
    }
}
