//! Response shapes shared by the JSON and PDF handlers.

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::documents::DocumentError;
use crate::errors::AppError;
use crate::render::{render_pdf, Canvas};

/// `{"message":"success","data":...}`, the envelope every JSON endpoint returns.
#[derive(Debug, Serialize)]
pub struct Success<T> {
    pub message: &'static str,
    pub data: T,
}

pub fn success<T: Serialize>(data: T) -> Json<Success<T>> {
    Json(Success {
        message: "success",
        data,
    })
}

pub fn created<T: Serialize>(data: T) -> (StatusCode, Json<Success<T>>) {
    (StatusCode::CREATED, success(data))
}

/// Row count affected by an update or delete.
#[derive(Debug, Serialize)]
pub struct Changes {
    pub changes: u64,
}

/// A downloadable PDF. The file name is sent both as an ASCII fallback and
/// percent-encoded UTF-8 so accented names survive.
pub fn pdf_attachment(bytes: Vec<u8>, file_name: &str) -> Response {
    let disposition = format!(
        "attachment; filename=\"{}\"; filename*=UTF-8''{}",
        ascii_fallback(file_name),
        percent_encode(file_name)
    );
    let disposition = HeaderValue::from_str(&disposition)
        .unwrap_or_else(|_| HeaderValue::from_static("attachment"));

    (
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static("application/pdf"),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response()
}

/// Lays out and serialises a document off the async runtime.
pub async fn render_document<F>(title: String, build: F) -> Result<Vec<u8>, AppError>
where
    F: FnOnce() -> Result<Canvas, DocumentError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || build().map(|canvas| render_pdf(&canvas, &title)))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF render task failed: {e}")))?
        .map_err(AppError::from)
}

fn ascii_fallback(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            c if c.is_ascii_graphic() || c == ' ' => c,
            _ => '_',
        })
        .collect()
}

fn percent_encode(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for byte in name.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'.' | b'_' | b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}
