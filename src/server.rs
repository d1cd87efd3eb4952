//! # HTTP 服务模块
//!
//! 通过 JSON 接口提供隐藏与恢复功能，图像以 base64 编码传输：
//!
//! * `POST /api/hide` - 请求 `{"msg": "...", "png": "<base64>"}`，返回 `image/png`。
//! * `POST /api/extract` - 请求 `{"png": "<base64>"}`，返回 `{"msg": "..."}`。
//! * `GET /`、`GET /index.html` - 返回静态资源目录中的 `index.html`。
//!
//! 请求体总是按 JSON 解析，不检查 `Content-Type`。
//! 每个请求独立解码自己的图像并生成自己的输出，请求之间没有共享状态。

use crate::codec;
use crate::config::ServerConfig;
use crate::error::CapacityError;
use crate::steganography::{embed, extract};
use anyhow::{Context, Result};
use axum::{
    Json, Router,
    body::Bytes,
    extract::{DefaultBodyLimit, rejection::BytesRejection},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
    routing::{get_service, post},
};
use base64::{Engine as _, engine::general_purpose};
use image::GenericImageView;
use log::{error, info, warn};
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use thiserror::Error;
use tokio::net::TcpListener;
use tower_http::services::ServeFile;

/// `/api/hide` 的请求体。缺失的字段按空字符串处理。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HideRequest {
    /// 要隐藏的文本
    pub msg: String,
    /// base64 编码的载体图像
    pub png: String,
}

/// `/api/extract` 的请求体。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractRequest {
    /// base64 编码的隐写图像
    pub png: String,
}

/// `/api/extract` 的响应体。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractResponse {
    /// 恢复出的文本，非 UTF-8 字节会被替换为 U+FFFD
    pub msg: String,
}

/// 接口层的错误，每一种都对应一个状态码和纯文本响应体。
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Invalid request")]
    InvalidRequest,

    #[error("Invalid base64 PNG data")]
    InvalidBase64,

    #[error("Invalid PNG data")]
    InvalidImage,

    #[error(transparent)]
    Capacity(#[from] CapacityError),

    #[error("Error encoding the image")]
    Encoding,

    #[error("Invalid method")]
    MethodNotAllowed,

    #[error("Page not found")]
    NotFound,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest
            | ApiError::InvalidBase64
            | ApiError::InvalidImage
            | ApiError::Capacity(_) => StatusCode::BAD_REQUEST,
            ApiError::Encoding => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// 构建服务的路由。
pub fn router(config: &ServerConfig) -> Router {
    let index = ServeFile::new(config.index_file());

    Router::new()
        .route("/api/hide", post(hide_handler).fallback(invalid_method))
        .route("/api/extract", post(extract_handler).fallback(invalid_method))
        .route("/", get_service(index.clone()).fallback(invalid_method))
        .route("/index.html", get_service(index).fallback(invalid_method))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(config.body_limit))
}

/// 绑定监听地址并运行服务，直到出错或收到 Ctrl-C。
pub async fn run(config: ServerConfig) -> Result<()> {
    let app = router(&config);
    let addr = config.bind_address();

    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Unable to bind server address: {addr}"))?;

    info!("Server listening on {}", addr);
    info!("Serving index from {}", config.index_file().display());

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Error while running the server")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        error!("Unable to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}

/// 处理 `POST /api/hide`。
pub async fn hide_handler(body: Result<Bytes, BytesRejection>) -> Result<Response, ApiError> {
    let request: HideRequest = parse_request(body)?;

    let png = blocking(move || hide_message(&request)).await?;

    Ok(([(header::CONTENT_TYPE, "image/png")], png).into_response())
}

/// 处理 `POST /api/extract`。
pub async fn extract_handler(
    body: Result<Bytes, BytesRejection>,
) -> Result<Json<ExtractResponse>, ApiError> {
    let request: ExtractRequest = parse_request(body)?;

    let response = blocking(move || extract_message(&request)).await?;

    Ok(Json(response))
}

/// 读取请求体并解析 JSON。超过大小上限或无法解析的请求体都视为无效请求。
fn parse_request<T>(body: Result<Bytes, BytesRejection>) -> Result<T, ApiError>
where
    T: DeserializeOwned,
{
    let body = body.map_err(|e| {
        warn!("Rejected unreadable request body: {}", e);
        ApiError::InvalidRequest
    })?;

    serde_json::from_slice(&body).map_err(|e| {
        warn!("Rejected malformed JSON request: {}", e);
        ApiError::InvalidRequest
    })
}

async fn invalid_method() -> ApiError {
    ApiError::MethodNotAllowed
}

async fn not_found() -> ApiError {
    ApiError::NotFound
}

/// 解码载体、隐藏消息并编码为 PNG。
pub fn hide_message(request: &HideRequest) -> Result<Vec<u8>, ApiError> {
    let carrier = decode_carrier(&request.png)?;
    let (width, height) = carrier.dimensions();

    let hidden = embed(&carrier, request.msg.as_bytes()).map_err(|e| {
        warn!("Rejected hide request for {}x{} image: {}", width, height, e);
        ApiError::from(e)
    })?;

    let png = codec::encode_png(&hidden).map_err(|e| {
        error!("Failed to encode hidden image: {:#}", e);
        ApiError::Encoding
    })?;

    info!(
        "Hid {} bytes in {}x{} image ({} bytes PNG)",
        request.msg.len(),
        width,
        height,
        png.len()
    );
    Ok(png)
}

/// 解码图像并提取隐藏的文本。
pub fn extract_message(request: &ExtractRequest) -> Result<ExtractResponse, ApiError> {
    let carrier = decode_carrier(&request.png)?;
    let message = extract(&carrier);

    info!("Extracted {} bytes", message.len());
    Ok(ExtractResponse {
        msg: String::from_utf8_lossy(&message).into_owned(),
    })
}

fn decode_carrier(encoded: &str) -> Result<image::DynamicImage, ApiError> {
    let bytes = general_purpose::STANDARD.decode(encoded).map_err(|e| {
        warn!("Rejected invalid base64 data: {}", e);
        ApiError::InvalidBase64
    })?;

    codec::decode(&bytes).map_err(|e| {
        warn!("Rejected undecodable image: {:#}", e);
        ApiError::InvalidImage
    })
}

/// 在阻塞线程池中执行解码、隐写和编码，避免占用异步工作线程。
async fn blocking<T, F>(job: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, ApiError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(job).await.map_err(|e| {
        error!("Request worker failed: {}", e);
        ApiError::Encoding
    })?
}
