//! 调色板生成服务客户端
//!
//! 两种请求：`GET /list/` 获取模型列表，`POST /api/` 生成颜色。
//! 每次请求都受固定 5 秒超时约束。

use std::time::Duration;

use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::{Value, json};
use thiserror::Error;
use tracing::debug;

use crate::models::{PALETTE_SIZE, Rgb};

/// 请求超时
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(5);

/// 网络请求错误，均视为致命错误
#[derive(Error, Debug)]
pub enum NetworkError {
    /// 连接失败或超时
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// 服务返回非成功状态码
    #[error("service responded with status {0}")]
    Status(StatusCode),

    /// 响应体不是预期的 JSON 结构
    #[error("malformed response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// 服务响应统一包裹在 `Result` 字段中
#[derive(Debug, Deserialize)]
struct ServiceResponse<T> {
    #[serde(rename = "Result")]
    result: T,
}

/// 调色板生成服务客户端
#[derive(Debug, Clone)]
pub struct PaletteClient {
    http: reqwest::Client,
    endpoint: String,
}

impl PaletteClient {
    pub fn new(endpoint: &str) -> Result<Self, NetworkError> {
        let http = reqwest::Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            endpoint: endpoint.trim_end_matches('/').to_string(),
        })
    }

    /// 获取可用模型名称
    pub async fn list_models(&self) -> Result<Vec<String>, NetworkError> {
        let url = format!("{}/list/", self.endpoint);
        debug!(%url, "listing models");
        let response = self.http.get(&url).send().await?;
        let body = read_body(response).await?;
        let parsed: ServiceResponse<Vec<String>> = serde_json::from_str(&body)?;
        Ok(parsed.result)
    }

    /// 请求生成颜色；锁定槽位原样发送，未锁定槽位发送 `"N"`
    pub async fn generate_colors(
        &self,
        model: &str,
        colors: [Rgb; PALETTE_SIZE],
        locks: [bool; PALETTE_SIZE],
    ) -> Result<[Rgb; PALETTE_SIZE], NetworkError> {
        let url = format!("{}/api/", self.endpoint);
        let body = generation_body(model, &colors, &locks);
        debug!(%url, %body, "generating colors");
        // 服务端按表单类型接收，但内容是 JSON
        let response = self
            .http
            .post(&url)
            .header(CONTENT_TYPE, "application/x-www-form-urlencoded")
            .body(body)
            .send()
            .await?;
        let body = read_body(response).await?;
        let parsed: ServiceResponse<[Rgb; PALETTE_SIZE]> = serde_json::from_str(&body)?;
        Ok(parsed.result)
    }
}

async fn read_body(response: reqwest::Response) -> Result<String, NetworkError> {
    let status = response.status();
    if !status.is_success() {
        return Err(NetworkError::Status(status));
    }
    Ok(response.text().await?)
}

/// 生成请求体：`{"model": ..., "input": [[r,g,b] | "N", ...]}`
pub fn generation_body(
    model: &str,
    colors: &[Rgb; PALETTE_SIZE],
    locks: &[bool; PALETTE_SIZE],
) -> String {
    let input: Vec<Value> = colors
        .iter()
        .zip(locks)
        .map(|(color, locked)| {
            if *locked {
                json!(color)
            } else {
                json!("N")
            }
        })
        .collect();
    json!({ "model": model, "input": input }).to_string()
}
