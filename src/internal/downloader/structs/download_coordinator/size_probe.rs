//! 探测资源大小与 Range 支持：先 HEAD，失败或缺少 Content-Length 时回退到 GET。
//!
//! 回退得到的 GET 响应不读取响应体，交给单流下载直接复用；走分片时直接丢弃。

use reqwest::Response;
use reqwest::header::{ACCEPT_RANGES, CONTENT_LENGTH, HeaderMap};
use tracing::debug;

use crate::internal::downloader::structs::ProbeError;

use super::fetch_context::FetchContext;

/// 探测结果。
#[derive(Debug)]
pub(crate) struct ProbeOutcome {
    /// 资源大小，响应头缺失或无法解析时为 `None`
    pub size: Option<u64>,
    /// 服务器明确返回 `Accept-Ranges: none` 时为 false
    pub accepts_ranges: bool,
    /// 回退 GET 时保留的响应（响应体未读取）
    pub response: Option<Response>,
}

pub(crate) fn content_length(headers: &HeaderMap) -> Option<u64> {
    headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse::<u64>().ok())
}

fn accepts_ranges(headers: &HeaderMap) -> bool {
    !headers
        .get(ACCEPT_RANGES)
        .is_some_and(|v| v.as_bytes().eq_ignore_ascii_case(b"none"))
}

/// HTTP 客户端只能拉取 http/https；ftp/ftps 虽被识别为远程地址，但在这里报错。
fn check_scheme(url: &str) -> Result<(), ProbeError> {
    let scheme = url.split_once(':').map(|(s, _)| s).unwrap_or_default();
    if scheme.eq_ignore_ascii_case("http") || scheme.eq_ignore_ascii_case("https") {
        Ok(())
    } else {
        Err(ProbeError::UnsupportedScheme(scheme.to_ascii_lowercase()))
    }
}

pub(crate) async fn probe_size(ctx: &FetchContext) -> Result<ProbeOutcome, ProbeError> {
    check_scheme(&ctx.url)?;

    // 带请求体时 HEAD 没有意义，直接用与拉取相同的 POST 探测
    if ctx.body.is_none() {
        let resp = ctx.head().send().await?;
        let status = resp.status();
        if status.is_success() {
            if let Some(size) = content_length(resp.headers()) {
                debug!(size, "HEAD 探测成功");
                return Ok(ProbeOutcome {
                    size: Some(size),
                    accepts_ranges: accepts_ranges(resp.headers()),
                    response: None,
                });
            }
            debug!("HEAD 未返回 Content-Length，回退到 GET");
        } else {
            debug!(%status, "HEAD 探测失败，回退到 GET");
        }
    }

    let resp = ctx.fetch().send().await?.error_for_status()?;
    let size = content_length(resp.headers());
    debug!(?size, "GET 探测完成");

    Ok(ProbeOutcome {
        size,
        accepts_ranges: accepts_ranges(resp.headers()),
        response: Some(resp),
    })
}
