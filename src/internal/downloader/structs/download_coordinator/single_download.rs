//! 单流整文件下载。

use std::path::Path;

use futures_util::StreamExt;
use reqwest::Response;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::internal::downloader::structs::{
    ChunkError, DownloadError, DownloadProgress, ReassemblyError,
};
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::fetch_context::FetchContext;
use super::staging::{commit, staging_path};

/// 单流下载时的参数（形参超过 3 个，用 struct 承载）。
pub(crate) struct SingleDownloadParams<'a> {
    pub ctx: &'a FetchContext,
    /// 探测阶段保留的 GET 响应，存在则直接复用
    pub response: Option<Response>,
    /// 探测到的大小，已知时校验写入字节数
    pub expected: Option<u64>,
    pub destination: &'a Path,
    pub progress: &'a UnlockReactiveProperty<DownloadProgress>,
    pub cancel: &'a CancellationToken,
}

/// 单流下载：整文件 GET，流式写入暂存文件并更新进度，完整后改名为目标路径。返回写入字节数。
///
/// 网络与长度错误按分片 0 报告。
pub(crate) async fn run_single_stream_download(
    params: SingleDownloadParams<'_>,
) -> Result<u64, DownloadError> {
    let resp = match params.response {
        Some(r) => {
            debug!("复用探测阶段的响应");
            r
        }
        None => tokio::select! {
            biased;
            _ = params.cancel.cancelled() => return Err(DownloadError::Cancelled),
            resp = params.ctx.fetch().send() => {
                resp.map_err(|e| DownloadError::chunk(0, ChunkError::Request(e)))?
            }
        },
    };

    let status = resp.status();
    if !status.is_success() {
        return Err(DownloadError::chunk(0, ChunkError::Status(status)));
    }

    let staging = staging_path(params.destination);
    let mut file = File::create(&staging).await.map_err(ReassemblyError::Io)?;
    let mut stream = resp.bytes_stream();
    let mut bytes_done: u64 = 0;

    loop {
        let piece = tokio::select! {
            biased;
            _ = params.cancel.cancelled() => return Err(DownloadError::Cancelled),
            piece = stream.next() => piece,
        };
        let Some(piece) = piece else { break };
        let piece = piece.map_err(|e| DownloadError::chunk(0, ChunkError::Request(e)))?;

        bytes_done += piece.len() as u64;
        if let Some(expected) = params.expected {
            if bytes_done > expected {
                return Err(DownloadError::chunk(
                    0,
                    ChunkError::LengthMismatch { expected, actual: bytes_done },
                ));
            }
        }

        file.write_all(&piece).await.map_err(ReassemblyError::Io)?;
        params.progress.update_field(|p| p.bytes_done = bytes_done);
    }

    if let Some(expected) = params.expected {
        if bytes_done != expected {
            return Err(DownloadError::chunk(
                0,
                ChunkError::LengthMismatch { expected, actual: bytes_done },
            ));
        }
    }

    file.flush().await.map_err(ReassemblyError::Io)?;
    drop(file);
    commit(&staging, params.destination).await?;

    Ok(bytes_done)
}
