//! 分片下载：拉取单个字节区间并流式写入本分片的临时文件，结果只落在本分片的 ChunkResult 中，绝不向外抛出。

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::StreamExt;
use reqwest::header::RANGE;
use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};
use tokio_util::sync::CancellationToken;

use crate::internal::downloader::structs::{
    ByteRange, ChunkError, ChunkFile, ChunkResult, DownloadProgress,
};
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::super::fetch_context::FetchContext;

/// 拉取单个分片时的参数（形参超过 3 个，用 struct 承载）。
pub(crate) struct FetchChunkParams {
    pub ctx: FetchContext,
    pub range: ByteRange,
    /// 分片临时文件所在目录
    pub spool_dir: Arc<Path>,
    pub bytes_done: Arc<AtomicU64>,
    pub progress: UnlockReactiveProperty<DownloadProgress>,
    pub cancel: CancellationToken,
}

/// 发起 Range 请求并写入临时文件；状态码非 2xx、长度不符均视为失败，超长时立即中止。
///
/// 失败或被取消时临时文件随 `TempPath` 释放而删除。
async fn fetch_range_to_file(params: &FetchChunkParams) -> Result<ChunkFile, ChunkError> {
    let expected = params.range.len();

    let resp = params
        .ctx
        .fetch()
        .header(RANGE, params.range.header_value())
        .send()
        .await?;

    let status = resp.status();
    if !status.is_success() {
        return Err(ChunkError::Status(status));
    }

    let (std_file, path) = tempfile::Builder::new()
        .prefix(&format!("chunk-{}-", params.range.index))
        .tempfile_in(&params.spool_dir)?
        .into_parts();
    let mut writer = BufWriter::new(File::from_std(std_file));
    let mut stream = resp.bytes_stream();
    let mut written: u64 = 0;

    while let Some(piece) = stream.next().await {
        let piece = piece?;
        let len = piece.len() as u64;
        let actual = written + len;
        if actual > expected {
            return Err(ChunkError::LengthMismatch { expected, actual });
        }
        writer.write_all(&piece).await?;
        written = actual;

        let current = params.bytes_done.fetch_add(len, Ordering::Relaxed) + len;
        params.progress.update_field(|p| p.bytes_done = p.bytes_done.max(current));
    }

    if written != expected {
        return Err(ChunkError::LengthMismatch { expected, actual: written });
    }
    writer.flush().await?;

    Ok(ChunkFile::new(path, written))
}

/// 拉取单个分片；被取消时返回 `ChunkError::Cancelled`，进行中的请求随 future 一起丢弃。
pub(crate) async fn fetch_chunk(params: FetchChunkParams) -> ChunkResult {
    let range = params.range;

    tokio::select! {
        biased;
        _ = params.cancel.cancelled() => ChunkResult::failure(range, ChunkError::Cancelled),
        outcome = fetch_range_to_file(&params) => match outcome {
            Ok(file) => ChunkResult::success(range, file),
            Err(e) => ChunkResult::failure(range, e),
        },
    }
}
