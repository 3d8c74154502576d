//! 分片下载：规划 → 并发拉取 → 顺序重组 → 提交。

use std::path::Path;

use tempfile::TempDir;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::internal::downloader::functions::plan_ranges::plan_ranges;
use crate::internal::downloader::structs::download_config::SPOOL_DIR_PREFIX;
use crate::internal::downloader::structs::{
    ChunkError, ChunkResult, DownloadError, DownloadProgress, DownloadState, ReassemblyError,
};
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::super::fetch_context::FetchContext;
use super::super::staging::{commit, staging_path};
use super::reassemble::reassemble;
use super::spawn_tasks::{ChunkSlots, SpawnRangeTasksParams, fetch_all_ranges};

/// 分片下载时的参数（形参超过 3 个，用 struct 承载）。
pub(crate) struct ChunkedDownloadParams<'a> {
    pub ctx: &'a FetchContext,
    pub total: u64,
    pub workers: usize,
    pub destination: &'a Path,
    pub state: &'a UnlockReactiveProperty<DownloadState>,
    pub progress: &'a UnlockReactiveProperty<DownloadProgress>,
    /// 调用方的取消令牌
    pub cancel: &'a CancellationToken,
}

/// 取出序号最小的真实失败（被连带取消的分片不算）。
fn take_first_failure(slots: &mut ChunkSlots) -> Option<DownloadError> {
    let position = slots.iter().position(|slot| {
        matches!(
            slot,
            Some(ChunkResult { outcome: Err(e), .. }) if !matches!(e, ChunkError::Cancelled)
        )
    })?;
    match slots[position].take() {
        Some(ChunkResult { range, outcome: Err(e) }) => Some(DownloadError::chunk(range.index, e)),
        _ => None,
    }
}

/// 在目标文件同目录下创建分片临时目录，返回时连同其中的分片文件一起删除。
fn create_spool_dir(destination: &Path) -> Result<TempDir, ReassemblyError> {
    let parent = destination
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or(Path::new("."));
    let dir = tempfile::Builder::new()
        .prefix(SPOOL_DIR_PREFIX)
        .tempdir_in(parent)?;
    Ok(dir)
}

/// 分片下载入口：返回 (写入字节数, 实际分片数)。
pub(crate) async fn run_chunked_download(
    params: ChunkedDownloadParams<'_>,
) -> Result<(u64, usize), DownloadError> {
    params.state.update(DownloadState::Planning);
    let ranges = plan_ranges(params.total, params.workers)?;
    info!(total = params.total, chunks = ranges.len(), "分片规划完成");

    // 先于 slots 声明：slots 中的分片文件先释放，目录后删除
    let spool_dir = create_spool_dir(params.destination)?;

    params.state.update(DownloadState::Fetching);
    // 子令牌：分片失败只取消兄弟分片；调用方取消会一并传递下来
    let workers_cancel = params.cancel.child_token();
    let mut slots = fetch_all_ranges(SpawnRangeTasksParams {
        ctx: params.ctx,
        ranges: &ranges,
        spool_dir: spool_dir.path(),
        progress: params.progress,
        cancel: &workers_cancel,
    })
    .await?;

    if params.cancel.is_cancelled() {
        return Err(DownloadError::Cancelled);
    }
    if let Some(err) = take_first_failure(&mut slots) {
        return Err(err);
    }

    params.state.update(DownloadState::Reassembling);
    let staging = staging_path(params.destination);
    let written = reassemble(&slots, &staging, params.total).await?;
    commit(&staging, params.destination).await?;

    Ok((written, ranges.len()))
}
