//! 分片下载：每个分片 spawn 一个任务，全部等待结束后按序号放入结果槽位。

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::AtomicU64;

use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::internal::downloader::structs::{
    ByteRange, ChunkError, ChunkResult, DownloadError, DownloadProgress,
};
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::super::fetch_context::FetchContext;
use super::range_request::{FetchChunkParams, fetch_chunk};

/// 每个分片一个槽位，下标即分片序号。
pub(crate) type ChunkSlots = Vec<Option<ChunkResult>>;

/// spawn 分片任务时的参数（形参超过 3 个，用 struct 承载）。
pub(crate) struct SpawnRangeTasksParams<'a> {
    pub ctx: &'a FetchContext,
    pub ranges: &'a [ByteRange],
    /// 分片临时文件所在目录
    pub spool_dir: &'a Path,
    pub progress: &'a UnlockReactiveProperty<DownloadProgress>,
    /// 分片任务共用的取消令牌；任一分片失败后由这里触发
    pub cancel: &'a CancellationToken,
}

/// spawn 全部分片任务并等待每一个结束（不是首个失败即返回）。
///
/// 首个失败出现时取消令牌，其余分片尽快以 `Cancelled` 结束；返回前所有任务都已结束。
pub(crate) async fn fetch_all_ranges(
    params: SpawnRangeTasksParams<'_>,
) -> Result<ChunkSlots, DownloadError> {
    let bytes_done = Arc::new(AtomicU64::new(0));
    let spool_dir: Arc<Path> = Arc::from(params.spool_dir);
    let mut tasks = JoinSet::new();

    for range in params.ranges {
        tasks.spawn(fetch_chunk(FetchChunkParams {
            ctx: params.ctx.clone(),
            range: *range,
            spool_dir: Arc::clone(&spool_dir),
            bytes_done: Arc::clone(&bytes_done),
            progress: params.progress.clone(),
            cancel: params.cancel.clone(),
        }));
    }

    let mut slots: ChunkSlots = params.ranges.iter().map(|_| None).collect();

    while let Some(joined) = tasks.join_next().await {
        let result = match joined {
            Ok(result) => result,
            Err(join_err) => {
                params.cancel.cancel();
                tasks.shutdown().await;
                return Err(DownloadError::TaskJoin(join_err));
            }
        };

        let index = result.range.index;
        match &result.outcome {
            Ok(file) => debug!(index, len = file.len(), "分片完成"),
            Err(ChunkError::Cancelled) => debug!(index, "分片已取消"),
            Err(e) => {
                warn!(index, error = %e, "分片失败，取消其余分片");
                params.cancel.cancel();
            }
        }

        if let Some(slot) = slots.get_mut(index) {
            *slot = Some(result);
        }
    }

    Ok(slots)
}
