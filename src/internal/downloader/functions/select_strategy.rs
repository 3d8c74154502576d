//! 策略选择：单流还是分片，纯函数无 I/O。

use crate::internal::downloader::structs::{
    DownloadMode, FALLBACK_WORKER_COUNT, MAX_WORKER_COUNT, MIN_WORKER_COUNT,
};

/// 选择下载策略时的输入（形参超过 3 个，用 struct 承载）。
#[derive(Debug, Clone, Copy)]
pub struct SelectStrategyParams {
    /// 探测到的资源大小，未知为 `None`
    pub size: Option<u64>,
    /// 服务器是否接受 Range 请求
    pub accepts_ranges: bool,
    /// 调用方请求的分片数（未收敛）
    pub requested_workers: i64,
    pub force_parallel: bool,
    pub parallel_threshold: u64,
}

/// 收敛分片数：`[1, 10]` 内原样使用，否则回退为 10。
pub fn resolve_worker_count(requested: i64) -> usize {
    if (MIN_WORKER_COUNT..=MAX_WORKER_COUNT).contains(&requested) {
        requested as usize
    } else {
        FALLBACK_WORKER_COUNT
    }
}

/// 大小未知、服务器拒绝 Range、或小于阈值且未强制分片时走单流，否则分片。
pub fn select_strategy(params: &SelectStrategyParams) -> DownloadMode {
    let Some(size) = params.size else {
        return DownloadMode::SingleStream;
    };
    if !params.accepts_ranges {
        return DownloadMode::SingleStream;
    }
    if size < params.parallel_threshold && !params.force_parallel {
        return DownloadMode::SingleStream;
    }
    DownloadMode::Chunked {
        workers: resolve_worker_count(params.requested_workers),
    }
}
