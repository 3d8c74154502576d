//! 下载协调器
//!
//! 单次下载的完整流程：探测大小 → 选择策略 → 单流或分片下载 → 后处理（可选）。
//!
//! ## 状态流转
//!
//! - 本地路径：`Init → Done`，不发起任何网络请求
//! - 单流：`Init → Probing → Simple → [PostProcessing] → Done`
//! - 分片：`Init → Probing → Planning → Fetching → Reassembling → [PostProcessing] → Done`
//! - 任一阶段出错：`→ Failed`
//!
//! 下载内容始终先写入 `<目标>.part`，完整后才改名为目标路径；失败时删除暂存文件，
//! 调用方不会看到半成品。由本库生成的临时目标文件在失败时一并删除。
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use ranged_download::downloader::{DownloadCoordinator, DownloadRequest};
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let request = DownloadRequest::builder("https://example.com/big.iso")
//!     .destination("big.iso")
//!     .worker_count(8)
//!     .force_parallel(true)
//!     .build();
//!
//! let coordinator = DownloadCoordinator::new(request)?;
//! let mut progress = coordinator.progress().watch();
//! tokio::spawn(async move {
//!     while progress.changed().await.is_ok() {
//!         if let Some(p) = progress.borrow() {
//!             println!("{:.1}%", p.pct());
//!         }
//!     }
//! });
//!
//! let result = coordinator.send().await?;
//! println!("{} bytes -> {}", result.bytes_written, result.path.display());
//! # Ok(())
//! # }
//! ```

pub(crate) mod chunked_download;
mod fetch_context;
pub(crate) mod single_download;
pub(crate) mod size_probe;
pub(crate) mod staging;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::internal::downloader::functions::build_client::build_client;
use crate::internal::downloader::functions::resolve_destination::{
    ResolvedDestination, resolve_destination,
};
use crate::internal::downloader::functions::select_strategy::{
    SelectStrategyParams, select_strategy,
};
use crate::internal::downloader::impl_traits::sha256_checksum::Sha256Checksum;
use crate::internal::downloader::traits::post_process::PostProcessHook;
use crate::internal::entrance::local::is_remote_url;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::download_error::DownloadError;
use super::download_mode::DownloadMode;
use super::download_progress::DownloadProgress;
use super::download_request::DownloadRequest;
use super::download_result::DownloadResult;
use super::download_state::DownloadState;

use chunked_download::{ChunkedDownloadParams, run_chunked_download};
use fetch_context::FetchContext;
use single_download::{SingleDownloadParams, run_single_stream_download};
use size_probe::probe_size;
use staging::{discard, staging_path};

/// 下载协调器：持有一次下载的请求、客户端与响应式状态。
///
/// 拥有两个响应式属性：`state()` 为当前阶段，`progress()` 为已下载字节数与总大小。
/// 每个协调器只能 `send` 一次。
pub struct DownloadCoordinator {
    client: Option<Client>,
    request: DownloadRequest,
    post_process: Arc<dyn PostProcessHook>,
    state: UnlockReactiveProperty<DownloadState>,
    progress: UnlockReactiveProperty<DownloadProgress>,
    cancel: CancellationToken,
}

/// 下载阶段（不含后处理）的产出。
struct Transferred {
    bytes: u64,
    chunks: usize,
    mode: DownloadMode,
}

impl DownloadCoordinator {
    /// 创建协调器；远程地址会按请求中的 TLS 策略构建客户端，本地路径不构建。
    pub fn new(request: DownloadRequest) -> Result<Self, DownloadError> {
        let client = if is_remote_url(request.url()) {
            Some(build_client(request.tls_policy())?)
        } else {
            None
        };

        Ok(Self {
            client,
            request,
            post_process: Arc::new(Sha256Checksum),
            state: UnlockReactiveProperty::new(DownloadState::Init),
            progress: UnlockReactiveProperty::new(DownloadProgress::default()),
            cancel: CancellationToken::new(),
        })
    }

    /// 使用外部构建好的客户端（此时请求中的 TLS 策略不再生效）。
    pub fn with_client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    /// 替换后处理钩子，默认为 [`Sha256Checksum`]；只在请求开启校验时调用。
    pub fn with_post_process(mut self, hook: impl PostProcessHook + 'static) -> Self {
        self.post_process = Arc::new(hook);
        self
    }

    /// 当前阶段；返回可共享句柄，`.watch()` 后 `changed().await` 监听阶段变化。
    pub fn state(&self) -> UnlockReactiveProperty<DownloadState> {
        self.state.clone()
    }

    /// 下载进度；返回可共享句柄。
    pub fn progress(&self) -> UnlockReactiveProperty<DownloadProgress> {
        self.progress.clone()
    }

    /// 取消令牌；调用 `cancel()` 后下载尽快以 [`DownloadError::Cancelled`] 结束。
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// 执行下载。
    pub async fn send(self) -> Result<DownloadResult, DownloadError> {
        let started = Instant::now();
        let url = self.request.url().to_string();

        if !is_remote_url(&url) {
            info!(path = %url, "本地路径，直接返回");
            self.state.update(DownloadState::Done);
            return Ok(DownloadResult {
                path: PathBuf::from(url),
                bytes_written: 0,
                elapsed: started.elapsed(),
                chunks: 0,
                mode: DownloadMode::LocalPassThrough,
                checksum: None,
            });
        }

        let destination = match resolve_destination(&self.request) {
            Ok(d) => d,
            Err(e) => {
                self.state.update(DownloadState::Failed);
                warn!(url = %url, error = %e, "无法确定保存路径");
                return Err(e.into());
            }
        };
        info!(url = %url, path = %destination.path.display(), "开始下载");

        let transferred = match self.transfer(&destination).await {
            Ok(t) => t,
            Err(e) => return Err(self.fail(&destination, e).await),
        };

        let mut path = destination.path.clone();
        let mut checksum = None;
        if self.request.verify_checksum() {
            self.state.update(DownloadState::PostProcessing);
            match self.post_process.process(&destination.path).await {
                Ok(output) => {
                    path = output.path;
                    checksum = output.digest;
                }
                Err(e) => {
                    discard(&destination.path).await;
                    return Err(self.fail(&destination, e.into()).await);
                }
            }
        }

        self.state.update(DownloadState::Done);
        let elapsed = started.elapsed();
        info!(
            path = %path.display(),
            bytes = transferred.bytes,
            chunks = transferred.chunks,
            ?elapsed,
            "下载完成"
        );

        Ok(DownloadResult {
            path,
            bytes_written: transferred.bytes,
            elapsed,
            chunks: transferred.chunks,
            checksum,
            mode: transferred.mode,
        })
    }

    /// 探测并按选定策略把内容写入目标路径。
    async fn transfer(&self, destination: &ResolvedDestination) -> Result<Transferred, DownloadError> {
        let client = match &self.client {
            Some(c) => c.clone(),
            None => build_client(self.request.tls_policy())?,
        };
        let ctx = FetchContext::new(client, &self.request);

        self.state.update(DownloadState::Probing);
        let probe = tokio::select! {
            biased;
            _ = self.cancel.cancelled() => return Err(DownloadError::Cancelled),
            probe = probe_size(&ctx) => probe?,
        };
        self.progress.update_field(|p| p.total = probe.size);

        let mode = select_strategy(&SelectStrategyParams {
            size: probe.size,
            accepts_ranges: probe.accepts_ranges,
            requested_workers: self.request.worker_count(),
            force_parallel: self.request.force_parallel(),
            parallel_threshold: self.request.parallel_threshold(),
        });
        info!(size = ?probe.size, accepts_ranges = probe.accepts_ranges, ?mode, "已选择下载方式");

        match (mode, probe.size) {
            (DownloadMode::Chunked { workers }, Some(total)) => {
                // 分片不复用探测响应
                drop(probe.response);
                let (bytes, chunks) = run_chunked_download(ChunkedDownloadParams {
                    ctx: &ctx,
                    total,
                    workers,
                    destination: &destination.path,
                    state: &self.state,
                    progress: &self.progress,
                    cancel: &self.cancel,
                })
                .await?;
                Ok(Transferred { bytes, chunks, mode })
            }
            _ => {
                self.state.update(DownloadState::Simple);
                let bytes = run_single_stream_download(SingleDownloadParams {
                    ctx: &ctx,
                    response: probe.response,
                    expected: probe.size,
                    destination: &destination.path,
                    progress: &self.progress,
                    cancel: &self.cancel,
                })
                .await?;
                Ok(Transferred {
                    bytes,
                    chunks: 1,
                    mode: DownloadMode::SingleStream,
                })
            }
        }
    }

    /// 失败收尾：切到 `Failed`，清理暂存文件与本库生成的临时文件。
    async fn fail(&self, destination: &ResolvedDestination, err: DownloadError) -> DownloadError {
        self.state.update(DownloadState::Failed);
        discard(&staging_path(&destination.path)).await;
        if destination.generated {
            discard(&destination.path).await;
        }
        warn!(path = %destination.path.display(), kind = ?err.kind(), error = %err, "下载失败");
        err
    }
}
