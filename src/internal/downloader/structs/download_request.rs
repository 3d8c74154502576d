//! 单次下载请求：构建后只读。

use std::path::{Path, PathBuf};
use std::time::Duration;

use bytes::Bytes;
use serde::Deserialize;

use super::download_config::{DEFAULT_PARALLEL_THRESHOLD, DEFAULT_WORKER_COUNT};
use super::tls_policy::TlsPolicy;

/// 单次下载请求。
///
/// 通过 [`DownloadRequest::builder`] 链式构建，构建完成后不可修改。
/// 也可从配置文件反序列化（缺省字段取默认值，请求体不参与反序列化）。
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DownloadRequest {
    pub(crate) url: String,
    #[serde(skip)]
    pub(crate) body: Option<Bytes>,
    pub(crate) timeout: Option<Duration>,
    pub(crate) tls_policy: TlsPolicy,
    pub(crate) destination: Option<PathBuf>,
    pub(crate) suffix: Option<String>,
    pub(crate) derive_name_from_url: bool,
    pub(crate) output_dir: Option<PathBuf>,
    pub(crate) worker_count: i64,
    pub(crate) force_parallel: bool,
    pub(crate) verify_checksum: bool,
    pub(crate) parallel_threshold: u64,
}

impl Default for DownloadRequest {
    fn default() -> Self {
        Self {
            url: String::new(),
            body: None,
            timeout: None,
            tls_policy: TlsPolicy::default(),
            destination: None,
            suffix: None,
            derive_name_from_url: false,
            output_dir: None,
            worker_count: DEFAULT_WORKER_COUNT,
            force_parallel: false,
            verify_checksum: false,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }
}

impl DownloadRequest {
    /// 以 URL 开始构建请求。
    pub fn builder(url: impl Into<String>) -> DownloadRequestBuilder {
        DownloadRequestBuilder {
            request: DownloadRequest {
                url: url.into(),
                ..Default::default()
            },
        }
    }

    /// 全部使用默认参数的请求。
    pub fn new(url: impl Into<String>) -> Self {
        Self::builder(url).build()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn body(&self) -> Option<&Bytes> {
        self.body.as_ref()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    pub fn tls_policy(&self) -> &TlsPolicy {
        &self.tls_policy
    }

    pub fn destination(&self) -> Option<&Path> {
        self.destination.as_deref()
    }

    pub fn suffix(&self) -> Option<&str> {
        self.suffix.as_deref()
    }

    pub fn derive_name_from_url(&self) -> bool {
        self.derive_name_from_url
    }

    pub fn output_dir(&self) -> Option<&Path> {
        self.output_dir.as_deref()
    }

    /// 调用方请求的并发分片数（未经收敛）。
    pub fn worker_count(&self) -> i64 {
        self.worker_count
    }

    pub fn force_parallel(&self) -> bool {
        self.force_parallel
    }

    pub fn verify_checksum(&self) -> bool {
        self.verify_checksum
    }

    pub fn parallel_threshold(&self) -> u64 {
        self.parallel_threshold
    }
}

/// [`DownloadRequest`] 构建器；所有方法都消耗 self 并返回 self。
#[derive(Debug, Clone)]
pub struct DownloadRequestBuilder {
    request: DownloadRequest,
}

impl DownloadRequestBuilder {
    /// 设置请求体；设置后所有请求都以 POST 发送。
    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.request.body = Some(body.into());
        self
    }

    /// 单个请求的超时时间，每个分片独立计时。
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.request.timeout = Some(timeout);
        self
    }

    pub fn tls_policy(mut self, tls_policy: TlsPolicy) -> Self {
        self.request.tls_policy = tls_policy;
        self
    }

    /// 设置保存路径；传空路径等同于不设置。
    pub fn destination(mut self, path: impl AsRef<Path>) -> Self {
        let p = path.as_ref();
        self.request.destination = if p.as_os_str().is_empty() {
            None
        } else {
            Some(p.to_path_buf())
        };
        self
    }

    /// 生成临时文件名时使用的后缀。
    pub fn suffix(mut self, suffix: impl Into<String>) -> Self {
        self.request.suffix = Some(suffix.into());
        self
    }

    /// 未设置保存路径时，取 URL 最后一段作为文件名。
    pub fn derive_name_from_url(mut self, derive: bool) -> Self {
        self.request.derive_name_from_url = derive;
        self
    }

    /// 从 URL 推导文件名时的存放目录，默认当前目录。
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.request.output_dir = Some(dir.into());
        self
    }

    /// 并发分片数；不在 `[1, 10]` 内时回退为 10。
    pub fn worker_count(mut self, n: i64) -> Self {
        self.request.worker_count = n;
        self
    }

    /// 即使资源小于分片阈值也走分片下载。
    pub fn force_parallel(mut self, force: bool) -> Self {
        self.request.force_parallel = force;
        self
    }

    /// 下载完成后计算校验和。
    pub fn verify_checksum(mut self, verify: bool) -> Self {
        self.request.verify_checksum = verify;
        self
    }

    pub fn parallel_threshold(mut self, bytes: u64) -> Self {
        self.request.parallel_threshold = bytes;
        self
    }

    pub fn build(self) -> DownloadRequest {
        self.request
    }
}
