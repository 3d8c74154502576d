//! 下载完成后的后处理钩子（如计算校验和），供协调器在 `PostProcessing` 阶段调用。
//!
//! 对外使用入口为 [`crate::downloader`]。

use std::path::{Path, PathBuf};

use async_trait::async_trait;

use crate::internal::downloader::structs::ChecksumError;

/// 后处理的产出：最终路径，以及可选的摘要。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostProcessOutput {
    pub path: PathBuf,
    pub digest: Option<String>,
}

/// 后处理钩子：只在文件已完整写入目标路径后调用。
///
/// 钩子可以返回新的路径（例如改名后的文件）；返回的错误会原样包装为
/// [`DownloadError::Checksum`](crate::downloader::DownloadError::Checksum)。
#[async_trait]
pub trait PostProcessHook: Send + Sync {
    async fn process(&self, path: &Path) -> Result<PostProcessOutput, ChecksumError>;
}
