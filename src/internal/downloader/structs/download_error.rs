//! 下载相关错误类型。
//!
//! 每一层一个错误枚举，最终汇总到 [`DownloadError`]；通过 [`DownloadError::kind`] 取得错误分类。

use std::path::PathBuf;

use reqwest::StatusCode;
use thiserror::Error;

/// 探测资源大小失败。
#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("探测请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("HTTP 客户端不支持该协议: {0}")]
    UnsupportedScheme(String),
}

/// 无法规划分片。
#[derive(Debug, Error)]
pub enum PlanningError {
    #[error("分片数为 0，无法规划")]
    ZeroWorkers,

    #[error("资源大小为 0，无法切分")]
    EmptyResource,
}

/// 单个分片拉取失败。
#[derive(Debug, Error)]
pub enum ChunkError {
    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("服务器返回非成功状态: {0}")]
    Status(StatusCode),

    #[error("分片长度不符：期望 {expected} 字节，实际 {actual} 字节")]
    LengthMismatch { expected: u64, actual: u64 },

    #[error("写入分片临时文件失败: {0}")]
    Spool(#[from] std::io::Error),

    #[error("分片被取消")]
    Cancelled,
}

/// 重组写文件失败。
#[derive(Debug, Error)]
pub enum ReassemblyError {
    #[error("分片 {0} 缺失")]
    MissingChunk(usize),

    #[error("分片 {0} 未成功，拒绝重组")]
    FailedChunk(usize),

    #[error("分片槽位 {slot} 中的分片序号为 {index}")]
    IndexMismatch { slot: usize, index: usize },

    #[error("写入文件失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("写入字节数不符：期望 {expected}，实际 {actual}")]
    SizeMismatch { expected: u64, actual: u64 },
}

/// 后处理（校验和）失败，本库只透传不解释。
#[derive(Debug, Error)]
pub enum ChecksumError {
    #[error("读取文件失败: {0}")]
    Io(#[from] std::io::Error),

    #[error("后处理钩子失败: {0}")]
    Hook(String),
}

/// 目标路径解析失败。
#[derive(Debug, Error)]
pub enum DestinationError {
    #[error("无法从 URL 推导文件名: {0}")]
    NoFileName(String),

    #[error("创建临时文件失败: {0}")]
    TempFile(std::io::Error),
}

/// 错误分类。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Probe,
    Planning,
    Chunk,
    Reassembly,
    Checksum,
    Destination,
    Client,
    Cancelled,
    Internal,
}

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("探测失败: {0}")]
    Probe(#[from] ProbeError),

    #[error("规划失败: {0}")]
    Planning(#[from] PlanningError),

    #[error("分片 {index} 下载失败: {source}")]
    Chunk {
        index: usize,
        #[source]
        source: ChunkError,
    },

    #[error("重组失败: {0}")]
    Reassembly(#[from] ReassemblyError),

    #[error("校验失败: {0}")]
    Checksum(#[from] ChecksumError),

    #[error("目标路径错误: {0}")]
    Destination(#[from] DestinationError),

    #[error("读取证书失败 {path}: {source}")]
    ReadCertificate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("构建 HTTP 客户端失败: {0}")]
    ClientBuild(reqwest::Error),

    #[error("下载被取消")]
    Cancelled,

    #[error("分片任务失败: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
}

impl DownloadError {
    /// 错误所属分类。
    pub fn kind(&self) -> ErrorKind {
        match self {
            DownloadError::Probe(_) => ErrorKind::Probe,
            DownloadError::Planning(_) => ErrorKind::Planning,
            DownloadError::Chunk { .. } => ErrorKind::Chunk,
            DownloadError::Reassembly(_) => ErrorKind::Reassembly,
            DownloadError::Checksum(_) => ErrorKind::Checksum,
            DownloadError::Destination(_) => ErrorKind::Destination,
            DownloadError::ReadCertificate { .. } | DownloadError::ClientBuild(_) => {
                ErrorKind::Client
            }
            DownloadError::Cancelled => ErrorKind::Cancelled,
            DownloadError::TaskJoin(_) => ErrorKind::Internal,
        }
    }

    pub(crate) fn chunk(index: usize, source: ChunkError) -> Self {
        DownloadError::Chunk { index, source }
    }
}
