use std::path::PathBuf;
use std::time::Duration;

use super::download_mode::DownloadMode;

/// 单次下载的结果。
#[derive(Debug, Clone)]
pub struct DownloadResult {
    /// 最终文件路径（本地直通时为原样返回的输入）
    pub path: PathBuf,
    /// 实际写入的字节数
    pub bytes_written: u64,
    /// 耗时
    pub elapsed: Duration,
    /// 使用的分片数：单流为 1，本地直通为 0
    pub chunks: usize,
    /// 开启校验时的摘要（十六进制）
    pub checksum: Option<String>,
    /// 实际采用的下载方式
    pub mode: DownloadMode,
}
