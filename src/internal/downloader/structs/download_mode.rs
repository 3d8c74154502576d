/// 下载方式：由策略选择器决定。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DownloadMode {
    /// 本地路径，原样返回，不访问网络
    LocalPassThrough,
    /// 单流整文件下载
    SingleStream,
    /// 分片并发下载，`workers` 为收敛后的分片数
    Chunked { workers: usize },
}

impl DownloadMode {
    pub fn is_chunked(&self) -> bool {
        matches!(self, DownloadMode::Chunked { .. })
    }
}
