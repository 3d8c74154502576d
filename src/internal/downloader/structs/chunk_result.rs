use std::path::Path;

use tempfile::TempPath;

use super::byte_range::ByteRange;
use super::download_error::ChunkError;

/// 已落盘的分片：临时文件随本值释放而删除。
#[derive(Debug)]
pub struct ChunkFile {
    path: TempPath,
    len: u64,
}

impl ChunkFile {
    pub(crate) fn new(path: TempPath, len: u64) -> Self {
        Self { path, len }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 写入的字节数（已校验等于区间长度）
    pub fn len(&self) -> u64 {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// 单个分片的拉取结果：由唯一的拉取任务生成，只读交给重组器。
#[derive(Debug)]
pub struct ChunkResult {
    /// 对应的分片区间
    pub range: ByteRange,
    /// 成功时为分片的落盘文件，失败时为错误
    pub outcome: Result<ChunkFile, ChunkError>,
}

impl ChunkResult {
    pub fn success(range: ByteRange, file: ChunkFile) -> Self {
        Self { range, outcome: Ok(file) }
    }

    pub fn failure(range: ByteRange, error: ChunkError) -> Self {
        Self { range, outcome: Err(error) }
    }

    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }
}
