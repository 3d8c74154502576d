//! 分片重组：确认全部分片成功后，按序号升序把各分片临时文件依次拷贝进输出文件，线性写入，不做 seek。

use std::path::Path;

use tokio::fs::File;
use tokio::io::{AsyncWriteExt, BufWriter};

use crate::internal::downloader::structs::{ChunkFile, ReassemblyError};

use super::spawn_tasks::ChunkSlots;

/// 逐槽位检查：缺失、失败、序号与槽位不一致都拒绝重组，此时不会创建任何文件。
fn collect_files(slots: &ChunkSlots) -> Result<Vec<&ChunkFile>, ReassemblyError> {
    let mut files = Vec::with_capacity(slots.len());
    for (slot, chunk) in slots.iter().enumerate() {
        let chunk = chunk.as_ref().ok_or(ReassemblyError::MissingChunk(slot))?;
        if chunk.range.index != slot {
            return Err(ReassemblyError::IndexMismatch {
                slot,
                index: chunk.range.index,
            });
        }
        match &chunk.outcome {
            Ok(file) => files.push(file),
            Err(_) => return Err(ReassemblyError::FailedChunk(slot)),
        }
    }
    Ok(files)
}

/// 把全部分片写入 `output`，返回写入字节数；总字节数必须等于 `expected_total`。
///
/// 失败时 `output` 可能残留部分内容，由调用方删除（调用方传入的是暂存路径）。
pub(crate) async fn reassemble(
    slots: &ChunkSlots,
    output: &Path,
    expected_total: u64,
) -> Result<u64, ReassemblyError> {
    let files = collect_files(slots)?;

    let mut writer = BufWriter::new(File::create(output).await?);
    let mut written: u64 = 0;

    for chunk in files {
        let mut source = File::open(chunk.path()).await?;
        written += tokio::io::copy(&mut source, &mut writer).await?;
    }
    writer.flush().await?;

    if written != expected_total {
        return Err(ReassemblyError::SizeMismatch {
            expected: expected_total,
            actual: written,
        });
    }

    Ok(written)
}
