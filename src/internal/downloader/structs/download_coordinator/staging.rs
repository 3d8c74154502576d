//! 暂存文件：写入 `<目标>.part`，完整后原子改名为目标路径；失败时删除。

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::internal::downloader::structs::ReassemblyError;
use crate::internal::downloader::structs::download_config::STAGING_SUFFIX;

pub(crate) fn staging_path(destination: &Path) -> PathBuf {
    let mut s = destination.as_os_str().to_owned();
    s.push(STAGING_SUFFIX);
    PathBuf::from(s)
}

/// 暂存文件已完整写入，改名为目标路径（同目录下 rename 为原子操作）。
pub(crate) async fn commit(staging: &Path, destination: &Path) -> Result<(), ReassemblyError> {
    tokio::fs::rename(staging, destination).await?;
    debug!(path = %destination.display(), "暂存文件已提交");
    Ok(())
}

/// 删除文件，不存在视为成功；其他错误只记录日志。
pub(crate) async fn discard(path: &Path) {
    match tokio::fs::remove_file(path).await {
        Ok(()) => debug!(path = %path.display(), "已删除未完成的文件"),
        Err(e) if e.kind() == ErrorKind::NotFound => {}
        Err(e) => warn!(path = %path.display(), error = %e, "删除未完成的文件失败"),
    }
}
