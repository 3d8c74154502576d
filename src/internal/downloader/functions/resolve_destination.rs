//! 目标路径解析：显式路径 > URL 推导文件名 > 生成临时文件。

use std::path::PathBuf;

use percent_encoding::percent_decode_str;
use url::Url;

use crate::internal::downloader::structs::download_config::TEMP_FILE_PREFIX;
use crate::internal::downloader::structs::{DestinationError, DownloadRequest};

/// 解析得到的目标路径。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedDestination {
    pub path: PathBuf,
    /// 是否为本库生成的临时文件；失败时需要一并删除
    pub generated: bool,
}

/// 取 URL 路径的最后一段并做百分号解码；查询串与片段不参与。
pub fn file_name_from_url(url: &str) -> Option<String> {
    let last = match Url::parse(url) {
        Ok(parsed) => parsed
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .map(str::to_string)?,
        Err(_) => url.rsplit('/').next()?.to_string(),
    };

    let name = percent_decode_str(&last).decode_utf8_lossy().into_owned();
    if name.is_empty() || name == "." || name == ".." || name.contains(['/', '\\']) {
        return None;
    }
    Some(name)
}

/// 按请求解析目标路径；生成临时文件时会在系统临时目录下创建一个空文件占位。
pub fn resolve_destination(
    request: &DownloadRequest,
) -> Result<ResolvedDestination, DestinationError> {
    if let Some(path) = request.destination() {
        return Ok(ResolvedDestination {
            path: path.to_path_buf(),
            generated: false,
        });
    }

    if request.derive_name_from_url() {
        let name = file_name_from_url(request.url())
            .ok_or_else(|| DestinationError::NoFileName(request.url().to_string()))?;
        let path = match request.output_dir() {
            Some(dir) => dir.join(name),
            None => PathBuf::from(name),
        };
        return Ok(ResolvedDestination { path, generated: false });
    }

    let path = tempfile::Builder::new()
        .prefix(TEMP_FILE_PREFIX)
        .suffix(request.suffix().unwrap_or_default())
        .tempfile()
        .map_err(DestinationError::TempFile)?
        .into_temp_path()
        .keep()
        .map_err(|e| DestinationError::TempFile(e.error))?;

    Ok(ResolvedDestination { path, generated: true })
}
