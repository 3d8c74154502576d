use crate::internal::downloader::structs::{
    DownloadCoordinator, DownloadError, DownloadRequest, DownloadResult,
};

/// 本库主入口：按请求下载一个资源并返回结果
///
/// - 本地路径原样返回，不访问网络
/// - 远程地址先探测大小，再按阈值与分片数选择单流或分片下载
///
/// 需要监听进度、阶段或中途取消时，请直接使用 [`DownloadCoordinator`]。
///
/// example:
/// ```
/// use ranged_download::download;
/// use ranged_download::downloader::DownloadRequest;
///
/// let request = DownloadRequest::builder("https://example.com/file.zip")
///     .derive_name_from_url(true)
///     .output_dir("/tmp")
///     .verify_checksum(true)
///     .build();
///
/// let result = download(request).await.unwrap();
/// println!("{}", result.path.display());
/// ```
pub async fn download(request: DownloadRequest) -> Result<DownloadResult, DownloadError> {
    DownloadCoordinator::new(request)?.send().await
}
