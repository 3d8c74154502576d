//! 默认后处理：流式计算 SHA-256。

use std::path::Path;

use async_trait::async_trait;
use sha2::{Digest, Sha256};
use tokio::fs::File;
use tokio::io::AsyncReadExt;

use crate::internal::downloader::structs::ChecksumError;
use crate::internal::downloader::traits::post_process::{PostProcessHook, PostProcessOutput};

const READ_BUF_SIZE: usize = 64 * 1024;

/// 计算文件的 SHA-256，路径保持不变，摘要为小写十六进制。
#[derive(Debug, Clone, Copy, Default)]
pub struct Sha256Checksum;

#[async_trait]
impl PostProcessHook for Sha256Checksum {
    async fn process(&self, path: &Path) -> Result<PostProcessOutput, ChecksumError> {
        let mut file = File::open(path).await?;
        let mut hasher = Sha256::new();
        let mut buf = vec![0u8; READ_BUF_SIZE];

        loop {
            let n = file.read(&mut buf).await?;
            if n == 0 {
                break;
            }
            hasher.update(&buf[..n]);
        }

        Ok(PostProcessOutput {
            path: path.to_path_buf(),
            digest: Some(hex::encode(hasher.finalize())),
        })
    }
}
