//! 根据 TLS 策略构建共享的 HTTP 客户端。

use std::fs;
use std::path::{Path, PathBuf};

use reqwest::{Certificate, Client};
use tracing::{debug, warn};

use crate::internal::downloader::structs::{DownloadError, TlsPolicy};

fn read_certificates(path: &Path) -> Result<Vec<Certificate>, DownloadError> {
    let pem = fs::read(path).map_err(|source| DownloadError::ReadCertificate {
        path: path.to_path_buf(),
        source,
    })?;
    Certificate::from_pem_bundle(&pem).map_err(DownloadError::ClientBuild)
}

/// 列出证书目录中的 `.pem` / `.crt` 文件，按文件名排序。
fn list_certificate_files(dir: &Path) -> Result<Vec<PathBuf>, DownloadError> {
    let entries = fs::read_dir(dir).map_err(|source| DownloadError::ReadCertificate {
        path: dir.to_path_buf(),
        source,
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let path = entry
            .map_err(|source| DownloadError::ReadCertificate {
                path: dir.to_path_buf(),
                source,
            })?
            .path();
        let is_cert = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("pem") || e.eq_ignore_ascii_case("crt"));
        if is_cert && path.is_file() {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

/// 构建 HTTP 客户端：仅 HTTP/1.1，默认完整校验证书。
///
/// 只有 `TlsPolicy::accept_invalid_certs` 为真时才关闭校验。
pub fn build_client(tls_policy: &TlsPolicy) -> Result<Client, DownloadError> {
    let mut builder = Client::builder().http1_only();

    let mut cert_files = Vec::new();
    if let Some(ca_file) = &tls_policy.ca_file {
        cert_files.push(ca_file.clone());
    }
    if let Some(ca_path) = &tls_policy.ca_path {
        cert_files.extend(list_certificate_files(ca_path)?);
    }

    for file in &cert_files {
        let certs = read_certificates(file)?;
        debug!(path = %file.display(), count = certs.len(), "加载根证书");
        for cert in certs {
            builder = builder.add_root_certificate(cert);
        }
    }

    if tls_policy.accept_invalid_certs {
        warn!("已关闭 TLS 证书校验");
        builder = builder.danger_accept_invalid_certs(true);
    }

    builder.build().map_err(DownloadError::ClientBuild)
}
