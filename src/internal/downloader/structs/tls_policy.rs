use std::path::PathBuf;

use serde::Deserialize;

/// TLS 策略：默认完整校验证书与主机名。
///
/// `ca_file` / `ca_path` 追加受信任的根证书；只有显式打开 `accept_invalid_certs` 才会关闭校验。
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TlsPolicy {
    /// PEM 证书包文件
    pub ca_file: Option<PathBuf>,
    /// 存放 PEM 证书的目录（读取其中的 `.pem` / `.crt` 文件）
    pub ca_path: Option<PathBuf>,
    /// 危险：接受任何证书（包括主机名不匹配）
    pub accept_invalid_certs: bool,
}

impl TlsPolicy {
    pub fn with_ca_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_file = Some(path.into());
        self
    }

    pub fn with_ca_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.ca_path = Some(path.into());
        self
    }

    /// 关闭证书校验，仅用于测试环境或自签名内网服务。
    pub fn danger_accept_invalid_certs(mut self) -> Self {
        self.accept_invalid_certs = true;
        self
    }
}
