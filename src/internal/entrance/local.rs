/// 可被识别为远程地址的协议前缀（大小写不敏感）
const REMOTE_PREFIXES: [&str; 4] = ["http:", "https:", "ftp:", "ftps:"];

/// 判断输入是否为远程地址；不是远程地址的输入一律视为本地路径，下载时原样返回。
///
/// 只看前缀，不校验 URL 的其余部分。
pub fn is_remote_url(input: &str) -> bool {
    let bytes = input.as_bytes();
    REMOTE_PREFIXES.iter().any(|prefix| {
        bytes.len() >= prefix.len()
            && bytes[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
    })
}
