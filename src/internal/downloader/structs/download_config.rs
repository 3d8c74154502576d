/// 默认并发分片数
pub const DEFAULT_WORKER_COUNT: i64 = 5;

/// 允许的最小并发分片数
pub const MIN_WORKER_COUNT: i64 = 1;

/// 允许的最大并发分片数：同一主机最多 10 条连接
pub const MAX_WORKER_COUNT: i64 = 10;

/// 请求的分片数不在 `[MIN_WORKER_COUNT, MAX_WORKER_COUNT]` 内时使用的回退值
pub const FALLBACK_WORKER_COUNT: usize = 10;

/// 默认分片阈值：1 GiB，小于此大小走单流下载（除非强制分片）
pub const DEFAULT_PARALLEL_THRESHOLD: u64 = 1024 * 1024 * 1024;

/// 重组与单流下载写入时使用的暂存文件后缀
pub(crate) const STAGING_SUFFIX: &str = ".part";

/// 生成临时文件名时使用的前缀
pub(crate) const TEMP_FILE_PREFIX: &str = "ranged-";

/// 分片临时目录的前缀，目录建在目标文件同目录下
pub(crate) const SPOOL_DIR_PREFIX: &str = ".ranged-chunks-";
