pub mod byte_range;
pub mod chunk_result;
pub mod download_config;
pub mod download_coordinator;
pub mod download_error;
pub mod download_mode;
pub mod download_progress;
pub mod download_request;
pub mod download_result;
pub mod download_state;
pub mod tls_policy;

// 重导出公共类型
pub use byte_range::ByteRange;
pub use chunk_result::{ChunkFile, ChunkResult};
pub use download_config::{
    DEFAULT_PARALLEL_THRESHOLD, DEFAULT_WORKER_COUNT, FALLBACK_WORKER_COUNT,
    MAX_WORKER_COUNT, MIN_WORKER_COUNT,
};
pub use download_coordinator::DownloadCoordinator;
pub use download_error::{
    ChecksumError, ChunkError, DestinationError, DownloadError, ErrorKind,
    PlanningError, ProbeError, ReassemblyError,
};
pub use download_mode::DownloadMode;
pub use download_progress::DownloadProgress;
pub use download_request::{DownloadRequest, DownloadRequestBuilder};
pub use download_result::DownloadResult;
pub use download_state::DownloadState;
pub use tls_policy::TlsPolicy;
