mod chunked;
mod range_request;
pub(crate) mod reassemble;
pub(crate) mod spawn_tasks;

pub(crate) use chunked::{ChunkedDownloadParams, run_chunked_download};
