//! 下载器领域模块：探测、策略选择、分片规划、并发拉取、顺序重组、后处理。
//!
//! 使用方式：`DownloadCoordinator::new(request)?.with_post_process(hook).send().await`
//! 对外导出以 [`crate::downloader`] 与 [`crate::functions`] 为准，此处仅做模块划分，不重复 pub use。

pub mod functions;
pub mod impl_traits;
pub mod structs;
pub mod traits;
