/// 内部导出的模块
mod internal;


/// 导出核心入口函数
pub use internal::entrance::local::*;
pub use internal::entrance::remote::*;

/// 下载器：请求、结果、错误、协调器
pub mod downloader {
    use crate::internal;
    // 结构体模型
    pub use internal::downloader::structs::*;
    // 钩子与默认实现
    pub use internal::downloader::impl_traits::sha256_checksum::*;
    pub use internal::downloader::traits::post_process::*;
}

/// 纯函数能力：分片规划、策略选择、客户端构建、目标路径解析，不能限制死在入口函数中，以防有人自己要用
pub mod functions {
    use crate::internal;
    pub use internal::downloader::functions::build_client::*;
    pub use internal::downloader::functions::plan_ranges::*;
    pub use internal::downloader::functions::resolve_destination::*;
    pub use internal::downloader::functions::select_strategy::*;
}

pub mod states {
    pub mod unlock_reactive {
        use crate::internal;
        pub use internal::states::unlock_reactive::*;
    }
}
