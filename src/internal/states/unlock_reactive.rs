//! # UnlockReactiveProperty
//!
//! 基于 [`tokio::sync::watch`] 的轻量响应式属性，读写不阻塞，适合高频更新（下载进度）。
//!
//! 内部直接复用 [`super::reactive_core::ReactiveProperty`]。
//!
//! ## 使用示例
//! ```rust,no_run
//! use ranged_download::states::unlock_reactive::UnlockReactiveProperty;
//!
//! let prop = UnlockReactiveProperty::new(0u64);
//! prop.update(1);
//! prop.update_field(|v| *v += 1);
//! assert_eq!(prop.get_current(), Some(2));
//! ```

pub use super::reactive_core::{PropertyWatcher, ReactivePropertyError as UnlockReactivePropertyError};

/// 轻量级响应式属性容器。
pub type UnlockReactiveProperty<T> = super::reactive_core::ReactiveProperty<T>;
