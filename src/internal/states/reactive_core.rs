//! # ReactiveProperty — 响应式属性内核
//!
//! 协调器用它对外发布状态机状态与下载进度：写入方只管 `update`，
//! 读取方 `get_current` 取快照，或 `watch` 后 `changed().await` 监听。
//!
//! 本模块**不对外导出**，对外使用 [`UnlockReactiveProperty`](super::unlock_reactive::UnlockReactiveProperty)。

use std::sync::Arc;
use thiserror::Error;
use tokio::sync::watch;
use tokio::sync::watch::error::RecvError;

// ──────────────────────────── Error ────────────────────────────

/// 响应式属性统一错误类型
#[derive(Debug, Error)]
pub enum ReactivePropertyError {
    /// 属性已被销毁，监听器不会再收到新值
    #[error("监听器已被销毁")]
    WatcherClosed,

    /// watch 通道接收失败
    #[error("接收失败: {0}")]
    RecvError(#[from] RecvError),
}

// ──────────────────────────── Inner ────────────────────────────

/// 内部共享状态。最后一个属性句柄释放时发送 `None` 通知监听者。
#[derive(Debug)]
pub(crate) struct Inner<T> {
    pub(crate) sender: watch::Sender<Option<T>>,
}

impl<T> Drop for Inner<T> {
    fn drop(&mut self) {
        self.sender.send_replace(None);
    }
}

// ──────────────────────────── ReactiveProperty ────────────────────────────

/// 响应式属性内核：new / update / update_field / get_current / watch。
///
/// Clone 得到的是同一份状态的共享句柄。
#[derive(Clone, Debug)]
pub struct ReactiveProperty<T: Clone + Send + Sync> {
    pub(crate) inner: Arc<Inner<T>>,
}

impl<T> ReactiveProperty<T>
where
    T: Clone + Send + Sync,
{
    pub fn new(value: T) -> Self {
        let (sender, _) = watch::channel(Some(value));
        Self {
            inner: Arc::new(Inner { sender }),
        }
    }

    /// 更新属性的值，所有监听者都会收到通知；没有监听者时同样更新当前值。
    pub fn update(&self, new_value: T) {
        self.inner.sender.send_replace(Some(new_value));
    }

    /// 使用闭包原地更新部分字段。
    pub fn update_field<F>(&self, updater: F)
    where
        F: FnOnce(&mut T),
    {
        self.inner.sender.send_modify(|current| {
            if let Some(value) = current.as_mut() {
                updater(value);
            }
        });
    }

    /// 当前值的快照（会 clone）。
    pub fn get_current(&self) -> Option<T> {
        self.inner.sender.borrow().clone()
    }

    /// 创建一个监听器，用于异步监听属性值的变化。
    pub fn watch(&self) -> PropertyWatcher<T> {
        PropertyWatcher {
            receiver: self.inner.sender.subscribe(),
        }
    }
}

// ──────────────────────────── PropertyWatcher ────────────────────────────

/// 属性监听器，用于异步接收属性值的变化。
pub struct PropertyWatcher<T> {
    receiver: watch::Receiver<Option<T>>,
}

impl<T> PropertyWatcher<T>
where
    T: Clone + Send + Sync,
{
    /// 异步等待属性值的变化，返回新值。
    pub async fn changed(&mut self) -> Result<T, ReactivePropertyError> {
        self.receiver.changed().await?;
        match self.receiver.borrow_and_update().as_ref() {
            None => Err(ReactivePropertyError::WatcherClosed),
            Some(value) => Ok(value.clone()),
        }
    }

    /// 等待直到当前值满足条件（当前值已满足则立即返回）。
    pub async fn wait_for<F>(&mut self, mut predicate: F) -> Result<T, ReactivePropertyError>
    where
        F: FnMut(&T) -> bool,
    {
        let value = self
            .receiver
            .wait_for(|v| v.as_ref().is_none_or(&mut predicate))
            .await?;
        match value.as_ref() {
            None => Err(ReactivePropertyError::WatcherClosed),
            Some(v) => Ok(v.clone()),
        }
    }

    /// 同步获取当前值的克隆。
    pub fn borrow(&self) -> Option<T> {
        self.receiver.borrow().clone()
    }
}
