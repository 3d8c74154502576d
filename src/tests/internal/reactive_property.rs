//! 响应式属性测试：协调器用它发布阶段与进度。
//!
//! 测试项：
//! - 基础读写、watch 监听
//! - `wait_for` 条件等待（立即满足 / 异步等待 / 销毁唤醒）
//! - 多任务并发累加

use std::time::Duration;

use crate::downloader::{DownloadProgress, DownloadState};
use crate::states::unlock_reactive::{UnlockReactiveProperty, UnlockReactivePropertyError};

#[tokio::test]
async fn basic_update_and_read() {
    let prop = UnlockReactiveProperty::new(0u64);
    prop.update(42);
    assert_eq!(prop.get_current(), Some(42));

    prop.update_field(|v| *v += 8);
    assert_eq!(prop.get_current(), Some(50));
}

#[tokio::test]
async fn watch_receives_updates() {
    let prop = UnlockReactiveProperty::new(DownloadState::Init);
    let mut watcher = prop.watch();

    prop.update(DownloadState::Probing);
    assert_eq!(watcher.changed().await.unwrap(), DownloadState::Probing);

    prop.update(DownloadState::Simple);
    assert_eq!(watcher.changed().await.unwrap(), DownloadState::Simple);
    assert_eq!(watcher.borrow(), Some(DownloadState::Simple));
}

#[tokio::test]
async fn update_field_touches_one_field() {
    let prop = UnlockReactiveProperty::new(DownloadProgress::default());
    prop.update_field(|p| p.total = Some(200));
    prop.update_field(|p| p.bytes_done = 50);

    let p = prop.get_current().unwrap();
    assert_eq!(p.total, Some(200));
    assert_eq!(p.bytes_done, 50);
    assert_eq!(p.pct(), 25.0);
}

#[tokio::test]
async fn wait_for_already_satisfied() {
    let prop = UnlockReactiveProperty::new(100i32);
    let mut watcher = prop.watch();
    // 当前值已满足，应立即返回
    let v = tokio::time::timeout(Duration::from_millis(100), watcher.wait_for(|v| *v == 100))
        .await
        .unwrap()
        .unwrap();
    assert_eq!(v, 100);
}

#[tokio::test]
async fn wait_for_async_satisfied() {
    let prop = UnlockReactiveProperty::new(DownloadState::Init);
    let p = prop.clone();
    let mut watcher = prop.watch();

    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(20)).await;
        p.update(DownloadState::Fetching);
        tokio::time::sleep(Duration::from_millis(20)).await;
        p.update(DownloadState::Done);
    });

    let v = watcher.wait_for(|s| s.is_terminal()).await.unwrap();
    assert_eq!(v, DownloadState::Done);
}

#[tokio::test]
async fn wait_for_blocks_when_unsatisfied() {
    let prop = UnlockReactiveProperty::new(0i32);
    let mut watcher = prop.watch();

    // 条件不满足时应挂起，50ms 内不会返回
    let result =
        tokio::time::timeout(Duration::from_millis(50), watcher.wait_for(|v| *v == 9999)).await;
    assert!(result.is_err(), "条件未满足时 wait_for 应持续挂起（超时）");

    prop.update(9999);
    let result =
        tokio::time::timeout(Duration::from_millis(50), watcher.wait_for(|v| *v == 9999)).await;
    assert!(result.is_ok(), "条件满足后 wait_for 应立即返回");
}

#[tokio::test]
async fn dropping_last_handle_closes_watchers() {
    let prop = UnlockReactiveProperty::new(1u8);
    let mut watcher = prop.watch();
    drop(prop);

    assert!(matches!(
        watcher.changed().await,
        Err(UnlockReactivePropertyError::WatcherClosed)
    ));
    assert_eq!(watcher.borrow(), None);
}

#[tokio::test]
async fn dropping_last_handle_wakes_wait_for() {
    let prop = UnlockReactiveProperty::new(0i32);
    let mut watcher = prop.watch();

    let waiter = tokio::spawn(async move { watcher.wait_for(|v| *v == 1).await });
    tokio::time::sleep(Duration::from_millis(20)).await;
    drop(prop);

    let result = waiter.await.unwrap();
    assert!(matches!(result, Err(UnlockReactivePropertyError::WatcherClosed)));
}

/// 多个分片任务并发累加进度，不丢更新
#[tokio::test]
async fn concurrent_update_field_is_lossless() {
    const TASKS: u64 = 8;
    const PER_TASK: u64 = 1_000;

    let prop = UnlockReactiveProperty::new(DownloadProgress::default());
    let mut handles = Vec::new();
    for _ in 0..TASKS {
        let p = prop.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..PER_TASK {
                p.update_field(|v| v.bytes_done += 1);
            }
        }));
    }
    for h in handles {
        h.await.unwrap();
    }

    assert_eq!(prop.get_current().unwrap().bytes_done, TASKS * PER_TASK);
}
