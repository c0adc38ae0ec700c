//! # Capture 模块
//!
//! 屏幕快照采集：快速路径 + 兜底路径。
//!
//! 快速路径把宿主给的拷贝任务丢到一条短命辅助线程上执行，在调用
//! 线程上带上限地等结果；超时、失败或宿主不支持都静默降级到兜底
//! 路径。兜底路径在调用线程上同步强制渲染，对存活表面必须成功，
//! 它失败才是硬错误。
//!
//! 辅助线程只产出位图，从不触碰动画器或注册表状态；结果通过
//! channel 交回等待边界。

use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::error::{CaptureError, RevealResult};
use crate::host::HostWindow;
use crate::pixmap::{CapturePath, Snapshot};

/// 快速路径的等待上限
pub const CAPTURE_TIMEOUT: Duration = Duration::from_millis(1000);

/// 采集当前窗口的快照
///
/// 永远不会返回渲染到一半的图像：快速路径要么在时限内交出完整
/// 拷贝，要么整体放弃、换兜底路径重来。
pub fn capture_snapshot(window: &dyn HostWindow) -> RevealResult<Snapshot> {
    capture_with_timeout(window, CAPTURE_TIMEOUT)
}

/// 采集快照，使用自定义的快速路径等待上限
pub fn capture_with_timeout(window: &dyn HostWindow, timeout: Duration) -> RevealResult<Snapshot> {
    if let Some(snapshot) = try_fast_path(window, timeout) {
        return Ok(snapshot);
    }

    let started = Instant::now();
    let pixmap = window.render_sync()?;
    debug!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        "兜底路径截屏完成"
    );
    Ok(Snapshot::new(pixmap, CapturePath::Fallback))
}

/// 尝试快速路径；任何失败都返回 `None` 交给兜底路径
fn try_fast_path(window: &dyn HostWindow, timeout: Duration) -> Option<Snapshot> {
    let Some(job) = window.async_snapshot_job() else {
        debug!("宿主不支持快速路径截屏");
        return None;
    };

    let started = Instant::now();
    let (tx, rx) = mpsc::channel();
    let worker = thread::Builder::new()
        .name("snapshot-copy".to_string())
        .spawn(move || {
            // 接收端超时离开后发送会失败，直接丢弃
            let _ = tx.send(job());
        });

    let worker = match worker {
        Ok(worker) => worker,
        Err(err) => {
            debug!(%err, "辅助线程创建失败，改用兜底路径");
            return None;
        }
    };

    match rx.recv_timeout(timeout) {
        Ok(Ok(pixmap)) => {
            let _ = worker.join();
            debug!(
                elapsed_ms = started.elapsed().as_millis() as u64,
                "快速路径截屏完成"
            );
            Some(Snapshot::new(pixmap, CapturePath::Fast))
        }
        Ok(Err(err)) => {
            let _ = worker.join();
            debug!(%err, "快速路径截屏失败，改用兜底路径");
            None
        }
        Err(mpsc::RecvTimeoutError::Timeout) => {
            // 不等线程收尾，它迟到的结果会落在已关闭的 channel 上
            debug!(
                timeout_ms = timeout.as_millis() as u64,
                "快速路径截屏超时，改用兜底路径"
            );
            None
        }
        Err(mpsc::RecvTimeoutError::Disconnected) => {
            let _ = worker.join();
            debug!("快速路径 worker 异常退出，改用兜底路径");
            None
        }
    }
}
