//! # Window 模块
//!
//! 无头窗口：引擎的截屏来源。
//!
//! 快速路径行为可配置（可用 / 不支持 / 注入失败 / 拖延），用来在
//! 测试里覆盖截屏的每条分支；兜底路径始终在调用线程上同步渲染。

use std::sync::{Arc, Mutex, Weak};
use std::thread;
use std::time::Duration;

use reveal_runtime::{CaptureError, HostWindow, Pixmap, SnapshotJob};
use tracing::debug;

use crate::surface::HeadlessRoot;

/// 快速路径行为
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FastPathMode {
    /// 正常可用
    Supported,
    /// 宿主不支持（引擎直接走兜底路径）
    Unsupported,
    /// 每次都失败（引擎降级到兜底路径）
    Failing,
    /// 拖延指定毫秒后才交出结果（可用来触发引擎的超时降级）
    Slow { delay_ms: u64 },
}

/// 无头窗口
///
/// 持当前根容器的弱引用；宿主重建根容器后通过
/// [`HeadlessWindow::attach_root`] 换绑。
pub struct HeadlessWindow {
    root: Mutex<Weak<HeadlessRoot>>,
    fast_path: Mutex<FastPathMode>,
}

impl HeadlessWindow {
    /// 创建窗口并绑定初始根容器
    pub fn new(root: &Arc<HeadlessRoot>, fast_path: FastPathMode) -> Self {
        Self {
            root: Mutex::new(Arc::downgrade(root)),
            fast_path: Mutex::new(fast_path),
        }
    }

    /// 换绑到新的根容器
    pub fn attach_root(&self, root: &Arc<HeadlessRoot>) {
        *lock(&self.root) = Arc::downgrade(root);
    }

    /// 调整快速路径行为
    pub fn set_fast_path(&self, mode: FastPathMode) {
        *lock(&self.fast_path) = mode;
    }

    fn current_root(&self) -> Option<Arc<HeadlessRoot>> {
        lock(&self.root).upgrade()
    }
}

impl HostWindow for HeadlessWindow {
    fn async_snapshot_job(&self) -> Option<SnapshotJob> {
        let mode = *lock(&self.fast_path);
        if mode == FastPathMode::Unsupported {
            return None;
        }
        let root = lock(&self.root).clone();
        Some(Box::new(move || {
            if let FastPathMode::Slow { delay_ms } = mode {
                thread::sleep(Duration::from_millis(delay_ms));
            }
            if mode == FastPathMode::Failing {
                return Err(CaptureError::CopyFailed("注入的快速路径失败".to_string()));
            }
            let root = root
                .upgrade()
                .ok_or_else(|| CaptureError::CopyFailed("根容器已释放".to_string()))?;
            debug!("快速路径渲染快照");
            Ok(root.render())
        }))
    }

    fn render_sync(&self) -> Result<Pixmap, CaptureError> {
        let root = self
            .current_root()
            .ok_or_else(|| CaptureError::FallbackFailed("根容器已释放".to_string()))?;
        Ok(root.render())
    }
}

impl std::fmt::Debug for HeadlessWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessWindow")
            .field("fast_path", &*lock(&self.fast_path))
            .field("root_alive", &self.current_root().is_some())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poison| poison.into_inner())
}
