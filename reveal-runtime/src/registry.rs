//! # Registry 模块
//!
//! 进程级根容器注册表：让过渡撑过宿主中途的整树重建。
//!
//! 某些状态变更（换整套主题）会迫使宿主销毁并重建顶层容器，而这
//! 可能发生在一次过渡进行到一半时。宿主在每次创建根容器后调用
//! [`RootRegistry::publish`] 通告新的窗口/容器对；延迟恢复的过渡用
//! [`RootRegistry::consume_current_root`] 原子取走并清空槽位，避免
//! 过期的对被后续无关的过渡复用。
//!
//! 槽位只存弱引用：真实对象归宿主所有，这里是查找关系，不是
//! 所有权关系。引用失效是预期内可恢复的事件。

use std::fmt;
use std::sync::{Arc, Mutex, Weak};

use tracing::debug;

use crate::host::{HostWindow, RootContainer};

/// 最近一次通告的窗口/容器对
#[derive(Clone)]
pub struct RootHandle {
    pub window: Weak<dyn HostWindow>,
    pub container: Weak<dyn RootContainer>,
}

impl fmt::Debug for RootHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RootHandle")
            .field("window_alive", &(self.window.strong_count() > 0))
            .field("container_alive", &(self.container.strong_count() > 0))
            .finish()
    }
}

/// 根容器注册表
///
/// 单槽位，一次通告对应至多一次消费；并发触发已被点击闸门挡在
/// 上游，这里的互斥锁只负责跨线程实现下的串行化。
pub struct RootRegistry {
    slot: Mutex<Option<RootHandle>>,
}

impl RootRegistry {
    /// 创建空注册表
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// 进程级单例
    pub fn global() -> &'static RootRegistry {
        static GLOBAL: RootRegistry = RootRegistry::new();
        &GLOBAL
    }

    /// 通告新的窗口/容器对（覆盖旧值）
    ///
    /// 宿主在每次根容器创建完成后调用。
    pub fn publish(&self, window: Arc<dyn HostWindow>, container: Arc<dyn RootContainer>) {
        let handle = RootHandle {
            window: Arc::downgrade(&window),
            container: Arc::downgrade(&container),
        };
        debug!("通告新的根容器");
        *self
            .slot
            .lock()
            .unwrap_or_else(|poison| poison.into_inner()) = Some(handle);
    }

    /// 原子取走最近通告的对并清空槽位
    ///
    /// # 返回
    /// - `None`: 自上次消费以来没有新的通告。调用方应沿用自己已知
    ///   的根引用——重建不保证与触发同步完成。
    pub fn consume_current_root(&self) -> Option<RootHandle> {
        self.slot
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .take()
    }

    /// 槽位里是否有未消费的通告
    pub fn has_pending(&self) -> bool {
        self.slot
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .is_some()
    }
}

impl Default for RootRegistry {
    fn default() -> Self {
        Self::new()
    }
}
