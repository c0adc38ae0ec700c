//! # PendingTheme 模块
//!
//! 进程级的「待生效主题」槽位。
//!
//! 整树重建是异步的：从触发到宿主真正重建根容器之间有一个调度
//! 间隙。这个槽位做两件事：
//!
//! 1. 防重触发——同一目标主题在这个间隙里被再次请求（快速双击）
//!    时拒绝，避免连环重建；
//! 2. 交给宿主查询——宿主重建根容器时读 [`PendingTheme::current`]
//!    决定应用哪套主题。
//!
//! 槽位记住「最近一次请求的主题」，重建落地后也不清空：目标主题
//! 已经是当前主题时再按同一个开关本来就不该有任何效果。

use std::fmt;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};

/// 主题标识
///
/// 引擎不关心主题内容，只用标识做防重与查询；宿主自行把它映射到
/// 真正的样式资源。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ThemeTag(pub u32);

impl fmt::Display for ThemeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "theme#{}", self.0)
    }
}

/// 待生效主题槽位
pub struct PendingTheme {
    slot: Mutex<Option<ThemeTag>>,
}

impl PendingTheme {
    /// 创建空槽位
    pub const fn new() -> Self {
        Self {
            slot: Mutex::new(None),
        }
    }

    /// 进程级单例
    pub fn global() -> &'static PendingTheme {
        static GLOBAL: PendingTheme = PendingTheme::new();
        &GLOBAL
    }

    /// 请求切换到目标主题
    ///
    /// # 返回
    /// - `false`: 目标主题就是最近一次请求的主题，本次请求被拒绝
    pub fn request(&self, theme: ThemeTag) -> bool {
        let mut slot = self
            .slot
            .lock()
            .unwrap_or_else(|poison| poison.into_inner());
        if *slot == Some(theme) {
            return false;
        }
        *slot = Some(theme);
        true
    }

    /// 最近一次请求的主题
    pub fn current(&self) -> Option<ThemeTag> {
        *self
            .slot
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
    }

    /// 清空槽位
    pub fn clear(&self) {
        *self
            .slot
            .lock()
            .unwrap_or_else(|poison| poison.into_inner()) = None;
    }
}

impl Default for PendingTheme {
    fn default() -> Self {
        Self::new()
    }
}
