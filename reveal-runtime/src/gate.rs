//! # Gate 模块
//!
//! 进程级点击闸门：同一时刻最多只有一个过渡在播放。
//!
//! ## 生命周期
//!
//! - 动画进入播放时关闭（`try_close`）
//! - 动画完成或取消时重新打开（`reopen`）
//!
//! 闸门关闭期间的触发在表现层被直接忽略，动画器自身不排队也不
//! 打断进行中的过渡。默认实例是进程级单例 [`ClickGate::global`]；
//! 测试可以注入独立实例避免互相干扰。

use std::sync::atomic::{AtomicBool, Ordering};

/// 点击闸门
///
/// `true` = 可点击（没有过渡在播放）。
#[derive(Debug)]
pub struct ClickGate {
    open: AtomicBool,
}

impl ClickGate {
    /// 创建打开状态的闸门
    pub const fn new() -> Self {
        Self {
            open: AtomicBool::new(true),
        }
    }

    /// 进程级单例
    pub fn global() -> &'static ClickGate {
        static GLOBAL: ClickGate = ClickGate::new();
        &GLOBAL
    }

    /// 闸门是否打开
    pub fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    /// 尝试关闭闸门
    ///
    /// # 返回
    /// - `true`: 本次调用成功关闭
    /// - `false`: 闸门已经被别的过渡关闭
    pub fn try_close(&self) -> bool {
        self.open
            .compare_exchange(true, false, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
    }

    /// 重新打开闸门
    pub fn reopen(&self) {
        self.open.store(true, Ordering::SeqCst);
    }
}

impl Default for ClickGate {
    fn default() -> Self {
        Self::new()
    }
}
