//! 集成测试共用的脚手架。
//!
//! 每个用例拿到独立的注册表 / 主题槽位 / 点击闸门，测试并行跑也
//! 不会互相干扰进程级状态。

use std::cell::Cell;
use std::rc::Rc;

use host_headless::{AppConfig, HeadlessApp};
use reveal_runtime::{ClickGate, PendingTheme, RootRegistry};

pub fn leak<T>(value: T) -> &'static T {
    Box::leak(Box::new(value))
}

pub struct TestHarness {
    pub app: HeadlessApp,
    pub registry: &'static RootRegistry,
    pub pending: &'static PendingTheme,
    pub gate: &'static ClickGate,
}

pub fn harness(width: u32, height: u32) -> TestHarness {
    let mut config = AppConfig::default();
    config.window.width = width;
    config.window.height = height;

    let registry = leak(RootRegistry::new());
    let pending = leak(PendingTheme::new());
    TestHarness {
        app: HeadlessApp::with_shared(&config, registry, pending),
        registry,
        pending,
        gate: leak(ClickGate::new()),
    }
}

/// 计数器与对应的回调闭包
pub fn counter() -> (Rc<Cell<u32>>, Rc<dyn Fn()>) {
    let count = Rc::new(Cell::new(0u32));
    let count_clone = count.clone();
    let callback: Rc<dyn Fn()> = Rc::new(move || count_clone.set(count_clone.get() + 1));
    (count, callback)
}
