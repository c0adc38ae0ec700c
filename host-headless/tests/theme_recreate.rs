//! 整套主题切换的端到端流程：截屏 → 整树重建 → 接到新根容器上揭示。

mod common;

use std::rc::Rc;
use std::sync::Arc;

use common::{TestHarness, counter, harness};
use reveal_runtime::{RecreateSwitch, RevealDirection, SwitchCallbacks, ThemeTag};

/// 默认主题背景色（内置主题集第一套）
const DEFAULT_BACKGROUND: [u8; 4] = [236, 233, 244, 255];

/// red 主题背景色
const RED_BACKGROUND: [u8; 4] = [244, 67, 54, 255];

fn theme_switch(
    harness: &TestHarness,
    theme: ThemeTag,
    callbacks: SwitchCallbacks,
) -> Rc<RecreateSwitch> {
    RecreateSwitch::builder(
        harness.app.window(),
        harness.app.root(),
        harness.app.queue(),
        theme,
    )
    .gate(harness.gate)
    .registry(harness.registry)
    .pending_theme(harness.pending)
    .direction(RevealDirection::Expand)
    .callbacks(callbacks)
    .build()
    .unwrap()
}

#[test]
fn theme_switch_survives_root_recreation() {
    let h = harness(100, 100);
    let old_root = h.app.root();
    let (ended, on_end) = counter();
    let switch = theme_switch(
        &h,
        ThemeTag(1),
        SwitchCallbacks {
            on_start: None,
            on_end: Some(on_end),
            on_cancel: None,
        },
    );

    switch.trigger_at(50.0, 50.0).unwrap();
    // 重建还没落地：动画装载完成但没进任何容器
    assert_eq!(h.pending.current(), Some(ThemeTag(1)));
    assert_eq!(old_root.overlay_count(), 0);
    assert!(!switch.is_animating());

    // 下一个调度节拍：先重建、再恢复过渡
    let report = h.app.pump();
    assert_eq!(report.recreates, 1);
    assert_eq!(report.tasks, 1);

    let new_root = h.app.root();
    assert!(!Arc::ptr_eq(&old_root, &new_root), "根容器必须换了实例");
    // 遮罩接到了新根容器上，旧容器干干净净
    assert_eq!(new_root.overlay_count(), 1);
    assert_eq!(old_root.overlay_count(), 0);
    assert!(switch.is_animating());
    // 注册表槽位已被消费
    assert!(!h.registry.has_pending());

    // 半程：圆内是新主题，圆外还是旧主题的快照
    switch.update(0.2);
    let frame = h.app.render();
    assert_eq!(frame.pixel(50, 50), Some(RED_BACKGROUND));
    assert_eq!(frame.pixel(0, 0), Some(DEFAULT_BACKGROUND));

    // 播完：整屏新主题，遮罩移除，闸门重开
    while switch.update(0.05) {}
    assert_eq!(new_root.overlay_count(), 0);
    assert_eq!(h.app.render().pixel(0, 0), Some(RED_BACKGROUND));
    assert_eq!(ended.get(), 1);
    assert!(h.gate.is_open());
}

#[test]
fn double_tap_same_theme_requests_single_recreate() {
    let h = harness(80, 80);
    let switch = theme_switch(&h, ThemeTag(2), SwitchCallbacks::new());

    switch.trigger_at(40.0, 40.0).unwrap();
    // 重建落地前快速再点同一个开关（此刻闸门还开着）
    switch.trigger_at(40.0, 40.0).unwrap();

    let report = h.app.pump();
    // 只有一次重建、一个延续任务
    assert_eq!(report.recreates, 1);
    assert_eq!(report.tasks, 1);
    assert!(switch.is_animating());
}

#[test]
fn retriggering_same_theme_after_landing_stays_refused() {
    let h = harness(80, 80);
    let switch = theme_switch(&h, ThemeTag(3), SwitchCallbacks::new());

    switch.trigger_at(40.0, 40.0).unwrap();
    h.app.pump();
    while switch.update(0.05) {}
    assert!(h.gate.is_open());

    // 主题已经是 3 了，再按同一个开关不应再重建
    switch.trigger_at(40.0, 40.0).unwrap();
    let report = h.app.pump();
    assert_eq!(report.recreates, 0);
    assert_eq!(report.tasks, 0);
    assert!(!switch.is_animating());
}

#[test]
fn switch_outlives_recreated_roots_across_two_themes() {
    let h = harness(80, 80);
    let first = theme_switch(&h, ThemeTag(1), SwitchCallbacks::new());
    let second = theme_switch(&h, ThemeTag(3), SwitchCallbacks::new());

    first.trigger_at(10.0, 10.0).unwrap();
    h.app.pump();
    while first.update(0.05) {}
    assert_eq!(h.app.render().pixel(0, 0), Some(RED_BACKGROUND));

    // 换另一套主题：旧根容器已经被销毁过一轮，第二个开关持有的
    // 还是最初根容器的弱引用，必须靠注册表通告才能接上新容器
    second.trigger_at(70.0, 70.0).unwrap();
    h.app.pump();
    assert!(second.is_animating());
    while second.update(0.05) {}

    // blue 主题背景色
    assert_eq!(h.app.render().pixel(0, 0), Some([33, 150, 243, 255]));
    assert_eq!(h.app.root().overlay_count(), 0);
}
