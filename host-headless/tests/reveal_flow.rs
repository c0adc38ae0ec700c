//! 日夜模式切换的端到端流程：截屏 → 重新着色 → 揭示动画。

mod common;

use std::rc::Rc;

use common::{TestHarness, counter, harness};
use host_headless::{DAY_BACKGROUND, FastPathMode, NIGHT_BACKGROUND};
use reveal_runtime::{RedrawSwitch, RevealDirection, SwitchCallbacks};

/// 构建日夜开关：接通 = 夜间
fn day_night_switch(
    harness: &TestHarness,
    engage_direction: RevealDirection,
    engage_callbacks: SwitchCallbacks,
) -> Rc<RedrawSwitch> {
    let root = harness.app.root();
    root.set_content_color(DAY_BACKGROUND);

    let target = root.clone();
    RedrawSwitch::builder(harness.app.window(), root, move |night| {
        target.set_content_color(if night {
            NIGHT_BACKGROUND
        } else {
            DAY_BACKGROUND
        });
    })
    .gate(harness.gate)
    .engage_direction(engage_direction)
    .engage_callbacks(engage_callbacks)
    .build()
    .unwrap()
}

#[test]
fn shrink_covers_old_frame_then_reveals_new() {
    let h = harness(100, 100);
    let (started, on_start) = counter();
    let (ended, on_end) = counter();
    let switch = day_night_switch(
        &h,
        RevealDirection::Shrink,
        SwitchCallbacks {
            on_start: Some(on_start),
            on_end: Some(on_end),
            on_cancel: None,
        },
    );

    switch.trigger_at(50.0, 50.0).unwrap();
    assert_eq!(started.get(), 1);
    assert!(!h.gate.is_open());

    // 初始裁剪圆 = 从中心覆盖 100×100 的最小半径
    let root = h.app.root();
    let overlay = root.first_overlay().unwrap();
    let radius = overlay.clip().unwrap().radius;
    assert!((radius - 70.71).abs() < 0.01, "初始半径 {radius}");

    // 开场整屏仍是旧画面（日间色）
    let frame = root.render();
    assert_eq!(frame.pixel(50, 50), Some(DAY_BACKGROUND));
    assert_eq!(frame.pixel(0, 0), Some(DAY_BACKGROUND));

    // 半程：圆心附近还是旧画面，角落已经露出夜间色
    switch.update(0.2);
    let frame = root.render();
    assert_eq!(frame.pixel(50, 50), Some(DAY_BACKGROUND));
    assert_eq!(frame.pixel(0, 0), Some(NIGHT_BACKGROUND));

    // 播完：遮罩移除、闸门重开、整屏夜间色
    while switch.update(0.05) {}
    assert_eq!(root.overlay_count(), 0);
    assert!(h.gate.is_open());
    assert_eq!(ended.get(), 1);
    let frame = root.render();
    assert_eq!(frame.pixel(50, 50), Some(NIGHT_BACKGROUND));
    assert_eq!(frame.pixel(99, 99), Some(NIGHT_BACKGROUND));
}

#[test]
fn expand_grows_new_content_from_origin() {
    let h = harness(100, 100);
    let switch = day_night_switch(&h, RevealDirection::Expand, SwitchCallbacks::new());

    switch.trigger_at(50.0, 50.0).unwrap();
    let root = h.app.root();

    // 开场新内容藏在半径为零的圆里，整屏还是旧画面
    let frame = root.render();
    assert_eq!(frame.pixel(50, 50), Some(DAY_BACKGROUND));

    // 半程：圆内是夜间色，角落还是旧画面
    switch.update(0.2);
    let frame = root.render();
    assert_eq!(frame.pixel(50, 50), Some(NIGHT_BACKGROUND));
    assert_eq!(frame.pixel(0, 0), Some(DAY_BACKGROUND));

    // 播完：内容裁剪恢复、整屏夜间色
    while switch.update(0.05) {}
    assert_eq!(root.content_clip(), None);
    assert_eq!(root.overlay_count(), 0);
    let frame = root.render();
    assert_eq!(frame.pixel(0, 0), Some(NIGHT_BACKGROUND));
}

#[test]
fn second_trigger_while_animating_is_noop() {
    let h = harness(100, 100);
    let (started, on_start) = counter();
    let switch = day_night_switch(
        &h,
        RevealDirection::Expand,
        SwitchCallbacks {
            on_start: Some(on_start),
            on_end: None,
            on_cancel: None,
        },
    );

    switch.trigger_at(50.0, 50.0).unwrap();
    assert!(switch.is_engaged());
    assert_eq!(h.app.root().overlay_count(), 1);

    // 播放中再点：状态不变，没有第二个遮罩，回调不重复
    switch.trigger_at(10.0, 10.0).unwrap();
    assert!(switch.is_engaged());
    assert_eq!(h.app.root().overlay_count(), 1);
    assert_eq!(started.get(), 1);
}

#[test]
fn cancel_fires_on_cancel_exactly_once() {
    let h = harness(100, 100);
    let (ended, on_end) = counter();
    let (cancelled, on_cancel) = counter();
    let switch = day_night_switch(
        &h,
        RevealDirection::Shrink,
        SwitchCallbacks {
            on_start: None,
            on_end: Some(on_end),
            on_cancel: Some(on_cancel),
        },
    );

    switch.trigger_at(50.0, 50.0).unwrap();
    switch.update(0.1);

    switch.cancel();
    assert_eq!(cancelled.get(), 1);
    assert_eq!(ended.get(), 0);
    assert_eq!(h.app.root().overlay_count(), 0);
    assert!(h.gate.is_open());

    // 重复取消不再触发回调
    switch.cancel();
    assert_eq!(cancelled.get(), 1);
}

#[test]
fn degraded_capture_paths_still_freeze_old_frame() {
    for mode in [FastPathMode::Unsupported, FastPathMode::Failing] {
        let h = harness(60, 60);
        h.app.window().set_fast_path(mode);
        let switch = day_night_switch(&h, RevealDirection::Shrink, SwitchCallbacks::new());

        switch.trigger_at(30.0, 30.0).unwrap();
        // 快照冻结的是变更前（日间）的画面
        let overlay = h.app.root().first_overlay().unwrap();
        assert_eq!(
            overlay.snapshot().pixmap().pixel(0, 0),
            Some(DAY_BACKGROUND),
            "模式 {mode:?}"
        );

        while switch.update(0.05) {}
        assert_eq!(h.app.root().overlay_count(), 0);
    }
}
