//! # RedrawSwitch 模块
//!
//! 纯重绘触发策略：状态变更只引起样式/配色重绘，不替换根容器。
//! 典型用途是日夜模式切换。

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use tracing::debug;

use super::SwitchCore;
use crate::animator::{RevealDirection, SwitchCallbacks, TransitionAnimator};
use crate::capture::capture_snapshot;
use crate::config::{DEFAULT_DURATION_MS, TransitionSpec};
use crate::easing::CubicBezier;
use crate::error::RevealResult;
use crate::gate::ClickGate;
use crate::host::{HostWindow, RootContainer};

/// 单个切换方向的动画配置
#[derive(Clone)]
struct DirectionSpec {
    direction: RevealDirection,
    callbacks: SwitchCallbacks,
}

/// 纯重绘开关
///
/// 在两个状态（接通/断开）之间往返切换。触发顺序固定：
/// 截屏 → 应用状态变更（宿主重绘）→ 立即播放动画。
/// 截屏先于一切状态变更，保证快照里是变更前的画面。
pub struct RedrawSwitch {
    core: SwitchCore,
    apply: Box<dyn Fn(bool)>,
    engaged: Cell<bool>,
    engage: DirectionSpec,
    disengage: DirectionSpec,
}

impl RedrawSwitch {
    /// 创建构建器
    ///
    /// # 参数
    /// - `window`/`container`: 目标表面（弱持有）
    /// - `apply`: 应用状态变更的宿主回调，参数是切换后的状态
    pub fn builder(
        window: Arc<dyn HostWindow>,
        container: Arc<dyn RootContainer>,
        apply: impl Fn(bool) + 'static,
    ) -> RedrawSwitchBuilder {
        RedrawSwitchBuilder::new(window, container, apply)
    }

    /// 记录按下坐标（表面坐标系），供下一次 [`RedrawSwitch::trigger`] 使用
    pub fn press(&self, x: f32, y: f32) {
        self.core.press(x, y);
    }

    /// 用最近一次按下的坐标触发切换
    ///
    /// 闸门关闭（已有过渡在播放）时是无操作。
    pub fn trigger(&self) -> RevealResult<()> {
        if !self.core.clickable() {
            debug!("过渡进行中，忽略触发");
            return Ok(());
        }
        self.core.fire_trigger_callback();

        let window = self.core.window()?;
        let container = self.core.container()?;

        // 截屏必须先于状态变更
        let snapshot = capture_snapshot(window.as_ref())?;

        let target = !self.engaged.get();
        (self.apply)(target);
        self.engaged.set(target);

        let spec = if target { &self.engage } else { &self.disengage };
        let mut animator = self.core.animator_mut();
        animator.arm(
            snapshot,
            self.core.origin(),
            spec.direction,
            spec.callbacks.clone(),
        );
        animator.begin(&container);
        Ok(())
    }

    /// 在指定坐标触发切换（press + trigger）
    pub fn trigger_at(&self, x: f32, y: f32) -> RevealResult<()> {
        self.press(x, y);
        self.trigger()
    }

    /// 推进动画一帧
    ///
    /// # 返回
    /// - `true`: 动画仍在播放
    pub fn update(&self, dt: f32) -> bool {
        self.core.update(dt)
    }

    /// 取消进行中的过渡
    pub fn cancel(&self) {
        self.core.cancel();
    }

    /// 当前是否处于接通状态
    pub fn is_engaged(&self) -> bool {
        self.engaged.get()
    }

    /// 直接设置状态（不截屏、不播动画）
    ///
    /// 用于启动时同步持久化的用户偏好。
    pub fn set_engaged(&self, engaged: bool) {
        self.engaged.set(engaged);
    }

    /// 是否正在播放过渡
    pub fn is_animating(&self) -> bool {
        self.core.is_animating()
    }
}

/// [`RedrawSwitch`] 构建器
pub struct RedrawSwitchBuilder {
    window: Arc<dyn HostWindow>,
    container: Arc<dyn RootContainer>,
    apply: Box<dyn Fn(bool)>,
    duration_ms: u32,
    curve: CubicBezier,
    on_trigger: Option<Rc<dyn Fn()>>,
    gate: Option<&'static ClickGate>,
    engage_direction: RevealDirection,
    disengage_direction: RevealDirection,
    engage_callbacks: SwitchCallbacks,
    disengage_callbacks: SwitchCallbacks,
    initially_engaged: bool,
}

impl RedrawSwitchBuilder {
    pub fn new(
        window: Arc<dyn HostWindow>,
        container: Arc<dyn RootContainer>,
        apply: impl Fn(bool) + 'static,
    ) -> Self {
        Self {
            window,
            container,
            apply: Box::new(apply),
            duration_ms: DEFAULT_DURATION_MS,
            curve: CubicBezier::standard(),
            on_trigger: None,
            gate: None,
            // 接通扩张、断开收缩
            engage_direction: RevealDirection::Expand,
            disengage_direction: RevealDirection::Shrink,
            engage_callbacks: SwitchCallbacks::new(),
            disengage_callbacks: SwitchCallbacks::new(),
            initially_engaged: false,
        }
    }

    /// 设置过渡时长（毫秒）
    pub fn duration_ms(mut self, duration_ms: u32) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    /// 设置缓动曲线
    pub fn curve(mut self, curve: CubicBezier) -> Self {
        self.curve = curve;
        self
    }

    /// 从可序列化配置读取时长、曲线与接通方向（断开方向取反向）
    pub fn spec(mut self, spec: &TransitionSpec) -> RevealResult<Self> {
        self.duration_ms = spec.duration_ms;
        self.curve = spec.curve.to_curve()?;
        self.engage_direction = spec.direction;
        self.disengage_direction = opposite(spec.direction);
        Ok(self)
    }

    /// 点击透传回调（每次通过闸门的触发都先调用它）
    pub fn on_trigger(mut self, on_trigger: impl Fn() + 'static) -> Self {
        self.on_trigger = Some(Rc::new(on_trigger));
        self
    }

    /// 替换点击闸门（测试或多窗口宿主）
    pub fn gate(mut self, gate: &'static ClickGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// 切换到接通状态时的揭示方向
    pub fn engage_direction(mut self, direction: RevealDirection) -> Self {
        self.engage_direction = direction;
        self
    }

    /// 切换到断开状态时的揭示方向
    pub fn disengage_direction(mut self, direction: RevealDirection) -> Self {
        self.disengage_direction = direction;
        self
    }

    /// 切换到接通状态时的回调集
    pub fn engage_callbacks(mut self, callbacks: SwitchCallbacks) -> Self {
        self.engage_callbacks = callbacks;
        self
    }

    /// 切换到断开状态时的回调集
    pub fn disengage_callbacks(mut self, callbacks: SwitchCallbacks) -> Self {
        self.disengage_callbacks = callbacks;
        self
    }

    /// 初始状态（默认断开）
    pub fn initially_engaged(mut self, engaged: bool) -> Self {
        self.initially_engaged = engaged;
        self
    }

    /// 构建开关
    ///
    /// # 返回
    /// - `Err(RevealError::InvalidDuration)`: 时长为零
    pub fn build(self) -> RevealResult<Rc<RedrawSwitch>> {
        let mut animator = TransitionAnimator::new(self.duration_ms, self.curve)?;
        if let Some(gate) = self.gate {
            animator = animator.with_gate(gate);
        }
        Ok(Rc::new(RedrawSwitch {
            core: SwitchCore::new(&self.window, &self.container, animator, self.on_trigger),
            apply: self.apply,
            engaged: Cell::new(self.initially_engaged),
            engage: DirectionSpec {
                direction: self.engage_direction,
                callbacks: self.engage_callbacks,
            },
            disengage: DirectionSpec {
                direction: self.disengage_direction,
                callbacks: self.disengage_callbacks,
            },
        }))
    }
}

fn opposite(direction: RevealDirection) -> RevealDirection {
    match direction {
        RevealDirection::Shrink => RevealDirection::Expand,
        RevealDirection::Expand => RevealDirection::Shrink,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::animator::AnimatorPhase;
    use crate::error::{CaptureError, RevealError};
    use crate::host::SnapshotJob;
    use crate::overlay::{Circle, OverlayLayer, ZOrder};
    use crate::pixmap::Pixmap;
    use std::sync::Mutex;

    struct TestWindow {
        color: Mutex<[u8; 4]>,
    }

    impl TestWindow {
        fn new(color: [u8; 4]) -> Self {
            Self {
                color: Mutex::new(color),
            }
        }

        fn set_color(&self, color: [u8; 4]) {
            *self.color.lock().unwrap() = color;
        }
    }

    impl HostWindow for TestWindow {
        fn async_snapshot_job(&self) -> Option<SnapshotJob> {
            None
        }

        fn render_sync(&self) -> Result<Pixmap, CaptureError> {
            Ok(Pixmap::from_fill(100, 100, *self.color.lock().unwrap()))
        }
    }

    struct TestContainer {
        overlays: Mutex<Vec<(Arc<OverlayLayer>, ZOrder)>>,
    }

    impl TestContainer {
        fn new() -> Self {
            Self {
                overlays: Mutex::new(Vec::new()),
            }
        }

        fn overlay_count(&self) -> usize {
            self.overlays.lock().unwrap().len()
        }

        fn first_overlay(&self) -> Option<Arc<OverlayLayer>> {
            self.overlays
                .lock()
                .unwrap()
                .first()
                .map(|(layer, _)| layer.clone())
        }
    }

    impl RootContainer for TestContainer {
        fn size(&self) -> (u32, u32) {
            (100, 100)
        }

        fn insert_overlay(&self, layer: Arc<OverlayLayer>, z: ZOrder) {
            self.overlays.lock().unwrap().push((layer, z));
        }

        fn remove_overlay(&self, layer: &OverlayLayer) {
            self.overlays
                .lock()
                .unwrap()
                .retain(|(stored, _)| !std::ptr::eq(Arc::as_ptr(stored), layer));
        }

        fn set_content_clip(&self, _clip: Option<Circle>) {}
    }

    fn test_gate() -> &'static ClickGate {
        Box::leak(Box::new(ClickGate::new()))
    }

    fn build_switch(
        window: &Arc<TestWindow>,
        container: &Arc<TestContainer>,
    ) -> Rc<RedrawSwitch> {
        let apply_window = window.clone();
        RedrawSwitch::builder(window.clone(), container.clone(), move |engaged| {
            // 状态变更只是重新着色
            apply_window.set_color(if engaged {
                [0, 0, 0, 255]
            } else {
                [255, 255, 255, 255]
            });
        })
        .gate(test_gate())
        .build()
        .unwrap()
    }

    #[test]
    fn test_trigger_captures_before_apply() {
        let window = Arc::new(TestWindow::new([255, 255, 255, 255]));
        let container = Arc::new(TestContainer::new());
        let switch = build_switch(&window, &container);

        switch.trigger_at(50.0, 50.0).unwrap();
        assert!(switch.is_engaged());
        assert!(switch.is_animating());

        // 快照里必须是变更前（白色）的画面
        let overlay = container.first_overlay().unwrap();
        assert_eq!(
            overlay.snapshot().pixmap().pixel(0, 0),
            Some([255, 255, 255, 255])
        );
        // 窗口本身已经被重新着色
        assert_eq!(
            window.render_sync().unwrap().pixel(0, 0),
            Some([0, 0, 0, 255])
        );
    }

    #[test]
    fn test_second_trigger_is_noop_while_animating() {
        let window = Arc::new(TestWindow::new([255, 255, 255, 255]));
        let container = Arc::new(TestContainer::new());
        let switch = build_switch(&window, &container);

        switch.trigger_at(50.0, 50.0).unwrap();
        assert!(switch.is_engaged());
        assert_eq!(container.overlay_count(), 1);

        // 播放中再触发：状态不变、没有第二个遮罩
        switch.trigger_at(10.0, 10.0).unwrap();
        assert!(switch.is_engaged());
        assert_eq!(container.overlay_count(), 1);
    }

    #[test]
    fn test_full_toggle_roundtrip() {
        let window = Arc::new(TestWindow::new([255, 255, 255, 255]));
        let container = Arc::new(TestContainer::new());
        let switch = build_switch(&window, &container);

        switch.trigger_at(50.0, 50.0).unwrap();
        while switch.update(0.05) {}
        assert!(!switch.is_animating());
        assert_eq!(container.overlay_count(), 0);

        // 反向切换回断开
        switch.trigger_at(50.0, 50.0).unwrap();
        assert!(!switch.is_engaged());
        while switch.update(0.05) {}
        assert_eq!(container.overlay_count(), 0);
    }

    #[test]
    fn test_dead_container_is_missing_root() {
        let window = Arc::new(TestWindow::new([255, 255, 255, 255]));
        let container = Arc::new(TestContainer::new());
        let switch = build_switch(&window, &container);

        drop(container);
        assert!(matches!(
            switch.trigger_at(1.0, 1.0),
            Err(RevealError::MissingRoot)
        ));
        // 失败的触发不碰动画器
        assert_eq!(
            switch.core.animator.borrow().phase(),
            AnimatorPhase::Idle
        );
    }

    #[test]
    fn test_directions_follow_target_state() {
        let window = Arc::new(TestWindow::new([255, 255, 255, 255]));
        let container = Arc::new(TestContainer::new());
        let apply_window = window.clone();
        let switch = RedrawSwitch::builder(window.clone(), container.clone(), move |engaged| {
            apply_window.set_color(if engaged { [0; 4] } else { [255; 4] });
        })
        .gate(test_gate())
        .engage_direction(RevealDirection::Shrink)
        .disengage_direction(RevealDirection::Shrink)
        .build()
        .unwrap();

        switch.trigger_at(50.0, 50.0).unwrap();
        // Shrink：遮罩盖顶并带初始裁剪圆
        let overlay = container.first_overlay().unwrap();
        assert!(overlay.clip().is_some());
    }

    #[test]
    fn test_zero_duration_rejected_at_build() {
        let window = Arc::new(TestWindow::new([0; 4]));
        let container = Arc::new(TestContainer::new());
        let result = RedrawSwitch::builder(window, container, |_| {})
            .duration_ms(0)
            .build();
        assert!(matches!(result, Err(RevealError::InvalidDuration)));
    }
}
