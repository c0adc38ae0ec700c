//! # RecreateSwitch 模块
//!
//! 整树重建触发策略：状态变更（典型：换整套主题）迫使宿主销毁并
//! 重建根容器，动画要推迟到新容器就位之后再播放。
//!
//! ## 触发时序
//!
//! ```text
//! trigger ──► 截屏 ──► 防重检查 ──► 装载动画
//!                │
//!                ├─► scheduler.request_recreate()   （宿主异步重建）
//!                └─► scheduler.post(延续闭包)
//!                          │
//!                          ▼ 下一个调度节拍（重建已可见）
//!                    consume_current_root() → 换绑 → begin
//! ```
//!
//! 重建请求一定先于延续闭包入队，宿主保证重建结果对后排的任务
//! 可见；没收到通告时沿用已知引用——重建不保证与触发同步完成。

use std::rc::{Rc, Weak};
use std::sync::Arc;

use tracing::{debug, error};

use super::pending::{PendingTheme, ThemeTag};
use super::SwitchCore;
use crate::animator::{RevealDirection, SwitchCallbacks, TransitionAnimator};
use crate::capture::capture_snapshot;
use crate::config::{DEFAULT_DURATION_MS, TransitionSpec};
use crate::easing::CubicBezier;
use crate::error::RevealResult;
use crate::gate::ClickGate;
use crate::host::{HostWindow, RootContainer, UiScheduler};
use crate::registry::RootRegistry;

/// 整树重建开关
///
/// 绑定一个目标主题；触发后请求宿主重建根容器，并在下一个调度
/// 节拍把过渡接到（可能是新的）根容器上播放。
pub struct RecreateSwitch {
    core: SwitchCore,
    theme: ThemeTag,
    direction: RevealDirection,
    callbacks: SwitchCallbacks,
    scheduler: Rc<dyn UiScheduler>,
    registry: &'static RootRegistry,
    pending: &'static PendingTheme,
    self_weak: Weak<RecreateSwitch>,
}

impl RecreateSwitch {
    /// 创建构建器
    pub fn builder(
        window: Arc<dyn HostWindow>,
        container: Arc<dyn RootContainer>,
        scheduler: Rc<dyn UiScheduler>,
        theme: ThemeTag,
    ) -> RecreateSwitchBuilder {
        RecreateSwitchBuilder::new(window, container, scheduler, theme)
    }

    /// 记录按下坐标（表面坐标系）
    pub fn press(&self, x: f32, y: f32) {
        self.core.press(x, y);
    }

    /// 用最近一次按下的坐标触发主题切换
    ///
    /// 闸门关闭或目标主题已在切换中时是无操作。
    pub fn trigger(&self) -> RevealResult<()> {
        if !self.core.clickable() {
            debug!("过渡进行中，忽略触发");
            return Ok(());
        }
        self.core.fire_trigger_callback();

        let window = self.core.window()?;

        // 截屏必须先于重建请求：快照要保住旧主题的画面
        let snapshot = capture_snapshot(window.as_ref())?;

        if !self.pending.request(self.theme) {
            debug!(theme = %self.theme, "目标主题已在切换中，忽略重复触发");
            return Ok(());
        }

        self.core.animator_mut().arm(
            snapshot,
            self.core.origin(),
            self.direction,
            self.callbacks.clone(),
        );

        // 先请求重建，再排延续任务：宿主保证重建先于后排任务可见
        self.scheduler.request_recreate();
        let weak = self.self_weak.clone();
        self.scheduler.post(Box::new(move || {
            if let Some(switch) = weak.upgrade() {
                switch.resume_after_recreate();
            } else {
                debug!("开关已销毁，放弃恢复过渡");
            }
        }));
        Ok(())
    }

    /// 在指定坐标触发主题切换（press + trigger）
    pub fn trigger_at(&self, x: f32, y: f32) -> RevealResult<()> {
        self.press(x, y);
        self.trigger()
    }

    /// 重建节拍之后恢复过渡
    fn resume_after_recreate(&self) {
        match self.registry.consume_current_root() {
            Some(handle) if handle.container.strong_count() > 0 => {
                debug!("收到根容器重建通知，换绑窗口与根容器");
                self.core.rebind(handle);
            }
            Some(_) => {
                // 通告过但引用已死：沿用已知引用比直接失败更稳
                debug!("通告的根容器已失效，沿用已知引用");
            }
            None => {
                debug!("未收到根容器重建通知，沿用已知引用");
            }
        }

        match self.core.container() {
            Ok(container) => {
                self.core.animator_mut().begin(&container);
            }
            Err(_) => {
                error!("根容器不可用，放弃本次过渡");
                let _ = self.core.animator_mut().cancel();
            }
        }
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

    /// 绑定的目标主题
    pub fn theme(&self) -> ThemeTag {
        self.theme
    }

    /// 是否正在播放过渡
    pub fn is_animating(&self) -> bool {
        self.core.is_animating()
    }
}

/// [`RecreateSwitch`] 构建器
pub struct RecreateSwitchBuilder {
    window: Arc<dyn HostWindow>,
    container: Arc<dyn RootContainer>,
    scheduler: Rc<dyn UiScheduler>,
    theme: ThemeTag,
    duration_ms: u32,
    curve: CubicBezier,
    direction: RevealDirection,
    callbacks: SwitchCallbacks,
    on_trigger: Option<Rc<dyn Fn()>>,
    gate: Option<&'static ClickGate>,
    registry: Option<&'static RootRegistry>,
    pending: Option<&'static PendingTheme>,
}

impl RecreateSwitchBuilder {
    pub fn new(
        window: Arc<dyn HostWindow>,
        container: Arc<dyn RootContainer>,
        scheduler: Rc<dyn UiScheduler>,
        theme: ThemeTag,
    ) -> Self {
        Self {
            window,
            container,
            scheduler,
            theme,
            duration_ms: DEFAULT_DURATION_MS,
            curve: CubicBezier::standard(),
            direction: RevealDirection::Expand,
            callbacks: SwitchCallbacks::new(),
            on_trigger: None,
            gate: None,
            registry: None,
            pending: None,
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

    /// 从可序列化配置读取时长、曲线与方向
    pub fn spec(mut self, spec: &TransitionSpec) -> RevealResult<Self> {
        self.duration_ms = spec.duration_ms;
        self.curve = spec.curve.to_curve()?;
        self.direction = spec.direction;
        Ok(self)
    }

    /// 揭示方向
    pub fn direction(mut self, direction: RevealDirection) -> Self {
        self.direction = direction;
        self
    }

    /// 过渡生命周期回调集
    pub fn callbacks(mut self, callbacks: SwitchCallbacks) -> Self {
        self.callbacks = callbacks;
        self
    }

    /// 点击透传回调
    pub fn on_trigger(mut self, on_trigger: impl Fn() + 'static) -> Self {
        self.on_trigger = Some(Rc::new(on_trigger));
        self
    }

    /// 替换点击闸门（测试或多窗口宿主）
    pub fn gate(mut self, gate: &'static ClickGate) -> Self {
        self.gate = Some(gate);
        self
    }

    /// 替换根容器注册表（默认进程级单例）
    pub fn registry(mut self, registry: &'static RootRegistry) -> Self {
        self.registry = Some(registry);
        self
    }

    /// 替换待生效主题槽位（默认进程级单例）
    pub fn pending_theme(mut self, pending: &'static PendingTheme) -> Self {
        self.pending = Some(pending);
        self
    }

    /// 构建开关
    ///
    /// # 返回
    /// - `Err(RevealError::InvalidDuration)`: 时长为零
    pub fn build(self) -> RevealResult<Rc<RecreateSwitch>> {
        let mut animator = TransitionAnimator::new(self.duration_ms, self.curve)?;
        if let Some(gate) = self.gate {
            animator = animator.with_gate(gate);
        }
        let core = SwitchCore::new(&self.window, &self.container, animator, self.on_trigger);
        let registry = self.registry.unwrap_or_else(RootRegistry::global);
        let pending = self.pending.unwrap_or_else(PendingTheme::global);
        Ok(Rc::new_cyclic(|self_weak| RecreateSwitch {
            core,
            theme: self.theme,
            direction: self.direction,
            callbacks: self.callbacks,
            scheduler: self.scheduler,
            registry,
            pending,
            self_weak: self_weak.clone(),
        }))
    }
}
