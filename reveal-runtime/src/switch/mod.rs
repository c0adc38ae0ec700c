//! # Switch 模块
//!
//! 面向应用的开关层：把「一次点击」变成「一次圆形揭示过渡」。
//!
//! 两个固定的触发策略：
//!
//! - [`RedrawSwitch`]：状态变更只需要重绘（典型：日夜模式）。截屏 →
//!   直接应用变更 → 立刻播放动画。
//! - [`RecreateSwitch`]：状态变更要求宿主整树重建根容器（典型：换
//!   整套主题）。截屏 → 请求重建 → 把动画推迟到下一个调度节拍、
//!   重新挂到新容器上再播放。
//!
//! 两者都由各自的构建器配置（时长、曲线、方向、各阶段回调、点击
//! 透传），build 之后配置不可变、绑定唯一的目标表面。

mod pending;
mod recreate;
mod redraw;

pub use pending::{PendingTheme, ThemeTag};
pub use recreate::{RecreateSwitch, RecreateSwitchBuilder};
pub use redraw::{RedrawSwitch, RedrawSwitchBuilder};

use std::cell::{Cell, RefCell, RefMut};
use std::rc::Rc;
use std::sync::{Arc, Weak};

use tracing::debug;

use crate::animator::TransitionAnimator;
use crate::error::{RevealError, RevealResult};
use crate::gate::ClickGate;
use crate::geometry::TouchOrigin;
use crate::host::{HostWindow, RootContainer};
use crate::registry::RootHandle;

/// 开关的公共骨架
///
/// 持宿主对象的弱引用（宿主随时可能丢弃并重建它们）、触点槽位和
/// 动画器。触点每次按下覆写，由下一次触发消费。
pub(crate) struct SwitchCore {
    window: RefCell<Weak<dyn HostWindow>>,
    container: RefCell<Weak<dyn RootContainer>>,
    origin: Cell<TouchOrigin>,
    animator: RefCell<TransitionAnimator>,
    on_trigger: Option<Rc<dyn Fn()>>,
    gate: &'static ClickGate,
}

impl SwitchCore {
    pub(crate) fn new(
        window: &Arc<dyn HostWindow>,
        container: &Arc<dyn RootContainer>,
        animator: TransitionAnimator,
        on_trigger: Option<Rc<dyn Fn()>>,
    ) -> Self {
        let gate = animator.gate();
        Self {
            window: RefCell::new(Arc::downgrade(window)),
            container: RefCell::new(Arc::downgrade(container)),
            origin: Cell::new(TouchOrigin::default()),
            animator: RefCell::new(animator),
            on_trigger,
            gate,
        }
    }

    /// 记录按下坐标（表面坐标系）
    pub(crate) fn press(&self, x: f32, y: f32) {
        debug!(x, y, "记录按下坐标");
        self.origin.set(TouchOrigin::new(x, y));
    }

    pub(crate) fn origin(&self) -> TouchOrigin {
        self.origin.get()
    }

    /// 点击闸门是否放行
    ///
    /// 直接读闸门而不碰动画器——`on_start` 回调里发生的再触发要在
    /// 这里被挡下，而此时动画器还处于被借用状态。
    pub(crate) fn clickable(&self) -> bool {
        self.gate.is_open()
    }

    pub(crate) fn fire_trigger_callback(&self) {
        if let Some(on_trigger) = &self.on_trigger {
            on_trigger();
        }
    }

    pub(crate) fn window(&self) -> RevealResult<Arc<dyn HostWindow>> {
        self.window
            .borrow()
            .upgrade()
            .ok_or(RevealError::MissingRoot)
    }

    pub(crate) fn container(&self) -> RevealResult<Arc<dyn RootContainer>> {
        self.container
            .borrow()
            .upgrade()
            .ok_or(RevealError::MissingRoot)
    }

    /// 换绑到重建后的窗口/容器对
    pub(crate) fn rebind(&self, handle: RootHandle) {
        *self.window.borrow_mut() = handle.window;
        *self.container.borrow_mut() = handle.container;
    }

    pub(crate) fn animator_mut(&self) -> RefMut<'_, TransitionAnimator> {
        self.animator.borrow_mut()
    }

    /// 推进动画一帧
    ///
    /// # 返回
    /// - `true`: 动画仍在播放
    pub(crate) fn update(&self, dt: f32) -> bool {
        let finished = self.animator.borrow_mut().update(dt);
        let active = self.animator.borrow().is_animating();
        if let Some(finished) = finished {
            // 动画器借用已释放，回调里再触发新过渡是安全的
            finished.fire();
        }
        active
    }

    /// 取消进行中的过渡
    pub(crate) fn cancel(&self) {
        let finished = self.animator.borrow_mut().cancel();
        if let Some(finished) = finished {
            finished.fire();
        }
    }

    pub(crate) fn is_animating(&self) -> bool {
        self.animator.borrow().is_animating()
    }
}
