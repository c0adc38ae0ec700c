//! # Animator 模块
//!
//! 圆形揭示过渡的状态机与时间轴驱动。
//!
//! ## 状态流转
//!
//! ```text
//! Idle → Armed(快照, 触点) → Animating → { Completed | Cancelled } → Idle
//! ```
//!
//! 装载（arm）发生在截屏之后、宿主状态变更前后之间；进入播放
//! （begin）时构建遮罩层插入根容器、关闭点击闸门并同步触发
//! `on_start`。播放期间由宿主每帧调用 [`TransitionAnimator::update`]
//! 推进半径插值；结束与取消共用同一套清理，且清理一定先于用户
//! 回调执行——回调抛出也不会留下关着的闸门或残留的遮罩层。
//!
//! 结束/取消的回调不在 `update`/`cancel` 内部直接执行，而是打包成
//! [`FinishedTransition`] 交还调用方：此时动画器已不再被借用，回调
//! 里立刻触发下一次过渡也是安全的。

use std::fmt;
use std::rc::Rc;
use std::sync::{Arc, Weak};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::easing::CubicBezier;
use crate::error::{RevealError, RevealResult};
use crate::gate::ClickGate;
use crate::geometry::{TouchOrigin, cover_radius};
use crate::host::RootContainer;
use crate::overlay::{Circle, OverlayLayer, ZOrder};
use crate::pixmap::Snapshot;

/// 揭示方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RevealDirection {
    /// 旧画面收缩消失，露出底下的新内容
    Shrink,
    /// 新内容的可见圆从触点向外扩张
    Expand,
}

/// 动画器状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimatorPhase {
    /// 空闲
    #[default]
    Idle,
    /// 已装载（快照与触点就绪，等待进入播放）
    Armed,
    /// 播放中
    Animating,
    /// 已完成（下一次 update 回到 Idle）
    Completed,
    /// 已取消（下一次 update 回到 Idle）
    Cancelled,
}

/// 过渡结束事件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealEvent {
    /// 进入播放
    Started,
    /// 正常播完
    Completed,
    /// 中途取消
    Cancelled,
}

/// 一次过渡的生命周期回调
///
/// 回调在 UI 线程上同步执行，引擎不捕获其中的异常；清理先于回调，
/// 所以回调失败也不会留下不一致的闸门或遮罩状态。
#[derive(Clone, Default)]
pub struct SwitchCallbacks {
    pub on_start: Option<Rc<dyn Fn()>>,
    pub on_end: Option<Rc<dyn Fn()>>,
    pub on_cancel: Option<Rc<dyn Fn()>>,
}

impl SwitchCallbacks {
    /// 创建空回调集
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Debug for SwitchCallbacks {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SwitchCallbacks")
            .field("on_start", &self.on_start.is_some())
            .field("on_end", &self.on_end.is_some())
            .field("on_cancel", &self.on_cancel.is_some())
            .finish()
    }
}

/// 已结束的过渡
///
/// 清理（遮罩移除、闸门重开）在动画器内部已经完成，对应的用户
/// 回调打包在这里，由调用方在释放动画器借用后执行。
#[must_use = "需要调用 fire() 执行用户回调"]
pub struct FinishedTransition {
    outcome: RevealEvent,
    callback: Option<Rc<dyn Fn()>>,
}

impl FinishedTransition {
    /// 结束方式
    pub fn outcome(&self) -> RevealEvent {
        self.outcome
    }

    /// 执行用户回调（若有）
    pub fn fire(self) {
        if let Some(callback) = self.callback {
            callback();
        }
    }
}

impl fmt::Debug for FinishedTransition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FinishedTransition")
            .field("outcome", &self.outcome)
            .field("callback", &self.callback.is_some())
            .finish()
    }
}

/// 已装载、尚未播放的过渡
struct ArmedState {
    snapshot: Snapshot,
    origin: TouchOrigin,
    direction: RevealDirection,
    callbacks: SwitchCallbacks,
}

/// 播放中的过渡
struct ActiveRun {
    overlay: Arc<OverlayLayer>,
    container: Weak<dyn RootContainer>,
    direction: RevealDirection,
    callbacks: SwitchCallbacks,
    origin: TouchOrigin,
    cover_radius: f32,
    elapsed: f32,
}

/// 过渡动画器
///
/// 把快照合成进遮罩层、按缓动曲线驱动裁剪圆半径、在状态边界触发
/// 回调。播放期间不排队也不打断：闸门关闭时新触发在表现层被忽略。
pub struct TransitionAnimator {
    duration_ms: u32,
    curve: CubicBezier,
    gate: &'static ClickGate,
    phase: AnimatorPhase,
    armed: Option<ArmedState>,
    run: Option<ActiveRun>,
}

impl TransitionAnimator {
    /// 创建动画器
    ///
    /// # 返回
    /// - `Err(RevealError::InvalidDuration)`: 时长为零
    pub fn new(duration_ms: u32, curve: CubicBezier) -> RevealResult<Self> {
        if duration_ms == 0 {
            return Err(RevealError::InvalidDuration);
        }
        Ok(Self {
            duration_ms,
            curve,
            gate: ClickGate::global(),
            phase: AnimatorPhase::Idle,
            armed: None,
            run: None,
        })
    }

    /// 替换点击闸门（测试或多窗口宿主使用独立闸门）
    pub fn with_gate(mut self, gate: &'static ClickGate) -> Self {
        self.gate = gate;
        self
    }

    /// 当前状态
    pub fn phase(&self) -> AnimatorPhase {
        self.phase
    }

    /// 是否正在播放
    pub fn is_animating(&self) -> bool {
        self.phase == AnimatorPhase::Animating
    }

    /// 使用中的点击闸门
    pub fn gate(&self) -> &'static ClickGate {
        self.gate
    }

    /// 过渡时长（毫秒）
    pub fn duration_ms(&self) -> u32 {
        self.duration_ms
    }

    /// 装载一次过渡
    ///
    /// 冻结快照与触点，等待（可能延迟到根容器重建之后的）`begin`。
    /// 动画器忙时忽略。
    pub fn arm(
        &mut self,
        snapshot: Snapshot,
        origin: TouchOrigin,
        direction: RevealDirection,
        callbacks: SwitchCallbacks,
    ) {
        match self.phase {
            AnimatorPhase::Idle | AnimatorPhase::Completed | AnimatorPhase::Cancelled => {
                debug!(?direction, x = origin.x, y = origin.y, "装载过渡");
                self.armed = Some(ArmedState {
                    snapshot,
                    origin,
                    direction,
                    callbacks,
                });
                self.run = None;
                self.phase = AnimatorPhase::Armed;
            }
            _ => warn!(phase = ?self.phase, "动画器忙，忽略新的装载"),
        }
    }

    /// 进入播放
    ///
    /// 在（可能刚重建的）根容器上构建遮罩层、关闭点击闸门并同步
    /// 触发 `on_start`。`on_start` 执行时闸门已关闭，里面再触发新
    /// 过渡会被闸门挡掉。
    pub fn begin(&mut self, container: &Arc<dyn RootContainer>) {
        if self.phase != AnimatorPhase::Armed {
            warn!(phase = ?self.phase, "动画器不在装载状态，忽略 begin");
            return;
        }
        let Some(armed) = self.armed.take() else {
            self.phase = AnimatorPhase::Idle;
            return;
        };

        if !self.gate.try_close() {
            warn!("点击闸门已关闭，丢弃已装载的过渡");
            self.phase = AnimatorPhase::Idle;
            return;
        }

        let (width, height) = container.size();
        let radius = cover_radius(armed.origin, width as f32, height as f32);
        let overlay = Arc::new(OverlayLayer::new(armed.snapshot));

        match armed.direction {
            RevealDirection::Shrink => {
                // 旧画面盖在最上层，从全覆盖半径收缩到零
                overlay.set_clip(Some(Circle::new(armed.origin.x, armed.origin.y, radius)));
                container.insert_overlay(overlay.clone(), ZOrder::Top);
            }
            RevealDirection::Expand => {
                // 旧画面垫底，新内容先藏在半径为零的圆里逐渐露出
                container.insert_overlay(overlay.clone(), ZOrder::Bottom);
                container.set_content_clip(Some(Circle::new(armed.origin.x, armed.origin.y, 0.0)));
            }
        }

        info!(radius, direction = ?armed.direction, "开始圆形揭示动画");

        let on_start = armed.callbacks.on_start.clone();
        self.run = Some(ActiveRun {
            overlay,
            container: Arc::downgrade(container),
            direction: armed.direction,
            callbacks: armed.callbacks,
            origin: armed.origin,
            cover_radius: radius,
            elapsed: 0.0,
        });
        self.phase = AnimatorPhase::Animating;

        if let Some(on_start) = on_start {
            on_start();
        }
    }

    /// 推进动画
    ///
    /// # 参数
    /// - `dt`: 距上一帧的时间（秒）
    ///
    /// # 返回
    /// - `Some(FinishedTransition)`: 本帧播完，清理已完成，回调待
    ///   调用方执行
    /// - `None`: 仍在播放、或本来就没在播放
    pub fn update(&mut self, dt: f32) -> Option<FinishedTransition> {
        match self.phase {
            AnimatorPhase::Animating => {}
            AnimatorPhase::Completed | AnimatorPhase::Cancelled => {
                self.phase = AnimatorPhase::Idle;
                return None;
            }
            AnimatorPhase::Idle | AnimatorPhase::Armed => return None,
        }

        let reached_end = {
            let Some(run) = self.run.as_mut() else {
                self.phase = AnimatorPhase::Idle;
                return None;
            };
            run.elapsed += dt.max(0.0);
            let duration_secs = self.duration_ms as f32 / 1000.0;
            let raw = run.elapsed / duration_secs;

            if raw >= 1.0 {
                true
            } else {
                let eased = self.curve.progress(raw);
                let radius = match run.direction {
                    RevealDirection::Shrink => run.cover_radius * (1.0 - eased),
                    RevealDirection::Expand => run.cover_radius * eased,
                };
                let clip = Circle::new(run.origin.x, run.origin.y, radius);
                match run.direction {
                    RevealDirection::Shrink => run.overlay.set_clip(Some(clip)),
                    RevealDirection::Expand => {
                        if let Some(container) = run.container.upgrade() {
                            container.set_content_clip(Some(clip));
                        }
                    }
                }
                false
            }
        };

        if reached_end {
            self.finish(RevealEvent::Completed)
        } else {
            None
        }
    }

    /// 取消过渡
    ///
    /// 播放中：与正常结束走同一套清理，随后交出 `on_cancel`。
    /// 已装载未播放：静默丢弃快照。空闲时无操作。
    pub fn cancel(&mut self) -> Option<FinishedTransition> {
        match self.phase {
            AnimatorPhase::Animating => self.finish(RevealEvent::Cancelled),
            AnimatorPhase::Armed => {
                debug!("丢弃已装载的过渡");
                self.armed = None;
                self.phase = AnimatorPhase::Idle;
                None
            }
            _ => None,
        }
    }

    /// 统一收尾：清理一定先于用户回调
    fn finish(&mut self, outcome: RevealEvent) -> Option<FinishedTransition> {
        let run = self.run.take()?;

        if let Some(container) = run.container.upgrade() {
            container.remove_overlay(&run.overlay);
            if run.direction == RevealDirection::Expand {
                container.set_content_clip(None);
            }
        } else {
            // 根容器已被宿主销毁且无替代，宿主侧没有东西可清理
            warn!("根容器已销毁，跳过宿主侧清理");
        }
        self.gate.reopen();

        self.phase = match outcome {
            RevealEvent::Cancelled => AnimatorPhase::Cancelled,
            _ => AnimatorPhase::Completed,
        };
        info!(?outcome, "圆形揭示动画结束");

        let callback = match outcome {
            RevealEvent::Completed => run.callbacks.on_end.clone(),
            RevealEvent::Cancelled => run.callbacks.on_cancel.clone(),
            RevealEvent::Started => None,
        };
        Some(FinishedTransition { outcome, callback })
    }
}

impl fmt::Debug for TransitionAnimator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitionAnimator")
            .field("phase", &self.phase)
            .field("duration_ms", &self.duration_ms)
            .field("gate_open", &self.gate.is_open())
            .finish()
    }
}
