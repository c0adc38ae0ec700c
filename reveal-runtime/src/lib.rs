//! # Reveal Runtime
//!
//! 圆形揭示过渡引擎：用一张冻结的屏幕快照和一个从触点生长/收缩的
//! 圆形遮罩，把突兀的界面变更（日夜模式、整套主题切换）藏进一次
//! 平滑的几何擦除里。
//!
//! ## 架构概述
//!
//! 引擎是纯逻辑核心，不认识具体的视图体系，通过窄接口与宿主协作：
//!
//! ```text
//! 应用层                引擎                          宿主能力
//!   │                    │                              │
//!   │── press(x, y) ────►│                              │
//!   │── trigger() ──────►│── capture ──────────────────►│ HostWindow
//!   │                    │── 应用状态变更 / 请求重建 ──►│ UiScheduler
//!   │                    │── 插入遮罩、驱动裁剪圆 ─────►│ RootContainer
//!   │◄─ on_start/on_end ─│                              │
//! ```
//!
//! 时间轴是单一协作式 UI 线程：宿主每帧调用 `update(dt)` 推进插值，
//! 唯一的第二线程是截屏快速路径的短命辅助线程（见 [`capture`]）。
//! 进程级可变状态只有三处，都有文档化的生命周期：
//! [`ClickGate`]（同一时刻至多一个过渡在播放）、
//! [`RootRegistry`]（撑过宿主中途的整树重建）、
//! [`PendingTheme`]（重建请求防重 + 宿主查询待生效主题）。
//!
//! ## 核心类型
//!
//! - [`RedrawSwitch`]：纯重绘变体（日夜模式）
//! - [`RecreateSwitch`]：整树重建变体（换整套主题）
//! - [`TransitionAnimator`]：收缩/扩张动画状态机
//! - [`CubicBezier`]：三次贝塞尔缓动（Newton-Raphson 反解）
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use reveal_runtime::{RedrawSwitch, RevealDirection};
//!
//! let switch = RedrawSwitch::builder(window, container, |night| {
//!     apply_night_mode(night);
//! })
//! .duration_ms(400)
//! .build()?;
//!
//! // 输入层：按下时记录触点，点击时触发
//! switch.press(x, y);
//! switch.trigger()?;
//!
//! // 帧循环
//! while switch.update(dt) { /* 宿主渲染 */ }
//! ```
//!
//! ## 模块结构
//!
//! - [`easing`]：缓动曲线
//! - [`geometry`]：触点与覆盖半径
//! - [`capture`]：快照采集（快速路径 + 兜底）
//! - [`registry`]：根容器注册表
//! - [`animator`]：过渡状态机
//! - [`switch`]：开关层（构建器与两个触发策略）
//! - [`host`]：宿主能力接口
//! - [`error`]：错误类型定义

pub mod animator;
pub mod capture;
pub mod config;
pub mod easing;
pub mod error;
pub mod gate;
pub mod geometry;
pub mod host;
pub mod overlay;
pub mod pixmap;
pub mod registry;
pub mod switch;

// 重导出核心类型
pub use animator::{
    AnimatorPhase, FinishedTransition, RevealDirection, RevealEvent, SwitchCallbacks,
    TransitionAnimator,
};
pub use capture::{CAPTURE_TIMEOUT, capture_snapshot, capture_with_timeout};
pub use config::{DEFAULT_DURATION_MS, TransitionSpec};
pub use easing::{CubicBezier, CurveParams};
pub use error::{CaptureError, RevealError, RevealResult};
pub use gate::ClickGate;
pub use geometry::{TouchOrigin, cover_radius};
pub use host::{HostWindow, RootContainer, SnapshotJob, UiScheduler};
pub use overlay::{Circle, OverlayLayer, ZOrder};
pub use pixmap::{CapturePath, Pixmap, Snapshot};
pub use registry::{RootHandle, RootRegistry};
pub use switch::{
    PendingTheme, RecreateSwitch, RecreateSwitchBuilder, RedrawSwitch, RedrawSwitchBuilder,
    ThemeTag,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_public_api_accessible() {
        // 验证核心类型都能从 crate 根直接使用
        let _curve = CubicBezier::standard();
        let _origin = TouchOrigin::new(1.0, 2.0);
        let _direction = RevealDirection::Expand;
        let _spec = TransitionSpec::default();
        let _tag = ThemeTag(1);

        let radius = cover_radius(TouchOrigin::new(0.0, 0.0), 3.0, 4.0);
        assert_eq!(radius, 5.0);
    }
}
