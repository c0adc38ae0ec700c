//! # Host-Headless
//!
//! reveal-runtime 的参考宿主：软件渲染、确定性调度、没有真窗口。
//!
//! ## 架构说明
//!
//! 宿主层负责：
//! - 根容器与软件合成（[`surface`]）
//! - 截屏能力（[`window`]，快速路径行为可配置）
//! - UI 线程任务队列与整树重建（[`scheduler`] + [`app`]）
//! - 主题配色与配置文件（[`palette`] + [`config`]）
//! - 帧导出（[`frames`]）
//!
//! 宿主不包含过渡逻辑，只实现引擎的能力接口并执行它的调度请求。
//! 完整的过渡链路（截屏 → 重建 → 揭示）在 `tests/` 里跑通。

pub mod app;
pub mod config;
pub mod frames;
pub mod palette;
pub mod scheduler;
pub mod surface;
pub mod window;

pub use app::HeadlessApp;
pub use config::{AppConfig, ConfigError, ThemeConfig, WindowConfig};
pub use frames::{FrameDumpError, dump_frame};
pub use palette::{DAY_BACKGROUND, NIGHT_BACKGROUND, Palette, default_palettes};
pub use scheduler::{PumpReport, UiQueue};
pub use surface::HeadlessRoot;
pub use window::{FastPathMode, HeadlessWindow};
