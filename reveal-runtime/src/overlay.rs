//! # Overlay 模块
//!
//! 过渡期间插入根容器的临时遮罩层。
//!
//! 遮罩层持有冻结快照，按变体插在内容之上或之下，裁剪圆半径由
//! 动画驱动。动画开始时创建、结束或取消时移除，绝不跨过渡存活。

use std::fmt;
use std::sync::Mutex;

use crate::pixmap::Snapshot;

/// 裁剪圆（表面坐标系）
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Circle {
    pub cx: f32,
    pub cy: f32,
    pub radius: f32,
}

impl Circle {
    /// 创建裁剪圆
    pub fn new(cx: f32, cy: f32, radius: f32) -> Self {
        Self { cx, cy, radius }
    }

    /// 判断点是否落在圆内（含边界）
    pub fn contains(&self, x: f32, y: f32) -> bool {
        let dx = x - self.cx;
        let dy = y - self.cy;
        dx * dx + dy * dy <= self.radius * self.radius
    }
}

/// 遮罩层在根容器中的层级
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    /// 盖在现有内容之上（收缩变体：旧画面收走，露出底下的新内容）
    Top,
    /// 垫在现有内容之下（扩张变体：新内容的可见圆逐渐长大）
    Bottom,
}

/// 遮罩层内部状态
#[derive(Debug, Default)]
struct OverlayState {
    clip: Option<Circle>,
}

/// 临时遮罩层
///
/// 引擎创建并持有，通过 [`crate::host::RootContainer`] 插入宿主的
/// 根容器；宿主渲染时读取快照与当前裁剪圆。`clip` 为 `None` 表示
/// 整层可见（不裁剪）。
pub struct OverlayLayer {
    snapshot: Snapshot,
    state: Mutex<OverlayState>,
}

impl OverlayLayer {
    /// 用快照创建遮罩层
    pub fn new(snapshot: Snapshot) -> Self {
        Self {
            snapshot,
            state: Mutex::new(OverlayState::default()),
        }
    }

    /// 遮罩层持有的快照
    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    /// 当前裁剪圆
    pub fn clip(&self) -> Option<Circle> {
        self.state
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clip
    }

    /// 设置裁剪圆（动画每帧更新）
    pub fn set_clip(&self, clip: Option<Circle>) {
        self.state
            .lock()
            .unwrap_or_else(|poison| poison.into_inner())
            .clip = clip;
    }
}

impl fmt::Debug for OverlayLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OverlayLayer")
            .field("snapshot", &self.snapshot)
            .field("clip", &self.clip())
            .finish()
    }
}
