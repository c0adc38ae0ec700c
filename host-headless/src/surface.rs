//! # Surface 模块
//!
//! 软件渲染的根容器实现。
//!
//! 内容是一块纯色（由当前主题决定），上面/下面可以插引擎的遮罩
//! 层。渲染按画家算法：底层遮罩 → 内容（带可选裁剪圆）→ 顶层
//! 遮罩，全部不透明覆盖，没有混色。

use std::sync::{Arc, Mutex};

use reveal_runtime::{Circle, OverlayLayer, Pixmap, RootContainer, ZOrder};

/// 遮罩层及其层级
struct OverlayEntry {
    layer: Arc<OverlayLayer>,
    z: ZOrder,
}

/// 无头根容器
///
/// 对应真实宿主的顶层视图树；宿主换主题时整个实例会被销毁重建，
/// 引擎只持弱引用。
pub struct HeadlessRoot {
    width: u32,
    height: u32,
    content_color: Mutex<[u8; 4]>,
    content_clip: Mutex<Option<Circle>>,
    overlays: Mutex<Vec<OverlayEntry>>,
}

impl HeadlessRoot {
    /// 创建根容器
    pub fn new(width: u32, height: u32, content_color: [u8; 4]) -> Self {
        Self {
            width,
            height,
            content_color: Mutex::new(content_color),
            content_clip: Mutex::new(None),
            overlays: Mutex::new(Vec::new()),
        }
    }

    /// 重新着色内容（纯重绘的状态变更）
    pub fn set_content_color(&self, color: [u8; 4]) {
        *lock(&self.content_color) = color;
    }

    /// 当前内容颜色
    pub fn content_color(&self) -> [u8; 4] {
        *lock(&self.content_color)
    }

    /// 当前内容裁剪圆
    pub fn content_clip(&self) -> Option<Circle> {
        *lock(&self.content_clip)
    }

    /// 容器里的遮罩层数量
    pub fn overlay_count(&self) -> usize {
        lock(&self.overlays).len()
    }

    /// 第一个遮罩层（测试观察用）
    pub fn first_overlay(&self) -> Option<Arc<OverlayLayer>> {
        lock(&self.overlays).first().map(|entry| entry.layer.clone())
    }

    /// 软件合成当前画面
    pub fn render(&self) -> Pixmap {
        let mut out = Pixmap::from_fill(self.width, self.height, [0, 0, 0, 255]);
        let overlays = lock(&self.overlays);

        for entry in overlays.iter().filter(|entry| entry.z == ZOrder::Bottom) {
            blit_overlay(&mut out, &entry.layer);
        }

        let color = *lock(&self.content_color);
        let clip = *lock(&self.content_clip);
        for y in 0..self.height {
            for x in 0..self.width {
                if clip.is_none_or(|c| c.contains(x as f32 + 0.5, y as f32 + 0.5)) {
                    out.set_pixel(x, y, color);
                }
            }
        }

        for entry in overlays.iter().filter(|entry| entry.z == ZOrder::Top) {
            blit_overlay(&mut out, &entry.layer);
        }

        out
    }
}

impl RootContainer for HeadlessRoot {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn insert_overlay(&self, layer: Arc<OverlayLayer>, z: ZOrder) {
        lock(&self.overlays).push(OverlayEntry { layer, z });
    }

    fn remove_overlay(&self, layer: &OverlayLayer) {
        lock(&self.overlays).retain(|entry| !std::ptr::eq(Arc::as_ptr(&entry.layer), layer));
    }

    fn set_content_clip(&self, clip: Option<Circle>) {
        *lock(&self.content_clip) = clip;
    }
}

impl std::fmt::Debug for HeadlessRoot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessRoot")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("content_color", &self.content_color())
            .field("overlay_count", &self.overlay_count())
            .finish()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> std::sync::MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poison| poison.into_inner())
}

/// 把遮罩层的快照按其裁剪圆盖到输出上
fn blit_overlay(out: &mut Pixmap, layer: &OverlayLayer) {
    let snapshot = layer.snapshot().pixmap();
    let clip = layer.clip();
    let width = out.width().min(snapshot.width());
    let height = out.height().min(snapshot.height());

    for y in 0..height {
        for x in 0..width {
            if !clip.is_none_or(|c| c.contains(x as f32 + 0.5, y as f32 + 0.5)) {
                continue;
            }
            if let Some(pixel) = snapshot.pixel(x, y) {
                out.set_pixel(x, y, pixel);
            }
        }
    }
}
