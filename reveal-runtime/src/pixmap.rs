//! # Pixmap 模块
//!
//! RGBA8 像素缓冲与截屏快照类型。
//!
//! 引擎本身不做光栅化，[`Pixmap`] 只是宿主渲染结果在引擎内的统一
//! 载体：截屏产出它，遮罩层持有它，宿主合成时读回它。

use std::fmt;
use std::sync::Arc;

/// 每像素字节数（RGBA8）
pub const BYTES_PER_PIXEL: usize = 4;

/// RGBA8 像素缓冲
#[derive(Clone, PartialEq, Eq)]
pub struct Pixmap {
    width: u32,
    height: u32,
    data: Vec<u8>,
}

impl Pixmap {
    /// 创建全透明的像素缓冲
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            data: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
        }
    }

    /// 创建纯色填充的像素缓冲
    pub fn from_fill(width: u32, height: u32, color: [u8; 4]) -> Self {
        let mut pixmap = Self::new(width, height);
        pixmap.fill(color);
        pixmap
    }

    /// 从原始字节创建
    ///
    /// # 返回
    /// - `None`: 字节长度与尺寸不匹配
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Option<Self> {
        if data.len() != width as usize * height as usize * BYTES_PER_PIXEL {
            return None;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// 原始字节（按行存储，每像素 RGBA 四字节）
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// 纯色填充整个缓冲
    pub fn fill(&mut self, color: [u8; 4]) {
        for chunk in self.data.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&color);
        }
    }

    /// 读取单个像素
    ///
    /// # 返回
    /// - `None`: 坐标越界
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        let mut color = [0; 4];
        color.copy_from_slice(&self.data[offset..offset + BYTES_PER_PIXEL]);
        Some(color)
    }

    /// 写入单个像素
    ///
    /// # 返回
    /// - `false`: 坐标越界
    pub fn set_pixel(&mut self, x: u32, y: u32, color: [u8; 4]) -> bool {
        if x >= self.width || y >= self.height {
            return false;
        }
        let offset = (y as usize * self.width as usize + x as usize) * BYTES_PER_PIXEL;
        self.data[offset..offset + BYTES_PER_PIXEL].copy_from_slice(&color);
        true
    }
}

impl fmt::Debug for Pixmap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Pixmap")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish()
    }
}

/// 截屏使用的策略路径
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CapturePath {
    /// 快速路径：异步拷贝真实渲染结果
    Fast,
    /// 兜底路径：同步强制渲染到内存缓冲
    Fallback,
}

/// 冻结的屏幕快照
///
/// 在状态变更前拍下，整个过渡期间不可变；像素缓冲用 `Arc` 共享给
/// 遮罩层，动画结束或取消后随遮罩层一起丢弃。
#[derive(Debug, Clone)]
pub struct Snapshot {
    pixmap: Arc<Pixmap>,
    path: CapturePath,
}

impl Snapshot {
    /// 创建快照
    pub fn new(pixmap: Pixmap, path: CapturePath) -> Self {
        Self {
            pixmap: Arc::new(pixmap),
            path,
        }
    }

    pub fn pixmap(&self) -> &Arc<Pixmap> {
        &self.pixmap
    }

    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// 产出该快照的策略路径
    pub fn path(&self) -> CapturePath {
        self.path
    }
}
