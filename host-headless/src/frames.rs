//! # Frames 模块
//!
//! 把渲染出的帧写成 PNG，供演示回放与肉眼检查。

use std::fs;
use std::path::{Path, PathBuf};

use image::RgbaImage;
use reveal_runtime::Pixmap;
use thiserror::Error;

/// 帧导出错误
#[derive(Error, Debug)]
pub enum FrameDumpError {
    /// 目录创建或写入失败
    #[error("帧导出 IO 错误: {0}")]
    Io(#[from] std::io::Error),

    /// 像素缓冲与宽高不一致
    #[error("像素缓冲尺寸与宽高不一致")]
    BadBuffer,

    /// PNG 编码失败
    #[error("PNG 编码失败: {0}")]
    Encode(#[from] image::ImageError),
}

/// 把一帧写到 `dir/frame_NNNN.png`
///
/// # 返回
/// 写入的文件路径
pub fn dump_frame(dir: &Path, index: u32, pixmap: &Pixmap) -> Result<PathBuf, FrameDumpError> {
    fs::create_dir_all(dir)?;
    let image = RgbaImage::from_raw(pixmap.width(), pixmap.height(), pixmap.data().to_vec())
        .ok_or(FrameDumpError::BadBuffer)?;
    let path = dir.join(format!("frame_{index:04}.png"));
    image.save(&path)?;
    Ok(path)
}
