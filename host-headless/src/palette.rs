//! # Palette 模块
//!
//! 主题的无头替身：一组按 [`ThemeTag`] 索引的纯色。
//!
//! 真实宿主里主题是一整套样式资源；无头宿主只需要能在像素层面
//! 区分「换了主题」，纯色背景就够了。

use reveal_runtime::ThemeTag;

/// 日间模式背景色
pub const DAY_BACKGROUND: [u8; 4] = [245, 245, 245, 255];

/// 夜间模式背景色
pub const NIGHT_BACKGROUND: [u8; 4] = [24, 24, 28, 255];

/// 一套主题配色
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    pub tag: ThemeTag,
    pub name: String,
    pub background: [u8; 4],
}

impl Palette {
    pub fn new(tag: ThemeTag, name: impl Into<String>, background: [u8; 4]) -> Self {
        Self {
            tag,
            name: name.into(),
            background,
        }
    }
}

/// 内置主题集（默认 + 四套彩色主题）
pub fn default_palettes() -> Vec<Palette> {
    vec![
        Palette::new(ThemeTag(0), "default", [236, 233, 244, 255]),
        Palette::new(ThemeTag(1), "red", [244, 67, 54, 255]),
        Palette::new(ThemeTag(2), "green", [76, 175, 80, 255]),
        Palette::new(ThemeTag(3), "blue", [33, 150, 243, 255]),
        Palette::new(ThemeTag(4), "yellow", [255, 235, 59, 255]),
    ]
}
