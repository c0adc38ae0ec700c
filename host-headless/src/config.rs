//! # Config 模块
//!
//! 演示宿主的配置管理。
//!
//! ## 配置优先级
//!
//! 1. 命令行参数（最高）
//! 2. 配置文件 (config.json)
//! 3. 默认值（最低）

use std::fs;
use std::path::Path;

use reveal_runtime::TransitionSpec;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::palette::{Palette, default_palettes};

/// 应用配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// 窗口配置
    #[serde(default)]
    pub window: WindowConfig,

    /// 过渡配置（时长、曲线、方向）
    #[serde(default)]
    pub transition: TransitionSpec,

    /// 可切换的主题集
    #[serde(default = "default_themes")]
    pub themes: Vec<ThemeConfig>,
}

/// 窗口配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// 表面宽度（像素）
    #[serde(default = "default_window_width")]
    pub width: u32,

    /// 表面高度（像素）
    #[serde(default = "default_window_height")]
    pub height: u32,

    /// 窗口标题
    #[serde(default = "default_window_title")]
    pub title: String,
}

/// 单套主题配置
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThemeConfig {
    /// 主题名（命令行用它选主题）
    pub name: String,

    /// 主题标识
    pub tag: u32,

    /// 背景色 (RGBA)
    pub background: [u8; 4],
}

impl From<&ThemeConfig> for Palette {
    fn from(config: &ThemeConfig) -> Self {
        Palette::new(
            reveal_runtime::ThemeTag(config.tag),
            config.name.clone(),
            config.background,
        )
    }
}

// 默认值函数
fn default_window_width() -> u32 {
    320
}

fn default_window_height() -> u32 {
    180
}

fn default_window_title() -> String {
    "Reveal Demo".to_string()
}

fn default_themes() -> Vec<ThemeConfig> {
    default_palettes()
        .into_iter()
        .map(|palette| ThemeConfig {
            name: palette.name,
            tag: palette.tag.0,
            background: palette.background,
        })
        .collect()
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            width: default_window_width(),
            height: default_window_height(),
            title: default_window_title(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            transition: TransitionSpec::default(),
            themes: default_themes(),
        }
    }
}

impl AppConfig {
    /// 加载配置文件
    ///
    /// 如果文件不存在或解析失败，返回默认配置并打印警告。
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();

        if !path.exists() {
            println!("⚠️ 配置文件不存在: {:?}，使用默认配置", path);
            return Self::default();
        }

        match fs::read_to_string(path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(config) => {
                    println!("✅ 配置文件加载成功: {:?}", path);
                    config
                }
                Err(e) => {
                    eprintln!("⚠️ 配置文件解析失败: {}，使用默认配置", e);
                    Self::default()
                }
            },
            Err(e) => {
                eprintln!("⚠️ 配置文件读取失败: {}，使用默认配置", e);
                Self::default()
            }
        }
    }

    /// 保存配置到文件
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ConfigError::SerializationFailed(e.to_string()))?;
        fs::write(path, json).map_err(|e| ConfigError::IoError(e.to_string()))?;
        Ok(())
    }

    /// 验证配置有效性
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.window.width == 0 || self.window.height == 0 {
            return Err(ConfigError::ValidationFailed(
                "窗口尺寸必须大于 0".to_string(),
            ));
        }

        if self.transition.duration_ms == 0 {
            return Err(ConfigError::ValidationFailed(
                "过渡时长必须大于 0 毫秒".to_string(),
            ));
        }

        if let Err(e) = self.transition.curve.to_curve() {
            return Err(ConfigError::ValidationFailed(format!(
                "缓动曲线无效: {}",
                e
            )));
        }

        if self.themes.is_empty() {
            return Err(ConfigError::ValidationFailed(
                "至少需要配置一套主题".to_string(),
            ));
        }

        for (i, a) in self.themes.iter().enumerate() {
            for b in self.themes.iter().skip(i + 1) {
                if a.tag == b.tag {
                    return Err(ConfigError::ValidationFailed(format!(
                        "主题 '{}' 与 '{}' 的标识冲突: {}",
                        a.name, b.name, a.tag
                    )));
                }
            }
        }

        Ok(())
    }

    /// 按名字找主题
    pub fn theme_by_name(&self, name: &str) -> Option<&ThemeConfig> {
        self.themes.iter().find(|theme| theme.name == name)
    }
}

/// 配置错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// 序列化失败
    #[error("配置序列化失败: {0}")]
    SerializationFailed(String),

    /// IO 错误
    #[error("配置 IO 错误: {0}")]
    IoError(String),

    /// 验证失败
    #[error("配置验证失败: {0}")]
    ValidationFailed(String),
}
