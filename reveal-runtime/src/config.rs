//! # Config 模块
//!
//! 过渡配置的可序列化形式。
//!
//! 开关一旦 build 完成，配置就固化在实例里；[`TransitionSpec`] 是
//! 给宿主落盘用的中间形式（配置文件、用户偏好），喂给构建器前会
//! 重新校验。

use serde::{Deserialize, Serialize};

use crate::animator::RevealDirection;
use crate::easing::CurveParams;

/// 默认过渡时长（毫秒）
pub const DEFAULT_DURATION_MS: u32 = 400;

/// 可序列化的过渡配置
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransitionSpec {
    /// 过渡时长（毫秒），必须大于 0
    #[serde(default = "default_duration_ms")]
    pub duration_ms: u32,

    /// 缓动曲线控制点
    #[serde(default)]
    pub curve: CurveParams,

    /// 揭示方向
    #[serde(default = "default_direction")]
    pub direction: RevealDirection,
}

fn default_duration_ms() -> u32 {
    DEFAULT_DURATION_MS
}

fn default_direction() -> RevealDirection {
    RevealDirection::Expand
}

impl Default for TransitionSpec {
    fn default() -> Self {
        Self {
            duration_ms: default_duration_ms(),
            curve: CurveParams::default(),
            direction: default_direction(),
        }
    }
}
