//! # Error 模块
//!
//! 定义 reveal-runtime 中使用的错误类型。
//!
//! 截屏快速路径的失败（不支持 / 超时 / 拷贝失败）在 [`crate::capture`]
//! 内部被吞掉并降级到兜底路径，不会出现在公共接口上；只有兜底路径
//! 本身的失败才作为硬错误向外传播。

use thiserror::Error;

/// 截屏错误
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CaptureError {
    /// 宿主不支持异步拷贝（快速路径不可用）
    #[error("宿主不支持异步截屏")]
    Unsupported,

    /// 异步拷贝在限定时间内没有完成
    #[error("异步截屏超时（超过 {timeout_ms} ms）")]
    Timeout { timeout_ms: u64 },

    /// 异步拷贝执行失败
    #[error("异步截屏失败: {0}")]
    CopyFailed(String),

    /// 同步兜底渲染失败
    ///
    /// 兜底路径必须对任何存活的表面成功，这里失败说明宿主状态已经
    /// 不可用，属于硬错误。
    #[error("兜底截屏失败: {0}")]
    FallbackFailed(String),
}

/// reveal-runtime 统一错误类型
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RevealError {
    /// 缓动曲线控制点越界（x 必须落在 [0, 1]）
    #[error("缓动曲线控制点 {axis} = {value} 越界，必须落在 [0, 1]")]
    InvalidCurvePoint { axis: &'static str, value: f32 },

    /// 过渡时长无效（必须大于 0 毫秒）
    #[error("过渡时长必须大于 0 毫秒")]
    InvalidDuration,

    /// 找不到可用的窗口或根容器，没有可以播放动画的目标
    #[error("找不到可用的窗口或根容器")]
    MissingRoot,

    /// 截屏错误（只有兜底路径失败会走到这里）
    #[error("截屏错误: {0}")]
    Capture(#[from] CaptureError),
}

/// Result 类型别名
pub type RevealResult<T> = Result<T, RevealError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_error_display() {
        let err = CaptureError::Timeout { timeout_ms: 1000 };
        assert!(err.to_string().contains("1000"));
    }

    #[test]
    fn test_capture_error_into_reveal_error() {
        let err: RevealError = CaptureError::FallbackFailed("boom".to_string()).into();
        assert!(matches!(err, RevealError::Capture(_)));
    }

    #[test]
    fn test_invalid_curve_point_display() {
        let err = RevealError::InvalidCurvePoint {
            axis: "x0",
            value: 1.5,
        };
        assert!(err.to_string().contains("x0"));
    }
}
