//! # Easing 模块
//!
//! 三次贝塞尔缓动曲线，用于把动画的时间进度映射为位移进度。
//!
//! 曲线固定端点 (0,0) 和 (1,1)，由两个控制点决定形状。贝塞尔参数 `u`
//! 并不等于时间进度，只有 `x(u)` 与时间挂钩，所以求值时要先用
//! Newton-Raphson 反解 `x(u) = t` 再取 `y(u)`。

use serde::{Deserialize, Serialize};

use crate::error::{RevealError, RevealResult};

/// Newton-Raphson 最大迭代次数
const NEWTON_ITERATIONS: usize = 13;

/// Newton-Raphson 收敛容差
const NEWTON_TOLERANCE: f32 = 1e-3;

/// 导数下限，防止退化控制点导致除零发散
const MIN_DERIVATIVE: f32 = 1e-6;

/// 三次贝塞尔缓动曲线
///
/// 构造时校验控制点 x 分量落在 [0, 1]（否则曲线在时间轴上不可反解），
/// 之后无状态，可以 `Copy` 并在多次过渡间复用。
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CubicBezier {
    /// 第一控制点
    p0: (f32, f32),
    /// 第二控制点
    p1: (f32, f32),
    // 多项式系数（构造时展开，x/y 轴各一组）
    ax: f32,
    bx: f32,
    cx: f32,
    ay: f32,
    by: f32,
    cy: f32,
}

impl CubicBezier {
    /// 创建缓动曲线
    ///
    /// # 参数
    /// - `(x0, y0)`: 第一控制点，`x0` 必须落在 [0, 1]
    /// - `(x1, y1)`: 第二控制点，`x1` 必须落在 [0, 1]
    ///
    /// # 返回
    /// - `Err(RevealError::InvalidCurvePoint)`: 控制点 x 越界
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> RevealResult<Self> {
        if !(0.0..=1.0).contains(&x0) {
            return Err(RevealError::InvalidCurvePoint {
                axis: "x0",
                value: x0,
            });
        }
        if !(0.0..=1.0).contains(&x1) {
            return Err(RevealError::InvalidCurvePoint {
                axis: "x1",
                value: x1,
            });
        }
        Ok(Self::new_unchecked(x0, y0, x1, y1))
    }

    /// 内部构造（调用方保证控制点合法）
    fn new_unchecked(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        // c = 3·p0, b = 3·(p1 - p0) - c, a = 1 - c - b
        let cx = 3.0 * x0;
        let bx = 3.0 * (x1 - x0) - cx;
        let ax = 1.0 - cx - bx;
        let cy = 3.0 * y0;
        let by = 3.0 * (y1 - y0) - cy;
        let ay = 1.0 - cy - by;

        Self {
            p0: (x0, y0),
            p1: (x1, y1),
            ax,
            bx,
            cx,
            ay,
            by,
            cy,
        }
    }

    // ========== 预设曲线 ==========

    /// 标准缓动（默认值）
    ///
    /// 控制点 (0.455, 0.03) → (0.515, 0.955)，两头慢中间快。
    pub fn standard() -> Self {
        Self::new_unchecked(0.455, 0.03, 0.515, 0.955)
    }

    /// 线性（匀速）
    pub fn linear() -> Self {
        Self::new_unchecked(0.0, 0.0, 1.0, 1.0)
    }

    /// CSS `ease`
    pub fn ease() -> Self {
        Self::new_unchecked(0.25, 0.1, 0.25, 1.0)
    }

    /// CSS `ease-in`
    pub fn ease_in() -> Self {
        Self::new_unchecked(0.42, 0.0, 1.0, 1.0)
    }

    /// CSS `ease-out`
    pub fn ease_out() -> Self {
        Self::new_unchecked(0.0, 0.0, 0.58, 1.0)
    }

    /// CSS `ease-in-out`
    pub fn ease_in_out() -> Self {
        Self::new_unchecked(0.42, 0.0, 0.58, 1.0)
    }

    // ========== 求值 ==========

    /// 计算缓动进度
    ///
    /// # 参数
    /// - `t`: 时间进度 (0.0 - 1.0)，越界会被截断
    ///
    /// # 返回
    /// - 缓动后的进度值，对常规曲线近似落在 [0, 1]（y 控制点越界的
    ///   曲线允许过冲，不做截断）
    pub fn progress(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        self.sample_y(self.solve_x(t))
    }

    /// 获取两个控制点 `((x0, y0), (x1, y1))`
    pub fn control_points(&self) -> ((f32, f32), (f32, f32)) {
        (self.p0, self.p1)
    }

    /// 反解 `x(u) = t`
    ///
    /// 从 `u = t` 出发迭代，误差小于容差时提前收敛。导数被钳制到
    /// 最小幅值，退化控制点（导数趋零）下迭代不会发散为除零。
    fn solve_x(&self, t: f32) -> f32 {
        let mut u = t;
        for _ in 0..NEWTON_ITERATIONS {
            let z = self.sample_x(u) - t;
            if z.abs() < NEWTON_TOLERANCE {
                break;
            }
            let mut d = self.sample_x_derivative(u);
            if d.abs() < MIN_DERIVATIVE {
                d = MIN_DERIVATIVE.copysign(if d == 0.0 { 1.0 } else { d });
            }
            u -= z / d;
        }
        u
    }

    fn sample_x(&self, u: f32) -> f32 {
        u * (self.cx + u * (self.bx + u * self.ax))
    }

    fn sample_y(&self, u: f32) -> f32 {
        u * (self.cy + u * (self.by + u * self.ay))
    }

    fn sample_x_derivative(&self, u: f32) -> f32 {
        self.cx + u * (2.0 * self.bx + 3.0 * self.ax * u)
    }
}

impl Default for CubicBezier {
    fn default() -> Self {
        Self::standard()
    }
}

/// 缓动曲线的可序列化参数形式
///
/// 宿主把过渡配置写进配置文件时使用，反序列化后通过 [`CurveParams::to_curve`]
/// 重新校验并还原为 [`CubicBezier`]。
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurveParams {
    pub x0: f32,
    pub y0: f32,
    pub x1: f32,
    pub y1: f32,
}

impl CurveParams {
    /// 还原为缓动曲线（重新校验控制点）
    pub fn to_curve(self) -> RevealResult<CubicBezier> {
        CubicBezier::new(self.x0, self.y0, self.x1, self.y1)
    }
}

impl Default for CurveParams {
    fn default() -> Self {
        CubicBezier::standard().into()
    }
}

impl From<CubicBezier> for CurveParams {
    fn from(curve: CubicBezier) -> Self {
        let ((x0, y0), (x1, y1)) = curve.control_points();
        Self { x0, y0, x1, y1 }
    }
}
