//! # Geometry 模块
//!
//! 揭示圆的几何计算：触点坐标与全覆盖半径。

/// 触点坐标（表面坐标系）
///
/// 每次按下覆写一次，下一次触发消费当前值；不保留历史。
/// 坐标由宿主换算到表面坐标系后传入（悬浮窗等场景下屏幕绝对坐标
/// 并不可靠，原始事件坐标需要叠加表面在窗口内的偏移）。
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TouchOrigin {
    pub x: f32,
    pub y: f32,
}

impl TouchOrigin {
    /// 创建触点坐标
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// 计算从触点完整覆盖矩形 `(0,0)-(width,height)` 所需的最小圆半径
///
/// 取触点到四个角的欧氏距离的最大值。揭示圆在极限半径处必须盖住
/// 整个表面，否则收缩/扩张的边缘会露出未遮挡的像素。
pub fn cover_radius(origin: TouchOrigin, width: f32, height: f32) -> f32 {
    let top_left = origin.x.hypot(origin.y);
    let top_right = (width - origin.x).hypot(origin.y);
    let bottom_left = origin.x.hypot(height - origin.y);
    let bottom_right = (width - origin.x).hypot(height - origin.y);

    top_left
        .max(top_right)
        .max(bottom_left)
        .max(bottom_right)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_corner_origins() {
        let expected = 100.0_f32.hypot(200.0);
        // 四个角上的触点都对着同一条对角线
        assert_eq!(cover_radius(TouchOrigin::new(0.0, 0.0), 100.0, 200.0), expected);
        assert_eq!(
            cover_radius(TouchOrigin::new(100.0, 0.0), 100.0, 200.0),
            expected
        );
        assert_eq!(
            cover_radius(TouchOrigin::new(0.0, 200.0), 100.0, 200.0),
            expected
        );
        assert_eq!(
            cover_radius(TouchOrigin::new(100.0, 200.0), 100.0, 200.0),
            expected
        );
    }

    #[test]
    fn test_center_origin() {
        let radius = cover_radius(TouchOrigin::new(50.0, 50.0), 100.0, 100.0);
        assert!((radius - 70.71).abs() < 0.01);
    }

    #[test]
    fn test_off_center_origin_reaches_far_corner() {
        // 触点偏向左上，最远角是右下
        let radius = cover_radius(TouchOrigin::new(10.0, 20.0), 100.0, 200.0);
        assert_eq!(radius, 90.0_f32.hypot(180.0));
    }

    #[test]
    fn test_symmetric_origins() {
        // 对称触点给出对称半径
        let r = cover_radius(TouchOrigin::new(0.0, 0.0), 100.0, 200.0);
        assert_eq!(r, cover_radius(TouchOrigin::new(100.0, 200.0), 100.0, 200.0));
    }
}
