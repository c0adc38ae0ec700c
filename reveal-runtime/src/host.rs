//! # Host 模块
//!
//! 引擎消费的宿主能力接口。
//!
//! 引擎不认识具体的视图体系，只通过这里的窄接口跟宿主打交道：
//! 截屏来源（窗口）、遮罩插拔（根容器）、UI 线程调度与整树重建
//! （调度器）。宿主在每次重建根容器后还需要调用
//! [`crate::registry::RootRegistry::publish`] 通告新的窗口/容器对。

use std::sync::Arc;

use crate::error::CaptureError;
use crate::overlay::{Circle, OverlayLayer, ZOrder};
use crate::pixmap::Pixmap;

/// 快速路径截屏任务
///
/// 由宿主打包、在引擎的辅助线程上执行；任务只产出位图，不允许
/// 触碰动画器或注册表状态。
pub type SnapshotJob = Box<dyn FnOnce() -> Result<Pixmap, CaptureError> + Send + 'static>;

/// 顶层窗口：截屏来源
///
/// 对应宿主的 Window/Surface。`Send + Sync` 是为了让弱引用能放进
/// 进程级注册表、让快速路径任务能跨线程携带窗口句柄。
pub trait HostWindow: Send + Sync {
    /// 快速路径：异步拷贝真实渲染结果（能带上阴影等合成效果）
    ///
    /// # 返回
    /// - `Some(job)`: 可在辅助线程执行的拷贝任务
    /// - `None`: 宿主不支持，引擎直接走兜底路径
    fn async_snapshot_job(&self) -> Option<SnapshotJob>;

    /// 兜底路径：在调用线程上强制渲染到内存缓冲
    ///
    /// 对任何存活的表面必须成功；失败会作为硬错误向触发方传播。
    fn render_sync(&self) -> Result<Pixmap, CaptureError>;
}

/// 根容器：宿主的顶层可绘制树
///
/// 宿主可能在过渡进行中销毁并重建它，所以引擎只持弱引用。
pub trait RootContainer: Send + Sync {
    /// 容器尺寸（宽, 高），像素
    fn size(&self) -> (u32, u32);

    /// 把遮罩层插入指定层级
    fn insert_overlay(&self, layer: Arc<OverlayLayer>, z: ZOrder);

    /// 移除遮罩层（按实例识别）
    fn remove_overlay(&self, layer: &OverlayLayer);

    /// 设置内容裁剪圆
    ///
    /// 扩张变体用它把新内容限制在不断长大的圆内；`None` 恢复完整
    /// 可见。收缩变体不触碰内容裁剪。
    fn set_content_clip(&self, clip: Option<Circle>);
}

/// UI 线程调度与整树重建
///
/// `post` 的任务必须晚于先前请求的重建执行——继续动画的闭包要能
/// 看到重建后的根容器（重建本身在宿主侧是异步的）。
pub trait UiScheduler {
    /// 把任务排到 UI 线程队列尾部
    fn post(&self, task: Box<dyn FnOnce()>);

    /// 请求宿主销毁并重建根容器
    ///
    /// 宿主完成重建后通过 [`crate::registry::RootRegistry::publish`]
    /// 通告新的窗口/容器对。
    fn request_recreate(&self);
}
