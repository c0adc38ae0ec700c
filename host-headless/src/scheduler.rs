//! # Scheduler 模块
//!
//! 确定性的 UI 线程任务队列。
//!
//! 重建请求和普通任务进同一个 FIFO，排空时按入队顺序执行——
//! 先请求的重建一定先于后排的任务完成，这正是引擎对
//! [`UiScheduler`] 要求的顺序保证。

use std::cell::RefCell;
use std::collections::VecDeque;

use reveal_runtime::UiScheduler;
use tracing::debug;

/// 队列里的一项工作
enum QueuedWork {
    /// 普通任务
    Task(Box<dyn FnOnce()>),
    /// 整树重建标记（由宿主应用在排空时执行）
    Recreate,
}

/// 一次排空的统计
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PumpReport {
    /// 执行的普通任务数
    pub tasks: usize,
    /// 处理的重建请求数
    pub recreates: usize,
}

/// UI 任务队列
#[derive(Default)]
pub struct UiQueue {
    queue: RefCell<VecDeque<QueuedWork>>,
}

impl UiQueue {
    /// 创建空队列
    pub fn new() -> Self {
        Self::default()
    }

    /// 队列长度
    pub fn len(&self) -> usize {
        self.queue.borrow().len()
    }

    /// 队列是否为空
    pub fn is_empty(&self) -> bool {
        self.queue.borrow().is_empty()
    }

    /// 按入队顺序执行所有工作
    ///
    /// `on_recreate` 对应宿主的「销毁并重建根容器」；任务执行中再
    /// 入队的工作也会在本次排空里继续处理。
    pub fn drain(&self, on_recreate: &mut dyn FnMut()) -> PumpReport {
        let mut report = PumpReport::default();
        loop {
            // 先弹出再执行，任务里再入队不会撞上借用
            let work = self.queue.borrow_mut().pop_front();
            match work {
                Some(QueuedWork::Task(task)) => {
                    task();
                    report.tasks += 1;
                }
                Some(QueuedWork::Recreate) => {
                    on_recreate();
                    report.recreates += 1;
                }
                None => break,
            }
        }
        report
    }
}

impl UiScheduler for UiQueue {
    fn post(&self, task: Box<dyn FnOnce()>) {
        self.queue.borrow_mut().push_back(QueuedWork::Task(task));
    }

    fn request_recreate(&self) {
        debug!("收到整树重建请求");
        self.queue.borrow_mut().push_back(QueuedWork::Recreate);
    }
}

impl std::fmt::Debug for UiQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UiQueue").field("len", &self.len()).finish()
    }
}
