//! # App 模块
//!
//! 把窗口、根容器、任务队列和主题集拼成一个可运行的宿主应用。
//!
//! 引擎请求整树重建时，应用在下一次 [`HeadlessApp::pump`] 里销毁
//! 旧根容器、按待生效主题新建一个、换绑窗口并向注册表通告——
//! 之后才轮到引擎排进来的延续任务，顺序保证由队列的 FIFO 给出。

use std::cell::RefCell;
use std::rc::Rc;
use std::sync::Arc;

use reveal_runtime::{PendingTheme, Pixmap, RootRegistry, ThemeTag};
use tracing::info;

use crate::config::AppConfig;
use crate::palette::Palette;
use crate::scheduler::{PumpReport, UiQueue};
use crate::surface::HeadlessRoot;
use crate::window::{FastPathMode, HeadlessWindow};

/// 无头宿主应用
pub struct HeadlessApp {
    width: u32,
    height: u32,
    window: Arc<HeadlessWindow>,
    root: RefCell<Arc<HeadlessRoot>>,
    queue: Rc<UiQueue>,
    palettes: Vec<Palette>,
    registry: &'static RootRegistry,
    pending: &'static PendingTheme,
}

impl HeadlessApp {
    /// 用进程级注册表/主题槽位创建应用
    pub fn new(config: &AppConfig) -> Self {
        Self::with_shared(config, RootRegistry::global(), PendingTheme::global())
    }

    /// 注入独立的注册表与主题槽位（测试或多实例宿主）
    pub fn with_shared(
        config: &AppConfig,
        registry: &'static RootRegistry,
        pending: &'static PendingTheme,
    ) -> Self {
        let palettes: Vec<Palette> = config.themes.iter().map(Palette::from).collect();
        let initial_color = palettes
            .first()
            .map(|palette| palette.background)
            .unwrap_or(crate::palette::DAY_BACKGROUND);

        let (width, height) = (config.window.width, config.window.height);
        let root = Arc::new(HeadlessRoot::new(width, height, initial_color));
        let window = Arc::new(HeadlessWindow::new(&root, FastPathMode::Supported));

        Self {
            width,
            height,
            window,
            root: RefCell::new(root),
            queue: Rc::new(UiQueue::new()),
            palettes,
            registry,
            pending,
        }
    }

    pub fn window(&self) -> Arc<HeadlessWindow> {
        self.window.clone()
    }

    /// 当前根容器
    pub fn root(&self) -> Arc<HeadlessRoot> {
        self.root.borrow().clone()
    }

    pub fn queue(&self) -> Rc<UiQueue> {
        self.queue.clone()
    }

    /// 按标识找主题
    pub fn palette(&self, tag: ThemeTag) -> Option<&Palette> {
        self.palettes.iter().find(|palette| palette.tag == tag)
    }

    /// 按名字找主题
    pub fn palette_by_name(&self, name: &str) -> Option<&Palette> {
        self.palettes.iter().find(|palette| palette.name == name)
    }

    /// 排空 UI 队列（执行重建与引擎的延续任务）
    pub fn pump(&self) -> PumpReport {
        self.queue.clone().drain(&mut || self.recreate_root())
    }

    /// 渲染当前画面
    pub fn render(&self) -> Pixmap {
        self.root.borrow().render()
    }

    /// 销毁并重建根容器
    ///
    /// 新容器应用待生效主题的配色；旧容器随最后一个强引用释放，
    /// 引擎里残留的弱引用就此失效。
    fn recreate_root(&self) {
        let color = self
            .pending
            .current()
            .and_then(|tag| self.palette(tag).map(|palette| palette.background))
            .unwrap_or_else(|| self.root.borrow().content_color());

        let new_root = Arc::new(HeadlessRoot::new(self.width, self.height, color));
        self.window.attach_root(&new_root);
        self.registry.publish(self.window.clone(), new_root.clone());
        *self.root.borrow_mut() = new_root;
        info!(?color, "根容器已重建");
    }
}

impl std::fmt::Debug for HeadlessApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HeadlessApp")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("palettes", &self.palettes.len())
            .field("queue_len", &self.queue.len())
            .finish()
    }
}
