//! 圆形揭示过渡的无头演示。
//!
//! 在内存里的软件表面上跑一次完整的日夜切换或整套主题切换，按帧
//! 打日志，可选把每帧导出成 PNG。

use std::path::PathBuf;
use std::rc::Rc;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{debug, info};

use host_headless::{
    AppConfig, DAY_BACKGROUND, FastPathMode, HeadlessApp, NIGHT_BACKGROUND, dump_frame,
};
use reveal_runtime::{RecreateSwitch, RedrawSwitch, SwitchCallbacks, ThemeTag};

/// 命令行参数
#[derive(Parser, Debug)]
#[command(name = "host-headless", about = "圆形揭示过渡的无头演示宿主")]
struct Args {
    /// 配置文件路径
    #[arg(long, default_value = "config.json")]
    config: PathBuf,

    /// 演示模式
    #[arg(long, value_enum, default_value = "day-night")]
    mode: DemoMode,

    /// 目标主题名（theme 模式）
    #[arg(long)]
    theme: Option<String>,

    /// 触点 x 坐标（默认表面中心）
    #[arg(long)]
    x: Option<f32>,

    /// 触点 y 坐标（默认表面中心）
    #[arg(long)]
    y: Option<f32>,

    /// 模拟帧率
    #[arg(long, default_value_t = 60.0)]
    fps: f32,

    /// 禁用截屏快速路径（演示兜底分支）
    #[arg(long)]
    no_fast_path: bool,

    /// 把每帧画面导出成 PNG 的目录
    #[arg(long)]
    dump_frames: Option<PathBuf>,
}

/// 演示模式
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum DemoMode {
    /// 日夜模式切换（纯重绘）
    DayNight,
    /// 整套主题切换（整树重建）
    Theme,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    let args = Args::parse();
    let config = AppConfig::load(&args.config);
    config.validate().context("配置无效")?;

    let app = HeadlessApp::new(&config);
    if args.no_fast_path {
        app.window().set_fast_path(FastPathMode::Unsupported);
    }

    let x = args.x.unwrap_or(config.window.width as f32 / 2.0);
    let y = args.y.unwrap_or(config.window.height as f32 / 2.0);

    match args.mode {
        DemoMode::DayNight => run_day_night(&app, &config, &args, x, y),
        DemoMode::Theme => run_theme(&app, &config, &args, x, y),
    }
}

/// 日夜模式演示：状态变更只是给根容器重新着色
fn run_day_night(
    app: &HeadlessApp,
    config: &AppConfig,
    args: &Args,
    x: f32,
    y: f32,
) -> Result<()> {
    let root = app.root();
    root.set_content_color(DAY_BACKGROUND);

    let target = root.clone();
    let switch = RedrawSwitch::builder(app.window(), root, move |night| {
        target.set_content_color(if night {
            NIGHT_BACKGROUND
        } else {
            DAY_BACKGROUND
        });
    })
    .spec(&config.transition)?
    .on_trigger(|| info!("点击透传：日夜模式"))
    .engage_callbacks(SwitchCallbacks {
        on_start: Some(Rc::new(|| info!("夜间模式过渡开始"))),
        on_end: Some(Rc::new(|| info!("夜间模式过渡结束"))),
        on_cancel: None,
    })
    .build()?;

    switch.trigger_at(x, y)?;
    run_frames(app, args, |dt| switch.update(dt))
}

/// 主题切换演示：触发整树重建后再播放揭示
fn run_theme(app: &HeadlessApp, config: &AppConfig, args: &Args, x: f32, y: f32) -> Result<()> {
    let name = args.theme.clone().unwrap_or_else(|| "blue".to_string());
    let theme = config
        .theme_by_name(&name)
        .with_context(|| format!("找不到主题: {name}"))?;

    let switch = RecreateSwitch::builder(
        app.window(),
        app.root(),
        app.queue(),
        ThemeTag(theme.tag),
    )
    .spec(&config.transition)?
    .on_trigger(|| info!("点击透传：主题切换"))
    .callbacks(SwitchCallbacks {
        on_start: Some(Rc::new(|| info!("主题过渡开始"))),
        on_end: Some(Rc::new(|| info!("主题过渡结束"))),
        on_cancel: None,
    })
    .build()?;

    info!(theme = %theme.name, "切换到主题");
    switch.trigger_at(x, y)?;
    run_frames(app, args, |dt| switch.update(dt))
}

/// 帧循环：排空队列 → 推进动画 → 渲染/导出，直到动画结束
fn run_frames(app: &HeadlessApp, args: &Args, update: impl Fn(f32) -> bool) -> Result<()> {
    let dt = 1.0 / args.fps.max(1.0);
    let mut frame = 0u32;
    let mut saw_animation = false;

    loop {
        app.pump();
        let active = update(dt);
        saw_animation |= active;

        let pixmap = app.render();
        if let Some(dir) = &args.dump_frames {
            let path = dump_frame(dir, frame, &pixmap)?;
            debug!(path = %path.display(), "帧已导出");
        }

        frame += 1;
        if !active && (saw_animation || frame >= 3) {
            break;
        }
        anyhow::ensure!(frame < 10_000, "动画未在预期帧数内结束");
    }

    info!(frames = frame, "演示结束");
    Ok(())
}
