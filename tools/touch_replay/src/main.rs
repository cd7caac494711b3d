use std::{
    cell::RefCell,
    fs::File,
    io::{BufRead, BufReader},
    path::{Path, PathBuf},
    process,
    rc::Rc,
};

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use overlay_touch::{
    load_config, MotionAction, MotionEvent, OverlayTouchConfig, OverlayTouchListener,
    RecentTasksLoader, SharedSwitchManager, SharedTasksLoader, SwitchManager, SwitchService,
};

#[derive(Debug, Parser)]
#[command(name = "touch_replay")]
#[command(about = "Replay a motion trace through the overlay touch listener")]
struct Cli {
    /// CSV trace with `motion,<t_ms>,<action>,<raw_x>,<raw_y>` lines.
    trace: PathBuf,
    #[arg(long)]
    config: Option<PathBuf>,
    /// File with one expected call name per line.
    #[arg(long)]
    expect: Option<PathBuf>,
    /// Leave the listener disarmed, as before the overlay is shown.
    #[arg(long)]
    swipe_inactive: bool,
}

#[derive(Clone, Copy, Debug, PartialEq)]
enum ReplayCall {
    OpenSlideLayout { from_fling: bool },
    SlideLayout { delta_px: f32 },
    FinishSlideLayout,
    ShowHidden,
    HideHidden,
    ClearTasks,
    CancelLoadingTasks,
    SetSwitchManager,
    PreloadTasks,
}

impl ReplayCall {
    fn label(self) -> &'static str {
        match self {
            Self::OpenSlideLayout { .. } => "open_slide_layout",
            Self::SlideLayout { .. } => "slide_layout",
            Self::FinishSlideLayout => "finish_slide_layout",
            Self::ShowHidden => "show_hidden",
            Self::HideHidden => "hide_hidden",
            Self::ClearTasks => "clear_tasks",
            Self::CancelLoadingTasks => "cancel_loading_tasks",
            Self::SetSwitchManager => "set_switch_manager",
            Self::PreloadTasks => "preload_tasks",
        }
    }

    fn argument(self) -> Option<String> {
        match self {
            Self::OpenSlideLayout { from_fling } => Some(from_fling.to_string()),
            Self::SlideLayout { delta_px } => Some(format!("{delta_px:.1}")),
            _ => None,
        }
    }
}

type CallLog = Rc<RefCell<Vec<ReplayCall>>>;

struct ReplayManager {
    calls: CallLog,
}

impl SwitchManager for ReplayManager {
    fn open_slide_layout(&mut self, from_fling: bool) {
        self.calls
            .borrow_mut()
            .push(ReplayCall::OpenSlideLayout { from_fling });
    }

    fn slide_layout(&mut self, delta_px: f32) {
        self.calls
            .borrow_mut()
            .push(ReplayCall::SlideLayout { delta_px });
    }

    fn finish_slide_layout(&mut self) {
        self.calls.borrow_mut().push(ReplayCall::FinishSlideLayout);
    }

    fn show_hidden(&mut self) {
        self.calls.borrow_mut().push(ReplayCall::ShowHidden);
    }

    fn hide_hidden(&mut self) {
        self.calls.borrow_mut().push(ReplayCall::HideHidden);
    }

    fn clear_tasks(&mut self) {
        self.calls.borrow_mut().push(ReplayCall::ClearTasks);
    }
}

struct ReplayLoader {
    calls: CallLog,
}

impl RecentTasksLoader for ReplayLoader {
    fn cancel_loading_tasks(&mut self) {
        self.calls.borrow_mut().push(ReplayCall::CancelLoadingTasks);
    }

    fn set_switch_manager(&mut self, _manager: SharedSwitchManager) {
        self.calls.borrow_mut().push(ReplayCall::SetSwitchManager);
    }

    fn preload_tasks(&mut self) {
        self.calls.borrow_mut().push(ReplayCall::PreloadTasks);
    }
}

struct ReplayService {
    manager: Rc<RefCell<ReplayManager>>,
    loader: Rc<RefCell<ReplayLoader>>,
}

impl SwitchService for ReplayService {
    fn recents_manager(&self) -> Option<SharedSwitchManager> {
        Some(self.manager.clone() as SharedSwitchManager)
    }

    fn task_loader(&self) -> SharedTasksLoader {
        self.loader.clone()
    }
}

fn main() {
    env_logger::init();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => OverlayTouchConfig::default(),
    };
    let events = parse_trace(&cli.trace)?;
    log::info!(
        "replaying {} events from {} anchor={:?}",
        events.len(),
        cli.trace.display(),
        config.anchor_edge()
    );

    let calls: CallLog = Rc::default();
    let service = ReplayService {
        manager: Rc::new(RefCell::new(ReplayManager {
            calls: calls.clone(),
        })),
        loader: Rc::new(RefCell::new(ReplayLoader {
            calls: calls.clone(),
        })),
    };
    let mut listener = OverlayTouchListener::new(config, service);
    if !cli.swipe_inactive {
        listener.set_swipe_active();
    }

    let mut pressed = false;
    let mut replayed: Vec<ReplayCall> = Vec::new();
    println!("call,ms,name,arg");
    for event in &events {
        listener.on_touch(&mut pressed, *event);
        for call in calls.borrow_mut().drain(..) {
            println!(
                "call,{},{},{}",
                event.t_ms,
                call.label(),
                call.argument().unwrap_or_default()
            );
            replayed.push(call);
        }
    }

    if let Some(expect_path) = &cli.expect {
        let expected = parse_expected_calls(expect_path)?;
        let actual: Vec<&'static str> = replayed.iter().map(|c| c.label()).collect();
        if actual != expected {
            eprintln!("expected calls: {}", expected.join(","));
            eprintln!("actual calls:   {}", actual.join(","));
            bail!("call sequence mismatch");
        }
    }

    Ok(())
}

fn parse_trace(path: &Path) -> Result<Vec<MotionEvent>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut out = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line =
            line_result.with_context(|| format!("failed to read {}:{}", path.display(), line_no))?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed == "motion,ms,action,x,y" {
            continue;
        }

        let parts: Vec<&str> = trimmed.split(',').map(str::trim).collect();
        if parts.len() != 5 || parts[0] != "motion" {
            bail!(
                "{}:{} invalid trace line, expected motion,<ms>,<action>,<x>,<y>",
                path.display(),
                line_no
            );
        }

        let action = parse_action(parts[2])
            .ok_or_else(|| anyhow!("{}:{} invalid action '{}'", path.display(), line_no, parts[2]))?;
        let t_ms = parts[1]
            .parse::<u64>()
            .with_context(|| format!("{}:{} invalid ms '{}'", path.display(), line_no, parts[1]))?;
        let raw_x = parts[3]
            .parse::<f32>()
            .with_context(|| format!("{}:{} invalid x '{}'", path.display(), line_no, parts[3]))?;
        let raw_y = parts[4]
            .parse::<f32>()
            .with_context(|| format!("{}:{} invalid y '{}'", path.display(), line_no, parts[4]))?;

        out.push(MotionEvent::new(action, t_ms, raw_x, raw_y));
    }

    Ok(out)
}

fn parse_action(raw: &str) -> Option<MotionAction> {
    match raw.to_ascii_lowercase().as_str() {
        "down" => Some(MotionAction::Down),
        "move" => Some(MotionAction::Move),
        "up" => Some(MotionAction::Up),
        "cancel" => Some(MotionAction::Cancel),
        _ => None,
    }
}

fn parse_expected_calls(path: &Path) -> Result<Vec<&'static str>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);

    let mut calls = Vec::new();
    for (line_no, line_result) in reader.lines().enumerate() {
        let line_no = line_no + 1;
        let line =
            line_result.with_context(|| format!("failed to read {}:{}", path.display(), line_no))?;
        let token = line.trim();
        if token.is_empty() || token.starts_with('#') {
            continue;
        }
        let normalized = normalize_call(token).ok_or_else(|| {
            anyhow!(
                "{}:{} invalid expected call: {}",
                path.display(),
                line_no,
                token
            )
        })?;
        calls.push(normalized);
    }

    Ok(calls)
}

fn normalize_call(name: &str) -> Option<&'static str> {
    match name.to_ascii_lowercase().as_str() {
        "open_slide_layout" => Some("open_slide_layout"),
        "slide_layout" => Some("slide_layout"),
        "finish_slide_layout" => Some("finish_slide_layout"),
        "show_hidden" => Some("show_hidden"),
        "hide_hidden" => Some("hide_hidden"),
        "clear_tasks" => Some("clear_tasks"),
        "cancel_loading_tasks" => Some("cancel_loading_tasks"),
        "set_switch_manager" => Some("set_switch_manager"),
        "preload_tasks" => Some("preload_tasks"),
        _ => None,
    }
}
