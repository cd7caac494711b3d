pub mod config;
mod core;
pub mod fling;
pub mod types;

pub use self::core::{GestureEngine, GestureOutput};

use crate::switcher::{PressTarget, SwitchManager, SwitchService};

use self::config::OverlayTouchConfig;
use self::types::{MotionEvent, SwitchCommand};

/// Touch listener attached to the overlay handle view.
///
/// Events are dropped until [`OverlayTouchListener::set_swipe_active`] is
/// called, and whenever no recents manager is running. Every event is
/// reported as consumed.
pub struct OverlayTouchListener<S> {
    engine: GestureEngine,
    config: OverlayTouchConfig,
    service: S,
    swipe_active: bool,
}

impl<S: SwitchService> OverlayTouchListener<S> {
    pub fn new(config: OverlayTouchConfig, service: S) -> Self {
        Self {
            engine: GestureEngine::new(&config),
            config,
            service,
            swipe_active: false,
        }
    }

    pub fn set_swipe_active(&mut self) {
        self.swipe_active = true;
    }

    pub fn is_swipe_active(&self) -> bool {
        self.swipe_active
    }

    /// Takes effect for the next gesture; one in progress keeps its anchor.
    pub fn set_config(&mut self, config: OverlayTouchConfig) {
        self.engine.reconfigure(&config);
        self.config = config;
    }

    pub fn config(&self) -> &OverlayTouchConfig {
        &self.config
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub fn on_touch(&mut self, view: &mut dyn PressTarget, event: MotionEvent) -> bool {
        if !self.swipe_active {
            return true;
        }
        if self.service.recents_manager().is_none() {
            return true;
        }
        log::debug!(
            "touch {:?} {}:{} state={:?} fling_eligible={}",
            event.action,
            event.raw_x as i32,
            event.raw_y as i32,
            self.engine.state(),
            self.engine.fling_eligible()
        );

        let output = self.engine.handle(event, self.config.anchor_edge());
        for command in output.iter() {
            self.dispatch(view, command);
        }
        true
    }

    fn dispatch(&self, view: &mut dyn PressTarget, command: SwitchCommand) {
        match command {
            SwitchCommand::SetPressed(pressed) => view.set_pressed(pressed),
            SwitchCommand::ClearTasks => self.with_manager(|m| m.clear_tasks()),
            SwitchCommand::ReloadTasks => self.reload_tasks(),
            SwitchCommand::ShowHidden => self.with_manager(|m| m.show_hidden()),
            SwitchCommand::HideHidden => self.with_manager(|m| m.hide_hidden()),
            SwitchCommand::SlideLayout { delta_px } => {
                self.with_manager(|m| m.slide_layout(delta_px))
            }
            SwitchCommand::FinishSlideLayout => self.with_manager(|m| m.finish_slide_layout()),
            SwitchCommand::OpenSlideLayout { from_fling } => {
                self.with_manager(|m| m.open_slide_layout(from_fling))
            }
        }
    }

    fn with_manager(&self, f: impl FnOnce(&mut dyn SwitchManager)) {
        if let Some(manager) = self.service.recents_manager() {
            f(&mut *manager.borrow_mut());
        }
    }

    fn reload_tasks(&self) {
        let Some(manager) = self.service.recents_manager() else {
            return;
        };
        let loader = self.service.task_loader();
        let mut loader = loader.borrow_mut();
        loader.cancel_loading_tasks();
        loader.set_switch_manager(manager);
        loader.preload_tasks();
    }
}

#[cfg(test)]
mod tests;
