use core::cell::RefCell;
use std::rc::Rc;

/// Panel manager owning the recents overlay and its animations.
pub trait SwitchManager {
    fn open_slide_layout(&mut self, from_fling: bool);
    /// `delta_px` is the horizontal distance from the gesture origin,
    /// positive when the pointer moved left.
    fn slide_layout(&mut self, delta_px: f32);
    fn finish_slide_layout(&mut self);
    fn show_hidden(&mut self);
    fn hide_hidden(&mut self);
    fn clear_tasks(&mut self);
}

pub type SharedSwitchManager = Rc<RefCell<dyn SwitchManager>>;

pub trait RecentTasksLoader {
    fn cancel_loading_tasks(&mut self);
    fn set_switch_manager(&mut self, manager: SharedSwitchManager);
    fn preload_tasks(&mut self);
}

pub type SharedTasksLoader = Rc<RefCell<dyn RecentTasksLoader>>;

/// Locates the switcher collaborators. The manager only exists while the
/// switcher service is running, so it is looked up per call.
pub trait SwitchService {
    fn recents_manager(&self) -> Option<SharedSwitchManager>;
    fn task_loader(&self) -> SharedTasksLoader;
}

/// The view that receives the touches; only its pressed state is driven.
pub trait PressTarget {
    fn set_pressed(&mut self, pressed: bool);
}

impl PressTarget for bool {
    fn set_pressed(&mut self, pressed: bool) {
        *self = pressed;
    }
}
