use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::switcher::{RecentTasksLoader, SharedSwitchManager, SharedTasksLoader};
use crate::AnchorEdge;

#[derive(Default)]
struct CountingManager {
    calls: usize,
}

impl SwitchManager for CountingManager {
    fn open_slide_layout(&mut self, _from_fling: bool) {
        self.calls += 1;
    }
    fn slide_layout(&mut self, _delta_px: f32) {
        self.calls += 1;
    }
    fn finish_slide_layout(&mut self) {
        self.calls += 1;
    }
    fn show_hidden(&mut self) {
        self.calls += 1;
    }
    fn hide_hidden(&mut self) {
        self.calls += 1;
    }
    fn clear_tasks(&mut self) {
        self.calls += 1;
    }
}

#[derive(Default)]
struct NullLoader;

impl RecentTasksLoader for NullLoader {
    fn cancel_loading_tasks(&mut self) {}
    fn set_switch_manager(&mut self, _manager: SharedSwitchManager) {}
    fn preload_tasks(&mut self) {}
}

struct Service {
    manager: Rc<RefCell<CountingManager>>,
    loader: Rc<RefCell<NullLoader>>,
}

impl Service {
    fn new() -> Self {
        Self {
            manager: Rc::new(RefCell::new(CountingManager::default())),
            loader: Rc::new(RefCell::new(NullLoader)),
        }
    }
}

impl SwitchService for Service {
    fn recents_manager(&self) -> Option<SharedSwitchManager> {
        Some(self.manager.clone() as SharedSwitchManager)
    }

    fn task_loader(&self) -> SharedTasksLoader {
        self.loader.clone()
    }
}

fn swipe(listener: &mut OverlayTouchListener<Service>, view: &mut bool, from: f32, to: f32) {
    listener.on_touch(view, MotionEvent::down(0, from, 400.0));
    listener.on_touch(view, MotionEvent::moved(300, to, 400.0));
    listener.on_touch(view, MotionEvent::up(600, to, 400.0));
}

#[test]
fn inactive_listener_consumes_without_calls() {
    let mut listener = OverlayTouchListener::new(OverlayTouchConfig::default(), Service::new());
    let mut pressed = false;

    assert!(listener.on_touch(&mut pressed, MotionEvent::down(0, 300.0, 400.0)));
    assert!(!pressed);
    swipe(&mut listener, &mut pressed, 300.0, 200.0);

    assert!(!listener.is_swipe_active());
    assert_eq!(listener.service().manager.borrow().calls, 0);
}

#[test]
fn down_marks_view_pressed_until_move() {
    let mut listener = OverlayTouchListener::new(OverlayTouchConfig::default(), Service::new());
    listener.set_swipe_active();
    let mut pressed = false;

    listener.on_touch(&mut pressed, MotionEvent::down(0, 300.0, 400.0));
    assert!(pressed);
    listener.on_touch(&mut pressed, MotionEvent::moved(10, 299.0, 400.0));
    assert!(!pressed);
}

#[test]
fn stray_release_unpresses_view() {
    let mut listener = OverlayTouchListener::new(OverlayTouchConfig::default(), Service::new());
    listener.set_swipe_active();

    let mut pressed = true;
    listener.on_touch(&mut pressed, MotionEvent::up(0, 300.0, 400.0));
    assert!(!pressed);

    pressed = true;
    listener.on_touch(&mut pressed, MotionEvent::cancel(10, 300.0, 400.0));
    assert!(!pressed);
    assert_eq!(listener.service().manager.borrow().calls, 0);
}

#[test]
fn config_change_switches_anchor_for_next_gesture() {
    let mut listener = OverlayTouchListener::new(OverlayTouchConfig::default(), Service::new());
    listener.set_swipe_active();
    let mut pressed = false;

    listener.set_config(OverlayTouchConfig {
        location: 1,
        ..OverlayTouchConfig::default()
    });
    assert_eq!(listener.config().anchor_edge(), AnchorEdge::Right);

    // clear_tasks on down, then show_hidden, slide_layout and finish_slide_layout.
    swipe(&mut listener, &mut pressed, 100.0, 200.0);
    assert_eq!(listener.service().manager.borrow().calls, 4);
}
