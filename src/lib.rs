pub mod error;
pub mod switcher;
pub mod touch;

pub use error::ConfigError;
pub use switcher::{
    PressTarget, RecentTasksLoader, SharedSwitchManager, SharedTasksLoader, SwitchManager,
    SwitchService,
};
pub use touch::config::{load_config, load_config_or_default, parse_config, OverlayTouchConfig};
pub use touch::types::{AnchorEdge, MotionAction, MotionEvent, SwipeDirection, SwitchCommand};
pub use touch::OverlayTouchListener;
