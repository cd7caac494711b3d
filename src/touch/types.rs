#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MotionAction {
    Down,
    Move,
    Up,
    Cancel,
}

/// One pointer sample in raw screen coordinates, as delivered by the platform.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionEvent {
    pub action: MotionAction,
    pub t_ms: u64,
    pub raw_x: f32,
    pub raw_y: f32,
}

impl MotionEvent {
    pub fn new(action: MotionAction, t_ms: u64, raw_x: f32, raw_y: f32) -> Self {
        Self {
            action,
            t_ms,
            raw_x,
            raw_y,
        }
    }

    pub fn down(t_ms: u64, raw_x: f32, raw_y: f32) -> Self {
        Self::new(MotionAction::Down, t_ms, raw_x, raw_y)
    }

    pub fn moved(t_ms: u64, raw_x: f32, raw_y: f32) -> Self {
        Self::new(MotionAction::Move, t_ms, raw_x, raw_y)
    }

    pub fn up(t_ms: u64, raw_x: f32, raw_y: f32) -> Self {
        Self::new(MotionAction::Up, t_ms, raw_x, raw_y)
    }

    pub fn cancel(t_ms: u64, raw_x: f32, raw_y: f32) -> Self {
        Self::new(MotionAction::Cancel, t_ms, raw_x, raw_y)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    /// Direction of a single horizontal step. A step that does not decrease x
    /// counts as rightward.
    pub fn of_step(last_x: f32, x: f32) -> Self {
        if last_x > x {
            Self::Left
        } else {
            Self::Right
        }
    }
}

/// Screen edge the overlay handle is attached to.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum AnchorEdge {
    #[default]
    Left,
    Right,
}

impl AnchorEdge {
    /// Maps the stored `location` setting; 0 selects the left edge.
    pub fn from_location(location: u8) -> Self {
        if location == 0 {
            Self::Left
        } else {
            Self::Right
        }
    }

    /// Step direction that pulls the panel out for this anchor.
    pub fn opening_direction(self) -> SwipeDirection {
        match self {
            Self::Left => SwipeDirection::Left,
            Self::Right => SwipeDirection::Right,
        }
    }
}

/// Collaborator call requested by the gesture engine for one event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SwitchCommand {
    SetPressed(bool),
    ClearTasks,
    ReloadTasks,
    ShowHidden,
    HideHidden,
    SlideLayout { delta_px: f32 },
    FinishSlideLayout,
    OpenSlideLayout { from_fling: bool },
}
