use std::fmt;

use statig::blocking::IntoStateMachineExt as _;

mod hsm;

use hsm::GestureHsm;

use super::config::OverlayTouchConfig;
use super::fling::{Fling, FlingDetector, FlingThresholds};
use super::types::{AnchorEdge, MotionAction, MotionEvent, SwitchCommand};

// Down and the first slide step each need three calls; Up after a fling needs two.
const MAX_COMMANDS_PER_EVENT: usize = 4;

#[derive(Clone, Copy, Debug)]
enum GestureHsmEvent {
    Motion(MotionEvent),
    Fling(Fling),
}

#[derive(Clone, Copy, Debug, Default)]
pub struct GestureOutput {
    pub commands: [Option<SwitchCommand>; MAX_COMMANDS_PER_EVENT],
}

impl GestureOutput {
    pub fn iter(&self) -> impl Iterator<Item = SwitchCommand> + '_ {
        self.commands.iter().flatten().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.iter().all(Option::is_none)
    }
}

#[derive(Clone, Copy, Debug)]
struct DispatchContext {
    anchor: AnchorEdge,
    slop_px: f32,
    commands: [Option<SwitchCommand>; MAX_COMMANDS_PER_EVENT],
    fling_eligible: Option<bool>,
}

impl DispatchContext {
    fn new(anchor: AnchorEdge, slop_px: f32) -> Self {
        Self {
            anchor,
            slop_px,
            commands: [None; MAX_COMMANDS_PER_EVENT],
            fling_eligible: None,
        }
    }

    fn emit(&mut self, command: SwitchCommand) {
        for slot in &mut self.commands {
            if slot.is_none() {
                *slot = Some(command);
                return;
            }
        }
        log::warn!("gesture output full, dropping {command:?}");
    }

    fn set_fling_eligible(&mut self, eligible: bool) {
        self.fling_eligible = Some(eligible);
    }

    fn finish(self) -> GestureOutput {
        GestureOutput {
            commands: self.commands,
        }
    }
}

/// Edge-swipe recognizer for the overlay handle.
///
/// Consumes pointer events one at a time and reports which collaborator calls
/// they translate to. The anchor edge is sampled when a gesture starts.
pub struct GestureEngine {
    machine: statig::blocking::StateMachine<GestureHsm>,
    fling: FlingDetector,
    fling_eligible: bool,
    slop_px: f32,
}

impl Default for GestureEngine {
    fn default() -> Self {
        Self::new(&OverlayTouchConfig::default())
    }
}

impl GestureEngine {
    pub fn new(config: &OverlayTouchConfig) -> Self {
        Self {
            machine: GestureHsm::new().state_machine(),
            fling: FlingDetector::new(FlingThresholds::from_config(config)),
            fling_eligible: false,
            slop_px: config.gesture_slop_px(),
        }
    }

    pub fn state(&self) -> impl fmt::Debug + '_ {
        self.machine.state()
    }

    pub fn fling_eligible(&self) -> bool {
        self.fling_eligible
    }

    /// Applies new thresholds. A gesture in progress keeps its anchor edge.
    pub fn reconfigure(&mut self, config: &OverlayTouchConfig) {
        self.slop_px = config.gesture_slop_px();
        self.fling.set_thresholds(FlingThresholds::from_config(config));
    }

    pub fn handle(&mut self, event: MotionEvent, anchor: AnchorEdge) -> GestureOutput {
        let mut context = DispatchContext::new(anchor, self.slop_px);

        // The detector only sees the stretch of the gesture that moves the
        // right way; it is fed before the event itself is classified.
        if self.fling_eligible {
            if let Some(fling) = self.fling.on_motion(&event) {
                self.machine
                    .handle_with_context(&GestureHsmEvent::Fling(fling), &mut context);
            }
        }
        if matches!(event.action, MotionAction::Down | MotionAction::Cancel) {
            self.fling.reset();
        }

        self.machine
            .handle_with_context(&GestureHsmEvent::Motion(event), &mut context);

        if let Some(eligible) = context.fling_eligible {
            self.fling_eligible = eligible;
        }
        if event.action == MotionAction::Up {
            self.fling.reset();
        }
        context.finish()
    }
}
