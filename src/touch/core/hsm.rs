use super::*;
use crate::touch::types::SwipeDirection;
use statig::prelude::*;

pub(super) struct GestureHsm {
    origin_x: f32,
    origin_y: f32,
    last_x: f32,
    anchor: AnchorEdge,
    wrong_direction_started: bool,
}

impl GestureHsm {
    pub(super) fn new() -> Self {
        Self {
            origin_x: 0.0,
            origin_y: 0.0,
            last_x: 0.0,
            anchor: AnchorEdge::default(),
            wrong_direction_started: false,
        }
    }

    fn begin(&mut self, context: &mut DispatchContext, motion: &MotionEvent) {
        self.origin_x = motion.raw_x;
        self.origin_y = motion.raw_y;
        self.last_x = motion.raw_x;
        self.anchor = context.anchor;
        self.wrong_direction_started = false;
        log::debug!(
            "gesture start at {}:{} anchor={:?}",
            self.origin_x as i32,
            self.origin_y as i32,
            self.anchor
        );

        context.set_fling_eligible(false);
        context.emit(SwitchCommand::SetPressed(true));
        context.emit(SwitchCommand::ClearTasks);
        context.emit(SwitchCommand::ReloadTasks);
    }

    fn release(&mut self, context: &mut DispatchContext) {
        self.wrong_direction_started = false;
        context.set_fling_eligible(false);
        context.emit(SwitchCommand::SetPressed(false));
    }

    fn displacement_x(&self, x: f32) -> f32 {
        self.origin_x - x
    }

    fn past_slop(&self, context: &DispatchContext, x: f32) -> bool {
        self.displacement_x(x).abs() > context.slop_px
    }

    /// Whether this step pulls the panel out. One step the wrong way poisons
    /// the rest of the gesture.
    fn accept_step(&mut self, x: f32) -> bool {
        if !self.wrong_direction_started
            && SwipeDirection::of_step(self.last_x, x) == self.anchor.opening_direction()
        {
            return true;
        }
        if !self.wrong_direction_started {
            log::debug!("wrong direction at x={}", x as i32);
        }
        self.wrong_direction_started = true;
        false
    }

    fn begin_move(&mut self, context: &mut DispatchContext) {
        context.emit(SwitchCommand::SetPressed(false));
        context.set_fling_eligible(false);
    }

    fn slide(&self, context: &mut DispatchContext, x: f32) {
        context.emit(SwitchCommand::SlideLayout {
            delta_px: self.displacement_x(x),
        });
    }
}

#[state_machine(initial = "State::idle()", state(derive(Debug)))]
impl GestureHsm {
    #[state]
    fn idle(&mut self, context: &mut DispatchContext, event: &GestureHsmEvent) -> Outcome<State> {
        match event {
            GestureHsmEvent::Motion(motion) if motion.action == MotionAction::Down => {
                self.begin(context, motion);
                Transition(State::tracking())
            }
            GestureHsmEvent::Motion(motion)
                if matches!(motion.action, MotionAction::Up | MotionAction::Cancel) =>
            {
                context.emit(SwitchCommand::SetPressed(false));
                Handled
            }
            // No gesture to attach the event to.
            _ => Handled,
        }
    }

    #[superstate]
    fn engaged(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Motion(motion) => match motion.action {
                MotionAction::Down => {
                    self.begin(context, motion);
                    Transition(State::tracking())
                }
                MotionAction::Cancel => {
                    log::debug!("gesture cancelled");
                    self.release(context);
                    Transition(State::idle())
                }
                MotionAction::Move | MotionAction::Up => Handled,
            },
            GestureHsmEvent::Fling(fling) => {
                if !self.past_slop(context, fling.raw_x) {
                    return Handled;
                }
                log::info!("fling open vx={}", fling.velocity_x as i32);
                context.emit(SwitchCommand::OpenSlideLayout { from_fling: true });
                Transition(State::flung())
            }
        }
    }

    /// Pressed, no direction decided yet.
    #[state(superstate = "engaged")]
    fn tracking(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Motion(motion) => match motion.action {
                MotionAction::Move => {
                    let x = motion.raw_x;
                    self.begin_move(context);
                    if !self.past_slop(context, x) {
                        self.last_x = x;
                        return Handled;
                    }
                    let accepted = self.accept_step(x);
                    self.last_x = x;
                    if !accepted {
                        return Transition(State::rejected());
                    }
                    log::debug!("slide start at x={}", x as i32);
                    context.set_fling_eligible(true);
                    context.emit(SwitchCommand::ShowHidden);
                    self.slide(context, x);
                    Transition(State::sliding())
                }
                MotionAction::Up => {
                    self.release(context);
                    context.emit(SwitchCommand::HideHidden);
                    Transition(State::idle())
                }
                _ => Super,
            },
            _ => Super,
        }
    }

    /// The panel follows the pointer.
    #[state(superstate = "engaged")]
    fn sliding(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Motion(motion) => match motion.action {
                MotionAction::Move => {
                    let x = motion.raw_x;
                    self.begin_move(context);
                    if self.past_slop(context, x) {
                        if self.accept_step(x) {
                            context.set_fling_eligible(true);
                        }
                        // Steps back toward the edge keep sliding the panel.
                        self.slide(context, x);
                    }
                    self.last_x = x;
                    Handled
                }
                MotionAction::Up => {
                    self.release(context);
                    context.emit(SwitchCommand::FinishSlideLayout);
                    Transition(State::idle())
                }
                _ => Super,
            },
            _ => Super,
        }
    }

    /// Started the wrong way; the panel stays put until release.
    #[state(superstate = "engaged")]
    fn rejected(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Motion(motion) => match motion.action {
                MotionAction::Move => {
                    self.begin_move(context);
                    self.last_x = motion.raw_x;
                    Handled
                }
                MotionAction::Up => {
                    self.release(context);
                    context.emit(SwitchCommand::HideHidden);
                    Transition(State::idle())
                }
                _ => Super,
            },
            _ => Super,
        }
    }

    /// A fling already opened the panel; the rest of the gesture is inert.
    #[state(superstate = "engaged")]
    fn flung(
        &mut self,
        context: &mut DispatchContext,
        event: &GestureHsmEvent,
    ) -> Outcome<State> {
        match event {
            GestureHsmEvent::Motion(motion) => match motion.action {
                MotionAction::Move => Handled,
                MotionAction::Up => {
                    self.release(context);
                    Transition(State::idle())
                }
                _ => Super,
            },
            _ => Super,
        }
    }
}
