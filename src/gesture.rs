//! Horizontal drag tracking for the card currently on screen.
//!
//! A [`GestureTracker`] turns raw pointer positions into a clamped offset and
//! an intensity in `[0, 1]`, and decides on release whether the drag went far
//! enough to count as a vote. Hosts that register move/up handlers on pointer
//! down should go through [`GestureTracker::drag`], whose [`Drag`] scope
//! detaches those handlers on every exit path.
use crate::api::Swipe;
use log::trace;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureConfig {
    pub max_drag: f64,
    pub direction_threshold: f64,
    pub commit_threshold: f64,
}
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GestureState {
    pub origin_x: f64,
    pub offset: f64,
    pub direction: Option<Swipe>,
    pub intensity: f64,
    pub dragging: bool,
}
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Release {
    Commit { direction: Swipe, intensity: f64 },
    Reset,
}

#[derive(Debug, Clone)]
pub struct GestureTracker {
    config: GestureConfig,
    state: Option<GestureState>,
}

impl GestureTracker {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            state: None,
        }
    }
    pub fn config(&self) -> &GestureConfig {
        &self.config
    }
    pub fn state(&self) -> Option<&GestureState> {
        self.state.as_ref()
    }
    pub fn is_dragging(&self) -> bool {
        self.state.is_some()
    }
    /// Starts a drag at `x`. Returns false if a drag is already running.
    pub fn begin(&mut self, x: f64) -> bool {
        if self.is_dragging() {
            trace!("Ignoring pointer down at {} while already dragging", x);
            return false;
        }
        if !x.is_finite() {
            return false;
        }
        self.state = Some(GestureState {
            origin_x: x,
            offset: 0.0,
            direction: None,
            intensity: 0.0,
            dragging: true,
        });
        true
    }
    pub fn update(&mut self, x: f64) -> Option<&GestureState> {
        let config = self.config;
        let state = self.state.as_mut()?;
        if x.is_finite() {
            let delta = (x - state.origin_x)
                .max(-config.max_drag)
                .min(config.max_drag);
            state.offset = delta;
            state.intensity = delta.abs() / config.max_drag;
            state.direction = if delta > config.direction_threshold {
                Some(Swipe::Right)
            } else if delta < -config.direction_threshold {
                Some(Swipe::Left)
            } else {
                None
            };
            trace!(
                "Drag offset {:.1} intensity {:.2} direction {:?}",
                state.offset,
                state.intensity,
                state.direction
            );
        }
        Some(&*state)
    }
    /// Ends the drag. Equal to the commit threshold is still a reset.
    pub fn end(&mut self) -> Release {
        match self.state.take() {
            Some(state) if state.offset.abs() > self.config.commit_threshold => Release::Commit {
                direction: if state.offset > 0.0 {
                    Swipe::Right
                } else {
                    Swipe::Left
                },
                intensity: state.intensity,
            },
            _ => Release::Reset,
        }
    }
    pub fn cancel(&mut self) {
        if self.state.take().is_some() {
            trace!("Drag cancelled");
        }
    }
    /// Opens a drag scope: `listeners` are attached now and detached when the
    /// scope ends, whether it is released, dropped, or unwound.
    pub fn drag<'a, L: PointerListeners>(
        &'a mut self,
        listeners: &'a mut L,
        x: f64,
    ) -> Option<Drag<'a, L>> {
        if !self.begin(x) {
            return None;
        }
        listeners.attach();
        Some(Drag {
            tracker: self,
            listeners,
            released: false,
        })
    }
}

/// Move/up handlers a host registers for the duration of one drag.
pub trait PointerListeners {
    fn attach(&mut self);
    fn detach(&mut self);
}
/// For hosts that feed positions in directly and register nothing.
#[derive(Debug, Default)]
pub struct NoListeners;
impl PointerListeners for NoListeners {
    fn attach(&mut self) {}
    fn detach(&mut self) {}
}

pub struct Drag<'a, L: PointerListeners> {
    tracker: &'a mut GestureTracker,
    listeners: &'a mut L,
    released: bool,
}
impl<'a, L: PointerListeners> Drag<'a, L> {
    pub fn moved(&mut self, x: f64) -> Option<GestureState> {
        self.tracker.update(x).copied()
    }
    pub fn state(&self) -> Option<&GestureState> {
        self.tracker.state()
    }
    pub fn release(mut self) -> Release {
        self.released = true;
        self.tracker.end()
    }
}
impl<'a, L: PointerListeners> Drop for Drag<'a, L> {
    fn drop(&mut self) {
        if !self.released {
            self.tracker.cancel();
        }
        self.listeners.detach();
    }
}
