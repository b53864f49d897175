//! Input Widget
//!
//! Binds an `EditController` to an event subscription and a frame in the
//! scene. The subscription is injected at construction and released by
//! `detach`, so several widgets can share one `EventBus`.

use tracing::{debug, info};

use canvas_input_core::{EventBus, EventSubscription, InputConfig, InputEvent, Result};

use crate::commands::{Command, Outcome, RejectReason};
use crate::controller::{EditController, RenderSnapshot};
use crate::metrics::GlyphMetrics;

/// Widget rectangle in scene coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frame {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Frame {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// A text input attached to an event bus
pub struct InputWidget<M> {
    controller: EditController,
    metrics: M,
    frame: Frame,
    subscription: Option<EventSubscription>,
}

impl<M: GlyphMetrics> InputWidget<M> {
    /// Validate `config` and subscribe to `bus`
    pub fn attach(bus: &EventBus, config: InputConfig, frame: Frame, metrics: M) -> Result<Self> {
        config.validate()?;
        let subscription = bus.subscribe();
        info!(id = ?config.id, subscription = ?subscription.id(), "input widget attached");

        Ok(Self {
            controller: EditController::new(config),
            metrics,
            frame,
            subscription: Some(subscription),
        })
    }

    /// Unsubscribe from `bus`. Safe to call more than once.
    pub fn detach(&mut self, bus: &EventBus) {
        if let Some(subscription) = self.subscription.take() {
            bus.unsubscribe(subscription.id());
            info!(id = ?self.controller.config().id, "input widget detached");
        }
    }

    pub fn is_attached(&self) -> bool {
        self.subscription.is_some()
    }

    pub fn controller(&self) -> &EditController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut EditController {
        &mut self.controller
    }

    pub fn frame(&self) -> Frame {
        self.frame
    }

    pub fn metrics(&self) -> &M {
        &self.metrics
    }

    /// Handle every queued event. Returns how many were applied.
    pub fn pump(&mut self) -> usize {
        let events = match &self.subscription {
            Some(subscription) => subscription.drain(),
            None => return 0,
        };

        events
            .iter()
            .filter(|event| self.handle_event(event).is_applied())
            .count()
    }

    /// Route one event through the controller.
    ///
    /// Pointer events outside the frame blur the widget; keyboard events are
    /// only accepted while focused.
    pub fn handle_event(&mut self, event: &InputEvent) -> Outcome {
        let command = match *event {
            InputEvent::PointerDown { x, y } if !self.frame.contains(x, y) => {
                self.controller.set_focused(false);
                return Outcome::Rejected(RejectReason::Unfocused);
            }
            InputEvent::PointerDown { x, .. } => Command::PointerDown { x: x - self.frame.x },
            _ => match Command::from_event(event) {
                Some(command) => command,
                None => return Outcome::Rejected(RejectReason::Unrecognized),
            },
        };

        if command.is_keyboard() && !self.controller.is_focused() {
            return Outcome::Rejected(RejectReason::Unfocused);
        }

        let outcome = self.controller.execute(command, &self.metrics);
        debug!(?event, ?outcome, "event handled");
        outcome
    }

    /// Current render state
    pub fn snapshot(&self) -> RenderSnapshot {
        self.controller.snapshot(&self.metrics)
    }

    /// Snapshot if a repaint is pending, clearing the flag
    pub fn take_frame(&mut self) -> Option<RenderSnapshot> {
        self.controller
            .take_needs_render()
            .then(|| self.controller.snapshot(&self.metrics))
    }
}
