//! Input Event System
//!
//! Keyboard and pointer events delivered to widgets through an explicit
//! subscription. Each widget owns its `EventSubscription` and detaches it
//! on teardown, so destroyed widgets stop receiving events.

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use crossbeam_channel::{unbounded, Receiver, Sender, TryRecvError};
use tracing::{debug, info};

use crate::error::{InputError, Result};

/// Recognized key codes for `KeyDown` events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    Backspace,
    Delete,
    ArrowLeft,
    ArrowRight,
    Other(u32),
}

impl KeyCode {
    /// Map a legacy DOM `keyCode` value
    pub fn from_dom(code: u32) -> Self {
        match code {
            8 => KeyCode::Backspace,
            46 => KeyCode::Delete,
            37 => KeyCode::ArrowLeft,
            39 => KeyCode::ArrowRight,
            other => KeyCode::Other(other),
        }
    }
}

/// Events produced by the platform dispatcher
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// A character was typed
    KeyPress { ch: char, shift: bool },
    /// A non-character key went down
    KeyDown { code: KeyCode, shift: bool },
    /// Pointer pressed at a position in scene (device) coordinates
    PointerDown { x: f32, y: f32 },
    /// Focus gained (`true`) or lost (`false`)
    Focus(bool),
}

/// Identifies one subscriber on an `EventBus`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Subscriber handle for receiving events
pub struct EventSubscription {
    id: SubscriptionId,
    receiver: Receiver<InputEvent>,
}

impl EventSubscription {
    /// Identifier used to unsubscribe
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Try to receive an event (non-blocking).
    ///
    /// Returns `Ok(None)` when nothing is queued and `Err(Unsubscribed)` once
    /// the bus dropped this subscriber and the queue is exhausted.
    pub fn try_recv(&self) -> Result<Option<InputEvent>> {
        match self.receiver.try_recv() {
            Ok(event) => Ok(Some(event)),
            Err(TryRecvError::Empty) => Ok(None),
            Err(TryRecvError::Disconnected) => Err(InputError::Unsubscribed),
        }
    }

    /// Take every event queued so far
    pub fn drain(&self) -> Vec<InputEvent> {
        self.receiver.try_iter().collect()
    }
}

/// Event bus for publish/subscribe pattern
pub struct EventBus {
    subscribers: RwLock<Vec<(SubscriptionId, Sender<InputEvent>)>>,
    next_id: AtomicU64,
}

impl EventBus {
    /// Create a new event bus
    pub fn new() -> Self {
        Self {
            subscribers: RwLock::new(Vec::new()),
            next_id: AtomicU64::new(0),
        }
    }

    /// Subscribe to events
    pub fn subscribe(&self) -> EventSubscription {
        let (sender, receiver) = unbounded();
        let id = SubscriptionId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.subscribers.write().push((id, sender));
        info!("Subscriber {:?} attached", id);
        EventSubscription { id, receiver }
    }

    /// Remove a subscriber. Returns false if it was not attached.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscribers = self.subscribers.write();
        let before = subscribers.len();
        subscribers.retain(|(sid, _)| *sid != id);
        let removed = subscribers.len() != before;
        if removed {
            info!("Subscriber {:?} detached", id);
        }
        removed
    }

    /// Emit an event to all subscribers
    pub fn emit(&self, event: InputEvent) -> usize {
        let subscribers = self.subscribers.read();
        let mut delivered = 0;

        for (_, sender) in subscribers.iter() {
            if sender.send(event.clone()).is_ok() {
                delivered += 1;
            }
        }

        debug!("Event {:?} delivered to {} subscribers", event, delivered);
        delivered
    }

    /// Get the number of active subscribers
    pub fn subscriber_count(&self) -> usize {
        self.subscribers.read().len()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}
