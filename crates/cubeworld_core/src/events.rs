//! # Grid Change Notifications
//!
//! The grid store does not draw anything. Whoever renders it subscribes to
//! this feed and mirrors block additions and removals.
//!
//! ```text
//! ┌─────────────┐      ┌─────────────┐      ┌─────────────┐
//! │  VoxelGrid  │─────>│   Bounded   │─────>│  Renderer   │
//! │ add/remove  │      │   Channel   │      │ attach/drop │
//! └─────────────┘      └─────────────┘      └─────────────┘
//! ```
//!
//! Channels are bounded. A full channel drops the event instead of
//! stalling the simulation step; the grid counts what was dropped.

use crossbeam_channel::{bounded, Receiver, Sender, TrySendError};

use crate::grid::{BlockId, GridCoord};

/// A change to the set of present blocks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GridEvent {
    /// A block became present.
    BlockAdded {
        /// Where the block is.
        coord: GridCoord,
        /// Opaque identity for the renderer's visual handle.
        id: BlockId,
    },

    /// A block was removed.
    BlockRemoved {
        /// Where the block was.
        coord: GridCoord,
        /// The identity it was added with.
        id: BlockId,
    },
}

impl GridEvent {
    /// Coordinate the event refers to.
    #[must_use]
    pub const fn coord(&self) -> GridCoord {
        match *self {
            Self::BlockAdded { coord, .. } | Self::BlockRemoved { coord, .. } => coord,
        }
    }
}

/// Event bus for grid notifications.
pub struct GridEventBus {
    /// Sender end - held by the grid.
    sender: Sender<GridEvent>,
    /// Receiver end - held by the renderer.
    receiver: Receiver<GridEvent>,
}

impl GridEventBus {
    /// Creates a new event bus holding at most `capacity` undelivered events.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let (sender, receiver) = bounded(capacity);
        Self { sender, receiver }
    }

    /// Creates a sender handle.
    #[must_use]
    pub fn sender(&self) -> GridEventSender {
        GridEventSender {
            sender: self.sender.clone(),
        }
    }

    /// Creates a receiver handle.
    #[must_use]
    pub fn receiver(&self) -> GridEventReceiver {
        GridEventReceiver {
            receiver: self.receiver.clone(),
        }
    }

    /// Creates a connected sender/receiver pair.
    #[must_use]
    pub fn create_pair(capacity: usize) -> (GridEventSender, GridEventReceiver) {
        let bus = Self::new(capacity);
        (bus.sender(), bus.receiver())
    }
}

/// Outcome of a non-blocking send.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SendStatus {
    /// Queued for the receiver.
    Sent,
    /// Channel at capacity. The event was dropped.
    Full,
    /// Every receiver is gone. The event was dropped.
    Disconnected,
}

/// Handle for sending grid events.
#[derive(Clone, Debug)]
pub struct GridEventSender {
    sender: Sender<GridEvent>,
}

impl GridEventSender {
    /// Sends an event (non-blocking).
    ///
    /// Returns `false` if the channel is full or the receiver is gone. The
    /// event is dropped in both cases.
    #[inline]
    pub fn send(&self, event: GridEvent) -> bool {
        self.try_deliver(event) == SendStatus::Sent
    }

    /// Sends an event (non-blocking), reporting why it was dropped.
    #[inline]
    pub fn try_deliver(&self, event: GridEvent) -> SendStatus {
        match self.sender.try_send(event) {
            Ok(()) => SendStatus::Sent,
            Err(TrySendError::Full(_)) => SendStatus::Full,
            Err(TrySendError::Disconnected(_)) => SendStatus::Disconnected,
        }
    }
}

/// Handle for receiving grid events.
#[derive(Clone, Debug)]
pub struct GridEventReceiver {
    receiver: Receiver<GridEvent>,
}

impl GridEventReceiver {
    /// Receives all pending events (non-blocking).
    #[inline]
    #[must_use]
    pub fn drain(&self) -> Vec<GridEvent> {
        self.receiver.try_iter().collect()
    }

    /// Receives one event (non-blocking).
    #[inline]
    #[must_use]
    pub fn try_recv(&self) -> Option<GridEvent> {
        self.receiver.try_recv().ok()
    }

    /// Returns the number of pending events.
    #[inline]
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.receiver.len()
    }

    /// Checks if there are pending events.
    #[inline]
    #[must_use]
    pub fn has_events(&self) -> bool {
        !self.receiver.is_empty()
    }
}
