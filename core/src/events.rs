//! Typed notifications emitted by the engine and the dispatcher that delivers them.
//!
//! Observers subscribe either to one [`NotificationKind`] or to everything. Delivery is synchronous: by the time an
//! engine operation returns, every matching observer has seen every notification it produced, in the order the
//! observers subscribed.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Notification {
    CellOpened { coords: Coord2, surrounding_mines: u8 },
    CellFlagged { coords: Coord2 },
    CellUnflagged { coords: Coord2 },
    StatusChanged { status: GameStatus },
    GameRestarted,
    /// The game was lost. Sent right after the status change to [`GameStatus::Lose`].
    GameOver,
}

impl Notification {
    pub const fn kind(&self) -> NotificationKind {
        match self {
            Self::CellOpened { .. } => NotificationKind::CellOpened,
            Self::CellFlagged { .. } => NotificationKind::CellFlagged,
            Self::CellUnflagged { .. } => NotificationKind::CellUnflagged,
            Self::StatusChanged { .. } => NotificationKind::StatusChanged,
            Self::GameRestarted => NotificationKind::GameRestarted,
            Self::GameOver => NotificationKind::GameOver,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NotificationKind {
    CellOpened,
    CellFlagged,
    CellUnflagged,
    StatusChanged,
    GameRestarted,
    GameOver,
}

/// Anything that wants to hear about engine notifications, usually a view.
pub trait Observer: Send {
    fn notify(&mut self, notification: &Notification);
}

impl<F> Observer for F
where
    F: FnMut(&Notification) + Send,
{
    fn notify(&mut self, notification: &Notification) {
        self(notification)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SubscriptionId(u32);

impl SubscriptionId {
    pub const fn raw(self) -> u32 {
        self.0
    }
}

struct Subscription {
    id: SubscriptionId,
    /// `None` listens to every kind.
    kind: Option<NotificationKind>,
    observer: Box<dyn Observer>,
}

#[derive(Default)]
pub struct EventDispatcher {
    subscriptions: Vec<Subscription>,
    next_id: u32,
}

impl EventDispatcher {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(
        &mut self,
        kind: NotificationKind,
        observer: impl Observer + 'static,
    ) -> SubscriptionId {
        self.insert(Some(kind), Box::new(observer))
    }

    pub fn subscribe_all(&mut self, observer: impl Observer + 'static) -> SubscriptionId {
        self.insert(None, Box::new(observer))
    }

    /// Returns `false` when no such subscription exists.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscriptions.len();
        self.subscriptions.retain(|subscription| subscription.id != id);
        self.subscriptions.len() != before
    }

    pub fn dispatch(&mut self, notification: Notification) {
        log::trace!("Dispatching {:?}", notification);
        let kind = notification.kind();
        for subscription in &mut self.subscriptions {
            if subscription.kind.is_none_or(|wanted| wanted == kind) {
                subscription.observer.notify(&notification);
            }
        }
    }

    fn insert(&mut self, kind: Option<NotificationKind>, observer: Box<dyn Observer>) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscriptions.push(Subscription { id, kind, observer });
        id
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("subscriptions", &self.subscriptions.len())
            .field("next_id", &self.next_id)
            .finish()
    }
}
