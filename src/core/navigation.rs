//! # Navigation Commands
//!
//! Decouples anything that wants to change screens from the thing that
//! actually changes them. Producers call [`NavigationRepo::go_to`]; a single
//! consumer (the router) pulls commands from [`NavigationCommands`].
//!
//! The channel is a single-slot mailbox: capacity 1, overwrite on send.
//!
//! ```text
//! go_to("a") ─┐
//! go_to("b") ─┼─▶ [ slot: "c" ] ─▶ next() == "c"
//! go_to("c") ─┘
//! ```
//!
//! A consumer that falls behind skips to the most recent command. The most
//! recent one is always delivered eventually, and nothing is delivered twice.

use std::sync::Arc;

use log::debug;
use tokio::sync::watch;

/// A request to show the screen addressed by `route`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavigationCommand {
    pub route: String,
}

/// Producer half. Cheap to clone; every view model gets one.
#[derive(Clone)]
pub struct NavigationRepo {
    slot: Arc<watch::Sender<Option<NavigationCommand>>>,
}

/// Consumer half. Exactly one per channel.
pub struct NavigationCommands {
    slot: watch::Receiver<Option<NavigationCommand>>,
}

impl NavigationRepo {
    /// Creates the process-wide channel.
    pub fn channel() -> (NavigationRepo, NavigationCommands) {
        let (tx, rx) = watch::channel(None);
        (
            NavigationRepo { slot: Arc::new(tx) },
            NavigationCommands { slot: rx },
        )
    }

    /// Replaces whatever is pending with a command for `route`.
    /// Never waits on the consumer.
    pub async fn go_to(&self, route: impl Into<String>) {
        let command = NavigationCommand {
            route: route.into(),
        };
        debug!("Navigation command queued: {}", command.route);
        self.slot.send_replace(Some(command));
    }
}

impl NavigationCommands {
    /// Waits for the next undelivered command.
    ///
    /// Returns `None` once every `NavigationRepo` handle has been dropped
    /// and nothing is left in the slot.
    pub async fn next(&mut self) -> Option<NavigationCommand> {
        loop {
            self.slot.changed().await.ok()?;
            if let Some(command) = self.slot.borrow_and_update().clone() {
                return Some(command);
            }
        }
    }

    /// Takes the pending command, if any, without waiting.
    ///
    /// A command sent before the last producer was dropped is still handed
    /// over.
    pub fn try_next(&mut self) -> Option<NavigationCommand> {
        let slot = self.slot.borrow_and_update();
        if !slot.has_changed() {
            return None;
        }
        (*slot).clone()
    }
}
