//! # Router
//!
//! Bridges [`NavigationCommands`] to whatever performs screen transitions.
//! The router knows nothing about screens; it hands route strings to a
//! [`Navigator`]. [`NavController`] is the navigator the TUI uses.

use log::{debug, info, warn};

use crate::core::navigation::NavigationCommands;
use crate::core::routes::Route;

/// Something that can perform a screen transition.
pub trait Navigator {
    fn navigate(&mut self, route: &str);
}

pub struct Router<N: Navigator> {
    commands: NavigationCommands,
    navigator: N,
}

impl<N: Navigator> Router<N> {
    pub fn new(commands: NavigationCommands, navigator: N) -> Self {
        Self {
            commands,
            navigator,
        }
    }

    /// Forwards the pending command, if any. For synchronous event loops.
    pub fn dispatch_pending(&mut self) -> bool {
        match self.commands.try_next() {
            Some(command) => {
                debug!("Router dispatching {}", command.route);
                self.navigator.navigate(&command.route);
                true
            }
            None => false,
        }
    }

    /// Forwards commands until every producer is gone.
    pub async fn run(mut self) -> N {
        while let Some(command) = self.commands.next().await {
            debug!("Router dispatching {}", command.route);
            self.navigator.navigate(&command.route);
        }
        info!("Navigation channel closed, router stopping");
        self.navigator
    }

    pub fn navigator(&self) -> &N {
        &self.navigator
    }

    pub fn navigator_mut(&mut self) -> &mut N {
        &mut self.navigator
    }
}

/// Back stack of resolved routes. The start destination is never popped.
#[derive(Debug)]
pub struct NavController {
    back_stack: Vec<Route>,
}

impl Default for NavController {
    fn default() -> Self {
        Self::new(Route::Home)
    }
}

impl NavController {
    pub fn new(start_destination: Route) -> Self {
        Self {
            back_stack: vec![start_destination],
        }
    }

    pub fn current(&self) -> &Route {
        // back_stack is never empty: new() seeds it and pop_back() keeps the root
        &self.back_stack[self.back_stack.len() - 1]
    }

    pub fn depth(&self) -> usize {
        self.back_stack.len()
    }

    /// Returns to the previous destination. False when already at the root.
    pub fn pop_back(&mut self) -> bool {
        if self.back_stack.len() <= 1 {
            return false;
        }
        if let Some(route) = self.back_stack.pop() {
            debug!("Popped {}", route.path());
        }
        true
    }
}

impl Navigator for NavController {
    fn navigate(&mut self, route: &str) {
        match Route::resolve(route) {
            Some(resolved) => {
                info!("Navigating to {}", route);
                self.back_stack.push(resolved);
            }
            None => warn!("Ignoring navigation to unknown route '{}'", route),
        }
    }
}
