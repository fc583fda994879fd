use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

/// Redirect
///
/// The two places the access-control core can send the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Redirect {
    Login,
    Unauthorized,
}

impl Redirect {
    pub fn path(self) -> &'static str {
        match self {
            Redirect::Login => "/login",
            Redirect::Unauthorized => "/unauthorized",
        }
    }
}

/// Navigator Contract
///
/// Implemented by whatever owns the UI's location. Redirects are fire-and-forget:
/// the call must not block, and it is made from the thread that produced the
/// decision (gate evaluation or the expiry interceptor).
pub trait Navigator: Send + Sync {
    fn redirect(&self, to: Redirect);
}

/// NavigatorState
///
/// Shared handle passed explicitly to the gate-driven navigation and the interceptor.
pub type NavigatorState = Arc<dyn Navigator>;

/// ChannelNavigator
///
/// Forwards every redirect to an unbounded channel drained by the UI event loop.
#[derive(Clone)]
pub struct ChannelNavigator {
    tx: mpsc::UnboundedSender<Redirect>,
}

impl ChannelNavigator {
    /// A navigator and the receiver the UI loop drains.
    pub fn channel() -> (Self, mpsc::UnboundedReceiver<Redirect>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }
}

impl Navigator for ChannelNavigator {
    fn redirect(&self, to: Redirect) {
        // A closed receiver means the UI loop is gone; nothing left to navigate.
        if self.tx.send(to).is_err() {
            tracing::debug!(target = to.path(), "redirect dropped, navigator receiver closed");
        }
    }
}

/// RecordingNavigator
///
/// Keeps every redirect in order. Used by tests and by the probe binary's report.
#[derive(Default)]
pub struct RecordingNavigator {
    seen: Mutex<Vec<Redirect>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn redirects(&self) -> Vec<Redirect> {
        self.seen.lock().clone()
    }

    pub fn count(&self, to: Redirect) -> usize {
        self.seen.lock().iter().filter(|r| **r == to).count()
    }
}

impl Navigator for RecordingNavigator {
    fn redirect(&self, to: Redirect) {
        self.seen.lock().push(to);
    }
}
