//! # Request lifecycle
//!
//! This module contains the [`RequestState`] enum and the [`Lifecycle`]
//! tracker which transports use to walk a request through its states.

use log::debug;
use std::fmt::Display;

/// State of a single request.
///
/// `Configured → Sending → AwaitingResponse → Completed`, with `Failed`
/// reachable from every non-terminal state.
#[derive(Clone, Copy, Eq, PartialEq, Debug, Default)]
pub enum RequestState {
    /// Parameters, files and headers are being collected.
    #[default]
    Configured,

    /// Connection is open and the body is being written.
    Sending,

    /// Body has been flushed, waiting for the status line.
    AwaitingResponse,

    /// Response body has been fully read.
    Completed,

    /// Non-success status or I/O failure.
    Failed,
}

impl RequestState {
    /// Whether no further transition is possible.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Whether moving from `self` to `next` is a valid transition.
    pub fn can_transition_to(&self, next: RequestState) -> bool {
        use RequestState::*;

        matches!(
            (self, next),
            (Configured, Sending)
                | (Sending, AwaitingResponse)
                | (AwaitingResponse, Completed)
                | (Configured | Sending | AwaitingResponse, Failed)
        )
    }
}

impl Display for RequestState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                RequestState::Configured => "Configured",
                RequestState::Sending => "Sending",
                RequestState::AwaitingResponse => "AwaitingResponse",
                RequestState::Completed => "Completed",
                RequestState::Failed => "Failed",
            }
        )
    }
}

/// Tracks the [`RequestState`] of one request.
#[derive(Debug, Default)]
pub struct Lifecycle {
    state: RequestState,
}

impl Lifecycle {
    /// Current state.
    pub fn state(&self) -> RequestState {
        self.state
    }

    /// Move to `next`.
    ///
    /// Invalid transitions are ignored and logged, the current state is kept.
    pub fn advance(&mut self, next: RequestState) -> RequestState {
        if self.state.can_transition_to(next) {
            debug!("request state: {} -> {}", self.state, next);
            self.state = next;
        } else if self.state.is_terminal() {
            debug!("request already {}, ignored {}", self.state, next);
        } else {
            debug!("ignored request state transition: {} -> {}", self.state, next);
        }

        self.state
    }

    /// Move to [`RequestState::Failed`] and hand `error` back, so it can be
    /// used inside `map_err`.
    pub fn fail<E>(&mut self, error: E) -> E {
        self.advance(RequestState::Failed);
        error
    }
}
