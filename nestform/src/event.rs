//! Validation outcomes and form-level events.
//!
//! A child publishes to its parent by returning [`Signal`]s from its validate
//! call; the parent consumes them in its handlers and returns its own signals
//! upward. Only the root form fans events out to external subscribers, through a
//! [`Channel`].

use std::collections::BTreeMap;
use std::fmt;

use nestform_model::Value;
use serde::Serialize;

use crate::error::ValidationError;

/// Errors of a composite, keyed by the child's qualified name.
pub type ErrorMap = BTreeMap<String, ErrorReport>;

/// What a failing field reports.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ErrorReport {
    /// A leaf's validation message.
    Message(String),
    /// A composite's outstanding child errors.
    Fields(ErrorMap),
}

impl ErrorReport {
    /// Returns the message if this is a leaf error.
    pub fn message(&self) -> Option<&str> {
        match self {
            ErrorReport::Message(message) => Some(message),
            ErrorReport::Fields(_) => None,
        }
    }

    /// Returns the child errors if this is a composite error.
    pub fn fields(&self) -> Option<&ErrorMap> {
        match self {
            ErrorReport::Message(_) => None,
            ErrorReport::Fields(fields) => Some(fields),
        }
    }
}

impl From<ValidationError> for ErrorReport {
    fn from(err: ValidationError) -> Self {
        ErrorReport::Message(err.message)
    }
}

impl From<&str> for ErrorReport {
    fn from(message: &str) -> Self {
        ErrorReport::Message(message.to_string())
    }
}

impl From<ErrorMap> for ErrorReport {
    fn from(fields: ErrorMap) -> Self {
        ErrorReport::Fields(fields)
    }
}

/// Pass/fail outcome published by a field (`valid:pass` / `valid:fail`).
#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    /// The field validated; `value` is `None` when no input was provided.
    Pass { name: String, value: Option<Value> },
    /// The field failed validation.
    Fail { name: String, error: ErrorReport },
}

impl Signal {
    pub fn pass(name: impl Into<String>, value: Option<Value>) -> Self {
        Signal::Pass {
            name: name.into(),
            value,
        }
    }

    pub fn fail(name: impl Into<String>, error: impl Into<ErrorReport>) -> Self {
        Signal::Fail {
            name: name.into(),
            error: error.into(),
        }
    }

    /// The qualified name of the publishing field.
    pub fn name(&self) -> &str {
        match self {
            Signal::Pass { name, .. } | Signal::Fail { name, .. } => name,
        }
    }

    pub fn is_pass(&self) -> bool {
        matches!(self, Signal::Pass { .. })
    }
}

/// Events published by a [`Form`](crate::form::Form) to its subscribers.
#[derive(Debug, Clone, PartialEq)]
pub enum FormEvent {
    /// The form's own pass/fail outcome.
    Valid(Signal),
    /// Submitted with no outstanding errors; carries the aggregated value.
    SubmitValid(Value),
    /// Submitted with outstanding errors.
    SubmitInvalid(ErrorMap),
}

/// Handle returned by [`Channel::subscribe`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

impl SubscriptionId {
    /// Get the raw ID value.
    pub fn raw(&self) -> u64 {
        self.0
    }
}

type Handler<E> = Box<dyn FnMut(&E)>;

/// Synchronous publish/subscribe channel.
///
/// Subscribers run in subscription order, on the publishing call stack. The
/// channel is borrowed mutably for the whole publish, so a subscriber can neither
/// subscribe nor publish re-entrantly.
pub struct Channel<E> {
    next_id: u64,
    subscribers: Vec<(SubscriptionId, Handler<E>)>,
}

impl<E> Channel<E> {
    pub fn new() -> Self {
        Self {
            next_id: 0,
            subscribers: Vec::new(),
        }
    }

    /// Register a subscriber.
    pub fn subscribe<F>(&mut self, handler: F) -> SubscriptionId
    where
        F: FnMut(&E) + 'static,
    {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Remove a subscriber. Returns `false` if it was not registered.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Deliver `event` to every subscriber.
    pub fn publish(&mut self, event: &E) {
        for (_, handler) in &mut self.subscribers {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<E> Default for Channel<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> fmt::Debug for Channel<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Channel")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
