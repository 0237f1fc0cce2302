// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use crate::endpoint::Endpoint;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One RPC lifecycle marker, or a free-form message attached to a span.
///
/// The four lifecycle variants mark the protocol-level points of a single
/// RPC as seen from either side of the wire; exactly one event is recorded
/// per [`Annotation`].
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub enum Event {
    ClientSend,
    ClientRecv,
    ServerSend,
    ServerRecv,
    Message(String),
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::ClientSend => write!(f, "ClientSend"),
            Event::ClientRecv => write!(f, "ClientRecv"),
            Event::ServerSend => write!(f, "ServerSend"),
            Event::ServerRecv => write!(f, "ServerRecv"),
            Event::Message(text) => write!(f, "{text}"),
        }
    }
}

/// One timestamped [`Event`] observed at one [`Endpoint`] within a span.
///
/// Annotations keep their insertion order inside a span. Reporters on
/// different hosts stamp their own clocks, so re-sorting by timestamp would
/// reorder causally-ordered events; the order they were recorded in is the
/// only order that is safe to preserve.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Annotation {
    /// Nanoseconds since the epoch, as stamped by the reporting endpoint.
    pub timestamp: u64,
    pub event: Event,
    pub endpoint: Endpoint,
}

impl Annotation {
    pub fn new(timestamp: u64, event: Event, endpoint: Endpoint) -> Self {
        Self {
            timestamp,
            event,
            endpoint,
        }
    }

    pub fn client_send(timestamp: u64, endpoint: Endpoint) -> Self {
        Self::new(timestamp, Event::ClientSend, endpoint)
    }

    pub fn client_recv(timestamp: u64, endpoint: Endpoint) -> Self {
        Self::new(timestamp, Event::ClientRecv, endpoint)
    }

    pub fn server_send(timestamp: u64, endpoint: Endpoint) -> Self {
        Self::new(timestamp, Event::ServerSend, endpoint)
    }

    pub fn server_recv(timestamp: u64, endpoint: Endpoint) -> Self {
        Self::new(timestamp, Event::ServerRecv, endpoint)
    }

    pub fn message(timestamp: u64, text: impl Into<String>, endpoint: Endpoint) -> Self {
        Self::new(timestamp, Event::Message(text.into()), endpoint)
    }
}
