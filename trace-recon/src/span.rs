// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! The span record: one hop's worth of recorded state within one RPC call.
//!
//! A [`Span`] is an immutable value. Construction and every subsequent
//! operation (annotating, merging) return a new span and leave the receiver
//! untouched, so spans may be shared freely across threads and re-merged
//! against without defensive copies.

use crate::annotation::{Annotation, Event};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::{self, Write};

const NANOS_PER_MILLI: u64 = 1_000_000;

/// One hop of a distributed call: an id, optional linkage to a parent and
/// to an explicit trace root, the annotations observed at this hop, and the
/// child spans known so far.
///
/// `id` is assumed unique per logical hop within one trace. The same hop may
/// still be reported more than once (the client and server sides each emit a
/// fragment for it); [`Span::merge`] folds such duplicates into one node.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct Span {
    pub explicit_trace_id: Option<u64>,
    pub service_name: Option<String>,
    pub name: Option<String>,
    pub id: u64,
    pub parent_id: Option<u64>,
    pub annotations: Vec<Annotation>,
    pub children: Vec<Span>,
}

impl Span {
    /// A minimal fragment with the given id and nothing else recorded.
    pub fn new(id: u64) -> Self {
        Self {
            explicit_trace_id: None,
            service_name: None,
            name: None,
            id,
            parent_id: None,
            annotations: Vec::new(),
            children: Vec::new(),
        }
    }

    /// A minimal fragment with an id drawn from `rng`.
    ///
    /// The source is injected rather than taken from a global so that
    /// fragment construction stays deterministic under test.
    pub fn with_random_id<R: Rng>(rng: &mut R) -> Self {
        Self::new(rng.gen())
    }

    pub fn with_trace_id(mut self, trace_id: u64) -> Self {
        self.explicit_trace_id = Some(trace_id);
        self
    }

    pub fn with_parent(mut self, parent_id: u64) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_service(mut self, service_name: impl Into<String>) -> Self {
        self.service_name = Some(service_name.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Returns a new span with `annotation` appended after the existing ones.
    pub fn annotate(mut self, annotation: Annotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    /// The trace this span belongs to: the explicit trace id if one was
    /// recorded, else the parent's id, else this span's own id. A root span
    /// is its own trace root, so this is total.
    pub fn trace_id(&self) -> u64 {
        self.explicit_trace_id
            .or(self.parent_id)
            .unwrap_or(self.id)
    }

    /// Hex identity used in all human-readable output: `"{id:x}"` for a
    /// root, `"{id:x}<:{parent:x}"` otherwise. Downstream tooling greps for
    /// this exact shape, keep it bit-exact.
    pub fn id_string(&self) -> String {
        match self.parent_id {
            Some(parent_id) => format!("{:x}<:{:x}", self.id, parent_id),
            None => format!("{:x}", self.id),
        }
    }

    /// Debug dump of the subtree, depth-first and self-before-children.
    ///
    /// Emits one line per annotation, in recorded order:
    /// `"{indent}{id_string} {timestamp}ms: {event}"`. Message text is split
    /// on newlines into one output line per segment. Children are printed
    /// with the indent grown by two spaces per level.
    pub fn print<W: Write>(&self, out: &mut W, indent: usize) -> io::Result<()> {
        let id_string = self.id_string();
        for annotation in &self.annotations {
            let millis = annotation.timestamp / NANOS_PER_MILLI;
            match &annotation.event {
                Event::Message(text) => {
                    for line in text.split('\n') {
                        writeln!(out, "{:indent$}{id_string} {millis}ms: {line}", "")?;
                    }
                }
                event => {
                    writeln!(out, "{:indent$}{id_string} {millis}ms: {event}", "")?;
                }
            }
        }
        for child in &self.children {
            child.print(out, indent + 2)?;
        }
        Ok(())
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "<Span {}", self.id_string())?;
        let mut children = self.children.iter();
        if let Some(first) = children.next() {
            write!(f, " {first}")?;
            for child in children {
                write!(f, ",{child}")?;
            }
        }
        write!(f, ">")
    }
}
