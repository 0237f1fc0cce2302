// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

//! Trace-reconstruction core for distributed RPC tracing.
//!
//! Instrumentation at each hop of a distributed call independently emits a
//! [`Span`] fragment carrying a few timestamped [`Annotation`]s. Fragments
//! reach a collector in arbitrary order and are threaded back into the call
//! tree with [`Span::merge`], the only place structural tree logic lives.
//! Transport, storage and trace completion policy belong to the surrounding
//! collector service, not to this crate.

pub mod annotation;
pub mod endpoint;
mod merge;
pub mod span;

pub use annotation::{Annotation, Event};
pub use endpoint::Endpoint;
pub use span::Span;
