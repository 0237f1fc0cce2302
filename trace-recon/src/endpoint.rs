// Copyright 2024-Present Datadog, Inc. https://www.datadoghq.com/
// SPDX-License-Identifier: Apache-2.0

use serde::{Deserialize, Serialize};
use std::fmt;

/// Network identity of one participant in a distributed call.
///
/// Equality is structural. Reporters that do not know their own address use
/// [`Endpoint::UNKNOWN`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub struct Endpoint {
    pub ipv4: u32,
    pub port: u16,
}

impl Endpoint {
    /// Stands in for "endpoint not recorded".
    pub const UNKNOWN: Endpoint = Endpoint { ipv4: 0, port: 0 };

    pub fn new(ipv4: u32, port: u16) -> Self {
        Self { ipv4, port }
    }

    pub fn is_unknown(&self) -> bool {
        *self == Self::UNKNOWN
    }
}

impl Default for Endpoint {
    fn default() -> Self {
        Self::UNKNOWN
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_unknown() {
            return write!(f, "unknown");
        }
        let [a, b, c, d] = self.ipv4.to_be_bytes();
        write!(f, "{a}.{b}.{c}.{d}:{}", self.port)
    }
}
