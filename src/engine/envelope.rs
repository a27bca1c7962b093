// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::Identifier;

/// The unit transported on every channel: a payload tagged with the identifier it was produced or fed under.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<T> {
    identifier: Identifier,
    payload: T,
}

impl<T> Envelope<T> {
    pub fn new(identifier: Identifier, payload: T) -> Self {
        Self {
            identifier,
            payload,
        }
    }

    pub fn identifier(&self) -> &Identifier {
        &self.identifier
    }

    pub fn payload(&self) -> &T {
        &self.payload
    }

    pub fn into_payload(self) -> T {
        self.payload
    }

    pub fn into_parts(self) -> (Identifier, T) {
        (self.identifier, self.payload)
    }
}
