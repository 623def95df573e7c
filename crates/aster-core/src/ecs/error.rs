// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Defines the error types for the entity identity layer.

use std::fmt;

/// An error produced by the entity identity layer.
///
/// Rejected releases are deliberately not represented here: turning down a
/// stale or double release is a frequent, expected outcome and is reported
/// through a boolean return instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityError {
    /// A brand-new id was requested while every id of the backing width is
    /// already fabricated. The allocator is left untouched by the failed
    /// call.
    CapacityExceeded {
        /// The number of fabricable ids for the allocator's width.
        capacity: usize,
    },
}

impl fmt::Display for EntityError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityError::CapacityExceeded { capacity } => {
                write!(
                    f,
                    "Entity id space exhausted: all {capacity} fabricable ids are in use"
                )
            }
        }
    }
}

impl std::error::Error for EntityError {}
