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

//! Provides foundational primitives for event-driven communication.
//!
//! The primary component is the [`Signal`], a generic synchronous observer:
//! publishing an event delivers it immediately to every current subscriber,
//! in subscription order, on the caller's thread.
//!
//! By keeping the primitive generic, `aster-core` allows higher-level
//! crates to define their own specific event types without creating
//! circular dependencies.

mod signal;

pub use self::signal::{Signal, SubscriberId};
