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

//! Core types for entity identity.
//!
//! An entity is represented purely by an [`EntityHandle`]: a slot id and a
//! generation ("batch") packed into one unsigned integer. The backing width
//! is chosen at the type level through [`EntityBits`], so every width gets
//! its own handle type with its own capacity and wraparound constants.

mod entity;
mod error;

pub use entity::*;
pub use error::EntityError;
