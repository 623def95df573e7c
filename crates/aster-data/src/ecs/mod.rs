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

//! Entity identity management.
//!
//! This module implements the [`EntityAllocator`], the single authority for
//! which entity handles are live. It guarantees that no two live handles
//! ever alias and that a released handle is reliably detectable as stale,
//! without any per-entity heap allocation: the free list is threaded
//! through the dense record array itself.
//!
//! The allocator manages identity only. Component storage, queries, and
//! scheduling live in higher layers and merely consume the handles issued
//! here.

mod allocator;

pub use allocator::*;
