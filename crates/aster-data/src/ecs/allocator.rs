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

//! The generational entity allocator.

use aster_core::ecs::{EntityBits, EntityError, EntityHandle};

/// Issues, recycles, and invalidates entity handles for one backing width.
///
/// The allocator maintains a dense, id-indexed list of handle records.
/// Every fabricated slot is in exactly one of two states:
///
/// * **live** — `records[i]` holds `Handle(i, current_batch)`, the one
///   handle that [`release`](Self::release) will accept for slot `i`;
/// * **free** — `records[i]` holds the link to the next free slot, so the
///   free list is threaded through the record array itself and needs no
///   side container of free ids.
///
/// `free_head` names the next slot to hand out, already carrying the batch
/// it will be reissued with, and equals [`EntityHandle::NULL`] when no
/// released slot is available. Recycling is LIFO: the most recently
/// released id is the first to be reissued.
///
/// The allocator is a single-owner structure with no internal
/// synchronization; callers that share an instance across threads must
/// serialize access externally.
#[derive(Debug, Clone)]
pub struct EntityAllocator<B: EntityBits> {
    records: Vec<EntityHandle<B>>,
    free_head: EntityHandle<B>,
}

impl<B: EntityBits> EntityAllocator<B> {
    /// Creates a new, empty allocator.
    pub fn new() -> Self {
        Self {
            records: Vec::new(),
            free_head: EntityHandle::NULL,
        }
    }

    /// Issues a handle whose id is unique among all currently live handles.
    ///
    /// A released slot is recycled first; only when the free list is empty
    /// is a brand-new id fabricated by growing the record array. A recycled
    /// handle carries a batch one greater (modulo wraparound) than the
    /// handle that last occupied the slot.
    ///
    /// ## Errors
    /// [`EntityError::CapacityExceeded`] when fabrication is required but
    /// all `ID_MASK` ids of the backing width have already been fabricated.
    /// The failed call leaves the allocator untouched and still usable.
    pub fn allocate(&mut self) -> Result<EntityHandle<B>, EntityError> {
        if self.free_head.is_null() {
            // Fabricate. The id `ID_MASK` is reserved for the null
            // sentinel and must never be handed out.
            let index = self.records.len();
            if index == B::ID_MASK.as_usize() {
                return Err(EntityError::CapacityExceeded {
                    capacity: B::ID_MASK.as_usize(),
                });
            }
            let handle = EntityHandle::new(B::from_usize(index));
            self.records.push(handle);
            Ok(handle)
        } else {
            // Recycle. The head already carries the batch this id is
            // reissued with; the released slot stored the chain's next
            // link and now goes back to holding its own handle.
            let handle = self.free_head;
            let index = handle.id().as_usize();
            self.free_head = self.records[index];
            self.records[index] = handle;
            Ok(handle)
        }
    }

    /// Retires `handle`, making its id available for recycling.
    ///
    /// The release is accepted only if `handle` is exactly the live record
    /// at its id. Stale handles, forged handles, double releases, and ids
    /// that were never fabricated are all rejected without mutating any
    /// state. Rejection is an expected outcome (e.g. idempotent cleanup
    /// paths), so it is reported through the return value rather than an
    /// error.
    ///
    /// ## Returns
    /// `true` if the handle was live and is now retired, `false` otherwise.
    pub fn release(&mut self, handle: EntityHandle<B>) -> bool {
        let index = handle.id().as_usize();
        match self.records.get(index) {
            Some(record) if *record == handle => {}
            _ => {
                log::trace!("Rejected release of a stale or unknown entity handle.");
                return false;
            }
        }

        // Thread the previous head (or the null terminator) through the
        // released slot, then promote the handle to head with the batch
        // its id will carry when reissued.
        self.records[index] = self.free_head;
        let mut head = handle;
        head.increment_batch();
        self.free_head = head;
        true
    }

    /// Whether `handle` is exactly the live record at its id.
    ///
    /// A handle stops being live the moment it is released, even if the
    /// same id is live again under a newer batch.
    pub fn is_live(&self, handle: EntityHandle<B>) -> bool {
        self.records.get(handle.id().as_usize()) == Some(&handle)
    }

    /// The total number of slots ever fabricated, live or free.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether no slot has ever been fabricated.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Returns an iterator over the handles of all currently live slots,
    /// in id order.
    pub fn iter(&self) -> impl Iterator<Item = EntityHandle<B>> + '_ {
        // Only a live slot stores a record whose id equals its own index;
        // a free slot stores a link to a different slot or the null
        // sentinel.
        self.records
            .iter()
            .enumerate()
            .filter(|(index, record)| record.id().as_usize() == *index)
            .map(|(_, record)| *record)
    }
}

impl<B: EntityBits> Default for EntityAllocator<B> {
    fn default() -> Self {
        Self::new()
    }
}

/// Allocator over `u8` handles: 15 ids, 16 generations each.
pub type EntityAllocator8 = EntityAllocator<u8>;
/// Allocator over `u16` handles: 255 ids, 256 generations each.
pub type EntityAllocator16 = EntityAllocator<u16>;
/// Allocator over `u32` handles: 1,048,575 ids, 4,096 generations each.
pub type EntityAllocator32 = EntityAllocator<u32>;
/// Allocator over `u64` handles: 2^32 - 1 ids, 2^32 generations each.
pub type EntityAllocator64 = EntityAllocator<u64>;
