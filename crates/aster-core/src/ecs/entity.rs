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

//! Defines the generational entity handle and its backing-width trait.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::ops::{Add, BitAnd, BitOr, Shl, Shr};

mod sealed {
    pub trait Sealed {}
}

/// An unsigned integer usable as the backing storage of an [`EntityHandle`].
///
/// The width of the backing type fixes the split between id bits (low) and
/// batch bits (high), and with it the maximum number of live entities and
/// the generation wraparound period. Implemented for `u8`, `u16`, `u32` and
/// `u64`; the trait is sealed and cannot be implemented outside this crate.
pub trait EntityBits:
    Copy
    + Eq
    + Ord
    + Hash
    + fmt::Debug
    + BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Shl<u32, Output = Self>
    + Shr<u32, Output = Self>
    + Add<Output = Self>
    + sealed::Sealed
    + Send
    + Sync
    + 'static
{
    /// Total width of the backing type, in bits.
    const BITS: u32;
    /// Number of low bits holding the slot id.
    const ID_BITS: u32;
    /// Number of high bits holding the batch (generation).
    const BATCH_BITS: u32;
    /// Maximum representable id; also the id reserved for the null handle.
    const ID_MASK: Self;
    /// Maximum representable batch before wraparound.
    const BATCH_MASK: Self;
    /// The value `0` of the backing type.
    const ZERO: Self;
    /// The value `1` of the backing type.
    const ONE: Self;

    /// Widens the value for use as a slot index.
    fn as_usize(self) -> usize;

    /// Narrows a slot index into the backing type.
    ///
    /// The caller must guarantee `value <= ID_MASK`.
    fn from_usize(value: usize) -> Self;
}

macro_rules! entity_bits {
    ($ty:ty, $id_bits:expr) => {
        impl sealed::Sealed for $ty {}

        impl EntityBits for $ty {
            const BITS: u32 = <$ty>::BITS;
            const ID_BITS: u32 = $id_bits;
            const BATCH_BITS: u32 = <$ty>::BITS - $id_bits;
            const ID_MASK: Self = ((1 as $ty) << $id_bits) - 1;
            const BATCH_MASK: Self = ((1 as $ty) << (<$ty>::BITS - $id_bits)) - 1;
            const ZERO: Self = 0;
            const ONE: Self = 1;

            #[inline]
            fn as_usize(self) -> usize {
                self as usize
            }

            #[inline]
            fn from_usize(value: usize) -> Self {
                value as $ty
            }
        }
    };
}

// Even 4/4 split: 15 usable ids, 16 generations per id.
entity_bits!(u8, 4);
// Even 8/8 split.
entity_bits!(u16, 8);
// Capacity-biased 20/12 split. These constants are load-bearing: signature
// values of `u32` handles depend on them bit-for-bit, so the split must not
// be regularized to 16/16.
entity_bits!(u32, 20);
// Even 32/32 split.
entity_bits!(u64, 32);

/// A unique identifier for an entity, packed into one unsigned integer.
///
/// The handle combines a slot `id` (low bits) with a `batch` generation
/// (high bits) to solve the "ABA problem": when an entity is released its
/// id can be recycled for a new entity, but the batch is incremented, so
/// old handles pointing at the recycled id no longer compare equal to the
/// live record and cannot accidentally affect the new entity.
///
/// Equality and hashing operate on the packed signature, so two handles are
/// equal exactly when both their id and their batch match. A handle is pure
/// identity; no entity data is attached to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct EntityHandle<B: EntityBits> {
    signature: B,
}

impl<B: EntityBits> EntityHandle<B> {
    /// The reserved "no entity" sentinel: id `ID_MASK`, batch 0.
    ///
    /// Never issued as a live entity; it also terminates the free-list
    /// chain inside the allocator's record array.
    pub const NULL: Self = Self {
        signature: B::ID_MASK,
    };

    /// Creates a handle for `id` with batch 0.
    ///
    /// No range validation is performed; supplying an id wider than
    /// `ID_BITS` is a caller error.
    #[inline]
    pub fn new(id: B) -> Self {
        Self { signature: id }
    }

    /// Creates a handle from an id and a batch.
    ///
    /// As with [`new`](Self::new), out-of-range parts are a caller error.
    #[inline]
    pub fn from_parts(id: B, batch: B) -> Self {
        Self {
            signature: id | (batch << B::ID_BITS),
        }
    }

    /// The slot id (low `ID_BITS` bits).
    #[inline]
    pub fn id(&self) -> B {
        self.signature & B::ID_MASK
    }

    /// The batch, i.e. the generation the slot id was issued under.
    #[inline]
    pub fn batch(&self) -> B {
        self.signature >> B::ID_BITS
    }

    /// The packed `id | (batch << ID_BITS)` value backing equality and
    /// hashing.
    #[inline]
    pub fn signature(&self) -> B {
        self.signature
    }

    /// Whether this is the reserved null sentinel.
    #[inline]
    pub fn is_null(&self) -> bool {
        self.id() == B::ID_MASK
    }

    /// Advances the batch by one, wrapping silently to 0 past `BATCH_MASK`.
    ///
    /// After `BATCH_MASK + 1` releases of the same id a stale handle can
    /// collide with a freshly issued one; this is an accepted capacity
    /// limit of the chosen width, not an error condition.
    #[inline]
    pub fn increment_batch(&mut self) {
        let batch = self.batch();
        let next = if batch >= B::BATCH_MASK {
            B::ZERO
        } else {
            batch + B::ONE
        };
        self.signature = self.id() | (next << B::ID_BITS);
    }
}

/// Handle backed by `u8`: 4 id bits / 4 batch bits.
pub type EntityHandle8 = EntityHandle<u8>;
/// Handle backed by `u16`: 8 id bits / 8 batch bits.
pub type EntityHandle16 = EntityHandle<u16>;
/// Handle backed by `u32`: 20 id bits / 12 batch bits.
pub type EntityHandle32 = EntityHandle<u32>;
/// Handle backed by `u64`: 32 id bits / 32 batch bits.
pub type EntityHandle64 = EntityHandle<u64>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn width_constants_use_even_splits_except_u32() {
        assert_eq!(<u8 as EntityBits>::ID_BITS, 4);
        assert_eq!(<u8 as EntityBits>::ID_MASK, 0xF);
        assert_eq!(<u8 as EntityBits>::BATCH_MASK, 0xF);

        assert_eq!(<u16 as EntityBits>::ID_BITS, 8);
        assert_eq!(<u16 as EntityBits>::ID_MASK, 0xFF);
        assert_eq!(<u16 as EntityBits>::BATCH_MASK, 0xFF);

        assert_eq!(<u32 as EntityBits>::ID_BITS, 20);
        assert_eq!(<u32 as EntityBits>::BATCH_BITS, 12);
        assert_eq!(<u32 as EntityBits>::ID_MASK, 0xF_FFFF);
        assert_eq!(<u32 as EntityBits>::BATCH_MASK, 0xFFF);

        assert_eq!(<u64 as EntityBits>::ID_BITS, 32);
        assert_eq!(<u64 as EntityBits>::ID_MASK, 0xFFFF_FFFF);
        assert_eq!(<u64 as EntityBits>::BATCH_MASK, 0xFFFF_FFFF);
    }

    #[test]
    fn handle_packs_id_and_batch() {
        let handle = EntityHandle8::from_parts(1, 1);
        assert_eq!(handle.id(), 1);
        assert_eq!(handle.batch(), 1);
        assert_eq!(handle.signature(), 0b0001_0001);

        let wide = EntityHandle32::from_parts(3, 1);
        assert_eq!(wide.signature(), 3 | (1 << 20));
        assert_eq!(wide.id(), 3);
        assert_eq!(wide.batch(), 1);
    }

    #[test]
    fn equality_is_signature_equality() {
        assert_eq!(EntityHandle8::new(1), EntityHandle8::from_parts(1, 0));
        assert_ne!(
            EntityHandle8::from_parts(1, 0),
            EntityHandle8::from_parts(1, 1),
            "Same id under different batches must not compare equal"
        );
        assert_ne!(
            EntityHandle8::from_parts(1, 0),
            EntityHandle8::from_parts(2, 0)
        );
    }

    #[test]
    fn null_handle_is_reserved_sentinel() {
        let null = EntityHandle8::NULL;
        assert!(null.is_null());
        assert_eq!(null.id(), <u8 as EntityBits>::ID_MASK);
        assert_eq!(null.batch(), 0);
        assert!(!EntityHandle8::new(0).is_null());
    }

    #[test]
    fn increment_batch_wraps_at_mask() {
        let mut handle = EntityHandle8::from_parts(2, 3);
        handle.increment_batch();
        assert_eq!(handle, EntityHandle8::from_parts(2, 4));

        let mut saturated = EntityHandle8::from_parts(2, 15);
        saturated.increment_batch();
        assert_eq!(
            saturated,
            EntityHandle8::from_parts(2, 0),
            "Batch must wrap silently to 0 past BATCH_MASK"
        );
    }

    #[test]
    fn handle_serde_round_trip() {
        let handle = EntityHandle32::from_parts(42, 7);
        let json = serde_json::to_string(&handle).expect("Serialization should succeed");
        let back: EntityHandle32 =
            serde_json::from_str(&json).expect("Deserialization should succeed");
        assert_eq!(back, handle);
    }
}
