// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod errors;
mod memory;

pub use self::errors::Error;
pub use self::memory::MemoryDB;

use cid::Cid;
use encoding::{de, from_slice, new_from_cbor, ser, to_vec};

/// Wrapper for database to handle inserting and retrieving ipld data with Cids
pub trait BlockStore {
    /// Get bytes from block store by Cid.
    fn get_bytes(&self, cid: &Cid) -> Result<Option<Vec<u8>>, Error>;

    /// Write already encoded bytes under their content identifier. The
    /// identifier is derived from the bytes alone, so writing the same bytes
    /// twice yields the same Cid and no duplicate storage.
    fn put_raw(&self, bytes: Vec<u8>) -> Result<Cid, Error>;

    /// Get typed object from block store by Cid.
    fn get<T>(&self, cid: &Cid) -> Result<Option<T>, Error>
    where
        T: de::DeserializeOwned,
    {
        match self.get_bytes(cid)? {
            Some(bz) => Ok(Some(from_slice(&bz)?)),
            None => Ok(None),
        }
    }

    /// Put an object in the block store and return the Cid identifier.
    fn put<S>(&self, obj: &S) -> Result<Cid, Error>
    where
        S: ser::Serialize,
    {
        let bz = to_vec(obj)?;
        self.put_raw(bz)
    }
}

/// Content identifier for a block of encoded bytes.
pub(crate) fn cid_of(bytes: &[u8]) -> Cid {
    new_from_cbor(bytes)
}
