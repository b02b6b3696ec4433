// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::HashMap;
use std::sync::RwLock;

use cid::Cid;

use crate::{cid_of, BlockStore, Error};

/// A thread-safe `HashMap` backed blockstore, mainly for testing and light
/// embedders. Persistent backends live behind the same trait.
#[derive(Debug, Default)]
pub struct MemoryDB {
    db: RwLock<HashMap<Vec<u8>, Vec<u8>>>,
}

impl BlockStore for MemoryDB {
    fn get_bytes(&self, cid: &Cid) -> Result<Option<Vec<u8>>, Error> {
        Ok(self
            .db
            .read()
            .map_err(|_| Error::Poisoned)?
            .get(&cid.to_bytes())
            .cloned())
    }

    fn put_raw(&self, bytes: Vec<u8>) -> Result<Cid, Error> {
        let cid = cid_of(&bytes);
        self.db
            .write()
            .map_err(|_| Error::Poisoned)?
            .insert(cid.to_bytes(), bytes);
        Ok(cid)
    }
}
