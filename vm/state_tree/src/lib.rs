// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::cell::RefCell;
use std::collections::HashMap;
use std::error::Error as StdError;

use address::Address;
use cid::Cid;
use encoding::serde_bytes::ByteBuf;
use ipld_blockstore::BlockStore;
use vm::ActorState;

/// Actor instance index with layered snapshots. This structure is not
/// threadsafe and should only be used in sync contexts; message execution is
/// strictly sequential per instance, so no locking exists here.
pub struct StateTree<'db, S> {
    store: &'db S,

    /// State cache
    snaps: StateSnapshots,
}

/// Collection of state snapshots
struct StateSnapshots {
    layers: Vec<StateSnapLayer>,
}

/// State snap shot layer
#[derive(Debug, Default)]
struct StateSnapLayer {
    actors: RefCell<HashMap<Address, Option<ActorState>>>,
}

impl StateSnapshots {
    /// State snapshot constructor
    fn new() -> Self {
        Self {
            layers: vec![StateSnapLayer::default()],
        }
    }

    fn add_layer(&mut self) {
        self.layers.push(StateSnapLayer::default())
    }

    fn drop_layer(&mut self) -> Result<(), String> {
        if self.layers.len() <= 1 {
            return Err("cannot drop the base snapshot layer".to_owned());
        }
        self.layers.pop();
        Ok(())
    }

    fn merge_last_layer(&mut self) -> Result<(), String> {
        if self.layers.len() <= 1 {
            return Err("no snapshot layer to merge".to_owned());
        }
        let top = self
            .layers
            .pop()
            .ok_or_else(|| "merging layers failed to pop top layer".to_owned())?;

        self.layers
            .last()
            .ok_or_else(|| "merging layers failed to index lower layer".to_owned())?
            .actors
            .borrow_mut()
            .extend(top.actors.into_inner());

        Ok(())
    }

    fn get_actor(&self, addr: &Address) -> Option<ActorState> {
        for layer in self.layers.iter().rev() {
            if let Some(state) = layer.actors.borrow().get(addr) {
                return state.clone();
            }
        }

        None
    }

    fn set_actor(&self, addr: Address, actor: ActorState) -> Result<(), Box<dyn StdError>> {
        self.layers
            .last()
            .ok_or("set actor failed to index snapshot layer")?
            .actors
            .borrow_mut()
            .insert(addr, Some(actor));
        Ok(())
    }

    fn delete_actor(&self, addr: Address) -> Result<(), Box<dyn StdError>> {
        self.layers
            .last()
            .ok_or("delete actor failed to index snapshot layer")?
            .actors
            .borrow_mut()
            .insert(addr, None);

        Ok(())
    }
}

impl<'db, S> StateTree<'db, S>
where
    S: BlockStore,
{
    pub fn new(store: &'db S) -> Self {
        Self {
            store,
            snaps: StateSnapshots::new(),
        }
    }

    /// Retrieve store reference to modify db.
    pub fn store(&self) -> &S {
        self.store
    }

    /// Get actor state from an address.
    pub fn get_actor(&self, addr: &Address) -> Result<Option<ActorState>, Box<dyn StdError>> {
        Ok(self.snaps.get_actor(addr))
    }

    /// Set actor state for an address.
    pub fn set_actor(&mut self, addr: &Address, actor: ActorState) -> Result<(), Box<dyn StdError>> {
        self.snaps.set_actor(addr.clone(), actor)
    }

    /// Delete actor for an address. Will resolve to a tombstone entry.
    pub fn delete_actor(&mut self, addr: &Address) -> Result<(), Box<dyn StdError>> {
        self.snaps.delete_actor(addr.clone())
    }

    /// Begin a new mutation layer; paired with either `clear_snapshot` or
    /// `revert_to_snapshot`.
    pub fn snapshot(&mut self) -> Result<(), String> {
        self.snaps.add_layer();
        Ok(())
    }

    /// Merges the last mutation layer into the one below it.
    pub fn clear_snapshot(&mut self) -> Result<(), String> {
        self.snaps.merge_last_layer()
    }

    /// Discards every mutation made since the matching `snapshot` call.
    pub fn revert_to_snapshot(&mut self) -> Result<(), String> {
        self.snaps.drop_layer()
    }

    /// Flushes a deterministic root of all live actor records into the store.
    /// Records are keyed by their address bytes in sorted order, so two trees
    /// holding equal content always flush to the same root.
    pub fn flush(&mut self) -> Result<Cid, Box<dyn StdError>> {
        if self.snaps.layers.len() != 1 {
            return Err("tried to flush state tree with active snapshots".into());
        }

        let mut entries: Vec<(ByteBuf, ActorState)> = self.snaps.layers[0]
            .actors
            .borrow()
            .iter()
            .filter_map(|(addr, state)| {
                state
                    .clone()
                    .map(|s| (ByteBuf::from(addr.to_bytes()), s))
            })
            .collect();
        entries.sort_by(|a, b| a.0.cmp(&b.0));

        Ok(self.store.put(&entries)?)
    }
}
