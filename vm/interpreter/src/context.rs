// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use address::Address;
use cid::Cid;
use encoding::Cbor;
use ipld_blockstore::BlockStore;
use log::warn;
use state_tree::StateTree;
use vm::{actor_error, ActorError, ActorState, MethodNum, Serialized, TokenAmount, EMPTY_ARR_CID};

use crate::registry::CodeRegistry;
use crate::vm::apply_invocation;

/// Message details of the current invocation, visible to the running method.
#[derive(Clone, Debug)]
pub struct InvocationMessage {
    pub caller: Address,
    pub receiver: Address,
    pub method: MethodNum,
    pub value_received: TokenAmount,
}

/// Execution environment of one running actor method. Created per call by
/// the dispatcher and destroyed when the call returns; it exclusively owns
/// the receiver's state access for its lifetime.
pub struct InvocationContext<'a, 'db, BS> {
    registry: &'a CodeRegistry<BS>,
    state: &'a mut StateTree<'db, BS>,
    store: &'db BS,
    msg: InvocationMessage,
}

impl<'a, 'db, BS> InvocationContext<'a, 'db, BS>
where
    BS: BlockStore,
{
    pub(crate) fn new(
        registry: &'a CodeRegistry<BS>,
        state: &'a mut StateTree<'db, BS>,
        store: &'db BS,
        msg: InvocationMessage,
    ) -> Self {
        Self {
            registry,
            state,
            store,
            msg,
        }
    }

    /// Message of the current invocation.
    pub fn message(&self) -> &InvocationMessage {
        &self.msg
    }

    /// Reference to the underlying content-addressed store.
    pub fn store(&self) -> &BS {
        self.store
    }

    /// Helper function for inserting a state record into the store.
    /// Serialization of well-formed internal data must always succeed, so a
    /// failure here is fatal.
    pub fn put<T: Cbor>(&self, obj: &T) -> Result<Cid, ActorError> {
        let bz = obj
            .marshal_cbor()
            .map_err(|e| actor_error!(fatal("failed to marshal cbor object: {}", e)))?;
        self.store
            .put_raw(bz)
            .map_err(|e| actor_error!(fatal("failed to put cbor object: {}", e)))
    }

    /// Helper function for reading a state record back from the store.
    pub fn get<T: Cbor>(&self, cid: &Cid) -> Result<Option<T>, ActorError> {
        self.store
            .get(cid)
            .map_err(|e| actor_error!(fatal("failed to get cbor object: {}", e)))
    }

    fn receiver_state(&self) -> Result<ActorState, ActorError> {
        self.state
            .get_actor(&self.msg.receiver)
            .map_err(|e| actor_error!(fatal("failed to get actor for invocation: {}", e)))?
            .ok_or_else(|| actor_error!(fatal("receiver actor does not exist mid-invocation")))
    }

    /// Current committed state of the receiver.
    pub fn state<T: Cbor>(&self) -> Result<T, ActorError> {
        let act = self.receiver_state()?;
        self.get(&act.state)?.ok_or_else(|| {
            actor_error!(fatal(
                "state does not exist for actor state cid: {}",
                act.state
            ))
        })
    }

    /// Commits `new` as the receiver's state root iff the observed previous
    /// root still matches the actual current root. Execution is single
    /// threaded per message, so a mismatch indicates an upstream sequencing
    /// bug rather than a race.
    pub fn state_commit(&mut self, old: &Cid, new: Cid) -> Result<(), ActorError> {
        let mut actor = self.receiver_state()?;

        if &actor.state != old {
            return Err(actor_error!(fatal(
                "failed to update state, inconsistent base reference"
            )));
        }
        actor.state = new;
        self.state
            .set_actor(&self.msg.receiver, actor)
            .map_err(|e| actor_error!(fatal("failed to set actor in state_commit: {}", e)))
    }

    /// First commit for a fresh instance: the receiver's root must still be
    /// the uninitialized sentinel. Distinct from `state_commit` with an
    /// explicit previous root.
    pub fn create<T: Cbor>(&mut self, obj: &T) -> Result<(), ActorError> {
        let c = self.put(obj)?;
        self.state_commit(&EMPTY_ARR_CID, c)
    }

    /// Read-modify-commit convenience over the receiver's state record. If
    /// the closure fails nothing is put or committed.
    pub fn transaction<C, R, F>(&mut self, f: F) -> Result<R, ActorError>
    where
        C: Cbor,
        F: FnOnce(&mut C, &mut Self) -> Result<R, ActorError>,
    {
        let act = self.receiver_state()?;
        let mut state: C = self
            .get(&act.state)?
            .ok_or_else(|| actor_error!(fatal("actor state does not exist: {}", act.state)))?;

        let r = f(&mut state, self)?;

        let c = self.put(&state)?;
        self.state_commit(&act.state, c)?;
        Ok(r)
    }

    /// Sub-invocation: calls a method on another actor. Mutations made by a
    /// failed nested call are reverted before the error returns, leaving the
    /// caller free to handle it.
    pub fn send(
        &mut self,
        to: Address,
        method: MethodNum,
        params: Serialized,
        value: TokenAmount,
    ) -> Result<Serialized, ActorError> {
        let msg = InvocationMessage {
            caller: self.msg.receiver.clone(),
            receiver: to,
            method,
            value_received: value,
        };

        self.state
            .snapshot()
            .map_err(|e| actor_error!(fatal("failed to create snapshot: {}", e)))?;

        let res = apply_invocation(self.registry, self.state, self.store, &msg, &params);
        match &res {
            Ok(_) => self
                .state
                .clear_snapshot()
                .map_err(|e| actor_error!(fatal("failed to merge snapshot: {}", e)))?,
            Err(err) => {
                warn!(
                    "internal send failed: (to: {}) (method: {}) {}",
                    msg.receiver, msg.method, err
                );
                self.state
                    .revert_to_snapshot()
                    .map_err(|e| actor_error!(fatal("failed to revert snapshot: {}", e)))?;
            }
        }
        res
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipld_blockstore::MemoryDB;

    fn test_msg(receiver: &Address) -> InvocationMessage {
        InvocationMessage {
            caller: Address::new_id(1).unwrap(),
            receiver: receiver.clone(),
            method: MethodNum::new(0),
            value_received: TokenAmount::default(),
        }
    }

    fn install_actor(tree: &mut StateTree<'_, MemoryDB>, addr: &Address) {
        tree.set_actor(
            addr,
            ActorState::new(
                encoding::new_from_cbor(b"test/code"),
                *EMPTY_ARR_CID,
                TokenAmount::default(),
                0,
            ),
        )
        .unwrap();
    }

    #[test]
    fn put_is_idempotent() {
        let store = MemoryDB::default();
        let mut tree = StateTree::new(&store);
        let registry = CodeRegistry::new();
        let addr = Address::new_id(100).unwrap();
        install_actor(&mut tree, &addr);

        let ctx = InvocationContext::new(&registry, &mut tree, &store, test_msg(&addr));
        let record = Serialized::new(vec![1, 2, 3]);
        assert_eq!(ctx.put(&record).unwrap(), ctx.put(&record).unwrap());
    }

    #[test]
    fn commit_checks_previous_root() {
        let store = MemoryDB::default();
        let mut tree = StateTree::new(&store);
        let registry = CodeRegistry::new();
        let addr = Address::new_id(100).unwrap();
        install_actor(&mut tree, &addr);

        let mut ctx = InvocationContext::new(&registry, &mut tree, &store, test_msg(&addr));

        let first = ctx.put(&Serialized::new(vec![1])).unwrap();
        ctx.state_commit(&EMPTY_ARR_CID, first).unwrap();

        // successful commit replaced the root with exactly the new cid
        let second = ctx.put(&Serialized::new(vec![2])).unwrap();
        ctx.state_commit(&first, second).unwrap();

        // a stale previous root must fail without touching the root
        let third = ctx.put(&Serialized::new(vec![3])).unwrap();
        let err = ctx.state_commit(&first, third).unwrap_err();
        assert!(err.is_fatal());

        drop(ctx);
        let act = tree.get_actor(&addr).unwrap().unwrap();
        assert_eq!(act.state, second);
    }

    #[test]
    fn create_requires_uninitialized_root() {
        let store = MemoryDB::default();
        let mut tree = StateTree::new(&store);
        let registry = CodeRegistry::new();
        let addr = Address::new_id(100).unwrap();
        install_actor(&mut tree, &addr);

        let mut ctx = InvocationContext::new(&registry, &mut tree, &store, test_msg(&addr));
        ctx.create(&Serialized::new(vec![9])).unwrap();

        // the instance is initialized now, so a second first-commit is a
        // sequencing fault
        let err = ctx.create(&Serialized::new(vec![10])).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn message_exposes_invocation_details() {
        let store = MemoryDB::default();
        let mut tree = StateTree::new(&store);
        let registry = CodeRegistry::new();
        let addr = Address::new_id(100).unwrap();
        install_actor(&mut tree, &addr);

        let ctx = InvocationContext::new(&registry, &mut tree, &store, test_msg(&addr));
        assert_eq!(ctx.message().caller, Address::new_id(1).unwrap());
        assert_eq!(ctx.message().receiver, addr);
        assert_eq!(ctx.message().method, MethodNum::new(0));
        assert!(ctx.message().value_received.is_zero());
    }

    #[test]
    fn state_reads_current_record() {
        let store = MemoryDB::default();
        let mut tree = StateTree::new(&store);
        let registry = CodeRegistry::new();
        let addr = Address::new_id(100).unwrap();
        install_actor(&mut tree, &addr);

        let mut ctx = InvocationContext::new(&registry, &mut tree, &store, test_msg(&addr));
        ctx.create(&Serialized::new(vec![4, 2])).unwrap();
        assert_eq!(ctx.state::<Serialized>().unwrap(), Serialized::new(vec![4, 2]));
    }
}
