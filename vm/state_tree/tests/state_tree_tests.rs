// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use address::Address;
use ipld_blockstore::MemoryDB;
use state_tree::StateTree;
use vm::{ActorState, TokenAmount, EMPTY_ARR_CID};

fn code_cid(name: &[u8]) -> cid::Cid {
    encoding::new_from_cbor(name)
}

fn new_actor(balance: u64) -> ActorState {
    ActorState::new(
        code_cid(b"test/actor"),
        *EMPTY_ARR_CID,
        TokenAmount::new(balance),
        0,
    )
}

#[test]
fn get_set_roundtrip() {
    let store = MemoryDB::default();
    let mut tree = StateTree::new(&store);
    let addr = Address::new_id(100).unwrap();

    assert_eq!(tree.get_actor(&addr).unwrap(), None);

    let act = new_actor(55);
    tree.set_actor(&addr, act.clone()).unwrap();
    assert_eq!(tree.get_actor(&addr).unwrap(), Some(act));
}

#[test]
fn snapshot_revert_discards_mutations() {
    let store = MemoryDB::default();
    let mut tree = StateTree::new(&store);
    let addr = Address::new_id(1).unwrap();
    tree.set_actor(&addr, new_actor(10)).unwrap();

    tree.snapshot().unwrap();
    tree.set_actor(&addr, new_actor(99)).unwrap();
    assert_eq!(tree.get_actor(&addr).unwrap(), Some(new_actor(99)));

    tree.revert_to_snapshot().unwrap();
    assert_eq!(tree.get_actor(&addr).unwrap(), Some(new_actor(10)));
}

#[test]
fn snapshot_clear_keeps_mutations() {
    let store = MemoryDB::default();
    let mut tree = StateTree::new(&store);
    let addr = Address::new_id(1).unwrap();

    tree.snapshot().unwrap();
    tree.set_actor(&addr, new_actor(7)).unwrap();
    tree.clear_snapshot().unwrap();

    assert_eq!(tree.get_actor(&addr).unwrap(), Some(new_actor(7)));
}

#[test]
fn delete_leaves_tombstone_across_layers() {
    let store = MemoryDB::default();
    let mut tree = StateTree::new(&store);
    let addr = Address::new_id(1).unwrap();
    tree.set_actor(&addr, new_actor(1)).unwrap();

    tree.snapshot().unwrap();
    tree.delete_actor(&addr).unwrap();
    assert_eq!(tree.get_actor(&addr).unwrap(), None);

    tree.clear_snapshot().unwrap();
    assert_eq!(tree.get_actor(&addr).unwrap(), None);
}

#[test]
fn base_layer_cannot_be_dropped() {
    let store = MemoryDB::default();
    let mut tree = StateTree::new(&store);
    assert!(tree.revert_to_snapshot().is_err());
    assert!(tree.clear_snapshot().is_err());
}

#[test]
fn flush_is_deterministic() {
    let store_a = MemoryDB::default();
    let store_b = MemoryDB::default();
    let mut a = StateTree::new(&store_a);
    let mut b = StateTree::new(&store_b);

    // insertion order must not influence the root
    for id in [5u64, 1, 9] {
        a.set_actor(&Address::new_id(id).unwrap(), new_actor(id)).unwrap();
    }
    for id in [9u64, 5, 1] {
        b.set_actor(&Address::new_id(id).unwrap(), new_actor(id)).unwrap();
    }

    assert_eq!(a.flush().unwrap(), b.flush().unwrap());
}

#[test]
fn flush_with_open_snapshot_errors() {
    let store = MemoryDB::default();
    let mut tree = StateTree::new(&store);
    tree.snapshot().unwrap();
    assert!(tree.flush().is_err());
}
