// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod account;
pub mod puppet;

use cid::Cid;
use lazy_static::lazy_static;
use multihash::{Code, MultihashDigest};

/// raw multicodec identifier, used for builtin code cids.
const RAW: u64 = 0x55;

lazy_static! {
    /// Code identity of the builtin account actor.
    pub static ref ACCOUNT_ACTOR_CODE_ID: Cid = make_builtin(b"grove/1/account");
    /// Code identity of the builtin puppet test actor.
    pub static ref PUPPET_ACTOR_CODE_ID: Cid = make_builtin(b"grove/1/puppet");
}

fn make_builtin(bz: &[u8]) -> Cid {
    Cid::new_v1(RAW, Code::Blake2b256.digest(bz))
}
