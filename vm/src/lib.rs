// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

pub mod abi;
mod actor_state;
mod error;
mod exit_code;
mod invoc;
mod method;
mod token;

pub use self::actor_state::*;
pub use self::error::*;
pub use self::exit_code::*;
pub use self::invoc::*;
pub use self::method::*;
pub use self::token::*;

use cid::Cid;
use encoding::new_from_cbor;
use lazy_static::lazy_static;

lazy_static! {
    /// Cid of the empty cbor array, the state root of every actor instance
    /// before its constructor commits.
    pub static ref EMPTY_ARR_CID: Cid = new_from_cbor(&[0x80]);
}
