// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use address::Address;
use encoding::tuple::*;
use encoding::Cbor;

/// State includes the address for the actor
#[derive(PartialEq, Eq, Clone, Debug, Serialize_tuple, Deserialize_tuple)]
pub struct State {
    /// Public-key based address which can be used to verify signatures.
    pub address: Address,
}

impl Cbor for State {}
