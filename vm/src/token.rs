// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;
use std::ops::{AddAssign, SubAssign};

use encoding::serde_bytes;
use num_bigint::BigUint;
use num_traits::Zero;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Wrapper around a big int variable to handle token specific functionality.
/// Amounts are unsigned; balances can never go negative.
#[derive(Default, Clone, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct TokenAmount(BigUint);

impl TokenAmount {
    /// Constructor for new TokenAmount
    pub fn new(val: u64) -> Self {
        TokenAmount(BigUint::from(val))
    }

    pub fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl From<u64> for TokenAmount {
    fn from(val: u64) -> Self {
        TokenAmount::new(val)
    }
}

impl From<BigUint> for TokenAmount {
    fn from(val: BigUint) -> Self {
        TokenAmount(val)
    }
}

impl AddAssign<&TokenAmount> for TokenAmount {
    fn add_assign(&mut self, other: &TokenAmount) {
        self.0 += &other.0;
    }
}

/// Callers must check ordering first; big int subtraction underflow panics.
impl SubAssign<&TokenAmount> for TokenAmount {
    fn sub_assign(&mut self, other: &TokenAmount) {
        self.0 -= &other.0;
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Serialized as the unsigned big-endian magnitude bytes; zero is the empty
/// byte string so equal amounts always share one encoding.
impl Serialize for TokenAmount {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let bz = if self.is_zero() {
            Vec::new()
        } else {
            self.0.to_bytes_be()
        };
        serde_bytes::Serialize::serialize(serde_bytes::Bytes::new(&bz), s)
    }
}

impl<'de> Deserialize<'de> for TokenAmount {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bz: Vec<u8> = serde_bytes::Deserialize::deserialize(deserializer)?;
        Ok(TokenAmount(BigUint::from_bytes_be(&bz)))
    }
}
