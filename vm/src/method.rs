// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;
use std::ops::Deref;

use encoding::{de, from_slice, ser, serde_bytes, to_vec, Cbor, Error as EncodingError};
use serde::{Deserialize, Serialize};

/// Method number indicator for calling actor methods
#[derive(
    Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize,
)]
pub struct MethodNum(u64);

impl MethodNum {
    /// Constructor for new MethodNum
    pub const fn new(num: u64) -> Self {
        Self(num)
    }
}

impl fmt::Display for MethodNum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<MethodNum> for u64 {
    fn from(method_num: MethodNum) -> u64 {
        method_num.0
    }
}

/// Method number reserved for actor constructors.
pub const METHOD_CONSTRUCTOR: u64 = 0;

/// Serialized bytes to be used as parameters into actor methods
#[derive(Default, Clone, PartialEq, Eq, Debug)]
pub struct Serialized {
    bytes: Vec<u8>,
}

impl ser::Serialize for Serialized {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        let value = serde_bytes::Bytes::new(&self.bytes);
        serde_bytes::Serialize::serialize(value, s)
    }
}

impl<'de> de::Deserialize<'de> for Serialized {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: de::Deserializer<'de>,
    {
        let bz: Vec<u8> = serde_bytes::Deserialize::deserialize(deserializer)?;
        Ok(Serialized::new(bz))
    }
}

impl Cbor for Serialized {}

impl Deref for Serialized {
    type Target = Vec<u8>;
    fn deref(&self) -> &Self::Target {
        &self.bytes
    }
}

impl Serialized {
    /// Constructor if data is encoded already
    pub fn new(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    /// Constructor for encoding a Cbor encodable structure.
    pub fn serialize<O: ser::Serialize>(obj: O) -> Result<Self, EncodingError> {
        Ok(Self {
            bytes: to_vec(&obj)?,
        })
    }

    /// Returns serialized bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Deserializes the serialized bytes into a defined type.
    pub fn deserialize<O: de::DeserializeOwned>(&self) -> Result<O, EncodingError> {
        from_slice(&self.bytes)
    }
}

/// Raw parameter (or return value) list of one invocation: one serialized
/// element per declared abi type, in signature order.
#[derive(Default, Clone, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MethodParams(pub Vec<Serialized>);

impl MethodParams {
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Cbor for MethodParams {}
