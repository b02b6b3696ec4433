// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use cid::Cid;
use multihash::{Code, MultihashDigest};
use serde::{de, ser};

use crate::errors::{CodecProtocol, Error};

/// dag-cbor multicodec identifier.
pub const DAG_CBOR: u64 = 0x71;

/// Serializes an object into dag-cbor bytes.
pub fn to_vec<S: ser::Serialize>(obj: &S) -> Result<Vec<u8>, Error> {
    serde_ipld_dagcbor::to_vec(obj).map_err(|e| Error::Marshalling {
        description: e.to_string(),
        protocol: CodecProtocol::Cbor,
    })
}

/// Deserializes an object from dag-cbor bytes.
pub fn from_slice<'de, T: de::Deserialize<'de>>(bz: &'de [u8]) -> Result<T, Error> {
    serde_ipld_dagcbor::from_slice(bz).map_err(|e| Error::Unmarshalling {
        description: e.to_string(),
        protocol: CodecProtocol::Cbor,
    })
}

/// Content identifier of already encoded cbor bytes.
pub fn new_from_cbor(bz: &[u8]) -> Cid {
    Cid::new_v1(DAG_CBOR, Code::Blake2b256.digest(bz))
}

/// Cbor utility functions for serializable objects
pub trait Cbor: ser::Serialize + de::DeserializeOwned {
    /// Marshalls cbor encodable object into cbor bytes
    fn marshal_cbor(&self) -> Result<Vec<u8>, Error> {
        to_vec(&self)
    }

    /// Unmarshals cbor encoded bytes to object
    fn unmarshal_cbor(bz: &[u8]) -> Result<Self, Error> {
        from_slice(bz)
    }

    /// Returns the content identifier of the object.
    fn cid(&self) -> Result<Cid, Error> {
        Ok(new_from_cbor(&self.marshal_cbor()?))
    }
}
