// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod errors;
mod protocol;

pub use self::errors::Error;
pub use self::protocol::Protocol;

use std::fmt;

use encoding::{blake2b_variable, serde_bytes, Cbor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Length of the payload hash for Secp256k1 and Actor addresses.
pub const PAYLOAD_HASH_LEN: usize = 20;
/// Length of a BLS public key payload.
pub const BLS_PUB_LEN: usize = 48;

/// Address is the struct that defines the protocol and data payload conversion from either
/// a public key or value
#[derive(PartialEq, Eq, PartialOrd, Ord, Clone, Debug, Hash)]
pub struct Address {
    protocol: Protocol,
    payload: Vec<u8>,
}

impl Address {
    /// Address constructor
    fn new(protocol: Protocol, payload: Vec<u8>) -> Result<Self, Error> {
        // Validates the data satisfies the protocol specifications
        match protocol {
            Protocol::ID => (),
            Protocol::Secp256k1 | Protocol::Actor => {
                if payload.len() != PAYLOAD_HASH_LEN {
                    return Err(Error::InvalidPayloadLength(payload.len()));
                }
            }
            Protocol::BLS => {
                if payload.len() != BLS_PUB_LEN {
                    return Err(Error::InvalidBLSLength(payload.len()));
                }
            }
        }

        Ok(Self { protocol, payload })
    }

    /// Creates address from encoded bytes (protocol byte followed by payload).
    pub fn from_bytes(bz: &[u8]) -> Result<Self, Error> {
        if bz.len() < 2 {
            return Err(Error::InvalidLength);
        }
        let protocol = Protocol::from_byte(bz[0]).ok_or(Error::UnknownProtocol)?;
        Address::new(protocol, bz[1..].to_vec())
    }

    /// Generates new address using ID protocol.
    pub fn new_id(id: u64) -> Result<Self, Error> {
        let mut payload = Vec::new();
        leb128::write::unsigned(&mut payload, id)?;
        Ok(Self {
            protocol: Protocol::ID,
            payload,
        })
    }

    /// Generates new address using Secp256k1 pubkey.
    pub fn new_secp256k1(pubkey: &[u8]) -> Result<Self, Error> {
        Address::new(Protocol::Secp256k1, address_hash(pubkey))
    }

    /// Generates new address using the Actor protocol.
    pub fn new_actor(data: &[u8]) -> Result<Self, Error> {
        Address::new(Protocol::Actor, address_hash(data))
    }

    /// Generates new address using BLS pubkey.
    pub fn new_bls(pubkey: &[u8]) -> Result<Self, Error> {
        Address::new(Protocol::BLS, pubkey.to_vec())
    }

    /// Returns protocol for Address
    pub fn protocol(&self) -> Protocol {
        self.protocol
    }

    /// Returns data payload of Address
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns encoded bytes of Address: protocol byte followed by payload.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bz = Vec::with_capacity(self.payload.len() + 1);
        bz.push(self.protocol as u8);
        bz.extend_from_slice(&self.payload);
        bz
    }

    /// Returns the actor id for an ID protocol address.
    pub fn id(&self) -> Result<u64, Error> {
        if self.protocol != Protocol::ID {
            return Err(Error::InvalidPayload);
        }
        leb128::read::unsigned(&mut &self.payload[..]).map_err(|_| Error::InvalidPayload)
    }
}

impl fmt::Display for Address {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.protocol)?;
        for b in &self.payload {
            write!(f, "{:02x}", b)?;
        }
        Ok(())
    }
}

impl Serialize for Address {
    fn serialize<S>(&self, s: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let bz = self.to_bytes();
        serde_bytes::Serialize::serialize(serde_bytes::Bytes::new(&bz), s)
    }
}

impl<'de> Deserialize<'de> for Address {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let bz: Vec<u8> = serde_bytes::Deserialize::deserialize(deserializer)?;
        Address::from_bytes(&bz).map_err(serde::de::Error::custom)
    }
}

impl Cbor for Address {}

/// Returns an address hash for given data
fn address_hash(ingest: &[u8]) -> Vec<u8> {
    blake2b_variable(ingest, PAYLOAD_HASH_LEN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding::{from_slice, to_vec};

    #[test]
    fn key_protocols_hash_payload() {
        let addr = Address::new_secp256k1(&[5u8; 65]).unwrap();
        assert_eq!(addr.protocol(), Protocol::Secp256k1);
        assert_eq!(addr.payload().len(), PAYLOAD_HASH_LEN);

        let addr = Address::new_actor(b"actor creation data").unwrap();
        assert_eq!(addr.protocol(), Protocol::Actor);
        assert_eq!(addr.payload().len(), PAYLOAD_HASH_LEN);
    }

    #[test]
    fn bls_payload_length_checked() {
        assert_eq!(
            Address::new_bls(&[1u8; 10]),
            Err(Error::InvalidBLSLength(10))
        );
        let addr = Address::new_bls(&[1u8; BLS_PUB_LEN]).unwrap();
        assert_eq!(addr.payload(), &[1u8; BLS_PUB_LEN][..]);
    }

    #[test]
    fn id_addresses_roundtrip() {
        let addr = Address::new_id(12512063).unwrap();
        assert_eq!(addr.id().unwrap(), 12512063);
        assert_eq!(Address::from_bytes(&addr.to_bytes()).unwrap(), addr);
    }

    #[test]
    fn byte_form_rejects_unknown_protocol() {
        assert_eq!(Address::from_bytes(&[7, 1, 2]), Err(Error::UnknownProtocol));
        assert_eq!(Address::from_bytes(&[1]), Err(Error::InvalidLength));
    }

    #[test]
    fn cbor_roundtrip() {
        let addr = Address::new_secp256k1(&[9u8; 65]).unwrap();
        let bz = to_vec(&addr).unwrap();
        assert_eq!(from_slice::<Address>(&bz).unwrap(), addr);
    }
}
