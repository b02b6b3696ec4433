// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Typed parameters and return values for actor method signatures.
//!
//! Raw invocation parameters arrive as the cbor encoding of a list of byte
//! strings, one element per declared parameter; each element is itself the
//! cbor encoding of the typed value. Returns use the identical framing. The
//! dispatcher decodes parameters against the receiver's declared signature
//! before the method runs, and validates returns after it finishes, so actor
//! code never sees an untyped payload.

use std::fmt;

use address::Address;
use encoding::{serde_bytes, Error as EncodingError};

use crate::{actor_error, ActorError, MethodParams, Serialized};

/// Closed set of types usable in method signatures.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub enum Type {
    Address,
    UInt,
    Bytes,
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::Address => write!(f, "address"),
            Type::UInt => write!(f, "uint"),
            Type::Bytes => write!(f, "bytes"),
        }
    }
}

/// A runtime value inhabiting one abi [`Type`].
#[derive(PartialEq, Eq, Clone, Debug)]
pub enum Value {
    Address(Address),
    UInt(u64),
    Bytes(Vec<u8>),
}

impl Value {
    /// The declared type this value inhabits.
    pub fn type_of(&self) -> Type {
        match self {
            Value::Address(_) => Type::Address,
            Value::UInt(_) => Type::UInt,
            Value::Bytes(_) => Type::Bytes,
        }
    }

    /// Decodes one serialized element against its declared type.
    pub fn unmarshal(t: Type, bz: &Serialized) -> Result<Self, EncodingError> {
        match t {
            Type::Address => Ok(Value::Address(bz.deserialize()?)),
            Type::UInt => Ok(Value::UInt(bz.deserialize()?)),
            Type::Bytes => {
                let buf: serde_bytes::ByteBuf = bz.deserialize()?;
                Ok(Value::Bytes(buf.into_vec()))
            }
        }
    }

    /// Encodes this value as one serialized element.
    pub fn marshal(&self) -> Result<Serialized, EncodingError> {
        match self {
            Value::Address(addr) => Serialized::serialize(addr),
            Value::UInt(num) => Serialized::serialize(num),
            Value::Bytes(bz) => Serialized::serialize(serde_bytes::Bytes::new(bz)),
        }
    }
}

/// Encodes a value list with the parameter wire framing.
pub fn encode_values(values: &[Value]) -> Result<Serialized, EncodingError> {
    let parts = values
        .iter()
        .map(Value::marshal)
        .collect::<Result<Vec<_>, _>>()?;
    Serialized::serialize(MethodParams(parts))
}

/// Signature of one exported actor method. Immutable once registered; used
/// to decode raw parameter bytes before invocation and to validate return
/// values after.
#[derive(PartialEq, Eq, Clone, Debug)]
pub struct FunctionSignature {
    /// Parameter types, in call order.
    pub params: Vec<Type>,
    /// Return types, in return order.
    pub returns: Vec<Type>,
}

impl FunctionSignature {
    pub fn new(params: Vec<Type>, returns: Vec<Type>) -> Self {
        Self { params, returns }
    }

    /// Decodes raw parameter bytes against the declared parameter types. Any
    /// shape mismatch is reachable from untrusted caller input and therefore
    /// a serialization revert, never a fault.
    pub fn decode_params(&self, raw: &Serialized) -> Result<Vec<Value>, ActorError> {
        let parts: MethodParams = raw
            .deserialize()
            .map_err(|e| actor_error!(ErrSerialization; "undecodable parameter payload: {}", e))?;
        if parts.len() != self.params.len() {
            return Err(actor_error!(ErrSerialization;
                "expected {} parameters, got {}", self.params.len(), parts.len()));
        }
        self.params
            .iter()
            .zip(parts.0.iter())
            .map(|(t, bz)| {
                Value::unmarshal(*t, bz).map_err(
                    |e| actor_error!(ErrSerialization; "parameter does not decode as {}: {}", t, e),
                )
            })
            .collect()
    }

    /// Checks method return values against the declared return types. A
    /// mismatch is an implementation bug in the actor, not caller error.
    pub fn validate_return(&self, ret: &[Value]) -> Result<(), ActorError> {
        if ret.len() != self.returns.len() {
            return Err(actor_error!(fatal(
                "method returned {} values, signature declares {}",
                ret.len(),
                self.returns.len()
            )));
        }
        for (t, v) in self.returns.iter().zip(ret) {
            if v.type_of() != *t {
                return Err(actor_error!(fatal(
                    "method return value {:?} does not inhabit declared type {}",
                    v,
                    t
                )));
            }
        }
        Ok(())
    }
}
