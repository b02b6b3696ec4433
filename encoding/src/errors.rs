// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::fmt;
use thiserror::Error;

/// Serialization error
#[derive(Debug, PartialEq, Eq, Error)]
pub enum Error {
    #[error("Failed to marshal {protocol} data: {description}")]
    Marshalling {
        description: String,
        protocol: CodecProtocol,
    },
    #[error("Failed to unmarshal {protocol} data: {description}")]
    Unmarshalling {
        description: String,
        protocol: CodecProtocol,
    },
}

/// Codec the (un)marshalling was attempted with.
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub enum CodecProtocol {
    Cbor,
}

impl fmt::Display for CodecProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CodecProtocol::Cbor => write!(f, "cbor"),
        }
    }
}
