// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod cbor;
mod errors;
mod hash;

pub use self::cbor::*;
pub use self::errors::*;
pub use self::hash::*;

pub use serde_bytes;

/// serde de/serialization re-exports, to keep a single serde version across
/// all consuming crates.
pub mod ser {
    pub use serde::ser::*;
    pub use serde::Serialize;
}
pub mod de {
    pub use serde::de::*;
    pub use serde::Deserialize;
}

/// Derives for structs encoded as cbor tuples (heterogeneous arrays).
pub mod tuple {
    pub use serde_tuple::{self, Deserialize_tuple, Serialize_tuple};
}

/// Derives for enums encoded as their integer representation.
pub mod repr {
    pub use serde_repr::{Deserialize_repr, Serialize_repr};
}
