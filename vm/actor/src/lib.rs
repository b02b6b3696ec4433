// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod builtin;

pub use self::builtin::*;
pub use vm::{actor_error, ActorError, ActorState, ExitCode, Serialized, TokenAmount};
