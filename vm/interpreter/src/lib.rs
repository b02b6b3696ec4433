// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod context;
mod registry;
mod vm;

pub use self::context::*;
pub use self::registry::*;
pub use self::vm::*;
