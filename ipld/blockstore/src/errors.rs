// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use thiserror::Error;

/// Blockstore error
#[derive(Debug, PartialEq, Error)]
pub enum Error {
    #[error("{0}")]
    Encoding(#[from] encoding::Error),
    #[error("Poisoned lock in blockstore")]
    Poisoned,
}
