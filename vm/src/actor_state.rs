// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use cid::Cid;
use encoding::tuple::*;
use encoding::Cbor;

use crate::TokenAmount;

/// State of all actor implementations: the per-instance record pointing at
/// the shared code template and the instance's committed state root.
#[derive(PartialEq, Eq, Clone, Debug, Serialize_tuple, Deserialize_tuple)]
pub struct ActorState {
    /// Identity of the code template this actor executes.
    pub code: Cid,
    /// Cid of the current committed state record.
    pub state: Cid,
    /// Balance of tokens held.
    pub balance: TokenAmount,
    /// Sequence of messages sent from this actor.
    pub sequence: u64,
}

impl Cbor for ActorState {}

impl ActorState {
    /// Constructor for actor state
    pub fn new(code: Cid, state: Cid, balance: TokenAmount, sequence: u64) -> Self {
        Self {
            code,
            state,
            balance,
            sequence,
        }
    }

    /// Safely deducts funds from an Actor
    pub fn deduct_funds(&mut self, amt: &TokenAmount) -> Result<(), String> {
        if &self.balance < amt {
            return Err("Not enough funds".to_owned());
        }
        self.balance -= amt;
        Ok(())
    }

    /// Deposits funds to an Actor
    pub fn deposit_funds(&mut self, amt: &TokenAmount) {
        self.balance += amt;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::EMPTY_ARR_CID;
    use encoding::{from_slice, to_vec};

    fn dummy() -> ActorState {
        ActorState::new(
            encoding::new_from_cbor(b"code"),
            *EMPTY_ARR_CID,
            TokenAmount::new(100),
            0,
        )
    }

    #[test]
    fn funds_accounting() {
        let mut act = dummy();
        act.deduct_funds(&TokenAmount::new(40)).unwrap();
        assert_eq!(act.balance, TokenAmount::new(60));
        act.deposit_funds(&TokenAmount::new(1));
        assert_eq!(act.balance, TokenAmount::new(61));

        assert!(act.deduct_funds(&TokenAmount::new(100)).is_err());
        assert_eq!(act.balance, TokenAmount::new(61));
    }

    #[test]
    fn cbor_roundtrip() {
        let act = dummy();
        let enc = to_vec(&act).unwrap();
        assert_eq!(from_slice::<ActorState>(&enc).unwrap(), act);
    }
}
