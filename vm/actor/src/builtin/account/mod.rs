// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

mod state;

pub use self::state::State;

use std::collections::BTreeMap;

use address::{Address, Protocol};
use interpreter::{Exports, InvocationContext, MethodFn, MethodTable};
use ipld_blockstore::BlockStore;
use vm::abi::{FunctionSignature, Type, Value};
use vm::{actor_error, ActorError, MethodNum, METHOD_CONSTRUCTOR};

/// Account actor methods available
#[repr(u64)]
pub enum Method {
    Constructor = METHOD_CONSTRUCTOR,
}

/// Account Actor
pub struct Actor;

impl Actor {
    /// Constructor for Account actor: records the public-key address after
    /// checking it uses an externally verifiable key scheme.
    pub fn constructor<BS: BlockStore>(
        ctx: &mut InvocationContext<'_, '_, BS>,
        addr: Address,
    ) -> Result<(), ActorError> {
        match addr.protocol() {
            Protocol::Secp256k1 | Protocol::BLS => {}
            proto => {
                return Err(actor_error!(ErrIllegalArgument;
                    "address must use BLS or SECP256K1 protocol, was: {}", proto));
            }
        }
        ctx.create(&State { address: addr })?;
        Ok(())
    }
}

/// Exported method signatures of the account actor.
pub fn exports() -> Exports {
    BTreeMap::from([(
        MethodNum::new(Method::Constructor as u64),
        FunctionSignature::new(vec![Type::Address], vec![]),
    )])
}

/// Dispatch table of the account actor, built at registration time.
pub fn methods<BS: BlockStore>() -> MethodTable<BS> {
    BTreeMap::from([(
        MethodNum::new(Method::Constructor as u64),
        invoke_constructor::<BS> as MethodFn<BS>,
    )])
}

fn invoke_constructor<BS: BlockStore>(
    ctx: &mut InvocationContext<'_, '_, BS>,
    params: &[Value],
) -> Result<Vec<Value>, ActorError> {
    match params {
        [Value::Address(addr)] => {
            Actor::constructor(ctx, addr.clone())?;
            Ok(vec![])
        }
        _ => Err(actor_error!(fatal(
            "constructor parameters do not match declared signature"
        ))),
    }
}
