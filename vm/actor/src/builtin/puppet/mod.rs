// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

//! Test-support actor driving the invocation machinery end to end: commit
//! sequencing, aborts with chosen codes and nested sends.

use std::collections::BTreeMap;

use address::Address;
use encoding::tuple::*;
use encoding::Cbor;
use interpreter::{Exports, InvocationContext, MethodFn, MethodTable};
use ipld_blockstore::BlockStore;
use num_traits::FromPrimitive;
use vm::abi::{self, FunctionSignature, Type, Value};
use vm::{actor_error, ActorError, ExitCode, MethodNum, TokenAmount, METHOD_CONSTRUCTOR};

/// Puppet actor methods available
#[repr(u64)]
pub enum Method {
    Constructor = METHOD_CONSTRUCTOR,
    PutValue = 1,
    GetValue = 2,
    Fail = 3,
    PutValueThenFail = 4,
    Send = 5,
}

#[derive(Default, PartialEq, Eq, Clone, Debug, Serialize_tuple, Deserialize_tuple)]
pub struct State {
    #[serde(with = "serde_bytes")]
    pub value: Vec<u8>,
}

impl Cbor for State {}

/// Puppet Actor
pub struct Actor;

impl Actor {
    fn constructor<BS: BlockStore>(
        ctx: &mut InvocationContext<'_, '_, BS>,
    ) -> Result<(), ActorError> {
        ctx.create(&State::default())?;
        Ok(())
    }

    fn put_value<BS: BlockStore>(
        ctx: &mut InvocationContext<'_, '_, BS>,
        value: Vec<u8>,
    ) -> Result<(), ActorError> {
        ctx.transaction(|st: &mut State, _| {
            st.value = value;
            Ok(())
        })
    }

    fn get_value<BS: BlockStore>(
        ctx: &mut InvocationContext<'_, '_, BS>,
    ) -> Result<Vec<u8>, ActorError> {
        Ok(ctx.state::<State>()?.value)
    }

    /// Aborts with the requested exit code. Success and unassigned codes
    /// cannot be aborted with; asking for one is ordinary caller error.
    fn fail<BS: BlockStore>(
        _ctx: &mut InvocationContext<'_, '_, BS>,
        code: u64,
    ) -> Result<(), ActorError> {
        let code = ExitCode::from_u64(code)
            .filter(|c| !c.is_success())
            .ok_or_else(|| actor_error!(ErrIllegalArgument; "cannot abort with exit code {}", code))?;
        Err(ActorError::new(code, "aborted by request".to_owned()))
    }

    /// Commits a new value, then aborts. The dispatcher must discard the
    /// committed mutation when unwinding the revert.
    fn put_value_then_fail<BS: BlockStore>(
        ctx: &mut InvocationContext<'_, '_, BS>,
        value: Vec<u8>,
    ) -> Result<(), ActorError> {
        Self::put_value(ctx, value)?;
        Err(actor_error!(ErrIllegalState; "aborted after commit"))
    }

    /// Forwards a payload to another puppet instance via a nested send.
    fn send<BS: BlockStore>(
        ctx: &mut InvocationContext<'_, '_, BS>,
        to: Address,
        payload: Vec<u8>,
    ) -> Result<(), ActorError> {
        let params = abi::encode_values(&[Value::Bytes(payload)])
            .map_err(|e| actor_error!(fatal("failed to marshal nested call parameters: {}", e)))?;
        ctx.send(
            to,
            MethodNum::new(Method::PutValue as u64),
            params,
            TokenAmount::default(),
        )?;
        Ok(())
    }
}

/// Exported method signatures of the puppet actor.
pub fn exports() -> Exports {
    BTreeMap::from([
        (
            MethodNum::new(Method::Constructor as u64),
            FunctionSignature::new(vec![], vec![]),
        ),
        (
            MethodNum::new(Method::PutValue as u64),
            FunctionSignature::new(vec![Type::Bytes], vec![]),
        ),
        (
            MethodNum::new(Method::GetValue as u64),
            FunctionSignature::new(vec![], vec![Type::Bytes]),
        ),
        (
            MethodNum::new(Method::Fail as u64),
            FunctionSignature::new(vec![Type::UInt], vec![]),
        ),
        (
            MethodNum::new(Method::PutValueThenFail as u64),
            FunctionSignature::new(vec![Type::Bytes], vec![]),
        ),
        (
            MethodNum::new(Method::Send as u64),
            FunctionSignature::new(vec![Type::Address, Type::Bytes], vec![]),
        ),
    ])
}

/// Dispatch table of the puppet actor, built at registration time.
pub fn methods<BS: BlockStore>() -> MethodTable<BS> {
    BTreeMap::from([
        (
            MethodNum::new(Method::Constructor as u64),
            invoke_constructor::<BS> as MethodFn<BS>,
        ),
        (
            MethodNum::new(Method::PutValue as u64),
            invoke_put_value::<BS> as MethodFn<BS>,
        ),
        (
            MethodNum::new(Method::GetValue as u64),
            invoke_get_value::<BS> as MethodFn<BS>,
        ),
        (
            MethodNum::new(Method::Fail as u64),
            invoke_fail::<BS> as MethodFn<BS>,
        ),
        (
            MethodNum::new(Method::PutValueThenFail as u64),
            invoke_put_value_then_fail::<BS> as MethodFn<BS>,
        ),
        (
            MethodNum::new(Method::Send as u64),
            invoke_send::<BS> as MethodFn<BS>,
        ),
    ])
}

fn signature_mismatch() -> ActorError {
    actor_error!(fatal("parameters do not match declared signature"))
}

fn invoke_constructor<BS: BlockStore>(
    ctx: &mut InvocationContext<'_, '_, BS>,
    params: &[Value],
) -> Result<Vec<Value>, ActorError> {
    match params {
        [] => {
            Actor::constructor(ctx)?;
            Ok(vec![])
        }
        _ => Err(signature_mismatch()),
    }
}

fn invoke_put_value<BS: BlockStore>(
    ctx: &mut InvocationContext<'_, '_, BS>,
    params: &[Value],
) -> Result<Vec<Value>, ActorError> {
    match params {
        [Value::Bytes(bz)] => {
            Actor::put_value(ctx, bz.clone())?;
            Ok(vec![])
        }
        _ => Err(signature_mismatch()),
    }
}

fn invoke_get_value<BS: BlockStore>(
    ctx: &mut InvocationContext<'_, '_, BS>,
    params: &[Value],
) -> Result<Vec<Value>, ActorError> {
    match params {
        [] => Ok(vec![Value::Bytes(Actor::get_value(ctx)?)]),
        _ => Err(signature_mismatch()),
    }
}

fn invoke_fail<BS: BlockStore>(
    ctx: &mut InvocationContext<'_, '_, BS>,
    params: &[Value],
) -> Result<Vec<Value>, ActorError> {
    match params {
        [Value::UInt(code)] => {
            Actor::fail(ctx, *code)?;
            Ok(vec![])
        }
        _ => Err(signature_mismatch()),
    }
}

fn invoke_put_value_then_fail<BS: BlockStore>(
    ctx: &mut InvocationContext<'_, '_, BS>,
    params: &[Value],
) -> Result<Vec<Value>, ActorError> {
    match params {
        [Value::Bytes(bz)] => {
            Actor::put_value_then_fail(ctx, bz.clone())?;
            Ok(vec![])
        }
        _ => Err(signature_mismatch()),
    }
}

fn invoke_send<BS: BlockStore>(
    ctx: &mut InvocationContext<'_, '_, BS>,
    params: &[Value],
) -> Result<Vec<Value>, ActorError> {
    match params {
        [Value::Address(to), Value::Bytes(bz)] => {
            Actor::send(ctx, to.clone(), bz.clone())?;
            Ok(vec![])
        }
        _ => Err(signature_mismatch()),
    }
}
