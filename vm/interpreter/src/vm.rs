// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use address::Address;
use cid::Cid;
use ipld_blockstore::BlockStore;
use log::error;
use state_tree::StateTree;
use vm::{
    abi, actor_error, ActorError, ActorState, ExitOutcome, MethodNum, Serialized, TokenAmount,
    EMPTY_ARR_CID,
};

use crate::context::{InvocationContext, InvocationMessage};
use crate::registry::{ActorCode, CodeRegistry, Exports, MethodTable};

/// Interpreter which routes invocations to registered actor code and
/// produces exactly one ExitOutcome per invocation. Determinism contract:
/// applying the same invocation to the same prior state always yields the
/// same outcome and the same resulting state roots.
pub struct VM<'db, BS> {
    state: StateTree<'db, BS>,
    store: &'db BS,
    registry: CodeRegistry<BS>,
}

impl<'db, BS> VM<'db, BS>
where
    BS: BlockStore,
{
    pub fn new(store: &'db BS) -> Self {
        VM {
            state: StateTree::new(store),
            store,
            registry: CodeRegistry::new(),
        }
    }

    /// Registration entry point; must run before block processing begins.
    pub fn register_actor(
        &mut self,
        code: Cid,
        exports: Exports,
        methods: MethodTable<BS>,
    ) -> Result<(), ActorError> {
        self.registry.register(code, ActorCode::new(exports, methods)?)
    }

    /// Installs a fresh instance of a registered code template. The instance
    /// carries the uninitialized state root until its constructor commits.
    pub fn create_actor(
        &mut self,
        addr: &Address,
        code: Cid,
        balance: TokenAmount,
    ) -> Result<(), ActorError> {
        self.registry.lookup(&code)?;
        if self
            .state
            .get_actor(addr)
            .map_err(|e| actor_error!(fatal("failed to check actor existence: {}", e)))?
            .is_some()
        {
            return Err(actor_error!(fatal("actor already exists at address {}", addr)));
        }
        self.state
            .set_actor(addr, ActorState::new(code, *EMPTY_ARR_CID, balance, 0))
            .map_err(|e| actor_error!(fatal("creating actor entry: {}", e)))
    }

    pub fn state(&self) -> &StateTree<'db, BS> {
        &self.state
    }

    /// Flush state changes and return the deterministic state root.
    pub fn flush(&mut self) -> Result<Cid, ActorError> {
        self.state
            .flush()
            .map_err(|e| actor_error!(fatal("failed to flush state tree: {}", e)))
    }

    /// Invocation entry point: applies one message-level call and folds the
    /// classified result into an ExitOutcome. Reverts and faults both leave
    /// the receiver's committed root and balance untouched; uncommitted puts
    /// simply become unreferenced garbage in the store.
    pub fn invoke(
        &mut self,
        caller: &Address,
        receiver: &Address,
        method: MethodNum,
        params: &Serialized,
        value: TokenAmount,
    ) -> ExitOutcome {
        let msg = InvocationMessage {
            caller: caller.clone(),
            receiver: receiver.clone(),
            method,
            value_received: value,
        };

        if let Err(e) = self.state.snapshot() {
            return ExitOutcome::Fault {
                msg: format!("failed to create snapshot: {}", e),
            };
        }
        let res = apply_invocation(&self.registry, &mut self.state, self.store, &msg, params);
        let finalize = match &res {
            Ok(_) => self.state.clear_snapshot(),
            Err(_) => self.state.revert_to_snapshot(),
        };
        if let Err(e) = finalize {
            return ExitOutcome::Fault {
                msg: format!("failed to finalize snapshot: {}", e),
            };
        }

        let outcome = ExitOutcome::from_result(res);
        if let ExitOutcome::Fault { msg } = &outcome {
            error!(
                "invocation fault (to: {}) (method: {}): {}",
                receiver, method, msg
            );
        }
        outcome
    }
}

/// Applies one invocation frame against the state tree. Used for both the
/// top-level entry point and nested sends; callers manage snapshots.
pub(crate) fn apply_invocation<'db, BS>(
    registry: &CodeRegistry<BS>,
    state: &mut StateTree<'db, BS>,
    store: &'db BS,
    msg: &InvocationMessage,
    raw_params: &Serialized,
) -> Result<Serialized, ActorError>
where
    BS: BlockStore,
{
    let receiver = state
        .get_actor(&msg.receiver)
        .map_err(|e| actor_error!(fatal("failed to get receiver actor: {}", e)))?
        .ok_or_else(
            || actor_error!(SysErrInvalidReceiver; "receiver {} does not exist", msg.receiver),
        )?;

    // Move the transferred value before executing the method.
    if !msg.value_received.is_zero() {
        transfer(state, &msg.caller, &msg.receiver, &msg.value_received)?;
    }

    // Unknown code referenced by a live instance is a registry
    // inconsistency; an unknown method is ordinary caller error.
    let code = registry.lookup(&receiver.code)?;
    let signature = code.signature(msg.method).ok_or_else(|| {
        actor_error!(SysErrInvalidMethod;
            "method {} not found on actor code {}", msg.method, receiver.code)
    })?;
    let method = code.method(msg.method).ok_or_else(|| {
        actor_error!(fatal(
            "signature table and method table out of sync for {}",
            receiver.code
        ))
    })?;

    let params = signature.decode_params(raw_params)?;

    let mut ctx = InvocationContext::new(registry, state, store, msg.clone());
    let ret = method(&mut ctx, &params)?;

    signature.validate_return(&ret)?;
    abi::encode_values(&ret)
        .map_err(|e| actor_error!(fatal("failed to marshal return values: {}", e)))
}

/// Transfers value between two actor instances.
fn transfer<BS>(
    state: &mut StateTree<'_, BS>,
    from: &Address,
    to: &Address,
    value: &TokenAmount,
) -> Result<(), ActorError>
where
    BS: BlockStore,
{
    let mut f = state
        .get_actor(from)
        .map_err(|e| actor_error!(fatal("failed to get sender actor: {}", e)))?
        .ok_or_else(|| actor_error!(SysErrSenderInvalid; "sender {} does not exist", from))?;
    let mut t = state
        .get_actor(to)
        .map_err(|e| actor_error!(fatal("failed to get receiver actor: {}", e)))?
        .ok_or_else(|| {
            actor_error!(fatal("receiver actor does not exist in state during transfer"))
        })?;

    f.deduct_funds(value).map_err(|e| {
        actor_error!(SysErrInsufficientFunds;
            "transfer failed when deducting funds ({}): {}", value, e)
    })?;
    t.deposit_funds(value);

    state
        .set_actor(from, f)
        .map_err(|e| actor_error!(fatal("failed to set sender actor: {}", e)))?;
    state
        .set_actor(to, t)
        .map_err(|e| actor_error!(fatal("failed to set receiver actor: {}", e)))?;

    Ok(())
}
