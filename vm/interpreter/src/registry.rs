// Copyright 2019-2022 ChainSafe Systems
// SPDX-License-Identifier: Apache-2.0, MIT

use std::collections::{BTreeMap, HashMap};

use cid::Cid;
use log::trace;
use vm::abi::{FunctionSignature, Value};
use vm::{actor_error, ActorError, MethodNum};

use crate::context::InvocationContext;

/// Table of exported method signatures for one actor kind. Ordered so that
/// iteration is deterministic.
pub type Exports = BTreeMap<MethodNum, FunctionSignature>;

/// A bound actor method: a direct, statically-typed dispatch entry built at
/// registration time.
pub type MethodFn<BS> = fn(
    &mut InvocationContext<'_, '_, BS>,
    &[Value],
) -> Result<Vec<Value>, ActorError>;

/// Dispatch table binding each exported method number to its implementation.
pub type MethodTable<BS> = BTreeMap<MethodNum, MethodFn<BS>>;

/// The immutable code template of one actor kind: exported signatures plus
/// the dispatch table. One template is shared by every instance of the kind
/// and owns no per-instance state.
#[derive(Debug)]
pub struct ActorCode<BS> {
    exports: Exports,
    methods: MethodTable<BS>,
}

impl<BS> ActorCode<BS> {
    /// Builds a template. The signature table and the method table must
    /// export exactly the same method numbers; a mismatch is a build
    /// inconsistency, not a reachable on-chain condition.
    pub fn new(exports: Exports, methods: MethodTable<BS>) -> Result<Self, ActorError> {
        if !exports.keys().eq(methods.keys()) {
            return Err(actor_error!(fatal(
                "actor code exports and method table disagree on method numbers"
            )));
        }
        Ok(Self { exports, methods })
    }

    /// Exported signature for a method number.
    pub fn signature(&self, method: MethodNum) -> Option<&FunctionSignature> {
        self.exports.get(&method)
    }

    /// Bound implementation for a method number.
    pub fn method(&self, method: MethodNum) -> Option<MethodFn<BS>> {
        self.methods.get(&method).copied()
    }

    pub fn exports(&self) -> &Exports {
        &self.exports
    }
}

/// Registry mapping actor code identity to its template. Populated once
/// before block processing begins; read-only afterwards, so concurrent
/// readers need no locking.
pub struct CodeRegistry<BS> {
    codes: HashMap<Cid, ActorCode<BS>>,
}

impl<BS> Default for CodeRegistry<BS> {
    fn default() -> Self {
        Self {
            codes: HashMap::new(),
        }
    }
}

impl<BS> CodeRegistry<BS> {
    pub fn new() -> Self {
        Default::default()
    }

    /// Registers an actor kind. Append-only: re-registering the same code id
    /// with an identical signature table is a no-op, while different content
    /// signals a build/config inconsistency and is fatal.
    pub fn register(&mut self, code: Cid, actor: ActorCode<BS>) -> Result<(), ActorError> {
        if let Some(existing) = self.codes.get(&code) {
            if existing.exports == actor.exports {
                return Ok(());
            }
            return Err(actor_error!(fatal(
                "conflicting registration for actor code {}",
                code
            )));
        }
        trace!("registered actor code {}", code);
        self.codes.insert(code, actor);
        Ok(())
    }

    /// Resolves a code id to its template. Unknown code referenced from a
    /// consistent state tree is unreachable, hence fatal rather than a
    /// caller-visible revert.
    pub fn lookup(&self, code: &Cid) -> Result<&ActorCode<BS>, ActorError> {
        self.codes
            .get(code)
            .ok_or_else(|| actor_error!(fatal("unknown actor code {}", code)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ipld_blockstore::MemoryDB;
    use vm::abi::Type;

    fn noop(
        _: &mut InvocationContext<'_, '_, MemoryDB>,
        _: &[Value],
    ) -> Result<Vec<Value>, ActorError> {
        Ok(vec![])
    }

    fn exports() -> Exports {
        BTreeMap::from([(
            MethodNum::new(0),
            FunctionSignature::new(vec![Type::Address], vec![]),
        )])
    }

    fn methods() -> MethodTable<MemoryDB> {
        BTreeMap::from([(MethodNum::new(0), noop as MethodFn<MemoryDB>)])
    }

    fn code(name: &[u8]) -> Cid {
        encoding::new_from_cbor(name)
    }

    #[test]
    fn lookup_unknown_code_is_fatal() {
        let registry: CodeRegistry<MemoryDB> = CodeRegistry::new();
        let err = registry.lookup(&code(b"nope")).unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn register_is_idempotent_for_identical_content() {
        let mut registry = CodeRegistry::new();
        let c = code(b"kind");
        registry
            .register(c, ActorCode::new(exports(), methods()).unwrap())
            .unwrap();
        registry
            .register(c, ActorCode::new(exports(), methods()).unwrap())
            .unwrap();
        assert!(registry.lookup(&c).is_ok());
    }

    #[test]
    fn conflicting_reregistration_is_fatal() {
        let mut registry = CodeRegistry::new();
        let c = code(b"kind");
        registry
            .register(c, ActorCode::new(exports(), methods()).unwrap())
            .unwrap();

        let other_exports: Exports = BTreeMap::from([(
            MethodNum::new(0),
            FunctionSignature::new(vec![Type::UInt], vec![]),
        )]);
        let err = registry
            .register(c, ActorCode::new(other_exports, methods()).unwrap())
            .unwrap_err();
        assert!(err.is_fatal());
    }

    #[test]
    fn tables_must_agree_on_method_numbers() {
        let extra: MethodTable<MemoryDB> = BTreeMap::from([
            (MethodNum::new(0), noop as MethodFn<MemoryDB>),
            (MethodNum::new(1), noop as MethodFn<MemoryDB>),
        ]);
        assert!(ActorCode::new(exports(), extra).unwrap_err().is_fatal());
    }
}
