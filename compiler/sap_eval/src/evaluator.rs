//! The core evaluation loop.
//!
//! Three rules, no special cases: leaves evaluate to themselves,
//! identifiers by scope lookup, sequences by evaluating the head and
//! invoking it with the unevaluated remainder. Special forms are ordinary
//! callables in the scope chain, so the loop never grows a case split.

use sap_ir::{undefined_name, Callable, EvalContext, EvalResult, ScopeRef, Seq, Value};

/// What to do when an identifier is not found anywhere in the chain.
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum MissPolicy {
    /// Wrap the name as a deferred call placeholder. The compile pass
    /// default: forward references and host-provided names still produce
    /// a residual form instead of failing.
    Defer,
    /// Fail with an undefined-name error. The macro pass uses this; an
    /// unresolved name inside an expansion is a bug, not a residual.
    Fail,
}

/// A single-threaded, synchronous evaluator with a fixed miss policy.
pub struct Evaluator {
    policy: MissPolicy,
}

impl Evaluator {
    /// Create an evaluator with the given lookup-miss policy.
    pub fn new(policy: MissPolicy) -> Self {
        Evaluator { policy }
    }

    /// The active lookup-miss policy.
    pub fn policy(&self) -> MissPolicy {
        self.policy
    }

    fn lookup(&self, name: &str, scope: &ScopeRef) -> EvalResult {
        match scope.lookup(name) {
            Some(value) => Ok(value),
            None => match self.policy {
                MissPolicy::Defer => Ok(Value::Callable(deferred_call(name))),
                MissPolicy::Fail => Err(undefined_name(name)),
            },
        }
    }

    fn apply(&self, seq: &Seq, scope: &ScopeRef) -> EvalResult {
        let Some(head) = seq.head() else {
            return Ok(Value::None);
        };
        let head = self.eval(head, scope)?;
        let Value::Callable(callable) = head else {
            // A sequence headed by a non-callable is a silent no-op.
            return Ok(Value::None);
        };
        let mut args = sap_ir::Args::new(seq.rest());
        callable.invoke(self, scope, &mut args)
    }
}

impl EvalContext for Evaluator {
    fn eval(&self, value: &Value, scope: &ScopeRef) -> EvalResult {
        match value {
            Value::Ident(name) => self.lookup(name, scope),
            Value::Seq(seq) => self.apply(seq, scope),
            leaf => Ok(leaf.clone()),
        }
    }
}

/// Placeholder for a name unresolved at compile time. Invoking it
/// evaluates the arguments eagerly and rebuilds the call form around the
/// bare name, yielding a residual for a later pass (or the host) to
/// resolve.
fn deferred_call(name: &str) -> Callable {
    let deferred_name = name.to_owned();
    Callable::new(name, move |cx, scope, args| {
        let mut residual = vec![Value::ident(deferred_name.clone())];
        for arg in args.remaining() {
            residual.push(cx.eval(arg, scope)?);
        }
        Ok(Value::seq(residual))
    })
}
