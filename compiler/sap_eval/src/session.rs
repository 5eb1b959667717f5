//! One compilation pass, end to end.
//!
//! A `Session` ties together the three mutable pieces of a pass: the
//! classifier rule chain, the root scope with the standard forms, and the
//! evaluator. Sessions are independent; compiling files in parallel means
//! one session per file, with no shared mutable state between them.
//!
//! Rule registration is a setup-phase operation. Parsing borrows the chain
//! immutably for its whole duration, so a registration attempted from
//! inside a parse (a reader rule trying to install another reader rule)
//! is refused with `RegistrationClosed` instead of racing.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use sap_diagnostic::Diagnostic;
use sap_ir::{
    registration_closed, shape_mismatch, Callable, EvalContext, EvalError, EvalResult, ScopeRef,
    Value,
};
use sap_parse::{parse_source, ParseError, RuleSet, UserRule};

use crate::builtins;
use crate::diagnostics::diagnose;
use crate::evaluator::{Evaluator, MissPolicy};

/// Anything that can go wrong between source text and final value.
#[derive(Clone, Eq, PartialEq, Debug)]
pub enum CompileError {
    /// The front end rejected the source.
    Parse(ParseError),
    /// Evaluation of a parsed form failed.
    Eval(EvalError),
}

impl CompileError {
    /// Render as a diagnostic for reporting.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            CompileError::Parse(err) => err.to_diagnostic(),
            CompileError::Eval(err) => diagnose(err),
        }
    }
}

impl From<ParseError> for CompileError {
    fn from(err: ParseError) -> Self {
        CompileError::Parse(err)
    }
}

impl From<EvalError> for CompileError {
    fn from(err: EvalError) -> Self {
        CompileError::Eval(err)
    }
}

impl fmt::Display for CompileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompileError::Parse(err) => err.fmt(f),
            CompileError::Eval(err) => err.fmt(f),
        }
    }
}

impl std::error::Error for CompileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CompileError::Parse(err) => Some(err),
            CompileError::Eval(err) => Some(err),
        }
    }
}

/// A compilation pass: rule chain, root scope, evaluator.
pub struct Session {
    rules: Rc<RefCell<RuleSet>>,
    root: ScopeRef,
    eval: Rc<Evaluator>,
}

impl Session {
    /// Create a session with the standard rules and forms and the given
    /// lookup-miss policy.
    pub fn new(policy: MissPolicy) -> Self {
        let session = Session {
            rules: Rc::new(RefCell::new(RuleSet::standard())),
            root: builtins::root_scope(),
            eval: Rc::new(Evaluator::new(policy)),
        };
        session.install_rule_builtin();
        session
    }

    /// The root scope. Hosts install their own callables here.
    pub fn root(&self) -> ScopeRef {
        self.root.clone()
    }

    /// The evaluation context, for packaging host-side reader rules.
    pub fn context(&self) -> Rc<dyn EvalContext> {
        Rc::clone(&self.eval) as Rc<dyn EvalContext>
    }

    /// Append a reader rule from host code.
    ///
    /// # Errors
    ///
    /// `RegistrationClosed` when a parse is in progress.
    pub fn register_rule(&self, rule: UserRule) -> Result<(), EvalError> {
        let mut chain = self.rules.try_borrow_mut().map_err(|_| registration_closed())?;
        chain.register(rule);
        Ok(())
    }

    /// Parse one file with the current rule chain.
    pub fn parse(&self, source: &str) -> Result<Value, ParseError> {
        let rules = self.rules.borrow();
        parse_source(source, &rules)
    }

    /// Evaluate one form against a scope.
    pub fn eval_form(&self, form: &Value, scope: &ScopeRef) -> EvalResult {
        self.eval.eval(form, scope)
    }

    /// Parse a file and evaluate its top-level forms in order, in a fresh
    /// scope under the root. Returns the last form's value.
    pub fn eval_file(&self, source: &str) -> Result<Value, CompileError> {
        let tree = self.parse(source)?;
        let scope = self.root.child();
        let mut last = Value::None;
        for form in tree.items().iter().skip(1) {
            last = self.eval.eval(form, &scope)?;
        }
        Ok(last)
    }

    /// `(install-rule name hook)` — the in-language face of
    /// [`Session::register_rule`], so evaluated source can extend the
    /// reader before later files are parsed.
    fn install_rule_builtin(&self) {
        let rules = Rc::clone(&self.rules);
        let cx = Rc::clone(&self.eval);
        let install = Callable::new("install-rule", move |outer: &dyn EvalContext, scope, args| {
            let name = match outer.eval(args.expect_next("a rule name")?, scope)? {
                Value::Str(name) => name,
                other => return Err(shape_mismatch("a rule name string", &other)),
            };
            let hook = match outer.eval(args.expect_next("a rule hook")?, scope)? {
                Value::Callable(hook) => hook,
                other => return Err(shape_mismatch("a callable rule hook", &other)),
            };
            let mut chain = rules.try_borrow_mut().map_err(|_| registration_closed())?;
            chain.register(UserRule::new(
                name.as_str(),
                hook,
                scope.clone(),
                Rc::clone(&cx) as Rc<dyn EvalContext>,
            ));
            Ok(Value::None)
        });
        self.root.store("install-rule", Value::Callable(install));
    }

    #[cfg(test)]
    pub(crate) fn rules_handle(&self) -> Rc<RefCell<RuleSet>> {
        Rc::clone(&self.rules)
    }
}
