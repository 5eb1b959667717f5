//! The ordered rule chain and its extension seam.

use std::rc::Rc;

use sap_ir::{Args, Callable, EvalContext, ScopeRef, Value};

use crate::classify::builtin_rules;

/// One classifier rule: a built-in function or a user hook.
pub enum Rule {
    /// A built-in rule. Takes the whole set so structured rules can
    /// classify their sub-words through the full chain.
    Builtin {
        name: &'static str,
        run: fn(&RuleSet, &str) -> Option<Value>,
    },
    /// A rule installed at runtime.
    User(UserRule),
}

impl Rule {
    pub(crate) fn builtin(name: &'static str, run: fn(&RuleSet, &str) -> Option<Value>) -> Self {
        Rule::Builtin { name, run }
    }

    fn name(&self) -> &str {
        match self {
            Rule::Builtin { name, .. } => name,
            Rule::User(user) => &user.name,
        }
    }

    fn apply(&self, set: &RuleSet, word: &str) -> Option<Value> {
        match self {
            Rule::Builtin { run, .. } => run(set, word),
            Rule::User(user) => user.apply(word),
        }
    }
}

/// A classifier rule backed by an evaluated callable.
///
/// The hook receives the verbatim word as a string and answers with a
/// match value, or the absence value for a definite no-match. It runs in
/// the scope it was registered with, through the evaluation context that
/// registered it.
pub struct UserRule {
    name: String,
    hook: Callable,
    scope: ScopeRef,
    cx: Rc<dyn EvalContext>,
}

impl UserRule {
    /// Package a callable as a classifier rule.
    pub fn new(
        name: impl Into<String>,
        hook: Callable,
        scope: ScopeRef,
        cx: Rc<dyn EvalContext>,
    ) -> Self {
        UserRule {
            name: name.into(),
            hook,
            scope,
            cx,
        }
    }

    /// A failing hook is a no-match, not a parse failure; the word still
    /// falls through to later rules.
    fn apply(&self, word: &str) -> Option<Value> {
        let items = [Value::string(word)];
        let mut args = Args::new(&items);
        match self.hook.invoke(self.cx.as_ref(), &self.scope, &mut args) {
            Ok(Value::None) => None,
            Ok(value) => Some(value),
            Err(err) => {
                tracing::warn!(rule = %self.name, error = %err, "reader rule failed");
                None
            }
        }
    }
}

/// The ordered rule chain. First match wins; a word no rule claims is a
/// plain identifier.
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    /// The built-in chain, in priority order.
    pub fn standard() -> Self {
        RuleSet {
            rules: builtin_rules(),
        }
    }

    /// Append a user rule after everything already registered.
    pub fn register(&mut self, rule: UserRule) {
        self.rules.push(Rule::User(rule));
    }

    /// Classify one verbatim word.
    pub fn classify(&self, word: &str) -> Value {
        for rule in &self.rules {
            if let Some(value) = rule.apply(self, word) {
                tracing::trace!(rule = rule.name(), word, "classified");
                return value;
            }
        }
        Value::ident(word)
    }
}

impl Default for RuleSet {
    fn default() -> Self {
        RuleSet::standard()
    }
}
