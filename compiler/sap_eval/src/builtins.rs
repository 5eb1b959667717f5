//! The standard special forms.
//!
//! Every form here goes through the same lazy apply protocol as user
//! callables: it pulls unevaluated arguments from the cursor and decides
//! itself what to evaluate. `if` and `while` owe their laziness entirely
//! to this; the evaluator gives them no help.
//!
//! A sequence argument to `if` or `while` evaluates as a block: each
//! element in order, last value wins. A single call in a branch therefore
//! needs its own parentheses (`(f x)`), since the branch group itself is
//! the block.

use sap_ir::{
    not_numeric, overflow, shape_mismatch, Args, Callable, EvalContext, EvalResult, ScopeRef,
    Value,
};

type BuiltinFn = fn(&dyn EvalContext, &ScopeRef, &mut Args<'_>) -> EvalResult;

/// A fresh root scope with the standard forms installed.
pub fn root_scope() -> ScopeRef {
    let root = ScopeRef::new_root();
    install(&root);
    root
}

/// Install the standard forms into `scope`.
pub fn install(scope: &ScopeRef) {
    let builtins: [(&str, BuiltinFn); 7] = [
        ("if", if_form),
        ("def", def_form),
        ("quote", quote_form),
        ("do", do_form),
        ("while", while_form),
        ("list", list_form),
        ("sum", sum_form),
    ];
    for (name, fun) in builtins {
        scope.store(name, Value::Callable(Callable::new(name, fun)));
    }
}

/// `(if cond body...)` — strict boolean condition; the body evaluates only
/// when the condition is true.
fn if_form(cx: &dyn EvalContext, scope: &ScopeRef, args: &mut Args<'_>) -> EvalResult {
    let cond = cx.eval(args.expect_next("a condition")?, scope)?;
    let Value::Bool(cond) = cond else {
        return Err(shape_mismatch("a boolean condition", &cond));
    };
    if !cond {
        return Ok(Value::None);
    }
    let mut last = Value::None;
    while let Some(arg) = args.next() {
        last = eval_block(cx, scope, arg)?;
    }
    Ok(last)
}

/// `(def name value)` — the name is consumed as syntax, never evaluated;
/// the value binds in the current scope and is also the result.
fn def_form(cx: &dyn EvalContext, scope: &ScopeRef, args: &mut Args<'_>) -> EvalResult {
    let name = args.expect_ident("a name to define")?.to_owned();
    let value = cx.eval(args.expect_next("a value")?, scope)?;
    scope.store(name, value.clone());
    Ok(value)
}

/// `(quote form)` — the argument as literal syntax.
fn quote_form(_cx: &dyn EvalContext, _scope: &ScopeRef, args: &mut Args<'_>) -> EvalResult {
    Ok(args.next().cloned().unwrap_or(Value::None))
}

/// `(do form...)` — evaluate in order, last value wins.
fn do_form(cx: &dyn EvalContext, scope: &ScopeRef, args: &mut Args<'_>) -> EvalResult {
    let mut last = Value::None;
    while let Some(arg) = args.next() {
        last = cx.eval(arg, scope)?;
    }
    Ok(last)
}

/// `(while cond body...)` — re-evaluates the condition before every pass.
fn while_form(cx: &dyn EvalContext, scope: &ScopeRef, args: &mut Args<'_>) -> EvalResult {
    let cond = args.expect_next("a condition")?.clone();
    let body = args.remaining().to_vec();
    loop {
        let test = cx.eval(&cond, scope)?;
        let Value::Bool(test) = test else {
            return Err(shape_mismatch("a boolean condition", &test));
        };
        if !test {
            return Ok(Value::None);
        }
        for item in &body {
            eval_block(cx, scope, item)?;
        }
    }
}

/// `(list item...)` — evaluate every argument into a fresh sequence.
fn list_form(cx: &dyn EvalContext, scope: &ScopeRef, args: &mut Args<'_>) -> EvalResult {
    let mut items = Vec::with_capacity(args.remaining().len());
    while let Some(arg) = args.next() {
        items.push(cx.eval(arg, scope)?);
    }
    Ok(Value::seq(items))
}

enum NumAcc {
    Int(i64),
    Float(f64),
}

/// `(sum n...)` — numeric fold. Integers until the first float, then
/// floats throughout. Non-numbers and integer overflow are errors rather
/// than silently degrading the result.
fn sum_form(cx: &dyn EvalContext, scope: &ScopeRef, args: &mut Args<'_>) -> EvalResult {
    let mut acc = NumAcc::Int(0);
    while let Some(arg) = args.next() {
        let value = cx.eval(arg, scope)?;
        acc = match (acc, &value) {
            (NumAcc::Int(a), Value::Int(n)) => {
                NumAcc::Int(a.checked_add(*n).ok_or_else(|| overflow("sum"))?)
            }
            (NumAcc::Int(a), Value::Float(x)) => NumAcc::Float(add_floats(int_to_float(a), *x)),
            (NumAcc::Float(a), Value::Int(n)) => NumAcc::Float(add_floats(a, int_to_float(*n))),
            (NumAcc::Float(a), Value::Float(x)) => NumAcc::Float(add_floats(a, *x)),
            (_, other) => return Err(not_numeric(other)),
        };
    }
    Ok(match acc {
        NumAcc::Int(n) => Value::Int(n),
        NumAcc::Float(x) => Value::Float(x),
    })
}

#[allow(clippy::arithmetic_side_effects)]
fn add_floats(a: f64, b: f64) -> f64 {
    a + b
}

#[allow(clippy::cast_precision_loss)]
fn int_to_float(n: i64) -> f64 {
    n as f64
}

/// Evaluate a sequence as a block (each element, last value wins); any
/// other value evaluates normally.
fn eval_block(cx: &dyn EvalContext, scope: &ScopeRef, value: &Value) -> EvalResult {
    let Value::Seq(seq) = value else {
        return cx.eval(value, scope);
    };
    let mut last = Value::None;
    for item in seq.iter() {
        last = cx.eval(item, scope)?;
    }
    Ok(last)
}
