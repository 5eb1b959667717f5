//! Pipeline tests: source text all the way through parse and evaluation.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;
use sap_ir::{Callable, Value};
use sap_parse::UserRule;

use crate::{CompileError, MissPolicy, Session};

fn ident(name: &str) -> Value {
    Value::ident(name)
}

fn eval_ok(session: &Session, source: &str) -> Value {
    match session.eval_file(source) {
        Ok(value) => value,
        Err(err) => panic!("eval failed on {source:?}: {err}"),
    }
}

/// Installs a `mark` callable that records every value passed to it and
/// hands the value back.
fn with_mark(session: &Session) -> Rc<RefCell<Vec<Value>>> {
    let log = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&log);
    let mark = Callable::new("mark", move |cx, scope, args| {
        let value = cx.eval(args.expect_next("a value")?, scope)?;
        sink.borrow_mut().push(value.clone());
        Ok(value)
    });
    session.root().store("mark", Value::Callable(mark));
    log
}

#[test]
fn literals_evaluate_to_themselves() {
    let session = Session::new(MissPolicy::Fail);
    assert_eq!(
        eval_ok(&session, "list nil true 'x' \"s\" 2.5"),
        Value::seq(vec![
            Value::None,
            Value::Bool(true),
            Value::Rune('x'),
            Value::string("s"),
            Value::Float(2.5),
        ])
    );
}

#[test]
fn conditional_returns_the_taken_branch() {
    let session = Session::new(MissPolicy::Fail);
    assert_eq!(eval_ok(&session, "if true\n  1"), Value::Int(1));
    assert_eq!(eval_ok(&session, "if false\n  1"), Value::None);
}

#[test]
fn untaken_branch_is_never_evaluated() {
    let session = Session::new(MissPolicy::Fail);
    let log = with_mark(&session);
    assert_eq!(eval_ok(&session, "if false\n  (mark 1)"), Value::None);
    assert!(log.borrow().is_empty());
    eval_ok(&session, "if true\n  (mark 2)");
    assert_eq!(*log.borrow(), vec![Value::Int(2)]);
}

#[test]
fn else_branch_stays_unevaluated_beside_a_taken_if() {
    let session = Session::new(MissPolicy::Fail);
    let log = with_mark(&session);
    // A dedented `else` line parses as a sibling form; bind `else` to a
    // callable that leaves its arguments as unread syntax.
    let skip = Callable::new("else", |_cx, _scope, _args| Ok(Value::None));
    session.root().store("else", Value::Callable(skip));
    let tree = match session.parse("if true\n  (mark 1)\nelse\n  (mark 2)") {
        Ok(tree) => tree,
        Err(err) => panic!("parse failed: {err}"),
    };
    let scope = session.root().child();
    let taken = match session.eval_form(&tree.at(1), &scope) {
        Ok(value) => value,
        Err(err) => panic!("eval failed: {err}"),
    };
    assert_eq!(taken, Value::Int(1));
    match session.eval_form(&tree.at(2), &scope) {
        Ok(value) => assert_eq!(value, Value::None),
        Err(err) => panic!("eval failed: {err}"),
    }
    assert_eq!(*log.borrow(), vec![Value::Int(1)]);
}

#[test]
fn definitions_live_in_the_file_scope() {
    let session = Session::new(MissPolicy::Fail);
    assert_eq!(
        eval_ok(&session, "def x 42\nlist x x"),
        Value::seq(vec![Value::Int(42), Value::Int(42)])
    );
    // Each file gets a fresh scope; x from the previous file is gone.
    let err = match session.eval_file("list x") {
        Err(err) => err,
        Ok(value) => panic!("expected error, got {value}"),
    };
    assert_eq!(err.to_string(), "undefined name `x`");
}

#[test]
fn sum_folds_across_the_pipeline() {
    let session = Session::new(MissPolicy::Fail);
    assert_eq!(eval_ok(&session, "sum 1 2 3"), Value::Int(6));
    assert_eq!(eval_ok(&session, "sum 1 2.5"), Value::Float(3.5));
}

#[test]
fn quote_yields_the_parsed_syntax() {
    let session = Session::new(MissPolicy::Fail);
    assert_eq!(
        eval_ok(&session, "quote (a b)"),
        Value::seq(vec![ident("a"), ident("b")])
    );
}

#[test]
fn while_reevaluates_its_condition() {
    let session = Session::new(MissPolicy::Fail);
    let log = with_mark(&session);
    let flags = Rc::new(RefCell::new(vec![false, true, true]));
    let feed = Rc::clone(&flags);
    let next_flag = Callable::new("next-flag", move |_cx, _scope, _args| {
        Ok(Value::Bool(feed.borrow_mut().pop().unwrap_or(false)))
    });
    session.root().store("next-flag", Value::Callable(next_flag));
    assert_eq!(
        eval_ok(&session, "while (next-flag)\n  (mark 1)"),
        Value::None
    );
    assert_eq!(log.borrow().len(), 2);
}

#[test]
fn defer_policy_compiles_unknown_calls_to_residuals() {
    let session = Session::new(MissPolicy::Defer);
    assert_eq!(
        eval_ok(&session, "emit 1 2"),
        Value::seq(vec![ident("emit"), Value::Int(1), Value::Int(2)])
    );
    // Arguments of a residual are still evaluated eagerly.
    assert_eq!(
        eval_ok(&session, "def x 5\nemit x"),
        Value::seq(vec![ident("emit"), Value::Int(5)])
    );
}

#[test]
fn fail_policy_rejects_unknown_names() {
    let session = Session::new(MissPolicy::Fail);
    let err = match session.eval_file("emit 1") {
        Err(err) => err,
        Ok(value) => panic!("expected error, got {value}"),
    };
    assert_eq!(err.to_string(), "undefined name `emit`");
    assert_eq!(
        err.to_diagnostic().to_string(),
        "error[E0301]: undefined name `emit`"
    );
}

#[test]
fn install_rule_extends_the_reader_for_later_parses() {
    let session = Session::new(MissPolicy::Fail);
    // `list` doubles as a hook: it answers every word with a one-element
    // sequence holding the word, which no built-in rule ever produces.
    assert_eq!(
        eval_ok(&session, "install-rule \"wrap\" list"),
        Value::None
    );
    let tree = match session.parse("marker") {
        Ok(tree) => tree,
        Err(err) => panic!("parse failed: {err}"),
    };
    assert_eq!(
        tree,
        Value::seq(vec![
            ident("file"),
            Value::seq(vec![Value::seq(vec![Value::string("marker")])]),
        ])
    );
    // Built-in rules still win over the user rule.
    let numeric = match session.parse("7") {
        Ok(tree) => tree,
        Err(err) => panic!("parse failed: {err}"),
    };
    assert_eq!(
        numeric,
        Value::seq(vec![ident("file"), Value::seq(vec![Value::Int(7)])])
    );
}

#[test]
fn install_rule_rejects_non_callable_hooks() {
    let session = Session::new(MissPolicy::Fail);
    let err = match session.eval_file("install-rule \"bad\" 3") {
        Err(CompileError::Eval(err)) => err,
        other => panic!("expected eval error, got {other:?}"),
    };
    assert_eq!(err.to_string(), "expected a callable rule hook, got int");
}

#[test]
fn registration_is_closed_while_parsing() {
    let session = Session::new(MissPolicy::Fail);
    let rules = session.rules_handle();
    let observed = Rc::new(RefCell::new(String::new()));
    let out = Rc::clone(&observed);
    let probe = Callable::new("probe", move |_cx, _scope, _args| {
        let state = if rules.try_borrow_mut().is_ok() {
            "open"
        } else {
            "closed"
        };
        out.borrow_mut().push_str(state);
        Ok(Value::None)
    });
    let rule = UserRule::new("probe", probe, session.root(), session.context());
    assert_eq!(session.register_rule(rule), Ok(()));
    let _ = session.parse("unclaimed");
    assert_eq!(observed.borrow().as_str(), "closed");
}

#[test]
fn parse_errors_surface_through_eval_file() {
    let session = Session::new(MissPolicy::Fail);
    let err = match session.eval_file("a\n\tb") {
        Err(err) => err,
        Ok(value) => panic!("expected error, got {value}"),
    };
    assert_eq!(
        err.to_diagnostic().to_string(),
        "error[E0101]: tab character in indentation\n --> line 2, column 1"
    );
}
