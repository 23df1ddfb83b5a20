use crate::ast::{Node, Sexpr};
use crate::environment::ScopeId;
use crate::error::{ErrorKind, RuntimeError};
use crate::evaluator::Scope;
use crate::values::{ClosureDef, Value};
use std::rc::Rc;

/// A special-form handler. Receives the raw, unevaluated operand nodes and
/// decides which of them to evaluate, and in what order.
pub type SpecialFormFn = fn(&mut Scope, ScopeId, &[Node]) -> Result<Value, RuntimeError>;

/// Special forms are recognized syntactically by their leading symbol, in
/// a table separate from the value namespace, so a binding can never
/// shadow them.
pub fn get_special_form(name: &str) -> Option<SpecialFormFn> {
    match name {
        "if" => Some(eval_if),
        "and" => Some(eval_and),
        "or" => Some(eval_or),
        "var" => Some(eval_var),
        "set" => Some(eval_set),
        "do" => Some(eval_do),
        "func" => Some(eval_func),
        _ => None,
    }
}

fn eval_if(scope: &mut Scope, env: ScopeId, args: &[Node]) -> Result<Value, RuntimeError> {
    if args.len() < 2 || args.len() > 3 {
        return Err(RuntimeError::new(
            ErrorKind::ArityMismatch,
            r#"function "if" takes two or three arguments"#,
        ));
    }
    let condition = scope.eval_in(env, &args[0])?;
    if condition.is_false() {
        if let Some(alternative) = args.get(2) {
            return scope.eval_in(env, alternative);
        }
        return Ok(Value::Bool(false));
    }
    scope.eval_in(env, &args[1])
}

fn eval_and(scope: &mut Scope, env: ScopeId, args: &[Node]) -> Result<Value, RuntimeError> {
    let mut value = Value::Bool(true);
    for arg in args {
        value = scope.eval_in(env, arg)?;
        if value.is_false() {
            return Ok(Value::Bool(false));
        }
    }
    Ok(value)
}

fn eval_or(scope: &mut Scope, env: ScopeId, args: &[Node]) -> Result<Value, RuntimeError> {
    let mut value = Value::Bool(false);
    for arg in args {
        value = scope.eval_in(env, arg)?;
        if !value.is_false() {
            return Ok(value);
        }
    }
    Ok(value)
}

fn eval_var(scope: &mut Scope, env: ScopeId, args: &[Node]) -> Result<Value, RuntimeError> {
    if args.is_empty() || args.len() > 2 {
        return Err(RuntimeError::new(
            ErrorKind::ArityMismatch,
            "var takes one or two arguments",
        ));
    }
    let name = match &args[0].node {
        Sexpr::Symbol(name) => name.clone(),
        _ => {
            return Err(RuntimeError::new(
                ErrorKind::MalformedForm,
                "var takes a symbol as first argument",
            ))
        }
    };
    let value = match args.get(1) {
        Some(node) => scope.eval_in(env, node)?,
        None => Value::Nil,
    };
    scope.env.create(env, &name, value)?;
    Ok(Value::Nil)
}

fn eval_set(scope: &mut Scope, env: ScopeId, args: &[Node]) -> Result<Value, RuntimeError> {
    if args.len() != 2 {
        return Err(RuntimeError::new(
            ErrorKind::ArityMismatch,
            r#"function "set" takes two arguments"#,
        ));
    }
    let name = match &args[0].node {
        Sexpr::Symbol(name) => name.clone(),
        _ => {
            return Err(RuntimeError::new(
                ErrorKind::MalformedForm,
                r#"function "set" takes a symbol as first argument"#,
            ))
        }
    };
    let value = scope.eval_in(env, &args[1])?;
    scope.env.set(env, &name, value)?;
    Ok(Value::Nil)
}

fn eval_do(scope: &mut Scope, env: ScopeId, args: &[Node]) -> Result<Value, RuntimeError> {
    let block = scope.env.branch(env);
    let mut value = Value::Nil;
    for arg in args {
        value = scope.eval_in(block, arg)?;
    }
    Ok(value)
}

fn eval_func(scope: &mut Scope, env: ScopeId, args: &[Node]) -> Result<Value, RuntimeError> {
    if args.len() < 2 {
        return Err(RuntimeError::new(
            ErrorKind::ArityMismatch,
            "func takes a parameter list and at least one body form",
        ));
    }

    // An optional leading symbol names the function, for recursion and
    // for error messages.
    let mut index = 0;
    let name = match &args[0].node {
        Sexpr::Symbol(name) => {
            index += 1;
            Some(name.clone())
        }
        _ => None,
    };

    let param_nodes = match args.get(index).map(|node| &node.node) {
        Some(Sexpr::List(nodes)) => nodes,
        _ => {
            return Err(RuntimeError::new(
                ErrorKind::MalformedForm,
                "func takes a list of parameters",
            ))
        }
    };
    let mut params = Vec::with_capacity(param_nodes.len());
    for param in param_nodes {
        match &param.node {
            Sexpr::Symbol(param_name) => {
                if params.contains(param_name) {
                    return Err(RuntimeError::new(
                        ErrorKind::MalformedForm,
                        format!("duplicate parameter name: {}", param_name),
                    ));
                }
                params.push(param_name.clone());
            }
            _ => {
                return Err(RuntimeError::new(
                    ErrorKind::MalformedForm,
                    "func's list of parameters must be a list of symbols",
                ))
            }
        }
    }

    let body = &args[index + 1..];
    if body.is_empty() {
        return Err(RuntimeError::new(
            ErrorKind::MalformedForm,
            "func takes a body sequence",
        ));
    }

    let value = Value::Closure(Rc::new(ClosureDef {
        name: name.clone(),
        params,
        body: body.to_vec(),
        scope: env,
    }));
    // A named function is bound in its defining scope before the form
    // returns, so the body can call it recursively.
    if let Some(name) = name {
        scope.env.create(env, &name, value.clone())?;
    }
    Ok(value)
}
