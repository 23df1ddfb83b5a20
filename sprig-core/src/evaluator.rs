use crate::ast::{Node, Sexpr, Span};
use crate::environment::{Environment, ScopeId};
use crate::error::{ErrorKind, RuntimeError};
use crate::forms::get_special_form;
use crate::functions::default_globals;
use crate::values::{plural_args, ClosureDef, Value};
use std::rc::Rc;

/// The evaluation engine and the host's entry point: a root environment
/// pre-seeded with the default globals, evaluated against with [`Scope::eval`].
///
/// Single-threaded and synchronous; one evaluation in flight per `Scope`.
pub struct Scope {
    pub(crate) env: Environment,
    root: ScopeId,
    source: Option<Rc<str>>,
}

impl Scope {
    pub fn new() -> Self {
        let mut env = Environment::new();
        let root = env.root();
        for (name, value) in default_globals() {
            // The default names are distinct, so seeding cannot collide
            let _ = env.create(root, name, value);
        }
        Scope {
            env,
            root,
            source: None,
        }
    }

    /// Attach the source text nodes were parsed from, so errors render
    /// with annotated source context.
    pub fn set_source(&mut self, source: impl Into<Rc<str>>) {
        self.source = Some(source.into());
    }

    /// Bind a host-supplied value in the root scope, under the same
    /// create contract `var` uses: redefinition is an error.
    pub fn define(&mut self, name: &str, value: Value) -> Result<(), RuntimeError> {
        self.env.create(self.root, name, value)
    }

    /// Evaluate one top-level node against the root scope.
    pub fn eval(&mut self, node: &Node) -> Result<Value, RuntimeError> {
        self.eval_in(self.root, node)
            .map_err(|error| match &self.source {
                Some(source) => error.with_source(Rc::clone(source)),
                None => error,
            })
    }

    pub(crate) fn eval_in(&mut self, env: ScopeId, node: &Node) -> Result<Value, RuntimeError> {
        match &node.node {
            Sexpr::Literal(value) => Ok(value.clone()),
            Sexpr::Symbol(name) => self
                .env
                .lookup(env, name)
                .map_err(|error| error.with_call_site(node.span)),
            Sexpr::List(elements) => self.eval_call(env, elements, node.span),
        }
    }

    fn eval_call(
        &mut self,
        env: ScopeId,
        elements: &[Node],
        span: Span,
    ) -> Result<Value, RuntimeError> {
        let (operator, operands) = match elements.split_first() {
            Some(parts) => parts,
            None => {
                return Err(RuntimeError::new(
                    ErrorKind::MalformedForm,
                    "cannot evaluate an empty list",
                )
                .with_call_site(span))
            }
        };

        // Special forms are dispatched on the unevaluated operands; they
        // are recognized before the operator is resolved as a value.
        if let Sexpr::Symbol(name) = &operator.node {
            if let Some(form) = get_special_form(name) {
                return form(self, env, operands).map_err(|error| error.with_call_site(span));
            }
        }

        let callee = self.eval_in(env, operator)?;
        let mut args = Vec::with_capacity(operands.len());
        for operand in operands {
            args.push(self.eval_in(env, operand)?);
        }
        self.apply(&callee, &args)
            .map_err(|error| error.with_call_site(span))
    }

    fn apply(&mut self, callee: &Value, args: &[Value]) -> Result<Value, RuntimeError> {
        match callee {
            Value::BuiltIn(builtin) => builtin.call(args),
            Value::Native(native) => (native.func)(args),
            Value::Closure(closure) => self.call_closure(closure, args),
            other => Err(RuntimeError::new(
                ErrorKind::NotCallable,
                format!("cannot call {}", other),
            )),
        }
    }

    fn call_closure(
        &mut self,
        closure: &Rc<ClosureDef>,
        args: &[Value],
    ) -> Result<Value, RuntimeError> {
        if args.len() != closure.params.len() {
            return Err(RuntimeError::new(
                ErrorKind::ArityMismatch,
                format!(
                    "{} takes {}",
                    closure.name_info(),
                    plural_args(closure.params.len())
                ),
            ));
        }
        let call_env = self.env.branch(closure.scope);
        for (param, arg) in closure.params.iter().zip(args) {
            // Parameter names are distinct by construction, so this
            // cannot collide.
            self.env.create(call_env, param, arg.clone())?;
        }
        let mut value = Value::Nil;
        for node in &closure.body {
            value = self.eval_in(call_env, node)?;
        }
        Ok(value)
    }
}

impl Default for Scope {
    fn default() -> Self {
        Self::new()
    }
}
