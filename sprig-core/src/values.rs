use crate::ast::Node;
use crate::environment::ScopeId;
use crate::error::{ErrorKind, RuntimeError};
use crate::functions::BuiltInFunction;
use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::One;
use std::fmt::{self, Display};
use std::rc::Rc;

#[derive(Debug)]
pub enum FunctionArity {
    Exact(usize),
    AtLeast(usize),
}

impl FunctionArity {
    /// Check an argument count against this arity, producing the error the
    /// caller surfaces unchanged.
    pub fn check(&self, name: &str, count: usize) -> Result<(), RuntimeError> {
        let matches = match self {
            FunctionArity::Exact(expected) => count == *expected,
            FunctionArity::AtLeast(minimum) => count >= *minimum,
        };
        if matches {
            return Ok(());
        }
        let wanted = match self {
            FunctionArity::Exact(expected) => plural_args(*expected),
            FunctionArity::AtLeast(1) => "one or more arguments".to_string(),
            FunctionArity::AtLeast(2) => "two or more arguments".to_string(),
            FunctionArity::AtLeast(minimum) => format!("at least {} arguments", minimum),
        };
        Err(RuntimeError::new(
            ErrorKind::ArityMismatch,
            format!("function {:?} takes {}", name, wanted),
        ))
    }
}

/// Argument-count phrase pluralized for 0/1/N
pub(crate) fn plural_args(count: usize) -> String {
    match count {
        0 => "no arguments".to_string(),
        1 => "one argument".to_string(),
        n => format!("{} arguments", n),
    }
}

/// A closure produced by the `func` form: formal parameter names, body
/// nodes, and the scope the closure was defined in. Immutable once built.
#[derive(Debug, Clone)]
pub struct ClosureDef {
    pub name: Option<String>,
    pub params: Vec<String>,
    pub body: Vec<Node>,
    pub scope: ScopeId,
}

impl ClosureDef {
    pub fn name_info(&self) -> String {
        match &self.name {
            Some(name) => format!("function {:?}", name),
            None => "anonymous function".to_string(),
        }
    }
}

pub type NativeFn = dyn Fn(&[Value]) -> Result<Value, RuntimeError>;

/// A host-registered function. Receives already-evaluated arguments, like
/// any built-in.
#[derive(Clone)]
pub struct NativeFunction {
    pub name: Rc<str>,
    pub func: Rc<NativeFn>,
}

impl NativeFunction {
    pub fn new(
        name: impl Into<Rc<str>>,
        func: impl Fn(&[Value]) -> Result<Value, RuntimeError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            func: Rc::new(func),
        }
    }
}

impl fmt::Debug for NativeFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NativeFunction")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone)]
pub enum Value {
    Bool(bool),
    /// Exact rational, always kept reduced. Arithmetic builds new values;
    /// nothing observable to the language mutates a number in place.
    Number(BigRational),
    String(Rc<str>),
    Nil,
    BuiltIn(BuiltInFunction),
    Native(NativeFunction),
    Closure(Rc<ClosureDef>),
}

impl Value {
    pub fn integer(n: i64) -> Self {
        Value::Number(BigRational::from_integer(BigInt::from(n)))
    }

    pub fn string(s: impl Into<Rc<str>>) -> Self {
        Value::String(s.into())
    }

    /// Only the Bool `false` is falsy; every other value, including `nil`
    /// and the number zero, is truthy.
    pub fn is_false(&self) -> bool {
        matches!(self, Value::Bool(false))
    }

    pub fn is_callable(&self) -> bool {
        matches!(
            self,
            Value::BuiltIn(_) | Value::Native(_) | Value::Closure(_)
        )
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Value::Bool(_) => "boolean",
            Value::Number(_) => "number",
            Value::String(_) => "string",
            Value::Nil => "nil",
            Value::BuiltIn(_) | Value::Native(_) | Value::Closure(_) => "function",
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a == b,
            // Numbers compare by reduced numeric value, not representation
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Nil, Value::Nil) => true,
            (Value::BuiltIn(a), Value::BuiltIn(b)) => a == b,
            (Value::Native(a), Value::Native(b)) => Rc::ptr_eq(&a.func, &b.func),
            (Value::Closure(a), Value::Closure(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Bool(value) => write!(f, "{}", value),
            Value::Number(value) => {
                if value.denom().is_one() {
                    write!(f, "{}", value.numer())
                } else {
                    write!(f, "{}/{}", value.numer(), value.denom())
                }
            }
            Value::String(value) => write!(f, "{:?}", value),
            Value::Nil => write!(f, "nil"),
            Value::BuiltIn(builtin) => write!(f, "<built-in {}>", builtin.name()),
            Value::Native(native) => write!(f, "<native {}>", native.name),
            Value::Closure(closure) => match &closure.name {
                Some(name) => write!(f, "<function {}>", name),
                None => write!(f, "<anonymous function>"),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_equality_compares_reduced_value() {
        let a = Value::Number(BigRational::new(BigInt::from(2), BigInt::from(4)));
        let b = Value::Number(BigRational::new(BigInt::from(1), BigInt::from(2)));
        assert_eq!(a, b);
    }

    #[test]
    fn test_mixed_kinds_are_unequal() {
        assert_ne!(Value::integer(0), Value::Bool(false));
        assert_ne!(Value::Nil, Value::Bool(false));
        assert_ne!(Value::string("1"), Value::integer(1));
    }

    #[test]
    fn test_only_false_is_falsy() {
        assert!(Value::Bool(false).is_false());
        assert!(!Value::Bool(true).is_false());
        assert!(!Value::Nil.is_false());
        assert!(!Value::integer(0).is_false());
        assert!(!Value::string("").is_false());
    }

    #[test]
    fn test_display_formats_integers_without_denominator() {
        assert_eq!(Value::integer(42).to_string(), "42");
        let half = Value::Number(BigRational::new(BigInt::from(1), BigInt::from(2)));
        assert_eq!(half.to_string(), "1/2");
        assert_eq!(Value::Nil.to_string(), "nil");
    }
}
