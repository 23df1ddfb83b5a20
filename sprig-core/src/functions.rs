use crate::error::{ErrorKind, RuntimeError};
use crate::values::{FunctionArity, Value};
use num_rational::BigRational;
use num_traits::{One, Zero};

/// The default built-in functions. Unlike special forms these receive
/// already-evaluated arguments through the generic call path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BuiltInFunction {
    Add,
    Subtract,
    Multiply,
    Divide,
    Equal,
    NotEqual,
    Raise,
}

impl BuiltInFunction {
    pub fn from_ident(ident: &str) -> Option<Self> {
        match ident {
            "+" => Some(Self::Add),
            "-" => Some(Self::Subtract),
            "*" => Some(Self::Multiply),
            "/" => Some(Self::Divide),
            "==" => Some(Self::Equal),
            "!=" => Some(Self::NotEqual),
            "error" => Some(Self::Raise),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Equal => "==",
            Self::NotEqual => "!=",
            Self::Raise => "error",
        }
    }

    pub fn get_arity(&self) -> FunctionArity {
        match self {
            Self::Add | Self::Multiply => FunctionArity::AtLeast(0),
            Self::Subtract => FunctionArity::AtLeast(1),
            Self::Divide => FunctionArity::AtLeast(2),
            Self::Equal | Self::NotEqual => FunctionArity::Exact(2),
            Self::Raise => FunctionArity::Exact(1),
        }
    }

    pub fn call(&self, args: &[Value]) -> Result<Value, RuntimeError> {
        self.get_arity().check(self.name(), args.len())?;
        match self {
            Self::Add => add(args),
            Self::Subtract => subtract(args),
            Self::Multiply => multiply(args),
            Self::Divide => divide(args),
            Self::Equal => Ok(Value::Bool(args[0] == args[1])),
            Self::NotEqual => Ok(Value::Bool(args[0] != args[1])),
            Self::Raise => raise(args),
        }
    }
}

/// The bindings every root scope starts with. `true`, `false`, and `nil`
/// are ordinary bindings, not literals, so programs can shadow them in
/// child scopes like any other name.
pub fn default_globals() -> Vec<(&'static str, Value)> {
    vec![
        ("true", Value::Bool(true)),
        ("false", Value::Bool(false)),
        ("nil", Value::Nil),
        ("error", Value::BuiltIn(BuiltInFunction::Raise)),
        ("==", Value::BuiltIn(BuiltInFunction::Equal)),
        ("!=", Value::BuiltIn(BuiltInFunction::NotEqual)),
        ("+", Value::BuiltIn(BuiltInFunction::Add)),
        ("-", Value::BuiltIn(BuiltInFunction::Subtract)),
        ("*", Value::BuiltIn(BuiltInFunction::Multiply)),
        ("/", Value::BuiltIn(BuiltInFunction::Divide)),
    ]
}

fn expect_number<'a>(value: &'a Value, verb: &str) -> Result<&'a BigRational, RuntimeError> {
    match value {
        Value::Number(number) => Ok(number),
        other => Err(RuntimeError::new(
            ErrorKind::TypeMismatch,
            format!("cannot {} {}", verb, other),
        )),
    }
}

fn add(args: &[Value]) -> Result<Value, RuntimeError> {
    let mut sum = BigRational::zero();
    for arg in args {
        sum = sum + expect_number(arg, "sum")?;
    }
    Ok(Value::Number(sum))
}

fn subtract(args: &[Value]) -> Result<Value, RuntimeError> {
    let first = expect_number(&args[0], "subtract")?;
    if args.len() == 1 {
        // One argument negates: 0 minus the value
        return Ok(Value::Number(-first.clone()));
    }
    let mut difference = first.clone();
    for arg in &args[1..] {
        difference = difference - expect_number(arg, "subtract")?;
    }
    Ok(Value::Number(difference))
}

fn multiply(args: &[Value]) -> Result<Value, RuntimeError> {
    let mut product = BigRational::one();
    for arg in args {
        product = product * expect_number(arg, "multiply")?;
    }
    Ok(Value::Number(product))
}

fn divide(args: &[Value]) -> Result<Value, RuntimeError> {
    let mut quotient = expect_number(&args[0], "divide with")?.clone();
    for arg in &args[1..] {
        let divisor = expect_number(arg, "divide with")?;
        if divisor.is_zero() {
            return Err(RuntimeError::new(
                ErrorKind::DivisionByZero,
                "division by zero",
            ));
        }
        quotient = quotient / divisor;
    }
    Ok(Value::Number(quotient))
}

fn raise(args: &[Value]) -> Result<Value, RuntimeError> {
    match &args[0] {
        Value::String(message) => Err(RuntimeError::new(ErrorKind::UserError, message.to_string())),
        _ => Err(RuntimeError::new(
            ErrorKind::TypeMismatch,
            "error function takes a single string argument",
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_with_no_arguments_is_zero() {
        assert_eq!(
            BuiltInFunction::Add.call(&[]).unwrap(),
            Value::integer(0)
        );
    }

    #[test]
    fn test_multiply_with_no_arguments_is_one() {
        assert_eq!(
            BuiltInFunction::Multiply.call(&[]).unwrap(),
            Value::integer(1)
        );
    }

    #[test]
    fn test_subtract_single_argument_negates() {
        let result = BuiltInFunction::Subtract.call(&[Value::integer(5)]).unwrap();
        assert_eq!(result, Value::integer(-5));
    }

    #[test]
    fn test_subtract_folds_left_to_right() {
        let args = [Value::integer(10), Value::integer(1), Value::integer(2)];
        assert_eq!(
            BuiltInFunction::Subtract.call(&args).unwrap(),
            Value::integer(7)
        );
    }

    #[test]
    fn test_subtract_requires_an_argument() {
        let err = BuiltInFunction::Subtract.call(&[]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ArityMismatch);
        assert!(err.message.contains("one or more arguments"));
    }

    #[test]
    fn test_divide_requires_two_arguments() {
        let err = BuiltInFunction::Divide.call(&[Value::integer(1)]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ArityMismatch);
        assert!(err.message.contains("two or more arguments"));
    }

    #[test]
    fn test_divide_by_zero_is_reported() {
        let args = [Value::integer(1), Value::integer(0)];
        let err = BuiltInFunction::Divide.call(&args).unwrap_err();
        assert_eq!(err.kind, ErrorKind::DivisionByZero);
    }

    #[test]
    fn test_division_is_exact() {
        // (a / b) * b == a for b != 0
        let args = [Value::integer(5), Value::integer(7)];
        let quotient = BuiltInFunction::Divide.call(&args).unwrap();
        let product = BuiltInFunction::Multiply
            .call(&[quotient, Value::integer(7)])
            .unwrap();
        assert_eq!(product, Value::integer(5));
    }

    #[test]
    fn test_arithmetic_rejects_non_numbers() {
        let err = BuiltInFunction::Add
            .call(&[Value::integer(1), Value::string("a")])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
        assert!(err.message.contains("cannot sum"));
    }

    #[test]
    fn test_equality_compares_values_not_representation() {
        let half = BuiltInFunction::Divide
            .call(&[Value::integer(1), Value::integer(2)])
            .unwrap();
        let also_half = BuiltInFunction::Divide
            .call(&[Value::integer(2), Value::integer(4)])
            .unwrap();
        assert_eq!(
            BuiltInFunction::Equal.call(&[half, also_half]).unwrap(),
            Value::Bool(true)
        );
    }

    #[test]
    fn test_equality_requires_exactly_two_arguments() {
        let err = BuiltInFunction::Equal.call(&[Value::integer(1)]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::ArityMismatch);
    }

    #[test]
    fn test_raise_surfaces_the_message_verbatim() {
        let err = BuiltInFunction::Raise
            .call(&[Value::string("boom")])
            .unwrap_err();
        assert_eq!(err.kind, ErrorKind::UserError);
        assert_eq!(err.message, "boom");
    }

    #[test]
    fn test_raise_rejects_non_strings() {
        let err = BuiltInFunction::Raise.call(&[Value::integer(1)]).unwrap_err();
        assert_eq!(err.kind, ErrorKind::TypeMismatch);
    }

    #[test]
    fn test_from_ident_round_trips() {
        for name in ["+", "-", "*", "/", "==", "!=", "error"] {
            let builtin = BuiltInFunction::from_ident(name).unwrap();
            assert_eq!(builtin.name(), name);
        }
        assert_eq!(BuiltInFunction::from_ident("if"), None);
    }
}
