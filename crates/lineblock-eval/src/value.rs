//! Runtime values.

use lineblock_types::ast::ValueType;
use std::fmt;

/// Float equality tolerance for `EQ`/`NE`.
pub const FLOAT_EPSILON: f32 = 1e-6;

/// A dynamically-typed LineBlock value. Every operation yields a new one.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i32),
    Float(f32),
    Bool(bool),
    Str(String),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Int(_) => ValueType::Int,
            Value::Float(_) => ValueType::Float,
            Value::Bool(_) => ValueType::Bool,
            Value::Str(_) => ValueType::String,
        }
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// The value widened to `f32`, for numbers only.
    pub fn as_f32(&self) -> Option<f32> {
        match self {
            Value::Int(n) => Some(*n as f32),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    /// Convert to `ty` the way typed assignment does.
    ///
    /// Returns `None` only for strings that do not parse as the target
    /// number type; every other conversion is total.
    pub fn coerce(self, ty: ValueType) -> Option<Value> {
        if self.value_type() == ty {
            return Some(self);
        }
        match ty {
            ValueType::Int => match self {
                // `as` truncates toward zero and saturates; NaN becomes 0.
                Value::Float(f) => Some(Value::Int(f as i32)),
                Value::Bool(b) => Some(Value::Int(i32::from(b))),
                // Surrounding whitespace is rejected.
                Value::Str(s) => s.parse().ok().map(Value::Int),
                Value::Int(_) => Some(self),
            },
            ValueType::Float => match self {
                Value::Int(n) => Some(Value::Float(n as f32)),
                Value::Bool(b) => Some(Value::Float(if b { 1.0 } else { 0.0 })),
                Value::Str(s) => s.trim().parse().ok().map(Value::Float),
                Value::Float(_) => Some(self),
            },
            ValueType::Bool => match self {
                Value::Int(n) => Some(Value::Bool(n != 0)),
                Value::Float(f) => Some(Value::Bool(f != 0.0)),
                Value::Str(s) => Some(Value::Bool(!s.is_empty())),
                Value::Bool(_) => Some(self),
            },
            ValueType::String => Some(Value::Str(self.to_string())),
        }
    }

    /// Type-and-value equality. Values of different types are never equal.
    pub fn loose_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Int(a), Value::Int(b)) => a == b,
            (Value::Float(a), Value::Float(b)) => a == b || (a - b).abs() < FLOAT_EPSILON,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Str(a), Value::Str(b)) => a == b,
            _ => false,
        }
    }
}

/// The canonical text form used by `PRINT` and by string conversion.
/// Floats always show a fractional part or an exponent.
impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(x) => write!(f, "{x:?}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Str(s) => f.write_str(s),
        }
    }
}
