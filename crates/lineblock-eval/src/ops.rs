//! Operator semantics.
//!
//! Integer arithmetic wraps. `/` and `POW` always produce `FLOAT`. Mixed
//! `INT`/`FLOAT` arithmetic promotes to `FLOAT`. Both operands are always
//! evaluated before an operator runs; logic operators do not short-circuit.
//! String results are capped at `max_string_len` bytes, checked before the
//! string is built.

use lineblock_types::ast::{BinOp, UnaryOp};
use lineblock_types::Token;

use crate::error::{EvalError, EvalResult};
use crate::value::Value;

/// Default cap on the byte length of a string built by `+` or `*`.
pub const DEFAULT_MAX_STRING_LEN: usize = 1 << 20;

/// Apply a binary operator. `token` is the operator's token, for errors.
pub fn binary(
    op: BinOp,
    token: Token,
    left: Value,
    right: Value,
    max_string_len: usize,
) -> EvalResult<Value> {
    match op {
        BinOp::Add => add(token, left, right, max_string_len),
        BinOp::Sub => arith(op, token, &left, &right, i32::wrapping_sub, |a, b| a - b),
        BinOp::Mul => match (&left, &right) {
            (Value::Str(s), Value::Int(n)) => {
                let count = usize::try_from(*n).unwrap_or(0);
                let len = s.len().checked_mul(count).unwrap_or(usize::MAX);
                check_string_len(token, len, max_string_len)?;
                Ok(Value::Str(s.repeat(count)))
            }
            _ => arith(op, token, &left, &right, i32::wrapping_mul, |a, b| a * b),
        },
        BinOp::Div => {
            let (a, b) = numbers(op, token, &left, &right)?;
            if b == 0.0 {
                return Err(EvalError::DivisionByZero { token });
            }
            Ok(Value::Float(a / b))
        }
        BinOp::Mod => match (&left, &right) {
            (Value::Int(_), Value::Int(0)) => Err(EvalError::DivisionByZero { token }),
            (Value::Int(a), Value::Int(b)) => Ok(Value::Int(a.wrapping_rem(*b))),
            _ => {
                let (a, b) = numbers(op, token, &left, &right)?;
                if b == 0.0 {
                    return Err(EvalError::DivisionByZero { token });
                }
                Ok(Value::Float(a % b))
            }
        },
        BinOp::Pow => {
            let (a, b) = numbers(op, token, &left, &right)?;
            Ok(Value::Float(a.powf(b)))
        }

        BinOp::BitAnd => ints(op, token, &left, &right, |a, b| a & b),
        BinOp::BitOr => ints(op, token, &left, &right, |a, b| a | b),
        BinOp::BitXor => ints(op, token, &left, &right, |a, b| a ^ b),
        // Shift counts are masked to five bits.
        BinOp::Shl => ints(op, token, &left, &right, |a, b| a.wrapping_shl(b as u32)),
        BinOp::Shr => ints(op, token, &left, &right, |a, b| a.wrapping_shr(b as u32)),

        BinOp::And => bools(op, token, &left, &right, |a, b| a && b),
        BinOp::Or => bools(op, token, &left, &right, |a, b| a || b),
        BinOp::Xor => bools(op, token, &left, &right, |a, b| a ^ b),

        BinOp::Eq => Ok(Value::Bool(left.loose_eq(&right))),
        BinOp::Ne => Ok(Value::Bool(!left.loose_eq(&right))),
        BinOp::Gt => compare(op, token, &left, &right, |a, b| a > b),
        BinOp::Lt => compare(op, token, &left, &right, |a, b| a < b),
        BinOp::Ge => compare(op, token, &left, &right, |a, b| a >= b),
        BinOp::Le => compare(op, token, &left, &right, |a, b| a <= b),
    }
}

/// Apply a unary operator.
pub fn unary(op: UnaryOp, token: Token, value: Value) -> EvalResult<Value> {
    match (op, value) {
        (UnaryOp::Plus, v @ (Value::Int(_) | Value::Float(_))) => Ok(v),
        (UnaryOp::Neg, Value::Int(n)) => Ok(Value::Int(n.wrapping_neg())),
        (UnaryOp::Neg, Value::Float(f)) => Ok(Value::Float(-f)),
        (UnaryOp::Abs, Value::Int(n)) => Ok(Value::Int(n.wrapping_abs())),
        (UnaryOp::Abs, Value::Float(f)) => Ok(Value::Float(f.abs())),
        (UnaryOp::BitNot, Value::Int(n)) => Ok(Value::Int(!n)),
        (UnaryOp::Not, Value::Bool(b)) => Ok(Value::Bool(!b)),
        (op, v) => match (math_function(op), v.as_f32()) {
            (Some(f), Some(x)) => Ok(Value::Float(f(x))),
            _ => Err(mismatch(
                token,
                format!("{op} does not accept {}", v.value_type()),
            )),
        },
    }
}

/// The `f32` function behind a numeric unary operator that always yields
/// `FLOAT`.
fn math_function(op: UnaryOp) -> Option<fn(f32) -> f32> {
    Some(match op {
        UnaryOp::Sin => f32::sin,
        UnaryOp::Cos => f32::cos,
        UnaryOp::Tan => f32::tan,
        UnaryOp::Asin => f32::asin,
        UnaryOp::Acos => f32::acos,
        UnaryOp::Atan => f32::atan,
        UnaryOp::Ceil => f32::ceil,
        UnaryOp::Floor => f32::floor,
        _ => return None,
    })
}

// ── Helpers ──────────────────────────────────────────────────────────

fn mismatch(token: Token, message: String) -> EvalError {
    EvalError::TypeMismatch { token, message }
}

fn operands_error(op: BinOp, token: Token, left: &Value, right: &Value, wanted: &str) -> EvalError {
    mismatch(
        token,
        format!(
            "{op} expects {wanted}, got {} and {}",
            left.value_type(),
            right.value_type()
        ),
    )
}

fn check_string_len(token: Token, len: usize, limit: usize) -> EvalResult<()> {
    if len > limit {
        return Err(EvalError::StringTooLong { token, len, limit });
    }
    Ok(())
}

fn add(token: Token, left: Value, right: Value, max_string_len: usize) -> EvalResult<Value> {
    if left.is_number() && right.is_number() {
        return arith(BinOp::Add, token, &left, &right, i32::wrapping_add, |a, b| a + b);
    }
    if matches!(left, Value::Str(_)) || matches!(right, Value::Str(_)) {
        let (left, right) = (left.to_string(), right.to_string());
        check_string_len(token, left.len().saturating_add(right.len()), max_string_len)?;
        return Ok(Value::Str(left + &right));
    }
    Err(operands_error(BinOp::Add, token, &left, &right, "numbers or a STRING"))
}

/// INT op INT stays INT; any FLOAT promotes both sides.
fn arith(
    op: BinOp,
    token: Token,
    left: &Value,
    right: &Value,
    int_op: fn(i32, i32) -> i32,
    float_op: fn(f32, f32) -> f32,
) -> EvalResult<Value> {
    if let (Value::Int(a), Value::Int(b)) = (left, right) {
        return Ok(Value::Int(int_op(*a, *b)));
    }
    let (a, b) = numbers(op, token, left, right)?;
    Ok(Value::Float(float_op(a, b)))
}

fn numbers(op: BinOp, token: Token, left: &Value, right: &Value) -> EvalResult<(f32, f32)> {
    match (left.as_f32(), right.as_f32()) {
        (Some(a), Some(b)) => Ok((a, b)),
        _ => Err(operands_error(op, token, left, right, "numbers")),
    }
}

fn ints(
    op: BinOp,
    token: Token,
    left: &Value,
    right: &Value,
    f: fn(i32, i32) -> i32,
) -> EvalResult<Value> {
    match (left, right) {
        (Value::Int(a), Value::Int(b)) => Ok(Value::Int(f(*a, *b))),
        _ => Err(operands_error(op, token, left, right, "INT")),
    }
}

fn bools(
    op: BinOp,
    token: Token,
    left: &Value,
    right: &Value,
    f: fn(bool, bool) -> bool,
) -> EvalResult<Value> {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => Ok(Value::Bool(f(*a, *b))),
        _ => Err(operands_error(op, token, left, right, "BOOL")),
    }
}

fn compare(
    op: BinOp,
    token: Token,
    left: &Value,
    right: &Value,
    f: fn(f32, f32) -> bool,
) -> EvalResult<Value> {
    let (a, b) = numbers(op, token, left, right)?;
    Ok(Value::Bool(f(a, b)))
}
