//! Tree-walking evaluator for LineBlock programs.
//!
//! Statements return a [`ControlSignal`]; blocks propagate anything other
//! than `Normal`, loops absorb `Break`/`Continue`, and the root absorbs
//! `Stop` and `Goto`. Every block opens a variable scope.

use std::f32::consts::{E, PI};

use lineblock_types::ast::{
    Assign, Block, Constant, Expr, ForStmt, IfStmt, PlaceBlock, Program, Stmt, ValueType,
    WhileStmt,
};
use lineblock_types::{Grid, GridPos, Token};

use crate::control::ControlSignal;
use crate::env::Environment;
use crate::error::{EvalError, EvalResult};
use crate::host::{Host, HookError};
use crate::literal;
use crate::ops::{self, DEFAULT_MAX_STRING_LEN};
use crate::value::Value;

/// Default number of evaluation steps before a run is aborted.
pub const DEFAULT_GAS_LIMIT: u64 = 1_000_000;

/// The evaluator. Borrows the grid and host for the duration of a run.
pub struct Evaluator<'a> {
    grid: &'a mut dyn Grid,
    host: &'a mut dyn Host,
    /// Variable environment (scoped).
    pub env: Environment,
    /// Steps consumed so far.
    pub gas: u64,
    pub gas_limit: u64,
    /// Longest string, in bytes, that `+` or `*` may build.
    pub max_string_len: usize,
    goto_enabled: bool,
}

impl<'a> Evaluator<'a> {
    pub fn new(grid: &'a mut dyn Grid, host: &'a mut dyn Host) -> Self {
        Self {
            grid,
            host,
            env: Environment::new(),
            gas: 0,
            gas_limit: DEFAULT_GAS_LIMIT,
            max_string_len: DEFAULT_MAX_STRING_LEN,
            goto_enabled: false,
        }
    }

    pub fn with_gas_limit(mut self, gas_limit: u64) -> Self {
        self.gas_limit = gas_limit;
        self
    }

    pub fn with_max_string_len(mut self, max_string_len: usize) -> Self {
        self.max_string_len = max_string_len;
        self
    }

    /// Allow `GOTO` to transfer control instead of failing.
    pub fn with_goto(mut self, enabled: bool) -> Self {
        self.goto_enabled = enabled;
        self
    }

    /// Consume one unit of gas.
    fn tick(&mut self) -> EvalResult<()> {
        self.gas += 1;
        if self.gas > self.gas_limit {
            Err(EvalError::GasExhausted {
                limit: self.gas_limit,
            })
        } else {
            Ok(())
        }
    }

    // ══════════════════════════════════════════════════════════════════════
    // Program
    // ══════════════════════════════════════════════════════════════════════

    /// Run a whole program. Side effects performed before an error stay in
    /// place.
    pub fn run(&mut self, program: &Program) -> EvalResult<()> {
        let enclosing = self.env.enter();
        let result = self.run_root(&program.body);
        self.env.exit(enclosing);
        tracing::debug!(gas = self.gas, ok = result.is_ok(), "evaluation finished");
        result
    }

    /// The root block. Like any other block, except that `GOTO` can move its
    /// program counter.
    fn run_root(&mut self, body: &Block) -> EvalResult<()> {
        let mut pc = 0;
        while let Some(stmt) = body.stmts.get(pc) {
            match self.exec_stmt(stmt)? {
                ControlSignal::Normal => pc += 1,
                ControlSignal::Stop => {
                    tracing::debug!(at = %stmt.token(), "stopped");
                    return Ok(());
                }
                ControlSignal::Break(token) | ControlSignal::Continue(token) => {
                    return Err(EvalError::StrayControl { token });
                }
                ControlSignal::Goto { target, token } => {
                    pc = usize::try_from(target)
                        .ok()
                        .filter(|&t| t < body.len())
                        .ok_or(EvalError::GotoOutOfBounds {
                            token,
                            target,
                            len: body.len(),
                        })?;
                    tracing::trace!(target = pc, "goto");
                }
            }
        }
        Ok(())
    }

    /// Run a nested block in its own scope.
    fn exec_block(&mut self, block: &Block) -> EvalResult<ControlSignal> {
        let enclosing = self.env.enter();
        let result = self.exec_stmts(&block.stmts);
        self.env.exit(enclosing);
        result
    }

    fn exec_stmts(&mut self, stmts: &[Stmt]) -> EvalResult<ControlSignal> {
        for stmt in stmts {
            let signal = self.exec_stmt(stmt)?;
            if !signal.is_normal() {
                return Ok(signal);
            }
        }
        Ok(ControlSignal::Normal)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Statements
    // ══════════════════════════════════════════════════════════════════════

    pub fn exec_stmt(&mut self, stmt: &Stmt) -> EvalResult<ControlSignal> {
        self.tick()?;
        match stmt {
            Stmt::Assign(assign) => self.exec_assign(assign),
            Stmt::Command(token) => self.exec_command(*token),
            Stmt::Stop(_) => Ok(ControlSignal::Stop),
            Stmt::Break(token) => Ok(ControlSignal::Break(*token)),
            Stmt::Continue(token) => Ok(ControlSignal::Continue(*token)),
            Stmt::Print { value, .. } => {
                let text = self.eval_expr(value)?.to_string();
                tracing::trace!(%text, "print");
                self.host.emit_text(&text);
                Ok(ControlSignal::Normal)
            }
            Stmt::Goto { token, target } => self.exec_goto(*token, target),
            Stmt::PlaceBlock(place) => self.exec_place_block(place),
            Stmt::If(stmt) => self.exec_if(stmt),
            Stmt::While(stmt) => self.exec_while(stmt),
            Stmt::For(stmt) => self.exec_for(stmt),
        }
    }

    fn exec_assign(&mut self, assign: &Assign) -> EvalResult<ControlSignal> {
        let value = self.eval_expr(&assign.value)?;
        let from = value.value_type();
        let text = value.to_string();
        let value = value.coerce(assign.ty).ok_or(EvalError::Conversion {
            token: assign.token,
            from,
            to: assign.ty,
            text,
        })?;
        tracing::trace!(index = assign.target.index(), %value, "assign");
        self.env.assign(assign.target.index(), value);
        Ok(ControlSignal::Normal)
    }

    fn exec_command(&mut self, token: Token) -> EvalResult<ControlSignal> {
        self.host
            .execute_command(token.pos)
            .map_err(|err| match err {
                HookError::Missing(_) => EvalError::MissingCommandHook { token },
                HookError::Failed { message, .. } => EvalError::CommandFailed { token, message },
            })?;
        Ok(ControlSignal::Normal)
    }

    fn exec_goto(&mut self, token: Token, target: &Expr) -> EvalResult<ControlSignal> {
        if !self.goto_enabled {
            return Err(EvalError::GotoDisabled { token });
        }
        let target = self.eval_int(target, "GOTO target")?;
        Ok(ControlSignal::Goto { target, token })
    }

    fn exec_place_block(&mut self, place: &PlaceBlock) -> EvalResult<ControlSignal> {
        let x = self.eval_int(&place.x, "PLACEBLOCK coordinate")?;
        let y = self.eval_int(&place.y, "PLACEBLOCK coordinate")?;
        let z = self.eval_int(&place.z, "PLACEBLOCK coordinate")?;
        let pos = GridPos::new(x, y, z);
        tracing::trace!(%pos, template = %place.template, "place block");
        self.grid.set_symbol(pos, place.template.clone());
        Ok(ControlSignal::Normal)
    }

    fn exec_if(&mut self, stmt: &IfStmt) -> EvalResult<ControlSignal> {
        if self.eval_condition(&stmt.condition, "IF")? {
            self.exec_block(&stmt.then_branch)
        } else if let Some(else_branch) = &stmt.else_branch {
            self.exec_block(else_branch)
        } else {
            Ok(ControlSignal::Normal)
        }
    }

    fn exec_while(&mut self, stmt: &WhileStmt) -> EvalResult<ControlSignal> {
        while self.eval_condition(&stmt.condition, "WHILE")? {
            match self.exec_block(&stmt.body)? {
                ControlSignal::Normal | ControlSignal::Continue(_) => {}
                ControlSignal::Break(_) => break,
                signal => return Ok(signal),
            }
        }
        Ok(ControlSignal::Normal)
    }

    fn exec_for(&mut self, stmt: &ForStmt) -> EvalResult<ControlSignal> {
        let enclosing = self.env.enter();
        let result = self.exec_for_scoped(stmt);
        self.env.exit(enclosing);
        result
    }

    /// The body of a `FOR`, inside the scope that holds its loop variable.
    fn exec_for_scoped(&mut self, stmt: &ForStmt) -> EvalResult<ControlSignal> {
        let signal = self.exec_stmt(&stmt.init)?;
        if !signal.is_normal() {
            return Ok(signal);
        }
        while self.eval_condition(&stmt.condition, "FOR")? {
            match self.exec_block(&stmt.body)? {
                ControlSignal::Normal | ControlSignal::Continue(_) => {}
                ControlSignal::Break(_) => break,
                signal => return Ok(signal),
            }
            let signal = self.exec_stmt(&stmt.increment)?;
            if !signal.is_normal() {
                return Ok(signal);
            }
        }
        Ok(ControlSignal::Normal)
    }

    // ══════════════════════════════════════════════════════════════════════
    // Expressions
    // ══════════════════════════════════════════════════════════════════════

    /// Evaluate an expression to a Value.
    pub fn eval_expr(&mut self, expr: &Expr) -> EvalResult<Value> {
        self.tick()?;
        match expr {
            Expr::Binary {
                op,
                token,
                left,
                right,
            } => {
                let l = self.eval_expr(left)?;
                let r = self.eval_expr(right)?;
                ops::binary(*op, *token, l, r, self.max_string_len)
            }
            Expr::Unary { op, token, operand } => {
                let v = self.eval_expr(operand)?;
                ops::unary(*op, *token, v)
            }
            Expr::Literal(lit) => {
                literal::decode(lit).map_err(|reason| EvalError::InvalidLiteral {
                    token: lit.token,
                    reason,
                })
            }
            Expr::Variable(var) => {
                self.env
                    .get(var.index())
                    .cloned()
                    .ok_or(EvalError::UndefinedVariable {
                        token: var.token,
                        index: var.index(),
                    })
            }
            Expr::Constant { constant, .. } => Ok(Value::Float(match constant {
                Constant::Pi => PI,
                Constant::E => E,
            })),
        }
    }

    fn eval_condition(&mut self, expr: &Expr, what: &str) -> EvalResult<bool> {
        match self.eval_expr(expr)? {
            Value::Bool(b) => Ok(b),
            other => Err(EvalError::TypeMismatch {
                token: expr.token(),
                message: format!("{what} condition must be BOOL, got {}", other.value_type()),
            }),
        }
    }

    fn eval_int(&mut self, expr: &Expr, what: &str) -> EvalResult<i32> {
        match self.eval_expr(expr)? {
            Value::Int(n) => Ok(n),
            other => Err(EvalError::TypeMismatch {
                token: expr.token(),
                message: format!(
                    "{what} must be {}, got {}",
                    ValueType::Int,
                    other.value_type()
                ),
            }),
        }
    }
}
