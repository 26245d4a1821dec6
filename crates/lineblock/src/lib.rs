//! LineBlock: a programming language laid out as lines of cells in a 3D grid.
//!
//! ```text
//! Grid → Scanner → tokens → Parser → Program → Evaluator → grid writes / commands / text
//! ```
//!
//! [`run`] is the whole pipeline. [`compile`] stops after parsing, for hosts
//! that want to inspect or cache the program.
//!
//! # Debugging
//!
//! Call [`init_tracing`] and set `RUST_LOG`:
//! - `RUST_LOG=lineblock=debug` - one line per stage
//! - `RUST_LOG=lineblock_lexer=trace` - every token and redirect

mod config;
mod error;
mod logging;

pub use config::RunConfig;
pub use error::RunError;
pub use logging::init_tracing;

pub use lineblock_eval::{HookError, Host, MemoryHost, Value};
pub use lineblock_types::ast::Program;
pub use lineblock_types::{Diagnostic, Direction, Grid, GridPos, GridView, MemoryGrid, Stage, Symbol};

use lineblock_eval::Evaluator;
use lineblock_lexer::Scanner;

/// Scan and parse the program that starts at `start` heading `direction`.
#[tracing::instrument(level = "debug", skip(grid, config))]
pub fn compile(
    grid: &dyn GridView,
    start: GridPos,
    direction: Direction,
    config: &RunConfig,
) -> Result<Program, RunError> {
    let tokens = Scanner::new(grid)
        .with_max_depth(config.max_scan_depth)
        .scan(start, direction)?;
    let program = lineblock_parser::parse(tokens, grid)?;
    tracing::debug!(statements = program.body.len(), "compiled");
    Ok(program)
}

/// Scan, parse, and run the program at `start`.
///
/// The first error from any stage ends the run. It is sent to the host as
/// `"{error_prefix} {error}"` and returned. Side effects performed before it
/// stay in place.
#[tracing::instrument(level = "debug", skip(grid, host, config))]
pub fn run<G: Grid>(
    grid: &mut G,
    host: &mut dyn Host,
    start: GridPos,
    direction: Direction,
    config: &RunConfig,
) -> Result<(), RunError> {
    let result = compile_and_execute(grid, host, start, direction, config);
    if let Err(err) = &result {
        tracing::debug!(error = %err, "run failed");
        host.emit_text(&format!("{} {err}", config.error_prefix));
    }
    result
}

fn compile_and_execute<G: Grid>(
    grid: &mut G,
    host: &mut dyn Host,
    start: GridPos,
    direction: Direction,
    config: &RunConfig,
) -> Result<(), RunError> {
    let program = compile(&*grid, start, direction, config)?;
    Evaluator::new(grid, host)
        .with_gas_limit(config.gas_limit)
        .with_max_string_len(config.max_string_len)
        .with_goto(config.goto_enabled)
        .run(&program)?;
    Ok(())
}
