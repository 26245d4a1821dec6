//! Integration tests for the LineBlock evaluator.
//!
//! Programs are written as token streams, parsed, and run against a
//! `MemoryGrid` and a `MemoryHost`:
//! - literal decoding through the whole pipeline
//! - typed assignment and scoping
//! - arithmetic errors
//! - structured control flow, STOP, and legacy GOTO
//! - side effects: PRINT, COMMAND, PLACEBLOCK
//! - gas metering

use lineblock_eval::literal::{decode_bits, encode};
use lineblock_eval::{
    EvalError, EvalResult, Evaluator, MemoryHost, Value, DEFAULT_MAX_STRING_LEN,
};
use lineblock_lexer::{symbol_of, Scanner};
use lineblock_parser::{parse, ParseError};
use lineblock_types::ast::{Program, ValueType};
use lineblock_types::{Direction, GridPos, GridView, MemoryGrid, Symbol, Token, TokenKind};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

use TokenKind::*;

// ══════════════════════════════════════════════════════════════════════════════
// Helpers
// ══════════════════════════════════════════════════════════════════════════════

/// Tokens laid out along the x axis.
fn toks(kinds: &[TokenKind]) -> Vec<Token> {
    kinds
        .iter()
        .enumerate()
        .map(|(i, k)| Token::new(*k, GridPos::new(i as i32, 0, 0)))
        .collect()
}

/// The literal tokens for `value`: its type marker followed by its bits.
fn lit(value: &Value) -> Vec<TokenKind> {
    let marker = match value.value_type() {
        ValueType::Int => Int,
        ValueType::Float => Float,
        ValueType::String => TokenKind::String,
        ValueType::Bool => Bool,
    };
    std::iter::once(marker)
        .chain(encode(value).into_iter().map(|b| if b { One } else { Zero }))
        .collect()
}

fn parse_kinds(kinds: &[TokenKind]) -> Program {
    parse(toks(kinds), &MemoryGrid::new()).expect("program should parse")
}

fn run_on(kinds: &[TokenKind], host: &mut MemoryHost, goto: bool) -> EvalResult<()> {
    let program = parse_kinds(kinds);
    let mut grid = MemoryGrid::new();
    Evaluator::new(&mut grid, host).with_goto(goto).run(&program)
}

/// Run with a fresh host; return the result and everything printed.
fn run(kinds: &[TokenKind]) -> (EvalResult<()>, Vec<std::string::String>) {
    let mut host = MemoryHost::new();
    let result = run_on(kinds, &mut host, false);
    (result, host.output().to_vec())
}

fn output(kinds: &[TokenKind]) -> Vec<std::string::String> {
    let (result, out) = run(kinds);
    assert_eq!(result, Ok(()));
    out
}

fn error(kinds: &[TokenKind]) -> EvalError {
    run(kinds).0.unwrap_err()
}

// ══════════════════════════════════════════════════════════════════════════════
// End to end
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_assign_print_stop() {
    // INT <3> ; PRINT var0 ; STOP ; PRINT 1 (never runs)
    let out = output(&[Int, Int, One, One, Print, UseVar, Stop, Print, Int, One]);
    assert_eq!(out, vec!["3"]);
}

#[test]
fn test_print_float_one() {
    let program = [vec![Print], lit(&Value::Float(1.0))].concat();
    assert_eq!(output(&program), vec!["1.0"]);
}

#[test]
fn test_print_string_literal() {
    let program = [vec![Print], lit(&Value::Str("a".into()))].concat();
    assert_eq!(output(&program), vec!["a"]);
}

#[test]
fn test_float_literal_width_is_a_parse_error() {
    let mut program = vec![Print, Float];
    program.extend([Zero; 31]);
    let err = parse(toks(&program), &MemoryGrid::new()).unwrap_err();
    assert!(matches!(err, ParseError::MalformedLiteral { .. }));

    program.extend([Zero; 2]);
    let err = parse(toks(&program), &MemoryGrid::new()).unwrap_err();
    assert!(matches!(err, ParseError::MalformedLiteral { .. }));
}

#[test]
fn test_concatenation_uses_canonical_text() {
    let program = [vec![Print], lit(&Value::Str("n=".into())), vec![Plus, Int, One, One]].concat();
    assert_eq!(output(&program), vec!["n=3"]);
}

// ══════════════════════════════════════════════════════════════════════════════
// Assignment & scoping
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_chain_length_names_the_variable() {
    // var1 := 1 ; var2 := 2 ; PRINT var1 ; PRINT var2
    let out = output(&[
        Int, VarIndex, Int, One,
        Int, Int, Zero, One, VarIndex, VarIndex,
        Print, UseVar, VarIndex,
        Print, UseVar, VarIndex, VarIndex,
    ]);
    assert_eq!(out, vec!["1", "2"]);
}

#[test]
fn test_assignment_coerces_to_declared_type() {
    let program = [
        vec![Int],
        lit(&Value::Float(2.75)),
        vec![Print, UseVar, Float, Int, One, One, VarIndex, Print, UseVar, VarIndex],
    ]
    .concat();
    assert_eq!(output(&program), vec!["2", "3.0"]);
}

#[test]
fn test_failed_string_conversion() {
    let program = [vec![Int], lit(&Value::Str("x".into()))].concat();
    assert_eq!(
        error(&program),
        EvalError::Conversion {
            token: Token::new(Int, GridPos::new(0, 0, 0)),
            from: ValueType::String,
            to: ValueType::Int,
            text: "x".into(),
        }
    );
}

#[test]
fn test_inner_variable_is_purged_after_block() {
    // IF true { var1 := 1 } ; PRINT var1
    let err = error(&[
        If, FirstArgument, Bool, One,
        SecondArgument, Int, VarIndex, Int, One, BranchEnd,
        Print, UseVar, VarIndex,
    ]);
    assert_eq!(
        err,
        EvalError::UndefinedVariable {
            token: Token::new(UseVar, GridPos::new(11, 0, 0)),
            index: 1,
        }
    );
}

#[test]
fn test_inner_write_shadows_outer_variable() {
    // var0 := 1 ; IF true { var0 := 2 ; PRINT var0 } ; PRINT var0
    let out = output(&[
        Int, Int, One,
        If, FirstArgument, Bool, One,
        SecondArgument, Int, Int, Zero, One, Print, UseVar, BranchEnd,
        Print, UseVar,
    ]);
    assert_eq!(out, vec!["2", "1"]);
}

#[test]
fn test_outer_write_is_seen_by_later_blocks() {
    // var0 := 1 ; var0 := 2 ; IF true { PRINT var0 }
    let out = output(&[
        Int, Int, One,
        Int, Int, Zero, One,
        If, FirstArgument, Bool, One,
        SecondArgument, Print, UseVar, BranchEnd,
    ]);
    assert_eq!(out, vec!["2"]);
}

#[test]
fn test_undefined_variable() {
    assert!(matches!(
        error(&[Print, UseVar, VarIndex, VarIndex]),
        EvalError::UndefinedVariable { index: 2, .. }
    ));
}

// ══════════════════════════════════════════════════════════════════════════════
// Arithmetic
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_int_division_by_zero() {
    // 5 / 0
    let err = error(&[Print, Int, One, Zero, One, Div, Int, Zero]);
    assert_eq!(
        err,
        EvalError::DivisionByZero {
            token: Token::new(Div, GridPos::new(5, 0, 0)),
        }
    );
}

#[test]
fn test_float_division_by_zero() {
    let program = [vec![Print], lit(&Value::Float(5.0)), vec![Div, Int, Zero]].concat();
    assert!(matches!(error(&program), EvalError::DivisionByZero { .. }));
}

#[test]
fn test_string_repeat_negative_count() {
    let program = [
        vec![Print],
        lit(&Value::Str("ab".into())),
        vec![Mul],
        lit(&Value::Int(-3)),
    ]
    .concat();
    assert_eq!(output(&program), vec![""]);
}

#[test]
fn test_huge_string_repeat_is_an_error() {
    let program = [
        vec![Print],
        lit(&Value::Str("ab".into())),
        vec![Mul],
        lit(&Value::Int(i32::MAX)),
    ]
    .concat();
    assert_eq!(
        error(&program),
        EvalError::StringTooLong {
            token: Token::new(Mul, GridPos::new(18, 0, 0)),
            len: 2 * i32::MAX as usize,
            limit: DEFAULT_MAX_STRING_LEN,
        }
    );
}

#[test]
fn test_precedence_through_pipeline() {
    // 1 + 2 * 3
    let out = output(&[Print, Int, One, Plus, Int, Zero, One, Mul, Int, One, One]);
    assert_eq!(out, vec!["7"]);
}

#[test]
fn test_type_mismatch_points_at_operator() {
    let err = error(&[Print, Bool, One, Plus, Int, One]);
    assert_eq!(err.token(), Some(Token::new(Plus, GridPos::new(3, 0, 0))));
    assert!(matches!(err, EvalError::TypeMismatch { .. }));
}

// ══════════════════════════════════════════════════════════════════════════════
// Control flow
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_if_else() {
    let out = output(&[
        If, FirstArgument, Bool, Zero,
        SecondArgument, Print, Int, One, BranchEnd,
        ThirdArgument, Print, Int, Zero, One, BranchEnd,
    ]);
    assert_eq!(out, vec!["2"]);
}

#[test]
fn test_condition_must_be_bool() {
    let err = error(&[If, FirstArgument, Int, One, SecondArgument, BranchEnd]);
    assert_eq!(
        err,
        EvalError::TypeMismatch {
            token: Token::new(Int, GridPos::new(2, 0, 0)),
            message: "IF condition must be BOOL, got INT".into(),
        }
    );
}

#[test]
fn test_stop_inside_infinite_while_ends_run() {
    let out = output(&[
        While, FirstArgument, Bool, One,
        SecondArgument, Print, Int, One, Stop, BranchEnd,
        Print, Int, Zero, One,
    ]);
    assert_eq!(out, vec!["1"]);
}

#[test]
fn test_break_leaves_only_the_loop() {
    let out = output(&[
        While, FirstArgument, Bool, One,
        SecondArgument, Print, Int, One, Break, Print, Int, One, One, BranchEnd,
        Print, Int, Zero, One,
    ]);
    assert_eq!(out, vec!["1", "2"]);
}

/// FOR var0 := 0 ; var0 < 3 ; var0 := var0 + 1 { … }
fn counting_for(body: &[TokenKind]) -> Vec<TokenKind> {
    [
        &[
            For,
            FirstArgument, Int, Int, Zero,
            SecondArgument, UseVar, Lt, Int, One, One,
            ThirdArgument, Int, UseVar, Plus, Int, One,
            FourthArgument,
        ][..],
        body,
        &[BranchEnd],
    ]
    .concat()
}

#[test]
fn test_for_loop_counts() {
    let out = output(&counting_for(&[Print, UseVar]));
    assert_eq!(out, vec!["0", "1", "2"]);
}

#[test]
fn test_for_continue_runs_increment() {
    // IF var0 == 1 { CONTINUE } ; PRINT var0
    let body = [
        If, FirstArgument, UseVar, Eq, Int, One,
        SecondArgument, Continue, BranchEnd,
        Print, UseVar,
    ];
    assert_eq!(output(&counting_for(&body)), vec!["0", "2"]);
}

#[test]
fn test_for_variable_is_scoped_to_loop() {
    let mut program = counting_for(&[]);
    program.extend([Print, UseVar]);
    assert!(matches!(
        error(&program),
        EvalError::UndefinedVariable { index: 0, .. }
    ));
}

#[test]
fn test_stray_break_at_root() {
    let err = error(&[Break]);
    assert_eq!(
        err,
        EvalError::StrayControl {
            token: Token::new(Break, GridPos::new(0, 0, 0)),
        }
    );
    assert_eq!(err.to_string(), "error at BREAK at (0, 0, 0): BREAK outside a loop");
}

// ══════════════════════════════════════════════════════════════════════════════
// GOTO
// ══════════════════════════════════════════════════════════════════════════════

/// var0 := 0 ; var0 := var0 + 1 ; IF var0 < 3 { GOTO 1 } ; PRINT var0
const GOTO_LOOP: &[TokenKind] = &[
    Int, Int, Zero,
    Int, UseVar, Plus, Int, One,
    If, FirstArgument, UseVar, Lt, Int, One, One,
    SecondArgument, Goto, Int, One, BranchEnd,
    Print, UseVar,
];

#[test]
fn test_goto_enabled_jumps_to_root_statement() {
    let mut host = MemoryHost::new();
    assert_eq!(run_on(GOTO_LOOP, &mut host, true), Ok(()));
    assert_eq!(host.output(), &["3".to_string()]);
}

#[test]
fn test_goto_disabled_by_default() {
    assert!(matches!(error(GOTO_LOOP), EvalError::GotoDisabled { .. }));
}

#[test]
fn test_goto_out_of_bounds() {
    let mut host = MemoryHost::new();
    let result = run_on(&[Goto, Int, Zero, One, Zero, One], &mut host, true);
    assert_eq!(
        result,
        Err(EvalError::GotoOutOfBounds {
            token: Token::new(Goto, GridPos::new(0, 0, 0)),
            target: 10,
            len: 1,
        })
    );
}

// ══════════════════════════════════════════════════════════════════════════════
// Side effects
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_command_runs_registered_hook() {
    let mut host = MemoryHost::new();
    host.register_command(GridPos::new(1, 0, 0));
    assert_eq!(run_on(&[Stop, Command], &mut host, false), Ok(()));
    assert!(host.executed().is_empty());

    let mut host = MemoryHost::new();
    host.register_command(GridPos::new(0, 0, 0));
    let result = run_on(&[Command, Command], &mut host, false);
    assert!(matches!(result, Err(EvalError::MissingCommandHook { .. })));
    assert_eq!(host.executed(), &[GridPos::new(0, 0, 0)]);
}

#[test]
fn test_missing_command_hook() {
    assert_eq!(
        error(&[Command]),
        EvalError::MissingCommandHook {
            token: Token::new(Command, GridPos::new(0, 0, 0)),
        }
    );
}

#[test]
fn test_failing_command_keeps_earlier_effects() {
    let mut host = MemoryHost::new();
    host.register_failing_command(GridPos::new(3, 0, 0), "no fuel");
    let result = run_on(&[Print, Int, One, Command, Print, Int, Zero, One], &mut host, false);
    assert_eq!(
        result,
        Err(EvalError::CommandFailed {
            token: Token::new(Command, GridPos::new(3, 0, 0)),
            message: "no fuel".into(),
        })
    );
    assert_eq!(host.output(), &["1".to_string()]);
}

fn line(grid: &mut MemoryGrid, start: GridPos, direction: Direction, kinds: &[TokenKind]) {
    let symbols: Vec<&str> = kinds.iter().map(|k| symbol_of(*k)).collect();
    grid.place_line(start, direction, &symbols);
}

#[test]
fn test_place_block_writes_template_to_grid() {
    // PLACEBLOCK at the origin heading east: x = 1 (up), y = 1 (down),
    // z = 3 (north), fourth marker south with the template behind it.
    let mut grid = MemoryGrid::new();
    line(&mut grid, GridPos::new(0, 0, 0), Direction::East, &[PlaceBlock, Stop]);
    line(&mut grid, GridPos::new(0, 1, 0), Direction::Up, &[FirstArgument, Int, One]);
    line(&mut grid, GridPos::new(0, -1, 0), Direction::Down, &[SecondArgument, Int, Zero, One]);
    line(&mut grid, GridPos::new(0, 0, -1), Direction::North, &[ThirdArgument, Int, One, One]);
    line(&mut grid, GridPos::new(0, 0, 1), Direction::South, &[FourthArgument]);
    grid.place(GridPos::new(0, 0, 2), "oak_planks");

    let tokens = Scanner::new(&grid)
        .scan(GridPos::new(0, 0, 0), Direction::East)
        .unwrap();
    let program = parse(tokens, &grid).unwrap();

    let mut host = MemoryHost::new();
    Evaluator::new(&mut grid, &mut host).run(&program).unwrap();
    assert_eq!(grid.symbol_at(GridPos::new(1, 2, 3)), Symbol::new("oak_planks"));
}

#[test]
fn test_place_block_requires_int_coordinates() {
    let mut grid = MemoryGrid::new();
    let tokens = toks(&[
        PlaceBlock,
        FirstArgument, Int, One,
        SecondArgument, Bool, One,
        ThirdArgument, Int, One,
        FourthArgument,
    ]);
    let program = parse(tokens, &grid).unwrap();
    let mut host = MemoryHost::new();
    let err = Evaluator::new(&mut grid, &mut host).run(&program).unwrap_err();
    assert!(matches!(err, EvalError::TypeMismatch { .. }));
    assert!(grid.is_empty());
}

// ══════════════════════════════════════════════════════════════════════════════
// Gas
// ══════════════════════════════════════════════════════════════════════════════

#[test]
fn test_gas_stops_endless_loop() {
    let program = parse_kinds(&[While, FirstArgument, Bool, One, SecondArgument, BranchEnd]);
    let mut grid = MemoryGrid::new();
    let mut host = MemoryHost::new();
    let result = Evaluator::new(&mut grid, &mut host)
        .with_gas_limit(100)
        .run(&program);
    assert_eq!(result, Err(EvalError::GasExhausted { limit: 100 }));
}

// ══════════════════════════════════════════════════════════════════════════════
// Literal properties
// ══════════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn prop_int_decoding_is_stable(bits in prop::collection::vec(any::<bool>(), 1..=64)) {
        let first = decode_bits(ValueType::Int, &bits).unwrap();
        let second = decode_bits(ValueType::Int, &bits).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_int_reencodes_to_low_32_bits(bits in prop::collection::vec(any::<bool>(), 32)) {
        let value = decode_bits(ValueType::Int, &bits).unwrap();
        prop_assert_eq!(encode(&value), bits);
    }

    #[test]
    fn prop_string_reencodes(bytes in prop::collection::vec(any::<u8>(), 1..16)) {
        let bits: Vec<bool> = bytes
            .iter()
            .rev()
            .flat_map(|b| (0..8).map(move |i| (b >> i) & 1 == 1))
            .collect();
        let value = decode_bits(ValueType::String, &bits).unwrap();
        prop_assert_eq!(encode(&value), bits);
    }

    #[test]
    fn prop_float_width_is_exact(len in 1usize..64) {
        let bits = vec![false; len];
        prop_assert_eq!(decode_bits(ValueType::Float, &bits).is_ok(), len == 32);
    }
}
