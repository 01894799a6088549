mod common;

use tac_compiler::{
    compile::{parse_listing, SemanticError, ValueType},
    lex::{debug_print_tokens, LexError},
    parsing::{BinOp, ParseError},
    prelude::*,
    tokens::TokenKind,
};

const LOOPS: &str = include_str!("loops.src");
const NESTED: &str = include_str!("nested.src");

#[test]
fn test_compile_loops() {
    common::init_logger();
    debug_print_tokens(LOOPS);

    match compile_str(LOOPS) {
        Ok(code) => assert_eq!(listing(&code), include_str!("loops.tac")),
        Err(err) => panic!("{}", err.report(LOOPS)),
    }
}

#[test]
fn test_compile_nested() {
    common::init_logger();

    match compile_str(NESTED) {
        Ok(code) => {
            assert_eq!(listing(&code), include_str!("nested.tac"));
            assert_eq!(parse_listing(include_str!("nested.tac")).unwrap(), code);
        }
        Err(err) => panic!("{}", err.report(NESTED)),
    }
}

#[test]
fn test_straight_line_assignments() {
    let code = compile_str("x = 5\ny = 10\nprint y").unwrap();

    assert_eq!(
        code,
        vec![
            Instr::Store {
                value: Operand::Int(5),
                target: "x".into(),
            },
            Instr::Store {
                value: Operand::Int(10),
                target: "y".into(),
            },
            Instr::Print(Operand::Var("y".into())),
        ]
    );
}

#[test]
fn test_while_loop() {
    let code = compile_str("x = 1\nwhile x < 3:\n    print x\n    x = x + 1").unwrap();

    assert_eq!(
        code[1..],
        [
            Instr::Label(Label(1)),
            Instr::Binary {
                op: BinOp::Less,
                lhs: Operand::Var("x".into()),
                rhs: Operand::Int(3),
                result: Temp(1),
            },
            Instr::IfNotGoto {
                cond: Operand::Temp(Temp(1)),
                label: Label(2),
            },
            Instr::Print(Operand::Var("x".into())),
            Instr::Binary {
                op: BinOp::Add,
                lhs: Operand::Var("x".into()),
                rhs: Operand::Int(1),
                result: Temp(2),
            },
            Instr::Store {
                value: Operand::Temp(Temp(2)),
                target: "x".into(),
            },
            Instr::Goto(Label(1)),
            Instr::Label(Label(2)),
        ]
    );
}

#[test]
fn test_unassigned_condition_variable() {
    let err = compile_str("if x == 5:\n    y = 1\nelse:\n    y = 2").unwrap_err();

    assert_eq!(
        err,
        CompileError::Semantic(SemanticError::NameError { name: "x".into() })
    );
}

#[test]
fn test_mixed_operand_types() {
    let err = compile_str("x = 5\ny = \"a\"\nz = x + y").unwrap_err();

    assert_eq!(
        err,
        CompileError::Semantic(SemanticError::TypeError {
            left: ValueType::Number,
            operator: BinOp::Add,
            right: ValueType::Text,
        })
    );
    assert_eq!(
        err.to_string(),
        "type error: operator '+' cannot be applied to types 'number' and 'text'"
    );
}

#[test]
fn test_unchecked_compile_is_garbage_in_garbage_out() {
    let source = "x = 5\ny = \"a\"\nz = x + y\nprint w";
    assert!(compile_str(source).is_err());

    let code = compile_with(source, CompileConf { check: false }).unwrap();
    assert_eq!(code.len(), 5);
    assert_eq!(code[4], Instr::Print(Operand::Var("w".into())));
}

#[test]
fn test_lex_error_report() {
    let source = "x = 1\ny = x ? 2";
    let err = compile_str(source).unwrap_err();

    assert_eq!(
        err,
        CompileError::Lex(LexError::UnknownCharacter { ch: '?', offset: 12 })
    );
    assert_eq!(err.offset(), Some(12));
    assert_eq!(
        err.report(source),
        "error: unexpected character '?' at offset 12\n --> 2:7\n  |\n2 | y = x ? 2\n  |       ^\n"
    );
}

#[test]
fn test_premature_end_of_input() {
    let err = compile_str("x = (1 + 2").unwrap_err();

    assert_eq!(
        err,
        CompileError::Parse(ParseError::Mismatch {
            expected: TokenKind::RightParen,
            found: TokenKind::EOS,
            offset: 10,
        })
    );
}

#[test]
fn test_not_has_no_production() {
    let err = compile_str("x = not 1").unwrap_err();
    assert!(matches!(
        err,
        CompileError::Parse(ParseError::ExpectedTerm { offset: 4, .. })
    ));
}

#[test]
fn test_empty_source() {
    assert_eq!(compile_str("").unwrap(), vec![]);
    assert_eq!(compile_str("\n\n# nothing here\n").unwrap(), vec![]);
}
