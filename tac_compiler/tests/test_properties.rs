mod common;

use std::collections::{BTreeMap, BTreeSet};
use tac_compiler::{
    compile::{parse_listing, Analyzer, IrGen},
    lex::{detokenize, tokenize},
    parsing::parse,
    prelude::*,
    tokens::{Lexeme, TokenKind},
};

const FIXTURES: &[&str] = &[
    include_str!("loops.src"),
    include_str!("nested.src"),
    "x = 5\ny = 10\nprint y",
    "x = 1\nwhile x < 3:\n    print x\n    x = x + 1",
    "a = 1\nif a:\n  if a == 1:\n    print 'deep'\nelse:\n  print 'no'",
    "for (i = 0; i < 3; i = i + 1)\n  for (j = 0; j < i; j = j + 1):\n    print i * j",
    "s = \"tab\there\" + 'q\\\"'\nprint s",
    "n = 1.50 + 2.\nprint [n]",
    "T1 = 5\nT2 = T1 + 1\nprint T2",
];

fn lexemes(source: &str) -> Vec<(TokenKind, Lexeme)> {
    tokenize(source)
        .unwrap()
        .into_iter()
        .map(|token| (token.kind, token.lexeme))
        .collect()
}

#[test]
fn test_lexing_is_idempotent() {
    common::init_logger();

    for source in FIXTURES {
        let text = detokenize(&tokenize(source).unwrap());
        assert_eq!(lexemes(source), lexemes(&text), "re-lexing {:?}", text);
        assert_eq!(detokenize(&tokenize(&text).unwrap()), text);
    }
}

#[test]
fn test_generation_is_deterministic() {
    for source in FIXTURES {
        let program = parse(tokenize(source).unwrap()).unwrap();
        assert_eq!(IrGen::new().generate(&program), IrGen::new().generate(&program));
        assert_eq!(compile_str(source).unwrap(), compile_str(source).unwrap());
    }
}

#[test]
fn test_labels_are_balanced() {
    for source in FIXTURES {
        let code = compile_str(source).unwrap();

        let mut defined = BTreeMap::new();
        let mut targets = BTreeSet::new();
        for instr in &code {
            if let Instr::Label(label) = instr {
                *defined.entry(*label).or_insert(0) += 1;
            }
            targets.extend(instr.jump_target());
        }

        assert!(defined.values().all(|count| *count == 1), "{:?}", defined);
        assert_eq!(defined.keys().copied().collect::<BTreeSet<_>>(), targets);
    }
}

#[test]
fn test_listing_round_trip() {
    for source in FIXTURES {
        let code = compile_str(source).unwrap();
        assert_eq!(parse_listing(&listing(&code)).unwrap(), code);
    }
}

/// Programs of three chained assignments over three variables,
/// accepted exactly when every read comes after a write.
#[test]
fn test_analyzer_accepts_assigned_reads() {
    const NAMES: [&str; 3] = ["a", "b", "c"];

    let mut stmts = vec![];
    for target in NAMES {
        stmts.push((format!("{} = 1", target), None));
        for read in NAMES {
            stmts.push((format!("{} = {} + 10", target, read), Some(read)));
        }
    }

    for first in &stmts {
        for second in &stmts {
            for third in &stmts {
                let program = [first, second, third];
                let source = program.iter().map(|(text, _)| text.as_str()).collect::<Vec<_>>().join("\n");

                let mut assigned = BTreeSet::new();
                let mut expected = true;
                for (text, read) in program {
                    if let Some(read) = read {
                        expected &= assigned.contains(read);
                    }
                    assigned.insert(&text[..1]);
                }

                let tree = parse(tokenize(&source).unwrap()).unwrap();
                assert_eq!(Analyzer::new().analyze(&tree).is_ok(), expected, "{}", source);
            }
        }
    }
}
