//! Tokenizer tests: parenthesis padding, whitespace splitting, positions.

use lispy_lexer::{tokenize, Lexer, TokenKind};
use pretty_assertions::assert_eq;

// ─────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────

fn kinds(source: &str) -> Vec<TokenKind> {
    Lexer::new(source).lex().into_iter().map(|t| t.kind).collect()
}

fn atom(s: &str) -> TokenKind {
    TokenKind::Atom(s.to_string())
}

/// The tokenization rule stated directly: pad parens, split on whitespace.
fn padded_split(source: &str) -> Vec<String> {
    source
        .replace('(', " ( ")
        .replace(')', " ) ")
        .split_whitespace()
        .map(String::from)
        .collect()
}

// ─────────────────────────────────────────────────────────────────────
// Basics
// ─────────────────────────────────────────────────────────────────────

#[test]
fn empty_input_yields_no_tokens() {
    assert!(tokenize("").is_empty());
    assert!(tokenize("   \n\t ").is_empty());
}

#[test]
fn simple_application() {
    assert_eq!(tokenize("(+ 1 2)"), vec!["(", "+", "1", "2", ")"]);
}

#[test]
fn parens_need_no_surrounding_space() {
    assert_eq!(
        tokenize("(define(f x)(g x))"),
        vec!["(", "define", "(", "f", "x", ")", "(", "g", "x", ")", ")"]
    );
}

#[test]
fn atoms_keep_their_text() {
    assert_eq!(
        kinds("set! equal? 3.14 -7 #t"),
        vec![atom("set!"), atom("equal?"), atom("3.14"), atom("-7"), atom("#t")]
    );
}

#[test]
fn unbalanced_input_still_tokenizes() {
    assert_eq!(
        kinds(")("),
        vec![TokenKind::RParen, TokenKind::LParen]
    );
}

#[test]
fn newlines_and_tabs_are_whitespace() {
    assert_eq!(tokenize("(a\n\tb\r\nc)"), vec!["(", "a", "b", "c", ")"]);
}

#[test]
fn unicode_whitespace_separates_atoms() {
    assert_eq!(tokenize("a\u{00a0}b"), vec!["a", "b"]);
}

#[test]
fn matches_pad_and_split_rule() {
    let sources = [
        "(define fact (lambda (n) (if (<= n 1) 1 (* n (fact (- n 1))))))",
        "((()))",
        "  (quote   (a b . c))  ",
        "x)y(z",
        "(car (list))",
    ];
    for src in sources {
        assert_eq!(tokenize(src), padded_split(src), "source {src:?}");
    }
}

#[test]
fn token_spans_point_at_source() {
    let tokens = Lexer::new("(foo\n bar)").lex();
    let positions: Vec<(u32, u32)> = tokens
        .iter()
        .map(|t| (t.span.start_line, t.span.start_col))
        .collect();
    assert_eq!(positions, vec![(1, 1), (1, 2), (2, 2), (2, 5)]);
}
