//! Integration tests for the Core parser
//!
//! - Whole programs parse and keep every token as a leaf
//! - Panic-mode recovery at declaration and block-item boundaries
//! - Property test over generated expressions

use corefront::analyze;
use corefront::parser::constants::MAX_NESTING_DEPTH;
use corefront::parser::lexer::Lexer;
use corefront::parser::parse::{Parser, SyntaxErrorKind};
use corefront::parser::token::{Token, TokenKind};
use corefront::parser::tree::{ParseTreeNode, Production};
use corefront::report::TreePrinter;
use proptest::prelude::*;
use rstest::rstest;

const FACTORIAL: &str = include_str!("../samples/factorial.core");
const ARRAYS: &str = include_str!("../samples/arrays.core");
const CONTROL_FLOW: &str = include_str!("../samples/control_flow.core");

fn token_pairs(tokens: &[Token]) -> Vec<(TokenKind, String)> {
    tokens
        .iter()
        .filter(|t| t.kind != TokenKind::Eof)
        .map(|t| (t.kind, t.lexeme.clone()))
        .collect()
}

fn leaf_pairs(tree: &ParseTreeNode) -> Vec<(TokenKind, String)> {
    tree.leaves()
        .into_iter()
        .map(|t| (t.kind, t.lexeme.clone()))
        .collect()
}

#[rstest]
#[case::factorial(FACTORIAL)]
#[case::arrays(ARRAYS)]
#[case::control_flow(CONTROL_FLOW)]
#[case::prototype("int f(int a, float b); bool g(void);")]
#[case::globals("char c = 'x'; float f = 1'000.5; bool b = !true || false;")]
fn test_valid_program_keeps_every_token(#[case] source: &str) {
    let analysis = analyze(source);

    assert!(analysis.lex_errors.is_empty(), "{:?}", analysis.lex_errors);
    assert!(
        analysis.syntax.is_success(),
        "{:?}",
        analysis.syntax.diagnostics()
    );

    let tree = analysis.syntax.tree().unwrap();
    assert_eq!(leaf_pairs(tree), token_pairs(&analysis.tokens));
}

#[test]
fn test_sample_structure() {
    let tree = Parser::new(FACTORIAL).parse_program().unwrap();

    let functions = tree.find_all(Production::FunctionDeclaration);
    assert_eq!(functions.len(), 2);
    assert_eq!(tree.find_all(Production::InputStatement).len(), 1);
    assert!(!tree.find_all(Production::ReturnStatement).is_empty());
}

#[test]
fn test_missing_initializer_at_end_of_input_fails() {
    let analysis = Parser::new("int x = ;").parse();

    assert_eq!(analysis.diagnostics().len(), 1);
    assert_eq!(
        analysis.diagnostics()[0].kind,
        SyntaxErrorKind::UnexpectedFactor
    );
    assert!(analysis.panicked());
    assert!(analysis.tree().is_none());
    assert!(analysis.into_result().is_err());
}

#[test]
fn test_recovers_at_next_declaration() {
    let analysis = Parser::new("int x = ; int y;").parse();

    assert_eq!(analysis.diagnostics().len(), 1);
    assert!(!analysis.panicked());
    assert!(!analysis.is_success());

    let tree = analysis.tree().unwrap();
    assert_eq!(tree.children().len(), 1);
    let names: Vec<_> = tree
        .leaves()
        .iter()
        .filter(|t| t.kind == TokenKind::Identifier)
        .map(|t| t.lexeme.clone())
        .collect();
    assert_eq!(names, vec!["y"]);
}

#[test]
fn test_each_damaged_declaration_is_reported() {
    let analysis = Parser::new("int a = ; float b = * 2; int c; char d").parse();

    let kinds: Vec<_> = analysis.diagnostics().iter().map(|d| d.kind).collect();
    assert_eq!(
        kinds,
        vec![
            SyntaxErrorKind::UnexpectedFactor,
            SyntaxErrorKind::UnexpectedFactor,
            // Resynchronization stopped on the `;` after `* 2`
            SyntaxErrorKind::MissingDataType,
            SyntaxErrorKind::TokenMismatch,
        ]
    );
    assert_eq!(analysis.diagnostics()[3].expected, Some(TokenKind::Semicolon));
    assert_eq!(analysis.diagnostics()[3].found, TokenKind::Eof);
    assert!(analysis.panicked());
}

#[test]
fn test_recovery_inside_block() {
    let analysis = Parser::new("int main() { x = ; while (1) { } return 0; }").parse();

    assert_eq!(analysis.diagnostics().len(), 1);
    assert!(!analysis.panicked());

    // Everything up to the next synchronizing token is discarded
    let tree = analysis.tree().unwrap();
    assert_eq!(tree.find_all(Production::WhileStatement).len(), 1);
    assert_eq!(tree.find_all(Production::ReturnStatement).len(), 1);
    assert!(tree.find_all(Production::Assignment).is_empty());
}

#[test]
fn test_statement_at_top_level_needs_data_type() {
    let analysis = Parser::new("x = 1; int y;").parse();

    assert_eq!(
        analysis.diagnostics()[0].kind,
        SyntaxErrorKind::MissingDataType
    );
    let tree = analysis.tree().unwrap();
    assert_eq!(tree.find_all(Production::VariableDeclaration).len(), 1);
}

#[test]
fn test_unclosed_subscript_stops_the_parse() {
    let analysis = Parser::new("int main() { a[1 = 2; } int later;").parse();

    assert_eq!(analysis.diagnostics().len(), 1);
    assert_eq!(
        analysis.diagnostics()[0].kind,
        SyntaxErrorKind::MalformedSubscript
    );
    assert!(analysis.panicked());
}

fn deep_parentheses(depth: usize) -> String {
    format!("int x = {}1{};", "(".repeat(depth), ")".repeat(depth))
}

fn deep_else_if(depth: usize) -> String {
    format!(
        "int main() {{ if (a) {{ }}{} return 0; }}",
        " else if (a) { }".repeat(depth)
    )
}

fn deep_blocks(depth: usize) -> String {
    format!("int main() {}{}", "{ ".repeat(depth), "} ".repeat(depth))
}

#[rstest]
#[case::parentheses(deep_parentheses(10_000))]
#[case::unary(format!("int x = {}1;", "-".repeat(10_000)))]
#[case::exponent(format!("int x = {}1;", "2 ^ ".repeat(10_000)))]
#[case::else_if(deep_else_if(10_000))]
#[case::blocks(deep_blocks(10_000))]
fn test_deep_nesting_aborts_the_parse(#[case] source: String) {
    let analysis = Parser::new(&source).parse();

    assert_eq!(analysis.diagnostics().len(), 1);
    assert_eq!(
        analysis.diagnostics()[0].kind,
        SyntaxErrorKind::NestingTooDeep
    );
    assert!(analysis.panicked());
    assert!(analysis.tree().is_none());
}

#[rstest]
#[case::parentheses(deep_parentheses(50))]
#[case::else_if(deep_else_if(50))]
#[case::blocks(deep_blocks(50))]
fn test_moderate_nesting_parses(#[case] source: String) {
    let analysis = Parser::new(&source).parse();

    assert!(analysis.is_success(), "{:?}", analysis.diagnostics());
}

#[test]
fn test_nesting_limit_counts_open_levels_only() {
    // Siblings do not add up: each group closes before the next opens
    let group = format!("{}1{}", "(".repeat(50), ")".repeat(50));
    let groups = vec![group; MAX_NESTING_DEPTH * 2].join(" + ");
    let analysis = Parser::new(&format!("int x = {};", groups)).parse();

    assert!(analysis.is_success(), "{:?}", analysis.diagnostics());
}

#[test]
fn test_error_token_fails_the_parse() {
    let analysis = analyze("int x = 1'00;");

    assert_eq!(analysis.lex_errors.len(), 1);
    assert!(!analysis.syntax.is_success());
    assert!(!analysis.is_clean());
}

#[test]
fn test_from_tokens_matches_new() {
    let source = "int main() { printf(\"%d\", 1 + 2); }";
    let tokens = Lexer::new(source).tokenize();

    let from_tokens = Parser::from_tokens(tokens).parse_program().unwrap();
    let from_source = Parser::new(source).parse_program().unwrap();
    assert_eq!(from_tokens, from_source);
}

#[test]
fn test_rendered_tree_for_assignment() {
    let tree = Parser::new("int main() { a = b * 2; }").parse_program().unwrap();
    let assignment = tree.find_all(Production::Assignment)[0];

    let expected = "\
Assignment(
  IDENTIFIER: \"a\",
  ASSIGN: \"=\",
  Multiplicative(
    Factor(
      IDENTIFIER: \"b\"
    ),
    MULTIPLY: \"*\",
    Factor(
      Const(
        INTEGER_LITERAL: \"2\"
      )
    )
  )
)";
    assert_eq!(TreePrinter::new(assignment).to_string(), expected);
}

fn expression() -> impl Strategy<Value = String> {
    let leaf = prop_oneof![
        "[a-z][a-z0-9]{6,10}",
        "[0-9]{1,4}",
        "[0-9]{1,3}\\.[0-9]{1,3}",
        Just("true".to_string()),
        Just("'c'".to_string()),
    ];
    leaf.prop_recursive(4, 32, 3, |inner| {
        let op = prop_oneof![
            Just("+"),
            Just("-"),
            Just("*"),
            Just("/"),
            Just("%"),
            Just("^"),
            Just("<"),
            Just(">="),
            Just("=="),
            Just("!="),
            Just("&&"),
            Just("||"),
        ];
        prop_oneof![
            (inner.clone(), op, inner.clone()).prop_map(|(l, op, r)| format!("{} {} {}", l, op, r)),
            inner.clone().prop_map(|e| format!("({})", e)),
            inner.clone().prop_map(|e| format!("-{}", e)),
            inner.clone().prop_map(|e| format!("!{}", e)),
            prop::collection::vec(inner, 0..3)
                .prop_map(|args| format!("callee({})", args.join(", "))),
        ]
    })
}

proptest! {
    #[test]
    fn test_generated_expressions_parse_losslessly(exp in expression()) {
        let source = format!("int main() {{ result = {}; return {}; }}", exp, exp);
        let analysis = analyze(&source);

        prop_assert!(analysis.syntax.is_success(), "{:?}", analysis.syntax.diagnostics());
        let tree = analysis.syntax.tree().unwrap();
        prop_assert_eq!(leaf_pairs(tree), token_pairs(&analysis.tokens));
    }
}
