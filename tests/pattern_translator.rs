use path_pattern_rs::pattern::{PatternError, Token, tokenize, translate, translate_with};
use path_pattern_rs::{CompileOptions, DuplicateVariablePolicy};

#[test]
fn translator_when_pattern_has_variables_then_lists_names_in_order() {
    let translation =
        translate("docs/{sort}-{title}.{ext:txt|json|csv}").expect("pattern should translate");

    assert_eq!(translation.variables.as_slice(), ["sort", "title", "ext"]);
    assert_eq!(
        translation.source,
        r"^(?:docs/(?P<__var0>[^/]+)-(?P<__var1>[^/]+)\.(?P<__var2>txt|json|csv))$"
    );
}

#[test]
fn translator_when_pattern_uses_groups_then_emits_non_capturing_groups() {
    let translation = translate("docs/({sort}-)?{title}.(txt|json)").expect("should translate");

    assert_eq!(
        translation.source,
        r"^(?:docs/(?:(?P<__var0>[^/]+)-)?(?P<__var1>[^/]+)\.(?:txt|json))$"
    );
    assert_eq!(translation.variables.len(), 2);
}

#[test]
fn translator_when_pattern_has_wildcards_then_separators_are_respected() {
    let (source, variables) = translate("docs/*/**/{title}.txt")
        .expect("should translate")
        .into_parts();

    assert_eq!(
        source,
        r"^(?:docs/[^/]*/(?:[^/]+/)*(?P<__var0>[^/]+)\.txt)$"
    );
    assert_eq!(variables.as_slice(), ["title"]);
}

#[test]
fn translator_when_pattern_is_plain_then_has_no_variables() {
    let translation = translate("assets/logo.png").expect("should translate");

    assert!(translation.variables.is_empty());
    assert_eq!(translation.source, r"^(?:assets/logo\.png)$");
}

#[test]
fn translator_when_brace_is_unbalanced_then_reports_unterminated_variable() {
    let err = translate("docs/{title.txt").expect_err("unbalanced brace should fail");

    match err {
        PatternError::UnterminatedVariable { pattern, start } => {
            assert_eq!(pattern, "docs/{title.txt");
            assert_eq!(start, 5);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn translator_when_closing_brace_is_stray_then_returns_error() {
    let err = translate("docs/title}.txt").expect_err("stray brace should fail");

    match err {
        PatternError::UnexpectedClosingBrace { index, .. } => assert_eq!(index, 10),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn translator_when_parentheses_are_unbalanced_then_returns_error() {
    match translate("docs/(a|b").expect_err("open group should fail") {
        PatternError::UnterminatedGroup { start, .. } => assert_eq!(start, 5),
        other => panic!("unexpected error: {other:?}"),
    }

    match translate("docs/a)").expect_err("stray parenthesis should fail") {
        PatternError::UnexpectedClosingParenthesis { index, .. } => assert_eq!(index, 6),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn translator_when_group_is_empty_then_returns_error() {
    match translate("docs/()x").expect_err("empty group should fail") {
        PatternError::EmptyGroup { start, .. } => assert_eq!(start, 5),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn translator_when_variable_name_is_invalid_then_returns_error() {
    match translate("{}").expect_err("empty name should fail") {
        PatternError::VariableMissingName { start, .. } => assert_eq!(start, 0),
        other => panic!("unexpected error: {other:?}"),
    }

    match translate("{:txt}").expect_err("missing name should fail") {
        PatternError::VariableMissingName { .. } => {}
        other => panic!("unexpected error: {other:?}"),
    }

    match translate("{1st}").expect_err("digit start should fail") {
        PatternError::VariableInvalidStart { name, found, .. } => {
            assert_eq!(name, "1st");
            assert_eq!(found, '1');
        }
        other => panic!("unexpected error: {other:?}"),
    }

    match translate("{file-name}").expect_err("dash should fail") {
        PatternError::VariableInvalidCharacter { invalid, .. } => assert_eq!(invalid, '-'),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn translator_when_constraint_is_empty_then_returns_error() {
    match translate("{ext:}").expect_err("empty constraint should fail") {
        PatternError::EmptyConstraint { name, .. } => assert_eq!(name, "ext"),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn translator_when_escape_is_unterminated_then_returns_error() {
    match translate("docs/\\").expect_err("lone escape should fail") {
        PatternError::LoneEscapeCharacter { index, .. } => assert_eq!(index, 5),
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn translator_when_escaped_metacharacters_then_emits_literals() {
    let translation = translate(r"notes/\{draft\}\*.md").expect("should translate");

    assert!(translation.variables.is_empty());
    assert_eq!(translation.source, r"^(?:notes/\{draft\}\*\.md)$");
}

#[test]
fn translator_when_duplicates_rejected_then_returns_error() {
    let options = CompileOptions::builder()
        .duplicate_variables(DuplicateVariablePolicy::Reject)
        .build()
        .expect("options should build");

    match translate_with("{name}/{name}", &options).expect_err("duplicate should fail") {
        PatternError::DuplicateVariable { name, .. } => assert_eq!(name, "name"),
        other => panic!("unexpected error: {other:?}"),
    }

    let translation = translate("{name}/{name}").expect("last-wins accepts duplicates");
    assert_eq!(translation.variables.as_slice(), ["name", "name"]);
}

#[test]
fn translator_when_pattern_exceeds_limit_then_returns_error() {
    let options = CompileOptions::builder()
        .max_pattern_len(8)
        .build()
        .expect("options should build");

    match translate_with("docs/{title}.txt", &options).expect_err("long pattern should fail") {
        PatternError::PatternTooLong { length, max } => {
            assert_eq!(length, 16);
            assert_eq!(max, 8);
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn tokenizer_when_pattern_mixes_constructs_then_classifies_each() {
    let tokens: Vec<Token> = tokenize("a/**/({x:\\d+})?|b")
        .expect("should tokenize")
        .into_iter()
        .map(|spanned| spanned.token)
        .collect();

    assert_eq!(
        tokens,
        vec![
            Token::Literal('a'),
            Token::Literal('/'),
            Token::RecursiveWildcard,
            Token::Literal('/'),
            Token::GroupOpen,
            Token::VariableOpen,
            Token::VariableName("x".to_string()),
            Token::VariableSeparator,
            Token::Constraint("\\d+".to_string()),
            Token::VariableClose,
            Token::GroupClose,
            Token::Optional,
            Token::Alternation,
            Token::Literal('b'),
        ]
    );
}
