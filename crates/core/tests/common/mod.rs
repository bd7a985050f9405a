//! Shared test helpers for `recruitbook_core` integration tests.

#![allow(unreachable_pub)]

use recruitbook_core::{
    CommandParser, Diagnostic, EditCommandParser, EditRequest, FieldRules, ParseError,
};

// ─── Parse helpers ───────────────────────────────────────────────────────────

/// Parse with default rules, panicking with the diagnostic on failure.
#[allow(dead_code)]
pub fn parse_ok(args: &str) -> EditRequest {
    EditCommandParser::default()
        .parse(args)
        .unwrap_or_else(|e| panic!("expected {args:?} to parse, got {}", e.to_diagnostic()))
}

/// Parse with default rules, panicking if the parse succeeds.
#[allow(dead_code)]
pub fn parse_err(args: &str) -> ParseError {
    match EditCommandParser::default().parse(args) {
        Ok(req) => panic!("expected {args:?} to fail, got {req:?}"),
        Err(e) => e,
    }
}

/// Parse with custom rules.
#[allow(dead_code)]
pub fn parse_with(rules: FieldRules, args: &str) -> Result<EditRequest, ParseError> {
    EditCommandParser::new(rules).parse(args)
}

/// Diagnostic code of a failed parse.
#[allow(dead_code)]
pub fn err_code(args: &str) -> String {
    parse_err(args).to_diagnostic().id.to_string()
}

/// The text a diagnostic's span covers in `input`.
#[allow(dead_code)]
pub fn spanned<'a>(input: &'a str, diag: &Diagnostic) -> &'a str {
    let span = diag.span.expect("diagnostic has a span");
    &input[span.start..span.end]
}

// ─── Argument fixtures ───────────────────────────────────────────────────────

#[allow(dead_code)]
pub const VALID_NAME: &str = "Amy Bee";
#[allow(dead_code)]
pub const VALID_PHONE: &str = "11111111";
#[allow(dead_code)]
pub const VALID_EMAIL: &str = "amy@example.com";
#[allow(dead_code)]
pub const VALID_ADDRESS: &str = "Block 312, Amy Street 1";
#[allow(dead_code)]
pub const VALID_ROLE: &str = "Backend Engineer";
#[allow(dead_code)]
pub const VALID_SKILLS: &str = "Rust, Postgres";
