use logos::Logos;

/// Token types for the simple template dialect
#[derive(Logos, Debug, Clone, PartialEq)]
pub enum Token<'src> {
    #[regex(r"<!--[ \t]*BEGIN[ \t]+[A-Za-z0-9_]+[ \t]*-->", |lex| lex.slice())]
    BeginBlock(&'src str),

    #[regex(r"<!--[ \t]*END[ \t]+[A-Za-z0-9_]+[ \t]*-->", |lex| lex.slice())]
    EndBlock(&'src str),

    // Slot substitution, e.g. {TITLE}
    #[regex(r"\{[A-Za-z0-9_]+\}", |lex| lex.slice())]
    Var(&'src str),

    // Translation literal, e.g. {"hello"}
    #[regex(r#"\{"[^"{}]*"\}"#, |lex| lex.slice())]
    Message(&'src str),

    // Everything else passes through verbatim. A lone `{` or `<` that does
    // not open a marker is plain text.
    #[regex(r"[^{<]+", |lex| lex.slice())]
    #[regex(r"[{<]", |lex| lex.slice())]
    Text(&'src str),
}

/// Tokenize a template source string
pub fn tokenize(source: &str) -> Vec<Token> {
    Token::lexer(source)
        .filter_map(|result| result.ok())
        .collect()
}

/// Extract the block name from a `<!-- BEGIN name -->` / `<!-- END name -->`
/// marker slice
pub fn block_name(marker: &str) -> &str {
    marker
        .trim_start_matches("<!--")
        .trim_end_matches("-->")
        .trim()
        .split_whitespace()
        .nth(1)
        .unwrap_or("")
}
