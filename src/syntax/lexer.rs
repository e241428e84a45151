//! Logos-based lexer for IOP source.

use logos::Logos;
use text_size::{TextRange, TextSize};

use super::kind::SyntaxKind;

/// One lexed token: its tree kind, source slice, and byte range.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Lexeme<'a> {
    pub kind: SyntaxKind,
    pub text: &'a str,
    pub range: TextRange,
}

/// Lex `text` into a flat token list, trivia included.
///
/// Never fails: bytes the lexer cannot match become [`SyntaxKind::ErrorTok`]
/// tokens, one per unmatched span. The concatenation of all lexeme texts is
/// exactly the input.
pub(crate) fn lex(text: &str) -> Vec<Lexeme<'_>> {
    let mut out = Vec::new();
    let mut lexer = Token::lexer(text);

    while let Some(result) = lexer.next() {
        let kind = match result {
            Ok(token) => token.kind(),
            Err(()) => SyntaxKind::ErrorTok,
        };
        let span = lexer.span();
        out.push(Lexeme {
            kind,
            text: lexer.slice(),
            range: TextRange::new(
                TextSize::from(span.start as u32),
                TextSize::from(span.end as u32),
            ),
        });
    }

    out
}

#[derive(Logos, Clone, Copy, Debug, PartialEq, Eq)]
enum Token {
    #[regex(r"[ \t\r\n]+")]
    Whitespace,

    #[regex(r"//[^\n]*")]
    LineComment,

    // Closed block comment, including the doc (`/** */`) and trailing-doc
    // (`/**< */`) forms the hir layer cares about.
    #[regex(r"/\*[^*]*\*+([^/*][^*]*\*+)*/")]
    BlockComment,

    #[token("package")]
    PackageKw,
    #[token("struct")]
    StructKw,
    #[token("union")]
    UnionKw,
    #[token("class")]
    ClassKw,
    #[token("enum")]
    EnumKw,
    #[token("interface")]
    InterfaceKw,
    #[token("module")]
    ModuleKw,
    #[token("typedef")]
    TypedefKw,
    #[token("snmpObj")]
    SnmpObjKw,
    #[token("snmpTbl")]
    SnmpTblKw,
    #[token("snmpIface")]
    SnmpIfaceKw,
    #[token("in")]
    InKw,
    #[token("out")]
    OutKw,
    #[token("throw")]
    ThrowKw,

    // Dotted identifiers are a single token, as in the IOP grammar:
    // `core.LogLevel` names one thing.
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*(\.[A-Za-z_][A-Za-z0-9_]*)*")]
    Ident,

    #[regex(r"[0-9]+(\.[0-9]+)?|0[xX][0-9a-fA-F]+")]
    Number,

    #[regex(r#""([^"\\]|\\.)*""#)]
    String,

    #[token(";")]
    Semicolon,
    #[token(",")]
    Comma,
    #[token("{")]
    LBrace,
    #[token("}")]
    RBrace,
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token("[")]
    LBracket,
    #[token("]")]
    RBracket,
    #[token("?")]
    Question,
    #[token("&")]
    Amp,
    #[token("=")]
    Eq,
    #[token(":")]
    Colon,
    #[token("@")]
    At,
    #[token(".")]
    Dot,
    #[token("-")]
    Minus,

    #[regex(r"[+*/|<>%~^!]")]
    Op,
}

impl Token {
    fn kind(self) -> SyntaxKind {
        match self {
            Token::Whitespace => SyntaxKind::Whitespace,
            Token::LineComment | Token::BlockComment => SyntaxKind::Comment,
            Token::PackageKw => SyntaxKind::PackageKw,
            Token::StructKw => SyntaxKind::StructKw,
            Token::UnionKw => SyntaxKind::UnionKw,
            Token::ClassKw => SyntaxKind::ClassKw,
            Token::EnumKw => SyntaxKind::EnumKw,
            Token::InterfaceKw => SyntaxKind::InterfaceKw,
            Token::ModuleKw => SyntaxKind::ModuleKw,
            Token::TypedefKw => SyntaxKind::TypedefKw,
            Token::SnmpObjKw => SyntaxKind::SnmpObjKw,
            Token::SnmpTblKw => SyntaxKind::SnmpTblKw,
            Token::SnmpIfaceKw => SyntaxKind::SnmpIfaceKw,
            Token::InKw => SyntaxKind::InKw,
            Token::OutKw => SyntaxKind::OutKw,
            Token::ThrowKw => SyntaxKind::ThrowKw,
            Token::Ident => SyntaxKind::Ident,
            Token::Number => SyntaxKind::Number,
            Token::String => SyntaxKind::String,
            Token::Semicolon => SyntaxKind::Semicolon,
            Token::Comma => SyntaxKind::Comma,
            Token::LBrace => SyntaxKind::LBrace,
            Token::RBrace => SyntaxKind::RBrace,
            Token::LParen => SyntaxKind::LParen,
            Token::RParen => SyntaxKind::RParen,
            Token::LBracket => SyntaxKind::LBracket,
            Token::RBracket => SyntaxKind::RBracket,
            Token::Question => SyntaxKind::Question,
            Token::Amp => SyntaxKind::Amp,
            Token::Eq => SyntaxKind::Eq,
            Token::Colon => SyntaxKind::Colon,
            Token::At => SyntaxKind::At,
            Token::Dot => SyntaxKind::Dot,
            Token::Minus => SyntaxKind::Minus,
            Token::Op => SyntaxKind::Op,
        }
    }
}
