//! Hand-written recursive-descent parser producing rowan green trees.
//!
//! The parser never fails: unparsable regions become [`SyntaxKind::Error`]
//! nodes and the trouble is recorded as a [`SyntaxError`], so a malformed
//! declaration does not disturb its siblings. The resulting tree is
//! lossless; every input byte, trivia included, is present in it.

use rowan::{Checkpoint, GreenNode, GreenNodeBuilder};
use text_size::{TextRange, TextSize};

use super::SyntaxNode;
use super::kind::SyntaxKind;
use super::lexer::{Lexeme, lex};

/// Result of parsing one IOP document.
#[derive(Clone, Debug)]
pub struct Parse {
    green: GreenNode,
    errors: Vec<SyntaxError>,
}

impl Parse {
    /// Root of the syntax tree (a [`SyntaxKind::SourceFile`] node).
    pub fn syntax(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.green.clone())
    }

    /// Errors collected while parsing, in source order.
    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }
}

/// A single parse error with its source location.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SyntaxError {
    pub message: String,
    pub range: TextRange,
}

/// Parse IOP source text into a lossless syntax tree.
pub fn parse(text: &str) -> Parse {
    let tokens = lex(text);
    let mut parser = Parser {
        tokens: &tokens,
        pos: 0,
        text_len: TextSize::of(text),
        builder: GreenNodeBuilder::new(),
        errors: Vec::new(),
    };
    parser.parse_source_file();
    Parse {
        green: parser.builder.finish(),
        errors: parser.errors,
    }
}

struct Parser<'t, 'a> {
    tokens: &'t [Lexeme<'a>],
    pos: usize,
    text_len: TextSize,
    builder: GreenNodeBuilder<'static>,
    errors: Vec<SyntaxError>,
}

impl Parser<'_, '_> {
    // ---- cursor primitives ----

    /// Kind of the next non-trivia token, without consuming anything.
    fn current(&self) -> Option<SyntaxKind> {
        self.tokens[self.pos..]
            .iter()
            .map(|l| l.kind)
            .find(|k| !k.is_trivia())
    }

    fn at(&self, kind: SyntaxKind) -> bool {
        self.current() == Some(kind)
    }

    /// Range of the next non-trivia token, for error reporting.
    fn current_range(&self) -> TextRange {
        self.tokens[self.pos..]
            .iter()
            .find(|l| !l.kind.is_trivia())
            .map(|l| l.range)
            .unwrap_or_else(|| TextRange::empty(self.text_len))
    }

    /// Push pending trivia into the node currently being built.
    fn eat_trivia(&mut self) {
        while let Some(lexeme) = self.tokens.get(self.pos) {
            if !lexeme.kind.is_trivia() {
                break;
            }
            self.builder.token(lexeme.kind.into(), lexeme.text);
            self.pos += 1;
        }
    }

    /// Consume pending trivia plus the next token.
    fn bump(&mut self) {
        self.eat_trivia();
        if let Some(lexeme) = self.tokens.get(self.pos) {
            self.builder.token(lexeme.kind.into(), lexeme.text);
            self.pos += 1;
        }
    }

    fn expect(&mut self, kind: SyntaxKind, what: &str) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            self.error(format!("expected {what}"));
            false
        }
    }

    fn error(&mut self, message: String) {
        let range = self.current_range();
        self.errors.push(SyntaxError { message, range });
    }

    /// Record an error and skip tokens into an Error node until one of
    /// `stop` kinds, a definition keyword, or the end of input. Consumes
    /// at least one token when not already at a stop point.
    fn error_recover(&mut self, message: &str, stop: &[SyntaxKind]) {
        self.error(message.to_string());
        if self
            .current()
            .is_none_or(|k| stop.contains(&k) || k.starts_definition())
        {
            return;
        }
        self.builder.start_node(SyntaxKind::Error.into());
        while let Some(kind) = self.current() {
            if stop.contains(&kind) || kind.starts_definition() {
                break;
            }
            self.bump();
        }
        self.builder.finish_node();
    }

    // ---- grammar ----

    fn parse_source_file(&mut self) {
        self.builder.start_node(SyntaxKind::SourceFile.into());
        loop {
            self.eat_trivia();
            match self.current() {
                None => break,
                Some(SyntaxKind::PackageKw) => self.parse_package(),
                Some(kind) if kind.starts_definition() || kind == SyntaxKind::At => {
                    self.parse_definition();
                }
                Some(SyntaxKind::Semicolon) => self.bump(),
                Some(_) => {
                    // Wrap the stray token run so later definitions still parse.
                    self.error("expected a definition".to_string());
                    self.builder.start_node(SyntaxKind::Error.into());
                    self.bump();
                    while let Some(kind) = self.current() {
                        if kind.starts_definition()
                            || kind == SyntaxKind::At
                            || kind == SyntaxKind::PackageKw
                            || kind == SyntaxKind::Semicolon
                        {
                            break;
                        }
                        self.bump();
                    }
                    self.builder.finish_node();
                }
            }
        }
        self.eat_trivia();
        self.builder.finish_node();
    }

    fn parse_package(&mut self) {
        self.builder.start_node(SyntaxKind::PackageDef.into());
        self.bump(); // 'package'
        self.expect(SyntaxKind::Ident, "package name");
        self.expect(SyntaxKind::Semicolon, "';' after package declaration");
        self.builder.finish_node();
    }

    /// Attributes followed by a keyword-dispatched definition. The
    /// checkpoint wraps the attributes into the definition node.
    fn parse_definition(&mut self) {
        self.eat_trivia();
        let cp = self.builder.checkpoint();
        while self.at(SyntaxKind::At) {
            self.parse_attribute();
        }
        match self.current() {
            Some(SyntaxKind::StructKw | SyntaxKind::UnionKw) => {
                self.parse_structure_like(cp, SyntaxKind::StructureDef)
            }
            Some(SyntaxKind::SnmpObjKw) => self.parse_structure_like(cp, SyntaxKind::SnmpObjDef),
            Some(SyntaxKind::SnmpTblKw) => self.parse_structure_like(cp, SyntaxKind::SnmpTblDef),
            Some(SyntaxKind::ClassKw) => self.parse_class(cp),
            Some(SyntaxKind::EnumKw) => self.parse_enum(cp),
            Some(SyntaxKind::InterfaceKw) => self.parse_interface(cp, SyntaxKind::InterfaceDef),
            Some(SyntaxKind::SnmpIfaceKw) => self.parse_interface(cp, SyntaxKind::SnmpIfaceDef),
            Some(SyntaxKind::ModuleKw) => self.parse_module(cp),
            Some(SyntaxKind::TypedefKw) => self.parse_typedef(cp),
            _ => self.error_recover(
                "expected a definition after attributes",
                &[SyntaxKind::Semicolon],
            ),
        }
    }

    /// `@name` or `@name(args)`.
    fn parse_attribute(&mut self) {
        self.eat_trivia();
        self.builder.start_node(SyntaxKind::Attribute.into());
        self.bump(); // '@'
        if self.at(SyntaxKind::Ident) {
            self.bump();
        } else {
            self.error("expected attribute name".to_string());
        }
        if self.at(SyntaxKind::LParen) {
            self.builder.start_node(SyntaxKind::AttributeArgs.into());
            self.bump(); // '('
            let mut depth = 1u32;
            while depth > 0 {
                match self.current() {
                    None => {
                        self.error("unclosed attribute argument list".to_string());
                        break;
                    }
                    Some(SyntaxKind::LParen) => {
                        depth += 1;
                        self.bump();
                    }
                    Some(SyntaxKind::RParen) => {
                        depth -= 1;
                        self.bump();
                    }
                    Some(_) => self.bump(),
                }
            }
            self.builder.finish_node();
        }
        self.builder.finish_node();
    }

    /// struct / union / snmpObj / snmpTbl: keyword, name, field block.
    fn parse_structure_like(&mut self, cp: Checkpoint, node: SyntaxKind) {
        self.builder.start_node_at(cp, node.into());
        self.bump(); // keyword
        self.expect(SyntaxKind::Ident, "a name for this definition");
        if self.at(SyntaxKind::LBrace) {
            self.parse_structure_body();
        }
        if self.at(SyntaxKind::Semicolon) {
            self.bump();
        }
        self.builder.finish_node();
    }

    fn parse_class(&mut self, cp: Checkpoint) {
        self.builder.start_node_at(cp, SyntaxKind::ClassDef.into());
        self.bump(); // 'class'
        self.expect(SyntaxKind::Ident, "a class name");
        // `: <id>` items: a bare integer is the class id, an identifier
        // names the parent class.
        while self.at(SyntaxKind::Colon) {
            self.bump();
            match self.current() {
                Some(SyntaxKind::Number) => self.bump(),
                Some(SyntaxKind::Ident) => {
                    self.eat_trivia();
                    self.builder.start_node(SyntaxKind::ClassParent.into());
                    self.bump();
                    self.builder.finish_node();
                }
                _ => {
                    self.error("expected class id or parent class".to_string());
                    break;
                }
            }
        }
        if self.at(SyntaxKind::LBrace) {
            self.parse_structure_body();
        }
        if self.at(SyntaxKind::Semicolon) {
            self.bump();
        }
        self.builder.finish_node();
    }

    fn parse_structure_body(&mut self) {
        self.builder.start_node(SyntaxKind::StructureBody.into());
        self.bump(); // '{'
        loop {
            self.eat_trivia();
            match self.current() {
                Some(SyntaxKind::RBrace) => {
                    self.bump();
                    break;
                }
                None => {
                    self.error("unclosed block".to_string());
                    break;
                }
                Some(kind) if kind.starts_definition() => {
                    self.error("unclosed block".to_string());
                    break;
                }
                Some(_) => self.parse_field(SyntaxKind::Semicolon),
            }
        }
        self.builder.finish_node();
    }

    /// One field: attributes, variable, then `terminator` (`;` in blocks,
    /// `,` in inline argument lists, where the separator is optional).
    fn parse_field(&mut self, terminator: SyntaxKind) {
        self.eat_trivia();
        let cp = self.builder.checkpoint();
        while self.at(SyntaxKind::At) {
            self.parse_attribute();
        }
        self.builder.start_node_at(cp, SyntaxKind::Field.into());
        if self.at(SyntaxKind::Ident) {
            self.parse_variable();
            if self.at(terminator) {
                self.bump();
            } else if terminator == SyntaxKind::Semicolon {
                self.error("expected ';' after field".to_string());
            }
        } else {
            // The closing bracket must stay outside the stop set of the
            // other context so recovery always makes progress.
            let closer = if terminator == SyntaxKind::Semicolon {
                SyntaxKind::RBrace
            } else {
                SyntaxKind::RParen
            };
            self.error_recover("expected a field declaration", &[terminator, closer]);
            if self.at(terminator) {
                self.bump();
            }
        }
        self.builder.finish_node();
    }

    /// `type specifier? name default?` - shared by fields and typedefs.
    fn parse_variable(&mut self) {
        self.eat_trivia();
        self.builder.start_node(SyntaxKind::Variable.into());
        self.builder.start_node(SyntaxKind::Type.into());
        self.bump(); // type identifier
        self.builder.finish_node();
        self.eat_trivia();
        match self.current() {
            Some(SyntaxKind::Question | SyntaxKind::Amp) => {
                self.builder.start_node(SyntaxKind::TypeSpecifier.into());
                self.bump();
                self.builder.finish_node();
            }
            Some(SyntaxKind::LBracket) => {
                self.builder.start_node(SyntaxKind::TypeSpecifier.into());
                self.bump();
                if self.at(SyntaxKind::RBracket) {
                    self.bump();
                } else {
                    self.error("expected ']'".to_string());
                }
                self.builder.finish_node();
            }
            _ => {}
        }
        self.expect(SyntaxKind::Ident, "a name");
        if self.at(SyntaxKind::Eq) {
            self.parse_default_value();
        }
        self.builder.finish_node();
    }

    /// `= value`, where the value runs to the next `;`, `,`, `}` or `)`.
    fn parse_default_value(&mut self) {
        self.eat_trivia();
        self.builder.start_node(SyntaxKind::DefaultValue.into());
        self.bump(); // '='
        self.eat_trivia();
        if self.at_value_end() {
            self.error("expected a value after '='".to_string());
        } else {
            self.builder.start_node(SyntaxKind::Value.into());
            loop {
                self.bump();
                if self.at_value_end() {
                    break;
                }
            }
            self.builder.finish_node();
        }
        self.builder.finish_node();
    }

    fn at_value_end(&self) -> bool {
        self.current().is_none_or(|k| {
            matches!(
                k,
                SyntaxKind::Semicolon
                    | SyntaxKind::Comma
                    | SyntaxKind::RBrace
                    | SyntaxKind::RParen
            )
        })
    }

    fn parse_enum(&mut self, cp: Checkpoint) {
        self.builder.start_node_at(cp, SyntaxKind::EnumDef.into());
        self.bump(); // 'enum'
        self.expect(SyntaxKind::Ident, "an enum name");
        if self.at(SyntaxKind::LBrace) {
            self.builder.start_node(SyntaxKind::EnumBody.into());
            self.bump();
            loop {
                self.eat_trivia();
                match self.current() {
                    Some(SyntaxKind::RBrace) => {
                        self.bump();
                        break;
                    }
                    None => {
                        self.error("unclosed enum block".to_string());
                        break;
                    }
                    Some(kind) if kind.starts_definition() => {
                        self.error("unclosed enum block".to_string());
                        break;
                    }
                    Some(_) => self.parse_enum_value(),
                }
            }
            self.builder.finish_node();
        }
        if self.at(SyntaxKind::Semicolon) {
            self.bump();
        }
        self.builder.finish_node();
    }

    fn parse_enum_value(&mut self) {
        self.eat_trivia();
        let cp = self.builder.checkpoint();
        while self.at(SyntaxKind::At) {
            self.parse_attribute();
        }
        self.builder.start_node_at(cp, SyntaxKind::EnumValue.into());
        if self.at(SyntaxKind::Ident) {
            self.bump();
            if self.at(SyntaxKind::Eq) {
                self.parse_default_value();
            }
        } else {
            self.error_recover(
                "expected an enum value name",
                &[SyntaxKind::Comma, SyntaxKind::RBrace],
            );
        }
        if self.at(SyntaxKind::Comma) {
            self.bump();
        }
        self.builder.finish_node();
    }

    fn parse_interface(&mut self, cp: Checkpoint, node: SyntaxKind) {
        self.builder.start_node_at(cp, node.into());
        self.bump(); // 'interface' / 'snmpIface'
        self.expect(SyntaxKind::Ident, "an interface name");
        if self.at(SyntaxKind::LBrace) {
            self.builder.start_node(SyntaxKind::RpcBlock.into());
            self.bump();
            loop {
                self.eat_trivia();
                match self.current() {
                    Some(SyntaxKind::RBrace) => {
                        self.bump();
                        break;
                    }
                    None => {
                        self.error("unclosed interface block".to_string());
                        break;
                    }
                    Some(kind) if kind.starts_definition() => {
                        self.error("unclosed interface block".to_string());
                        break;
                    }
                    Some(_) => self.parse_rpc(),
                }
            }
            self.builder.finish_node();
        }
        if self.at(SyntaxKind::Semicolon) {
            self.bump();
        }
        self.builder.finish_node();
    }

    fn parse_rpc(&mut self) {
        self.eat_trivia();
        let cp = self.builder.checkpoint();
        while self.at(SyntaxKind::At) {
            self.parse_attribute();
        }
        self.builder.start_node_at(cp, SyntaxKind::Rpc.into());
        if self.at(SyntaxKind::Ident) {
            self.bump();
            loop {
                match self.current() {
                    Some(SyntaxKind::InKw) => self.parse_rpc_clause(SyntaxKind::RpcIn),
                    Some(SyntaxKind::OutKw) => self.parse_rpc_clause(SyntaxKind::RpcOut),
                    Some(SyntaxKind::ThrowKw) => self.parse_rpc_clause(SyntaxKind::RpcThrow),
                    _ => break,
                }
            }
            self.expect(SyntaxKind::Semicolon, "';' after rpc");
        } else {
            self.error_recover(
                "expected an rpc name",
                &[SyntaxKind::Semicolon, SyntaxKind::RBrace],
            );
            if self.at(SyntaxKind::Semicolon) {
                self.bump();
            }
        }
        self.builder.finish_node();
    }

    /// `in`/`out`/`throw` followed by either an inline argument list or a
    /// single type name.
    fn parse_rpc_clause(&mut self, node: SyntaxKind) {
        self.builder.start_node(node.into());
        self.bump(); // clause keyword
        match self.current() {
            Some(SyntaxKind::LParen) => {
                self.builder.start_node(SyntaxKind::ArgList.into());
                self.bump();
                loop {
                    self.eat_trivia();
                    match self.current() {
                        Some(SyntaxKind::RParen) => {
                            self.bump();
                            break;
                        }
                        None => {
                            self.error("unclosed argument list".to_string());
                            break;
                        }
                        Some(_) => self.parse_field(SyntaxKind::Comma),
                    }
                }
                self.builder.finish_node();
            }
            Some(SyntaxKind::Ident) => {
                self.eat_trivia();
                self.builder.start_node(SyntaxKind::Type.into());
                self.bump();
                self.builder.finish_node();
            }
            _ => self.error("expected a type or argument list".to_string()),
        }
        self.builder.finish_node();
    }

    fn parse_module(&mut self, cp: Checkpoint) {
        self.builder.start_node_at(cp, SyntaxKind::ModuleDef.into());
        self.bump(); // 'module'
        self.expect(SyntaxKind::Ident, "a module name");
        if self.at(SyntaxKind::LBrace) {
            self.builder.start_node(SyntaxKind::ModuleBody.into());
            self.bump();
            loop {
                self.eat_trivia();
                match self.current() {
                    Some(SyntaxKind::RBrace) => {
                        self.bump();
                        break;
                    }
                    None => {
                        self.error("unclosed module block".to_string());
                        break;
                    }
                    Some(SyntaxKind::Ident) => {
                        self.builder.start_node(SyntaxKind::ModuleField.into());
                        self.bump(); // interface type
                        self.expect(SyntaxKind::Ident, "an instance name");
                        self.expect(SyntaxKind::Semicolon, "';' after module field");
                        self.builder.finish_node();
                    }
                    Some(kind) if kind.starts_definition() => {
                        self.error("unclosed module block".to_string());
                        break;
                    }
                    Some(_) => {
                        self.error_recover(
                            "expected a module field",
                            &[SyntaxKind::Semicolon, SyntaxKind::RBrace],
                        );
                        if self.at(SyntaxKind::Semicolon) {
                            self.bump();
                        }
                    }
                }
            }
            self.builder.finish_node();
        }
        if self.at(SyntaxKind::Semicolon) {
            self.bump();
        }
        self.builder.finish_node();
    }

    /// `typedef <type><specifier?> Name;` - the declared name sits inside
    /// the variable wrapper, as for fields.
    fn parse_typedef(&mut self, cp: Checkpoint) {
        self.builder
            .start_node_at(cp, SyntaxKind::TypedefDef.into());
        self.bump(); // 'typedef'
        if self.at(SyntaxKind::Ident) {
            self.parse_variable();
        } else {
            self.error_recover(
                "expected a type after 'typedef'",
                &[SyntaxKind::Semicolon, SyntaxKind::RBrace],
            );
        }
        if self.at(SyntaxKind::Semicolon) {
            self.bump();
        } else {
            self.error("expected ';' after typedef".to_string());
        }
        self.builder.finish_node();
    }
}
