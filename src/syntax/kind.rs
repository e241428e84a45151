//! The closed set of token and node kinds for IOP syntax trees.

/// Every kind of token and node that can appear in an IOP syntax tree.
///
/// The enum is split in two halves: token kinds first (leaves produced by
/// the lexer), node kinds after (interior nodes produced by the parser).
/// New grammar categories must be added here, which forces every
/// exhaustive `match` over kinds to be revisited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u16)]
pub enum SyntaxKind {
    // ---- tokens ----
    /// Spaces, tabs, newlines.
    Whitespace,
    /// `//` line comment or `/* */` block comment, doc markers included.
    Comment,
    /// Identifier, possibly dotted (`foo`, `core.LogLevel`).
    Ident,
    /// Integer or floating point literal.
    Number,
    /// Double-quoted string literal.
    String,

    PackageKw,
    StructKw,
    UnionKw,
    ClassKw,
    EnumKw,
    InterfaceKw,
    ModuleKw,
    TypedefKw,
    SnmpObjKw,
    SnmpTblKw,
    SnmpIfaceKw,
    InKw,
    OutKw,
    ThrowKw,

    Semicolon,
    Comma,
    LBrace,
    RBrace,
    LParen,
    RParen,
    LBracket,
    RBracket,
    Question,
    Amp,
    Eq,
    Colon,
    At,
    Dot,
    Minus,
    /// Any other operator character (`*`, `|`, `<`, ...), seen in
    /// default-value expressions.
    Op,
    /// A byte the lexer could not match.
    ErrorTok,

    // ---- nodes ----
    SourceFile,
    PackageDef,
    /// `struct` or `union` definition; which one is decided by its keyword token.
    StructureDef,
    ClassDef,
    /// Inheritance clause naming the parent class (`: Base`).
    ClassParent,
    EnumDef,
    InterfaceDef,
    ModuleDef,
    TypedefDef,
    SnmpObjDef,
    SnmpTblDef,
    SnmpIfaceDef,

    StructureBody,
    EnumBody,
    RpcBlock,
    ModuleBody,

    Field,
    EnumValue,
    Rpc,
    RpcIn,
    RpcOut,
    RpcThrow,
    /// Inline anonymous argument list of an rpc clause (`in (int a, int b)`).
    ArgList,
    ModuleField,

    Variable,
    Type,
    /// `?`, `&`, or `[]` following a field type.
    TypeSpecifier,
    /// `= value` trailer of a field or enum value.
    DefaultValue,
    Value,

    Attribute,
    AttributeArgs,

    /// Skipped, unparsable source.
    Error,
}

impl SyntaxKind {
    /// Convert from the raw kind stored in the rowan tree.
    #[inline]
    pub fn from_raw(raw: u16) -> SyntaxKind {
        assert!(raw <= SyntaxKind::Error as u16);
        // SAFETY: SyntaxKind is repr(u16) and fieldless, and the raw value
        // was bounds checked against the last variant.
        unsafe { std::mem::transmute::<u16, SyntaxKind>(raw) }
    }

    /// Whitespace and comments, skipped by the parser's lookahead.
    #[inline]
    pub fn is_trivia(self) -> bool {
        matches!(self, SyntaxKind::Whitespace | SyntaxKind::Comment)
    }

    /// Node kinds that declare a named top-level symbol.
    pub fn is_definition(self) -> bool {
        matches!(
            self,
            SyntaxKind::StructureDef
                | SyntaxKind::ClassDef
                | SyntaxKind::EnumDef
                | SyntaxKind::InterfaceDef
                | SyntaxKind::ModuleDef
                | SyntaxKind::TypedefDef
                | SyntaxKind::SnmpObjDef
                | SyntaxKind::SnmpTblDef
                | SyntaxKind::SnmpIfaceDef
        )
    }

    /// Keyword tokens that can start a top-level definition.
    pub fn starts_definition(self) -> bool {
        matches!(
            self,
            SyntaxKind::StructKw
                | SyntaxKind::UnionKw
                | SyntaxKind::ClassKw
                | SyntaxKind::EnumKw
                | SyntaxKind::InterfaceKw
                | SyntaxKind::ModuleKw
                | SyntaxKind::TypedefKw
                | SyntaxKind::SnmpObjKw
                | SyntaxKind::SnmpTblKw
                | SyntaxKind::SnmpIfaceKw
        )
    }

    /// Rpc payload clause nodes (`in`, `out`, `throw`).
    #[inline]
    pub fn is_rpc_clause(self) -> bool {
        matches!(
            self,
            SyntaxKind::RpcIn | SyntaxKind::RpcOut | SyntaxKind::RpcThrow
        )
    }
}

impl From<SyntaxKind> for rowan::SyntaxKind {
    #[inline]
    fn from(kind: SyntaxKind) -> Self {
        rowan::SyntaxKind(kind as u16)
    }
}
