//! The closed set of Go syntax node variants.

use super::token::{AssignOp, BinaryOp, BranchKind, ChanDir, DeclKind, LitKind, UnaryOp};
use super::{Node, NodeList};

/// Variant payload of a [`Node`].
///
/// The variants mirror Go's abstract syntax. Optional children are
/// `Option<Box<Node>>`; repeated children are [`NodeList`] fields.
#[derive(Debug, Clone, PartialEq)]
pub enum NodeKind {
    /// Identifier, including predeclared names such as `nil` and `true`.
    Ident(String),
    /// Numeric, rune or string literal with its source spelling.
    BasicLit {
        /// Literal kind.
        kind: LitKind,
        /// Literal text as written.
        value: String,
    },
    /// `T{a, b}`; `ty` is absent for elided inner literals.
    CompositeLit {
        /// Literal type.
        ty: Option<Box<Node>>,
        /// Elements.
        elts: NodeList,
    },
    /// `func(...) ... { ... }`
    FuncLit {
        /// Function type.
        ty: Box<Node>,
        /// Body block.
        body: Box<Node>,
    },
    /// `(x)`
    Paren(Box<Node>),
    /// `x.sel`
    Selector {
        /// Operand.
        x: Box<Node>,
        /// Selected identifier.
        sel: Box<Node>,
    },
    /// `x[index]`
    Index {
        /// Operand.
        x: Box<Node>,
        /// Index expression.
        index: Box<Node>,
    },
    /// `x[a, b]` generic instantiation.
    IndexList {
        /// Operand.
        x: Box<Node>,
        /// Type arguments.
        indices: NodeList,
    },
    /// `x[low:high:max]`
    Slice {
        /// Operand.
        x: Box<Node>,
        /// Low bound.
        low: Option<Box<Node>>,
        /// High bound.
        high: Option<Box<Node>>,
        /// Capacity bound.
        max: Option<Box<Node>>,
        /// Whether the three-index form was used.
        slice3: bool,
    },
    /// `x.(T)`; `ty` is absent for `x.(type)`.
    TypeAssert {
        /// Operand.
        x: Box<Node>,
        /// Asserted type.
        ty: Option<Box<Node>>,
    },
    /// `fun(args...)`
    Call {
        /// Callee.
        fun: Box<Node>,
        /// Arguments.
        args: NodeList,
        /// Whether the last argument is followed by `...`.
        ellipsis: bool,
    },
    /// `*x` as a dereference or a pointer type.
    Star(Box<Node>),
    /// Prefix operator expression.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        x: Box<Node>,
    },
    /// Infix operator expression.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        x: Box<Node>,
        /// Right operand.
        y: Box<Node>,
    },
    /// `key: value` inside a composite literal.
    KeyValue {
        /// Key.
        key: Box<Node>,
        /// Value.
        value: Box<Node>,
    },
    /// `...T` in a parameter list, or `[...]` array length.
    Ellipsis(Option<Box<Node>>),
    /// `[len]elt`; `len` is absent for slices.
    ArrayType {
        /// Array length.
        len: Option<Box<Node>>,
        /// Element type.
        elt: Box<Node>,
    },
    /// `struct { ... }`
    StructType {
        /// Field declarations.
        fields: NodeList,
    },
    /// `func(params) results`
    FuncType {
        /// Type parameters.
        type_params: NodeList,
        /// Parameters.
        params: NodeList,
        /// Results.
        results: NodeList,
    },
    /// `interface { ... }`
    InterfaceType {
        /// Method and type elements.
        methods: NodeList,
    },
    /// `map[key]value`
    MapType {
        /// Key type.
        key: Box<Node>,
        /// Value type.
        value: Box<Node>,
    },
    /// Channel type.
    ChanType {
        /// Direction.
        dir: ChanDir,
        /// Element type.
        value: Box<Node>,
    },
    /// Parameter, result, struct field or interface element.
    Field {
        /// Declared names.
        names: NodeList,
        /// Field type.
        ty: Option<Box<Node>>,
        /// Struct tag.
        tag: Option<Box<Node>>,
    },
    /// Source that could not be lowered; keeps the original text.
    Bad(String),
    /// Declaration used as a statement.
    DeclStmt(Box<Node>),
    /// `;`
    EmptyStmt,
    /// `label: stmt`
    LabeledStmt {
        /// Label identifier.
        label: Box<Node>,
        /// Labelled statement.
        stmt: Box<Node>,
    },
    /// Expression used as a statement.
    ExprStmt(Box<Node>),
    /// `ch <- value`
    SendStmt {
        /// Channel.
        chan: Box<Node>,
        /// Sent value.
        value: Box<Node>,
    },
    /// `x++` or `x--`.
    IncDecStmt {
        /// Operand.
        x: Box<Node>,
        /// `true` for `++`.
        inc: bool,
    },
    /// Assignment or short variable declaration.
    AssignStmt {
        /// Left-hand side.
        lhs: NodeList,
        /// Assignment token.
        tok: AssignOp,
        /// Right-hand side.
        rhs: NodeList,
    },
    /// `go call`
    GoStmt(Box<Node>),
    /// `defer call`
    DeferStmt(Box<Node>),
    /// `return results...`
    ReturnStmt {
        /// Returned expressions.
        results: NodeList,
    },
    /// `break`, `continue`, `goto` or `fallthrough`.
    BranchStmt {
        /// Keyword.
        kind: BranchKind,
        /// Optional label.
        label: Option<Box<Node>>,
    },
    /// `{ stmts }`
    BlockStmt {
        /// Statements.
        stmts: NodeList,
    },
    /// `if init; cond { body } else els`
    IfStmt {
        /// Init statement.
        init: Option<Box<Node>>,
        /// Condition.
        cond: Box<Node>,
        /// Body block.
        body: Box<Node>,
        /// Else branch: a block or another `if`.
        els: Option<Box<Node>>,
    },
    /// `case list: body`; an empty list is `default`.
    CaseClause {
        /// Case expressions or types.
        list: NodeList,
        /// Clause statements.
        body: NodeList,
    },
    /// Expression switch.
    SwitchStmt {
        /// Init statement.
        init: Option<Box<Node>>,
        /// Tag expression.
        tag: Option<Box<Node>>,
        /// Block of case clauses.
        body: Box<Node>,
    },
    /// Type switch.
    TypeSwitchStmt {
        /// Init statement.
        init: Option<Box<Node>>,
        /// `x := y.(type)` or `y.(type)`.
        assign: Box<Node>,
        /// Block of case clauses.
        body: Box<Node>,
    },
    /// `case comm: body`; a missing `comm` is `default`.
    CommClause {
        /// Send or receive statement.
        comm: Option<Box<Node>>,
        /// Clause statements.
        body: NodeList,
    },
    /// `select { ... }`
    SelectStmt {
        /// Block of comm clauses.
        body: Box<Node>,
    },
    /// Three-clause or condition-only `for` loop.
    ForStmt {
        /// Init statement.
        init: Option<Box<Node>>,
        /// Condition.
        cond: Option<Box<Node>>,
        /// Post statement.
        post: Option<Box<Node>>,
        /// Body block.
        body: Box<Node>,
    },
    /// `for key, value := range x`
    RangeStmt {
        /// Key expression.
        key: Option<Box<Node>>,
        /// Value expression.
        value: Option<Box<Node>>,
        /// `=` or `:=` when a key is present.
        tok: Option<AssignOp>,
        /// Ranged expression.
        x: Box<Node>,
        /// Body block.
        body: Box<Node>,
    },
    /// Single import.
    ImportSpec {
        /// Local package name.
        name: Option<Box<Node>>,
        /// Import path literal.
        path: Box<Node>,
    },
    /// `names type = values` in `var` or `const`.
    ValueSpec {
        /// Declared names.
        names: NodeList,
        /// Declared type.
        ty: Option<Box<Node>>,
        /// Initial values.
        values: NodeList,
    },
    /// `name[params] type` or `name = type`.
    TypeSpec {
        /// Type name.
        name: Box<Node>,
        /// Type parameters.
        type_params: NodeList,
        /// Whether this is an alias declaration.
        alias: bool,
        /// Declared type.
        ty: Box<Node>,
    },
    /// `import`, `const`, `type` or `var` declaration.
    GenDecl {
        /// Keyword.
        kind: DeclKind,
        /// Specifications.
        specs: NodeList,
        /// Whether the specs were written in parentheses.
        grouped: bool,
    },
    /// Function or method declaration.
    FuncDecl {
        /// Receiver; empty for plain functions.
        recv: NodeList,
        /// Function name.
        name: Box<Node>,
        /// Function type.
        ty: Box<Node>,
        /// Body; absent for external declarations.
        body: Option<Box<Node>>,
    },
    /// A Go source file.
    File {
        /// Package name.
        package: Box<Node>,
        /// Top-level declarations.
        decls: NodeList,
    },
}

impl NodeKind {
    /// Returns whether the variant is a statement.
    #[must_use]
    pub const fn is_stmt(&self) -> bool {
        matches!(
            self,
            Self::DeclStmt(_)
                | Self::EmptyStmt
                | Self::LabeledStmt { .. }
                | Self::ExprStmt(_)
                | Self::SendStmt { .. }
                | Self::IncDecStmt { .. }
                | Self::AssignStmt { .. }
                | Self::GoStmt(_)
                | Self::DeferStmt(_)
                | Self::ReturnStmt { .. }
                | Self::BranchStmt { .. }
                | Self::BlockStmt { .. }
                | Self::IfStmt { .. }
                | Self::CaseClause { .. }
                | Self::SwitchStmt { .. }
                | Self::TypeSwitchStmt { .. }
                | Self::CommClause { .. }
                | Self::SelectStmt { .. }
                | Self::ForStmt { .. }
                | Self::RangeStmt { .. }
        )
    }

    /// Returns whether the variant is an expression or type expression.
    #[must_use]
    pub const fn is_expr(&self) -> bool {
        matches!(
            self,
            Self::Ident(_)
                | Self::BasicLit { .. }
                | Self::CompositeLit { .. }
                | Self::FuncLit { .. }
                | Self::Paren(_)
                | Self::Selector { .. }
                | Self::Index { .. }
                | Self::IndexList { .. }
                | Self::Slice { .. }
                | Self::TypeAssert { .. }
                | Self::Call { .. }
                | Self::Star(_)
                | Self::Unary { .. }
                | Self::Binary { .. }
                | Self::KeyValue { .. }
                | Self::Ellipsis(_)
                | Self::ArrayType { .. }
                | Self::StructType { .. }
                | Self::FuncType { .. }
                | Self::InterfaceType { .. }
                | Self::MapType { .. }
                | Self::ChanType { .. }
                | Self::Bad(_)
        )
    }

    /// Returns a short, stable name of the variant for diagnostics.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Ident(_) => "Ident",
            Self::BasicLit { .. } => "BasicLit",
            Self::CompositeLit { .. } => "CompositeLit",
            Self::FuncLit { .. } => "FuncLit",
            Self::Paren(_) => "Paren",
            Self::Selector { .. } => "Selector",
            Self::Index { .. } => "Index",
            Self::IndexList { .. } => "IndexList",
            Self::Slice { .. } => "Slice",
            Self::TypeAssert { .. } => "TypeAssert",
            Self::Call { .. } => "Call",
            Self::Star(_) => "Star",
            Self::Unary { .. } => "Unary",
            Self::Binary { .. } => "Binary",
            Self::KeyValue { .. } => "KeyValue",
            Self::Ellipsis(_) => "Ellipsis",
            Self::ArrayType { .. } => "ArrayType",
            Self::StructType { .. } => "StructType",
            Self::FuncType { .. } => "FuncType",
            Self::InterfaceType { .. } => "InterfaceType",
            Self::MapType { .. } => "MapType",
            Self::ChanType { .. } => "ChanType",
            Self::Field { .. } => "Field",
            Self::Bad(_) => "Bad",
            Self::DeclStmt(_) => "DeclStmt",
            Self::EmptyStmt => "EmptyStmt",
            Self::LabeledStmt { .. } => "LabeledStmt",
            Self::ExprStmt(_) => "ExprStmt",
            Self::SendStmt { .. } => "SendStmt",
            Self::IncDecStmt { .. } => "IncDecStmt",
            Self::AssignStmt { .. } => "AssignStmt",
            Self::GoStmt(_) => "GoStmt",
            Self::DeferStmt(_) => "DeferStmt",
            Self::ReturnStmt { .. } => "ReturnStmt",
            Self::BranchStmt { .. } => "BranchStmt",
            Self::BlockStmt { .. } => "BlockStmt",
            Self::IfStmt { .. } => "IfStmt",
            Self::CaseClause { .. } => "CaseClause",
            Self::SwitchStmt { .. } => "SwitchStmt",
            Self::TypeSwitchStmt { .. } => "TypeSwitchStmt",
            Self::CommClause { .. } => "CommClause",
            Self::SelectStmt { .. } => "SelectStmt",
            Self::ForStmt { .. } => "ForStmt",
            Self::RangeStmt { .. } => "RangeStmt",
            Self::ImportSpec { .. } => "ImportSpec",
            Self::ValueSpec { .. } => "ValueSpec",
            Self::TypeSpec { .. } => "TypeSpec",
            Self::GenDecl { .. } => "GenDecl",
            Self::FuncDecl { .. } => "FuncDecl",
            Self::File { .. } => "File",
        }
    }
}
