//! Expression and type lowering.

use std::str::FromStr;

use super::{Lowerer, TsNode};
use crate::node::{BinaryOp, ChanDir, LitKind, ListKind, Node, NodeKind, NodeList, UnaryOp};

impl Lowerer<'_> {
    /// Lowers any expression or type node.
    pub(super) fn expr(&self, ts: TsNode<'_>) -> Node {
        match ts.kind() {
            "identifier" | "field_identifier" | "type_identifier" | "package_identifier"
            | "label_name" | "blank_identifier" | "nil" | "true" | "false" | "iota" | "dot" => {
                self.ident(ts)
            }
            "int_literal" => self.lit(ts, LitKind::Int),
            "float_literal" => self.lit(ts, LitKind::Float),
            "imaginary_literal" => self.lit(ts, LitKind::Imag),
            "rune_literal" => self.lit(ts, LitKind::Char),
            "interpreted_string_literal" | "raw_string_literal" => self.lit(ts, LitKind::String),
            "parenthesized_expression" | "parenthesized_type" => match self.named(ts).first() {
                Some(inner) => self.node(ts, NodeKind::Paren(self.boxed(*inner))),
                None => self.bad(ts),
            },
            "selector_expression" => self.selector(ts, "operand", "field"),
            "qualified_type" => self.selector(ts, "package", "name"),
            "index_expression" => self.index(ts),
            "generic_type" | "type_instantiation_expression" => self.instantiation(ts),
            "slice_expression" => self.slice(ts),
            "type_assertion_expression" => match self.field(ts, "operand") {
                Some(operand) => self.node(
                    ts,
                    NodeKind::TypeAssert {
                        x: self.boxed(operand),
                        ty: self.opt(self.field(ts, "type")),
                    },
                ),
                None => self.bad(ts),
            },
            "call_expression" => self.call(ts),
            "type_conversion_expression" => self.conversion(ts),
            "unary_expression" => self.unary(ts),
            "binary_expression" => self.binary(ts),
            "composite_literal" => self.composite(ts),
            "literal_value" => self.literal_value(ts, None),
            "literal_element" => match self.named(ts).first() {
                Some(inner) => self.expr(*inner),
                None => self.bad(ts),
            },
            "keyed_element" => self.keyed(ts),
            "func_literal" => self.func_lit(ts),
            "variadic_argument" => match self.named(ts).first() {
                Some(inner) => self.expr(*inner),
                None => self.bad(ts),
            },
            _ => self.type_expr(ts),
        }
    }

    fn type_expr(&self, ts: TsNode<'_>) -> Node {
        match ts.kind() {
            "pointer_type" => match self.named(ts).first() {
                Some(inner) => self.node(ts, NodeKind::Star(self.boxed(*inner))),
                None => self.bad(ts),
            },
            "array_type" => match self.field(ts, "element") {
                Some(elt) => self.node(
                    ts,
                    NodeKind::ArrayType {
                        len: self.opt(self.field(ts, "length")),
                        elt: self.boxed(elt),
                    },
                ),
                None => self.bad(ts),
            },
            "implicit_length_array_type" => match self.field(ts, "element") {
                Some(elt) => self.node(
                    ts,
                    NodeKind::ArrayType {
                        len: Some(Node::new(NodeKind::Ellipsis(None)).boxed()),
                        elt: self.boxed(elt),
                    },
                ),
                None => self.bad(ts),
            },
            "slice_type" => match self.field(ts, "element") {
                Some(elt) => self.node(
                    ts,
                    NodeKind::ArrayType {
                        len: None,
                        elt: self.boxed(elt),
                    },
                ),
                None => self.bad(ts),
            },
            "map_type" => match (self.field(ts, "key"), self.field(ts, "value")) {
                (Some(key), Some(value)) => self.node(
                    ts,
                    NodeKind::MapType {
                        key: self.boxed(key),
                        value: self.boxed(value),
                    },
                ),
                _ => self.bad(ts),
            },
            "channel_type" => self.chan(ts),
            "function_type" => self.func_type(ts, None),
            "struct_type" => self.node(
                ts,
                NodeKind::StructType {
                    fields: NodeList::new(ListKind::Field, self.struct_fields(ts)),
                },
            ),
            "interface_type" => self.node(
                ts,
                NodeKind::InterfaceType {
                    methods: NodeList::new(ListKind::Field, self.interface_elems(ts)),
                },
            ),
            "negated_type" => match self.named(ts).first() {
                Some(inner) => self.node(
                    ts,
                    NodeKind::Unary {
                        op: UnaryOp::Tilde,
                        x: self.boxed(*inner),
                    },
                ),
                None => self.bad(ts),
            },
            "type_elem" | "type_constraint" | "constraint_elem" => self.union(ts),
            _ => self.bad(ts),
        }
    }

    fn lit(&self, ts: TsNode<'_>, kind: LitKind) -> Node {
        self.node(
            ts,
            NodeKind::BasicLit {
                kind,
                value: self.text(ts).to_owned(),
            },
        )
    }

    fn selector(&self, ts: TsNode<'_>, operand: &str, field: &str) -> Node {
        match (self.field(ts, operand), self.field(ts, field)) {
            (Some(x), Some(sel)) => self.node(
                ts,
                NodeKind::Selector {
                    x: self.boxed(x),
                    sel: self.ident(sel).boxed(),
                },
            ),
            _ => self.bad(ts),
        }
    }

    fn index(&self, ts: TsNode<'_>) -> Node {
        let Some(operand) = self.field(ts, "operand") else {
            return self.bad(ts);
        };
        let indices = self.fields(ts, "index");
        match indices.as_slice() {
            [index] => self.node(
                ts,
                NodeKind::Index {
                    x: self.boxed(operand),
                    index: self.boxed(*index),
                },
            ),
            [] => self.bad(ts),
            _ => self.node(
                ts,
                NodeKind::IndexList {
                    x: self.boxed(operand),
                    indices: self.expr_list(&indices),
                },
            ),
        }
    }

    fn instantiation(&self, ts: TsNode<'_>) -> Node {
        let Some(base) = self.field(ts, "type") else {
            return self.bad(ts);
        };
        let args: Vec<TsNode<'_>> = match self.field(ts, "type_arguments") {
            Some(list) => self.named(list),
            None => self
                .named(ts)
                .into_iter()
                .filter(|child| child.id() != base.id())
                .collect(),
        };
        match args.as_slice() {
            [arg] => self.node(
                ts,
                NodeKind::Index {
                    x: self.boxed(base),
                    index: self.boxed(*arg),
                },
            ),
            [] => self.bad(ts),
            _ => self.node(
                ts,
                NodeKind::IndexList {
                    x: self.boxed(base),
                    indices: self.expr_list(&args),
                },
            ),
        }
    }

    fn slice(&self, ts: TsNode<'_>) -> Node {
        let Some(operand) = self.field(ts, "operand") else {
            return self.bad(ts);
        };
        let colons = {
            let mut cursor = ts.walk();
            let count = ts
                .children(&mut cursor)
                .filter(|child| !child.is_named() && child.kind() == ":")
                .count();
            count
        };
        self.node(
            ts,
            NodeKind::Slice {
                x: self.boxed(operand),
                low: self.opt(self.field(ts, "start")),
                high: self.opt(self.field(ts, "end")),
                max: self.opt(self.field(ts, "capacity")),
                slice3: colons == 2,
            },
        )
    }

    fn call(&self, ts: TsNode<'_>) -> Node {
        let Some(function) = self.field(ts, "function") else {
            return self.bad(ts);
        };
        let mut fun = self.expr(function);
        if let Some(type_args) = self.field(ts, "type_arguments") {
            let args = self.named(type_args);
            fun = match args.as_slice() {
                [arg] => Node::new(NodeKind::Index {
                    x: fun.boxed(),
                    index: self.boxed(*arg),
                }),
                _ => Node::new(NodeKind::IndexList {
                    x: fun.boxed(),
                    indices: self.expr_list(&args),
                }),
            };
        }
        let (args, ellipsis) = match self.field(ts, "arguments") {
            Some(list) => {
                let items = self.named(list);
                let ellipsis = items
                    .last()
                    .is_some_and(|last| last.kind() == "variadic_argument")
                    || self.has_token(list, "...");
                (self.expr_list(&items), ellipsis)
            }
            None => (NodeList::empty(ListKind::Expr), false),
        };
        self.node(
            ts,
            NodeKind::Call {
                fun: fun.boxed(),
                args,
                ellipsis,
            },
        )
    }

    fn conversion(&self, ts: TsNode<'_>) -> Node {
        match (self.field(ts, "type"), self.field(ts, "operand")) {
            (Some(ty), Some(operand)) => self.node(
                ts,
                NodeKind::Call {
                    fun: self.boxed(ty),
                    args: self.expr_list(&[operand]),
                    ellipsis: false,
                },
            ),
            _ => self.bad(ts),
        }
    }

    fn unary(&self, ts: TsNode<'_>) -> Node {
        let (Some(operator), Some(operand)) =
            (self.field(ts, "operator"), self.field(ts, "operand"))
        else {
            return self.bad(ts);
        };
        let x = self.boxed(operand);
        match operator.kind() {
            "*" => self.node(ts, NodeKind::Star(x)),
            op => match UnaryOp::from_str(op) {
                Ok(op) => self.node(ts, NodeKind::Unary { op, x }),
                Err(_) => self.bad(ts),
            },
        }
    }

    fn binary(&self, ts: TsNode<'_>) -> Node {
        let (Some(left), Some(operator), Some(right)) = (
            self.field(ts, "left"),
            self.field(ts, "operator"),
            self.field(ts, "right"),
        ) else {
            return self.bad(ts);
        };
        match BinaryOp::from_str(operator.kind()) {
            Ok(op) => self.node(
                ts,
                NodeKind::Binary {
                    op,
                    x: self.boxed(left),
                    y: self.boxed(right),
                },
            ),
            Err(_) => self.bad(ts),
        }
    }

    fn composite(&self, ts: TsNode<'_>) -> Node {
        match self.field(ts, "body") {
            Some(body) => self.respan(self.literal_value(body, self.field(ts, "type")), ts),
            None => self.bad(ts),
        }
    }

    fn literal_value(&self, body: TsNode<'_>, ty: Option<TsNode<'_>>) -> Node {
        let elts = self.named(body);
        self.node(
            body,
            NodeKind::CompositeLit {
                ty: self.opt(ty),
                elts: self.expr_list(&elts),
            },
        )
    }

    fn keyed(&self, ts: TsNode<'_>) -> Node {
        let parts = self.named(ts);
        let key = self.field(ts, "key").or_else(|| parts.first().copied());
        let value = self.field(ts, "value").or_else(|| parts.get(1).copied());
        match (key, value) {
            (Some(key), Some(value)) => self.node(
                ts,
                NodeKind::KeyValue {
                    key: self.boxed(key),
                    value: self.boxed(value),
                },
            ),
            _ => self.bad(ts),
        }
    }

    fn func_lit(&self, ts: TsNode<'_>) -> Node {
        let Some(body) = self.field(ts, "body") else {
            return self.bad(ts);
        };
        self.node(
            ts,
            NodeKind::FuncLit {
                ty: self.func_type(ts, None).boxed(),
                body: self.stmt(body).boxed(),
            },
        )
    }

    fn chan(&self, ts: TsNode<'_>) -> Node {
        let Some(value) = self.field(ts, "value") else {
            return self.bad(ts);
        };
        let mut cursor = ts.walk();
        let tokens: Vec<&str> = ts
            .children(&mut cursor)
            .filter(|child| !child.is_named())
            .map(|child| child.kind())
            .collect();
        let dir = match tokens.as_slice() {
            ["<-", "chan", ..] => ChanDir::Recv,
            ["chan", "<-", ..] => ChanDir::Send,
            _ => ChanDir::Both,
        };
        self.node(
            ts,
            NodeKind::ChanType {
                dir,
                value: self.boxed(value),
            },
        )
    }

    fn union(&self, ts: TsNode<'_>) -> Node {
        let mut terms = self.named(ts).into_iter().map(|term| self.expr(term));
        let Some(first) = terms.next() else {
            return self.bad(ts);
        };
        terms.fold(first, |acc, term| {
            Node::new(NodeKind::Binary {
                op: BinaryOp::Or,
                x: acc.boxed(),
                y: term.boxed(),
            })
        })
    }

    /// Lowers a function signature found on `ts` (literal, type or declaration).
    pub(super) fn func_type(&self, ts: TsNode<'_>, type_params: Option<TsNode<'_>>) -> Node {
        let params = self
            .field(ts, "parameters")
            .map(|list| self.params(list))
            .unwrap_or_default();
        let results = match self.field(ts, "result") {
            Some(result) if result.kind() == "parameter_list" => self.params(result),
            Some(result) => vec![Node::new(NodeKind::Field {
                names: NodeList::empty(ListKind::Ident),
                ty: Some(self.boxed(result)),
                tag: None,
            })],
            None => Vec::new(),
        };
        let type_params = type_params
            .map(|list| self.params(list))
            .unwrap_or_default();
        self.node(
            ts,
            NodeKind::FuncType {
                type_params: NodeList::new(ListKind::Field, type_params),
                params: NodeList::new(ListKind::Field, params),
                results: NodeList::new(ListKind::Field, results),
            },
        )
    }

    /// Lowers a parameter, result or type-parameter list into fields.
    pub(super) fn params(&self, list: TsNode<'_>) -> Vec<Node> {
        self.named(list)
            .into_iter()
            .map(|decl| match decl.kind() {
                "variadic_parameter_declaration" => {
                    let ty = self
                        .field(decl, "type")
                        .map(|ty| self.node(ty, NodeKind::Ellipsis(Some(self.boxed(ty)))));
                    self.field_node(decl, self.fields(decl, "name"), ty.map(Node::boxed), None)
                }
                "parameter_declaration" | "type_parameter_declaration" => {
                    let ty = self.opt(self.field(decl, "type"));
                    self.field_node(decl, self.fields(decl, "name"), ty, None)
                }
                _ => self.field_node(decl, Vec::new(), Some(self.boxed(decl)), None),
            })
            .collect()
    }

    fn struct_fields(&self, ts: TsNode<'_>) -> Vec<Node> {
        let Some(list) = self
            .named(ts)
            .into_iter()
            .find(|child| child.kind() == "field_declaration_list")
        else {
            return Vec::new();
        };
        self.named(list)
            .into_iter()
            .filter(|decl| decl.kind() == "field_declaration")
            .map(|decl| {
                let names = self.fields(decl, "name");
                let ty = self.field(decl, "type").map(|ty| {
                    let lowered = self.expr(ty);
                    if names.is_empty() && self.has_token(decl, "*") {
                        Node::new(NodeKind::Star(lowered.boxed()))
                    } else {
                        lowered
                    }
                });
                let tag = self.opt(self.field(decl, "tag"));
                self.field_node(decl, names, ty.map(Node::boxed), tag)
            })
            .collect()
    }

    fn interface_elems(&self, ts: TsNode<'_>) -> Vec<Node> {
        self.named(ts)
            .into_iter()
            .map(|elem| match elem.kind() {
                "method_elem" | "method_spec" => {
                    let ty = self.func_type(elem, None);
                    self.field_node(elem, self.fields(elem, "name"), Some(ty.boxed()), None)
                }
                _ => self.field_node(elem, Vec::new(), Some(self.boxed(elem)), None),
            })
            .collect()
    }

    fn field_node(
        &self,
        ts: TsNode<'_>,
        names: Vec<TsNode<'_>>,
        ty: Option<Box<Node>>,
        tag: Option<Box<Node>>,
    ) -> Node {
        let names = names.into_iter().map(|name| self.ident(name)).collect();
        self.node(
            ts,
            NodeKind::Field {
                names: NodeList::new(ListKind::Ident, names),
                ty,
                tag,
            },
        )
    }

    /// Lowers a sequence of expression nodes.
    pub(super) fn expr_list(&self, items: &[TsNode<'_>]) -> NodeList {
        NodeList::new(
            ListKind::Expr,
            items.iter().map(|item| self.expr(*item)).collect(),
        )
    }

    /// Lowers the named children of an `expression_list`, or `ts` itself.
    pub(super) fn exprs_of(&self, ts: Option<TsNode<'_>>) -> NodeList {
        match ts {
            Some(list) if list.kind() == "expression_list" => self.expr_list(&self.named(list)),
            Some(single) => self.expr_list(&[single]),
            None => NodeList::empty(ListKind::Expr),
        }
    }
}
