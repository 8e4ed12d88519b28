//! Declaration lowering.

use super::{Lowerer, TsNode};
use crate::node::{DeclKind, ListKind, Node, NodeKind, NodeList};

impl Lowerer<'_> {
    /// Lowers a function or method declaration.
    pub(super) fn func_decl(&self, ts: TsNode<'_>) -> Node {
        let Some(name) = self.field(ts, "name") else {
            return self.bad(ts);
        };
        let recv = self
            .field(ts, "receiver")
            .map(|list| self.params(list))
            .unwrap_or_default();
        let ty = self.func_type(ts, self.field(ts, "type_parameters"));
        self.node(
            ts,
            NodeKind::FuncDecl {
                recv: NodeList::new(ListKind::Field, recv),
                name: self.ident(name).boxed(),
                ty: ty.boxed(),
                body: self.opt_stmt(self.field(ts, "body")),
            },
        )
    }

    /// Lowers an `import`, `const`, `var` or `type` declaration.
    pub(super) fn gen_decl(&self, ts: TsNode<'_>) -> Node {
        let kind = match ts.kind() {
            "import_declaration" => DeclKind::Import,
            "const_declaration" => DeclKind::Const,
            "type_declaration" => DeclKind::Type,
            _ => DeclKind::Var,
        };
        let mut grouped = self.has_token(ts, "(");
        let mut specs = Vec::new();
        for child in self.named(ts) {
            if child.kind().ends_with("_spec_list") {
                grouped = true;
                specs.extend(self.named(child).into_iter().map(|spec| self.spec(spec)));
            } else {
                specs.push(self.spec(child));
            }
        }
        self.node(
            ts,
            NodeKind::GenDecl {
                kind,
                specs: NodeList::new(ListKind::Spec, specs),
                grouped,
            },
        )
    }

    fn spec(&self, ts: TsNode<'_>) -> Node {
        match ts.kind() {
            "import_spec" => match self.field(ts, "path") {
                Some(path) => self.node(
                    ts,
                    NodeKind::ImportSpec {
                        name: self.field(ts, "name").map(|name| self.ident(name).boxed()),
                        path: self.boxed(path),
                    },
                ),
                None => self.bad(ts),
            },
            "const_spec" | "var_spec" => {
                let names = self
                    .fields(ts, "name")
                    .into_iter()
                    .map(|name| self.ident(name))
                    .collect();
                self.node(
                    ts,
                    NodeKind::ValueSpec {
                        names: NodeList::new(ListKind::Ident, names),
                        ty: self.opt(self.field(ts, "type")),
                        values: self.exprs_of(self.field(ts, "value")),
                    },
                )
            }
            "type_spec" | "type_alias" => {
                let (Some(name), Some(ty)) = (self.field(ts, "name"), self.field(ts, "type"))
                else {
                    return self.bad(ts);
                };
                let type_params = self
                    .field(ts, "type_parameters")
                    .map(|list| self.params(list))
                    .unwrap_or_default();
                self.node(
                    ts,
                    NodeKind::TypeSpec {
                        name: self.ident(name).boxed(),
                        type_params: NodeList::new(ListKind::Field, type_params),
                        alias: ts.kind() == "type_alias",
                        ty: self.boxed(ty),
                    },
                )
            }
            _ => self.bad(ts),
        }
    }
}
