//! Resolution of type expressions written in predicates.

use std::collections::BTreeSet;

use gopat_syntax::{LitKind, Node, NodeKind, NodeList};

use super::{BasicKind, GoType, StructField, TypeInfo};

/// Returns the predeclared type called `name`.
#[must_use]
pub fn universe(name: &str) -> Option<GoType> {
    let kind = match name {
        "bool" => BasicKind::Bool,
        "int" => BasicKind::Int,
        "int8" => BasicKind::Int8,
        "int16" => BasicKind::Int16,
        "int32" | "rune" => BasicKind::Int32,
        "int64" => BasicKind::Int64,
        "uint" => BasicKind::Uint,
        "uint8" | "byte" => BasicKind::Uint8,
        "uint16" => BasicKind::Uint16,
        "uint32" => BasicKind::Uint32,
        "uint64" => BasicKind::Uint64,
        "uintptr" => BasicKind::Uintptr,
        "float32" => BasicKind::Float32,
        "float64" => BasicKind::Float64,
        "complex64" => BasicKind::Complex64,
        "complex128" => BasicKind::Complex128,
        "string" => BasicKind::String,
        "error" => return Some(GoType::named("error", GoType::interface(["Error"]))),
        "any" => return Some(GoType::interface(Vec::<String>::new())),
        _ => return None,
    };
    Some(GoType::Basic(kind))
}

/// Resolves a type expression against `info`'s scope.
///
/// Names are looked up in scope first and among the predeclared types
/// second. Returns `None` when any part of the expression is unknown or is
/// not a type.
pub fn resolve_type(node: &Node, info: &dyn TypeInfo) -> Option<GoType> {
    match &node.kind {
        NodeKind::Ident(name) => info.scope_lookup(name).or_else(|| universe(name)),
        NodeKind::Selector { x, sel } => {
            let qualified = format!("{}.{}", x.as_ident()?, sel.as_ident()?);
            info.scope_lookup(&qualified)
        }
        NodeKind::Paren(inner) => resolve_type(inner, info),
        NodeKind::Star(base) => Some(GoType::Pointer(Box::new(resolve_type(base, info)?))),
        NodeKind::ArrayType { len: None, elt } => {
            Some(GoType::Slice(Box::new(resolve_type(elt, info)?)))
        }
        NodeKind::ArrayType { len: Some(len), elt } => Some(GoType::Array {
            len: array_length(len)?,
            elem: Box::new(resolve_type(elt, info)?),
        }),
        NodeKind::MapType { key, value } => Some(GoType::Map {
            key: Box::new(resolve_type(key, info)?),
            value: Box::new(resolve_type(value, info)?),
        }),
        NodeKind::ChanType { dir, value } => Some(GoType::Chan {
            dir: *dir,
            elem: Box::new(resolve_type(value, info)?),
        }),
        NodeKind::FuncType {
            params, results, ..
        } => {
            let (param_types, variadic) = signature(params, info)?;
            let (result_types, _) = signature(results, info)?;
            Some(GoType::Func {
                params: param_types,
                results: result_types,
                variadic,
            })
        }
        NodeKind::StructType { fields } => struct_fields(fields, info).map(GoType::Struct),
        NodeKind::InterfaceType { methods } => interface_methods(methods, info).map(GoType::Interface),
        _ => None,
    }
}

fn array_length(len: &Node) -> Option<u64> {
    match &len.kind {
        NodeKind::BasicLit {
            kind: LitKind::Int,
            value,
        } => value.replace('_', "").parse().ok(),
        _ => None,
    }
}

/// Flattens a parameter list into one type per declared name.
fn signature(fields: &NodeList, info: &dyn TypeInfo) -> Option<(Vec<GoType>, bool)> {
    let mut types = Vec::new();
    let mut variadic = false;
    for field in &fields.items {
        let NodeKind::Field { names, ty: Some(ty), .. } = &field.kind else {
            return None;
        };
        let resolved = match &ty.kind {
            NodeKind::Ellipsis(Some(elem)) => {
                variadic = true;
                GoType::Slice(Box::new(resolve_type(elem, info)?))
            }
            _ => resolve_type(ty, info)?,
        };
        let count = names.len().max(1);
        types.extend(std::iter::repeat_n(resolved, count));
    }
    Some((types, variadic))
}

fn struct_fields(fields: &NodeList, info: &dyn TypeInfo) -> Option<Vec<StructField>> {
    let mut resolved = Vec::new();
    for field in &fields.items {
        let NodeKind::Field {
            names,
            ty: Some(ty),
            tag,
        } = &field.kind
        else {
            return None;
        };
        let field_type = resolve_type(ty, info)?;
        let tag_text = tag.as_deref().and_then(literal_text);
        if names.is_empty() {
            resolved.push(StructField {
                name: embedded_name(ty)?.to_owned(),
                ty: field_type,
                embedded: true,
                tag: tag_text,
            });
            continue;
        }
        for name in &names.items {
            resolved.push(StructField {
                name: name.as_ident()?.to_owned(),
                ty: field_type.clone(),
                embedded: false,
                tag: tag_text.clone(),
            });
        }
    }
    Some(resolved)
}

fn interface_methods(methods: &NodeList, info: &dyn TypeInfo) -> Option<BTreeSet<String>> {
    let mut names = BTreeSet::new();
    for element in &methods.items {
        let NodeKind::Field {
            names: method_names,
            ty,
            ..
        } = &element.kind
        else {
            return None;
        };
        if let Some(first) = method_names.items.first() {
            names.insert(first.as_ident()?.to_owned());
            continue;
        }
        let embedded = resolve_type(ty.as_deref()?, info)?;
        match embedded.underlying() {
            GoType::Interface(inherited) => names.extend(inherited.iter().cloned()),
            _ => return None,
        }
    }
    Some(names)
}

fn embedded_name(ty: &Node) -> Option<&str> {
    match &ty.kind {
        NodeKind::Ident(name) => Some(name),
        NodeKind::Selector { sel, .. } => sel.as_ident(),
        NodeKind::Star(base) => embedded_name(base),
        _ => None,
    }
}

fn literal_text(tag: &Node) -> Option<String> {
    match &tag.kind {
        NodeKind::BasicLit {
            kind: LitKind::String,
            value,
        } => Some(value.trim_matches(|c| c == '"' || c == '`').to_owned()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;
    use crate::pattern::Pattern;
    use crate::types::{KindClass, TypeTable};

    fn type_node(text: &str) -> Node {
        let pattern = Pattern::compile(text).expect("type expression");
        pattern.root().as_node().cloned().expect("single node")
    }

    fn resolve(text: &str) -> Option<GoType> {
        let table = TypeTable::new()
            .with_name("Celsius", GoType::named("Celsius", GoType::Basic(BasicKind::Float64)))
            .with_name("io.Reader", GoType::named("io.Reader", GoType::interface(["Read"])));
        resolve_type(&type_node(text), &table)
    }

    #[rstest]
    #[case("int", KindClass::Basic)]
    #[case("*int", KindClass::Pointer)]
    #[case("[]string", KindClass::Slice)]
    #[case("[4]byte", KindClass::Array)]
    #[case("map[string]int", KindClass::Map)]
    #[case("chan int", KindClass::Chan)]
    #[case("func(int, ...string) error", KindClass::Func)]
    #[case("struct{ a, b int }", KindClass::Struct)]
    #[case("interface{ io.Reader; Close() error }", KindClass::Interface)]
    #[case("Celsius", KindClass::Basic)]
    #[case("error", KindClass::Interface)]
    fn type_expressions_resolve(#[case] text: &str, #[case] class: KindClass) {
        let resolved = resolve(text).unwrap_or_else(|| panic!("{text} should resolve"));
        assert_eq!(resolved.class(), class);
    }

    #[rstest]
    #[case("Unknown")]
    #[case("pkg.Missing")]
    #[case("[]Unknown")]
    fn unknown_names_do_not_resolve(#[case] text: &str) {
        assert_eq!(resolve(text), None);
    }

    #[test]
    fn variadic_parameters_become_slices() {
        let resolved = resolve("func(int, ...string)").expect("func type");
        let expected = GoType::Func {
            params: vec![
                GoType::Basic(BasicKind::Int),
                GoType::Slice(Box::new(GoType::Basic(BasicKind::String))),
            ],
            results: Vec::new(),
            variadic: true,
        };
        assert_eq!(resolved, expected);
    }

    #[test]
    fn embedded_interfaces_contribute_methods() {
        let resolved = resolve("interface{ io.Reader; Close() error }").expect("interface");
        assert_eq!(resolved, GoType::interface(["Close", "Read"]));
    }

    #[test]
    fn scope_shadows_predeclared_names() {
        let table = TypeTable::new().with_name("int", GoType::named("int", GoType::Basic(BasicKind::Int64)));
        let resolved = resolve_type(&type_node("int"), &table).expect("int");
        assert!(matches!(resolved, GoType::Named { .. }));
    }
}
