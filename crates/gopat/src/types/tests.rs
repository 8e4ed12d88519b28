//! Unit tests for type relations.

use rstest::rstest;

use super::*;

fn basic(kind: BasicKind) -> GoType {
    GoType::Basic(kind)
}

fn int() -> GoType {
    basic(BasicKind::Int)
}

fn slice(elem: GoType) -> GoType {
    GoType::Slice(Box::new(elem))
}

fn pointer(base: GoType) -> GoType {
    GoType::Pointer(Box::new(base))
}

fn celsius() -> GoType {
    GoType::named("Celsius", basic(BasicKind::Float64))
}

fn stringer() -> GoType {
    GoType::named("fmt.Stringer", GoType::interface(["String"]))
}

fn buffer() -> GoType {
    GoType::named("Buffer", GoType::Struct(Vec::new())).with_methods(["String", "Write"])
}

#[rstest]
#[case(int(), int(), true)]
#[case(int(), basic(BasicKind::Int64), false)]
#[case(slice(int()), slice(int()), true)]
#[case(celsius(), celsius(), true)]
#[case(celsius(), basic(BasicKind::Float64), false)]
#[case(GoType::interface(["A", "B"]), GoType::interface(["B", "A"]), true)]
fn identity(#[case] a: GoType, #[case] b: GoType, #[case] expected: bool) {
    assert_eq!(a.identical(&b), expected);
    assert_eq!(b.identical(&a), expected);
}

#[rstest]
#[case(int(), int(), true)]
#[case(basic(BasicKind::UntypedInt), basic(BasicKind::Float64), true)]
#[case(basic(BasicKind::UntypedFloat), int(), false)]
#[case(basic(BasicKind::UntypedNil), slice(int()), true)]
#[case(basic(BasicKind::UntypedNil), int(), false)]
#[case(basic(BasicKind::UntypedString), GoType::interface(Vec::<String>::new()), true)]
#[case(buffer(), stringer(), true)]
#[case(pointer(buffer()), stringer(), true)]
#[case(int(), stringer(), false)]
#[case(slice(int()), GoType::named("Ints", slice(int())), true)]
#[case(celsius(), GoType::named("Fahrenheit", basic(BasicKind::Float64)), false)]
fn assignability(#[case] value: GoType, #[case] target: GoType, #[case] expected: bool) {
    assert_eq!(value.assignable_to(&target), expected);
}

#[rstest]
#[case(celsius(), GoType::named("Fahrenheit", basic(BasicKind::Float64)), true)]
#[case(int(), basic(BasicKind::Float32), true)]
#[case(int(), basic(BasicKind::String), true)]
#[case(basic(BasicKind::String), slice(basic(BasicKind::Uint8)), true)]
#[case(slice(basic(BasicKind::Int32)), basic(BasicKind::String), true)]
#[case(basic(BasicKind::Float64), basic(BasicKind::String), false)]
#[case(slice(int()), GoType::Array { len: 4, elem: Box::new(int()) }, true)]
#[case(basic(BasicKind::Bool), int(), false)]
fn convertibility(#[case] value: GoType, #[case] target: GoType, #[case] expected: bool) {
    assert_eq!(value.convertible_to(&target), expected);
}

#[rstest]
#[case(int(), true)]
#[case(pointer(int()), true)]
#[case(slice(int()), false)]
#[case(GoType::Map { key: Box::new(int()), value: Box::new(int()) }, false)]
#[case(GoType::Array { len: 2, elem: Box::new(slice(int())) }, false)]
#[case(GoType::Struct(vec![StructField { name: "a".to_owned(), ty: int(), embedded: false, tag: None }]), true)]
#[case(stringer(), true)]
fn comparability(#[case] ty: GoType, #[case] expected: bool) {
    assert_eq!(ty.comparable(), expected);
}

#[rstest]
#[case("basic", Some(KindClass::Basic))]
#[case("chan", Some(KindClass::Chan))]
#[case("pointer", Some(KindClass::Pointer))]
#[case("number", None)]
fn kind_classes_parse_by_name(#[case] text: &str, #[case] expected: Option<KindClass>) {
    assert_eq!(text.parse::<KindClass>().ok(), expected);
}

#[test]
fn named_types_report_their_underlying_class() {
    assert_eq!(celsius().class(), KindClass::Basic);
    assert_eq!(buffer().class(), KindClass::Struct);
    assert_eq!(stringer().class(), KindClass::Interface);
}
