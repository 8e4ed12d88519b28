//! A small model of Go types and the relations attribute predicates test.
//!
//! Types come from a [`TypeInfo`] implementation; the engine never infers
//! them itself. The relations follow the Go language rules for
//! identity, assignability, convertibility and comparability, with two
//! simplifications: defined types are identified by name, and interfaces and
//! method sets are compared by method name only.

mod info;
mod resolve;

use std::collections::BTreeSet;

use gopat_syntax::ChanDir;
use strum::{Display, EnumString};

pub use info::{TypeInfo, TypeTable};
pub use resolve::{resolve_type, universe};

/// Predeclared basic types, including the untyped constant kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[strum(serialize_all = "snake_case")]
pub enum BasicKind {
    /// `bool`
    Bool,
    /// `int`
    Int,
    /// `int8`
    Int8,
    /// `int16`
    Int16,
    /// `int32` and `rune`
    Int32,
    /// `int64`
    Int64,
    /// `uint`
    Uint,
    /// `uint8` and `byte`
    Uint8,
    /// `uint16`
    Uint16,
    /// `uint32`
    Uint32,
    /// `uint64`
    Uint64,
    /// `uintptr`
    Uintptr,
    /// `float32`
    Float32,
    /// `float64`
    Float64,
    /// `complex64`
    Complex64,
    /// `complex128`
    Complex128,
    /// `string`
    String,
    /// `unsafe.Pointer`
    UnsafePointer,
    /// Untyped boolean constant.
    UntypedBool,
    /// Untyped integer constant.
    UntypedInt,
    /// Untyped rune constant.
    UntypedRune,
    /// Untyped floating-point constant.
    UntypedFloat,
    /// Untyped string constant.
    UntypedString,
    /// The untyped `nil` value.
    UntypedNil,
}

impl BasicKind {
    /// Returns whether values of this kind are integers.
    #[must_use]
    pub const fn is_integer(self) -> bool {
        matches!(
            self,
            Self::Int
                | Self::Int8
                | Self::Int16
                | Self::Int32
                | Self::Int64
                | Self::Uint
                | Self::Uint8
                | Self::Uint16
                | Self::Uint32
                | Self::Uint64
                | Self::Uintptr
                | Self::UntypedInt
                | Self::UntypedRune
        )
    }

    /// Returns whether values of this kind are floating-point numbers.
    #[must_use]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::Float32 | Self::Float64 | Self::UntypedFloat)
    }

    /// Returns whether values of this kind are complex numbers.
    #[must_use]
    pub const fn is_complex(self) -> bool {
        matches!(self, Self::Complex64 | Self::Complex128)
    }

    /// Returns whether values of this kind are strings.
    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(self, Self::String | Self::UntypedString)
    }

    /// Returns whether this is the kind of an untyped constant or `nil`.
    #[must_use]
    pub const fn is_untyped(self) -> bool {
        matches!(
            self,
            Self::UntypedBool
                | Self::UntypedInt
                | Self::UntypedRune
                | Self::UntypedFloat
                | Self::UntypedString
                | Self::UntypedNil
        )
    }
}

/// Underlying-kind classes accepted by `is(kind)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumString, Display)]
#[strum(serialize_all = "snake_case")]
pub enum KindClass {
    /// Booleans, numbers and strings.
    Basic,
    /// Arrays.
    Array,
    /// Slices.
    Slice,
    /// Structs.
    Struct,
    /// Interfaces.
    Interface,
    /// Pointers.
    Pointer,
    /// Functions.
    Func,
    /// Maps.
    Map,
    /// Channels.
    Chan,
}

/// One struct field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StructField {
    /// Field name; the type name for embedded fields.
    pub name: String,
    /// Field type.
    pub ty: GoType,
    /// Whether the field is embedded.
    pub embedded: bool,
    /// Struct tag, without quotes.
    pub tag: Option<String>,
}

/// A Go type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GoType {
    /// A predeclared basic type.
    Basic(BasicKind),
    /// A defined type.
    Named {
        /// Qualified name, such as `io.Reader`.
        name: String,
        /// Underlying type.
        underlying: Box<GoType>,
        /// Method names declared on the type or its pointer.
        methods: BTreeSet<String>,
    },
    /// `*T`
    Pointer(Box<GoType>),
    /// `[len]T`
    Array {
        /// Length.
        len: u64,
        /// Element type.
        elem: Box<GoType>,
    },
    /// `[]T`
    Slice(Box<GoType>),
    /// `map[K]V`
    Map {
        /// Key type.
        key: Box<GoType>,
        /// Value type.
        value: Box<GoType>,
    },
    /// `chan T`, `chan<- T` or `<-chan T`.
    Chan {
        /// Direction.
        dir: ChanDir,
        /// Element type.
        elem: Box<GoType>,
    },
    /// `struct { ... }`
    Struct(Vec<StructField>),
    /// `func(params) results`
    Func {
        /// Parameter types.
        params: Vec<GoType>,
        /// Result types.
        results: Vec<GoType>,
        /// Whether the last parameter is variadic.
        variadic: bool,
    },
    /// `interface { ... }`, by method names.
    Interface(BTreeSet<String>),
}

impl GoType {
    /// Creates a defined type without methods.
    #[must_use]
    pub fn named(name: impl Into<String>, underlying: Self) -> Self {
        Self::Named {
            name: name.into(),
            underlying: Box::new(underlying),
            methods: BTreeSet::new(),
        }
    }

    /// Creates an interface from method names.
    #[must_use]
    pub fn interface<I, S>(methods: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::Interface(methods.into_iter().map(Into::into).collect())
    }

    /// Adds methods to a defined type; other types are returned unchanged.
    #[must_use]
    pub fn with_methods<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        if let Self::Named { methods, .. } = &mut self {
            methods.extend(names.into_iter().map(Into::into));
        }
        self
    }

    /// Returns the underlying type.
    #[must_use]
    pub fn underlying(&self) -> &Self {
        let mut current = self;
        while let Self::Named { underlying, .. } = current {
            current = underlying;
        }
        current
    }

    const fn is_named(&self) -> bool {
        matches!(self, Self::Named { .. } | Self::Basic(_))
    }

    fn basic(&self) -> Option<BasicKind> {
        match self.underlying() {
            Self::Basic(kind) => Some(*kind),
            _ => None,
        }
    }

    /// Returns the underlying-kind class.
    #[must_use]
    pub fn class(&self) -> KindClass {
        match self.underlying() {
            Self::Basic(_) | Self::Named { .. } => KindClass::Basic,
            Self::Pointer(_) => KindClass::Pointer,
            Self::Array { .. } => KindClass::Array,
            Self::Slice(_) => KindClass::Slice,
            Self::Map { .. } => KindClass::Map,
            Self::Chan { .. } => KindClass::Chan,
            Self::Struct(_) => KindClass::Struct,
            Self::Func { .. } => KindClass::Func,
            Self::Interface(_) => KindClass::Interface,
        }
    }

    /// Returns whether `self` and `other` are identical types.
    #[must_use]
    pub fn identical(&self, other: &Self) -> bool {
        self.identical_with(other, true)
    }

    fn identical_with(&self, other: &Self, tags: bool) -> bool {
        match (self, other) {
            (Self::Named { name: a, .. }, Self::Named { name: b, .. }) => a == b,
            (Self::Basic(a), Self::Basic(b)) => a == b,
            (Self::Pointer(a), Self::Pointer(b)) | (Self::Slice(a), Self::Slice(b)) => {
                a.identical_with(b, tags)
            }
            (Self::Array { len: n, elem: a }, Self::Array { len: m, elem: b }) => {
                n == m && a.identical_with(b, tags)
            }
            (
                Self::Map { key: k1, value: v1 },
                Self::Map { key: k2, value: v2 },
            ) => k1.identical_with(k2, tags) && v1.identical_with(v2, tags),
            (Self::Chan { dir: d1, elem: a }, Self::Chan { dir: d2, elem: b }) => {
                d1 == d2 && a.identical_with(b, tags)
            }
            (Self::Struct(a), Self::Struct(b)) => {
                a.len() == b.len()
                    && a.iter().zip(b).all(|(x, y)| {
                        x.name == y.name
                            && x.embedded == y.embedded
                            && (!tags || x.tag == y.tag)
                            && x.ty.identical_with(&y.ty, tags)
                    })
            }
            (
                Self::Func {
                    params: p1,
                    results: r1,
                    variadic: v1,
                },
                Self::Func {
                    params: p2,
                    results: r2,
                    variadic: v2,
                },
            ) => v1 == v2 && all_identical(p1, p2, tags) && all_identical(r1, r2, tags),
            (Self::Interface(a), Self::Interface(b)) => a == b,
            _ => false,
        }
    }

    /// Returns the method names callable on a value of this type.
    #[must_use]
    pub fn method_set(&self) -> BTreeSet<&str> {
        match self {
            Self::Named {
                methods,
                underlying,
                ..
            } => {
                let mut set: BTreeSet<&str> = methods.iter().map(String::as_str).collect();
                if let Self::Interface(inherited) = underlying.underlying() {
                    set.extend(inherited.iter().map(String::as_str));
                }
                set
            }
            Self::Pointer(base) => match &**base {
                Self::Named { methods, .. } => methods.iter().map(String::as_str).collect(),
                _ => BTreeSet::new(),
            },
            Self::Interface(methods) => methods.iter().map(String::as_str).collect(),
            _ => BTreeSet::new(),
        }
    }

    /// Returns whether `self` implements the interface `iface`.
    ///
    /// A non-interface `iface` is never implemented.
    #[must_use]
    pub fn implements(&self, iface: &Self) -> bool {
        let Self::Interface(required) = iface.underlying() else {
            return false;
        };
        let available = self.method_set();
        required.iter().all(|name| available.contains(name.as_str()))
    }

    /// Returns whether a value of type `self` is assignable to `target`.
    #[must_use]
    pub fn assignable_to(&self, target: &Self) -> bool {
        if self.identical(target) {
            return true;
        }
        if let Some(kind) = self.basic().filter(|kind| kind.is_untyped()) {
            return untyped_fits(kind, target);
        }
        if self.underlying().identical(target.underlying())
            && (!self.is_named() || !target.is_named())
        {
            return true;
        }
        if matches!(target.underlying(), Self::Interface(_)) && self.implements(target) {
            return true;
        }
        match (self.underlying(), target.underlying()) {
            (
                Self::Chan {
                    dir: ChanDir::Both,
                    elem: a,
                },
                Self::Chan { elem: b, .. },
            ) => a.identical(b) && (!self.is_named() || !target.is_named()),
            _ => false,
        }
    }

    /// Returns whether a value of type `self` can be converted to `target`.
    #[must_use]
    pub fn convertible_to(&self, target: &Self) -> bool {
        if self.assignable_to(target) {
            return true;
        }
        let (from, to) = (self.underlying(), target.underlying());
        if from.identical_with(to, false) {
            return true;
        }
        if let (Self::Pointer(a), Self::Pointer(b)) = (self, target) {
            if a.underlying().identical_with(b.underlying(), false) {
                return true;
            }
        }
        if let (Some(a), Some(b)) = (self.basic(), target.basic()) {
            let numeric = |kind: BasicKind| kind.is_integer() || kind.is_float();
            if (numeric(a) && numeric(b)) || (a.is_complex() && b.is_complex()) {
                return true;
            }
            if a.is_integer() && b.is_string() {
                return true;
            }
        }
        if target.basic().is_some_and(BasicKind::is_string) && is_byte_or_rune_slice(from) {
            return true;
        }
        if self.basic().is_some_and(BasicKind::is_string) && is_byte_or_rune_slice(to) {
            return true;
        }
        match (from, to) {
            (Self::Slice(a), Self::Array { elem: b, .. }) => a.identical(b),
            (Self::Slice(a), Self::Pointer(array)) => match array.underlying() {
                Self::Array { elem: b, .. } => a.identical(b),
                _ => false,
            },
            _ => false,
        }
    }

    /// Returns whether values of this type can be compared with `==`.
    #[must_use]
    pub fn comparable(&self) -> bool {
        match self.underlying() {
            Self::Basic(_)
            | Self::Named { .. }
            | Self::Pointer(_)
            | Self::Chan { .. }
            | Self::Interface(_) => true,
            Self::Array { elem, .. } => elem.comparable(),
            Self::Struct(fields) => fields.iter().all(|field| field.ty.comparable()),
            Self::Slice(_) | Self::Map { .. } | Self::Func { .. } => false,
        }
    }
}

fn all_identical(a: &[GoType], b: &[GoType], tags: bool) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.identical_with(y, tags))
}

fn is_byte_or_rune_slice(ty: &GoType) -> bool {
    match ty {
        GoType::Slice(elem) => matches!(
            elem.basic(),
            Some(BasicKind::Uint8 | BasicKind::Int32)
        ),
        _ => false,
    }
}

/// Whether an untyped constant of `kind` may be assigned to `target`.
fn untyped_fits(kind: BasicKind, target: &GoType) -> bool {
    let underlying = target.underlying();
    if let GoType::Interface(methods) = underlying {
        return kind == BasicKind::UntypedNil || methods.is_empty();
    }
    let Some(wanted) = target.basic() else {
        return kind == BasicKind::UntypedNil
            && matches!(
                underlying,
                GoType::Pointer(_)
                    | GoType::Slice(_)
                    | GoType::Map { .. }
                    | GoType::Chan { .. }
                    | GoType::Func { .. }
                    | GoType::Interface(_)
            );
    };
    match kind {
        BasicKind::UntypedBool => wanted == BasicKind::Bool,
        BasicKind::UntypedInt | BasicKind::UntypedRune => {
            wanted.is_integer() || wanted.is_float() || wanted.is_complex()
        }
        BasicKind::UntypedFloat => wanted.is_float() || wanted.is_complex(),
        BasicKind::UntypedString => wanted == BasicKind::String,
        BasicKind::UntypedNil => wanted == BasicKind::UnsafePointer,
        _ => false,
    }
}

#[cfg(test)]
mod tests;
