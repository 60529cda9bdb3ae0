//! Type pool.
//!
//! All static types of a loaded program live in one [`TypePool`] owned by the
//! load session and referenced by 32-bit [`TypeId`] handles. The pool is built
//! once by the front end and is read-only while checking, so it is shared by
//! reference across worker threads.
//!
//! Identity of the predeclared `error` type is structural: a defined type with no
//! declaring package named `error`. See [`TypePool::is_failure_type`].

use std::fmt;

/// Name of the predeclared failure-signaling type.
pub const FAILURE_TYPE_NAME: &str = "error";

/// A 32-bit index into the type pool.
#[derive(Copy, Clone, Eq, PartialEq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct TypeId(u32);

impl TypeId {
    // === Pre-interned types (see `TypePool::new`) ===

    /// Placeholder for expressions without a usable type.
    pub const INVALID: Self = Self(0);
    /// `bool`
    pub const BOOL: Self = Self(1);
    /// `int`
    pub const INT: Self = Self(2);
    /// `string`
    pub const STRING: Self = Self(3);
    /// The type of the untyped `nil` literal.
    pub const UNTYPED_NIL: Self = Self(4);
    /// `interface{}`
    pub const EMPTY_INTERFACE: Self = Self(5);
    /// The result type of a call with no results.
    pub const EMPTY_TUPLE: Self = Self(6);
    /// The predeclared `error` type.
    pub const ERROR: Self = Self(10);

    /// Number of pre-interned types.
    const PREDECLARED_COUNT: u32 = 11;

    /// Create an index from a raw u32 value.
    #[inline]
    pub const fn from_raw(raw: u32) -> Self {
        Self(raw)
    }

    /// Check if this is the INVALID placeholder.
    #[inline]
    pub const fn is_invalid(self) -> bool {
        self.0 == Self::INVALID.0
    }
}

impl fmt::Debug for TypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TypeId({})", self.0)
    }
}

/// Basic (predeclared, non-composite) type kinds.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub enum BasicKind {
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    UnsafePointer,
    UntypedNil,
}

impl BasicKind {
    /// Source spelling of the type.
    pub const fn name(self) -> &'static str {
        match self {
            BasicKind::Bool => "bool",
            BasicKind::Int => "int",
            BasicKind::Int8 => "int8",
            BasicKind::Int16 => "int16",
            BasicKind::Int32 => "int32",
            BasicKind::Int64 => "int64",
            BasicKind::Uint => "uint",
            BasicKind::Uint8 => "uint8",
            BasicKind::Uint16 => "uint16",
            BasicKind::Uint32 => "uint32",
            BasicKind::Uint64 => "uint64",
            BasicKind::Uintptr => "uintptr",
            BasicKind::Float32 => "float32",
            BasicKind::Float64 => "float64",
            BasicKind::Complex64 => "complex64",
            BasicKind::Complex128 => "complex128",
            BasicKind::String => "string",
            BasicKind::UnsafePointer => "unsafe.Pointer",
            BasicKind::UntypedNil => "untyped nil",
        }
    }
}

/// A struct field.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct Field {
    pub name: String,
    pub ty: TypeId,
    /// Embedded (anonymous) field whose members are promoted.
    pub embedded: bool,
}

/// A method declared in an interface body.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct Method {
    pub name: String,
    /// Declaring package path; only significant for unexported names.
    pub package: Option<String>,
    pub signature: TypeId,
}

impl Method {
    /// Identity used to compare methods across method sets.
    pub fn id(&self) -> MethodId<'_> {
        MethodId::new(&self.name, self.package.as_deref())
    }
}

/// Method identity.
///
/// Exported names are identified by name alone; unexported names are qualified
/// by their declaring package, so `a.close` and `b.close` are different methods.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct MethodId<'a> {
    package: Option<&'a str>,
    name: &'a str,
}

impl<'a> MethodId<'a> {
    pub fn new(name: &'a str, package: Option<&'a str>) -> Self {
        let exported = name.chars().next().is_some_and(char::is_uppercase);
        MethodId {
            package: if exported { None } else { package },
            name,
        }
    }

    pub fn name(&self) -> &'a str {
        self.name
    }
}

/// Interface body: explicitly declared methods plus embedded interfaces,
/// both in declaration order.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct InterfaceType {
    pub methods: Vec<Method>,
    pub embeddeds: Vec<TypeId>,
}

/// Type representation stored in the pool.
///
/// Compound types reference their children by [`TypeId`].
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub enum TypeData {
    Invalid,
    Basic(BasicKind),
    /// A defined type. `package` is `None` only for predeclared types.
    Named {
        package: Option<String>,
        name: String,
        underlying: TypeId,
    },
    Pointer(TypeId),
    Slice(TypeId),
    Array {
        len: u64,
        elem: TypeId,
    },
    Map {
        key: TypeId,
        value: TypeId,
    },
    Chan(TypeId),
    Struct(Vec<Field>),
    Interface(InterfaceType),
    /// Multiple results (or parameters) of a signature.
    Tuple(Vec<TypeId>),
    Signature {
        params: TypeId,
        results: TypeId,
        variadic: bool,
    },
}

static INVALID_DATA: TypeData = TypeData::Invalid;

/// Storage for every type of a loaded program.
#[derive(Clone, Eq, PartialEq, Debug)]
#[cfg_attr(feature = "dump", derive(serde::Serialize, serde::Deserialize))]
pub struct TypePool {
    types: Vec<TypeData>,
}

impl Default for TypePool {
    fn default() -> Self {
        Self::new()
    }
}

impl TypePool {
    /// Create a pool with the predeclared types at their fixed indices.
    pub fn new() -> Self {
        let error_result = TypeId(7);
        let error_method = TypeId(8);
        let error_iface = TypeId(9);
        let types = vec![
            TypeData::Invalid,                        // 0 = INVALID
            TypeData::Basic(BasicKind::Bool),         // 1 = BOOL
            TypeData::Basic(BasicKind::Int),          // 2 = INT
            TypeData::Basic(BasicKind::String),       // 3 = STRING
            TypeData::Basic(BasicKind::UntypedNil),   // 4 = UNTYPED_NIL
            TypeData::Interface(InterfaceType::default()), // 5 = EMPTY_INTERFACE
            TypeData::Tuple(Vec::new()),              // 6 = EMPTY_TUPLE
            TypeData::Tuple(vec![TypeId::STRING]),    // 7 = (string)
            TypeData::Signature {
                params: TypeId::EMPTY_TUPLE,
                results: error_result,
                variadic: false,
            }, // 8 = func() string
            TypeData::Interface(InterfaceType {
                methods: vec![Method {
                    name: "Error".to_string(),
                    package: None,
                    signature: error_method,
                }],
                embeddeds: Vec::new(),
            }), // 9 = interface{ Error() string }
            TypeData::Named {
                package: None,
                name: FAILURE_TYPE_NAME.to_string(),
                underlying: error_iface,
            }, // 10 = ERROR
        ];
        debug_assert_eq!(types.len(), TypeId::PREDECLARED_COUNT as usize);
        TypePool { types }
    }

    /// Number of types in the pool, predeclared ones included.
    pub fn len(&self) -> usize {
        self.types.len()
    }

    /// Always false: predeclared types are present from construction.
    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Look up a type. Unknown ids read as [`TypeData::Invalid`].
    #[inline]
    pub fn get(&self, id: TypeId) -> &TypeData {
        self.types.get(id.0 as usize).unwrap_or(&INVALID_DATA)
    }

    /// Append a type and return its id.
    pub fn alloc(&mut self, data: TypeData) -> TypeId {
        let id = TypeId(u32::try_from(self.types.len()).unwrap_or(u32::MAX));
        self.types.push(data);
        id
    }

    /// Declare a defined type. Its underlying type starts out invalid so that
    /// recursive types can refer to it; complete it with [`Self::set_underlying`].
    pub fn named(&mut self, package: Option<&str>, name: &str) -> TypeId {
        self.alloc(TypeData::Named {
            package: package.map(str::to_string),
            name: name.to_string(),
            underlying: TypeId::INVALID,
        })
    }

    /// Complete a defined type. Returns `false` if `id` is not a defined type.
    pub fn set_underlying(&mut self, id: TypeId, ty: TypeId) -> bool {
        match self.types.get_mut(id.0 as usize) {
            Some(TypeData::Named { underlying, .. }) => {
                *underlying = ty;
                true
            }
            _ => false,
        }
    }

    pub fn basic(&mut self, kind: BasicKind) -> TypeId {
        self.alloc(TypeData::Basic(kind))
    }

    pub fn pointer(&mut self, elem: TypeId) -> TypeId {
        self.alloc(TypeData::Pointer(elem))
    }

    pub fn slice(&mut self, elem: TypeId) -> TypeId {
        self.alloc(TypeData::Slice(elem))
    }

    pub fn map(&mut self, key: TypeId, value: TypeId) -> TypeId {
        self.alloc(TypeData::Map { key, value })
    }

    pub fn tuple(&mut self, elems: Vec<TypeId>) -> TypeId {
        if elems.is_empty() {
            return TypeId::EMPTY_TUPLE;
        }
        self.alloc(TypeData::Tuple(elems))
    }

    pub fn structure(&mut self, fields: Vec<Field>) -> TypeId {
        self.alloc(TypeData::Struct(fields))
    }

    pub fn interface(&mut self, methods: Vec<Method>, embeddeds: Vec<TypeId>) -> TypeId {
        self.alloc(TypeData::Interface(InterfaceType { methods, embeddeds }))
    }

    /// A signature. `params` and `results` are wrapped in tuples.
    pub fn signature(&mut self, params: Vec<TypeId>, results: Vec<TypeId>) -> TypeId {
        let params = self.tuple(params);
        let results = self.tuple(results);
        self.alloc(TypeData::Signature {
            params,
            results,
            variadic: false,
        })
    }

    /// Underlying type of a defined type; other types are their own underlying type.
    pub fn underlying(&self, id: TypeId) -> TypeId {
        match self.get(id) {
            TypeData::Named { underlying, .. } => *underlying,
            _ => id,
        }
    }

    /// Element type of a pointer; other types are returned unchanged.
    pub fn deref(&self, id: TypeId) -> TypeId {
        match self.get(id) {
            TypeData::Pointer(elem) => *elem,
            _ => id,
        }
    }

    /// Interface body of `id` after unwrapping a defined type.
    pub fn as_interface(&self, id: TypeId) -> Option<&InterfaceType> {
        match self.get(self.underlying(id)) {
            TypeData::Interface(iface) => Some(iface),
            _ => None,
        }
    }

    /// Struct fields of `id` after unwrapping a defined type.
    pub fn as_struct(&self, id: TypeId) -> Option<&[Field]> {
        match self.get(self.underlying(id)) {
            TypeData::Struct(fields) => Some(fields),
            _ => None,
        }
    }

    /// Identity check for the predeclared failure type: a defined type with no
    /// declaring package and the reserved name. Structurally similar types
    /// (custom error types, aliases with packages) never match.
    pub fn is_failure_type(&self, id: TypeId) -> bool {
        matches!(
            self.get(id),
            TypeData::Named { package: None, name, .. } if name == FAILURE_TYPE_NAME
        )
    }
}
