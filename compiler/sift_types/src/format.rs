//! Type strings.
//!
//! Renders types the way exclusion rules spell them: defined types are
//! qualified by their full package path, composite types use source syntax.
//!
//! ```text
//! *bytes.Buffer        pointer to defined type
//! *math/rand.Rand      package paths are not shortened
//! error                predeclared types are unqualified
//! interface{Write([]uint8) (int, error)}
//! ```

use std::fmt::Write;

use sift_ir::{TypeData, TypeId, TypePool};

/// Nesting depth after which rendering gives up; only malformed (cyclic,
/// unnamed) type graphs get this deep.
const MAX_DEPTH: u32 = 64;

/// Render a type as a qualified type string.
pub fn type_string(pool: &TypePool, id: TypeId) -> String {
    let mut out = String::new();
    write_type(pool, id, &mut out, 0);
    out
}

fn write_type(pool: &TypePool, id: TypeId, out: &mut String, depth: u32) {
    if depth > MAX_DEPTH {
        out.push_str("...");
        return;
    }
    let depth = depth + 1;
    match pool.get(id) {
        TypeData::Invalid => out.push_str("invalid type"),
        TypeData::Basic(kind) => out.push_str(kind.name()),
        TypeData::Named { package, name, .. } => {
            if let Some(package) = package {
                out.push_str(package);
                out.push('.');
            }
            out.push_str(name);
        }
        TypeData::Pointer(elem) => {
            out.push('*');
            write_type(pool, *elem, out, depth);
        }
        TypeData::Slice(elem) => {
            out.push_str("[]");
            write_type(pool, *elem, out, depth);
        }
        TypeData::Array { len, elem } => {
            let _ = write!(out, "[{len}]");
            write_type(pool, *elem, out, depth);
        }
        TypeData::Map { key, value } => {
            out.push_str("map[");
            write_type(pool, *key, out, depth);
            out.push(']');
            write_type(pool, *value, out, depth);
        }
        TypeData::Chan(elem) => {
            out.push_str("chan ");
            write_type(pool, *elem, out, depth);
        }
        TypeData::Struct(fields) => {
            out.push_str("struct{");
            for (i, field) in fields.iter().enumerate() {
                if i > 0 {
                    out.push_str("; ");
                }
                if !field.embedded {
                    out.push_str(&field.name);
                    out.push(' ');
                }
                write_type(pool, field.ty, out, depth);
            }
            out.push('}');
        }
        TypeData::Interface(iface) => {
            out.push_str("interface{");
            let mut first = true;
            for embedded in &iface.embeddeds {
                if !first {
                    out.push_str("; ");
                }
                first = false;
                write_type(pool, *embedded, out, depth);
            }
            for method in &iface.methods {
                if !first {
                    out.push_str("; ");
                }
                first = false;
                out.push_str(&method.name);
                write_signature(pool, method.signature, out, depth);
            }
            out.push('}');
        }
        TypeData::Tuple(elems) => write_tuple(pool, elems, out, depth),
        TypeData::Signature { .. } => {
            out.push_str("func");
            write_signature(pool, id, out, depth);
        }
    }
}

fn write_tuple(pool: &TypePool, elems: &[TypeId], out: &mut String, depth: u32) {
    out.push('(');
    for (i, elem) in elems.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_type(pool, *elem, out, depth);
    }
    out.push(')');
}

/// Parameters and results of a signature, without the `func` keyword.
fn write_signature(pool: &TypePool, id: TypeId, out: &mut String, depth: u32) {
    let TypeData::Signature {
        params, results, ..
    } = pool.get(id)
    else {
        out.push_str("()");
        return;
    };
    match pool.get(*params) {
        TypeData::Tuple(elems) => write_tuple(pool, elems, out, depth),
        _ => out.push_str("()"),
    }
    match pool.get(*results) {
        TypeData::Tuple(elems) if elems.is_empty() => {}
        TypeData::Tuple(elems) if elems.len() == 1 => {
            out.push(' ');
            write_type(pool, elems[0], out, depth);
        }
        TypeData::Tuple(elems) => {
            out.push(' ');
            write_tuple(pool, elems, out, depth);
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests;
