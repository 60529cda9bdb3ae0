use super::*;
use pretty_assertions::assert_eq;
use sift_ir::{BasicKind, Method};

#[test]
fn test_predeclared_error_is_unqualified() {
    let pool = TypePool::new();
    assert_eq!(type_string(&pool, TypeId::ERROR), "error");
}

#[test]
fn test_pointer_to_named_uses_full_path() {
    let mut pool = TypePool::new();
    let rand = pool.named(Some("math/rand"), "Rand");
    let ptr = pool.pointer(rand);
    assert_eq!(type_string(&pool, ptr), "*math/rand.Rand");
}

#[test]
fn test_interface_literal() {
    let mut pool = TypePool::new();
    let byte = pool.basic(BasicKind::Uint8);
    let bytes = pool.slice(byte);
    let sig = pool.signature(vec![bytes], vec![TypeId::INT, TypeId::ERROR]);
    let iface = pool.interface(
        vec![Method {
            name: "Write".to_string(),
            package: None,
            signature: sig,
        }],
        Vec::new(),
    );
    assert_eq!(
        type_string(&pool, iface),
        "interface{Write([]uint8) (int, error)}"
    );
    assert_eq!(type_string(&pool, TypeId::EMPTY_INTERFACE), "interface{}");
}

#[test]
fn test_map_and_tuple() {
    let mut pool = TypePool::new();
    let m = pool.map(TypeId::STRING, TypeId::INT);
    let t = pool.tuple(vec![m, TypeId::ERROR]);
    assert_eq!(type_string(&pool, t), "(map[string]int, error)");
}

#[test]
fn test_cyclic_unnamed_type_terminates() {
    let mut pool = TypePool::new();
    // Slot that will point at itself once allocated.
    let id = pool.alloc(TypeData::Pointer(TypeId::from_raw(pool.len() as u32)));
    let rendered = type_string(&pool, id);
    assert!(rendered.ends_with("..."));
}
