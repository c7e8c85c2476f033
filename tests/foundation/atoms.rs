//! Integration tests for the scalar atom type.

use regroup::foundation::{Atom, ErrorKind};

#[test]
fn atoms_from_native_types() {
    assert_eq!(Atom::from(true), Atom::Bool(true));
    assert_eq!(Atom::from(42i64), Atom::Int(42));
    assert_eq!(Atom::from(42i32), Atom::Int(42));
    assert_eq!(Atom::from(2.5), Atom::Float(2.5));
    assert_eq!(Atom::from("x"), Atom::Str("x".into()));
    assert_eq!(Atom::from(String::from("x")), Atom::Str("x".into()));
}

#[test]
fn float_bit_equality() {
    let nan = Atom::Float(f64::NAN);
    assert_eq!(nan, nan);
    assert_ne!(Atom::Float(0.0), Atom::Float(-0.0));
}

#[test]
fn cross_type_inequality() {
    assert_ne!(Atom::Int(1), Atom::Float(1.0));
    assert_ne!(Atom::Bool(false), Atom::Int(0));
    assert_ne!(Atom::Nil, Atom::Bool(false));
}

#[test]
fn arithmetic_promotes_to_float() {
    assert_eq!(
        Atom::Int(3).try_mul(&Atom::Float(0.5)).unwrap(),
        Atom::Float(1.5)
    );
    assert_eq!(Atom::Int(3).try_mul(&Atom::Int(2)).unwrap(), Atom::Int(6));
}

#[test]
fn string_concatenation() {
    assert_eq!(
        Atom::from("foo").try_add(&Atom::from("bar")).unwrap(),
        Atom::from("foobar")
    );
}

#[test]
fn mixed_type_arithmetic_fails() {
    let err = Atom::from("a").try_mul(&Atom::Int(2)).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
    assert_eq!(err.op, Some("multiply"));
}

#[test]
fn ordering_sorts_within_and_across_types() {
    let mut atoms = vec![
        Atom::from("b"),
        Atom::Int(2),
        Atom::from("a"),
        Atom::Nil,
        Atom::Int(1),
    ];
    atoms.sort();
    assert_eq!(
        atoms,
        vec![
            Atom::Nil,
            Atom::Int(1),
            Atom::Int(2),
            Atom::from("a"),
            Atom::from("b"),
        ]
    );
}

#[test]
fn display_formats() {
    assert_eq!(format!("{}", Atom::from("x")), "x");
    assert_eq!(format!("{}", Atom::Int(7)), "7");
    assert_eq!(format!("{}", Atom::Nil), "nil");
    // Debug quotes strings
    assert_eq!(format!("{:?}", Atom::from("x")), "\"x\"");
}
