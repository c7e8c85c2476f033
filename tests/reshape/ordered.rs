//! Integration tests for indexed sequences over richer element types.

use regroup::reshape::{Atom, ErrorKind, IndexedSeq, Record, record};

fn tuples() -> IndexedSeq<Record> {
    IndexedSeq::new([
        record!["a", "b", "c", 1],
        record!["a", "b", "c", 2],
        record!["a", "b", "c", 3],
        record!["r", "b", "c", 1],
        record!["r", "b", "c", 2],
        record!["r", "b", "c", 3],
    ])
    .unwrap()
}

#[test]
fn records_as_elements() {
    let seq = tuples();
    assert_eq!(seq.get(1), Some(&record!["a", "b", "c", 2]));
    assert_eq!(seq.position_of(&record!["r", "b", "c", 3]).unwrap(), 5);
}

#[test]
fn duplicate_records_rejected() {
    let err = IndexedSeq::new([record!["a", 1], record!["a", 1]]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::DuplicateElement { .. }));
}

#[test]
fn date_navigation() {
    let dates = IndexedSeq::new((1..10).map(|i| format!("2019-0{i}"))).unwrap();
    assert_eq!(dates.next(&"2019-02".to_string(), 1).unwrap(), "2019-03");
    assert_eq!(dates.prev(&"2019-02".to_string(), 1).unwrap(), "2019-01");
    assert_eq!(dates.distance(&"2019-01".to_string(), &"2019-09".to_string()).unwrap(), 8);
}

#[test]
fn delete_keeps_bijection() {
    let mut dates = IndexedSeq::new((1..10).map(|i| format!("2019-0{i}"))).unwrap();
    dates.delete(3).unwrap();

    assert_eq!(dates.len(), 8);
    for i in 0..dates.len() {
        let element = dates.get(i).unwrap().clone();
        assert_eq!(dates.position_of(&element).unwrap(), i);
    }
    // Order preserved around the hole
    assert_eq!(dates.get(2), Some(&"2019-03".to_string()));
    assert_eq!(dates.get(3), Some(&"2019-05".to_string()));
}

#[test]
fn between_over_atoms() {
    let seq = IndexedSeq::new((1..=5).map(Atom::Int)).unwrap();
    assert_eq!(
        seq.between(&Atom::Int(2), &Atom::Int(4)).unwrap(),
        vec![Atom::Int(2), Atom::Int(3), Atom::Int(4)]
    );
}

#[test]
fn set_then_navigate() {
    let mut dates = IndexedSeq::new((1..10).map(|i| format!("2019-0{i}"))).unwrap();
    dates.set(0, "2019-00".to_string()).unwrap();
    assert_eq!(dates.prev(&"2019-02".to_string(), 1).unwrap(), "2019-00");
}
