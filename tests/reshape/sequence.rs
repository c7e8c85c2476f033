//! Integration tests for record sequences and the grouping engine.

use regroup::reshape::{
    Atom, Column, DeepMap, ErrorKind, Key, Record, RecordSeq, Value, atoms, cols, record,
};

fn calendar() -> RecordSeq {
    [
        record!["a", "b", "c", 1],
        record!["a", "b", "c", 2],
        record!["a", "b", "c", 3],
        record!["r", "b", "c", 1],
        record!["r", "b", "c", 2],
        record!["r", "b", "c", 3],
    ]
    .into_iter()
    .collect()
}

#[test]
fn project_pair_of_columns() {
    let projected = calendar().project(&cols![0, 2]).unwrap();
    let expected: Vec<Record> = vec![
        record!["a", "c"],
        record!["a", "c"],
        record!["a", "c"],
        record!["r", "c"],
        record!["r", "c"],
        record!["r", "c"],
    ];
    assert_eq!(projected.to_vec(), expected);
}

#[test]
fn group_by_result_column() {
    let grouped = calendar().group_by(Some(&cols![3]), None, true).unwrap();

    let expected: DeepMap = [
        (
            Key::Tuple(atoms!["a", "b", "c"]),
            Value::Seq([record![1], record![2], record![3]].into_iter().collect()),
        ),
        (
            Key::Tuple(atoms!["r", "b", "c"]),
            Value::Seq([record![1], record![2], record![3]].into_iter().collect()),
        ),
    ]
    .into_iter()
    .collect();
    assert_eq!(grouped, expected);
}

#[test]
fn group_by_after_projection() {
    let grouped = calendar()
        .project(&cols![0, 1])
        .unwrap()
        .group_by(Some(&cols![1]), None, true)
        .unwrap();

    let bs: RecordSeq = [record!["b"], record!["b"], record!["b"]].into_iter().collect();
    let expected: DeepMap = [
        (Key::from("a"), Value::Seq(bs.clone())),
        (Key::from("r"), Value::Seq(bs)),
    ]
    .into_iter()
    .collect();
    assert_eq!(grouped, expected);
}

#[test]
fn group_by_without_list_keeps_last() {
    let grouped = calendar().group_by(Some(&cols![3]), None, false).unwrap();
    let expected: DeepMap = [
        (Key::Tuple(atoms!["a", "b", "c"]), Value::from(3)),
        (Key::Tuple(atoms!["r", "b", "c"]), Value::from(3)),
    ]
    .into_iter()
    .collect();
    assert_eq!(grouped, expected);
}

#[test]
fn group_by_multi_result_columns() {
    let grouped = calendar()
        .group_by(Some(&cols![2, 3]), Some(&cols![0]), false)
        .unwrap();
    assert_eq!(
        grouped.get(&Key::from("a")),
        Some(&Value::Tuple(atoms!["c", 3]))
    );
}

#[test]
fn group_by_negative_result_column() {
    // -1 resolves to the last column, so the complement is columns 0..=2.
    let grouped = calendar().group_by(Some(&cols![-1]), None, true).unwrap();
    assert!(grouped.contains_key(&Key::Tuple(atoms!["a", "b", "c"])));
}

#[test]
fn filter_by_predicate() {
    let filtered = calendar().filter_records(|rec| {
        rec.project_one(&Column::Pos(0)).unwrap() <= Atom::from("a")
    });
    assert_eq!(
        filtered.to_vec(),
        vec![
            record!["a", "b", "c", 1],
            record!["a", "b", "c", 2],
            record!["a", "b", "c", 3]
        ]
    );
}

#[test]
fn map_indexed_sees_positions() {
    let seq: RecordSeq = [record!["a"], record!["b"]].into_iter().collect();
    let numbered = seq.map_indexed(|i, rec| {
        let mut fields = rec.positional_fields().unwrap().to_vec();
        fields.push(Atom::Int(i64::try_from(i).unwrap()));
        Record::Positional(fields)
    });
    assert_eq!(numbered.to_vec(), vec![record!["a", 0], record!["b", 1]]);
}

#[test]
fn unique_on_projection() {
    let unique = calendar().project(&cols![0, 1]).unwrap().unique();
    assert_eq!(unique.to_vec(), vec![record!["a", "b"], record!["r", "b"]]);
}

#[test]
fn unique_on_single_column() {
    let unique = calendar().project(&cols![3]).unwrap().unique();
    assert_eq!(unique.to_vec(), vec![record![1], record![2], record![3]]);
}

#[test]
fn start_finish_collapse() {
    let runs = calendar()
        .project(&cols![0, 3])
        .unwrap()
        .segment_runs(
            |cur, prev, pp| {
                let (cur, prev) = (
                    cur.positional_fields().unwrap(),
                    prev.positional_fields().unwrap(),
                );
                cur[0] != prev[0]
                    || cur[pp].as_int().unwrap() - 1 != prev[pp].as_int().unwrap()
            },
            1,
            true,
        )
        .unwrap();
    assert_eq!(runs.to_vec(), vec![record!["a", 1, 3], record!["r", 1, 3]]);
}

#[test]
fn segment_runs_custom_join() {
    let seq: RecordSeq = [record!["a", 1], record!["a", 2], record!["a", 4]]
        .into_iter()
        .collect();
    let runs = seq
        .segment_runs_with(
            |cur, prev, pp| {
                let (cur, prev) = (
                    cur.positional_fields().unwrap(),
                    prev.positional_fields().unwrap(),
                );
                cur[0] != prev[0]
                    || cur[pp].as_int().unwrap() - 1 != prev[pp].as_int().unwrap()
            },
            1,
            false,
            |run| {
                Ok(record![
                    run.first().unwrap().positional_fields()?[0].clone(),
                    i64::try_from(run.len()).unwrap()
                ])
            },
        )
        .unwrap();
    assert_eq!(runs.to_vec(), vec![record!["a", 2], record!["a", 1]]);
}

#[test]
fn push_row_builds_positional_records() {
    let mut seq = RecordSeq::new();
    seq.push_row(atoms!["b", "t", "3", 5]);
    assert_eq!(seq.to_vec(), vec![record!["b", "t", "3", 5]]);
}

#[test]
fn reshape_to_records_then_group() {
    let keyed = calendar()
        .reshape_to_records(&atoms!["group", "x", "y", "period"])
        .unwrap();
    let grouped = keyed
        .group_by(Some(&cols!["period"]), Some(&cols!["group"]), true)
        .unwrap();
    let Some(Value::Seq(periods)) = grouped.get(&Key::from("a")) else {
        panic!("expected grouped list");
    };
    assert_eq!(periods.to_vec(), vec![record![1], record![2], record![3]]);
}

#[test]
fn mixed_shape_projection_fails() {
    let seq: RecordSeq = [
        record!["a", 1],
        Record::keyed([(Atom::from("a"), Atom::Int(1))]),
    ]
    .into_iter()
    .collect();
    let err = seq.project(&cols![0]).unwrap_err();
    assert!(matches!(err.kind, ErrorKind::TypeMismatch { .. }));
}
