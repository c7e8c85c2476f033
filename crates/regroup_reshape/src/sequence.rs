//! Ordered sequences of records.

use std::fmt;
use std::iter::FromIterator;

use regroup_foundation::{Atom, Error, Key, Result, RgMap, RgSet, RgVec};

use crate::mapping::DeepMap;
use crate::record::{Column, Record};
use crate::value::Value;

/// An ordered sequence of records.
///
/// Order is significant and duplicates are allowed. Records are owned by
/// value; cloning the sequence is O(1) thanks to structural sharing.
/// Transformation methods return new sequences, `push`/`extend` mutate in
/// place.
#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct RecordSeq(RgVec<Record>);

impl RecordSeq {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self(RgVec::new())
    }

    /// Returns the number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Gets a record by position.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Record> {
        self.0.get(index)
    }

    /// Returns the first record.
    #[must_use]
    pub fn first(&self) -> Option<&Record> {
        self.0.first()
    }

    /// Returns the last record.
    #[must_use]
    pub fn last(&self) -> Option<&Record> {
        self.0.last()
    }

    /// Appends a record.
    pub fn push(&mut self, record: Record) {
        self.0.push(record);
    }

    /// Appends a positional record built from the given fields.
    pub fn push_row<I>(&mut self, fields: I)
    where
        I: IntoIterator<Item = Atom>,
    {
        self.push(Record::Positional(fields.into_iter().collect()));
    }

    /// Returns an iterator over the records.
    pub fn iter(&self) -> impl Iterator<Item = &Record> {
        self.0.iter()
    }

    /// Collects the records into a plain vector.
    #[must_use]
    pub fn to_vec(&self) -> Vec<Record> {
        self.iter().cloned().collect()
    }

    /// Concatenates a sequence of sequences into one, preserving order.
    ///
    /// This is the one-level flattening of nested sequences: the nesting is
    /// held by the caller's iterable, since records themselves are flat.
    pub fn concat<I>(seqs: I) -> Self
    where
        I: IntoIterator<Item = Self>,
    {
        let mut out = Self::new();
        for seq in seqs {
            out.0.extend(seq.0);
        }
        out
    }

    /// Returns a new sequence keeping only records the predicate accepts.
    /// Order is preserved.
    #[must_use]
    pub fn filter_records(&self, predicate: impl Fn(&Record) -> bool) -> Self {
        self.iter().filter(|r| predicate(r)).cloned().collect()
    }

    /// Returns a new sequence with the function applied to every record.
    #[must_use]
    pub fn map_records(&self, f: impl Fn(&Record) -> Record) -> Self {
        self.iter().map(f).collect()
    }

    /// Returns a new sequence with the function applied to every record and
    /// its zero-based position.
    #[must_use]
    pub fn map_indexed(&self, f: impl Fn(usize, &Record) -> Record) -> Self {
        self.iter().enumerate().map(|(i, r)| f(i, r)).collect()
    }

    /// Projects each record onto the given columns, in column order.
    ///
    /// The result holds positional records of arity `columns.len()`;
    /// projecting a single column yields arity-1 records. Negative
    /// positions index from the end of positional records.
    pub fn project(&self, columns: &[Column]) -> Result<Self> {
        self.iter()
            .map(|rec| rec.project(columns).map(Record::Positional))
            .collect()
    }

    /// Groups records into a mapping — the record-to-mapping reshaping
    /// engine.
    ///
    /// The index key of each record is the projection of `index_columns`
    /// (one column gives an atom key, several give a tuple key); the value
    /// is the projection of `result_columns`. When `index_columns` is
    /// omitted it defaults to all columns not in `result_columns`, which
    /// only positional records can express; keyed records without explicit
    /// index columns are an error. When `result_columns` is `None` the
    /// whole record keys itself (identity keying, positional records only).
    ///
    /// With `as_list`, values sharing an index key collect into a sequence
    /// in encounter order; without it the last record for a key silently
    /// wins. An empty input produces an empty mapping regardless of the
    /// other arguments.
    pub fn group_by(
        &self,
        result_columns: Option<&[Column]>,
        index_columns: Option<&[Column]>,
        as_list: bool,
    ) -> Result<DeepMap> {
        if self.is_empty() {
            return Ok(DeepMap::new());
        }
        let Some(result_columns) = result_columns else {
            if index_columns.is_some() {
                return Err(Error::validation(
                    "index columns require result columns",
                ));
            }
            return self.group_identity();
        };

        let index_columns = match index_columns {
            Some(columns) => columns.to_vec(),
            None => self.complement_columns(result_columns)?,
        };

        let mut out = DeepMap::new();
        for rec in self.iter() {
            let key = Key::from_parts(rec.project(&index_columns)?);
            let content = rec.project(result_columns)?;
            if as_list {
                out.push_grouped(key, Record::Positional(content));
            } else {
                let value = if content.len() == 1 {
                    Value::Leaf(content.into_iter().next().expect("one part"))
                } else {
                    Value::Tuple(content)
                };
                out.insert(key, value);
            }
        }
        Ok(out)
    }

    /// Maps each record to itself, for `group_by` with no result columns.
    fn group_identity(&self) -> Result<DeepMap> {
        let mut out = DeepMap::new();
        for rec in self.iter() {
            let fields = rec.positional_fields().map_err(|e| e.with_op("group_by"))?;
            let value = if fields.len() == 1 {
                Value::Leaf(fields[0].clone())
            } else {
                Value::Tuple(fields.to_vec())
            };
            out.insert(Key::from_parts(fields.to_vec()), value);
        }
        Ok(out)
    }

    /// All positions of the first record not selected by `result_columns`.
    #[allow(clippy::cast_possible_wrap)]
    fn complement_columns(&self, result_columns: &[Column]) -> Result<Vec<Column>> {
        let first = self.first().expect("checked non-empty");
        let fields = first
            .positional_fields()
            .map_err(|_| Error::ambiguous_index())?;
        let arity = fields.len();
        let mut taken = vec![false; arity];
        for column in result_columns {
            taken[column.resolve(arity)?] = true;
        }
        Ok((0..arity)
            .filter(|i| !taken[*i])
            .map(|i| Column::Pos(i as isize))
            .collect())
    }

    /// Zips each positional record with `field_names` to build keyed
    /// records — the inverse of projecting a tuple sequence out of
    /// mapping-shaped records.
    pub fn reshape_to_records(&self, field_names: &[Atom]) -> Result<Self> {
        self.iter()
            .map(|rec| {
                let fields = rec.positional_fields()?;
                if fields.len() != field_names.len() {
                    return Err(Error::shape_mismatch(field_names.len(), fields.len()));
                }
                let keyed: RgMap<Atom, Atom> = field_names
                    .iter()
                    .cloned()
                    .zip(fields.iter().cloned())
                    .collect();
                Ok(Record::Keyed(keyed))
            })
            .collect()
    }

    /// Removes duplicate records.
    ///
    /// Hash-set dedup keeping the first occurrence of each record, so the
    /// relative order of survivors is preserved.
    #[must_use]
    pub fn unique(&self) -> Self {
        let mut seen = RgSet::new();
        self.iter()
            .filter(|rec| seen.insert((*rec).clone()))
            .cloned()
            .collect()
    }

    /// Records of self that do not occur in `other`.
    ///
    /// Self order is preserved and the result is deduplicated.
    #[must_use]
    pub fn set_difference(&self, other: &Self) -> Self {
        let exclude: RgSet<Record> = other.iter().cloned().collect();
        self.unique()
            .filter_records(|rec| !exclude.contains(rec))
    }

    /// Records of self that also occur in `other`.
    ///
    /// Self order is preserved and the result is deduplicated.
    #[must_use]
    pub fn intersect(&self, other: &Self) -> Self {
        let keep: RgSet<Record> = other.iter().cloned().collect();
        self.unique().filter_records(|rec| keep.contains(rec))
    }

    /// Returns a new sequence with the records sorted.
    #[must_use]
    pub fn sorted(&self) -> Self {
        let mut records = self.to_vec();
        records.sort();
        records.into_iter().collect()
    }

    /// Collapses consecutive records into start–finish runs with the
    /// default join: the first record's fields plus the last record's
    /// period field.
    ///
    /// See [`RecordSeq::segment_runs_with`].
    pub fn segment_runs(
        &self,
        is_boundary: impl Fn(&Record, &Record, usize) -> bool,
        period_index: usize,
        sort: bool,
    ) -> Result<Self> {
        self.segment_runs_with(is_boundary, period_index, sort, |run| {
            let first = run.first().expect("runs are non-empty");
            let last = run.last().expect("runs are non-empty");
            let mut fields = first.positional_fields()?.to_vec();
            fields.push(last.positional_fields()?[period_index].clone());
            Ok(Record::Positional(fields))
        })
    }

    /// Partitions the sequence into maximal runs and reduces each run to
    /// one record.
    ///
    /// A run starts at the first record and wherever
    /// `is_boundary(current, previous, period_index)` is true. With `sort`,
    /// records are first ordered by (first field, period field) — the
    /// "group key, then period" ordering a per-period calendar needs.
    /// Positional records only.
    pub fn segment_runs_with(
        &self,
        is_boundary: impl Fn(&Record, &Record, usize) -> bool,
        period_index: usize,
        sort: bool,
        join: impl Fn(&[Record]) -> Result<Record>,
    ) -> Result<Self> {
        let mut records = self.to_vec();
        for rec in &records {
            let fields = rec.positional_fields()?;
            if period_index >= fields.len() {
                #[allow(clippy::cast_possible_wrap)]
                return Err(
                    Error::out_of_range(period_index as i64, fields.len())
                        .with_op("segment_runs"),
                );
            }
        }
        if sort {
            // Stable sort: equal keys keep encounter order.
            records.sort_by(|a, b| {
                let (a, b) = (sort_key(a, period_index), sort_key(b, period_index));
                a.cmp(&b)
            });
        }

        let mut runs: Vec<Vec<Record>> = Vec::new();
        for (i, rec) in records.iter().enumerate() {
            let starts_run = i == 0 || is_boundary(rec, &records[i - 1], period_index);
            if starts_run {
                runs.push(vec![rec.clone()]);
            } else {
                runs.last_mut().expect("first record opened a run").push(rec.clone());
            }
        }

        runs.iter().map(|run| join(run)).collect()
    }
}

fn sort_key(rec: &Record, period_index: usize) -> (Atom, Atom) {
    let fields = rec.positional_fields().expect("validated positional");
    (fields[0].clone(), fields[period_index].clone())
}

impl fmt::Debug for RecordSeq {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl FromIterator<Record> for RecordSeq {
    fn from_iter<I: IntoIterator<Item = Record>>(iter: I) -> Self {
        Self(RgVec::from_iter(iter))
    }
}

impl Extend<Record> for RecordSeq {
    fn extend<I: IntoIterator<Item = Record>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl From<Vec<Record>> for RecordSeq {
    fn from(records: Vec<Record>) -> Self {
        records.into_iter().collect()
    }
}

impl IntoIterator for RecordSeq {
    type Item = Record;
    type IntoIter = im::vector::ConsumingIter<Record>;

    fn into_iter(self) -> Self::IntoIter {
        let Self(inner) = self;
        inner.into_iter()
    }
}

impl<'a> IntoIterator for &'a RecordSeq {
    type Item = &'a Record;
    type IntoIter = im::vector::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        (&self.0).into_iter()
    }
}
