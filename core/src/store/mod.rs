//! Immutable, normalized collection of spectrum allocation records.

pub mod builder;
pub mod handle;
pub mod record;
pub mod row;

pub use builder::{build_store, build_store_with, BuildReport};
pub use handle::StoreHandle;
pub use record::{DeviceRole, Record, RecordId};
pub use row::{ColumnMapping, RawRow, RawValue};

/// Records in insertion order. There is no mutation API; replacing the data
/// means building a new store and swapping it through [`StoreHandle`].
#[derive(Debug, Clone, Default)]
pub struct RecordStore {
    records: Vec<Record>,
}

impl RecordStore {
    pub(crate) fn from_records(records: Vec<Record>) -> Self {
        Self { records }
    }

    pub fn all(&self) -> &[Record] {
        &self.records
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Record> {
        self.records.iter()
    }

    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.get(id.0)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl<'a> IntoIterator for &'a RecordStore {
    type Item = &'a Record;
    type IntoIter = std::slice::Iter<'a, Record>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
