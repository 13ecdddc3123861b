//! Single-file embedded store backing the todo collection.
//!
//! # Design
//! A redb database with two tables. `todos` maps the big-endian 8-byte id to
//! the JSON-encoded record, so redb's byte-wise key order is ascending id
//! order. `sequences` holds one monotonic counter per collection name and is
//! only advanced inside write transactions.
//!
//! Work runs through closures: `read` hands out a snapshot, `write` hands
//! out the single writer and commits only when the closure returns `Ok`.
//! redb serializes writers and lets readers proceed against their snapshot,
//! so no locking happens here.

use std::{path::Path, sync::Arc};

use redb::{
    Database, ReadOnlyTable, ReadTransaction, ReadableTable, Table, TableDefinition,
    WriteTransaction,
};
use tracing::{info, warn};

use crate::error::StoreError;

/// Name of the only collection, used as its table name and sequence key.
pub const TODOS_COLLECTION: &str = "todos";

const TODOS: TableDefinition<&[u8], &[u8]> = TableDefinition::new(TODOS_COLLECTION);
const SEQUENCES: TableDefinition<&str, u64> = TableDefinition::new("sequences");

/// Encode an id as its record key.
pub fn encode_key(id: u64) -> [u8; 8] {
    id.to_be_bytes()
}

pub fn decode_key(key: &[u8]) -> Result<u64, StoreError> {
    let bytes: [u8; 8] = key
        .try_into()
        .map_err(|_| StoreError::MalformedKey(key.len()))?;
    Ok(u64::from_be_bytes(bytes))
}

/// Shared handle to the open store file.
///
/// Cloning is cheap; the file is released when `close` runs on the last
/// handle (or when the last clone drops).
#[derive(Clone)]
pub struct Store {
    db: Arc<Database>,
}

impl Store {
    /// Open the store at `path`, creating the file and its tables if absent.
    ///
    /// Fails with `StoreError::Open` if the file cannot be created or read,
    /// or if another process holds it.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref();
        let db = Database::create(path).map_err(|source| StoreError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let store = Self { db: Arc::new(db) };
        store.write(|tx| {
            tx.txn.open_table(TODOS)?;
            tx.txn.open_table(SEQUENCES)?;
            Ok(())
        })?;
        info!(path = %path.display(), "store opened");
        Ok(store)
    }

    /// Run `f` against a consistent snapshot.
    pub fn read<T>(
        &self,
        f: impl FnOnce(&ReadTx) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let tx = ReadTx {
            txn: self.db.begin_read()?,
        };
        f(&tx)
    }

    /// Run `f` as the exclusive writer. Commits when `f` succeeds; discards
    /// every write made by `f`, sequence advances included, when it fails.
    pub fn write<T>(
        &self,
        f: impl FnOnce(&WriteTx) -> Result<T, StoreError>,
    ) -> Result<T, StoreError> {
        let tx = WriteTx {
            txn: self.db.begin_write()?,
        };
        match f(&tx) {
            Ok(value) => {
                tx.txn.commit()?;
                Ok(value)
            }
            Err(err) => {
                if let Err(abort_err) = tx.txn.abort() {
                    warn!(error = %abort_err, "abort after failed write");
                }
                Err(err)
            }
        }
    }

    /// Release the file handle.
    pub fn close(self) {
        match Arc::try_unwrap(self.db) {
            Ok(db) => {
                drop(db);
                info!("store closed");
            }
            Err(_) => warn!("store still shared; file is released when the last handle drops"),
        }
    }
}

/// Read-only snapshot view.
pub struct ReadTx {
    txn: ReadTransaction,
}

impl ReadTx {
    pub(crate) fn todos(&self) -> Result<ReadOnlyTable<&'static [u8], &'static [u8]>, StoreError> {
        Ok(self.txn.open_table(TODOS)?)
    }
}

/// Exclusive read-write view.
pub struct WriteTx {
    txn: WriteTransaction,
}

impl WriteTx {
    pub(crate) fn todos(&self) -> Result<Table<'_, &'static [u8], &'static [u8]>, StoreError> {
        Ok(self.txn.open_table(TODOS)?)
    }

    /// Advance and return the counter for `collection`. The first value is 1.
    pub fn next_sequence(&self, collection: &str) -> Result<u64, StoreError> {
        let mut sequences = self.txn.open_table(SEQUENCES)?;
        let next = sequences
            .get(collection)?
            .map(|current| current.value())
            .unwrap_or(0)
            + 1;
        sequences.insert(collection, next)?;
        Ok(next)
    }
}
