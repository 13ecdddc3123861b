//! Todo operations over the `todos` collection, run inside a caller-supplied
//! transaction.

use redb::ReadableTable;
use tracing::debug;

use crate::{
    error::StoreError,
    store::{decode_key, encode_key, ReadTx, WriteTx, TODOS_COLLECTION},
    types::{Todo, TodoInput},
};

/// Every todo in ascending id order. A single undecodable record fails the
/// whole listing.
pub fn list_all(tx: &ReadTx) -> Result<Vec<Todo>, StoreError> {
    let table = tx.todos()?;
    let mut todos = Vec::new();
    for entry in table.iter()? {
        let (key, value) = entry?;
        let id = decode_key(key.value())?;
        todos.push(decode(id, value.value())?);
    }
    Ok(todos)
}

pub fn get(tx: &ReadTx, id: u64) -> Result<Option<Todo>, StoreError> {
    let table = tx.todos()?;
    let key = encode_key(id);
    let todo = match table.get(key.as_slice())? {
        Some(value) => Some(decode(id, value.value())?),
        None => None,
    };
    Ok(todo)
}

/// Persist a new todo under the next sequence value.
pub fn create(tx: &WriteTx, input: TodoInput) -> Result<Todo, StoreError> {
    let id = tx.next_sequence(TODOS_COLLECTION)?;
    let todo = input.into_todo(id);
    put(tx, &todo)?;
    debug!(id, "todo created");
    Ok(todo)
}

/// Write `input` at `id` whether or not a record exists there.
pub fn upsert(tx: &WriteTx, id: u64, input: TodoInput) -> Result<Todo, StoreError> {
    let todo = input.into_todo(id);
    put(tx, &todo)?;
    debug!(id, "todo written");
    Ok(todo)
}

/// Remove `id`. Absent ids are not an error.
pub fn delete(tx: &WriteTx, id: u64) -> Result<(), StoreError> {
    let key = encode_key(id);
    let removed = tx.todos()?.remove(key.as_slice())?.is_some();
    debug!(id, removed, "todo deleted");
    Ok(())
}

fn put(tx: &WriteTx, todo: &Todo) -> Result<(), StoreError> {
    let bytes = serde_json::to_vec(todo).map_err(|source| StoreError::Encode {
        id: todo.id,
        source,
    })?;
    let key = encode_key(todo.id);
    tx.todos()?.insert(key.as_slice(), bytes.as_slice())?;
    Ok(())
}

fn decode(id: u64, bytes: &[u8]) -> Result<Todo, StoreError> {
    serde_json::from_slice(bytes).map_err(|source| StoreError::Decode { id, source })
}
