//! Helpers for staying under SQLite's bound parameter limit.

/// Maximum number of bound parameters used by a single statement.
///
/// SQLite builds may be compiled with a limit as low as 999
/// (SQLITE_MAX_VARIABLE_NUMBER); 500 leaves room for the rest of a query.
pub const SQLITE_MAX_PARAMS_CHUNK: usize = 500;

/// Splits rows into batches whose multi-row INSERT stays under
/// [`SQLITE_MAX_PARAMS_CHUNK`] bound parameters.
///
/// `params_per_row` is the number of columns bound for each row.
pub fn chunk_rows_for_insert<T>(rows: &[T], params_per_row: usize) -> impl Iterator<Item = &[T]> {
    let rows_per_chunk = (SQLITE_MAX_PARAMS_CHUNK / params_per_row.max(1)).max(1);
    rows.chunks(rows_per_chunk)
}
