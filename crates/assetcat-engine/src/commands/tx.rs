//! Transaction orchestration
//!
//! Every public operation runs inside exactly one transaction opened here.
//! The closure's `Ok` commits; any `Err` drops the transaction, which rolls
//! it back. This module also owns lifecycle logging:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers use only `tracing::debug!` for internal details.

#![allow(clippy::result_large_err)]

use std::time::Instant;

use assetcat_core::errors::{ExError, ExErrorKind};
use assetcat_core::{log_op_end, log_op_error, log_op_start};
use assetcat_core_types::RequestId;
use assetcat_store::errors::{from_rusqlite, Result};
use rusqlite::{Connection, Transaction, TransactionBehavior};

/// Message returned to callers in place of driver detail
pub const STORE_FAILURE_MESSAGE: &str = "store operation failed";

/// Run a mutating operation under an IMMEDIATE transaction
pub(crate) fn write<T>(
    conn: &mut Connection,
    op: &'static str,
    f: impl FnOnce(&Transaction<'_>) -> Result<T>,
) -> Result<T> {
    run(conn, op, TransactionBehavior::Immediate, f)
}

/// Run a read-only operation under a DEFERRED transaction
pub(crate) fn read<T>(
    conn: &mut Connection,
    op: &'static str,
    f: impl FnOnce(&Transaction<'_>) -> Result<T>,
) -> Result<T> {
    run(conn, op, TransactionBehavior::Deferred, f)
}

fn run<T>(
    conn: &mut Connection,
    op: &'static str,
    behavior: TransactionBehavior,
    f: impl FnOnce(&Transaction<'_>) -> Result<T>,
) -> Result<T> {
    let request_id = RequestId::new();
    log_op_start!(op, request_id = request_id.as_str());
    let start = Instant::now();

    let result = conn
        .transaction_with_behavior(behavior)
        .map_err(from_rusqlite)
        .and_then(|tx| {
            let value = f(&tx)?;
            tx.commit().map_err(from_rusqlite)?;
            Ok(value)
        });

    let duration_ms = millis_since(start);
    match result {
        Ok(value) => {
            log_op_end!(op, duration_ms = duration_ms, request_id = request_id.as_str());
            Ok(value)
        }
        Err(err) => {
            let err = sanitize(op, err).with_request_id(request_id.clone());
            log_op_error!(
                op,
                &err,
                duration_ms = duration_ms,
                request_id = request_id.as_str()
            );
            Err(err)
        }
    }
}

/// Whole milliseconds since `start`, saturating at `u64::MAX`
fn millis_since(start: Instant) -> u64 {
    u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX)
}

/// Attach the operation name; replace store failure detail after logging it
fn sanitize(op: &'static str, err: ExError) -> ExError {
    if err.kind() != ExErrorKind::StoreFailure {
        return err.with_op(op);
    }
    tracing::error!(op, detail = err.message(), "store failure, transaction rolled back");
    ExError::new(ExErrorKind::StoreFailure)
        .with_op(op)
        .with_message(STORE_FAILURE_MESSAGE)
}
