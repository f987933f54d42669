//! Record normalization: the boundary between the untyped journal store and
//! the typed engine.

use core_types::{RawTradeRecord, TradeRecord};
use serde::Serialize;

/// The outcome of canonicalizing a batch of raw records.
///
/// Records that fail shape validation (unparsable date, or a present but
/// unparsable time) are excluded and counted, never silently folded into the
/// aggregates: a partial result that is correct for the valid subset beats
/// aborting the whole analytics pass.
#[derive(Debug, Clone, Default, Serialize)]
pub struct NormalizedBatch {
    pub records: Vec<TradeRecord>,
    /// How many input records were rejected by shape validation.
    pub skipped: usize,
}

/// Canonicalizes every raw record, preserving input order.
///
/// Numeric coercion (missing monetary fields to `0`, missing contract counts
/// to `1`) and strategy-sentinel collapse happen per record in
/// [`TradeRecord::from_raw`]; this function only adds the batch policy of
/// skip-and-count.
pub fn normalize_records(raw: &[RawTradeRecord]) -> NormalizedBatch {
    let mut batch = NormalizedBatch::default();

    for record in raw {
        match TradeRecord::from_raw(record) {
            Ok(record) => batch.records.push(record),
            Err(reason) => {
                tracing::debug!(%reason, "skipping malformed trade record");
                batch.skipped += 1;
            }
        }
    }

    if batch.skipped > 0 {
        tracing::warn!(
            skipped = batch.skipped,
            kept = batch.records.len(),
            "some trade records failed shape validation and were excluded"
        );
    }

    batch
}
