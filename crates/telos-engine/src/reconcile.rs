//! Remainder reconciliation
//!
//! Independently rounded integer parts rarely sum to the target. The
//! convention here is to compute every part but one, then give the designated
//! bucket whatever is left so the exact total holds.

use crate::error::ReconcileError;

/// Remainder the designated bucket takes so that `computed` plus the
/// remainder equals `total`
///
/// # Errors
/// Returns [`ReconcileError::Overflow`] when the computed parts already
/// exceed `total`. The remainder is never clamped to zero.
pub fn reconcile_to_total(computed: &[u32], total: u32) -> Result<u32, ReconcileError> {
    let sum: u32 = computed.iter().sum();
    total
        .checked_sub(sum)
        .ok_or(ReconcileError::Overflow { computed: sum, total })
}

/// Percentages variant of [`reconcile_to_total`] with a target of 100
///
/// # Errors
/// Returns [`ReconcileError::Overflow`] when `computed` sums past 100.
#[inline]
pub fn remainder_of_hundred(computed: &[u32]) -> Result<u32, ReconcileError> {
    reconcile_to_total(computed, 100)
}
