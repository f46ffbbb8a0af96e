// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Pure monthly aggregation and derived-metrics engine. Every function here
//! takes an immutable snapshot of records/cards and returns a fresh value;
//! there is no shared state and no I/O.

pub mod aggregate;
pub mod amortization;
pub mod breakdown;
pub mod classify;
pub mod project;
pub mod series;
pub mod trend;

use rust_decimal::Decimal;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    /// Fatal to a single EMI projection; callers fall back to the degraded
    /// default instead of aborting the whole pass.
    #[error("invalid loan parameters: principal {principal}, tenure {tenure_months} months")]
    InvalidLoanParameters {
        principal: Decimal,
        tenure_months: u32,
    },
    #[error("malformed detail payload on record {record_id}: {reason}")]
    MalformedDetailPayload { record_id: i64, reason: String },
    #[error("unparseable date '{raw}' on record {record_id}")]
    UnparseableDate { record_id: i64, raw: String },
}
