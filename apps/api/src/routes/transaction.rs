//! # Transaction Route
//!
//! `GET /transactions/{id}` - a recorded transaction with its per-line
//! and aggregate tax breakdown.

use axum::extract::{Path, State};
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;
use till_core::{LineTotals, TransactionTotals};

/// One breakdown line on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionLineDto {
    pub name: String,
    pub unit_price: i64,
    pub quantity: i64,
    pub tax_rate_percent: f64,
    pub tax_amount: i64,
    pub price_incl_tax: i64,
}

impl From<LineTotals> for TransactionLineDto {
    fn from(line: LineTotals) -> Self {
        TransactionLineDto {
            name: line.name,
            unit_price: line.unit_price_cents,
            quantity: line.quantity,
            tax_rate_percent: line.tax_rate.percentage(),
            tax_amount: line.tax_cents,
            price_incl_tax: line.total_cents,
        }
    }
}

/// `GET /transactions/{id}` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionResponse {
    pub transaction_id: i64,
    pub lines: Vec<TransactionLineDto>,
    pub total_excl_tax: i64,
    pub total_tax: i64,
    pub total_incl_tax: i64,
}

impl From<TransactionTotals> for TransactionResponse {
    fn from(totals: TransactionTotals) -> Self {
        TransactionResponse {
            transaction_id: totals.transaction_id,
            lines: totals
                .lines
                .into_iter()
                .map(TransactionLineDto::from)
                .collect(),
            total_excl_tax: totals.total_excl_tax_cents,
            total_tax: totals.total_tax_cents,
            total_incl_tax: totals.total_incl_tax_cents,
        }
    }
}

/// `GET /transactions/{id}` - read-only; safe to retry freely.
pub async fn get_transaction(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<TransactionResponse>, ApiError> {
    debug!(id = id, "get_transaction");

    let totals = state.db.transactions().get_with_totals(id).await?;

    Ok(Json(totals.into()))
}
