//! # Purchase Route
//!
//! `POST /purchase` - records a purchase transaction.
//!
//! The handler is a thin mapping: deserialize the request, hand it to the
//! transaction recorder with the configured sale constants, and shape the
//! recorded transaction into the wire response.

use axum::extract::State;
use axum::Json;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;
use till_core::{PurchaseItem, RecordedPurchase, TransactionLine};

// =============================================================================
// Request
// =============================================================================

/// One purchase item on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItemDto {
    pub product_code: String,
    pub quantity: i64,
}

/// `POST /purchase` request body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseRequest {
    /// Optional requester id; blank values fall back to the configured
    /// default clerk code.
    #[serde(default)]
    pub requester_id: Option<String>,

    /// Items in purchase order; line numbers follow this order.
    pub items: Vec<PurchaseItemDto>,
}

// =============================================================================
// Response
// =============================================================================

/// One recorded line on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseLineDto {
    pub line_seq: i64,
    pub product_id: i64,
    pub product_code: String,
    pub product_name: String,
    pub unit_price: i64,
    pub quantity: i64,
    pub tax_code: String,
}

impl From<TransactionLine> for PurchaseLineDto {
    fn from(line: TransactionLine) -> Self {
        PurchaseLineDto {
            line_seq: line.line_no,
            product_id: line.product_id,
            product_code: line.product_code,
            product_name: line.product_name,
            unit_price: line.unit_price_cents,
            quantity: line.quantity,
            tax_code: line.tax_code,
        }
    }
}

/// `POST /purchase` response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseResponse {
    pub transaction_id: i64,
    pub timestamp: DateTime<Utc>,
    pub requester_id: String,
    pub store_id: String,
    pub terminal_id: String,
    pub total_incl_tax: i64,
    pub total_excl_tax: i64,
    pub lines: Vec<PurchaseLineDto>,
}

impl From<RecordedPurchase> for PurchaseResponse {
    fn from(recorded: RecordedPurchase) -> Self {
        let txn = recorded.transaction;
        PurchaseResponse {
            transaction_id: txn.id,
            timestamp: txn.created_at,
            requester_id: txn.clerk_code,
            store_id: txn.store_code,
            terminal_id: txn.terminal_code,
            total_incl_tax: txn.total_cents,
            total_excl_tax: txn.total_excl_tax_cents,
            lines: recorded
                .lines
                .into_iter()
                .map(PurchaseLineDto::from)
                .collect(),
        }
    }
}

// =============================================================================
// Handler
// =============================================================================

/// `POST /purchase` - record a purchase as one atomic unit.
pub async fn create_purchase(
    State(state): State<AppState>,
    Json(request): Json<PurchaseRequest>,
) -> Result<Json<PurchaseResponse>, ApiError> {
    debug!(item_count = request.items.len(), "create_purchase");

    let items: Vec<PurchaseItem> = request
        .items
        .into_iter()
        .map(|item| PurchaseItem {
            product_code: item.product_code,
            quantity: item.quantity,
        })
        .collect();

    let recorded = state
        .db
        .transactions()
        .record_purchase(&state.sale, request.requester_id.as_deref(), &items)
        .await?;

    Ok(Json(recorded.into()))
}
