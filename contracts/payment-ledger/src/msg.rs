use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::Uint128;

use crate::state::{LedgerConfig, ObservedTransfer, PayoutRequest};

#[cw_serde]
pub struct InstantiateMsg {
    pub operators: Vec<String>,
    pub raffle_hub: String,
    pub raffle_wallet: String,
    pub amount_tolerance: Uint128,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Mirror an observed TON-side transfer into the ledger. Operator only.
    RecordTransfer {
        tx_hash: String,
        from_wallet: String,
        to_wallet: String,
        amount: Uint128,
    },
    /// Record a disbursement instruction. Raffle hub only.
    RequestPayout {
        recipient_wallet: String,
        amount: Uint128,
        reference: String,
    },
    /// Confirm a payout was sent on the external ledger. Operator only.
    /// Mirrors the prize transfer under its real transaction hash.
    ConfirmPayout { payout_id: u64, tx_hash: String },
    /// Update operator list (admin only).
    UpdateOperators {
        add: Vec<String>,
        remove: Vec<String>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(LedgerConfig)]
    Config {},

    /// Check a transfer against expected amount/destination/sender.
    /// Returns a structured verdict rather than erroring, so callers can
    /// surface the rejection reason.
    #[returns(VerifyTransferResponse)]
    VerifyTransfer {
        tx_hash: String,
        expected_amount: Uint128,
        expected_to: String,
        expected_from: Option<String>,
    },

    #[returns(Option<ObservedTransfer>)]
    Transfer { tx_hash: String },

    #[returns(Option<PayoutRequest>)]
    Payout { payout_id: u64 },

    /// Payouts not yet confirmed, for the wallet daemon to work through.
    #[returns(Vec<PayoutRequest>)]
    PendingPayouts {
        start_after: Option<u64>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct VerifyTransferResponse {
    pub valid: bool,
    /// Why verification failed; None when valid.
    pub reason: Option<String>,
    /// The observed transfer when valid.
    pub transfer: Option<ObservedTransfer>,
}

impl VerifyTransferResponse {
    pub fn ok(transfer: ObservedTransfer) -> Self {
        VerifyTransferResponse {
            valid: true,
            reason: None,
            transfer: Some(transfer),
        }
    }

    pub fn rejected(reason: impl Into<String>) -> Self {
        VerifyTransferResponse {
            valid: false,
            reason: Some(reason.into()),
            transfer: None,
        }
    }
}
