use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("transfer {tx_hash} already recorded")]
    TransferAlreadyRecorded { tx_hash: String },

    #[error("payout {payout_id} not found")]
    PayoutNotFound { payout_id: u64 },

    #[error("payout {payout_id} already confirmed")]
    PayoutAlreadyConfirmed { payout_id: u64 },

    #[error("payout amount must be non-zero")]
    ZeroPayoutAmount,
}
