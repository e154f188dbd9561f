use cosmwasm_std::StdError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContractError {
    #[error("{0}")]
    Std(#[from] StdError),

    #[error("unauthorized: {reason}")]
    Unauthorized { reason: String },

    #[error("raffle {raffle_id} not found")]
    RaffleNotFound { raffle_id: u64 },

    #[error("raffle {raffle_id} is not accepting entries (status: {status})")]
    RaffleNotAccepting { raffle_id: u64, status: String },

    #[error("already joined raffle {raffle_id}")]
    AlreadyJoined { raffle_id: u64 },

    #[error("transaction {tx_hash} already used for an entry")]
    TransactionAlreadyUsed { tx_hash: String },

    #[error("payment verification failed: {reason}")]
    PaymentVerification { reason: String },

    #[error("raffle {raffle_id} is not awaiting a draw (status: {status})")]
    RaffleNotDrawable { raffle_id: u64, status: String },

    #[error("raffle {raffle_id} timer has not expired (deadline: {waiting_until})")]
    TimerNotExpired { raffle_id: u64, waiting_until: u64 },

    #[error("no deadline-fresh randomness for raffle {raffle_id}: {reason}")]
    RandomnessNotAvailable { raffle_id: u64, reason: String },

    #[error("raffle {raffle_id} has no participants")]
    NoParticipants { raffle_id: u64 },

    #[error("an open {kind} raffle already exists")]
    KindAlreadyOpen { kind: String },

    #[error("commission {bps} bps exceeds 10000")]
    InvalidCommission { bps: u16 },

    #[error("invalid {kind} parameters: {reason}")]
    InvalidParams { kind: String, reason: String },

    #[error("unknown reply id {id}")]
    UnknownReplyId { id: u64 },
}
