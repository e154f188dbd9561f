use cosmwasm_schema::{cw_serde, QueryResponses};
use cosmwasm_std::{Addr, Uint128};
use fairdraw_common::{RaffleKind, RaffleParams};

use crate::state::{Config, Participant, Raffle, TransactionRecord, UserProfile};

#[cw_serde]
pub struct InstantiateMsg {
    pub payment_ledger: String,
    pub randomness_oracle: String,
    /// TON wallet that collects entry fees and pays prizes.
    pub raffle_wallet: String,
    /// Commission in basis points (1000 = 10%).
    pub commission_bps: u16,
    pub express: RaffleParams,
    pub standard: RaffleParams,
    pub premium: RaffleParams,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Enter a raffle, presenting the TON transaction that paid the fee.
    Join { raffle_id: u64, tx_hash: String },
    /// Permissionless keeper call. Draws every raffle whose timer expired.
    Tick {},
    /// Draw a single expired raffle. Unlike Tick, errors propagate and the
    /// whole call reverts.
    Draw { raffle_id: u64 },
    /// Open a fresh raffle of the given kind (admin only). Rejected while
    /// another raffle of that kind is open.
    CreateRaffle { kind: RaffleKind },
    /// Cancel an open raffle (admin only).
    CancelRaffle { raffle_id: u64 },
    /// Link the sender's TON wallet for prize disbursement.
    LinkWallet { wallet: String },
    /// Adjust configuration (admin only). Parameter changes apply to
    /// raffles opened afterwards.
    UpdateConfig {
        payment_ledger: Option<String>,
        randomness_oracle: Option<String>,
        raffle_wallet: Option<String>,
        commission_bps: Option<u16>,
        express: Option<RaffleParams>,
        standard: Option<RaffleParams>,
        premium: Option<RaffleParams>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(Config)]
    Config {},

    /// The currently open raffle of every kind.
    #[returns(Vec<Raffle>)]
    ActiveRaffles {},

    /// A raffle with a page of its participants in join order.
    #[returns(Option<RaffleDetailResponse>)]
    Raffle {
        raffle_id: u64,
        start_after: Option<u32>,
        limit: Option<u32>,
    },

    #[returns(Option<Participant>)]
    Participant { raffle_id: u64, address: String },

    #[returns(Option<UserProfile>)]
    Profile { address: String },

    #[returns(Option<TransactionRecord>)]
    Transaction { tx_hash: String },
}

#[cw_serde]
pub struct RaffleDetailResponse {
    pub raffle: Raffle,
    pub participants: Vec<ParticipantEntry>,
}

#[cw_serde]
pub struct ParticipantEntry {
    pub user: Addr,
    pub participant: Participant,
}

/// Context threaded through the payout submessage so the reply handler can
/// settle the winner's record.
#[cw_serde]
pub struct PayoutCtx {
    pub raffle_id: u64,
    pub winner: Addr,
    pub recipient_wallet: String,
    pub amount: Uint128,
    pub reference: String,
}
