use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<LedgerConfig> = Item::new("config");
/// Observed TON-side transfers, keyed by transaction hash.
/// The map key is the global uniqueness constraint on references.
pub const TRANSFERS: Map<&str, ObservedTransfer> = Map::new("transfers");
pub const PAYOUTS: Map<u64, PayoutRequest> = Map::new("payouts");
pub const NEXT_PAYOUT_ID: Item<u64> = Item::new("next_payout_id");

#[cw_serde]
pub struct LedgerConfig {
    pub admin: Addr,
    /// Off-chain watchers allowed to mirror observed transfers.
    pub operators: Vec<Addr>,
    /// The raffle hub contract, sole source of payout requests.
    pub raffle_hub: Addr,
    /// TON wallet that collects entry fees.
    pub raffle_wallet: String,
    /// Accepted deviation between expected and observed amounts
    /// (0.01 TON = 10^7 base units in the reference deployment).
    pub amount_tolerance: Uint128,
}

/// A TON-side transfer mirrored into the ledger by an operator.
#[cw_serde]
pub struct ObservedTransfer {
    pub tx_hash: String,
    pub from_wallet: String,
    pub to_wallet: String,
    pub amount: Uint128,
    pub observed_at: Timestamp,
    pub submitted_by: Addr,
}

#[cw_serde]
#[derive(Copy)]
pub enum PayoutStatus {
    /// Recorded, awaiting the off-chain wallet daemon.
    Pending,
    /// Confirmed sent on the external ledger.
    Sent,
}

/// A disbursement instruction recorded for the off-chain wallet daemon.
#[cw_serde]
pub struct PayoutRequest {
    pub id: u64,
    pub recipient_wallet: String,
    pub amount: Uint128,
    /// Caller-supplied reference, e.g. "prize-{raffle_id}".
    pub reference: String,
    pub status: PayoutStatus,
    pub requested_at: Timestamp,
    /// TON transaction hash once the daemon confirms the send.
    pub tx_hash: Option<String>,
}
