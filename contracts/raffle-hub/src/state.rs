use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp, Uint128};
use cw_storage_plus::{Item, Map};
use fairdraw_common::{RaffleKind, RaffleParams, RaffleStatus, TransactionKind, TransactionStatus};

pub const CONFIG: Item<Config> = Item::new("config");
pub const NEXT_RAFFLE_ID: Item<u64> = Item::new("next_raffle_id");
pub const RAFFLES: Map<u64, Raffle> = Map::new("raffles");
/// One open (joinable or timed) raffle per kind, keyed by `RaffleKind::key()`.
pub const OPEN_RAFFLES: Map<u8, u64> = Map::new("open_raffles");
/// Membership record per (raffle, user). The map key is the
/// one-entry-per-user constraint.
pub const PARTICIPANTS: Map<(u64, &Addr), Participant> = Map::new("participants");
/// Dense join-order index used to resolve the drawn winner slot.
pub const PARTICIPANTS_BY_SEQ: Map<(u64, u32), Addr> = Map::new("participants_by_seq");
/// Every payment reference ever consumed, keyed by transaction hash.
/// The map key guarantees a hash can buy at most one entry, ever.
pub const TRANSACTIONS: Map<&str, TransactionRecord> = Map::new("transactions");
pub const PROFILES: Map<&Addr, UserProfile> = Map::new("profiles");

#[cw_serde]
pub struct Config {
    pub admin: Addr,
    /// Payment ledger contract used to verify entry fees and to record
    /// prize disbursements.
    pub payment_ledger: Addr,
    /// Drand oracle contract serving deadline-fresh randomness.
    pub randomness_oracle: Addr,
    /// TON wallet that collects entry fees and pays prizes.
    pub raffle_wallet: String,
    /// Commission retained from the pot, in basis points (1000 = 10%).
    pub commission_bps: u16,
    pub express: RaffleParams,
    pub standard: RaffleParams,
    pub premium: RaffleParams,
}

impl Config {
    pub fn params_for(&self, kind: RaffleKind) -> &RaffleParams {
        match kind {
            RaffleKind::Express => &self.express,
            RaffleKind::Standard => &self.standard,
            RaffleKind::Premium => &self.premium,
        }
    }
}

#[cw_serde]
pub struct Raffle {
    pub id: u64,
    pub kind: RaffleKind,
    pub status: RaffleStatus,
    /// Parameters frozen at creation; later config changes only affect
    /// raffles opened afterwards.
    pub min_participants: u32,
    pub entry_fee: Uint128,
    pub timer_seconds: u64,
    pub prize_pool: Uint128,
    pub commission_bps: u16,
    pub participant_count: u32,
    pub created_at: Timestamp,
    /// Draw deadline, set once when the threshold is reached.
    pub waiting_until: Option<Timestamp>,
    pub drawn_at: Option<Timestamp>,
    pub winner: Option<Addr>,
    /// Drand proof of the draw, for external audit.
    pub randomness_round: Option<u64>,
    pub randomness_signature: Option<String>,
    pub verification_url: Option<String>,
}

#[cw_serde]
pub struct Participant {
    /// Join-order slot, 0-based.
    pub seq: u32,
    pub joined_at: Timestamp,
    /// Entry payment that admitted this participant.
    pub tx_hash: String,
    pub is_winner: bool,
    pub prize_sent: bool,
    pub prize_tx_hash: Option<String>,
}

#[cw_serde]
pub struct TransactionRecord {
    pub user: Addr,
    pub raffle_id: Option<u64>,
    pub from_wallet: String,
    pub to_wallet: String,
    pub amount: Uint128,
    pub kind: TransactionKind,
    pub status: TransactionStatus,
    pub created_at: Timestamp,
    pub confirmed_at: Option<Timestamp>,
}

#[cw_serde]
pub struct UserProfile {
    /// Linked TON wallet; prizes are only disbursed when set.
    pub ton_wallet: Option<String>,
    pub created_at: Timestamp,
    pub total_participations: u32,
    pub total_wins: u32,
    pub total_spent: Uint128,
    pub total_won: Uint128,
}

impl UserProfile {
    pub fn new(created_at: Timestamp) -> Self {
        UserProfile {
            ton_wallet: None,
            created_at,
            total_participations: 0,
            total_wins: 0,
            total_spent: Uint128::zero(),
            total_won: Uint128::zero(),
        }
    }
}
