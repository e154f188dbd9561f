use cosmwasm_schema::cw_serde;
use cosmwasm_std::Uint128;

/// The raffle track: each kind is a fixed parameter set, not a per-round choice.
#[cw_serde]
#[derive(Copy)]
pub enum RaffleKind {
    Express,
    Standard,
    Premium,
}

impl RaffleKind {
    pub const ALL: [RaffleKind; 3] = [
        RaffleKind::Express,
        RaffleKind::Standard,
        RaffleKind::Premium,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RaffleKind::Express => "express",
            RaffleKind::Standard => "standard",
            RaffleKind::Premium => "premium",
        }
    }

    /// Stable storage key for per-kind maps.
    pub fn key(&self) -> u8 {
        match self {
            RaffleKind::Express => 0,
            RaffleKind::Standard => 1,
            RaffleKind::Premium => 2,
        }
    }
}

/// The lifecycle status of a raffle round.
///
/// Transitions are monotonic (Active → Waiting → Drawing → Completed) with one
/// exception: a failed draw rolls Drawing back to Waiting for retry.
/// Cancelled is reachable only from Active/Waiting by the admin.
#[cw_serde]
#[derive(Copy)]
pub enum RaffleStatus {
    Active,
    Waiting,
    Drawing,
    Completed,
    Cancelled,
}

impl RaffleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RaffleStatus::Active => "active",
            RaffleStatus::Waiting => "waiting",
            RaffleStatus::Drawing => "drawing",
            RaffleStatus::Completed => "completed",
            RaffleStatus::Cancelled => "cancelled",
        }
    }

    /// Whether the round still admits participants.
    pub fn accepts_joins(&self) -> bool {
        matches!(self, RaffleStatus::Active | RaffleStatus::Waiting)
    }

    /// Whether the round is live (part of the open-raffle index).
    pub fn is_open(&self) -> bool {
        !matches!(self, RaffleStatus::Completed | RaffleStatus::Cancelled)
    }
}

#[cw_serde]
#[derive(Copy)]
pub enum TransactionKind {
    Entry,
    Prize,
}

impl TransactionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionKind::Entry => "entry",
            TransactionKind::Prize => "prize",
        }
    }
}

#[cw_serde]
#[derive(Copy)]
pub enum TransactionStatus {
    Pending,
    Confirmed,
    Failed,
}

/// Fixed parameters for one raffle kind.
#[cw_serde]
pub struct RaffleParams {
    pub min_participants: u32,
    /// Entry fee in nano-TON-equivalent base units (1 TON = 10^9).
    pub entry_fee: Uint128,
    /// Length of the Waiting window once the admission threshold is reached.
    pub timer_seconds: u64,
}

/// Prize pool for a round: entry_fee * min_participants less commission.
///
/// Overshoot entries collected during the Waiting window go to commission;
/// the advertised pool is fixed when the round is created.
pub fn prize_pool(entry_fee: Uint128, min_participants: u32, commission_bps: u16) -> Uint128 {
    let gross = entry_fee * Uint128::from(min_participants);
    gross.multiply_ratio(10_000u128 - commission_bps as u128, 10_000u128)
}
