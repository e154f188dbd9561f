use cosmwasm_schema::{cw_serde, QueryResponses};

use crate::state::{OracleConfig, VerifiedBeacon};

#[cw_serde]
pub struct InstantiateMsg {
    pub operators: Vec<String>,
    /// Hex-encoded drand network public key (96 bytes = 192 hex chars)
    pub network_pubkey_hex: String,
    pub chain_hash: String,
    pub genesis_time: u64,
    pub period_seconds: u64,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Submit a drand beacon for BLS verification and storage. Operator only.
    SubmitRandomness {
        round: u64,
        /// Hex-encoded BLS signature (48 bytes = 96 hex chars)
        signature_hex: String,
    },
    /// Update operator list (admin only).
    UpdateOperators {
        add: Vec<String>,
        remove: Vec<String>,
    },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(OracleConfig)]
    Config {},

    #[returns(Option<VerifiedBeacon>)]
    Randomness { round: u64 },

    #[returns(u64)]
    LatestRound {},

    /// Latest beacon whose round time is at or after `not_before`, or None.
    /// Consumers use this to get randomness that could not have been known
    /// before a given deadline.
    #[returns(Option<RandomnessResponse>)]
    FreshRandomness { not_before: u64 },
}

/// Randomness handed to consumers, with everything needed for audit.
#[cw_serde]
pub struct RandomnessResponse {
    pub round: u64,
    /// 32-byte beacon randomness
    pub randomness: Vec<u8>,
    pub signature_hex: String,
    /// Human-checkable URL serving the signed beacon
    pub verification_url: String,
    /// Unix seconds at which the round became public
    pub round_time: u64,
}
