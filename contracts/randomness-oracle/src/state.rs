use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, Timestamp};
use cw_storage_plus::{Item, Map};

pub const CONFIG: Item<OracleConfig> = Item::new("config");
pub const BEACONS: Map<u64, VerifiedBeacon> = Map::new("beacons");
pub const LATEST_ROUND: Item<u64> = Item::new("latest_round");

#[cw_serde]
pub struct OracleConfig {
    pub admin: Addr,
    pub operators: Vec<Addr>,
    /// drand network public key, 96 bytes (compressed G2 point)
    pub network_pubkey: Vec<u8>,
    /// Chain hash identifying the drand network
    pub chain_hash: String,
    /// Genesis time of the drand network (unix seconds)
    pub genesis_time: u64,
    /// Period between rounds in seconds (3 for quicknet)
    pub period_seconds: u64,
}

impl OracleConfig {
    /// Wall-clock time at which a round's beacon becomes public.
    pub fn time_of_round(&self, round: u64) -> u64 {
        self.genesis_time + round.saturating_sub(1) * self.period_seconds
    }

    /// Public drand HTTP endpoint serving this round, for independent audit.
    pub fn verification_url(&self, round: u64) -> String {
        format!("https://api.drand.sh/{}/public/{}", self.chain_hash, round)
    }
}

#[cw_serde]
pub struct VerifiedBeacon {
    pub round: u64,
    /// sha256(signature), 32 bytes
    pub randomness: Vec<u8>,
    /// BLS signature on G1, 48 bytes
    pub signature: Vec<u8>,
    pub submitted_at: Timestamp,
    pub submitted_by: Addr,
}
