use cosmwasm_std::{to_json_binary, Binary, Deps, StdResult};

use crate::msg::RandomnessResponse;
use crate::state::{BEACONS, CONFIG, LATEST_ROUND};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_randomness(deps: Deps, round: u64) -> StdResult<Binary> {
    let beacon = BEACONS.may_load(deps.storage, round)?;
    to_json_binary(&beacon)
}

pub fn query_latest_round(deps: Deps) -> StdResult<Binary> {
    let round = LATEST_ROUND.may_load(deps.storage)?.unwrap_or(0);
    to_json_binary(&round)
}

/// Latest stored beacon whose round time is at or after `not_before`.
/// Returns None when no such beacon exists yet; consumers retry later.
pub fn query_fresh_randomness(deps: Deps, not_before: u64) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    let latest = LATEST_ROUND.may_load(deps.storage)?.unwrap_or(0);

    let response: Option<RandomnessResponse> = if latest == 0 {
        None
    } else {
        let round_time = config.time_of_round(latest);
        if round_time < not_before {
            None
        } else {
            BEACONS
                .may_load(deps.storage, latest)?
                .map(|beacon| RandomnessResponse {
                    round: beacon.round,
                    randomness: beacon.randomness,
                    signature_hex: hex::encode(&beacon.signature),
                    verification_url: config.verification_url(beacon.round),
                    round_time,
                })
        }
    };

    to_json_binary(&response)
}
