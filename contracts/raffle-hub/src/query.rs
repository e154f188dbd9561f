use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdResult};
use cw_storage_plus::Bound;

use crate::msg::{ParticipantEntry, RaffleDetailResponse};
use crate::state::{CONFIG, OPEN_RAFFLES, PARTICIPANTS, PARTICIPANTS_BY_SEQ, PROFILES, RAFFLES, TRANSACTIONS};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

pub fn query_active_raffles(deps: Deps) -> StdResult<Binary> {
    let raffles = OPEN_RAFFLES
        .range(deps.storage, None, None, Order::Ascending)
        .map(|item| {
            let (_, raffle_id) = item?;
            RAFFLES.load(deps.storage, raffle_id)
        })
        .collect::<StdResult<Vec<_>>>()?;
    to_json_binary(&raffles)
}

pub fn query_raffle(
    deps: Deps,
    raffle_id: u64,
    start_after: Option<u32>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let raffle = match RAFFLES.may_load(deps.storage, raffle_id)? {
        Some(raffle) => raffle,
        None => return to_json_binary(&None::<RaffleDetailResponse>),
    };

    let limit = limit.unwrap_or(50).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let participants = PARTICIPANTS_BY_SEQ
        .prefix(raffle_id)
        .range(deps.storage, start, None, Order::Ascending)
        .take(limit)
        .map(|item| {
            let (_, user) = item?;
            let participant = PARTICIPANTS.load(deps.storage, (raffle_id, &user))?;
            Ok(ParticipantEntry { user, participant })
        })
        .collect::<StdResult<Vec<_>>>()?;

    to_json_binary(&Some(RaffleDetailResponse {
        raffle,
        participants,
    }))
}

pub fn query_participant(deps: Deps, raffle_id: u64, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let participant = PARTICIPANTS.may_load(deps.storage, (raffle_id, &addr))?;
    to_json_binary(&participant)
}

pub fn query_profile(deps: Deps, address: String) -> StdResult<Binary> {
    let addr = deps.api.addr_validate(&address)?;
    let profile = PROFILES.may_load(deps.storage, &addr)?;
    to_json_binary(&profile)
}

pub fn query_transaction(deps: Deps, tx_hash: String) -> StdResult<Binary> {
    let record = TRANSACTIONS.may_load(deps.storage, &tx_hash)?;
    to_json_binary(&record)
}
