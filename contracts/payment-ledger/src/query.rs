use cosmwasm_std::{to_json_binary, Binary, Deps, Order, StdResult, Uint128};
use cw_storage_plus::Bound;

use crate::msg::VerifyTransferResponse;
use crate::state::{PayoutStatus, CONFIG, PAYOUTS, TRANSFERS};

pub fn query_config(deps: Deps) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;
    to_json_binary(&config)
}

/// Check an observed transfer against the caller's expectations:
/// presence, amount within tolerance, exact destination, exact sender
/// when one is expected.
pub fn query_verify_transfer(
    deps: Deps,
    tx_hash: String,
    expected_amount: Uint128,
    expected_to: String,
    expected_from: Option<String>,
) -> StdResult<Binary> {
    let config = CONFIG.load(deps.storage)?;

    let response = match TRANSFERS.may_load(deps.storage, &tx_hash)? {
        None => VerifyTransferResponse::rejected(format!("transaction {} not found", tx_hash)),
        Some(transfer) => {
            let diff = transfer.amount.abs_diff(expected_amount);
            if diff > config.amount_tolerance {
                VerifyTransferResponse::rejected(format!(
                    "amount mismatch: expected {}, got {}",
                    expected_amount, transfer.amount
                ))
            } else if transfer.to_wallet != expected_to {
                VerifyTransferResponse::rejected("wrong destination wallet")
            } else if expected_from
                .as_ref()
                .is_some_and(|from| *from != transfer.from_wallet)
            {
                VerifyTransferResponse::rejected("sender wallet mismatch")
            } else {
                VerifyTransferResponse::ok(transfer)
            }
        }
    };

    to_json_binary(&response)
}

pub fn query_transfer(deps: Deps, tx_hash: String) -> StdResult<Binary> {
    let transfer = TRANSFERS.may_load(deps.storage, &tx_hash)?;
    to_json_binary(&transfer)
}

pub fn query_payout(deps: Deps, payout_id: u64) -> StdResult<Binary> {
    let payout = PAYOUTS.may_load(deps.storage, payout_id)?;
    to_json_binary(&payout)
}

pub fn query_pending_payouts(
    deps: Deps,
    start_after: Option<u64>,
    limit: Option<u32>,
) -> StdResult<Binary> {
    let limit = limit.unwrap_or(50).min(100) as usize;
    let start = start_after.map(Bound::exclusive);

    let pending: Vec<_> = PAYOUTS
        .range(deps.storage, start, None, Order::Ascending)
        .filter_map(|r| r.ok())
        .map(|(_, payout)| payout)
        .filter(|p| matches!(p.status, PayoutStatus::Pending))
        .take(limit)
        .collect();

    to_json_binary(&pending)
}
