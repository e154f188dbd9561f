//! Thin clients for the two collaborator contracts. Message and response
//! shapes are mirrored here so the hub compiles without depending on the
//! collaborator crates.

use cosmwasm_schema::cw_serde;
use cosmwasm_std::{Addr, QuerierWrapper, Timestamp, Uint128};

use crate::error::ContractError;

#[cw_serde]
pub enum LedgerQueryMsg {
    VerifyTransfer {
        tx_hash: String,
        expected_amount: Uint128,
        expected_to: String,
        expected_from: Option<String>,
    },
}

#[cw_serde]
pub enum LedgerExecuteMsg {
    RequestPayout {
        recipient_wallet: String,
        amount: Uint128,
        reference: String,
    },
}

#[cw_serde]
pub struct VerifyTransferResponse {
    pub valid: bool,
    pub reason: Option<String>,
    pub transfer: Option<ObservedTransfer>,
}

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
pub enum OracleQueryMsg {
    FreshRandomness { not_before: u64 },
}

#[cw_serde]
pub struct RandomnessResponse {
    pub round: u64,
    pub randomness: Vec<u8>,
    pub signature_hex: String,
    pub verification_url: String,
    pub round_time: u64,
}

pub struct PaymentVerifier<'a> {
    pub contract: &'a Addr,
}

impl PaymentVerifier<'_> {
    /// Verify an entry payment against the ledger. A structured rejection
    /// and a query failure both surface as `PaymentVerification`.
    pub fn verify(
        &self,
        querier: &QuerierWrapper,
        tx_hash: String,
        expected_amount: Uint128,
        expected_to: String,
        expected_from: Option<String>,
    ) -> Result<ObservedTransfer, ContractError> {
        let response: VerifyTransferResponse = querier
            .query_wasm_smart(
                self.contract,
                &LedgerQueryMsg::VerifyTransfer {
                    tx_hash,
                    expected_amount,
                    expected_to,
                    expected_from,
                },
            )
            .map_err(|err| ContractError::PaymentVerification {
                reason: format!("ledger unreachable: {}", err),
            })?;

        match response.transfer {
            Some(transfer) if response.valid => Ok(transfer),
            _ => Err(ContractError::PaymentVerification {
                reason: response
                    .reason
                    .unwrap_or_else(|| "rejected by ledger".to_string()),
            }),
        }
    }
}

pub struct RandomnessClient<'a> {
    pub contract: &'a Addr,
}

impl RandomnessClient<'_> {
    /// Fetch a beacon that became public at or after `not_before`. The
    /// oracle being unreachable and having no fresh beacon are the same
    /// condition for the draw: try again on a later tick.
    pub fn fresh(
        &self,
        querier: &QuerierWrapper,
        raffle_id: u64,
        not_before: u64,
    ) -> Result<RandomnessResponse, ContractError> {
        let beacon: Option<RandomnessResponse> = querier
            .query_wasm_smart(self.contract, &OracleQueryMsg::FreshRandomness { not_before })
            .map_err(|err| ContractError::RandomnessNotAvailable {
                raffle_id,
                reason: format!("oracle unreachable: {}", err),
            })?;

        beacon.ok_or(ContractError::RandomnessNotAvailable {
            raffle_id,
            reason: format!("no beacon at or after {}", not_before),
        })
    }
}
