//! Typed chain events. Indexers and the frontend gateway subscribe to the
//! `fairdraw_` prefix to mirror raffle state in real time.

use cosmwasm_std::{Addr, Event, Timestamp};

use crate::state::Raffle;

pub fn raffle_created(raffle: &Raffle) -> Event {
    Event::new("fairdraw_raffle_created")
        .add_attribute("raffle_id", raffle.id.to_string())
        .add_attribute("kind", raffle.kind.as_str())
        .add_attribute("entry_fee", raffle.entry_fee.to_string())
        .add_attribute("prize_pool", raffle.prize_pool.to_string())
        .add_attribute("min_participants", raffle.min_participants.to_string())
}

pub fn raffle_joined(raffle: &Raffle, user: &Addr, tx_hash: &str) -> Event {
    Event::new("fairdraw_raffle_joined")
        .add_attribute("raffle_id", raffle.id.to_string())
        .add_attribute("user", user.to_string())
        .add_attribute("participants", raffle.participant_count.to_string())
        .add_attribute("tx_hash", tx_hash.to_string())
}

pub fn raffle_started(raffle_id: u64, waiting_until: Timestamp) -> Event {
    Event::new("fairdraw_raffle_started")
        .add_attribute("raffle_id", raffle_id.to_string())
        .add_attribute("waiting_until", waiting_until.seconds().to_string())
}

pub fn raffle_completed(raffle: &Raffle, winner: &Addr, winner_seq: u32) -> Event {
    Event::new("fairdraw_raffle_completed")
        .add_attribute("raffle_id", raffle.id.to_string())
        .add_attribute("winner", winner.to_string())
        .add_attribute("winner_seq", winner_seq.to_string())
        .add_attribute("participants", raffle.participant_count.to_string())
        .add_attribute(
            "randomness_round",
            raffle
                .randomness_round
                .map(|r| r.to_string())
                .unwrap_or_default(),
        )
}

pub fn raffle_cancelled(raffle_id: u64) -> Event {
    Event::new("fairdraw_raffle_cancelled").add_attribute("raffle_id", raffle_id.to_string())
}

pub fn payout_requested(raffle_id: u64, recipient: &str, amount: impl ToString) -> Event {
    Event::new("fairdraw_payout_requested")
        .add_attribute("raffle_id", raffle_id.to_string())
        .add_attribute("recipient", recipient.to_string())
        .add_attribute("amount", amount.to_string())
}

/// The winner has no linked wallet; the prize stays claimable off-band.
pub fn payout_skipped(raffle_id: u64, winner: &Addr) -> Event {
    Event::new("fairdraw_payout_skipped")
        .add_attribute("raffle_id", raffle_id.to_string())
        .add_attribute("winner", winner.to_string())
}

pub fn payout_recorded(raffle_id: u64, reference: &str) -> Event {
    Event::new("fairdraw_payout_recorded")
        .add_attribute("raffle_id", raffle_id.to_string())
        .add_attribute("reference", reference.to_string())
}

pub fn payout_failed(raffle_id: u64, error: &str) -> Event {
    Event::new("fairdraw_payout_failed")
        .add_attribute("raffle_id", raffle_id.to_string())
        .add_attribute("error", error.to_string())
}

pub fn wallet_linked(user: &Addr, wallet: &str) -> Event {
    Event::new("fairdraw_wallet_linked")
        .add_attribute("user", user.to_string())
        .add_attribute("wallet", wallet.to_string())
}
