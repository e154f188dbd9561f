pub mod draw;
pub mod types;

pub use draw::winner_index;
pub use types::{
    prize_pool, RaffleKind, RaffleParams, RaffleStatus, TransactionKind, TransactionStatus,
};
