//! Quest board: taking quests and paying them out.
//!
//! Progress itself is recorded on the persisted
//! [`QuestLog`](crate::state::QuestLog) as kills, visits and inventory changes
//! happen. This module holds the two transitions that need more than the log:
//! accepting checks the registry, claiming touches the whole profile.

mod accept;
mod claim;

pub use accept::accept;
pub use claim::{QuestClaim, claim_rewards};
