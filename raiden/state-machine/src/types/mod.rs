mod event;
mod state;
mod state_change;

use raiden_primitives::types::BlockNumber;
use serde::{
	Deserialize,
	Serialize,
};

pub use self::{
	event::*,
	state::*,
	state_change::*,
};

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub enum TransactionResult {
	Success,
	Failure,
}

/// Progress of an on-chain transaction as observed by the node.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct TransactionExecutionStatus {
	pub started_block_number: Option<BlockNumber>,
	pub finished_block_number: Option<BlockNumber>,
	pub result: Option<TransactionResult>,
}

impl TransactionExecutionStatus {
	/// A transaction mined successfully in `block_number`.
	pub fn succeeded_at(block_number: BlockNumber) -> Self {
		Self {
			started_block_number: Some(BlockNumber::zero()),
			finished_block_number: Some(block_number),
			result: Some(TransactionResult::Success),
		}
	}
}
