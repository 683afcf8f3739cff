#![warn(clippy::missing_docs_in_private_items)]

use raiden_macros::IntoStateChange;
use raiden_primitives::types::{
	Address,
	BlockHash,
	BlockNumber,
	CanonicalIdentifier,
	LockedAmount,
	Locksroot,
	MessageIdentifier,
	Nonce,
	Secret,
	SecretHash,
	SecretRegistryAddress,
	TokenAmount,
	TokenNetworkRegistryAddress,
	TransactionHash,
};
use serde::{
	Deserialize,
	Serialize,
};

use crate::types::{
	state::{
		BalanceProofState,
		HopState,
		LockedTransferState,
		TransactionChannelDeposit,
	},
	ChannelState,
	MediationFeeConfig,
	TokenNetworkState,
};

/// An enum containing all possible state change variants.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
#[serde(tag = "type")]
#[allow(clippy::large_enum_variant)]
pub enum StateChange {
	ActionInitMediator(ActionInitMediator),
	ActionInitTarget(ActionInitTarget),
	ContractReceiveTokenNetworkCreated(ContractReceiveTokenNetworkCreated),
	ContractReceiveChannelOpened(ContractReceiveChannelOpened),
	ContractReceiveChannelClosed(ContractReceiveChannelClosed),
	ContractReceiveChannelSettled(ContractReceiveChannelSettled),
	ContractReceiveChannelDeposit(ContractReceiveChannelDeposit),
	ContractReceiveChannelWithdraw(ContractReceiveChannelWithdraw),
	ContractReceiveChannelBatchUnlock(ContractReceiveChannelBatchUnlock),
	ContractReceiveSecretReveal(ContractReceiveSecretReveal),
	ContractReceiveRouteNew(ContractReceiveRouteNew),
	ContractReceiveRouteClosed(ContractReceiveRouteClosed),
	ContractReceiveUpdateTransfer(ContractReceiveUpdateTransfer),
	ReceiveLockExpired(ReceiveLockExpired),
	ReceiveUnlock(ReceiveUnlock),
}

impl StateChange {
	/// Returns a string of the inner state change's type name.
	pub fn type_name(&self) -> &'static str {
		match self {
			StateChange::ActionInitMediator(_) => "ActionInitMediator",
			StateChange::ActionInitTarget(_) => "ActionInitTarget",
			StateChange::ContractReceiveTokenNetworkCreated(_) =>
				"ContractReceiveTokenNetworkCreated",
			StateChange::ContractReceiveChannelOpened(_) => "ContractReceiveChannelOpened",
			StateChange::ContractReceiveChannelClosed(_) => "ContractReceiveChannelClosed",
			StateChange::ContractReceiveChannelSettled(_) => "ContractReceiveChannelSettled",
			StateChange::ContractReceiveChannelDeposit(_) => "ContractReceiveChannelDeposit",
			StateChange::ContractReceiveChannelWithdraw(_) => "ContractReceiveChannelWithdraw",
			StateChange::ContractReceiveChannelBatchUnlock(_) =>
				"ContractReceiveChannelBatchUnlock",
			StateChange::ContractReceiveSecretReveal(_) => "ContractReceiveSecretReveal",
			StateChange::ContractReceiveRouteNew(_) => "ContractReceiveRouteNew",
			StateChange::ContractReceiveRouteClosed(_) => "ContractReceiveRouteClosed",
			StateChange::ContractReceiveUpdateTransfer(_) => "ContractReceiveUpdateTransfer",
			StateChange::ReceiveLockExpired(_) => "ReceiveLockExpired",
			StateChange::ReceiveUnlock(_) => "ReceiveUnlock",
		}
	}

	/// The balance proof received from a partner, if this state change carries one.
	pub fn balance_proof(&self) -> Option<&BalanceProofState> {
		match self {
			StateChange::ActionInitMediator(inner) => Some(&inner.balance_proof),
			StateChange::ActionInitTarget(inner) => Some(&inner.balance_proof),
			StateChange::ReceiveLockExpired(inner) => Some(&inner.balance_proof),
			StateChange::ReceiveUnlock(inner) => Some(&inner.balance_proof),
			_ => None,
		}
	}
}

/// A new token was registered with the token network registry.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct ContractReceiveTokenNetworkCreated {
	pub transaction_hash: Option<TransactionHash>,
	pub token_network_registry_address: TokenNetworkRegistryAddress,
	pub token_network: TokenNetworkState,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
}

/// A new channel was created and this node IS a participant.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct ContractReceiveChannelOpened {
	pub transaction_hash: Option<TransactionHash>,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub channel_state: ChannelState,
}

/// A channel to which this node IS a participant was closed.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct ContractReceiveChannelClosed {
	pub transaction_hash: Option<TransactionHash>,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub transaction_from: Address,
	pub canonical_identifier: CanonicalIdentifier,
}

/// A channel to which this node IS a participant was settled.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct ContractReceiveChannelSettled {
	pub transaction_hash: Option<TransactionHash>,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub canonical_identifier: CanonicalIdentifier,
	pub our_onchain_locksroot: Locksroot,
	pub partner_onchain_locksroot: Locksroot,
	pub our_transferred_amount: TokenAmount,
	pub partner_transferred_amount: TokenAmount,
}

/// A channel to which this node IS a participant had a deposit.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct ContractReceiveChannelDeposit {
	pub transaction_hash: Option<TransactionHash>,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub canonical_identifier: CanonicalIdentifier,
	pub deposit_transaction: TransactionChannelDeposit,
	pub fee_config: MediationFeeConfig,
}

/// A channel to which this node IS a participant had a withdraw.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct ContractReceiveChannelWithdraw {
	pub transaction_hash: Option<TransactionHash>,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub canonical_identifier: CanonicalIdentifier,
	pub participant: Address,
	pub total_withdraw: TokenAmount,
	pub fee_config: MediationFeeConfig,
}

/// All the locks of a balance proof were claimed via the blockchain.
///
/// `receiver` got `unlocked_amount`, `returned_tokens` went back to `sender`.
/// `participant` is whichever of the two is not this node, and `locksroot` is the one of the
/// balance proof the locks were taken from.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct ContractReceiveChannelBatchUnlock {
	pub transaction_hash: Option<TransactionHash>,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub canonical_identifier: CanonicalIdentifier,
	pub receiver: Address,
	pub sender: Address,
	pub participant: Address,
	pub locksroot: Locksroot,
	pub unlocked_amount: LockedAmount,
	pub returned_tokens: TokenAmount,
}

/// A new secret was registered with the SecretRegistry contract.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct ContractReceiveSecretReveal {
	pub transaction_hash: Option<TransactionHash>,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub secret_registry_address: SecretRegistryAddress,
	pub secrethash: SecretHash,
	pub secret: Secret,
}

/// New channel was created and this node is NOT a participant.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct ContractReceiveRouteNew {
	pub transaction_hash: Option<TransactionHash>,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub canonical_identifier: CanonicalIdentifier,
	pub participant1: Address,
	pub participant2: Address,
}

/// A channel which this node does not track was closed.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct ContractReceiveRouteClosed {
	pub transaction_hash: Option<TransactionHash>,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub canonical_identifier: CanonicalIdentifier,
}

/// Participant updated the latest balance proof on-chain.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct ContractReceiveUpdateTransfer {
	pub transaction_hash: Option<TransactionHash>,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub canonical_identifier: CanonicalIdentifier,
	pub nonce: Nonce,
}

/// Initial state for a new mediator.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct ActionInitMediator {
	pub sender: Address,
	pub balance_proof: BalanceProofState,
	pub from_hop: HopState,
	pub from_transfer: LockedTransferState,
}

/// Initial state for a new target.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct ActionInitTarget {
	pub sender: Address,
	pub balance_proof: BalanceProofState,
	pub from_hop: HopState,
	pub transfer: LockedTransferState,
	pub received_valid_secret: bool,
}

/// A LockExpired message received.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct ReceiveLockExpired {
	pub sender: Address,
	pub secrethash: SecretHash,
	pub message_identifier: MessageIdentifier,
	pub balance_proof: BalanceProofState,
}

/// An Unlock message received.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoStateChange)]
pub struct ReceiveUnlock {
	pub sender: Address,
	pub message_identifier: MessageIdentifier,
	pub secret: Secret,
	pub secrethash: SecretHash,
	pub balance_proof: BalanceProofState,
}
