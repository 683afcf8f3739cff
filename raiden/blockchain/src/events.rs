use std::collections::HashMap;

use derive_more::From;
use ethabi::Token;
use raiden_primitives::types::{
	Address,
	BlockHash,
	BlockNumber,
	Bytes,
	ChannelIdentifier,
	Locksroot,
	Nonce,
	Secret,
	SecretHash,
	SettleTimeout,
	TokenAmount,
	TransactionHash,
	H256,
	U256,
};

use crate::errors::{
	DecodeError,
	Result,
};

/// Contains information about the event triggered on the Ethereum chain.
#[derive(Clone, Debug)]
pub struct Event {
	pub name: String,
	pub address: Address,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub transaction_hash: TransactionHash,
	pub data: HashMap<String, Token>,
}

impl Event {
	/// Typed access to the arguments of the event.
	fn args(&self) -> EventArgs<'_> {
		EventArgs { event: self }
	}
}

/// Reads the arguments of a raw event, failing on missing or wrongly typed values.
struct EventArgs<'a> {
	/// The event being read.
	event: &'a Event,
}

impl<'a> EventArgs<'a> {
	/// Look up an argument that must be present.
	fn get(&self, argument: &'static str) -> Result<&'a Token> {
		self.event.data.get(argument).ok_or_else(|| DecodeError::MissingArgument {
			event: self.event.name.clone(),
			argument,
		})
	}

	/// The error for an argument of unexpected type or size.
	fn invalid(&self, argument: &'static str) -> DecodeError {
		DecodeError::InvalidArgument { event: self.event.name.clone(), argument }
	}

	/// An `address` argument.
	fn address(&self, argument: &'static str) -> Result<Address> {
		match self.get(argument)? {
			Token::Address(address) => Ok(*address),
			_ => Err(self.invalid(argument)),
		}
	}

	/// A `uint256` argument.
	fn uint(&self, argument: &'static str) -> Result<U256> {
		match self.get(argument)? {
			Token::Uint(value) => Ok(*value),
			_ => Err(self.invalid(argument)),
		}
	}

	/// A `uint256` argument which is only emitted by some contract versions.
	fn optional_uint(&self, argument: &'static str) -> Result<Option<U256>> {
		match self.event.data.get(argument) {
			None => Ok(None),
			Some(Token::Uint(value)) => Ok(Some(*value)),
			Some(_) => Err(self.invalid(argument)),
		}
	}

	/// A `bytes32` argument.
	fn bytes32(&self, argument: &'static str) -> Result<H256> {
		match self.get(argument)? {
			Token::FixedBytes(bytes) if bytes.len() == 32 => Ok(H256::from_slice(bytes)),
			_ => Err(self.invalid(argument)),
		}
	}

	/// A `uint256` number of blocks, if present.
	fn optional_block_count(&self, argument: &'static str) -> Result<Option<SettleTimeout>> {
		match self.optional_uint(argument)? {
			Some(value) if value > U256::from(u64::MAX) => Err(self.invalid(argument)),
			Some(value) => Ok(Some(SettleTimeout::from(value.low_u64()))),
			None => Ok(None),
		}
	}
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TokenNetworkCreated {
	pub token_address: Address,
	pub token_network_address: Address,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelOpened {
	pub channel_identifier: ChannelIdentifier,
	pub participant1: Address,
	pub participant2: Address,
	/// Required only when the node is one of the participants.
	pub settle_timeout: Option<SettleTimeout>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelNewDeposit {
	pub channel_identifier: ChannelIdentifier,
	pub participant: Address,
	pub total_deposit: TokenAmount,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelWithdraw {
	pub channel_identifier: ChannelIdentifier,
	pub participant: Address,
	pub total_withdraw: TokenAmount,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelClosed {
	pub channel_identifier: ChannelIdentifier,
	pub closing_participant: Address,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NonClosingBalanceProofUpdated {
	pub channel_identifier: ChannelIdentifier,
	pub closing_participant: Address,
	pub nonce: Nonce,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelSettled {
	pub channel_identifier: ChannelIdentifier,
	pub participant1: Address,
	pub participant1_amount: TokenAmount,
	pub participant1_locksroot: Locksroot,
	pub participant2: Address,
	pub participant2_amount: TokenAmount,
	pub participant2_locksroot: Locksroot,
}

/// Tokens of pending locks released on-chain.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelUnlocked {
	/// Not emitted by older token network contracts.
	pub channel_identifier: Option<ChannelIdentifier>,
	pub receiver: Address,
	pub sender: Address,
	pub locksroot: Locksroot,
	pub unlocked_amount: TokenAmount,
	pub returned_tokens: TokenAmount,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecretRevealed {
	pub secrethash: SecretHash,
	pub secret: Secret,
}

/// Typed arguments of every contract event the node reacts to.
#[derive(Clone, Debug, From, PartialEq, Eq)]
pub enum ContractEvent {
	TokenNetworkCreated(TokenNetworkCreated),
	ChannelOpened(ChannelOpened),
	ChannelNewDeposit(ChannelNewDeposit),
	ChannelWithdraw(ChannelWithdraw),
	ChannelClosed(ChannelClosed),
	NonClosingBalanceProofUpdated(NonClosingBalanceProofUpdated),
	ChannelSettled(ChannelSettled),
	ChannelUnlocked(ChannelUnlocked),
	SecretRevealed(SecretRevealed),
}

impl ContractEvent {
	/// Decode the arguments of `event`.
	///
	/// Returns None for events the node does not react to.
	pub fn decode(event: &Event) -> Result<Option<ContractEvent>> {
		let args = event.args();
		let payload: ContractEvent = match event.name.as_str() {
			"TokenNetworkCreated" => TokenNetworkCreated {
				token_address: args.address("token_address")?,
				token_network_address: args.address("token_network_address")?,
			}
			.into(),
			"ChannelOpened" => ChannelOpened {
				channel_identifier: args.uint("channel_identifier")?,
				participant1: args.address("participant1")?,
				participant2: args.address("participant2")?,
				settle_timeout: args.optional_block_count("settle_timeout")?,
			}
			.into(),
			"ChannelNewDeposit" => ChannelNewDeposit {
				channel_identifier: args.uint("channel_identifier")?,
				participant: args.address("participant")?,
				total_deposit: args.uint("total_deposit")?,
			}
			.into(),
			"ChannelWithdraw" => ChannelWithdraw {
				channel_identifier: args.uint("channel_identifier")?,
				participant: args.address("participant")?,
				total_withdraw: args.uint("total_withdraw")?,
			}
			.into(),
			"ChannelClosed" => ChannelClosed {
				channel_identifier: args.uint("channel_identifier")?,
				closing_participant: args.address("closing_participant")?,
			}
			.into(),
			"NonClosingBalanceProofUpdated" => NonClosingBalanceProofUpdated {
				channel_identifier: args.uint("channel_identifier")?,
				closing_participant: args.address("closing_participant")?,
				nonce: args.uint("nonce")?,
			}
			.into(),
			"ChannelSettled" => ChannelSettled {
				channel_identifier: args.uint("channel_identifier")?,
				participant1: args.address("participant1")?,
				participant1_amount: args.uint("participant1_amount")?,
				participant1_locksroot: args.bytes32("participant1_locksroot")?,
				participant2: args.address("participant2")?,
				participant2_amount: args.uint("participant2_amount")?,
				participant2_locksroot: args.bytes32("participant2_locksroot")?,
			}
			.into(),
			"ChannelUnlocked" => ChannelUnlocked {
				channel_identifier: args.optional_uint("channel_identifier")?,
				receiver: args.address("receiver")?,
				sender: args.address("sender")?,
				locksroot: args.bytes32("locksroot")?,
				unlocked_amount: args.uint("unlocked_amount")?,
				returned_tokens: args.uint("returned_tokens")?,
			}
			.into(),
			"SecretRevealed" => SecretRevealed {
				secrethash: args.bytes32("secrethash")?,
				secret: Bytes(args.bytes32("secret")?.as_bytes().to_vec()),
			}
			.into(),
			_ => return Ok(None),
		};
		Ok(Some(payload))
	}

	pub fn name(&self) -> &'static str {
		match self {
			ContractEvent::TokenNetworkCreated(_) => "TokenNetworkCreated",
			ContractEvent::ChannelOpened(_) => "ChannelOpened",
			ContractEvent::ChannelNewDeposit(_) => "ChannelNewDeposit",
			ContractEvent::ChannelWithdraw(_) => "ChannelWithdraw",
			ContractEvent::ChannelClosed(_) => "ChannelClosed",
			ContractEvent::NonClosingBalanceProofUpdated(_) => "NonClosingBalanceProofUpdated",
			ContractEvent::ChannelSettled(_) => "ChannelSettled",
			ContractEvent::ChannelUnlocked(_) => "ChannelUnlocked",
			ContractEvent::SecretRevealed(_) => "SecretRevealed",
		}
	}
}

/// A confirmed contract event with its decoded arguments.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlockchainEvent {
	/// Address of the emitting contract.
	pub address: Address,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub transaction_hash: TransactionHash,
	pub payload: ContractEvent,
}

impl BlockchainEvent {
	/// Decode a raw event.
	///
	/// Returns None if the event is unknown.
	pub fn from_event(event: Event) -> Result<Option<BlockchainEvent>> {
		let payload = match ContractEvent::decode(&event)? {
			Some(payload) => payload,
			None => return Ok(None),
		};
		Ok(Some(BlockchainEvent {
			address: event.address,
			block_number: event.block_number,
			block_hash: event.block_hash,
			transaction_hash: event.transaction_hash,
			payload,
		}))
	}
}
