use std::sync::Mutex;

use ethabi::Token;
use raiden_primitives::{
	hashing::hash_balance_data,
	types::{
		Address,
		BlockHash,
		BlockNumber,
		CanonicalIdentifier,
		Locksroot,
		Nonce,
		TokenAmount,
		TransactionHash,
		U256,
	},
};
pub use raiden_state_machine::factories::{
	ChainStateBuilder,
	Generator,
	Keyring,
};
use raiden_state_machine::{
	storage::types::{
		StorageError,
		StorageID,
	},
	types::BalanceProofState,
};
use ulid::Ulid;

use crate::{
	events::Event,
	history::{
		BalanceProofHistory,
		HistoricalBalanceProof,
	},
};

pub fn make_balance_proof(
	canonical_identifier: CanonicalIdentifier,
	locksroot: Locksroot,
	sender: Address,
	nonce: u64,
) -> BalanceProofState {
	let transferred_amount = TokenAmount::from(nonce * 10);
	let locked_amount = TokenAmount::from(5u64);
	BalanceProofState {
		nonce: Nonce::from(nonce),
		transferred_amount,
		locked_amount,
		locksroot,
		balance_hash: hash_balance_data(transferred_amount, locked_amount, locksroot)
			.expect("Should generate balance hash"),
		canonical_identifier,
		message_hash: None,
		signature: None,
		sender: Some(sender),
	}
}

/// A raw event as handed over by the event source.
pub fn make_event(name: &str, address: Address, args: Vec<(&str, Token)>) -> Event {
	Event {
		name: name.to_owned(),
		address,
		block_number: BlockNumber::from(100u64),
		block_hash: BlockHash::random(),
		transaction_hash: TransactionHash::random(),
		data: args.into_iter().map(|(name, value)| (name.to_owned(), value)).collect(),
	}
}

pub fn uint(value: u64) -> Token {
	Token::Uint(U256::from(value))
}

pub fn bytes32(value: Locksroot) -> Token {
	Token::FixedBytes(value.as_bytes().to_vec())
}

pub fn token_network_created_event(
	registry_address: Address,
	token_address: Address,
	token_network_address: Address,
) -> Event {
	make_event(
		"TokenNetworkCreated",
		registry_address,
		vec![
			("token_address", Token::Address(token_address)),
			("token_network_address", Token::Address(token_network_address)),
		],
	)
}

pub fn channel_opened_event(
	token_network_address: Address,
	channel_identifier: u64,
	participant1: Address,
	participant2: Address,
	settle_timeout: u64,
) -> Event {
	make_event(
		"ChannelOpened",
		token_network_address,
		vec![
			("channel_identifier", uint(channel_identifier)),
			("participant1", Token::Address(participant1)),
			("participant2", Token::Address(participant2)),
			("settle_timeout", uint(settle_timeout)),
		],
	)
}

pub fn channel_deposit_event(
	token_network_address: Address,
	channel_identifier: u64,
	participant: Address,
	total_deposit: u64,
) -> Event {
	make_event(
		"ChannelNewDeposit",
		token_network_address,
		vec![
			("channel_identifier", uint(channel_identifier)),
			("participant", Token::Address(participant)),
			("total_deposit", uint(total_deposit)),
		],
	)
}

pub fn channel_withdraw_event(
	token_network_address: Address,
	channel_identifier: u64,
	participant: Address,
	total_withdraw: u64,
) -> Event {
	make_event(
		"ChannelWithdraw",
		token_network_address,
		vec![
			("channel_identifier", uint(channel_identifier)),
			("participant", Token::Address(participant)),
			("total_withdraw", uint(total_withdraw)),
		],
	)
}

pub fn channel_closed_event(
	token_network_address: Address,
	channel_identifier: u64,
	closing_participant: Address,
) -> Event {
	make_event(
		"ChannelClosed",
		token_network_address,
		vec![
			("channel_identifier", uint(channel_identifier)),
			("closing_participant", Token::Address(closing_participant)),
			("nonce", uint(3)),
			("balance_hash", bytes32(Generator::random_locksroot())),
		],
	)
}

pub fn update_transfer_event(
	token_network_address: Address,
	channel_identifier: u64,
	closing_participant: Address,
	nonce: u64,
) -> Event {
	make_event(
		"NonClosingBalanceProofUpdated",
		token_network_address,
		vec![
			("channel_identifier", uint(channel_identifier)),
			("closing_participant", Token::Address(closing_participant)),
			("nonce", uint(nonce)),
			("balance_hash", bytes32(Generator::random_locksroot())),
		],
	)
}

pub fn channel_settled_event(
	token_network_address: Address,
	channel_identifier: u64,
	participant1: (Address, u64, Locksroot),
	participant2: (Address, u64, Locksroot),
) -> Event {
	make_event(
		"ChannelSettled",
		token_network_address,
		vec![
			("channel_identifier", uint(channel_identifier)),
			("participant1", Token::Address(participant1.0)),
			("participant1_amount", uint(participant1.1)),
			("participant1_locksroot", bytes32(participant1.2)),
			("participant2", Token::Address(participant2.0)),
			("participant2_amount", uint(participant2.1)),
			("participant2_locksroot", bytes32(participant2.2)),
		],
	)
}

pub fn channel_unlocked_event(
	token_network_address: Address,
	channel_identifier: Option<u64>,
	receiver: Address,
	sender: Address,
	locksroot: Locksroot,
) -> Event {
	let mut args = vec![
		("receiver", Token::Address(receiver)),
		("sender", Token::Address(sender)),
		("locksroot", bytes32(locksroot)),
		("unlocked_amount", uint(5)),
		("returned_tokens", uint(0)),
	];
	if let Some(channel_identifier) = channel_identifier {
		args.push(("channel_identifier", uint(channel_identifier)));
	}
	make_event("ChannelUnlocked", token_network_address, args)
}

/// Balance proof history kept in memory. The last matching entry is the most recent.
#[derive(Default)]
pub struct MemoryHistory {
	received: Vec<HistoricalBalanceProof>,
	sent: Vec<HistoricalBalanceProof>,
	lookups: Mutex<usize>,
}

impl MemoryHistory {
	pub fn with_received(mut self, balance_proof: BalanceProofState) -> Self {
		self.received.push((StorageID::from(Ulid::new()), balance_proof));
		self
	}

	pub fn with_sent(mut self, balance_proof: BalanceProofState) -> Self {
		self.sent.push((StorageID::from(Ulid::new()), balance_proof));
		self
	}

	pub fn lookups(&self) -> usize {
		*self.lookups.lock().expect("Lock should not be poisoned")
	}

	fn find(
		&self,
		proofs: &[HistoricalBalanceProof],
		canonical_identifier: &CanonicalIdentifier,
		locksroot: Locksroot,
	) -> Option<HistoricalBalanceProof> {
		*self.lookups.lock().expect("Lock should not be poisoned") += 1;
		proofs
			.iter()
			.rev()
			.find(|(_, balance_proof)| {
				&balance_proof.canonical_identifier == canonical_identifier &&
					balance_proof.locksroot == locksroot
			})
			.cloned()
	}
}

impl BalanceProofHistory for MemoryHistory {
	fn find_received_balance_proof(
		&self,
		canonical_identifier: &CanonicalIdentifier,
		locksroot: Locksroot,
	) -> Result<Option<HistoricalBalanceProof>, StorageError> {
		Ok(self.find(&self.received, canonical_identifier, locksroot))
	}

	fn find_sent_balance_proof(
		&self,
		canonical_identifier: &CanonicalIdentifier,
		locksroot: Locksroot,
	) -> Result<Option<HistoricalBalanceProof>, StorageError> {
		Ok(self.find(&self.sent, canonical_identifier, locksroot))
	}
}

/// History whose backing store is unavailable.
pub struct FailingHistory;

impl BalanceProofHistory for FailingHistory {
	fn find_received_balance_proof(
		&self,
		_canonical_identifier: &CanonicalIdentifier,
		_locksroot: Locksroot,
	) -> Result<Option<HistoricalBalanceProof>, StorageError> {
		Err(StorageError::Other("database is closed"))
	}

	fn find_sent_balance_proof(
		&self,
		_canonical_identifier: &CanonicalIdentifier,
		_locksroot: Locksroot,
	) -> Result<Option<HistoricalBalanceProof>, StorageError> {
		Err(StorageError::Other("database is closed"))
	}
}
