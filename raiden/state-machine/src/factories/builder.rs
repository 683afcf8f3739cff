use raiden_primitives::types::{
	Address,
	BlockHash,
	BlockNumber,
	CanonicalIdentifier,
	ChainID,
	ChannelIdentifier,
	RevealTimeout,
	SettleTimeout,
	TokenAmount,
};

use super::Keyring;
use crate::{
	constants::{
		DEFAULT_REVEAL_TIMEOUT,
		DEFAULT_SETTLE_TIMEOUT,
	},
	types::{
		ChainState,
		ChannelState,
		MediationFeeConfig,
		TokenNetworkRegistryState,
		TokenNetworkState,
		TransactionExecutionStatus,
	},
};

pub struct ChainStateInfo {
	pub chain_state: ChainState,
	pub token_network_registry_address: Address,
	pub token_network_address: Address,
	pub token_address: Address,
	pub canonical_identifiers: Vec<CanonicalIdentifier>,
}

/// Builds the chain state of Alice.
pub struct ChainStateBuilder {
	chain_state: ChainState,
	token_network_registry_address: Address,
	token_network_address: Address,
	token_address: Address,
	canonical_identifiers: Vec<CanonicalIdentifier>,
}

impl ChainStateBuilder {
	pub fn new() -> Self {
		Self {
			chain_state: ChainState::new(
				ChainID::Goerli,
				BlockNumber::from(1u64),
				BlockHash::zero(),
				Keyring::Alice.address(),
			),
			token_network_registry_address: Address::random(),
			token_network_address: Address::random(),
			token_address: Address::random(),
			canonical_identifiers: vec![],
		}
	}

	/// Adds the registry with a single token network.
	pub fn with_token_network(mut self) -> Self {
		let token_network = TokenNetworkState::new(self.token_network_address, self.token_address);
		self.chain_state.identifiers_to_tokennetworkregistries.insert(
			self.token_network_registry_address,
			TokenNetworkRegistryState::new(self.token_network_registry_address, vec![token_network]),
		);
		self
	}

	/// Adds channels of Alice with `(partner, our_deposit, partner_deposit)`.
	pub fn with_channels(mut self, channels: Vec<(Address, TokenAmount, TokenAmount)>) -> Self {
		let our_address = self.chain_state.our_address;
		let chain_identifier = self.chain_state.chain_id;
		let token_network = self
			.chain_state
			.identifiers_to_tokennetworkregistries
			.get_mut(&self.token_network_registry_address)
			.and_then(|registry| {
				registry.tokennetworkaddresses_to_tokennetworks.get_mut(&self.token_network_address)
			})
			.expect("Token network should be added first");

		for (partner_address, our_deposit, partner_deposit) in channels {
			let channel_identifier =
				ChannelIdentifier::from(token_network.channelidentifiers_to_channels.len() as u64 + 1);
			let canonical_identifier = CanonicalIdentifier {
				chain_identifier,
				token_network_address: self.token_network_address,
				channel_identifier,
			};
			let mut channel_state = ChannelState::new(
				canonical_identifier.clone(),
				self.token_address,
				self.token_network_registry_address,
				our_address,
				partner_address,
				RevealTimeout::from(DEFAULT_REVEAL_TIMEOUT),
				SettleTimeout::from(DEFAULT_SETTLE_TIMEOUT),
				TransactionExecutionStatus::succeeded_at(BlockNumber::from(1u64)),
				&MediationFeeConfig::default(),
			)
			.expect("Channel state should be valid");
			channel_state.our_state.contract_balance = our_deposit;
			channel_state.partner_state.contract_balance = partner_deposit;

			token_network.channelidentifiers_to_channels.insert(channel_identifier, channel_state);
			token_network
				.partneraddresses_to_channelidentifiers
				.entry(partner_address)
				.or_insert_with(Vec::new)
				.push(channel_identifier);
			token_network
				.network_graph
				.channel_identifier_to_participants
				.insert(channel_identifier, (our_address, partner_address));
			self.canonical_identifiers.push(canonical_identifier);
		}
		self
	}

	pub fn build(self) -> ChainStateInfo {
		ChainStateInfo {
			chain_state: self.chain_state,
			token_network_registry_address: self.token_network_registry_address,
			token_network_address: self.token_network_address,
			token_address: self.token_address,
			canonical_identifiers: self.canonical_identifiers,
		}
	}
}

impl Default for ChainStateBuilder {
	fn default() -> Self {
		Self::new()
	}
}
