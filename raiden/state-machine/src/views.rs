#![warn(clippy::missing_docs_in_private_items)]

use raiden_primitives::types::{
	Address,
	CanonicalIdentifier,
	ChannelIdentifier,
	TokenNetworkAddress,
};

use crate::types::{
	ChainState,
	ChannelState,
	TokenNetworkRegistryState,
	TokenNetworkState,
};

/// Returns token network registry by token network address if found.
pub fn get_token_network_registry_by_token_network_address(
	chain_state: &ChainState,
	token_network_address: TokenNetworkAddress,
) -> Option<&TokenNetworkRegistryState> {
	chain_state
		.identifiers_to_tokennetworkregistries
		.values()
		.find(|tnr| tnr.tokennetworkaddresses_to_tokennetworks.contains_key(&token_network_address))
}

/// Returns token network by address if found
pub fn get_token_network_by_address(
	chain_state: &ChainState,
	token_network_address: TokenNetworkAddress,
) -> Option<&TokenNetworkState> {
	chain_state
		.identifiers_to_tokennetworkregistries
		.values()
		.find_map(|tnr| tnr.tokennetworkaddresses_to_tokennetworks.get(&token_network_address))
}

/// Returns all channel states.
pub fn get_channels(chain_state: &ChainState) -> Vec<ChannelState> {
	let mut channels = vec![];

	for token_network_registry in chain_state.identifiers_to_tokennetworkregistries.values() {
		for token_network in token_network_registry.tokennetworkaddresses_to_tokennetworks.values()
		{
			channels.extend(token_network.channelidentifiers_to_channels.values().cloned());
		}
	}

	channels
}

/// Returns channel state by token network address and channel identifier if found.
///
/// Exact match only: an unknown token network and an unknown channel both yield `None`.
pub fn get_channel_by_token_network_and_identifier(
	chain_state: &ChainState,
	token_network_address: TokenNetworkAddress,
	channel_identifier: ChannelIdentifier,
) -> Option<&ChannelState> {
	get_token_network_by_address(chain_state, token_network_address)?
		.channelidentifiers_to_channels
		.get(&channel_identifier)
}

/// Returns channel state by canonical identifier if found.
pub fn get_channel_by_canonical_identifier<'a>(
	chain_state: &'a ChainState,
	canonical_identifier: &CanonicalIdentifier,
) -> Option<&'a ChannelState> {
	if canonical_identifier.chain_identifier != chain_state.chain_id {
		return None
	}
	get_channel_by_token_network_and_identifier(
		chain_state,
		canonical_identifier.token_network_address,
		canonical_identifier.channel_identifier,
	)
}

/// Returns the identifiers of every channel, open or not, shared with `partner_address`.
pub fn get_channel_identifiers_by_partner(
	chain_state: &ChainState,
	token_network_address: TokenNetworkAddress,
	partner_address: Address,
) -> Vec<ChannelIdentifier> {
	get_token_network_by_address(chain_state, token_network_address)
		.and_then(|tn| tn.partneraddresses_to_channelidentifiers.get(&partner_address))
		.cloned()
		.unwrap_or_default()
}
