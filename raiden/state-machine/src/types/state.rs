use std::collections::HashMap;

use raiden_primitives::{
	constants::LOCKSROOT_OF_NO_LOCKS,
	types::{
		Address,
		BalanceHash,
		BlockExpiration,
		BlockHash,
		BlockNumber,
		CanonicalIdentifier,
		ChainID,
		ChannelIdentifier,
		FeeAmount,
		LockedAmount,
		Locksroot,
		MessageHash,
		MessageIdentifier,
		Nonce,
		PaymentIdentifier,
		ProportionalFeeAmount,
		RevealTimeout,
		SecretHash,
		SettleTimeout,
		Signature,
		TokenAddress,
		TokenAmount,
		TokenNetworkAddress,
		TokenNetworkRegistryAddress,
		U256,
	},
};
use serde::{
	Deserialize,
	Serialize,
};

use crate::{
	constants::{
		DEFAULT_MEDIATION_FLAT_FEE,
		DEFAULT_MEDIATION_PROPORTIONAL_FEE,
		DEFAULT_MEDIATION_PROPORTIONAL_IMBALANCE_FEE,
	},
	errors::StateTransitionError,
	types::TransactionExecutionStatus,
};

/// The node's view of the chain at a given block.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct ChainState {
	pub chain_id: ChainID,
	pub block_number: BlockNumber,
	pub block_hash: BlockHash,
	pub our_address: Address,
	pub identifiers_to_tokennetworkregistries: HashMap<Address, TokenNetworkRegistryState>,
}

impl ChainState {
	pub fn new(
		chain_id: ChainID,
		block_number: BlockNumber,
		block_hash: BlockHash,
		our_address: Address,
	) -> ChainState {
		ChainState {
			chain_id,
			block_number,
			block_hash,
			our_address,
			identifiers_to_tokennetworkregistries: HashMap::new(),
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct TokenNetworkRegistryState {
	pub address: Address,
	pub tokennetworkaddresses_to_tokennetworks: HashMap<Address, TokenNetworkState>,
	pub tokenaddresses_to_tokennetworkaddresses: HashMap<Address, Address>,
}

impl TokenNetworkRegistryState {
	pub fn new(
		address: Address,
		token_network_list: Vec<TokenNetworkState>,
	) -> TokenNetworkRegistryState {
		let mut registry_state = TokenNetworkRegistryState {
			address,
			tokennetworkaddresses_to_tokennetworks: HashMap::new(),
			tokenaddresses_to_tokennetworkaddresses: HashMap::new(),
		};
		for token_network in token_network_list.into_iter() {
			registry_state
				.tokenaddresses_to_tokennetworkaddresses
				.insert(token_network.token_address, token_network.address);
			registry_state
				.tokennetworkaddresses_to_tokennetworks
				.insert(token_network.address, token_network);
		}
		registry_state
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct TokenNetworkState {
	pub address: TokenNetworkAddress,
	pub token_address: TokenAddress,
	pub network_graph: TokenNetworkGraphState,
	pub channelidentifiers_to_channels: HashMap<ChannelIdentifier, ChannelState>,
	pub partneraddresses_to_channelidentifiers: HashMap<Address, Vec<ChannelIdentifier>>,
}

impl TokenNetworkState {
	/// A token network without any channels.
	pub fn new(address: TokenNetworkAddress, token_address: TokenAddress) -> TokenNetworkState {
		TokenNetworkState {
			address,
			token_address,
			network_graph: TokenNetworkGraphState::new(address),
			channelidentifiers_to_channels: HashMap::new(),
			partneraddresses_to_channelidentifiers: HashMap::new(),
		}
	}
}

/// Public routing knowledge about the channels of a token network.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct TokenNetworkGraphState {
	pub token_network_address: TokenNetworkAddress,
	pub channel_identifier_to_participants: HashMap<ChannelIdentifier, (Address, Address)>,
}

impl TokenNetworkGraphState {
	pub fn new(token_network_address: TokenNetworkAddress) -> Self {
		Self { token_network_address, channel_identifier_to_participants: HashMap::new() }
	}

	pub fn channel_count(&self) -> usize {
		self.channel_identifier_to_participants.len()
	}
}

/// Per-token mediation fees configured for this node.
#[derive(Default, Clone, Serialize, Deserialize, Debug, Eq, PartialEq)]
pub struct MediationFeeConfig {
	pub token_to_flat_fee: HashMap<Address, FeeAmount>,
	pub token_to_proportional_fee: HashMap<Address, ProportionalFeeAmount>,
	pub token_to_proportional_imbalance_fee: HashMap<Address, ProportionalFeeAmount>,
	pub cap_mediation_fees: bool,
}

impl MediationFeeConfig {
	pub fn get_flat_fee(&self, token_address: &Address) -> FeeAmount {
		self.token_to_flat_fee
			.get(token_address)
			.copied()
			.unwrap_or_else(|| DEFAULT_MEDIATION_FLAT_FEE.into())
	}

	pub fn get_proportional_fee(&self, token_address: &Address) -> ProportionalFeeAmount {
		self.token_to_proportional_fee
			.get(token_address)
			.copied()
			.unwrap_or_else(|| DEFAULT_MEDIATION_PROPORTIONAL_FEE.into())
	}

	pub fn get_proportional_imbalance_fee(&self, token_address: &Address) -> ProportionalFeeAmount {
		self.token_to_proportional_imbalance_fee
			.get(token_address)
			.copied()
			.unwrap_or_else(|| DEFAULT_MEDIATION_PROPORTIONAL_IMBALANCE_FEE.into())
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct ChannelState {
	pub canonical_identifier: CanonicalIdentifier,
	pub token_address: TokenAddress,
	pub token_network_registry_address: TokenNetworkRegistryAddress,
	pub reveal_timeout: RevealTimeout,
	pub settle_timeout: SettleTimeout,
	pub fee_schedule: FeeScheduleState,
	pub our_state: ChannelEndState,
	pub partner_state: ChannelEndState,
	pub open_transaction: TransactionExecutionStatus,
	pub close_transaction: Option<TransactionExecutionStatus>,
	pub settle_transaction: Option<TransactionExecutionStatus>,
	pub update_transaction: Option<TransactionExecutionStatus>,
}

impl ChannelState {
	/// Construct a freshly opened channel where neither side has deposited yet.
	#[allow(clippy::too_many_arguments)]
	pub fn new(
		canonical_identifier: CanonicalIdentifier,
		token_address: TokenAddress,
		token_network_registry_address: TokenNetworkRegistryAddress,
		our_address: Address,
		partner_address: Address,
		reveal_timeout: RevealTimeout,
		settle_timeout: SettleTimeout,
		open_transaction: TransactionExecutionStatus,
		fee_config: &MediationFeeConfig,
	) -> Result<ChannelState, StateTransitionError> {
		if reveal_timeout >= settle_timeout {
			return Err(StateTransitionError {
				msg: format!(
					"reveal_timeout({}) must be smaller than settle_timeout({})",
					reveal_timeout, settle_timeout,
				),
			})
		}

		Ok(ChannelState {
			fee_schedule: FeeScheduleState::from_mediation_config(fee_config, &token_address),
			canonical_identifier,
			token_address,
			token_network_registry_address,
			reveal_timeout,
			settle_timeout,
			our_state: ChannelEndState::new(our_address),
			partner_state: ChannelEndState::new(partner_address),
			open_transaction,
			close_transaction: None,
			settle_transaction: None,
			update_transaction: None,
		})
	}

	/// Returns the end state of `address` if it is one of the channel's participants.
	pub fn participant_state(&self, address: Address) -> Option<&ChannelEndState> {
		if self.our_state.address == address {
			Some(&self.our_state)
		} else if self.partner_state.address == address {
			Some(&self.partner_state)
		} else {
			None
		}
	}

	pub fn our_total_deposit(&self) -> TokenAmount {
		self.our_state.contract_balance
	}

	pub fn partner_total_deposit(&self) -> TokenAmount {
		self.partner_state.contract_balance
	}
}

#[derive(Default, Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct ChannelEndState {
	pub address: Address,
	pub contract_balance: TokenAmount,
	pub onchain_total_withdraw: TokenAmount,
	pub balance_proof: Option<BalanceProofState>,
	pub onchain_locksroot: Locksroot,
	pub nonce: Nonce,
}

impl ChannelEndState {
	pub fn new(address: Address) -> Self {
		Self {
			address,
			contract_balance: TokenAmount::zero(),
			onchain_total_withdraw: TokenAmount::zero(),
			balance_proof: None,
			onchain_locksroot: *LOCKSROOT_OF_NO_LOCKS,
			nonce: Nonce::zero(),
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct BalanceProofState {
	pub nonce: Nonce,
	pub transferred_amount: TokenAmount,
	pub locked_amount: LockedAmount,
	pub locksroot: Locksroot,
	pub canonical_identifier: CanonicalIdentifier,
	pub balance_hash: BalanceHash,
	pub message_hash: Option<MessageHash>,
	pub signature: Option<Signature>,
	pub sender: Option<Address>,
}

#[derive(Default, Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct HashTimeLockState {
	pub amount: TokenAmount,
	pub expiration: BlockExpiration,
	pub secrethash: SecretHash,
}

/// Mediation fees a node charges on a channel.
///
/// The imbalance penalty curve is computed by the fee subsystem and only carried here.
#[derive(Serialize, Deserialize, Clone, Default, Debug, Eq, PartialEq)]
pub struct FeeScheduleState {
	pub cap_fees: bool,
	pub flat: U256,
	pub proportional: U256,
	pub imbalance_penalty: Option<Vec<(U256, U256)>>,
}

impl FeeScheduleState {
	pub fn from_mediation_config(fee_config: &MediationFeeConfig, token_address: &TokenAddress) -> Self {
		Self {
			cap_fees: fee_config.cap_mediation_fees,
			flat: fee_config.get_flat_fee(token_address),
			proportional: fee_config.get_proportional_fee(token_address),
			imbalance_penalty: None,
		}
	}
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct TransactionChannelDeposit {
	pub participant_address: Address,
	pub contract_balance: TokenAmount,
	pub deposit_block_number: BlockNumber,
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct HopState {
	pub node_address: Address,
	pub channel_identifier: ChannelIdentifier,
}

#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
pub struct LockedTransferState {
	pub payment_identifier: PaymentIdentifier,
	pub token: TokenAddress,
	pub lock: HashTimeLockState,
	pub initiator: Address,
	pub target: Address,
	pub message_identifier: MessageIdentifier,
	pub balance_proof: BalanceProofState,
}
