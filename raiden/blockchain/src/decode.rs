use derive_more::From;
use raiden_primitives::types::{
	Address,
	CanonicalIdentifier,
	ChannelIdentifier,
};
use raiden_state_machine::{
	types::{
		ChainState,
		ChannelState,
		ContractReceiveChannelBatchUnlock,
		ContractReceiveChannelClosed,
		ContractReceiveChannelDeposit,
		ContractReceiveChannelOpened,
		ContractReceiveChannelSettled,
		ContractReceiveChannelWithdraw,
		ContractReceiveRouteClosed,
		ContractReceiveRouteNew,
		ContractReceiveSecretReveal,
		ContractReceiveTokenNetworkCreated,
		ContractReceiveUpdateTransfer,
		FeeScheduleState,
		StateChange,
		TokenNetworkState,
		TransactionChannelDeposit,
		TransactionExecutionStatus,
	},
	views,
};
use tracing::{
	debug,
	trace,
	warn,
};

use crate::{
	config::DecoderConfig,
	errors::{
		DecodeError,
		Result,
	},
	events::{
		BlockchainEvent,
		ChannelClosed,
		ChannelNewDeposit,
		ChannelOpened,
		ChannelSettled,
		ChannelUnlocked,
		ChannelWithdraw,
		ContractEvent,
		Event,
		NonClosingBalanceProofUpdated,
		SecretRevealed,
		TokenNetworkCreated,
	},
	history::BalanceProofHistory,
};

/// A fee schedule to publish for a channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeeUpdate {
	pub canonical_identifier: CanonicalIdentifier,
	pub fee_schedule: FeeScheduleState,
}

/// Work for subsystems other than the state machine.
#[derive(Clone, Debug, From, PartialEq, Eq)]
pub enum SideEffect {
	/// Start monitoring the reachability of a new partner.
	HealthCheck(Address),
	FeeUpdate(FeeUpdate),
}

/// The translation of one blockchain event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DecodedEvent {
	pub state_change: StateChange,
	pub side_effects: Vec<SideEffect>,
}

impl DecodedEvent {
	/// A state change without side effects.
	pub fn new(state_change: impl Into<StateChange>) -> Self {
		Self { state_change: state_change.into(), side_effects: vec![] }
	}
}

/// Result of a `ChannelOpened` event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelOpenedOutcome {
	/// The node is one of the participants.
	Participant {
		state_change: ContractReceiveChannelOpened,
		health_check: Address,
		fee_update: FeeUpdate,
	},
	/// The channel is only known as an edge of the routing graph.
	Route(ContractReceiveRouteNew),
}

impl ChannelOpenedOutcome {
	/// The partner to start health checking.
	pub fn health_check(&self) -> Option<Address> {
		match self {
			ChannelOpenedOutcome::Participant { health_check, .. } => Some(*health_check),
			ChannelOpenedOutcome::Route(_) => None,
		}
	}

	/// The initial fee schedule of the new channel.
	pub fn fee_update(&self) -> Option<&FeeUpdate> {
		match self {
			ChannelOpenedOutcome::Participant { fee_update, .. } => Some(fee_update),
			ChannelOpenedOutcome::Route(_) => None,
		}
	}
}

impl From<ChannelOpenedOutcome> for DecodedEvent {
	fn from(outcome: ChannelOpenedOutcome) -> Self {
		match outcome {
			ChannelOpenedOutcome::Participant { state_change, health_check, fee_update } =>
				DecodedEvent {
					state_change: state_change.into(),
					side_effects: vec![health_check.into(), fee_update.into()],
				},
			ChannelOpenedOutcome::Route(state_change) => DecodedEvent::new(state_change),
		}
	}
}

/// Result of a `ChannelNewDeposit` event on a known channel.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChannelDepositOutcome {
	pub state_change: ContractReceiveChannelDeposit,
	/// Present when the deposit raised the participant's known balance.
	pub fee_update: Option<FeeUpdate>,
}

impl From<ChannelDepositOutcome> for DecodedEvent {
	fn from(outcome: ChannelDepositOutcome) -> Self {
		DecodedEvent {
			state_change: outcome.state_change.into(),
			side_effects: outcome.fee_update.into_iter().map(SideEffect::from).collect(),
		}
	}
}

/// Result of a `ChannelClosed` event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ChannelClosedOutcome {
	Channel(ContractReceiveChannelClosed),
	Route(ContractReceiveRouteClosed),
}

impl From<ChannelClosedOutcome> for DecodedEvent {
	fn from(outcome: ChannelClosedOutcome) -> Self {
		match outcome {
			ChannelClosedOutcome::Channel(state_change) => DecodedEvent::new(state_change),
			ChannelClosedOutcome::Route(state_change) => DecodedEvent::new(state_change),
		}
	}
}

/// Result of a `ChannelUnlocked` event.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BatchUnlockOutcome {
	/// Neither sender nor receiver is this node.
	NotParticipant,
	/// No balance proof with the unlocked locksroot was ever exchanged on the channel.
	Unresolved,
	Resolved(ContractReceiveChannelBatchUnlock),
}

/// Side of the channel which signed the unlocked balance proof.
#[derive(Clone, Copy, Debug)]
enum ProofDirection {
	/// Signed by the partner, found in the state change log.
	Received,
	/// Signed by this node, found in the event log.
	Sent,
}

/// Translates confirmed blockchain events into state changes.
///
/// Decoding only reads the chain state and the balance proof history. Events must be
/// delivered in chain order, each exactly once.
pub struct EventDecoder {
	/// Parameters applied to the channels of this node.
	config: DecoderConfig,
}

impl EventDecoder {
	pub fn new(config: DecoderConfig) -> Self {
		Self { config }
	}

	/// Decode a raw event and translate it.
	///
	/// Returns None if the event is unknown or has no effect on the node.
	pub fn as_state_change<H>(
		&self,
		event: Event,
		chain_state: &ChainState,
		history: &H,
	) -> Result<Option<DecodedEvent>>
	where
		H: BalanceProofHistory + ?Sized,
	{
		let name = event.name.clone();
		match BlockchainEvent::from_event(event)? {
			Some(event) => self.decode(event, chain_state, history),
			None => {
				debug!(message = "Dropping unknown event", event = name.as_str());
				Ok(None)
			},
		}
	}

	/// Translate a decoded event.
	pub fn decode<H>(
		&self,
		event: BlockchainEvent,
		chain_state: &ChainState,
		history: &H,
	) -> Result<Option<DecodedEvent>>
	where
		H: BalanceProofHistory + ?Sized,
	{
		trace!(
			message = "Decoding blockchain event",
			event = event.payload.name(),
			block_number = %event.block_number,
		);

		let decoded = match &event.payload {
			ContractEvent::TokenNetworkCreated(payload) =>
				Some(DecodedEvent::new(self.token_network_created(&event, payload))),
			ContractEvent::ChannelOpened(payload) =>
				Some(self.channel_opened(chain_state, &event, payload)?.into()),
			ContractEvent::ChannelNewDeposit(payload) =>
				self.channel_deposit(chain_state, &event, payload).map(DecodedEvent::from),
			ContractEvent::ChannelWithdraw(payload) =>
				self.channel_withdraw(chain_state, &event, payload).map(DecodedEvent::new),
			ContractEvent::ChannelClosed(payload) =>
				Some(self.channel_closed(chain_state, &event, payload).into()),
			ContractEvent::NonClosingBalanceProofUpdated(payload) =>
				self.update_transfer(chain_state, &event, payload).map(DecodedEvent::new),
			ContractEvent::ChannelSettled(payload) =>
				self.channel_settled(chain_state, &event, payload).map(DecodedEvent::new),
			ContractEvent::ChannelUnlocked(payload) =>
				match self.channel_unlocked(chain_state, &event, payload, history)? {
					BatchUnlockOutcome::Resolved(state_change) => Some(DecodedEvent::new(state_change)),
					BatchUnlockOutcome::Unresolved => {
						warn!(
							message = "Unlock does not match any known balance proof",
							token_network_address = ?event.address,
							locksroot = ?payload.locksroot,
							block_number = %event.block_number,
						);
						None
					},
					BatchUnlockOutcome::NotParticipant => None,
				},
			ContractEvent::SecretRevealed(payload) =>
				Some(DecodedEvent::new(self.secret_revealed(&event, payload))),
		};

		if decoded.is_none() {
			debug!(message = "Event has no effect on the node", event = event.payload.name());
		}

		Ok(decoded)
	}

	pub fn token_network_created(
		&self,
		event: &BlockchainEvent,
		payload: &TokenNetworkCreated,
	) -> ContractReceiveTokenNetworkCreated {
		ContractReceiveTokenNetworkCreated {
			transaction_hash: Some(event.transaction_hash),
			token_network_registry_address: event.address,
			token_network: TokenNetworkState::new(
				payload.token_network_address,
				payload.token_address,
			),
			block_number: event.block_number,
			block_hash: event.block_hash,
		}
	}

	/// Classify a new channel by whether this node is one of its participants.
	///
	/// Fails if the node participates in a channel of a token network it does not know, or
	/// if such an event carries no settle timeout.
	pub fn channel_opened(
		&self,
		chain_state: &ChainState,
		event: &BlockchainEvent,
		payload: &ChannelOpened,
	) -> Result<ChannelOpenedOutcome> {
		let our_address = chain_state.our_address;
		let canonical_identifier =
			canonical_identifier(chain_state, event, payload.channel_identifier);

		let partner_address = if payload.participant1 == our_address {
			payload.participant2
		} else if payload.participant2 == our_address {
			payload.participant1
		} else {
			return Ok(ChannelOpenedOutcome::Route(ContractReceiveRouteNew {
				transaction_hash: Some(event.transaction_hash),
				block_number: event.block_number,
				block_hash: event.block_hash,
				canonical_identifier,
				participant1: payload.participant1,
				participant2: payload.participant2,
			}))
		};

		let token_network_address = event.address;
		let token_network_registry = views::get_token_network_registry_by_token_network_address(
			chain_state,
			token_network_address,
		)
		.ok_or(DecodeError::UnknownTokenNetwork(token_network_address))?;
		let token_network = token_network_registry
			.tokennetworkaddresses_to_tokennetworks
			.get(&token_network_address)
			.ok_or(DecodeError::UnknownTokenNetwork(token_network_address))?;
		let settle_timeout =
			payload.settle_timeout.ok_or_else(|| DecodeError::MissingArgument {
				event: event.payload.name().to_owned(),
				argument: "settle_timeout",
			})?;

		let channel_state = ChannelState::new(
			canonical_identifier,
			token_network.token_address,
			token_network_registry.address,
			our_address,
			partner_address,
			self.config.reveal_timeout,
			settle_timeout,
			TransactionExecutionStatus::succeeded_at(event.block_number),
			&self.config.mediation_config,
		)?;

		let fee_update = FeeUpdate {
			canonical_identifier: channel_state.canonical_identifier.clone(),
			fee_schedule: channel_state.fee_schedule.clone(),
		};

		Ok(ChannelOpenedOutcome::Participant {
			state_change: ContractReceiveChannelOpened {
				transaction_hash: Some(event.transaction_hash),
				block_number: event.block_number,
				block_hash: event.block_hash,
				channel_state,
			},
			health_check: partner_address,
			fee_update,
		})
	}

	/// A deposit into a channel of this node. None for channels the node does not track.
	pub fn channel_deposit(
		&self,
		chain_state: &ChainState,
		event: &BlockchainEvent,
		payload: &ChannelNewDeposit,
	) -> Option<ChannelDepositOutcome> {
		let channel_state = views::get_channel_by_token_network_and_identifier(
			chain_state,
			event.address,
			payload.channel_identifier,
		)?;

		let fee_update = match channel_state.participant_state(payload.participant) {
			Some(end_state) if payload.total_deposit > end_state.contract_balance =>
				Some(FeeUpdate {
					canonical_identifier: channel_state.canonical_identifier.clone(),
					fee_schedule: channel_state.fee_schedule.clone(),
				}),
			_ => None,
		};

		Some(ChannelDepositOutcome {
			state_change: ContractReceiveChannelDeposit {
				transaction_hash: Some(event.transaction_hash),
				block_number: event.block_number,
				block_hash: event.block_hash,
				canonical_identifier: channel_state.canonical_identifier.clone(),
				deposit_transaction: TransactionChannelDeposit {
					participant_address: payload.participant,
					contract_balance: payload.total_deposit,
					deposit_block_number: event.block_number,
				},
				fee_config: self.config.mediation_config.clone(),
			},
			fee_update,
		})
	}

	pub fn channel_withdraw(
		&self,
		chain_state: &ChainState,
		event: &BlockchainEvent,
		payload: &ChannelWithdraw,
	) -> Option<ContractReceiveChannelWithdraw> {
		let channel_state = views::get_channel_by_token_network_and_identifier(
			chain_state,
			event.address,
			payload.channel_identifier,
		)?;

		Some(ContractReceiveChannelWithdraw {
			transaction_hash: Some(event.transaction_hash),
			block_number: event.block_number,
			block_hash: event.block_hash,
			canonical_identifier: channel_state.canonical_identifier.clone(),
			participant: payload.participant,
			total_withdraw: payload.total_withdraw,
			fee_config: self.config.mediation_config.clone(),
		})
	}

	/// Every close results in a state change: a channel close for tracked channels, a route
	/// close otherwise.
	pub fn channel_closed(
		&self,
		chain_state: &ChainState,
		event: &BlockchainEvent,
		payload: &ChannelClosed,
	) -> ChannelClosedOutcome {
		match views::get_channel_by_token_network_and_identifier(
			chain_state,
			event.address,
			payload.channel_identifier,
		) {
			Some(channel_state) => ChannelClosedOutcome::Channel(ContractReceiveChannelClosed {
				transaction_hash: Some(event.transaction_hash),
				block_number: event.block_number,
				block_hash: event.block_hash,
				transaction_from: payload.closing_participant,
				canonical_identifier: channel_state.canonical_identifier.clone(),
			}),
			None => ChannelClosedOutcome::Route(ContractReceiveRouteClosed {
				transaction_hash: Some(event.transaction_hash),
				block_number: event.block_number,
				block_hash: event.block_hash,
				canonical_identifier: canonical_identifier(
					chain_state,
					event,
					payload.channel_identifier,
				),
			}),
		}
	}

	pub fn update_transfer(
		&self,
		chain_state: &ChainState,
		event: &BlockchainEvent,
		payload: &NonClosingBalanceProofUpdated,
	) -> Option<ContractReceiveUpdateTransfer> {
		let channel_state = views::get_channel_by_token_network_and_identifier(
			chain_state,
			event.address,
			payload.channel_identifier,
		)?;

		Some(ContractReceiveUpdateTransfer {
			transaction_hash: Some(event.transaction_hash),
			block_number: event.block_number,
			block_hash: event.block_hash,
			canonical_identifier: channel_state.canonical_identifier.clone(),
			nonce: payload.nonce,
		})
	}

	/// Settlement amounts of a channel of this node, mapped to our and the partner's side.
	pub fn channel_settled(
		&self,
		chain_state: &ChainState,
		event: &BlockchainEvent,
		payload: &ChannelSettled,
	) -> Option<ContractReceiveChannelSettled> {
		let channel_state = views::get_channel_by_token_network_and_identifier(
			chain_state,
			event.address,
			payload.channel_identifier,
		)?;

		let our_address = channel_state.our_state.address;
		let (our_side, partner_side) = if payload.participant1 == our_address {
			(
				(payload.participant1_locksroot, payload.participant1_amount),
				(payload.participant2_locksroot, payload.participant2_amount),
			)
		} else if payload.participant2 == our_address {
			(
				(payload.participant2_locksroot, payload.participant2_amount),
				(payload.participant1_locksroot, payload.participant1_amount),
			)
		} else {
			return None
		};

		Some(ContractReceiveChannelSettled {
			transaction_hash: Some(event.transaction_hash),
			block_number: event.block_number,
			block_hash: event.block_hash,
			canonical_identifier: channel_state.canonical_identifier.clone(),
			our_onchain_locksroot: our_side.0,
			partner_onchain_locksroot: partner_side.0,
			our_transferred_amount: our_side.1,
			partner_transferred_amount: partner_side.1,
		})
	}

	/// Attribute an on-chain unlock to the balance proof which locked the tokens.
	///
	/// The proof is searched by locksroot, in the received history when this node is the
	/// receiver and in the sent history when it is the sender. Without an explicit channel
	/// identifier every channel shared with the partner is searched, newest first.
	pub fn channel_unlocked<H>(
		&self,
		chain_state: &ChainState,
		event: &BlockchainEvent,
		payload: &ChannelUnlocked,
		history: &H,
	) -> Result<BatchUnlockOutcome>
	where
		H: BalanceProofHistory + ?Sized,
	{
		let our_address = chain_state.our_address;
		let (direction, partner_address) = if payload.receiver == our_address {
			(ProofDirection::Received, payload.sender)
		} else if payload.sender == our_address {
			(ProofDirection::Sent, payload.receiver)
		} else {
			return Ok(BatchUnlockOutcome::NotParticipant)
		};

		let channel_identifiers = match payload.channel_identifier {
			Some(channel_identifier) => vec![channel_identifier],
			None => views::get_channel_identifiers_by_partner(
				chain_state,
				event.address,
				partner_address,
			),
		};

		for channel_identifier in channel_identifiers.into_iter().rev() {
			let canonical_identifier = canonical_identifier(chain_state, event, channel_identifier);
			let found = match direction {
				ProofDirection::Received =>
					history.find_received_balance_proof(&canonical_identifier, payload.locksroot)?,
				ProofDirection::Sent =>
					history.find_sent_balance_proof(&canonical_identifier, payload.locksroot)?,
			};

			if let Some((_, balance_proof)) = found {
				return Ok(BatchUnlockOutcome::Resolved(ContractReceiveChannelBatchUnlock {
					transaction_hash: Some(event.transaction_hash),
					block_number: event.block_number,
					block_hash: event.block_hash,
					canonical_identifier: balance_proof.canonical_identifier,
					receiver: payload.receiver,
					sender: payload.sender,
					participant: partner_address,
					locksroot: payload.locksroot,
					unlocked_amount: payload.unlocked_amount,
					returned_tokens: payload.returned_tokens,
				}))
			}
		}

		Ok(BatchUnlockOutcome::Unresolved)
	}

	pub fn secret_revealed(
		&self,
		event: &BlockchainEvent,
		payload: &SecretRevealed,
	) -> ContractReceiveSecretReveal {
		ContractReceiveSecretReveal {
			transaction_hash: Some(event.transaction_hash),
			block_number: event.block_number,
			block_hash: event.block_hash,
			secret_registry_address: event.address,
			secrethash: payload.secrethash,
			secret: payload.secret.clone(),
		}
	}
}

/// Identifier of a channel of the token network which emitted `event`.
fn canonical_identifier(
	chain_state: &ChainState,
	event: &BlockchainEvent,
	channel_identifier: ChannelIdentifier,
) -> CanonicalIdentifier {
	CanonicalIdentifier {
		chain_identifier: chain_state.chain_id,
		token_network_address: event.address,
		channel_identifier,
	}
}
