use std::sync::Arc;

use raiden_primitives::types::{
	Address,
	Bytes,
	CanonicalIdentifier,
	ChannelIdentifier,
	Nonce,
	TokenAmount,
	U256,
};
use raiden_state_machine::{
	storage::StateStorage,
	types::{
		ReceiveUnlock,
		StateChange,
	},
};
use rusqlite::Connection;

use crate::{
	config::DecoderConfig,
	decode::{
		BatchUnlockOutcome,
		ChannelClosedOutcome,
		EventDecoder,
		SideEffect,
	},
	errors::DecodeError,
	events::{
		BlockchainEvent,
		ChannelClosed,
		ChannelNewDeposit,
		ChannelOpened,
		ChannelUnlocked,
		ContractEvent,
		Event,
	},
	tests::factories::{
		bytes32,
		channel_closed_event,
		channel_deposit_event,
		channel_opened_event,
		channel_settled_event,
		channel_unlocked_event,
		channel_withdraw_event,
		make_balance_proof,
		make_event,
		token_network_created_event,
		update_transfer_event,
		ChainStateBuilder,
		FailingHistory,
		Generator,
		Keyring,
		MemoryHistory,
	},
};

fn decoder() -> EventDecoder {
	EventDecoder::new(DecoderConfig::default())
}

fn blockchain_event(event: Event) -> BlockchainEvent {
	BlockchainEvent::from_event(event)
		.expect("Event should decode")
		.expect("Event should be known")
}

fn opened_payload(event: &BlockchainEvent) -> ChannelOpened {
	match &event.payload {
		ContractEvent::ChannelOpened(payload) => payload.clone(),
		other => panic!("Unexpected payload {:?}", other),
	}
}

fn closed_payload(event: &BlockchainEvent) -> ChannelClosed {
	match &event.payload {
		ContractEvent::ChannelClosed(payload) => payload.clone(),
		other => panic!("Unexpected payload {:?}", other),
	}
}

fn deposit_payload(event: &BlockchainEvent) -> ChannelNewDeposit {
	match &event.payload {
		ContractEvent::ChannelNewDeposit(payload) => payload.clone(),
		other => panic!("Unexpected payload {:?}", other),
	}
}

fn unlocked_payload(event: &BlockchainEvent) -> ChannelUnlocked {
	match &event.payload {
		ContractEvent::ChannelUnlocked(payload) => payload.clone(),
		other => panic!("Unexpected payload {:?}", other),
	}
}

#[test]
fn test_token_network_created_has_no_channels() {
	let state = ChainStateBuilder::new().build();
	let registry_address = Address::random();
	let token_address = Address::random();
	let token_network_address = Address::random();

	let decoded = decoder()
		.as_state_change(
			token_network_created_event(registry_address, token_address, token_network_address),
			&state.chain_state,
			&MemoryHistory::default(),
		)
		.expect("Should decode")
		.expect("Should produce a state change");

	assert!(decoded.side_effects.is_empty());
	match decoded.state_change {
		StateChange::ContractReceiveTokenNetworkCreated(state_change) => {
			assert_eq!(state_change.token_network_registry_address, registry_address);
			assert_eq!(state_change.token_network.address, token_network_address);
			assert_eq!(state_change.token_network.token_address, token_address);
			assert!(state_change.token_network.channelidentifiers_to_channels.is_empty());
			assert_eq!(state_change.token_network.network_graph.channel_count(), 0);
		},
		other => panic!("Unexpected state change {:?}", other),
	}
}

#[test]
fn test_channel_opened_with_node_as_participant() {
	let state = ChainStateBuilder::new().with_token_network().build();
	let our_address = Keyring::Alice.address();
	let partner_address = Keyring::Bob.address();

	for (participant1, participant2) in
		[(our_address, partner_address), (partner_address, our_address)]
	{
		let event = blockchain_event(channel_opened_event(
			state.token_network_address,
			7,
			participant1,
			participant2,
			500,
		));
		let payload = opened_payload(&event);
		let outcome = decoder()
			.channel_opened(&state.chain_state, &event, &payload)
			.expect("Should classify");

		assert_eq!(outcome.health_check(), Some(partner_address));
		let fee_update = outcome.fee_update().cloned().expect("Fee update should be present");

		let decoded = decoder()
			.decode(event.clone(), &state.chain_state, &MemoryHistory::default())
			.expect("Should decode")
			.expect("Should produce a state change");
		assert_eq!(
			decoded.side_effects,
			vec![SideEffect::HealthCheck(partner_address), SideEffect::FeeUpdate(fee_update.clone())]
		);

		match decoded.state_change {
			StateChange::ContractReceiveChannelOpened(state_change) => {
				let channel_state = state_change.channel_state;
				assert_eq!(
					channel_state.canonical_identifier.channel_identifier,
					ChannelIdentifier::from(7u64)
				);
				assert_eq!(
					channel_state.canonical_identifier.token_network_address,
					state.token_network_address
				);
				assert_eq!(channel_state.our_state.address, our_address);
				assert_eq!(channel_state.partner_state.address, partner_address);
				assert_eq!(channel_state.our_total_deposit(), TokenAmount::zero());
				assert_eq!(channel_state.partner_total_deposit(), TokenAmount::zero());
				assert_eq!(channel_state.token_address, state.token_address);
				assert_eq!(
					channel_state.token_network_registry_address,
					state.token_network_registry_address
				);
				assert_eq!(fee_update.canonical_identifier, channel_state.canonical_identifier);
				assert_eq!(fee_update.fee_schedule, channel_state.fee_schedule);
			},
			other => panic!("Unexpected state change {:?}", other),
		}
	}
}

#[test]
fn test_channel_opened_between_other_nodes_is_a_route() {
	let state = ChainStateBuilder::new().with_token_network().build();
	let event = blockchain_event(channel_opened_event(
		state.token_network_address,
		3,
		Keyring::Bob.address(),
		Keyring::Charlie.address(),
		500,
	));

	let payload = opened_payload(&event);
	let outcome = decoder()
		.channel_opened(&state.chain_state, &event, &payload)
		.expect("Should classify");
	assert_eq!(outcome.health_check(), None);
	assert_eq!(outcome.fee_update(), None);

	let decoded = decoder()
		.decode(event, &state.chain_state, &MemoryHistory::default())
		.expect("Should decode")
		.expect("Should produce a state change");
	assert!(decoded.side_effects.is_empty());
	match decoded.state_change {
		StateChange::ContractReceiveRouteNew(state_change) => {
			assert_eq!(state_change.participant1, Keyring::Bob.address());
			assert_eq!(state_change.participant2, Keyring::Charlie.address());
			assert_eq!(
				state_change.canonical_identifier.channel_identifier,
				ChannelIdentifier::from(3u64)
			);
		},
		other => panic!("Unexpected state change {:?}", other),
	}
}

#[test]
fn test_channel_opened_on_unknown_token_network_fails() {
	let state = ChainStateBuilder::new().with_token_network().build();
	let unknown_token_network = Address::random();

	let result = decoder().as_state_change(
		channel_opened_event(
			unknown_token_network,
			1,
			Keyring::Alice.address(),
			Keyring::Bob.address(),
			500,
		),
		&state.chain_state,
		&MemoryHistory::default(),
	);
	assert!(matches!(
		result,
		Err(DecodeError::UnknownTokenNetwork(address)) if address == unknown_token_network
	));
}

#[test]
fn test_channel_opened_with_short_settle_timeout_fails() {
	let state = ChainStateBuilder::new().with_token_network().build();

	let result = decoder().as_state_change(
		channel_opened_event(
			state.token_network_address,
			1,
			Keyring::Alice.address(),
			Keyring::Bob.address(),
			10,
		),
		&state.chain_state,
		&MemoryHistory::default(),
	);
	assert!(matches!(result, Err(DecodeError::ChannelState(_))));
}

#[test]
fn test_channel_opened_without_settle_timeout() {
	let state = ChainStateBuilder::new().with_token_network().build();
	let without_settle_timeout = |participant1, participant2| {
		let mut event =
			channel_opened_event(state.token_network_address, 3, participant1, participant2, 500);
		event.data.remove("settle_timeout");
		event
	};

	let decoded = decoder()
		.as_state_change(
			without_settle_timeout(Keyring::Bob.address(), Keyring::Charlie.address()),
			&state.chain_state,
			&MemoryHistory::default(),
		)
		.expect("Should decode")
		.expect("Should produce a state change");
	match decoded.state_change {
		StateChange::ContractReceiveRouteNew(state_change) => {
			assert_eq!(state_change.participant1, Keyring::Bob.address());
			assert_eq!(state_change.participant2, Keyring::Charlie.address());
		},
		other => panic!("Unexpected state change {:?}", other),
	}

	let result = decoder().as_state_change(
		without_settle_timeout(Keyring::Bob.address(), Keyring::Alice.address()),
		&state.chain_state,
		&MemoryHistory::default(),
	);
	assert!(matches!(
		result,
		Err(DecodeError::MissingArgument { argument: "settle_timeout", .. })
	));
}

#[test]
fn test_channel_closed_is_a_channel_or_a_route() {
	let state = ChainStateBuilder::new()
		.with_token_network()
		.with_channels(vec![(Keyring::Bob.address(), TokenAmount::zero(), TokenAmount::zero())])
		.build();
	let known = state.canonical_identifiers[0].clone();

	let event = blockchain_event(channel_closed_event(
		state.token_network_address,
		1,
		Keyring::Bob.address(),
	));
	let payload = closed_payload(&event);
	match decoder().channel_closed(&state.chain_state, &event, &payload) {
		ChannelClosedOutcome::Channel(state_change) => {
			assert_eq!(state_change.canonical_identifier, known);
			assert_eq!(state_change.transaction_from, Keyring::Bob.address());
			assert_eq!(state_change.block_number, event.block_number);
			assert_eq!(state_change.transaction_hash, Some(event.transaction_hash));
		},
		other => panic!("Unexpected outcome {:?}", other),
	}

	let unknown_channel =
		channel_closed_event(state.token_network_address, 2, Keyring::Charlie.address());
	let unknown_token_network =
		channel_closed_event(Address::random(), 1, Keyring::Charlie.address());
	for event in [unknown_channel, unknown_token_network] {
		let address = event.address;
		let decoded = decoder()
			.as_state_change(event, &state.chain_state, &MemoryHistory::default())
			.expect("Should decode")
			.expect("Should produce a state change");
		match decoded.state_change {
			StateChange::ContractReceiveRouteClosed(state_change) => {
				assert_eq!(state_change.canonical_identifier.token_network_address, address);
			},
			other => panic!("Unexpected state change {:?}", other),
		}
	}
}

#[test]
fn test_channel_deposit_on_known_channel() {
	let state = ChainStateBuilder::new()
		.with_token_network()
		.with_channels(vec![(Keyring::Bob.address(), TokenAmount::zero(), TokenAmount::zero())])
		.build();

	let decoded = decoder()
		.as_state_change(
			channel_deposit_event(state.token_network_address, 1, Keyring::Bob.address(), 20000),
			&state.chain_state,
			&MemoryHistory::default(),
		)
		.expect("Should decode")
		.expect("Should produce a state change");

	match &decoded.state_change {
		StateChange::ContractReceiveChannelDeposit(state_change) => {
			assert_eq!(
				state_change.deposit_transaction.participant_address,
				Keyring::Bob.address()
			);
			assert_eq!(state_change.deposit_transaction.contract_balance, U256::from(20000u64));
			assert_eq!(
				state_change.canonical_identifier.token_network_address,
				state.token_network_address
			);
			assert_eq!(state_change.canonical_identifier, state.canonical_identifiers[0]);
		},
		other => panic!("Unexpected state change {:?}", other),
	}
	assert!(matches!(
		decoded.side_effects.as_slice(),
		[SideEffect::FeeUpdate(fee_update)]
			if fee_update.canonical_identifier == state.canonical_identifiers[0]
	));
}

#[test]
fn test_channel_deposit_without_balance_increase_has_no_fee_update() {
	let state = ChainStateBuilder::new()
		.with_token_network()
		.with_channels(vec![(
			Keyring::Bob.address(),
			TokenAmount::from(100u64),
			TokenAmount::from(20000u64),
		)])
		.build();

	let event = blockchain_event(channel_deposit_event(
		state.token_network_address,
		1,
		Keyring::Bob.address(),
		20000,
	));
	let payload = deposit_payload(&event);
	let outcome = decoder()
		.channel_deposit(&state.chain_state, &event, &payload)
		.expect("Channel should be known");
	assert_eq!(outcome.fee_update, None);
}

#[test]
fn test_events_of_untracked_channels_have_no_effect() {
	let state = ChainStateBuilder::new()
		.with_token_network()
		.with_channels(vec![(Keyring::Bob.address(), TokenAmount::zero(), TokenAmount::zero())])
		.build();
	let unknown_token_network = Address::random();
	let locksroot = Generator::random_locksroot();

	let events = vec![
		channel_deposit_event(state.token_network_address, 2, Keyring::Bob.address(), 20000),
		channel_deposit_event(unknown_token_network, 1, Keyring::Bob.address(), 20000),
		update_transfer_event(state.token_network_address, 2, Keyring::Bob.address(), 5),
		update_transfer_event(unknown_token_network, 1, Keyring::Bob.address(), 5),
		channel_withdraw_event(state.token_network_address, 2, Keyring::Bob.address(), 10),
		channel_withdraw_event(unknown_token_network, 1, Keyring::Bob.address(), 10),
		channel_settled_event(
			state.token_network_address,
			2,
			(Keyring::Alice.address(), 10, locksroot),
			(Keyring::Bob.address(), 20, locksroot),
		),
		channel_settled_event(
			unknown_token_network,
			1,
			(Keyring::Alice.address(), 10, locksroot),
			(Keyring::Bob.address(), 20, locksroot),
		),
	];

	for event in events {
		let name = event.name.clone();
		let decoded = decoder()
			.as_state_change(event, &state.chain_state, &MemoryHistory::default())
			.expect("Should decode");
		assert!(decoded.is_none(), "{} should have no effect", name);
	}
}

#[test]
fn test_update_transfer_on_known_channel() {
	let state = ChainStateBuilder::new()
		.with_token_network()
		.with_channels(vec![(Keyring::Bob.address(), TokenAmount::zero(), TokenAmount::zero())])
		.build();

	let decoded = decoder()
		.as_state_change(
			update_transfer_event(state.token_network_address, 1, Keyring::Bob.address(), 5),
			&state.chain_state,
			&MemoryHistory::default(),
		)
		.expect("Should decode")
		.expect("Should produce a state change");
	match decoded.state_change {
		StateChange::ContractReceiveUpdateTransfer(state_change) => {
			assert_eq!(state_change.canonical_identifier, state.canonical_identifiers[0]);
			assert_eq!(state_change.nonce, Nonce::from(5u64));
		},
		other => panic!("Unexpected state change {:?}", other),
	}
}

#[test]
fn test_channel_withdraw_on_known_channel() {
	let state = ChainStateBuilder::new()
		.with_token_network()
		.with_channels(vec![(
			Keyring::Bob.address(),
			TokenAmount::from(100u64),
			TokenAmount::zero(),
		)])
		.build();

	let decoded = decoder()
		.as_state_change(
			channel_withdraw_event(state.token_network_address, 1, Keyring::Alice.address(), 40),
			&state.chain_state,
			&MemoryHistory::default(),
		)
		.expect("Should decode")
		.expect("Should produce a state change");
	match decoded.state_change {
		StateChange::ContractReceiveChannelWithdraw(state_change) => {
			assert_eq!(state_change.canonical_identifier, state.canonical_identifiers[0]);
			assert_eq!(state_change.participant, Keyring::Alice.address());
			assert_eq!(state_change.total_withdraw, TokenAmount::from(40u64));
		},
		other => panic!("Unexpected state change {:?}", other),
	}
}

#[test]
fn test_channel_settled_maps_amounts_to_our_side() {
	let state = ChainStateBuilder::new()
		.with_token_network()
		.with_channels(vec![(Keyring::Bob.address(), TokenAmount::zero(), TokenAmount::zero())])
		.build();
	let our_locksroot = Generator::random_locksroot();
	let partner_locksroot = Generator::random_locksroot();

	let decoded = decoder()
		.as_state_change(
			channel_settled_event(
				state.token_network_address,
				1,
				(Keyring::Bob.address(), 20, partner_locksroot),
				(Keyring::Alice.address(), 10, our_locksroot),
			),
			&state.chain_state,
			&MemoryHistory::default(),
		)
		.expect("Should decode")
		.expect("Should produce a state change");
	match decoded.state_change {
		StateChange::ContractReceiveChannelSettled(state_change) => {
			assert_eq!(state_change.canonical_identifier, state.canonical_identifiers[0]);
			assert_eq!(state_change.our_onchain_locksroot, our_locksroot);
			assert_eq!(state_change.partner_onchain_locksroot, partner_locksroot);
			assert_eq!(state_change.our_transferred_amount, TokenAmount::from(10u64));
			assert_eq!(state_change.partner_transferred_amount, TokenAmount::from(20u64));
		},
		other => panic!("Unexpected state change {:?}", other),
	}
}

#[test]
fn test_batch_unlock_as_receiver_resolves_received_proof() {
	let state = ChainStateBuilder::new()
		.with_token_network()
		.with_channels(vec![(Keyring::Bob.address(), TokenAmount::zero(), TokenAmount::zero())])
		.build();
	let canonical_identifier = state.canonical_identifiers[0].clone();
	let locksroot = Generator::random_locksroot();
	let history = MemoryHistory::default().with_received(make_balance_proof(
		canonical_identifier.clone(),
		locksroot,
		Keyring::Bob.address(),
		1,
	));

	let decoded = decoder()
		.as_state_change(
			channel_unlocked_event(
				state.token_network_address,
				Some(1),
				Keyring::Alice.address(),
				Keyring::Bob.address(),
				locksroot,
			),
			&state.chain_state,
			&history,
		)
		.expect("Should decode")
		.expect("Should produce a state change");
	match decoded.state_change {
		StateChange::ContractReceiveChannelBatchUnlock(state_change) => {
			assert_eq!(state_change.canonical_identifier, canonical_identifier);
			assert_eq!(state_change.participant, Keyring::Bob.address());
			assert_eq!(state_change.receiver, Keyring::Alice.address());
			assert_eq!(state_change.sender, Keyring::Bob.address());
			assert_eq!(state_change.locksroot, locksroot);
			assert_eq!(state_change.unlocked_amount, TokenAmount::from(5u64));
			assert_eq!(state_change.returned_tokens, TokenAmount::zero());
		},
		other => panic!("Unexpected state change {:?}", other),
	}

	let unknown = decoder()
		.as_state_change(
			channel_unlocked_event(
				state.token_network_address,
				Some(1),
				Keyring::Alice.address(),
				Keyring::Bob.address(),
				Generator::random_locksroot(),
			),
			&state.chain_state,
			&history,
		)
		.expect("Should decode");
	assert!(unknown.is_none());
}

#[test]
fn test_batch_unlock_as_sender_resolves_sent_proof() {
	let state = ChainStateBuilder::new()
		.with_token_network()
		.with_channels(vec![(Keyring::Bob.address(), TokenAmount::zero(), TokenAmount::zero())])
		.build();
	let canonical_identifier = state.canonical_identifiers[0].clone();
	let locksroot = Generator::random_locksroot();
	let history = MemoryHistory::default()
		.with_received(make_balance_proof(
			canonical_identifier.clone(),
			Generator::random_locksroot(),
			Keyring::Bob.address(),
			1,
		))
		.with_sent(make_balance_proof(
			canonical_identifier.clone(),
			locksroot,
			Keyring::Alice.address(),
			2,
		));

	let event = blockchain_event(channel_unlocked_event(
		state.token_network_address,
		None,
		Keyring::Bob.address(),
		Keyring::Alice.address(),
		locksroot,
	));
	let payload = unlocked_payload(&event);
	match decoder()
		.channel_unlocked(&state.chain_state, &event, &payload, &history)
		.expect("Should classify")
	{
		BatchUnlockOutcome::Resolved(state_change) => {
			assert_eq!(state_change.canonical_identifier, canonical_identifier);
			assert_eq!(state_change.participant, Keyring::Bob.address());
		},
		other => panic!("Unexpected outcome {:?}", other),
	}

	// A sent proof never resolves an unlock received by this node.
	let event = blockchain_event(channel_unlocked_event(
		state.token_network_address,
		None,
		Keyring::Alice.address(),
		Keyring::Bob.address(),
		locksroot,
	));
	let payload = unlocked_payload(&event);
	assert_eq!(
		decoder()
			.channel_unlocked(&state.chain_state, &event, &payload, &history)
			.expect("Should classify"),
		BatchUnlockOutcome::Unresolved
	);
}

#[test]
fn test_batch_unlock_searches_every_channel_with_partner() {
	let state = ChainStateBuilder::new()
		.with_token_network()
		.with_channels(vec![
			(Keyring::Bob.address(), TokenAmount::zero(), TokenAmount::zero()),
			(Keyring::Charlie.address(), TokenAmount::zero(), TokenAmount::zero()),
			(Keyring::Bob.address(), TokenAmount::zero(), TokenAmount::zero()),
		])
		.build();
	let first_channel = state.canonical_identifiers[0].clone();
	let locksroot = Generator::random_locksroot();
	let history = MemoryHistory::default().with_received(make_balance_proof(
		first_channel.clone(),
		locksroot,
		Keyring::Bob.address(),
		1,
	));

	let decoded = decoder()
		.as_state_change(
			channel_unlocked_event(
				state.token_network_address,
				None,
				Keyring::Alice.address(),
				Keyring::Bob.address(),
				locksroot,
			),
			&state.chain_state,
			&history,
		)
		.expect("Should decode")
		.expect("Should produce a state change");
	match decoded.state_change {
		StateChange::ContractReceiveChannelBatchUnlock(state_change) => {
			assert_eq!(state_change.canonical_identifier, first_channel);
		},
		other => panic!("Unexpected state change {:?}", other),
	}
	// The newest channel with Bob is searched first.
	assert_eq!(history.lookups(), 2);
}

#[test]
fn test_batch_unlock_of_other_nodes_is_ignored() {
	let state = ChainStateBuilder::new().with_token_network().build();

	let decoded = decoder()
		.as_state_change(
			channel_unlocked_event(
				state.token_network_address,
				Some(1),
				Keyring::Bob.address(),
				Keyring::Charlie.address(),
				Generator::random_locksroot(),
			),
			&state.chain_state,
			&FailingHistory,
		)
		.expect("History should not be queried");
	assert!(decoded.is_none());
}

#[test]
fn test_batch_unlock_with_unavailable_history_fails() {
	let state = ChainStateBuilder::new()
		.with_token_network()
		.with_channels(vec![(Keyring::Bob.address(), TokenAmount::zero(), TokenAmount::zero())])
		.build();

	let result = decoder().as_state_change(
		channel_unlocked_event(
			state.token_network_address,
			Some(1),
			Keyring::Alice.address(),
			Keyring::Bob.address(),
			Generator::random_locksroot(),
		),
		&state.chain_state,
		&FailingHistory,
	);
	assert!(matches!(result, Err(DecodeError::History(_))));
}

#[test]
fn test_batch_unlock_resolves_through_sqlite_history() {
	let state = ChainStateBuilder::new()
		.with_token_network()
		.with_channels(vec![(Keyring::Bob.address(), TokenAmount::zero(), TokenAmount::zero())])
		.build();
	let canonical_identifier = state.canonical_identifiers[0].clone();
	let locksroot = Generator::random_locksroot();

	let conn = Connection::open_in_memory().expect("In-memory database should open");
	let storage = Arc::new(StateStorage::new(conn));
	storage.setup_database().expect("Database should be set up");

	let balance_proof =
		make_balance_proof(canonical_identifier.clone(), locksroot, Keyring::Bob.address(), 1);
	let unlock = ReceiveUnlock {
		sender: Keyring::Bob.address(),
		message_identifier: 1,
		secret: Bytes(vec![1u8; 32]),
		secrethash: Generator::random_locksroot(),
		balance_proof,
	};
	storage.store_state_change(unlock.into()).expect("Should store");

	let decoded = decoder()
		.as_state_change(
			channel_unlocked_event(
				state.token_network_address,
				Some(1),
				Keyring::Alice.address(),
				Keyring::Bob.address(),
				locksroot,
			),
			&state.chain_state,
			&storage,
		)
		.expect("Should decode")
		.expect("Should produce a state change");
	assert!(matches!(
		decoded.state_change,
		StateChange::ContractReceiveChannelBatchUnlock(ref state_change)
			if state_change.canonical_identifier == canonical_identifier
	));
}

#[test]
fn test_secret_revealed() {
	let state = ChainStateBuilder::new().build();
	let secret_registry_address = Address::random();
	let secrethash = Generator::random_locksroot();
	let secret = Generator::random_locksroot();

	let decoded = decoder()
		.as_state_change(
			make_event(
				"SecretRevealed",
				secret_registry_address,
				vec![
					("secrethash", bytes32(secrethash)),
					("secret", bytes32(secret)),
				],
			),
			&state.chain_state,
			&MemoryHistory::default(),
		)
		.expect("Should decode")
		.expect("Should produce a state change");
	match decoded.state_change {
		StateChange::ContractReceiveSecretReveal(state_change) => {
			assert_eq!(state_change.secret_registry_address, secret_registry_address);
			assert_eq!(state_change.secrethash, secrethash);
			assert_eq!(state_change.secret.0, secret.as_bytes().to_vec());
		},
		other => panic!("Unexpected state change {:?}", other),
	}
}

#[test]
fn test_unknown_event_is_dropped_without_history_lookup() {
	let state = ChainStateBuilder::new().with_token_network().build();

	let decoded = decoder()
		.as_state_change(
			make_event("Approval", Address::random(), vec![]),
			&state.chain_state,
			&FailingHistory,
		)
		.expect("Unknown events are not errors");
	assert!(decoded.is_none());
}

#[test]
fn test_missing_argument_fails() {
	let state = ChainStateBuilder::new().with_token_network().build();
	let mut event = channel_deposit_event(
		state.token_network_address,
		1,
		Keyring::Bob.address(),
		20000,
	);
	event.data.remove("total_deposit");

	let result = decoder().as_state_change(event, &state.chain_state, &MemoryHistory::default());
	assert!(matches!(
		result,
		Err(DecodeError::MissingArgument { argument: "total_deposit", .. })
	));
}

#[test]
fn test_decoding_same_event_twice_is_identical() {
	let state = ChainStateBuilder::new()
		.with_token_network()
		.with_channels(vec![(Keyring::Bob.address(), TokenAmount::zero(), TokenAmount::zero())])
		.build();
	let decoder = decoder();

	let events = vec![
		channel_opened_event(
			state.token_network_address,
			2,
			Keyring::Alice.address(),
			Keyring::Dave.address(),
			500,
		),
		channel_deposit_event(state.token_network_address, 1, Keyring::Bob.address(), 20000),
		channel_closed_event(state.token_network_address, 1, Keyring::Bob.address()),
	];

	for event in events {
		let first = decoder
			.as_state_change(event.clone(), &state.chain_state, &MemoryHistory::default())
			.expect("Should decode");
		let second = decoder
			.as_state_change(event, &state.chain_state, &MemoryHistory::default())
			.expect("Should decode");
		assert!(first.is_some());
		assert_eq!(first, second);
	}
}

#[test]
fn test_canonical_identifier_uses_chain_of_node() {
	let state = ChainStateBuilder::new().with_token_network().build();
	let decoded = decoder()
		.as_state_change(
			channel_closed_event(state.token_network_address, 9, Keyring::Bob.address()),
			&state.chain_state,
			&MemoryHistory::default(),
		)
		.expect("Should decode")
		.expect("Should produce a state change");
	match decoded.state_change {
		StateChange::ContractReceiveRouteClosed(state_change) => assert_eq!(
			state_change.canonical_identifier,
			CanonicalIdentifier {
				chain_identifier: state.chain_state.chain_id,
				token_network_address: state.token_network_address,
				channel_identifier: ChannelIdentifier::from(9u64),
			}
		),
		other => panic!("Unexpected state change {:?}", other),
	}
}
