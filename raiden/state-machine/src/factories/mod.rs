mod builder;
mod generator;
mod keyring;

pub use builder::*;
pub use generator::*;
pub use keyring::*;
use raiden_primitives::{
	hashing::hash_balance_data,
	types::{
		Address,
		Bytes,
		CanonicalIdentifier,
		Locksroot,
		Nonce,
		TokenAddress,
		TokenAmount,
		H256,
		U64,
	},
};
use web3::signing::keccak256;

use crate::types::{
	BalanceProofState,
	ReceiveUnlock,
	SendMessageEventInner,
	SendUnlock,
};

pub fn make_balance_proof(
	canonical_identifier: CanonicalIdentifier,
	locked_amount: TokenAmount,
	locksroot: Locksroot,
	transferred_amount: TokenAmount,
	sender: Address,
	nonce: Nonce,
) -> BalanceProofState {
	let balance_hash = hash_balance_data(transferred_amount, locked_amount, locksroot)
		.expect("Should generate balance hash");

	BalanceProofState {
		nonce,
		transferred_amount,
		locked_amount,
		locksroot,
		canonical_identifier,
		balance_hash,
		message_hash: Some(H256::from_slice(&keccak256(balance_hash.as_bytes()))),
		signature: Some(Bytes(Generator::random_bytes().to_vec())),
		sender: Some(sender),
	}
}

/// An Unlock message received from `balance_proof.sender`.
pub fn make_receive_unlock(balance_proof: BalanceProofState) -> ReceiveUnlock {
	let secret = Generator::random_secret();
	ReceiveUnlock {
		sender: balance_proof.sender.unwrap_or_default(),
		message_identifier: 1,
		secrethash: H256::from_slice(&keccak256(&secret.0)),
		secret,
		balance_proof,
	}
}

/// An Unlock message this node sent to `recipient`.
pub fn make_send_unlock(
	recipient: Address,
	token_address: TokenAddress,
	balance_proof: BalanceProofState,
) -> SendUnlock {
	let secret = Generator::random_secret();
	SendUnlock {
		inner: SendMessageEventInner {
			recipient,
			canonical_identifier: balance_proof.canonical_identifier.clone(),
			message_identifier: 1,
		},
		payment_identifier: U64::from(1u64),
		token_address,
		secrethash: H256::from_slice(&keccak256(&secret.0)),
		secret,
		balance_proof,
	}
}
