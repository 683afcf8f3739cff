use derive_more::Deref;
use raiden_macros::IntoEvent;
use raiden_primitives::types::{
	Address,
	CanonicalIdentifier,
	MessageIdentifier,
	PaymentIdentifier,
	Secret,
	SecretHash,
	TokenAddress,
};
use serde::{
	Deserialize,
	Serialize,
};

use super::{
	BalanceProofState,
	LockedTransferState,
};

/// Side effects of the state machine which are persisted alongside the state change that
/// produced them.
#[derive(Serialize, Deserialize, Clone, Debug, Eq, PartialEq)]
#[serde(tag = "type")]
pub enum Event {
	SendLockedTransfer(SendLockedTransfer),
	SendLockExpired(SendLockExpired),
	SendUnlock(SendUnlock),
}

impl Event {
	/// Returns a string of the inner event's type name.
	pub fn type_name(&self) -> &'static str {
		match self {
			Event::SendLockedTransfer(_) => "SendLockedTransfer",
			Event::SendLockExpired(_) => "SendLockExpired",
			Event::SendUnlock(_) => "SendUnlock",
		}
	}

	/// The balance proof this node signed and sent, if the event carries one.
	pub fn balance_proof(&self) -> Option<&BalanceProofState> {
		match self {
			Event::SendLockedTransfer(inner) => Some(&inner.transfer.balance_proof),
			Event::SendLockExpired(inner) => Some(&inner.balance_proof),
			Event::SendUnlock(inner) => Some(&inner.balance_proof),
		}
	}

	/// The partner the message is addressed to.
	pub fn recipient(&self) -> Address {
		match self {
			Event::SendLockedTransfer(inner) => inner.recipient,
			Event::SendLockExpired(inner) => inner.recipient,
			Event::SendUnlock(inner) => inner.recipient,
		}
	}
}

/// Fields common to every message sent to a partner.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct SendMessageEventInner {
	pub recipient: Address,
	pub canonical_identifier: CanonicalIdentifier,
	pub message_identifier: MessageIdentifier,
}

#[derive(Deref, Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoEvent)]
pub struct SendLockedTransfer {
	#[deref]
	pub inner: SendMessageEventInner,
	pub transfer: LockedTransferState,
}

#[derive(Deref, Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoEvent)]
pub struct SendLockExpired {
	#[deref]
	pub inner: SendMessageEventInner,
	pub balance_proof: BalanceProofState,
	pub secrethash: SecretHash,
}

#[derive(Deref, Serialize, Deserialize, Clone, Debug, Eq, PartialEq, IntoEvent)]
pub struct SendUnlock {
	#[deref]
	pub inner: SendMessageEventInner,
	pub payment_identifier: PaymentIdentifier,
	pub token_address: TokenAddress,
	pub balance_proof: BalanceProofState,
	pub secret: Secret,
	pub secrethash: SecretHash,
}
