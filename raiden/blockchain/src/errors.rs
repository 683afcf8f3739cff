use raiden_primitives::types::TokenNetworkAddress;
use raiden_state_machine::{
	errors::StateTransitionError,
	storage::types::StorageError,
};
use thiserror::Error;

/// Failure to translate a blockchain event into a state change.
///
/// Disagreement between an event and the local chain state is never an error, it is resolved
/// into a routing-only state change or into no state change at all.
#[derive(Error, Debug)]
pub enum DecodeError {
	#[error("{event} event is missing argument `{argument}`")]
	MissingArgument { event: String, argument: &'static str },
	#[error("{event} event has an invalid `{argument}`")]
	InvalidArgument { event: String, argument: &'static str },
	#[error("Could not construct channel state: `{0}`")]
	ChannelState(#[from] StateTransitionError),
	#[error("Token network {0:?} is not known to the chain state")]
	UnknownTokenNetwork(TokenNetworkAddress),
	#[error("Balance proof history unavailable: `{0}`")]
	History(#[from] StorageError),
}

pub type Result<T> = std::result::Result<T, DecodeError>;
