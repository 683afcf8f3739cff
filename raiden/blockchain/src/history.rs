use std::sync::Arc;

use raiden_primitives::types::{
	CanonicalIdentifier,
	Locksroot,
};
use raiden_state_machine::{
	storage::{
		types::{
			StorageError,
			StorageID,
		},
		StateStorage,
	},
	types::BalanceProofState,
};

/// A balance proof found in history, with the identifier of the record carrying it.
pub type HistoricalBalanceProof = (StorageID, BalanceProofState);

/// Read access to the balance proofs this node has exchanged.
///
/// Lookups return the most recent matching proof of the channel. `Ok(None)` means no such
/// proof exists, an `Err` means the history could not be read.
pub trait BalanceProofHistory {
	/// Search the state change log for a balance proof received from the partner.
	fn find_received_balance_proof(
		&self,
		canonical_identifier: &CanonicalIdentifier,
		locksroot: Locksroot,
	) -> Result<Option<HistoricalBalanceProof>, StorageError>;

	/// Search the event log for a balance proof this node sent to the partner.
	fn find_sent_balance_proof(
		&self,
		canonical_identifier: &CanonicalIdentifier,
		locksroot: Locksroot,
	) -> Result<Option<HistoricalBalanceProof>, StorageError>;
}

impl BalanceProofHistory for StateStorage {
	fn find_received_balance_proof(
		&self,
		canonical_identifier: &CanonicalIdentifier,
		locksroot: Locksroot,
	) -> Result<Option<HistoricalBalanceProof>, StorageError> {
		let record =
			self.get_state_change_with_balance_proof_by_locksroot(canonical_identifier, locksroot)?;
		Ok(record.and_then(|record| {
			record.data.balance_proof().cloned().map(|balance_proof| (record.identifier, balance_proof))
		}))
	}

	fn find_sent_balance_proof(
		&self,
		canonical_identifier: &CanonicalIdentifier,
		locksroot: Locksroot,
	) -> Result<Option<HistoricalBalanceProof>, StorageError> {
		let record = self.get_event_with_balance_proof_by_locksroot(canonical_identifier, locksroot)?;
		Ok(record.and_then(|record| {
			record.data.balance_proof().cloned().map(|balance_proof| (record.identifier, balance_proof))
		}))
	}
}

impl<T: BalanceProofHistory + ?Sized> BalanceProofHistory for &T {
	fn find_received_balance_proof(
		&self,
		canonical_identifier: &CanonicalIdentifier,
		locksroot: Locksroot,
	) -> Result<Option<HistoricalBalanceProof>, StorageError> {
		(**self).find_received_balance_proof(canonical_identifier, locksroot)
	}

	fn find_sent_balance_proof(
		&self,
		canonical_identifier: &CanonicalIdentifier,
		locksroot: Locksroot,
	) -> Result<Option<HistoricalBalanceProof>, StorageError> {
		(**self).find_sent_balance_proof(canonical_identifier, locksroot)
	}
}

impl<T: BalanceProofHistory + ?Sized> BalanceProofHistory for Arc<T> {
	fn find_received_balance_proof(
		&self,
		canonical_identifier: &CanonicalIdentifier,
		locksroot: Locksroot,
	) -> Result<Option<HistoricalBalanceProof>, StorageError> {
		(**self).find_received_balance_proof(canonical_identifier, locksroot)
	}

	fn find_sent_balance_proof(
		&self,
		canonical_identifier: &CanonicalIdentifier,
		locksroot: Locksroot,
	) -> Result<Option<HistoricalBalanceProof>, StorageError> {
		(**self).find_sent_balance_proof(canonical_identifier, locksroot)
	}
}
