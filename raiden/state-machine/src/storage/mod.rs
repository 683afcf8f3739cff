#![warn(clippy::missing_docs_in_private_items)]

use std::{
	convert::TryInto,
	sync::Mutex,
};

pub use chrono::NaiveDateTime;
use chrono::Utc;
use raiden_primitives::types::{
	CanonicalIdentifier,
	Locksroot,
};
use rusqlite::{
	params,
	Connection,
	Row,
	Transaction,
};
use ulid::Ulid;

use self::types::{
	EventRecord,
	Result,
	StateChangeRecord,
	StorageError,
	StorageID,
};
use crate::types::{
	BalanceProofState,
	Event,
	StateChange,
};

/// Sqlite constants.
mod sqlite;
pub mod types;

/// Storage interface for the state change and event logs.
///
/// Both logs are append-only. Every balance proof they carry is also written to a secondary
/// index keyed by channel and locksroot, so that on-chain unlocks can be matched to the proof
/// which authorized them.
pub struct StateStorage {
	/// The rusqlite connection
	conn: Mutex<Connection>,
}

impl StateStorage {
	/// Create an instance of `StateStorage`.
	pub fn new(conn: Connection) -> Self {
		Self { conn: Mutex::new(conn) }
	}

	/// Create tables if not already created.
	pub fn setup_database(&self) -> Result<()> {
		let setup_db_sql = format!(
			"
			PRAGMA foreign_keys=off;
			BEGIN TRANSACTION;
			{}{}{}
			COMMIT;
			PRAGMA foreign_keys=on;
			",
			sqlite::DB_CREATE_STATE_CHANGES,
			sqlite::DB_CREATE_STATE_EVENTS,
			sqlite::DB_CREATE_BALANCE_PROOFS,
		);
		self.conn
			.lock()
			.map_err(|_| StorageError::CannotLock)?
			.execute_batch(&setup_db_sql)
			.map_err(StorageError::Sql)?;

		Ok(())
	}

	/// Return all state changes in insertion order.
	pub fn state_changes(&self) -> Result<Vec<StateChangeRecord>> {
		let conn = self.conn.lock().map_err(|_| StorageError::CannotLock)?;
		let mut stmt = conn
			.prepare("SELECT identifier, data FROM state_changes ORDER BY rowid ASC")
			.map_err(StorageError::Sql)?;

		let mut rows = stmt.query([]).map_err(StorageError::Sql)?;

		let mut state_changes = vec![];

		while let Some(row) = rows.next().map_err(StorageError::Sql)? {
			state_changes.push(state_change_from_row(row)?);
		}

		Ok(state_changes)
	}

	/// Store a state change.
	///
	/// A balance proof carried by the state change was received from a partner and is indexed
	/// as such.
	pub fn store_state_change(&self, state_change: StateChange) -> Result<StorageID> {
		let serialized_state_change =
			serde_json::to_string(&state_change).map_err(StorageError::SerializationError)?;
		let ulid = Ulid::new();

		let mut conn = self.conn.lock().map_err(|_| StorageError::CannotLock)?;
		let tx = conn.transaction().map_err(StorageError::Sql)?;
		tx.execute(
			"INSERT INTO state_changes(identifier, data) VALUES(?1, ?2)",
			params![&ulid.to_string(), serialized_state_change],
		)
		.map_err(StorageError::Sql)?;

		if let Some(balance_proof) = state_change.balance_proof() {
			index_balance_proof(&tx, sqlite::DIRECTION_RECEIVED, &ulid, balance_proof)?;
		}
		tx.commit().map_err(StorageError::Sql)?;

		Ok(ulid.into())
	}

	/// Store a list of events produced by the state change `state_change_id`.
	///
	/// Balance proofs carried by the events were sent by this node and are indexed as such.
	pub fn store_events(&self, state_change_id: StorageID, events: Vec<Event>) -> Result<()> {
		let mut conn = self.conn.lock().map_err(|_| StorageError::CannotLock)?;
		let tx = conn.transaction().map_err(StorageError::Sql)?;

		for event in events {
			let serialized_event =
				serde_json::to_string(&event).map_err(StorageError::SerializationError)?;
			let ulid = Ulid::new();
			tx.execute(
				"INSERT INTO state_events(identifier, source_statechange_id, data, timestamp)
				VALUES(?1, ?2, ?3, ?4)",
				params![
					&ulid.to_string(),
					&state_change_id.to_string(),
					serialized_event,
					Utc::now().naive_local()
				],
			)
			.map_err(StorageError::Sql)?;

			if let Some(balance_proof) = event.balance_proof() {
				index_balance_proof(&tx, sqlite::DIRECTION_SENT, &ulid, balance_proof)?;
			}
		}
		tx.commit().map_err(StorageError::Sql)?;

		Ok(())
	}

	/// Return all events with timestamps, in insertion order.
	pub fn events(&self) -> Result<Vec<EventRecord>> {
		let conn = self.conn.lock().map_err(|_| StorageError::CannotLock)?;
		let mut stmt = conn
			.prepare(
				"SELECT identifier, source_statechange_id, data, timestamp
				FROM state_events
				ORDER BY rowid ASC",
			)
			.map_err(StorageError::Sql)?;
		let mut rows = stmt.query(params![]).map_err(StorageError::Sql)?;

		let mut events = vec![];

		while let Some(row) = rows.next().map_err(StorageError::Sql)? {
			events.push(event_from_row(row)?);
		}

		Ok(events)
	}

	/// Get the most recent state change carrying a received balance proof of the channel with
	/// the provided `locksroot`.
	pub fn get_state_change_with_balance_proof_by_locksroot(
		&self,
		canonical_identifier: &CanonicalIdentifier,
		locksroot: Locksroot,
	) -> Result<Option<StateChangeRecord>> {
		let (chain_identifier, token_network_address, channel_identifier, locksroot) =
			index_key(canonical_identifier, locksroot);

		let conn = self.conn.lock().map_err(|_| StorageError::CannotLock)?;
		let mut stmt = conn
			.prepare(
				"SELECT state_changes.identifier, state_changes.data
				FROM balance_proofs
				JOIN state_changes ON state_changes.identifier = balance_proofs.record_identifier
				WHERE balance_proofs.direction = ?1
				AND balance_proofs.chain_identifier = ?2
				AND balance_proofs.token_network_address = ?3
				AND balance_proofs.channel_identifier = ?4
				AND balance_proofs.locksroot = ?5
				ORDER BY balance_proofs.sequence DESC
				LIMIT 1",
			)
			.map_err(StorageError::Sql)?;

		let mut rows = stmt
			.query(params![
				sqlite::DIRECTION_RECEIVED,
				chain_identifier,
				token_network_address,
				channel_identifier,
				locksroot,
			])
			.map_err(StorageError::Sql)?;

		match rows.next().map_err(StorageError::Sql)? {
			Some(row) => Ok(Some(state_change_from_row(row)?)),
			None => Ok(None),
		}
	}

	/// Get the most recent event carrying a sent balance proof of the channel with the provided
	/// `locksroot`.
	pub fn get_event_with_balance_proof_by_locksroot(
		&self,
		canonical_identifier: &CanonicalIdentifier,
		locksroot: Locksroot,
	) -> Result<Option<EventRecord>> {
		let (chain_identifier, token_network_address, channel_identifier, locksroot) =
			index_key(canonical_identifier, locksroot);

		let conn = self.conn.lock().map_err(|_| StorageError::CannotLock)?;
		let mut stmt = conn
			.prepare(
				"SELECT state_events.identifier, state_events.source_statechange_id,
					state_events.data, state_events.timestamp
				FROM balance_proofs
				JOIN state_events ON state_events.identifier = balance_proofs.record_identifier
				WHERE balance_proofs.direction = ?1
				AND balance_proofs.chain_identifier = ?2
				AND balance_proofs.token_network_address = ?3
				AND balance_proofs.channel_identifier = ?4
				AND balance_proofs.locksroot = ?5
				ORDER BY balance_proofs.sequence DESC
				LIMIT 1",
			)
			.map_err(StorageError::Sql)?;

		let mut rows = stmt
			.query(params![
				sqlite::DIRECTION_SENT,
				chain_identifier,
				token_network_address,
				channel_identifier,
				locksroot,
			])
			.map_err(StorageError::Sql)?;

		match rows.next().map_err(StorageError::Sql)? {
			Some(row) => Ok(Some(event_from_row(row)?)),
			None => Ok(None),
		}
	}
}

/// The textual columns a balance proof is indexed under.
fn index_key(
	canonical_identifier: &CanonicalIdentifier,
	locksroot: Locksroot,
) -> (String, String, String, String) {
	(
		canonical_identifier.chain_identifier.to_string(),
		format!("0x{}", hex::encode(canonical_identifier.token_network_address)),
		canonical_identifier.channel_identifier.to_string(),
		format!("0x{}", hex::encode(locksroot)),
	)
}

/// Add a balance proof to the locksroot index.
fn index_balance_proof(
	tx: &Transaction,
	direction: &str,
	record_identifier: &Ulid,
	balance_proof: &BalanceProofState,
) -> Result<()> {
	let (chain_identifier, token_network_address, channel_identifier, locksroot) =
		index_key(&balance_proof.canonical_identifier, balance_proof.locksroot);
	tx.execute(
		"INSERT INTO balance_proofs(
			direction, record_identifier, chain_identifier,
			token_network_address, channel_identifier, locksroot
		) VALUES(?1, ?2, ?3, ?4, ?5, ?6)",
		params![
			direction,
			&record_identifier.to_string(),
			chain_identifier,
			token_network_address,
			channel_identifier,
			locksroot,
		],
	)
	.map_err(StorageError::Sql)?;
	Ok(())
}

/// Build a state change record from an `identifier, data` row.
fn state_change_from_row(row: &Row) -> Result<StateChangeRecord> {
	let identifier: String = row.get(0).map_err(StorageError::Sql)?;
	let data: String = row.get(1).map_err(StorageError::Sql)?;
	Ok(StateChangeRecord {
		identifier: identifier.try_into()?,
		data: serde_json::from_str(&data).map_err(StorageError::SerializationError)?,
	})
}

/// Build an event record from an `identifier, source_statechange_id, data, timestamp` row.
fn event_from_row(row: &Row) -> Result<EventRecord> {
	let identifier: String = row.get(0).map_err(StorageError::Sql)?;
	let state_change_identifier: String = row.get(1).map_err(StorageError::Sql)?;
	let data: String = row.get(2).map_err(StorageError::Sql)?;
	let timestamp: NaiveDateTime = row.get(3).map_err(StorageError::Sql)?;
	Ok(EventRecord {
		identifier: identifier.try_into()?,
		state_change_identifier: state_change_identifier.try_into()?,
		data: serde_json::from_str(&data).map_err(StorageError::SerializationError)?,
		timestamp,
	})
}
