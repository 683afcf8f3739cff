use std::str::FromStr;

use web3::types::U256;

use crate::{
	constants::LOCKSROOT_OF_NO_LOCKS,
	hashing::hash_balance_data,
	types::{
		Address,
		BalanceHash,
		CanonicalIdentifier,
		ChainID,
		Locksroot,
		U64,
	},
};

#[test]
fn test_chain_id_known_networks() {
	assert_eq!(ChainID::from(1u64), ChainID::Mainnet);
	assert_eq!(ChainID::from(5u64), ChainID::Goerli);
	assert_eq!(ChainID::from(337u64), ChainID::Private(U256::from(337u64)));
	assert_eq!(U256::from(ChainID::Goerli), U256::from(5u64));
	assert_eq!(ChainID::from_str("4"), Ok(ChainID::Rinkeby));
	assert!(ChainID::from_str("four").is_err());
}

#[test]
fn test_canonical_identifier_serde() {
	let canonical_identifier = CanonicalIdentifier {
		chain_identifier: ChainID::Private(U256::from(337u64)),
		token_network_address: Address::repeat_byte(0x11),
		channel_identifier: U256::from(7u64),
	};
	let serialized = serde_json::to_string(&canonical_identifier).expect("Should serialize");
	assert!(serialized.contains("\"chain_identifier\":\"337\""));

	let deserialized: CanonicalIdentifier =
		serde_json::from_str(&serialized).expect("Should deserialize");
	assert_eq!(deserialized, canonical_identifier);
}

#[test]
fn test_u64_accepts_numbers_and_strings() {
	let from_number: U64 = serde_json::from_str("42").expect("Should deserialize");
	let from_string: U64 = serde_json::from_str("\"42\"").expect("Should deserialize");
	assert_eq!(from_number, U64::from(42u64));
	assert_eq!(from_number, from_string);
	assert_eq!(serde_json::to_string(&from_number).expect("Should serialize"), "\"42\"");
	assert_eq!(U64::from_str("0x2a"), Ok(from_number));
}

#[test]
fn test_hash_balance_data() {
	let empty = hash_balance_data(U256::zero(), U256::zero(), *LOCKSROOT_OF_NO_LOCKS)
		.expect("Should hash");
	assert_eq!(empty, BalanceHash::zero());

	let hash = hash_balance_data(U256::from(10u64), U256::zero(), *LOCKSROOT_OF_NO_LOCKS)
		.expect("Should hash");
	assert_ne!(hash, BalanceHash::zero());

	assert!(hash_balance_data(U256::zero(), U256::zero(), Locksroot::zero()).is_err());
}
