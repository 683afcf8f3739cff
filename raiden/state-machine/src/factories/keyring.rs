use raiden_primitives::types::Address;
use web3::signing::keccak256;

pub const ALICE: &str = "ALICE";
pub const BOB: &str = "BOB";
pub const CHARLIE: &str = "CHARLIE";
pub const DAVE: &str = "DAVE";

/// Fixed identities used across tests.
pub enum Keyring {
	Alice,
	Bob,
	Charlie,
	Dave,
}

impl Keyring {
	pub fn name(&self) -> &'static str {
		match self {
			Self::Alice => ALICE,
			Self::Bob => BOB,
			Self::Charlie => CHARLIE,
			Self::Dave => DAVE,
		}
	}

	pub fn address(&self) -> Address {
		let hash = keccak256(self.name().as_bytes());
		Address::from_slice(&hash[12..])
	}
}
