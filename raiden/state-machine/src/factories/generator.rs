use raiden_primitives::types::{
	Bytes,
	Locksroot,
	Secret,
};
use rand::{
	distributions::Alphanumeric,
	thread_rng,
	Rng,
	RngCore,
};

use crate::constants::SECRET_LENGTH;

pub struct Generator;

impl Generator {
	pub fn random_secret() -> Secret {
		Bytes(
			thread_rng()
				.sample_iter(&Alphanumeric)
				.take(SECRET_LENGTH as usize)
				.collect::<Vec<u8>>(),
		)
	}

	pub fn random_locksroot() -> Locksroot {
		Locksroot::from_slice(&Self::random_bytes())
	}

	pub fn random_bytes() -> [u8; 32] {
		let mut bytes = [0u8; 32];
		thread_rng().fill_bytes(&mut bytes);
		bytes
	}
}
