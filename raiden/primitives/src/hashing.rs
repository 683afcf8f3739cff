use web3::signing::keccak256;

use crate::{
	constants::LOCKSROOT_OF_NO_LOCKS,
	types::{
		BalanceHash,
		LockedAmount,
		Locksroot,
		TokenAmount,
	},
};

/// Compute the balance hash committed to by a balance proof.
///
/// A proof with nothing transferred, nothing locked and no pending locks hashes to zero.
pub fn hash_balance_data(
	transferred_amount: TokenAmount,
	locked_amount: LockedAmount,
	locksroot: Locksroot,
) -> Result<BalanceHash, String> {
	if locksroot.is_zero() {
		return Err("Can't hash empty locksroot".to_string())
	}

	if transferred_amount.is_zero() &&
		locked_amount.is_zero() &&
		locksroot == *LOCKSROOT_OF_NO_LOCKS
	{
		return Ok(BalanceHash::zero())
	}

	let mut transferred_amount_in_bytes: [u8; 32] = [0; 32];
	transferred_amount.to_big_endian(&mut transferred_amount_in_bytes);

	let mut locked_amount_in_bytes: [u8; 32] = [0; 32];
	locked_amount.to_big_endian(&mut locked_amount_in_bytes);

	let hash = keccak256(
		&[&transferred_amount_in_bytes[..], &locked_amount_in_bytes[..], locksroot.as_bytes()].concat(),
	);
	Ok(BalanceHash::from_slice(&hash))
}
