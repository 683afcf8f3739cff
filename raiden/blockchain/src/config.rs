use raiden_primitives::types::RevealTimeout;
use raiden_state_machine::{
	constants::DEFAULT_REVEAL_TIMEOUT,
	types::MediationFeeConfig,
};
use serde::{
	Deserialize,
	Serialize,
};

/// Parameters of the node applied to the channels it opens.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DecoderConfig {
	/// Reveal timeout of newly opened channels.
	pub reveal_timeout: RevealTimeout,
	/// Mediation fees charged on newly opened and funded channels.
	pub mediation_config: MediationFeeConfig,
}

impl Default for DecoderConfig {
	fn default() -> Self {
		Self {
			reveal_timeout: RevealTimeout::from(DEFAULT_REVEAL_TIMEOUT),
			mediation_config: MediationFeeConfig::default(),
		}
	}
}
