mod decode;
pub mod factories;
