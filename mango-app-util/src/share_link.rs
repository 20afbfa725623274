mod components;
mod decode;
mod field;
mod protocol;
mod security;
mod transport;

pub use components::LinkComponents;
pub use decode::{decode_share_link, DecodeError, DecodeResult, Field};
