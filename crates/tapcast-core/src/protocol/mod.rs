//! Control-message protocol: typed messages and their binary codec.

pub mod codec;
pub mod messages;

pub use codec::{decode_message, encode_message, ProtocolError};
pub use messages::{ControlMessage, MessageType, SEQUENCE_INVALID};
