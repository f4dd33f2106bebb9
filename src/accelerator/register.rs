//! Register front
//!
//! Request/response transport over the two registers the block owns.

pub mod types;
mod front;


pub use types::{
    AddressPolicy, ByteOrder, Command, Register, RegisterMap, ResponseStatus, Transaction,
    TransportResponse, WORD_BYTES, Word,
};
pub use front::RegisterFront;
