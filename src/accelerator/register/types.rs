//! Transaction envelope and register map types

use std::time::Duration;

use serde::Deserialize;

use crate::accelerator::filter::ColorSample;

/// Register width in bytes.
pub const WORD_BYTES: usize = 4;

/// One register-wide data buffer.
pub type Word = [u8; WORD_BYTES];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Read,
    Write,
    /// Carries no operation; always answered with `GenericError`.
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseStatus {
    Ok,
    /// Offset matched no register (strict decoding only).
    AddressError,
    GenericError,
}

/// How an unmapped offset is reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AddressPolicy {
    /// Logged and answered with `AddressError`.
    #[default]
    Strict,
    /// Logged and answered with `Ok`, for buses that expect the first-generation protocol.
    Legacy,
}

/// Byte layout of the result word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ByteOrder {
    #[default]
    Native,
    Little,
    Big,
}

impl ByteOrder {
    pub fn encode(self, value: i32) -> Word {
        match self {
            ByteOrder::Native => value.to_ne_bytes(),
            ByteOrder::Little => value.to_le_bytes(),
            ByteOrder::Big => value.to_be_bytes(),
        }
    }

    pub fn decode(self, word: Word) -> i32 {
        match self {
            ByteOrder::Native => i32::from_ne_bytes(word),
            ByteOrder::Little => i32::from_le_bytes(word),
            ByteOrder::Big => i32::from_be_bytes(word),
        }
    }
}

/// Registers owned by the block.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Register {
    /// Write-only; bytes 0..3 are red, green, blue.
    IngestPixel,
    /// Read-only; the next filtered value.
    FetchResult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegisterMap {
    pub base_offset: u64,
    pub ingest_addr: u64,
    pub result_addr: u64,
}

impl RegisterMap {
    /// Bus address to block-relative offset. Addresses below the base wrap
    /// to large offsets, which then fail to decode.
    pub fn translate(&self, address: u64) -> u64 {
        address.wrapping_sub(self.base_offset)
    }

    pub fn decode(&self, offset: u64) -> Option<Register> {
        if offset == self.ingest_addr {
            Some(Register::IngestPixel)
        } else if offset == self.result_addr {
            Some(Register::FetchResult)
        } else {
            None
        }
    }

    /// Absolute bus address of `register`.
    pub fn address_of(&self, register: Register) -> u64 {
        let offset = match register {
            Register::IngestPixel => self.ingest_addr,
            Register::FetchResult => self.result_addr,
        };
        self.base_offset.wrapping_add(offset)
    }
}

/// One bus request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transaction {
    pub command: Command,
    pub address: u64,
    /// Transport latency, waited out before the request is decoded.
    pub delay: Duration,
    pub data: Word,
}

impl Transaction {
    pub fn read(address: u64, delay: Duration) -> Self {
        Self {
            command: Command::Read,
            address,
            delay,
            data: [0; WORD_BYTES],
        }
    }

    pub fn write(address: u64, delay: Duration, data: Word) -> Self {
        Self {
            command: Command::Write,
            address,
            delay,
            data,
        }
    }

    pub fn write_color(address: u64, delay: Duration, sample: ColorSample) -> Self {
        Self::write(address, delay, [sample.red, sample.green, sample.blue, 0])
    }

    pub fn ignore(address: u64) -> Self {
        Self {
            command: Command::Ignore,
            address,
            delay: Duration::ZERO,
            data: [0; WORD_BYTES],
        }
    }

    /// Replaces the data buffer, e.g. to detect whether a read wrote it.
    pub fn with_data(mut self, data: Word) -> Self {
        self.data = data;
        self
    }
}

/// Answer to a [`Transaction`]. `data` is the request buffer, overwritten
/// only by a successful read of the result register.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: ResponseStatus,
    pub data: Word,
    read_hit: bool,
}

impl TransportResponse {
    pub(crate) fn new(status: ResponseStatus, data: Word) -> Self {
        Self {
            status,
            data,
            read_hit: false,
        }
    }

    pub(crate) fn read_hit(data: Word) -> Self {
        Self {
            status: ResponseStatus::Ok,
            data,
            read_hit: true,
        }
    }

    /// The filtered value, if this response carries one.
    pub fn result(&self, order: ByteOrder) -> Option<i32> {
        self.read_hit.then(|| order.decode(self.data))
    }
}
