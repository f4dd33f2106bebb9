use std::time::Duration;

use tracing::{error, instrument, trace};

use crate::accelerator::channels::IngestPorts;
use crate::accelerator::common::error::Result;
use crate::accelerator::config::AcceleratorConfig;
use crate::accelerator::filter::ColorSample;
use crate::accelerator::register::types::{
    AddressPolicy, ByteOrder, Command, Register, RegisterMap, ResponseStatus, Transaction,
    TransportResponse, Word,
};

/// Memory-mapped surface of the block: pixel writes in, results out.
#[derive(Debug)]
pub struct RegisterFront {
    ports: IngestPorts,
    map: RegisterMap,
    byte_order: ByteOrder,
    policy: AddressPolicy,
}

impl RegisterFront {
    pub fn new(ports: IngestPorts, config: &AcceleratorConfig) -> Self {
        Self {
            ports,
            map: config.register_map(),
            byte_order: config.byte_order,
            policy: config.address_policy,
        }
    }

    /// Waits out `txn.delay`, then decodes and executes the request.
    ///
    /// Suspends while the target stream is full (write) or empty (read).
    /// Address misses and unsupported commands are reported in the
    /// response status; `Err` means the filter engine is gone.
    #[instrument(level = "debug", skip(self, txn), fields(command = ?txn.command, address = txn.address))]
    pub async fn transport(&mut self, txn: Transaction) -> Result<TransportResponse> {
        if !txn.delay.is_zero() {
            tokio::time::sleep(txn.delay).await;
        }

        let offset = self.map.translate(txn.address);

        match txn.command {
            Command::Read => self.read(offset, txn.data).await,
            Command::Write => self.write(offset, txn.data).await,
            Command::Ignore => Ok(TransportResponse::new(ResponseStatus::GenericError, txn.data)),
        }
    }

    async fn read(&mut self, offset: u64, data: Word) -> Result<TransportResponse> {
        match self.map.decode(offset) {
            Some(Register::FetchResult) => {
                let result = self.ports.read_result().await?;
                trace!("Read result {}", result);
                Ok(TransportResponse::read_hit(self.byte_order.encode(result)))
            }
            _ => {
                error!("READ Error! address {:#010x} is not valid", offset);
                Ok(TransportResponse::new(self.miss_status(), data))
            }
        }
    }

    async fn write(&mut self, offset: u64, data: Word) -> Result<TransportResponse> {
        match self.map.decode(offset) {
            Some(Register::IngestPixel) => {
                let sample = ColorSample::new(data[0], data[1], data[2]);
                self.ports.write_color(sample).await?;
                trace!("Wrote pixel {:?}", sample);
                Ok(TransportResponse::new(ResponseStatus::Ok, data))
            }
            _ => {
                error!("WRITE Error! address {:#010x} is not valid", offset);
                Ok(TransportResponse::new(self.miss_status(), data))
            }
        }
    }

    fn miss_status(&self) -> ResponseStatus {
        match self.policy {
            AddressPolicy::Strict => ResponseStatus::AddressError,
            AddressPolicy::Legacy => ResponseStatus::Ok,
        }
    }

    /// Writes one pixel to the ingest register with no transport delay.
    pub async fn write_pixel(&mut self, sample: ColorSample) -> Result<ResponseStatus> {
        let address = self.map.address_of(Register::IngestPixel);
        let response = self
            .transport(Transaction::write_color(address, Duration::ZERO, sample))
            .await?;
        Ok(response.status)
    }

    /// Reads the next result from the result register with no transport delay.
    pub async fn read_result(&mut self) -> Result<Option<i32>> {
        let address = self.map.address_of(Register::FetchResult);
        let response = self.transport(Transaction::read(address, Duration::ZERO)).await?;
        Ok(response.result(self.byte_order))
    }
}
