//! Block configuration
//!
//! Fixed at construction: the filter and register front only ever read it.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Deserializer};

use crate::accelerator::common::error::{AcceleratorError, Result};
use crate::accelerator::filter::Mask;
use crate::accelerator::register::{AddressPolicy, ByteOrder, RegisterMap};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AcceleratorConfig {
    /// Simulated time charged per algorithm step. tokio timers resolve to
    /// whole milliseconds, so the tick must be a whole number of them.
    #[serde(rename = "tick_ns", deserialize_with = "duration_from_nanos")]
    pub tick: Duration,
    pub mask: Mask,
    pub base_offset: u64,
    pub ingest_addr: u64,
    pub result_addr: u64,
    /// Depth of every colour stream and of the result stream.
    pub fifo_capacity: usize,
    pub byte_order: ByteOrder,
    pub address_policy: AddressPolicy,
}

impl Default for AcceleratorConfig {
    fn default() -> Self {
        Self {
            tick: Duration::from_millis(1),
            mask: Mask::default(),
            base_offset: 0,
            ingest_addr: 0x0,
            result_addr: 0x4,
            fifo_capacity: 16,
            byte_order: ByteOrder::Native,
            address_policy: AddressPolicy::Strict,
        }
    }
}

fn duration_from_nanos<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Duration, D::Error> {
    u64::deserialize(deserializer).map(Duration::from_nanos)
}

impl AcceleratorConfig {
    pub fn builder() -> AcceleratorConfigBuilder {
        AcceleratorConfigBuilder::default()
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(source).map_err(|e| AcceleratorError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let source = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Result<()> {
        if self.fifo_capacity == 0 {
            return Err(AcceleratorError::InvalidConfig(
                "fifo_capacity must be at least 1".to_string(),
            ));
        }
        if self.tick.is_zero() {
            return Err(AcceleratorError::InvalidConfig(
                "tick must be non-zero".to_string(),
            ));
        }
        if self.tick.subsec_nanos() % 1_000_000 != 0 {
            return Err(AcceleratorError::InvalidConfig(format!(
                "tick {:?} is not a whole number of milliseconds",
                self.tick
            )));
        }
        if self.ingest_addr == self.result_addr {
            return Err(AcceleratorError::InvalidConfig(format!(
                "ingest and result registers share offset {:#x}",
                self.ingest_addr
            )));
        }
        Ok(())
    }

    pub fn register_map(&self) -> RegisterMap {
        RegisterMap {
            base_offset: self.base_offset,
            ingest_addr: self.ingest_addr,
            result_addr: self.result_addr,
        }
    }
}

#[derive(Default)]
pub struct AcceleratorConfigBuilder {
    tick: Option<Duration>,
    mask: Option<Mask>,
    base_offset: Option<u64>,
    ingest_addr: Option<u64>,
    result_addr: Option<u64>,
    fifo_capacity: Option<usize>,
    byte_order: Option<ByteOrder>,
    address_policy: Option<AddressPolicy>,
}

impl AcceleratorConfigBuilder {
    pub fn tick(mut self, tick: Duration) -> Self {
        self.tick = Some(tick);
        self
    }

    pub fn mask(mut self, mask: Mask) -> Self {
        self.mask = Some(mask);
        self
    }

    pub fn base_offset(mut self, base_offset: u64) -> Self {
        self.base_offset = Some(base_offset);
        self
    }

    pub fn ingest_addr(mut self, addr: u64) -> Self {
        self.ingest_addr = Some(addr);
        self
    }

    pub fn result_addr(mut self, addr: u64) -> Self {
        self.result_addr = Some(addr);
        self
    }

    pub fn fifo_capacity(mut self, capacity: usize) -> Self {
        self.fifo_capacity = Some(capacity);
        self
    }

    pub fn byte_order(mut self, order: ByteOrder) -> Self {
        self.byte_order = Some(order);
        self
    }

    pub fn address_policy(mut self, policy: AddressPolicy) -> Self {
        self.address_policy = Some(policy);
        self
    }

    pub fn build(self) -> AcceleratorConfig {
        let default = AcceleratorConfig::default();
        AcceleratorConfig {
            tick: self.tick.unwrap_or(default.tick),
            mask: self.mask.unwrap_or(default.mask),
            base_offset: self.base_offset.unwrap_or(default.base_offset),
            ingest_addr: self.ingest_addr.unwrap_or(default.ingest_addr),
            result_addr: self.result_addr.unwrap_or(default.result_addr),
            fifo_capacity: self.fifo_capacity.unwrap_or(default.fifo_capacity),
            byte_order: self.byte_order.unwrap_or(default.byte_order),
            address_policy: self.address_policy.unwrap_or(default.address_policy),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_config_builder() {
        let config = AcceleratorConfig::builder()
            .tick(Duration::from_millis(5))
            .base_offset(0x7300_0000)
            .fifo_capacity(4)
            .address_policy(AddressPolicy::Legacy)
            .build();

        assert_eq!(config.tick, Duration::from_millis(5));
        assert_eq!(config.base_offset, 0x7300_0000);
        assert_eq!(config.fifo_capacity, 4);
        assert_eq!(config.address_policy, AddressPolicy::Legacy);
        assert_eq!(config.result_addr, 0x4);
        assert_eq!(config.mask, Mask::default());
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let config = AcceleratorConfig::builder().fifo_capacity(0).build();
        assert!(matches!(config.validate(), Err(AcceleratorError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_shared_offsets() {
        let config = AcceleratorConfig::builder().ingest_addr(0x8).result_addr(0x8).build();
        assert!(matches!(config.validate(), Err(AcceleratorError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_tick() {
        let config = AcceleratorConfig::builder().tick(Duration::ZERO).build();
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_sub_ms_tick() {
        for tick in [Duration::from_micros(100), Duration::from_micros(1500)] {
            let config = AcceleratorConfig::builder().tick(tick).build();
            assert!(matches!(config.validate(), Err(AcceleratorError::InvalidConfig(_))));
        }

        let config = AcceleratorConfig::builder().tick(Duration::from_millis(3)).build();
        assert!(config.validate().is_ok());

        let result = AcceleratorConfig::from_toml_str("tick_ns = 100000");
        assert!(matches!(result, Err(AcceleratorError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_toml() {
        let config = AcceleratorConfig::from_toml_str(
            r#"
            tick_ns = 2000000
            mask = [[0, 1, 0], [1, 6, 1], [0, 1, 0]]
            base_offset = 0x73000000
            byte_order = "big"
            address_policy = "legacy"
            "#,
        )
        .unwrap();

        assert_eq!(config.tick, Duration::from_millis(2));
        assert_eq!(config.mask, Mask::new([[0, 1, 0], [1, 6, 1], [0, 1, 0]]));
        assert_eq!(config.base_offset, 0x7300_0000);
        assert_eq!(config.byte_order, ByteOrder::Big);
        assert_eq!(config.address_policy, AddressPolicy::Legacy);
        assert_eq!(config.fifo_capacity, 16);
    }

    #[test]
    fn test_from_toml_rejects_unknown_keys() {
        let result = AcceleratorConfig::from_toml_str("clock_period = 10");
        assert!(matches!(result, Err(AcceleratorError::ConfigParse(_))));
    }

    #[test]
    fn test_load_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "fifo_capacity = 3").unwrap();
        writeln!(file, "result_addr = 0x10").unwrap();

        let config = AcceleratorConfig::load(file.path()).unwrap();
        assert_eq!(config.fifo_capacity, 3);
        assert_eq!(config.result_addr, 0x10);
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = AcceleratorConfig::load(dir.path().join("absent.toml"));
        assert!(matches!(result, Err(AcceleratorError::IoError(_))));
    }
}
