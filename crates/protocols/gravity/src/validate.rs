//! Destination address validation

use bridge_core::{validate_eth_address, EthAddress, PoolConfig};

/// Checks a withdrawal destination before any state changes
pub trait AddressValidator {
    fn validate(&self, address: &str) -> Result<(), String>;
}

/// Format check for Ethereum destinations
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EthAddressValidator {
    /// Refuse the all-zero address
    pub reject_zero: bool,
}

impl EthAddressValidator {
    pub fn from_config(config: &PoolConfig) -> Self {
        Self {
            reject_zero: config.reject_zero_destination,
        }
    }
}

impl AddressValidator for EthAddressValidator {
    fn validate(&self, address: &str) -> Result<(), String> {
        validate_eth_address(address).map_err(|e| e.to_string())?;
        if self.reject_zero && address == EthAddress::zero().as_str() {
            return Err("Destination cannot be the zero address".to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ethereum_valid() {
        let addr = "0x742d35Cc6634C0532925a3b844Bc9e7595f2bD08";
        assert!(EthAddressValidator::default().validate(addr).is_ok());
    }

    #[test]
    fn test_ethereum_invalid_length() {
        assert!(EthAddressValidator::default().validate("0x742d35").is_err());
    }

    #[test]
    fn test_non_hex_characters() {
        let addr = "0x742d35Cc6634C0532925a3b844Bc9e7595f2bDXY";
        assert!(EthAddressValidator::default().validate(addr).is_err());
    }

    #[test]
    fn test_empty_address() {
        assert_eq!(
            EthAddressValidator::default().validate(""),
            Err("Address is empty".to_string())
        );
    }

    #[test]
    fn test_zero_address_policy() {
        let zero = "0x0000000000000000000000000000000000000000";
        assert!(EthAddressValidator::default().validate(zero).is_ok());

        let config = PoolConfig {
            reject_zero_destination: true,
            ..PoolConfig::default()
        };
        assert!(EthAddressValidator::from_config(&config).validate(zero).is_err());
    }
}
