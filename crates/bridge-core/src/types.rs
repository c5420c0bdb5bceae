//! Core type definitions for the bridge pool

use std::fmt;
use std::str::FromStr;

use num_bigint::BigUint;
use serde::{Deserialize, Serialize};

use crate::errors::{AddressError, DenomError};

/// Ethereum address: "0x" followed by 40 hex digits (mixed case kept as given)
///
/// Construction is the only validation point, so every value of this type
/// is well formed. Ordering is the byte-wise ordering of the string form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EthAddress(String);

impl EthAddress {
    pub fn new(address: impl Into<String>) -> Result<Self, AddressError> {
        let address = address.into();
        validate_eth_address(&address)?;
        Ok(Self(address))
    }

    /// The all-zero address
    pub fn zero() -> Self {
        Self(constants::ZERO_ADDRESS.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Raw 20 address bytes
    pub fn to_bytes(&self) -> [u8; 20] {
        let mut out = [0u8; 20];
        // Validated at construction, decoding cannot fail.
        if let Ok(bytes) = hex::decode(&self.0[2..]) {
            out.copy_from_slice(&bytes);
        }
        out
    }

    pub fn is_zero(&self) -> bool {
        self.to_bytes() == [0u8; 20]
    }
}

impl fmt::Display for EthAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for EthAddress {
    type Err = AddressError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl TryFrom<String> for EthAddress {
    type Error = AddressError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<EthAddress> for String {
    fn from(value: EthAddress) -> Self {
        value.0
    }
}

/// An address that may not be known yet (e.g. an undeployed bridge contract)
pub type OptionalEthAddress = Option<EthAddress>;

/// Validate an Ethereum address string.
///
/// Must be non-empty, exactly 42 characters, "0x" prefixed, with 40 hex digits.
pub fn validate_eth_address(address: &str) -> Result<(), AddressError> {
    if address.is_empty() {
        return Err(AddressError::Empty);
    }
    if address.len() != constants::ETH_ADDRESS_LEN {
        return Err(AddressError::WrongLength {
            address: address.to_string(),
            expected: constants::ETH_ADDRESS_LEN,
            actual: address.len(),
        });
    }
    if !address.starts_with("0x") || hex::decode(&address[2..]).is_err() {
        return Err(AddressError::InvalidFormat {
            address: address.to_string(),
        });
    }
    Ok(())
}

/// Account identifier on the local chain (sender / refund recipient)
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(pub String);

impl AccountId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Quantity of a native-chain denomination
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coin {
    pub denom: String,
    #[serde(with = "amount_serde")]
    pub amount: BigUint,
}

impl Coin {
    pub fn new(denom: impl Into<String>, amount: impl Into<BigUint>) -> Self {
        Self {
            denom: denom.into(),
            amount: amount.into(),
        }
    }

    /// Check the denomination is well formed
    pub fn validate(&self) -> Result<(), DenomError> {
        validate_denom(&self.denom)
    }

    /// Sum of two coins of the same denomination
    pub fn checked_add(&self, other: &Coin) -> Option<Coin> {
        if self.denom != other.denom {
            return None;
        }
        Some(Coin {
            denom: self.denom.clone(),
            amount: &self.amount + &other.amount,
        })
    }
}

impl fmt::Display for Coin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.amount, self.denom)
    }
}

/// Validate a native denomination: `[a-zA-Z][a-zA-Z0-9/:._-]{2,127}`
pub fn validate_denom(denom: &str) -> Result<(), DenomError> {
    let invalid = || DenomError::Invalid {
        denom: denom.to_string(),
    };
    let mut chars = denom.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return Err(invalid()),
    }
    if !(3..=128).contains(&denom.len()) {
        return Err(invalid());
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '/' | ':' | '.' | '_' | '-')) {
        return Err(invalid());
    }
    Ok(())
}

/// Amount of a bridge-chain (ERC20) token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenAmount {
    pub contract: EthAddress,
    #[serde(with = "amount_serde")]
    pub amount: BigUint,
}

impl TokenAmount {
    pub fn new(contract: EthAddress, amount: impl Into<BigUint>) -> Self {
        Self {
            contract,
            amount: amount.into(),
        }
    }

    /// Sum of two amounts on the same contract.
    ///
    /// Adding amounts of different contracts is a caller bug; `None` is
    /// returned and the caller escalates.
    pub fn checked_add(&self, other: &TokenAmount) -> Option<TokenAmount> {
        if self.contract != other.contract {
            return None;
        }
        Some(TokenAmount {
            contract: self.contract.clone(),
            amount: &self.amount + &other.amount,
        })
    }

    /// The voucher coin representing this amount on the local chain
    pub fn to_bridge_coin(&self) -> Coin {
        Coin::new(bridge_denom(&self.contract), self.amount.clone())
    }
}

impl fmt::Display for TokenAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} of {}", self.amount, self.contract)
    }
}

/// Voucher denomination for a bridge-originated token contract
pub fn bridge_denom(contract: &EthAddress) -> String {
    format!("{}{}", constants::BRIDGE_DENOM_PREFIX, contract)
}

/// Parse a voucher denomination back into its token contract
pub fn bridge_denom_to_contract(denom: &str) -> Result<EthAddress, DenomError> {
    let Some(address) = denom.strip_prefix(constants::BRIDGE_DENOM_PREFIX) else {
        return Err(DenomError::WrongPrefix {
            denom: denom.to_string(),
            prefix: constants::BRIDGE_DENOM_PREFIX,
        });
    };
    let contract = EthAddress::new(address)?;
    if denom.len() != constants::BRIDGE_DENOM_LEN {
        return Err(DenomError::WrongLength {
            denom: denom.to_string(),
            expected: constants::BRIDGE_DENOM_LEN,
            actual: denom.len(),
        });
    }
    Ok(contract)
}

/// State-machine execution context handed to every pool operation
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionContext {
    pub block_height: BlockHeight,
}

impl ExecutionContext {
    pub fn new(block_height: BlockHeight) -> Self {
        Self { block_height }
    }

    /// An uninitialized context; operations reject it
    pub fn is_zero(&self) -> bool {
        self.block_height == 0
    }
}

/// Block height
pub type BlockHeight = u64;

/// Decimal-string serde for big amounts
pub mod amount_serde {
    use num_bigint::BigUint;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(amount: &BigUint, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&amount.to_str_radix(10))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<BigUint, D::Error> {
        let s = String::deserialize(deserializer)?;
        BigUint::parse_bytes(s.as_bytes(), 10)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid amount: {}", s)))
    }
}

/// Constants
pub mod constants {
    /// Length of an Ethereum address string including "0x"
    pub const ETH_ADDRESS_LEN: usize = 42;

    /// Prefix of voucher denominations minted for bridge-originated tokens
    pub const BRIDGE_DENOM_PREFIX: &str = "gravity";

    /// Length of a voucher denomination
    pub const BRIDGE_DENOM_LEN: usize = BRIDGE_DENOM_PREFIX.len() + ETH_ADDRESS_LEN;

    pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";
}
