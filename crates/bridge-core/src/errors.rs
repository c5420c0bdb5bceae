//! Error types for the bridge pool

use num_bigint::BigUint;
use thiserror::Error;

/// Ethereum address validation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AddressError {
    #[error("Address is empty")]
    Empty,

    #[error("Address {address} has wrong length: expected {expected}, actual {actual}")]
    WrongLength {
        address: String,
        expected: usize,
        actual: usize,
    },

    #[error("Address {address} is not 0x followed by 40 hex digits")]
    InvalidFormat { address: String },
}

/// Native denomination and bridge voucher denomination errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DenomError {
    #[error("Invalid denomination: {denom}")]
    Invalid { denom: String },

    #[error("Denomination {denom} does not start with {prefix}")]
    WrongPrefix { denom: String, prefix: &'static str },

    #[error("Denomination {denom} has length {actual}, expected {expected}")]
    WrongLength {
        denom: String,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid contract in denomination: {0}")]
    Contract(#[from] AddressError),
}

/// Custody subsystem errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LedgerError {
    #[error("Insufficient funds in {account}: need {required}{denom}, have {available}{denom}")]
    InsufficientFunds {
        account: String,
        denom: String,
        required: BigUint,
        available: BigUint,
    },

    #[error("Insufficient module custody: need {required}{denom}, have {available}{denom}")]
    InsufficientCustody {
        denom: String,
        required: BigUint,
        available: BigUint,
    },

    #[error("Ledger operation {operation} is disabled")]
    Disabled { operation: &'static str },

    #[error("Invalid coin: {0}")]
    InvalidCoin(#[from] DenomError),
}

/// Token registry lookup errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    #[error("No bridge contract registered for denomination {denom}")]
    UnknownDenom { denom: String },

    #[error("Denomination {denom} is already mapped to contract {contract}")]
    DenomTaken { denom: String, contract: String },

    #[error("Contract {contract} is already mapped to denomination {denom}")]
    ContractTaken { contract: String, denom: String },

    #[error("Denomination lookup failed: {0}")]
    Denom(#[from] DenomError),
}

/// Faults that must abort the whole enclosing state transition.
///
/// These are never handled locally. The executor that owns the transaction
/// must discard every effect of the transition when it sees one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AbortError {
    #[error("Burn of {amount}{denom} failed after lock succeeded: {source}")]
    BurnAfterLock {
        denom: String,
        amount: BigUint,
        #[source]
        source: LedgerError,
    },

    #[error("Unexpected fee contract {found} on transfer {id} while aggregating fees for {expected}")]
    FeeContractMismatch {
        expected: String,
        found: String,
        id: u64,
    },

    #[error("Transfer {id} mixes token contract {token} with fee contract {fee}")]
    TokenContractMismatch { token: String, fee: String, id: u64 },
}

/// Errors returned by pool operations
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Sender {requester} did not send transfer {id}")]
    Unauthorized { requester: String, id: u64 },

    #[error("Transfer {id} is not in the unbatched pool, it must be in a batch")]
    NotInPool { id: u64 },

    #[error("Pool transaction not found: {0}")]
    NotFound(String),

    #[error("Duplicate pool entry: {0}")]
    Duplicate(String),

    #[error("Pool state corrupted: {0}")]
    Corrupted(String),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Token registry error: {0}")]
    Registry(#[from] RegistryError),

    #[error("Transition aborted: {0}")]
    Abort(#[from] AbortError),
}

/// Result type alias for pool operations
pub type Result<T> = std::result::Result<T, PoolError>;

impl PoolError {
    /// Stable error code for callers and logs
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidArgument(_) => "invalid_argument",
            Self::Unauthorized { .. } => "unauthorized",
            Self::NotInPool { .. } => "not_in_pool",
            Self::NotFound(_) => "not_found",
            Self::Duplicate(_) => "duplicate",
            Self::Corrupted(_) => "corrupted",
            Self::Ledger(_) => "ledger",
            Self::Registry(_) => "registry",
            Self::Abort(_) => "abort",
        }
    }

    /// Whether the enclosing transition must be aborted unconditionally
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Abort(_))
    }
}
