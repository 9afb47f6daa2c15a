use std::fmt::{Display, Formatter};

use thiserror::Error;

use crate::domain::SubmitStage;

/// Bad user input. Raised before any network call and never leaves the
/// component that detected it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("search query is empty")]
    EmptyQuery,
    #[error("unrecognised search query {0:?}")]
    InvalidQuery(String),
    #[error("recovery phrase is empty")]
    EmptyPhrase,
    #[error("recovery phrase is invalid: {0}")]
    InvalidPhrase(String),
    #[error("amount must be a positive TRX value")]
    InvalidAmount,
    #[error("resource type is required")]
    MissingResourceType,
    #[error("unknown resource type {0:?} (expected ENERGY or BANDWIDTH)")]
    InvalidResourceType(String),
    #[error("receiver {0:?} is not a valid address")]
    InvalidReceiver(String),
    #[error("no wallet is loaded")]
    NoActiveWallet,
    #[error("another stake action is still awaiting acknowledgement")]
    StakeInFlight,
    #[error("clearing the wallet needs explicit confirmation")]
    ConfirmationRequired,
    #[error("a wallet is already stored; clear it before importing another")]
    WalletExists,
}

impl ValidationError {
    /// The input field the error refers to.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::EmptyQuery | ValidationError::InvalidQuery(_) => "query",
            ValidationError::EmptyPhrase | ValidationError::InvalidPhrase(_) => "phrase",
            ValidationError::InvalidAmount => "amount",
            ValidationError::MissingResourceType | ValidationError::InvalidResourceType(_) => {
                "resource"
            }
            ValidationError::InvalidReceiver(_) => "receiver",
            ValidationError::NoActiveWallet | ValidationError::WalletExists => "wallet",
            ValidationError::StakeInFlight => "stake",
            ValidationError::ConfirmationRequired => "confirm",
        }
    }
}

/// Failure talking to the node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("node unreachable: {0}")]
    Transport(String),
    #[error("node returned an error: {0}")]
    Rpc(String),
    #[error("unexpected node response: {0}")]
    Decode(String),
    #[error("signing failed: {0}")]
    Signing(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("wallet store I/O failed: {0}")]
    Io(String),
    #[error("wallet record is unreadable: {0}")]
    Corrupt(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("{0}")]
    InvalidPhrase(String),
    #[error("key derivation failed: {0}")]
    Derivation(String),
}

/// Short, user-facing classification of a failure.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Network,
    NotFound,
    Rejected,
    Storage,
    /// A broken invariant inside the crate rather than bad input or I/O.
    Internal,
}

impl Display for ErrorCategory {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            ErrorCategory::Validation => "validation",
            ErrorCategory::Network => "network",
            ErrorCategory::NotFound => "not-found",
            ErrorCategory::Rejected => "rejected",
            ErrorCategory::Storage => "storage",
            ErrorCategory::Internal => "internal",
        };
        f.write_str(label)
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DashboardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Transport(#[from] LedgerError),
    #[error("{stage} step failed: {source}")]
    Submission {
        stage: SubmitStage,
        source: LedgerError,
    },
    #[error("{0} not found")]
    NotFound(String),
    #[error("node declined transaction {tx_id}: {reason}")]
    Rejected { tx_id: String, reason: String },
    #[error("stored wallet discarded: {0}")]
    CorruptState(String),
    #[error(transparent)]
    Storage(#[from] StoreError),
    #[error("stake phase transition failed")]
    StateTransitionFailed,
}

impl DashboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashboardError::Validation(_) => ErrorCategory::Validation,
            DashboardError::Transport(_) | DashboardError::Submission { .. } => {
                ErrorCategory::Network
            }
            DashboardError::NotFound(_) => ErrorCategory::NotFound,
            DashboardError::Rejected { .. } => ErrorCategory::Rejected,
            DashboardError::CorruptState(_) | DashboardError::Storage(_) => {
                ErrorCategory::Storage
            }
            DashboardError::StateTransitionFailed => ErrorCategory::Internal,
        }
    }

    /// `"<category>: <message>"`, the form shown to users.
    pub fn summary(&self) -> String {
        format!("{}: {}", self.category(), self)
    }
}

impl From<KeyError> for DashboardError {
    fn from(error: KeyError) -> Self {
        DashboardError::Validation(ValidationError::InvalidPhrase(error.to_string()))
    }
}
