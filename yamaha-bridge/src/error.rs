use thiserror::Error;
use yamaha_api::{ApiError, CommandKind};

#[derive(Error, Debug)]
pub enum BridgeError {
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    #[error("Item '{item}' has no parent to read yamaha_host from")]
    NoParent { item: String },

    #[error("Parent of item '{item}' has no yamaha_host")]
    MissingHost { item: String },

    #[error("Item '{item}' has no yamaha_cmd")]
    MissingCommand { item: String },

    #[error("Item '{item}' has no value to send")]
    MissingValue { item: String },

    #[error("No state item registered for host {host}")]
    NoStateItem { host: String },

    #[error("Item for {kind} on {host} is no longer alive")]
    ItemDropped { host: String, kind: CommandKind },
}

impl BridgeError {
    /// True when the failure happened on the wire rather than in local setup
    pub fn is_transport(&self) -> bool {
        matches!(self, BridgeError::Api(api) if api.is_transport())
    }
}

pub type Result<T> = std::result::Result<T, BridgeError>;
