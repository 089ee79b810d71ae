use thiserror::Error;

/// Errors raised by snapshot, monitor, and combo table operations.
///
/// A combo lookup miss is not an error; see [`crate::ComboEvent::NoMatch`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ComboError {
    /// Rejected at setup: empty or duplicate button list, zero window length,
    /// or a combo binding that contains an idle step.
    #[error("invalid combo configuration: {0}")]
    InvalidConfiguration(String),

    /// A button name that is not part of the key table.
    #[error("unknown key: {name}")]
    UnknownKey { name: String },

    /// Merge between snapshots built from different key tables.
    #[error("snapshots were built from different key tables")]
    IncompatibleSnapshot,
}

impl ComboError {
    pub(crate) fn invalid(msg: impl Into<String>) -> Self {
        Self::InvalidConfiguration(msg.into())
    }

    pub(crate) fn unknown_key(name: &str) -> Self {
        Self::UnknownKey {
            name: name.to_string(),
        }
    }
}
