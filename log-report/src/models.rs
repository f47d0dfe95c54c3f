use crate::invariants::Timestamp;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogRecord {
    pub path: String,
    pub timestamp: Timestamp,
    pub user_agent: String,
}

/// Records in input order.
pub type LogDataset = Vec<LogRecord>;
