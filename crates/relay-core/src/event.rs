//! The relay's append-only event record.

use alloy_primitives::{Address, B256, Log};
use alloy_sol_types::SolEvent;

use crate::abi::DataSentToTarget;

/// Decoded `DataSentToTarget` event.
///
/// Owned by the chain's log storage once emitted; the relay never mutates or
/// deletes a past event. All business data lives here rather than in
/// contract storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataSent {
    /// Actual transaction sender.
    pub from: Address,
    /// Target address, guaranteed non-zero.
    pub to: Address,
    /// Caller-supplied owner reference.
    pub owner_param: B256,
    /// Caller-supplied action reference.
    pub action_ref: B256,
    /// Free-form topic string, may be empty.
    pub topic: String,
}

impl DataSent {
    /// Typed decode-or-skip: returns `None` for any log that is not a
    /// well-formed `DataSentToTarget` event.
    pub fn decode_log(log: &Log) -> Option<Self> {
        let event = DataSentToTarget::decode_log_data(&log.data).ok()?;
        Some(event.into())
    }

    /// Encode this event as a raw log emitted by `contract`.
    pub fn to_log(&self, contract: Address) -> Log {
        let event = DataSentToTarget {
            from: self.from,
            to: self.to,
            ownerParam: self.owner_param,
            actref: self.action_ref,
            topic: self.topic.clone(),
        };
        Log {
            address: contract,
            data: event.encode_log_data(),
        }
    }
}

impl From<DataSentToTarget> for DataSent {
    fn from(event: DataSentToTarget) -> Self {
        Self {
            from: event.from,
            to: event.to,
            owner_param: event.ownerParam,
            action_ref: event.actref,
            topic: event.topic,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloy_primitives::LogData;

    use super::*;

    fn sample() -> DataSent {
        DataSent {
            from: Address::repeat_byte(0x11),
            to: Address::repeat_byte(0x22),
            owner_param: B256::repeat_byte(0x01),
            action_ref: B256::repeat_byte(0x02),
            topic: "Test Topic".to_string(),
        }
    }

    #[test]
    fn log_round_trip() {
        let event = sample();
        let log = event.to_log(Address::repeat_byte(0xC0));
        assert_eq!(DataSent::decode_log(&log), Some(event));
    }

    #[test]
    fn empty_topic_round_trips() {
        let event = DataSent {
            topic: String::new(),
            ..sample()
        };
        let log = event.to_log(Address::repeat_byte(0xC0));
        assert_eq!(DataSent::decode_log(&log), Some(event));
    }

    #[test]
    fn foreign_log_is_skipped() {
        // A log with an unrelated topic0 must decode to None, not error.
        let log = Log {
            address: Address::repeat_byte(0xC0),
            data: LogData::new_unchecked(vec![B256::repeat_byte(0xFF)], Default::default()),
        };
        assert_eq!(DataSent::decode_log(&log), None);
    }

    #[test]
    fn truncated_log_is_skipped() {
        let mut log = sample().to_log(Address::repeat_byte(0xC0));
        let truncated = log.data.data.slice(..8);
        log.data = LogData::new_unchecked(log.data.topics().to_vec(), truncated);
        assert_eq!(DataSent::decode_log(&log), None);
    }
}
