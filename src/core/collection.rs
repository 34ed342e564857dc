//! Per-file record store with reply consumption.
//!
//! A thread's replies appear twice in a Slack day file: as stubs on the parent
//! and as full top-level records. When the parent renders a reply it consumes
//! the full record, and the assembler then skips it.
//!
//! Records are never removed from the backing vector. The assembler walks a
//! [`snapshot`](RecordCollection::snapshot) of positions taken before the walk
//! starts and checks each one against the consumed set, so consuming records
//! mid-walk can neither skip nor repeat an entry.

use std::collections::{HashMap, HashSet};

use crate::error::{Result, SlackpackError};
use crate::message::{MessageRecord, SlackTs};

/// The message records of one day file.
#[derive(Debug, Clone, Default)]
pub struct RecordCollection {
    records: Vec<MessageRecord>,
    positions: HashMap<SlackTs, usize>,
    consumed: HashSet<usize>,
}

impl RecordCollection {
    /// Wraps records in file order.
    ///
    /// `ts` is expected to be unique; if it is not, lookups resolve to the
    /// first record with that timestamp.
    pub fn new(records: Vec<MessageRecord>) -> Self {
        let mut positions = HashMap::with_capacity(records.len());
        for (pos, record) in records.iter().enumerate() {
            positions.entry(record.ts.clone()).or_insert(pos);
        }
        Self {
            records,
            positions,
            consumed: HashSet::new(),
        }
    }

    /// Total number of records, consumed or not.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Number of records consumed as thread replies so far.
    pub fn consumed_count(&self) -> usize {
        self.consumed.len()
    }

    /// Positions of all records, in file order, as of now.
    pub fn snapshot(&self) -> Vec<usize> {
        (0..self.records.len()).collect()
    }

    /// Returns the record at `pos` unless it was consumed as a reply.
    pub fn available(&self, pos: usize) -> Option<&MessageRecord> {
        if self.consumed.contains(&pos) {
            return None;
        }
        self.records.get(pos)
    }

    /// Returns the unconsumed record with timestamp `ts`.
    pub fn find(&self, ts: &SlackTs) -> Option<&MessageRecord> {
        self.positions.get(ts).and_then(|&pos| self.available(pos))
    }

    /// Returns `true` if the record with timestamp `ts` was consumed.
    pub fn is_consumed(&self, ts: &SlackTs) -> bool {
        self.positions
            .get(ts)
            .is_some_and(|pos| self.consumed.contains(pos))
    }

    /// Consumes the record a reply stub points at and returns it.
    ///
    /// Fails with [`SlackpackError::UnresolvedReplyReference`] when no record
    /// has that timestamp or it was already consumed by another thread.
    ///
    /// Consumption only hides records the snapshot walk has not reached yet.
    /// A reply that sits before its parent in the file has already been
    /// rendered at top level by then, so it appears a second time under the
    /// thread.
    pub fn consume_reply(&mut self, ts: &SlackTs) -> Result<&MessageRecord> {
        let pos = match self.positions.get(ts) {
            Some(&pos) if !self.consumed.contains(&pos) => pos,
            _ => return Err(SlackpackError::unresolved_reply(ts.as_str())),
        };
        self.consumed.insert(pos);
        Ok(&self.records[pos])
    }

    /// Iterates over the records not consumed as replies, in file order.
    pub fn remaining(&self) -> impl Iterator<Item = &MessageRecord> {
        self.records
            .iter()
            .enumerate()
            .filter(|(pos, _)| !self.consumed.contains(pos))
            .map(|(_, record)| record)
    }
}

impl From<Vec<MessageRecord>> for RecordCollection {
    fn from(records: Vec<MessageRecord>) -> Self {
        Self::new(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RecordCollection {
        RecordCollection::new(vec![
            MessageRecord::new("1.0", "U1", "parent"),
            MessageRecord::new("2.0", "U2", "reply"),
            MessageRecord::new("3.0", "U3", "later"),
        ])
    }

    #[test]
    fn test_consume_reply_hides_record() {
        let mut collection = sample();
        let reply = collection.consume_reply(&SlackTs::from("2.0")).unwrap();
        assert_eq!(reply.text, "reply");

        assert!(collection.is_consumed(&SlackTs::from("2.0")));
        assert!(collection.available(1).is_none());
        assert!(collection.find(&SlackTs::from("2.0")).is_none());
        assert_eq!(collection.consumed_count(), 1);
        assert_eq!(collection.len(), 3);
    }

    #[test]
    fn test_consume_twice_is_unresolved() {
        let mut collection = sample();
        collection.consume_reply(&SlackTs::from("2.0")).unwrap();
        let err = collection.consume_reply(&SlackTs::from("2.0")).unwrap_err();
        assert!(matches!(err, SlackpackError::UnresolvedReplyReference { .. }));
    }

    #[test]
    fn test_consume_unknown_is_unresolved() {
        let mut collection = sample();
        let err = collection.consume_reply(&SlackTs::from("9.0")).unwrap_err();
        assert!(err.is_recoverable());
        assert!(err.to_string().contains("9.0"));
    }

    #[test]
    fn test_snapshot_walk_skips_consumed() {
        let mut collection = sample();
        let mut seen = Vec::new();
        for pos in collection.snapshot() {
            let Some(record) = collection.available(pos) else {
                continue;
            };
            seen.push(record.text.clone());
            if pos == 0 {
                collection.consume_reply(&SlackTs::from("2.0")).unwrap();
            }
        }
        assert_eq!(seen, vec!["parent", "later"]);
    }

    #[test]
    fn test_remaining() {
        let mut collection = sample();
        collection.consume_reply(&SlackTs::from("3.0")).unwrap();
        let texts: Vec<&str> = collection.remaining().map(|r| r.text.as_str()).collect();
        assert_eq!(texts, vec!["parent", "reply"]);
    }

    #[test]
    fn test_duplicate_ts_resolves_to_first() {
        let collection = RecordCollection::new(vec![
            MessageRecord::new("1.0", "U1", "first"),
            MessageRecord::new("1.0", "U1", "second"),
        ]);
        assert_eq!(collection.find(&SlackTs::from("1.0")).unwrap().text, "first");
    }
}
