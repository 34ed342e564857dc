//! Parsing of Slack export files.
//!
//! This module turns raw export JSON into validated domain types:
//! - [`slack`] - channel day files into [`MessageRecord`](crate::message::MessageRecord)s
//! - [`users`] - `users.json` entries into [`SlackPerson`]s

pub mod slack;
pub mod users;

// Re-export commonly used items
pub use slack::{DayFileParser, SlackRawRecord, parse_slack_record};
pub use users::{SlackPerson, SlackRawPerson, load_users_file, parse_person};
