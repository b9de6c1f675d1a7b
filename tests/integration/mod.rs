//! Integration tests
//!
//! Exercise the router and the notification core end to end.

mod concurrency_test;
mod message_test;
mod notification_test;
