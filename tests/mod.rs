//! Test suite for Mingle Push
//!
//! This module organizes all tests

pub mod common;
pub mod integration;
