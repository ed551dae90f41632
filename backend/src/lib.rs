//! Account ledger backend.
//!
//! Deposits and withdrawals are recorded as an append-only statement log per
//! account; balances are always derived by folding that log, never stored.
//! The write path enforces that an accepted withdrawal can never overdraw an
//! account, even under concurrent requests.

pub mod db;
pub mod domain;
pub mod rest;
pub mod storage;
