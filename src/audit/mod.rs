//! Audit log: append-only activity records, presented newest-first.

pub mod log;

pub use log::AuditLog;
