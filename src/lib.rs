//! Bank account domain core: currencies with a fixed conversion table,
//! checking/savings accounts with observer callbacks, and a bank registry,
//! plus a small CSV batch front end that scripts a single bank run.

pub mod app;
pub mod common;
pub mod domain;
pub mod io;
pub mod worker;
