// src/lib.rs — Library root for studydesk

pub mod cli;
pub mod client;
pub mod infra;
pub mod records;
pub mod session;
pub mod storage;
