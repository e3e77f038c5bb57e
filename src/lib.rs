pub mod api;
pub mod ciphers;
pub mod config;
pub mod consts;
pub mod dictionary;
pub mod error;
pub mod keyspace;
pub mod patterns;
pub mod scorer;
pub mod search;
pub mod stats;
// cmd and reports are binary modules (see main.rs).
