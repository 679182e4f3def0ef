//! Metadata source clients

pub mod openalex;
