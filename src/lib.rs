//! Analysis Store - analysis data source for the Reddit finance analysis API
//!
//! This crate reads and writes the analysis results produced by the scraper
//! to object storage, and exposes them to the managed GraphQL layer as the
//! `getAnalysisData` query and `updateAnalysisData` mutation.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
