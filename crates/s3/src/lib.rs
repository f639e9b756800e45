//! ossctl-s3: storage-service adapter for the ossctl CLI
//!
//! This crate provides the implementation of the BucketConfigStore trait
//! using signed HTTP requests. It is the only crate that talks to the
//! network.

pub mod client;

pub use client::{HttpBucketClient, HttpConnector};
