//! # vidstream-media
//!
//! Hand-off of locally buffered upload files to the external object
//! store. Implements the `MediaStorage` port from vidstream-core.

pub mod s3;

pub use s3::S3MediaStorage;
