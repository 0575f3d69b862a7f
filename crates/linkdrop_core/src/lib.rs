//! Core data types for linkdrop.
//!
//! This crate provides the media descriptor model shared by the store, the
//! command interpreter and the delivery protocol.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod descriptor;
mod kind;

pub use descriptor::{MediaDescriptor, MediaDescriptorBuilder};
pub use kind::{MediaKind, UnrecognizedMediaKind};
