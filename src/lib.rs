//! In-memory encoding of DNS record data.
//!
//! This crate provides the encoding engine used by the in-memory zone
//! data of an authoritative name server. The record data of a whole
//! record set, together with the signatures covering it, is packed once
//! into a single contiguous buffer and then traversed on every query
//! answered from memory, without copying and without allocating.
//!
//! The packed format is generic over record types: everything that
//! differs between types is described by a small, static encoding
//! specification, looked up by class and record type in the
//! [spec] module. The [encode] module builds packed buffers from typed
//! field values and performs all validation; the [read] module walks a
//! buffer field by field, invoking caller callbacks for domain names and
//! opaque data, the hook used by message rendering for name compression
//! and additional section processing. The [name] module provides the
//! uncompressed label-sequence form in which the buffers store domain
//! names, and [iana] the class and type values everything is keyed by.
//!
//! ```
//! use zonemem::encode::{FieldValue, RdataEncoder};
//! use zonemem::iana::{Class, Rtype};
//! use zonemem::name::NameBuf;
//! use zonemem::read::RdataReader;
//!
//! // Pack the record data of an MX record set.
//! let exchange: NameBuf = "mail.example.com.".parse()?;
//! let encoder = RdataEncoder::new(Class::IN, Rtype::MX)?;
//! let buf = encoder.to_vec(
//!     &[&[FieldValue::Data(&[0, 10]), FieldValue::Name(&exchange)]],
//!     &[],
//! )?;
//!
//! // Later, at query time, walk it without copying.
//! let mut reader = RdataReader::new(
//!     Class::IN, Rtype::MX, &buf, 1, 0,
//!     |name, attrs| {
//!         if attrs.additional {
//!             println!("additional section candidate: {}", name);
//!         }
//!     },
//!     |_data| {},
//! )?;
//! reader.iterate();
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! # Reference of Feature Flags
//!
//! * `bytes`: enables encoding into the `BytesMut` type of the
//!   [bytes](https://github.com/tokio-rs/bytes) crate.
//! * `smallvec`: enables encoding into the `SmallVec` type of the
//!   [smallvec](https://github.com/servo/rust-smallvec) crate.
//! * `std`: support for the Rust std library. This feature is enabled by
//!   default.

#![no_std]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(feature = "std")]
#[allow(unused_imports)] // Import macros even if unused.
#[macro_use]
extern crate std;

pub mod encode;
pub mod iana;
pub mod name;
pub mod read;
pub mod spec;
