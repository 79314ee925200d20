//! Building packed record data.
//!
//! This module provides [`RdataEncoder`], the counterpart of
//! [`RdataReader`][crate::read::RdataReader]. The encoder takes the typed
//! field values of any number of record-data instances of one type, plus
//! any number of signature blobs, validates them against the type’s
//! encoding specification, and appends the packed buffer to an octets
//! builder: first the lengths table, then the field payload, then the
//! signature payload.
//!
//! Encoding happens once, when zone data is loaded; the buffer is then
//! traversed many times. All validation therefore lives here. A buffer
//! produced by a successful [`encode`][RdataEncoder::encode] is
//! guaranteed to decode into the values it was built from.

use crate::iana::{Class, Rtype};
use crate::name::Name;
use crate::spec::{encode_spec, FieldSpec, RdataSpec, SpecLookupError};
use core::fmt;
use octseq::builder::{OctetsBuilder, ShortBuf};
use tracing::trace;

//------------ FieldValue ----------------------------------------------------

/// One typed field value of a record-data instance.
///
/// This is what a record type’s codec produces when converting from its
/// presentation or wire format, and what it receives back when a packed
/// buffer is read.
#[derive(Clone, Copy, Debug)]
pub enum FieldValue<'a> {
    /// A domain name field.
    Name(&'a Name),

    /// An opaque data field, fixed or variable length.
    Data(&'a [u8]),
}

//------------ RdataEncoder --------------------------------------------------

/// An encoder for the packed record data of one record type.
///
/// The encoder itself is cheap and stateless; it merely remembers the
/// encoding specification of its record type. Each call to
/// [`encode`][Self::encode] produces one complete packed buffer.
#[derive(Clone, Copy, Debug)]
pub struct RdataEncoder {
    class: Class,
    rtype: Rtype,
    spec: &'static RdataSpec,
}

impl RdataEncoder {
    /// Creates an encoder for the given class and record type.
    pub fn new(
        class: Class,
        rtype: Rtype,
    ) -> Result<Self, SpecLookupError> {
        Ok(RdataEncoder {
            class,
            rtype,
            spec: encode_spec(class, rtype)?,
        })
    }

    /// Returns the encoding specification the encoder encodes by.
    #[must_use]
    pub fn spec(&self) -> &'static RdataSpec {
        self.spec
    }

    /// Returns the size of the packed buffer for the given values.
    ///
    /// The values are validated the same way [`encode`][Self::encode]
    /// validates them, so a caller can reserve the exact amount of space
    /// before encoding.
    pub fn encoded_len(
        &self,
        rdata: &[&[FieldValue<'_>]],
        sigs: &[&[u8]],
    ) -> Result<usize, EncodeError> {
        self.check(rdata, sigs)?;
        let mut len =
            (self.spec.varlen_count() * rdata.len() + sigs.len()) * 2;
        for instance in rdata {
            for value in *instance {
                len += match *value {
                    FieldValue::Name(name) => name.len(),
                    FieldValue::Data(data) => data.len(),
                };
            }
        }
        for sig in sigs {
            len += sig.len();
        }
        Ok(len)
    }

    /// Appends the packed buffer for the given values to a builder.
    ///
    /// `rdata` holds the field values of each record-data instance in
    /// order; every instance must match the encoding specification of the
    /// encoder’s record type. `sigs` holds the signature blobs covering
    /// the set.
    ///
    /// The buffer is appended in the order the reader consumes it: the
    /// lengths of all variable-length fields, instance by instance,
    /// followed by the lengths of the signature blobs, followed by the
    /// payload of all fields and finally all signature data.
    pub fn encode<Target: OctetsBuilder + ?Sized>(
        &self,
        rdata: &[&[FieldValue<'_>]],
        sigs: &[&[u8]],
        target: &mut Target,
    ) -> Result<(), EncodeError> {
        self.check(rdata, sigs)?;
        trace!(
            "encoding {} instances of {} {} record data, {} signatures",
            rdata.len(),
            self.class,
            self.rtype,
            sigs.len(),
        );
        for instance in rdata {
            for (value, field) in instance.iter().zip(self.spec.fields()) {
                if let (FieldSpec::Variable, FieldValue::Data(data)) =
                    (field, value)
                {
                    target
                        .append_slice(&(data.len() as u16).to_ne_bytes())?;
                }
            }
        }
        for sig in sigs {
            target.append_slice(&(sig.len() as u16).to_ne_bytes())?;
        }
        for instance in rdata {
            for value in *instance {
                match *value {
                    FieldValue::Name(name) => name.compose(target)?,
                    FieldValue::Data(data) => target.append_slice(data)?,
                }
            }
        }
        for sig in sigs {
            target.append_slice(sig)?;
        }
        Ok(())
    }

    /// Returns the packed buffer for the given values in a vec.
    #[cfg(feature = "std")]
    pub fn to_vec(
        &self,
        rdata: &[&[FieldValue<'_>]],
        sigs: &[&[u8]],
    ) -> Result<std::vec::Vec<u8>, EncodeError> {
        let mut res =
            std::vec::Vec::with_capacity(self.encoded_len(rdata, sigs)?);
        self.encode(rdata, sigs, &mut res)?;
        Ok(res)
    }

    /// Validates the values against the encoding specification.
    fn check(
        &self,
        rdata: &[&[FieldValue<'_>]],
        sigs: &[&[u8]],
    ) -> Result<(), EncodeError> {
        for instance in rdata {
            if instance.len() != self.spec.field_count() {
                return Err(EncodeError::FieldCount);
            }
            for (value, field) in instance.iter().zip(self.spec.fields()) {
                match (*field, *value) {
                    (FieldSpec::Name(_), FieldValue::Name(_)) => {}
                    (FieldSpec::Fixed(len), FieldValue::Data(data)) => {
                        if data.len() != usize::from(len) {
                            return Err(EncodeError::FieldMismatch);
                        }
                    }
                    (FieldSpec::Variable, FieldValue::Data(data)) => {
                        if data.len() > usize::from(u16::MAX) {
                            return Err(EncodeError::LongField);
                        }
                    }
                    _ => return Err(EncodeError::FieldMismatch),
                }
            }
        }
        for sig in sigs {
            if sig.len() > usize::from(u16::MAX) {
                return Err(EncodeError::LongField);
            }
        }
        Ok(())
    }
}

//============ Error Types ===================================================

//------------ EncodeError ---------------------------------------------------

/// An error happened while encoding record data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EncodeError {
    /// An instance did not have the number of fields its type requires.
    FieldCount,

    /// A field value did not match its field’s kind or fixed length.
    FieldMismatch,

    /// A variable-length field or signature blob exceeded 65535 octets.
    LongField,

    /// The octets builder ran out of space.
    ShortBuf,
}

//--- From

impl<T: Into<ShortBuf>> From<T> for EncodeError {
    fn from(_: T) -> Self {
        EncodeError::ShortBuf
    }
}

//--- Display and Error

impl fmt::Display for EncodeError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            EncodeError::FieldCount => f.write_str("wrong number of fields"),
            EncodeError::FieldMismatch => {
                f.write_str("field value does not match its description")
            }
            EncodeError::LongField => f.write_str("field too long"),
            EncodeError::ShortBuf => ShortBuf.fmt(f),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for EncodeError {}

//============ Testing ======================================================
