//! Encoding specifications for record data.
//!
//! The packed buffer format is generic: one loop can encode or decode the
//! record data of any record type because everything that differs between
//! types is captured in a little piece of data, the [`RdataSpec`]. It
//! describes the ordered sequence of fields the record data of one type
//! decomposes into, each field being a domain name, a fixed-length data
//! field, or a variable-length data field.
//!
//! Specifications are pure, immutable data. They are looked up through
//! [`encode_spec`] by the class and type of a record and shared by every
//! encoder and reader handling records of that type.

use crate::iana::{Class, Rtype};
use core::fmt;

//------------ NameAttributes ------------------------------------------------

/// How a domain name field is used when rendered into a message.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct NameAttributes {
    /// The name may be replaced by a compression pointer.
    pub compressible: bool,

    /// The name is the target of an additional section lookup, such as
    /// the exchange of an MX record or the target of an NS record.
    pub additional: bool,
}

impl NameAttributes {
    /// The name is neither compressible nor an additional section target.
    pub const NONE: Self = NameAttributes {
        compressible: false,
        additional: false,
    };

    /// The name may be compressed.
    pub const COMPRESSIBLE: Self = NameAttributes {
        compressible: true,
        additional: false,
    };

    /// The name is an additional section target.
    pub const ADDITIONAL: Self = NameAttributes {
        compressible: false,
        additional: true,
    };

    /// The name may be compressed and is an additional section target.
    pub const COMPRESSIBLE_ADDITIONAL: Self = NameAttributes {
        compressible: true,
        additional: true,
    };
}

//------------ FieldSpec -----------------------------------------------------

/// The description of a single field of a record’s data.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum FieldSpec {
    /// A domain name, stored as an uncompressed label sequence.
    Name(NameAttributes),

    /// Opaque data of the given fixed length.
    Fixed(u16),

    /// Opaque data whose length is kept in the lengths table of the
    /// packed buffer.
    Variable,
}

//------------ RdataSpec -----------------------------------------------------

/// The encoding specification for the record data of one record type.
///
/// The specification describes a single instance of record data; a packed
/// buffer holding several instances of the same type simply repeats the
/// field sequence once per instance.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct RdataSpec {
    /// The ordered field sequence of one instance.
    fields: &'static [FieldSpec],

    /// The number of `Variable` fields in the sequence.
    varlen_count: usize,
}

impl RdataSpec {
    /// Returns the field sequence of one instance of record data.
    #[must_use]
    pub fn fields(&self) -> &'static [FieldSpec] {
        self.fields
    }

    /// Returns the number of fields in one instance of record data.
    #[must_use]
    pub fn field_count(&self) -> usize {
        self.fields.len()
    }

    /// Returns the number of variable-length fields in one instance.
    #[must_use]
    pub fn varlen_count(&self) -> usize {
        self.varlen_count
    }
}

//------------ The built-in specifications -----------------------------------

static SINGLE_IPV4: RdataSpec = RdataSpec {
    fields: &[FieldSpec::Fixed(4)],
    varlen_count: 0,
};

static SINGLE_IPV6: RdataSpec = RdataSpec {
    fields: &[FieldSpec::Fixed(16)],
    varlen_count: 0,
};

/// A single name that may be compressed: CNAME and PTR.
static SINGLE_NAME_COMPRESSIBLE: RdataSpec = RdataSpec {
    fields: &[FieldSpec::Name(NameAttributes::COMPRESSIBLE)],
    varlen_count: 0,
};

/// A single name that is also an additional section target: NS.
static SINGLE_NAME_COMPRESSIBLE_ADDITIONAL: RdataSpec = RdataSpec {
    fields: &[FieldSpec::Name(NameAttributes::COMPRESSIBLE_ADDITIONAL)],
    varlen_count: 0,
};

/// A single name stored and rendered verbatim: DNAME, RFC 6672.
static SINGLE_NAME_PLAIN: RdataSpec = RdataSpec {
    fields: &[FieldSpec::Name(NameAttributes::NONE)],
    varlen_count: 0,
};

/// A single opaque blob covering the entire record data: TXT.
static SINGLE_DATA: RdataSpec = RdataSpec {
    fields: &[FieldSpec::Variable],
    varlen_count: 1,
};

/// The two names followed by the five 32 bit values of a SOA record.
static SOA: RdataSpec = RdataSpec {
    fields: &[
        FieldSpec::Name(NameAttributes::COMPRESSIBLE),
        FieldSpec::Name(NameAttributes::COMPRESSIBLE),
        FieldSpec::Fixed(20),
    ],
    varlen_count: 0,
};

/// The two character strings of a HINFO record.
static HINFO: RdataSpec = RdataSpec {
    fields: &[FieldSpec::Variable, FieldSpec::Variable],
    varlen_count: 2,
};

/// The preference value and exchange name of an MX record.
static MX: RdataSpec = RdataSpec {
    fields: &[
        FieldSpec::Fixed(2),
        FieldSpec::Name(NameAttributes::COMPRESSIBLE_ADDITIONAL),
    ],
    varlen_count: 0,
};

/// Priority, weight, and port followed by the target of an SRV record.
///
/// The target must not be compressed, RFC 2782, but it is the subject of
/// additional section processing.
static SRV: RdataSpec = RdataSpec {
    fields: &[FieldSpec::Fixed(6), FieldSpec::Name(NameAttributes::ADDITIONAL)],
    varlen_count: 0,
};

/// Order and preference, three character strings, and the replacement
/// name of a NAPTR record.
static NAPTR: RdataSpec = RdataSpec {
    fields: &[
        FieldSpec::Fixed(2),
        FieldSpec::Fixed(2),
        FieldSpec::Variable,
        FieldSpec::Variable,
        FieldSpec::Variable,
        FieldSpec::Name(NameAttributes::NONE),
    ],
    varlen_count: 3,
};

/// Key tag, algorithm, and digest type followed by the digest: DS.
static DS: RdataSpec = RdataSpec {
    fields: &[FieldSpec::Fixed(4), FieldSpec::Variable],
    varlen_count: 1,
};

/// Flags, protocol, and algorithm followed by the public key: DNSKEY.
static DNSKEY: RdataSpec = RdataSpec {
    fields: &[FieldSpec::Fixed(4), FieldSpec::Variable],
    varlen_count: 1,
};

/// The fixed header of an RRSIG record followed by the signer name and
/// the signature.
static RRSIG: RdataSpec = RdataSpec {
    fields: &[
        FieldSpec::Fixed(18),
        FieldSpec::Name(NameAttributes::NONE),
        FieldSpec::Variable,
    ],
    varlen_count: 1,
};

/// The next owner name and the type bitmap of an NSEC record.
static NSEC: RdataSpec = RdataSpec {
    fields: &[FieldSpec::Name(NameAttributes::NONE), FieldSpec::Variable],
    varlen_count: 1,
};

/// Hash algorithm, flags, and iterations followed by salt, next hashed
/// owner, and the type bitmap of an NSEC3 record.
static NSEC3: RdataSpec = RdataSpec {
    fields: &[
        FieldSpec::Fixed(4),
        FieldSpec::Variable,
        FieldSpec::Variable,
        FieldSpec::Variable,
    ],
    varlen_count: 3,
};

/// NSEC3PARAM is NSEC3 without the hash and bitmap.
static NSEC3PARAM: RdataSpec = RdataSpec {
    fields: &[FieldSpec::Fixed(4), FieldSpec::Variable],
    varlen_count: 1,
};

//------------ encode_spec ---------------------------------------------------

/// Looks up the encoding specification for a class and record type.
///
/// Returns an error for any combination the registry doesn’t know. There
/// deliberately is no generic fall-back specification: encoding a record
/// type under a guessed layout would lose the name attributes rendering
/// relies on.
pub fn encode_spec(
    class: Class,
    rtype: Rtype,
) -> Result<&'static RdataSpec, SpecLookupError> {
    // Class-independent record types.
    match rtype {
        Rtype::NS => return Ok(&SINGLE_NAME_COMPRESSIBLE_ADDITIONAL),
        Rtype::CNAME | Rtype::PTR => return Ok(&SINGLE_NAME_COMPRESSIBLE),
        Rtype::DNAME => return Ok(&SINGLE_NAME_PLAIN),
        Rtype::SOA => return Ok(&SOA),
        Rtype::HINFO => return Ok(&HINFO),
        Rtype::MX => return Ok(&MX),
        Rtype::TXT => return Ok(&SINGLE_DATA),
        Rtype::NAPTR => return Ok(&NAPTR),
        Rtype::DS => return Ok(&DS),
        Rtype::DNSKEY => return Ok(&DNSKEY),
        Rtype::RRSIG => return Ok(&RRSIG),
        Rtype::NSEC => return Ok(&NSEC),
        Rtype::NSEC3 => return Ok(&NSEC3),
        Rtype::NSEC3PARAM => return Ok(&NSEC3PARAM),
        _ => {}
    }
    // Types specific to the Internet class.
    if class == Class::IN {
        match rtype {
            Rtype::A => return Ok(&SINGLE_IPV4),
            Rtype::AAAA => return Ok(&SINGLE_IPV6),
            Rtype::SRV => return Ok(&SRV),
            _ => {}
        }
    }
    Err(SpecLookupError { class, rtype })
}

//============ Error Types ===================================================

//------------ SpecLookupError -----------------------------------------------

/// There is no encoding specification for a class and record type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SpecLookupError {
    class: Class,
    rtype: Rtype,
}

impl SpecLookupError {
    /// Returns the class that was looked up.
    #[must_use]
    pub fn class(&self) -> Class {
        self.class
    }

    /// Returns the record type that was looked up.
    #[must_use]
    pub fn rtype(&self) -> Rtype {
        self.rtype
    }
}

impl fmt::Display for SpecLookupError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "no encoding specification for {} records in class {}",
            self.rtype, self.class
        )
    }
}

#[cfg(feature = "std")]
impl std::error::Error for SpecLookupError {}

//============ Testing ======================================================

#[cfg(test)]
#[cfg(feature = "std")]
mod test {
    use super::*;

    /// Every combination the registry serves.
    const KNOWN: &[(Class, Rtype)] = &[
        (Class::IN, Rtype::A),
        (Class::IN, Rtype::NS),
        (Class::IN, Rtype::CNAME),
        (Class::IN, Rtype::SOA),
        (Class::IN, Rtype::PTR),
        (Class::IN, Rtype::HINFO),
        (Class::IN, Rtype::MX),
        (Class::IN, Rtype::TXT),
        (Class::IN, Rtype::AAAA),
        (Class::IN, Rtype::SRV),
        (Class::IN, Rtype::NAPTR),
        (Class::IN, Rtype::DNAME),
        (Class::IN, Rtype::DS),
        (Class::IN, Rtype::RRSIG),
        (Class::IN, Rtype::NSEC),
        (Class::IN, Rtype::DNSKEY),
        (Class::IN, Rtype::NSEC3),
        (Class::IN, Rtype::NSEC3PARAM),
        (Class::CH, Rtype::NS),
        (Class::CH, Rtype::SOA),
        (Class::CH, Rtype::TXT),
    ];

    #[test]
    fn known_combinations() {
        for &(class, rtype) in KNOWN {
            assert!(
                encode_spec(class, rtype).is_ok(),
                "missing specification for {} {}",
                class,
                rtype
            );
        }
    }

    #[test]
    fn varlen_counts_match_fields() {
        for &(class, rtype) in KNOWN {
            let spec = encode_spec(class, rtype).unwrap();
            let count = spec
                .fields()
                .iter()
                .filter(|field| matches!(field, FieldSpec::Variable))
                .count();
            assert_eq!(
                spec.varlen_count(),
                count,
                "bad variable field count for {} {}",
                class,
                rtype
            );
        }
    }

    #[test]
    fn unknown_combinations() {
        // A and SRV layouts are specific to the Internet class.
        assert!(encode_spec(Class::CH, Rtype::A).is_err());
        assert!(encode_spec(Class::CH, Rtype::SRV).is_err());
        let err = encode_spec(Class::IN, Rtype::from_int(4711)).unwrap_err();
        assert_eq!(err.class(), Class::IN);
        assert_eq!(err.rtype(), Rtype::from_int(4711));
    }

    #[test]
    fn name_attributes() {
        let spec = encode_spec(Class::IN, Rtype::MX).unwrap();
        assert_eq!(
            spec.fields()[1],
            FieldSpec::Name(NameAttributes::COMPRESSIBLE_ADDITIONAL)
        );
        let spec = encode_spec(Class::IN, Rtype::SRV).unwrap();
        assert_eq!(
            spec.fields()[1],
            FieldSpec::Name(NameAttributes::ADDITIONAL)
        );
        let spec = encode_spec(Class::IN, Rtype::RRSIG).unwrap();
        assert_eq!(spec.fields()[1], FieldSpec::Name(NameAttributes::NONE));
    }
}
