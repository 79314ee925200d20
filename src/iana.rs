//! Record classes and record types.
//!
//! The encoding specifications served by the [`spec`][crate::spec] registry
//! are keyed by the class and type of a record. This module provides the
//! two key types as thin wrappers around their 16 bit IANA values. Only the
//! values the registry knows about get named constants; any other value can
//! still be represented and will display in the `TYPE12345` notation of
//! [RFC 3597].
//!
//! [RFC 3597]: https://tools.ietf.org/html/rfc3597

use core::fmt;
use core::str::FromStr;

//------------ int_enum ------------------------------------------------------

/// Creates a standard IANA type wrapping an integer.
macro_rules! int_enum {
    ( $(#[$attr:meta])* =>
      $ianatype:ident, $display_prefix:expr, $error:expr;
      $( $(#[$variant_attr:meta])* ( $variant:ident =>
                                        $value:expr, $mnemonic:expr) )* ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Eq, Hash, Ord, PartialEq, PartialOrd)]
        pub struct $ianatype(u16);

        impl $ianatype {
            $(
                $(#[$variant_attr])*
                pub const $variant: $ianatype = $ianatype($value);
            )*
        }

        impl $ianatype {
            /// Returns a value from its raw integer value.
            #[must_use]
            pub const fn from_int(value: u16) -> Self {
                Self(value)
            }

            /// Returns the raw integer value for a value.
            #[must_use]
            pub const fn to_int(self) -> u16 {
                self.0
            }

            /// Returns a value from a well-defined mnemonic.
            #[must_use]
            pub fn from_mnemonic(m: &[u8]) -> Option<Self> {
                $(
                    if m.eq_ignore_ascii_case($mnemonic.as_bytes()) {
                        return Some($ianatype::$variant)
                    }
                )*
                None
            }

            /// Returns the mnemonic for this value if there is one.
            #[must_use]
            pub const fn to_mnemonic(self) -> Option<&'static str> {
                match self {
                    $(
                        $ianatype::$variant => Some($mnemonic),
                    )*
                    _ => None
                }
            }
        }

        //--- From

        impl From<u16> for $ianatype {
            fn from(value: u16) -> Self {
                $ianatype::from_int(value)
            }
        }

        impl From<$ianatype> for u16 {
            fn from(value: $ianatype) -> Self {
                value.to_int()
            }
        }

        //--- FromStr

        impl FromStr for $ianatype {
            type Err = FromStrError;

            /// Accepts well-defined mnemonics ignoring case as well as the
            /// generic notation of RFC 3597.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                if let Some(res) = Self::from_mnemonic(s.as_bytes()) {
                    return Ok(res)
                }
                if let (Some(prefix), Some(value)) = (
                    s.get(..$display_prefix.len()),
                    s.get($display_prefix.len()..),
                ) {
                    if prefix.eq_ignore_ascii_case($display_prefix) {
                        if let Ok(value) = u16::from_str(value) {
                            return Ok(Self::from_int(value))
                        }
                    }
                }
                Err(FromStrError($error))
            }
        }

        //--- Display and Debug

        impl fmt::Display for $ianatype {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                match self.to_mnemonic() {
                    Some(m) => f.write_str(m),
                    None => {
                        write!(f, concat!($display_prefix, "{}"), self.0)
                    }
                }
            }
        }

        impl fmt::Debug for $ianatype {
            fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
                match self.to_mnemonic() {
                    Some(m) => {
                        write!(f, concat!(stringify!($ianatype), "::{}"), m)
                    }
                    None => {
                        f.debug_tuple(stringify!($ianatype))
                            .field(&self.0)
                            .finish()
                    }
                }
            }
        }
    }
}

//------------ Class ---------------------------------------------------------

int_enum! {
    /// DNS class values.
    ///
    /// In practice, only the Internet class matters, but the encoding
    /// specification registry keys on the class because a few record types
    /// have class-specific wire formats.
    =>
    Class, "CLASS", "unknown class";

    /// The Internet class.
    (IN => 1, "IN")

    /// The Chaosnet class.
    (CH => 3, "CH")

    /// The Hesiod class.
    (HS => 4, "HS")

    /// Query class none, RFC 2136.
    (NONE => 254, "NONE")

    /// Query class any.
    (ANY => 255, "*")
}

//------------ Rtype ---------------------------------------------------------

int_enum! {
    /// Record type values.
    ///
    /// The named constants are the types the built-in encoding
    /// specification registry covers.
    =>
    Rtype, "TYPE", "unknown record type";

    /// A host address.
    (A => 1, "A")

    /// An authoritative name server.
    (NS => 2, "NS")

    /// The canonical name for an alias.
    (CNAME => 5, "CNAME")

    /// The start of a zone of authority.
    (SOA => 6, "SOA")

    /// A domain name pointer.
    (PTR => 12, "PTR")

    /// Host information.
    (HINFO => 13, "HINFO")

    /// Mail exchange.
    (MX => 15, "MX")

    /// Text strings.
    (TXT => 16, "TXT")

    /// IPv6 address.
    (AAAA => 28, "AAAA")

    /// Server selection.
    (SRV => 33, "SRV")

    /// Naming authority pointer.
    (NAPTR => 35, "NAPTR")

    /// Redirection for a subtree of the domain name tree.
    (DNAME => 39, "DNAME")

    /// Delegation signer.
    (DS => 43, "DS")

    /// A record set signature.
    (RRSIG => 46, "RRSIG")

    /// Authenticated denial of existence.
    (NSEC => 47, "NSEC")

    /// A DNSSEC public key.
    (DNSKEY => 48, "DNSKEY")

    /// Hashed authenticated denial of existence.
    (NSEC3 => 50, "NSEC3")

    /// NSEC3 parameters.
    (NSEC3PARAM => 51, "NSEC3PARAM")

    /// Any record type.
    (ANY => 255, "ANY")
}

//============ Error Types ===================================================

//------------ FromStrError --------------------------------------------------

/// A string did not contain a class or record type.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FromStrError(&'static str);

impl fmt::Display for FromStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.0)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for FromStrError {}

//============ Testing ======================================================
