//! End-to-end tests of the packed record-data format.
//!
//! These tests drive the public surface the way an authoritative server
//! does: encode the record data of a whole record set once, then walk the
//! packed buffer with a reader, possibly several times.

use std::cell::RefCell;
use tracing_subscriber::EnvFilter;
use zonemem::encode::{FieldValue, RdataEncoder};
use zonemem::iana::{Class, Rtype};
use zonemem::name::{Name, NameBuf};
use zonemem::read::{Field, RdataReader};

/// Set up logging of events reported by the crate and the test suite.
///
/// Use the RUST_LOG environment variable to override the defaults.
///
/// E.g. to enable trace level logging:
///   RUST_LOG=TRACE
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .without_time()
        .try_init()
        .ok();
}

/// Encodes the given values and checks that reading them back yields the
/// same fields and signature blobs in the same order.
fn assert_round_trip(
    class: Class,
    rtype: Rtype,
    rdata: &[&[FieldValue<'_>]],
    sigs: &[&[u8]],
) {
    let encoder = RdataEncoder::new(class, rtype).unwrap();
    let buf = encoder.to_vec(rdata, sigs).unwrap();
    assert_eq!(buf.len(), encoder.encoded_len(rdata, sigs).unwrap());

    let mut reader = RdataReader::new(
        class,
        rtype,
        &buf,
        rdata.len(),
        sigs.len(),
        |_, _| {},
        |_| {},
    )
    .unwrap();
    for instance in rdata {
        for value in *instance {
            let field = reader.next().expect("missing field");
            match (value, field) {
                (FieldValue::Name(expected), Field::Name { name, .. }) => {
                    assert_eq!(*expected, name);
                }
                (FieldValue::Data(expected), Field::Data(data)) => {
                    assert_eq!(*expected, data);
                }
                (value, field) => {
                    panic!("field kind mismatch: {:?} vs {:?}", value, field)
                }
            }
        }
    }
    assert!(reader.next().is_none());
    assert!(reader.next().is_none());
    for sig in sigs {
        assert_eq!(reader.next_sig(), Some(*sig));
    }
    assert!(reader.next_sig().is_none());
}

fn name_buf(s: &str) -> NameBuf {
    s.parse().unwrap()
}

#[test]
fn round_trip_address_records() {
    init_logging();
    assert_round_trip(
        Class::IN,
        Rtype::A,
        &[
            &[FieldValue::Data(&[192, 0, 2, 1])],
            &[FieldValue::Data(&[192, 0, 2, 2])],
        ],
        &[],
    );
    assert_round_trip(
        Class::IN,
        Rtype::AAAA,
        &[&[FieldValue::Data(&[0x20, 0x01, 0x0d, 0xb8, 0, 0, 0, 0, 0, 0,
            0, 0, 0, 0, 0, 1])]],
        &[b"rrsig data over the set"],
    );
}

#[test]
fn round_trip_name_records() {
    init_logging();
    let ns1 = name_buf("ns1.example.com.");
    let ns2 = name_buf("ns2.example.com.");
    assert_round_trip(
        Class::IN,
        Rtype::NS,
        &[&[FieldValue::Name(&ns1)], &[FieldValue::Name(&ns2)]],
        &[b"sig one", b"sig two"],
    );

    let target = name_buf("sip.example.com.");
    assert_round_trip(
        Class::IN,
        Rtype::SRV,
        &[&[FieldValue::Data(&[0, 1, 0, 2, 0x13, 0xc4]),
            FieldValue::Name(&target)]],
        &[],
    );

    let signer = name_buf("example.com.");
    assert_round_trip(
        Class::IN,
        Rtype::RRSIG,
        &[&[
            FieldValue::Data(&[0; 18]),
            FieldValue::Name(&signer),
            FieldValue::Data(b"signature octets"),
        ]],
        &[],
    );
}

#[test]
fn naptr_scenario() {
    // A NAPTR record with two 16 bit numbers, three text fields of which
    // two are empty, and a trailing replacement name.
    init_logging();
    let replacement = name_buf("example.com.");
    let encoder = RdataEncoder::new(Class::IN, Rtype::NAPTR).unwrap();
    let buf = encoder
        .to_vec(
            &[&[
                FieldValue::Data(&[0, 10]),
                FieldValue::Data(&[0, 20]),
                FieldValue::Data(b"S"),
                FieldValue::Data(b""),
                FieldValue::Data(b""),
                FieldValue::Name(&replacement),
            ]],
            &[],
        )
        .unwrap();

    let mut reader = RdataReader::new(
        Class::IN,
        Rtype::NAPTR,
        &buf,
        1,
        0,
        |_, _| {},
        |_| {},
    )
    .unwrap();
    assert_eq!(reader.next(), Some(Field::Data(&[0, 10])));
    assert_eq!(reader.next(), Some(Field::Data(&[0, 20])));
    assert_eq!(reader.next(), Some(Field::Data(b"S")));
    assert_eq!(reader.next(), Some(Field::Data(b"")));
    assert_eq!(reader.next(), Some(Field::Data(b"")));
    match reader.next() {
        Some(Field::Name { name, .. }) => {
            assert_eq!(name, replacement.as_name());
        }
        other => panic!("expected the replacement name, got {:?}", other),
    }
    assert_eq!(reader.next(), None);
}

#[test]
fn field_and_signature_counts() {
    init_logging();
    let exchange = name_buf("mail.example.com.");
    let encoder = RdataEncoder::new(Class::IN, Rtype::MX).unwrap();
    let rdata: &[&[FieldValue<'_>]] = &[
        &[FieldValue::Data(&[0, 10]), FieldValue::Name(&exchange)],
        &[FieldValue::Data(&[0, 20]), FieldValue::Name(&exchange)],
        &[FieldValue::Data(&[0, 30]), FieldValue::Name(&exchange)],
    ];
    let sigs: &[&[u8]] = &[b"one", b"two"];
    let buf = encoder.to_vec(rdata, sigs).unwrap();

    let mut reader = RdataReader::new(
        Class::IN,
        Rtype::MX,
        &buf,
        rdata.len(),
        sigs.len(),
        |_, _| {},
        |_| {},
    )
    .unwrap();
    let mut fields = 0;
    while reader.next().is_some() {
        fields += 1;
    }
    assert_eq!(fields, reader.spec().field_count() * rdata.len());
    let mut blobs = 0;
    while reader.next_sig().is_some() {
        blobs += 1;
    }
    assert_eq!(blobs, sigs.len());
}

#[test]
fn interleaved_replay_is_deterministic() {
    init_logging();
    let exchange = name_buf("mail.example.com.");
    let encoder = RdataEncoder::new(Class::IN, Rtype::MX).unwrap();
    let rdata: &[&[FieldValue<'_>]] = &[
        &[FieldValue::Data(&[0, 10]), FieldValue::Name(&exchange)],
        &[FieldValue::Data(&[0, 20]), FieldValue::Name(&exchange)],
    ];
    let buf = encoder.to_vec(rdata, &[b"covering sig"]).unwrap();

    // First pass: read the signature in the middle of the fields.
    let mut reader = RdataReader::new(
        Class::IN,
        Rtype::MX,
        &buf,
        2,
        1,
        |_, _| {},
        |_| {},
    )
    .unwrap();
    let mut interleaved = Vec::new();
    interleaved.push(reader.next().unwrap());
    assert_eq!(reader.next_sig(), Some(b"covering sig".as_ref()));
    while let Some(field) = reader.next() {
        interleaved.push(field);
    }

    // Second pass on the same reader after a rewind, fields only.
    reader.rewind();
    let mut replay = Vec::new();
    while let Some(field) = reader.next() {
        replay.push(field);
    }
    assert_eq!(interleaved, replay);
    assert_eq!(reader.next_sig(), Some(b"covering sig".as_ref()));
    assert_eq!(reader.next_sig(), None);
}

#[test]
fn rendering_callbacks() {
    // What message rendering sees: one name callback per name field with
    // its attributes, one data callback per data field and blob.
    init_logging();
    let ns1 = name_buf("ns1.example.com.");
    let ns2 = name_buf("ns2.example.com.");
    let encoder = RdataEncoder::new(Class::IN, Rtype::NS).unwrap();
    let buf = encoder
        .to_vec(
            &[&[FieldValue::Name(&ns1)], &[FieldValue::Name(&ns2)]],
            &[b"sig"],
        )
        .unwrap();

    let names: RefCell<Vec<(NameBuf, bool, bool)>> =
        RefCell::new(Vec::new());
    let data: RefCell<Vec<Vec<u8>>> = RefCell::new(Vec::new());
    let mut reader = RdataReader::new(
        Class::IN,
        Rtype::NS,
        &buf,
        2,
        1,
        |name: &Name, attrs| {
            names.borrow_mut().push((
                NameBuf::from_name(name),
                attrs.compressible,
                attrs.additional,
            ));
        },
        |item: &[u8]| {
            data.borrow_mut().push(item.to_vec());
        },
    )
    .unwrap();
    reader.iterate();
    reader.iterate_sigs();

    let names = names.into_inner();
    assert_eq!(
        names,
        [
            (NameBuf::from_name(&ns1), true, true),
            (NameBuf::from_name(&ns2), true, true),
        ]
    );
    assert_eq!(data.into_inner(), [b"sig".to_vec()]);
}

#[test]
fn empty_record_set_with_signatures() {
    init_logging();
    let encoder = RdataEncoder::new(Class::IN, Rtype::TXT).unwrap();
    let buf = encoder.to_vec(&[], &[b"lone sig"]).unwrap();
    let mut reader = RdataReader::new(
        Class::IN,
        Rtype::TXT,
        &buf,
        0,
        1,
        |_, _| {},
        |_| {},
    )
    .unwrap();
    assert_eq!(reader.next(), None);
    assert_eq!(reader.next_sig(), Some(b"lone sig".as_ref()));
    assert_eq!(reader.next_sig(), None);
}
