//! Reading packed record data.
//!
//! This module provides [`RdataReader`], the cursor that walks a packed
//! buffer produced by [`RdataEncoder`][crate::encode::RdataEncoder] and
//! hands out its fields one by one: domain names with their rendering
//! attributes, opaque data ranges, and finally the signature blobs stored
//! behind the record data. All ranges the reader hands out borrow the
//! buffer directly; nothing is copied.
//!
//! Two callbacks are invoked along the way. Message rendering uses the
//! name callback to drive name compression and to queue additional
//! section lookups, and the data callback to stream opaque octets. Both
//! may be no-ops for callers that only want the returned values.

use crate::iana::{Class, Rtype};
use crate::name::Name;
use crate::spec::{
    encode_spec, FieldSpec, NameAttributes, RdataSpec, SpecLookupError,
};
use core::fmt;

//------------ Field ---------------------------------------------------------

/// One field handed out by the reader.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Field<'a> {
    /// A domain name field.
    Name {
        /// The stored name.
        name: &'a Name,

        /// How the name is used when rendered into a message.
        attrs: NameAttributes,
    },

    /// An opaque data field.
    Data(&'a [u8]),
}

//------------ RdataReader ---------------------------------------------------

/// A cursor over a packed record-data buffer.
///
/// The reader borrows the buffer and decodes it field by field according
/// to the encoding specification of the record type the buffer was built
/// for. [`next`][Self::next] advances over the record-data fields,
/// [`next_sig`][Self::next_sig] over the signature blobs, and
/// [`rewind`][Self::rewind] resets the iteration. Both kinds of advancing
/// can be interleaved freely.
///
/// The reader trusts its input: the buffer must have been produced by an
/// encoder for the same specification and the same instance counts.
/// Violating that contract is a data corruption condition and results in
/// a panic, never in reading memory outside the buffer.
pub struct RdataReader<'a, N, D> {
    /// The callback invoked for every domain name field.
    name_op: N,

    /// The callback invoked for every data field and signature blob.
    data_op: D,

    /// The encoding specification of one instance of record data.
    spec: &'static RdataSpec,

    /// The lengths table at the start of the buffer.
    lengths: &'a [u8],

    /// The field and signature payload following the lengths table.
    payload: &'a [u8],

    /// The total number of variable-length fields in the buffer.
    var_total: usize,

    /// The number of signature blobs in the buffer.
    sig_count: usize,

    /// The total number of fields in the buffer.
    step_count: usize,

    /// The current position in the payload.
    data_pos: usize,

    /// The index of the next field to hand out.
    field_pos: usize,

    /// The index of the next unread entry of the lengths table.
    len_pos: usize,

    /// The payload position where the signature data begins.
    ///
    /// This is not statically known: it depends on the serialized length
    /// of every name in the payload, so it is discovered by walking the
    /// fields and cached here. Since it is a property of the immutable
    /// buffer rather than iteration state, it stays valid across
    /// [`rewind`][Self::rewind].
    sigs_start: Option<usize>,

    /// The current position within the signature data.
    sig_data_pos: usize,

    /// The index of the next signature blob.
    sig_pos: usize,
}

impl<'a, N, D> RdataReader<'a, N, D>
where
    N: FnMut(&'a Name, NameAttributes),
    D: FnMut(&'a [u8]),
{
    /// Creates a reader for a packed buffer.
    ///
    /// The buffer `data` must start with the lengths table, followed by
    /// the payload of `rdata_count` instances of record data of the given
    /// class and type and `sig_count` signature blobs.
    ///
    /// # Panics
    ///
    /// Panics if the buffer is shorter than its lengths table.
    pub fn new(
        class: Class,
        rtype: Rtype,
        data: &'a [u8],
        rdata_count: usize,
        sig_count: usize,
        name_op: N,
        data_op: D,
    ) -> Result<Self, SpecLookupError> {
        let spec = encode_spec(class, rtype)?;
        let var_total = spec.varlen_count() * rdata_count;
        let table_len = (var_total + sig_count) * 2;
        assert!(
            data.len() >= table_len,
            "buffer shorter than its lengths table"
        );
        let (lengths, payload) = data.split_at(table_len);
        Ok(RdataReader {
            name_op,
            data_op,
            spec,
            lengths,
            payload,
            var_total,
            sig_count,
            step_count: spec.field_count() * rdata_count,
            data_pos: 0,
            field_pos: 0,
            len_pos: 0,
            sigs_start: None,
            sig_data_pos: 0,
            sig_pos: 0,
        })
    }

    /// Returns the encoding specification the reader decodes by.
    #[must_use]
    pub fn spec(&self) -> &'static RdataSpec {
        self.spec
    }

    /// Advances over the next record-data field.
    ///
    /// While unread fields remain, decodes the field at the current
    /// position, invokes the matching callback, and returns the field.
    /// Once all fields have been handed out, returns `None` and keeps
    /// returning `None` until [`rewind`][Self::rewind] is called.
    /// Reaching the end also establishes where the signature data
    /// begins.
    ///
    /// # Panics
    ///
    /// Panics if the payload is inconsistent with the encoding
    /// specification and the instance counts, i.e., the buffer is
    /// corrupt.
    pub fn next(&mut self) -> Option<Field<'a>> {
        if self.field_pos >= self.step_count {
            self.sigs_start = Some(self.data_pos);
            return None;
        }
        let mut data_pos = self.data_pos;
        let mut len_pos = self.len_pos;
        let field = self.step(self.field_pos, &mut data_pos, &mut len_pos);
        self.data_pos = data_pos;
        self.len_pos = len_pos;
        self.field_pos += 1;
        match field {
            Field::Name { name, attrs } => (self.name_op)(name, attrs),
            Field::Data(data) => (self.data_op)(data),
        }
        Some(field)
    }

    /// Advances over the next signature blob.
    ///
    /// While unread blobs remain, slices the next blob out of the
    /// signature data, invokes the data callback on it, and returns it.
    /// Once all blobs have been handed out, returns `None` until
    /// [`rewind`][Self::rewind] is called.
    ///
    /// If the start of the signature data is not known yet, it is
    /// discovered first by a dry walk over the remaining record-data
    /// fields. The walk does not invoke any callbacks and does not
    /// affect the progress of [`next`][Self::next], so record-data and
    /// signature iteration can be interleaved freely.
    pub fn next_sig(&mut self) -> Option<&'a [u8]> {
        if self.sig_pos >= self.sig_count {
            return None;
        }
        let sigs_start = match self.sigs_start {
            Some(pos) => pos,
            None => {
                let pos = self.locate_sigs();
                self.sigs_start = Some(pos);
                pos
            }
        };
        let len = self.length_at(self.var_total + self.sig_pos);
        let data = self.data_at(sigs_start + self.sig_data_pos, len);
        self.sig_data_pos += len;
        self.sig_pos += 1;
        (self.data_op)(data);
        Some(data)
    }

    /// Resets the reader to the beginning of the buffer.
    ///
    /// Both record-data and signature iteration start over. The position
    /// of the signature data, if it has been discovered already, is a
    /// property of the immutable buffer and therefore kept.
    pub fn rewind(&mut self) {
        self.data_pos = 0;
        self.field_pos = 0;
        self.len_pos = 0;
        self.sig_data_pos = 0;
        self.sig_pos = 0;
    }

    /// Advances over all remaining record-data fields.
    ///
    /// This is for callers that are only interested in the callbacks.
    pub fn iterate(&mut self) {
        while self.next().is_some() {}
    }

    /// Advances over all remaining signature blobs.
    pub fn iterate_sigs(&mut self) {
        while self.next_sig().is_some() {}
    }

    /// Decodes the field at `field_pos`, advancing the given cursors.
    ///
    /// This is the single stepping function shared by [`next`][Self::next]
    /// and the dry walk of [`locate_sigs`][Self::locate_sigs]; it never
    /// touches the reader’s own cursors and never invokes callbacks.
    fn step(
        &self,
        field_pos: usize,
        data_pos: &mut usize,
        len_pos: &mut usize,
    ) -> Field<'a> {
        // The field sequence describes one instance and repeats for each.
        let spec = self.spec.fields()[field_pos % self.spec.field_count()];
        match spec {
            FieldSpec::Name(attrs) => {
                let tail = self
                    .payload
                    .get(*data_pos..)
                    .expect("record data too short");
                let (name, _) = Name::split_from(tail)
                    .expect("malformed name in record data");
                *data_pos += name.len();
                Field::Name { name, attrs }
            }
            FieldSpec::Fixed(len) => {
                let data = self.data_at(*data_pos, usize::from(len));
                *data_pos += usize::from(len);
                Field::Data(data)
            }
            FieldSpec::Variable => {
                let len = self.length_at(*len_pos);
                *len_pos += 1;
                let data = self.data_at(*data_pos, len);
                *data_pos += len;
                Field::Data(data)
            }
        }
    }

    /// Returns the payload position where the signature data begins.
    ///
    /// Walks the record-data fields remaining between the current
    /// position and the end using local cursors only.
    fn locate_sigs(&self) -> usize {
        let mut data_pos = self.data_pos;
        let mut len_pos = self.len_pos;
        for field_pos in self.field_pos..self.step_count {
            self.step(field_pos, &mut data_pos, &mut len_pos);
        }
        data_pos
    }

    /// Returns the entry at `index` of the lengths table.
    fn length_at(&self, index: usize) -> usize {
        let slot = self
            .lengths
            .get(index * 2..index * 2 + 2)
            .expect("lengths table too short");
        usize::from(u16::from_ne_bytes([slot[0], slot[1]]))
    }

    /// Returns the payload range of `len` octets starting at `start`.
    fn data_at(&self, start: usize, len: usize) -> &'a [u8] {
        self.payload
            .get(start..start + len)
            .expect("record data too short")
    }
}

//--- Debug

impl<'a, N, D> fmt::Debug for RdataReader<'a, N, D> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("RdataReader")
            .field("spec", &self.spec)
            .field("field_pos", &self.field_pos)
            .field("sig_pos", &self.sig_pos)
            .finish()
    }
}

//============ Testing ======================================================
