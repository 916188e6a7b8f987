//! Record structs for the `.lft` trace format.
//!
//! [`RawTraceRecord`] is the on-disk layout, copied out of the batch buffer
//! with `plain`. [`TraceRecord`] is the decoded form the rest of the crate
//! works with.

use std::fmt;
use std::mem;
use std::num::TryFromIntError;

use plain::Plain;

use super::constants::OBJECT_ID_WIDTH;

/// Opaque identity of a traced object.
///
/// This is the address the object had in the producing process. It is only
/// ever compared, never dereferenced.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjectId(pub u64);

impl ObjectId {
    pub fn from_ne_bytes(bytes: [u8; OBJECT_ID_WIDTH]) -> Self {
        ObjectId(u64::from_ne_bytes(bytes))
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#0width$x}", self.0, width = OBJECT_ID_WIDTH * 2 + 2)
    }
}

/// One event record exactly as the runtime writes it (64-bit, C layout).
///
/// # Fields
/// - `event_type`: Index into the event name table
/// - `self_struct`: Identity of the reactor the event belongs to
/// - `reaction_number`: Reaction index, negative when there is none
/// - `worker`: Worker thread index
/// - `logical_time`: Absolute logical time
/// - `microstep`: Microstep at `logical_time`
/// - `physical_time`: Absolute physical time
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RawTraceRecord {
    pub event_type: i32,
    pub self_struct: u64,
    pub reaction_number: i32,
    pub worker: i32,
    pub logical_time: i64,
    pub microstep: i32,
    pub physical_time: i64,
}

// All fields are plain integers, any bit pattern is valid.
unsafe impl Plain for RawTraceRecord {}

/// Size in bytes of one record on disk.
pub const TRACE_RECORD_SIZE: usize = mem::size_of::<RawTraceRecord>();

const _: () = assert!(TRACE_RECORD_SIZE == 48);

impl RawTraceRecord {
    /// Copy a record out of `data`. Returns `None` if `data` is too short.
    pub fn from_bytes(data: &[u8]) -> Option<Self> {
        let mut record = RawTraceRecord::default();
        plain::copy_from_bytes(&mut record, data).ok()?;
        Some(record)
    }

    /// Serialize into the on-disk layout with zeroed padding.
    pub fn to_bytes(&self) -> [u8; TRACE_RECORD_SIZE] {
        let mut buf = [0u8; TRACE_RECORD_SIZE];
        buf[0..4].copy_from_slice(&self.event_type.to_ne_bytes());
        buf[8..16].copy_from_slice(&self.self_struct.to_ne_bytes());
        buf[16..20].copy_from_slice(&self.reaction_number.to_ne_bytes());
        buf[20..24].copy_from_slice(&self.worker.to_ne_bytes());
        buf[24..32].copy_from_slice(&self.logical_time.to_ne_bytes());
        buf[32..36].copy_from_slice(&self.microstep.to_ne_bytes());
        buf[40..48].copy_from_slice(&self.physical_time.to_ne_bytes());
        buf
    }
}

/// A decoded trace event.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraceRecord {
    pub event_type: i32,
    pub object: ObjectId,
    pub reaction: Option<u32>,
    pub worker: i32,
    pub logical_time: i64,
    pub microstep: i32,
    pub physical_time: i64,
}

impl TraceRecord {
    /// Logical time relative to `start_time`. Wraps on overflow.
    pub fn elapsed_logical(&self, start_time: i64) -> i64 {
        self.logical_time.wrapping_sub(start_time)
    }

    /// Physical time relative to `start_time`. Wraps on overflow.
    pub fn elapsed_physical(&self, start_time: i64) -> i64 {
        self.physical_time.wrapping_sub(start_time)
    }
}

impl From<RawTraceRecord> for TraceRecord {
    fn from(raw: RawTraceRecord) -> Self {
        TraceRecord {
            event_type: raw.event_type,
            object: ObjectId(raw.self_struct),
            reaction: u32::try_from(raw.reaction_number).ok(),
            worker: raw.worker,
            logical_time: raw.logical_time,
            microstep: raw.microstep,
            physical_time: raw.physical_time,
        }
    }
}

/// Fails if the reaction index does not fit the on-disk `i32`.
impl TryFrom<TraceRecord> for RawTraceRecord {
    type Error = TryFromIntError;

    fn try_from(record: TraceRecord) -> Result<Self, Self::Error> {
        let reaction_number = match record.reaction {
            Some(r) => i32::try_from(r)?,
            None => -1,
        };
        Ok(RawTraceRecord {
            event_type: record.event_type,
            self_struct: record.object.0,
            reaction_number,
            worker: record.worker,
            logical_time: record.logical_time,
            microstep: record.microstep,
            physical_time: record.physical_time,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RawTraceRecord {
        RawTraceRecord {
            event_type: 1,
            self_struct: 0x7f00_dead_beef,
            reaction_number: 3,
            worker: 2,
            logical_time: 1_000,
            microstep: 4,
            physical_time: 1_250,
        }
    }

    #[test]
    fn test_record_layout_offsets() {
        let bytes = sample().to_bytes();
        assert_eq!(&bytes[0..4], &1i32.to_ne_bytes());
        assert_eq!(&bytes[4..8], &[0u8; 4]);
        assert_eq!(&bytes[8..16], &0x7f00_dead_beefu64.to_ne_bytes());
        assert_eq!(&bytes[36..40], &[0u8; 4]);
        assert_eq!(&bytes[40..48], &1_250i64.to_ne_bytes());
    }

    #[test]
    fn test_plain_decode_matches_layout() {
        let raw = sample();
        assert_eq!(RawTraceRecord::from_bytes(&raw.to_bytes()), Some(raw));
    }

    #[test]
    fn test_short_buffer_is_rejected() {
        let bytes = sample().to_bytes();
        assert_eq!(RawTraceRecord::from_bytes(&bytes[..40]), None);
    }

    #[test]
    fn test_negative_reaction_is_absent() {
        let mut raw = sample();
        raw.reaction_number = -1;
        assert_eq!(TraceRecord::from(raw).reaction, None);
        raw.reaction_number = 0;
        assert_eq!(TraceRecord::from(raw).reaction, Some(0));
    }

    #[test]
    fn test_reaction_out_of_disk_range() {
        let record = TraceRecord {
            reaction: Some(u32::MAX),
            ..Default::default()
        };
        assert!(RawTraceRecord::try_from(record).is_err());

        let record = TraceRecord {
            reaction: Some(i32::MAX as u32),
            ..Default::default()
        };
        assert_eq!(
            RawTraceRecord::try_from(record).unwrap().reaction_number,
            i32::MAX
        );
    }

    #[test]
    fn test_elapsed_wraps() {
        let record = TraceRecord {
            logical_time: i64::MIN,
            physical_time: 10,
            ..Default::default()
        };
        assert_eq!(record.elapsed_logical(1), i64::MAX);
        assert_eq!(record.elapsed_physical(4), 6);
    }

    #[test]
    fn test_object_id_display() {
        assert_eq!(ObjectId(0xbeef).to_string(), "0x000000000000beef");
    }
}
