use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;

use byteorder::{BigEndian, ReadBytesExt, WriteBytesExt};
use tracing::info;

use crate::error::{ExportError, Result, TrackError};
use crate::geometry::{BezierSegment, SegmentFlags};
use crate::math::Vector3;

/// Bytes per serialized segment.
pub const RECORD_SIZE: usize = 50;

const PADDING: [u8; 7] = [0; 7];

#[allow(clippy::cast_possible_truncation)]
fn write_vector<W: Write>(writer: &mut W, v: &Vector3) -> std::io::Result<()> {
    writer.write_f32::<BigEndian>(v.x as f32)?;
    writer.write_f32::<BigEndian>(v.y as f32)?;
    writer.write_f32::<BigEndian>(v.z as f32)
}

fn read_vector<R: Read>(reader: &mut R) -> std::io::Result<Vector3> {
    let x = reader.read_f32::<BigEndian>()?;
    let y = reader.read_f32::<BigEndian>()?;
    let z = reader.read_f32::<BigEndian>()?;
    Ok(Vector3::new(f64::from(x), f64::from(y), f64::from(z)))
}

fn write_record<W: Write>(writer: &mut W, segment: &BezierSegment) -> std::io::Result<()> {
    write_vector(writer, &segment.handle1)?;
    write_vector(writer, &segment.handle2)?;
    write_vector(writer, &segment.p1)?;
    writer.write_f32::<BigEndian>(segment.roll)?;
    writer.write_all(&segment.flags.to_bytes())?;
    writer.write_all(&PADDING)
}

/// Writes `segments` to `writer` as consecutive 50-byte records.
///
/// No buffering is added; wrap the writer in a [`BufWriter`] when writing
/// to a file. A failed write may leave a partial record behind.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the underlying writer fails.
pub fn write_to_export_file<W: Write>(writer: &mut W, segments: &[BezierSegment]) -> Result<()> {
    for segment in segments {
        write_record(writer, segment).map_err(ExportError::from)?;
    }
    Ok(())
}

/// Creates (or truncates) the file at `path` and writes `segments` to it.
///
/// Returns the number of bytes written.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if the file cannot be created or written.
pub fn write_export_path(path: impl AsRef<Path>, segments: &[BezierSegment]) -> Result<u64> {
    let path = path.as_ref();
    let file = File::create(path).map_err(ExportError::from)?;
    let mut writer = BufWriter::new(file);
    write_to_export_file(&mut writer, segments)?;
    writer.flush().map_err(ExportError::from)?;

    let bytes = (segments.len() * RECORD_SIZE) as u64;
    info!(path = %path.display(), segments = segments.len(), bytes, "wrote track export");
    Ok(bytes)
}

/// Decodes every record in `reader`.
///
/// # Errors
///
/// Returns [`ExportError::TruncatedRecord`] if the stream length is not a
/// multiple of [`RECORD_SIZE`], or [`ExportError::Io`] on read failure.
pub fn read_export_records<R: Read>(mut reader: R) -> Result<Vec<BezierSegment>> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes).map_err(ExportError::from)?;

    let trailing = bytes.len() % RECORD_SIZE;
    if trailing != 0 {
        return Err(ExportError::TruncatedRecord(trailing).into());
    }

    bytes
        .chunks_exact(RECORD_SIZE)
        .map(|mut record| {
            read_record(&mut record).map_err(|e| TrackError::from(ExportError::from(e)))
        })
        .collect()
}

fn read_record<R: Read>(reader: &mut R) -> std::io::Result<BezierSegment> {
    let handle1 = read_vector(reader)?;
    let handle2 = read_vector(reader)?;
    let p1 = read_vector(reader)?;
    let roll = reader.read_f32::<BigEndian>()?;
    let mut flags = [0u8; 3];
    reader.read_exact(&mut flags)?;
    let mut padding = PADDING;
    reader.read_exact(&mut padding)?;
    Ok(BezierSegment::new(
        handle1,
        handle2,
        p1,
        roll,
        SegmentFlags::from_bytes(flags),
    ))
}
