//! Binary interchange format for exported track.
//!
//! A file is a bare sequence of fixed-size records, one per
//! [`BezierSegment`](crate::geometry::BezierSegment), in track order:
//!
//! | offset | size | field |
//! |---|---|---|
//! | 0 | 12 | `handle1.{x,y,z}` |
//! | 12 | 12 | `handle2.{x,y,z}` |
//! | 24 | 12 | `p1.{x,y,z}` |
//! | 36 | 4 | `roll` |
//! | 40 | 3 | flags: continuous roll, relative roll, equal-distance handles |
//! | 43 | 7 | zero padding |
//!
//! Floats are big-endian IEEE-754 single precision; flags are `0xFF` or
//! `0x00`. There is no header.

mod export_file;

pub use export_file::{read_export_records, write_export_path, write_to_export_file, RECORD_SIZE};
