//! PointSet / Triangle-set wire format.
//!
//! - Points travel as IEEE-754 single precision pairs; in memory they are f64.
//! - Triangle indices travel as u32; in memory they are usize.
//! - Decoding never reads past the end of the buffer and never allocates for
//!   records the buffer does not actually contain.
//!
//! PointSet layout (little-endian):
//!   00  : u32     points_count N
//!   04  : for each point: f32 x, f32 y          (8N bytes)
//!
//! Triangle-set layout (little-endian):
//!   00  : PointSet                              (4 + 8N bytes)
//!   ..  : u32     triangles_count T
//!   ..  : for each triangle: u32 a, u32 b, u32 c (12T bytes)
//!
//! Bytes after the last declared record are ignored.

mod error;

pub use error::{CodecError, CodecResult};

use error::bad;

pub const COUNT_BYTES: usize = 4;
pub const POINT_RECORD_BYTES: usize = 8;
pub const TRIANGLE_RECORD_BYTES: usize = 12;

/// A 2D point. Identity is positional: its index in the owning point list.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

impl From<(f64, f64)> for Point {
    #[inline]
    fn from((x, y): (f64, f64)) -> Self {
        Self { x, y }
    }
}

impl From<[f64; 2]> for Point {
    #[inline]
    fn from([x, y]: [f64; 2]) -> Self {
        Self { x, y }
    }
}

/// Three indices into a point list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Triangle(pub [usize; 3]);

impl Triangle {
    #[inline]
    pub const fn new(a: usize, b: usize, c: usize) -> Self {
        Self([a, b, c])
    }

    #[inline]
    pub fn indices(self) -> [usize; 3] {
        self.0
    }

    /// True when no two of the three indices are equal.
    #[inline]
    pub fn has_distinct_vertices(self) -> bool {
        let [a, b, c] = self.0;
        a != b && b != c && a != c
    }
}

impl From<(usize, usize, usize)> for Triangle {
    #[inline]
    fn from((a, b, c): (usize, usize, usize)) -> Self {
        Self([a, b, c])
    }
}

/// Encoded size of a PointSet with `points` records, `None` on overflow.
#[inline]
pub fn point_set_len(points: usize) -> Option<usize> {
    points.checked_mul(POINT_RECORD_BYTES)?.checked_add(COUNT_BYTES)
}

/// Encoded size of a Triangle-set, `None` on overflow.
#[inline]
pub fn triangle_set_len(points: usize, triangles: usize) -> Option<usize> {
    triangles
        .checked_mul(TRIANGLE_RECORD_BYTES)?
        .checked_add(COUNT_BYTES)?
        .checked_add(point_set_len(points)?)
}

#[inline(always)]
fn take<'a>(buf: &mut &'a [u8], n: usize, what: &str) -> CodecResult<&'a [u8]> {
    if buf.len() < n {
        return Err(bad(format!("truncated {what}")));
    }
    let (head, tail) = buf.split_at(n);
    *buf = tail;
    Ok(head)
}

#[inline(always)]
fn le_u32(buf: &mut &[u8], what: &str) -> CodecResult<u32> {
    let b = take(buf, 4, what)?;
    Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
}

#[inline(always)]
fn u32_at(b: &[u8], at: usize) -> u32 {
    u32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

#[inline(always)]
fn f32_at(b: &[u8], at: usize) -> f32 {
    f32::from_le_bytes([b[at], b[at + 1], b[at + 2], b[at + 3]])
}

#[inline]
fn write_u32(out: &mut Vec<u8>, v: u32) {
    out.extend_from_slice(&v.to_le_bytes());
}

#[inline]
fn write_f32(out: &mut Vec<u8>, v: f32) {
    out.extend_from_slice(&v.to_le_bytes());
}

fn read_points(p: &mut &[u8]) -> CodecResult<Vec<Point>> {
    let count = le_u32(p, "point count")? as usize;
    let bytes = count
        .checked_mul(POINT_RECORD_BYTES)
        .ok_or_else(|| bad("point count overflow"))?;
    let raw = take(p, bytes, "point records")?;

    let mut points = Vec::with_capacity(count);
    for (i, rec) in raw.chunks_exact(POINT_RECORD_BYTES).enumerate() {
        let x = f32_at(rec, 0);
        let y = f32_at(rec, 4);
        if !x.is_finite() || !y.is_finite() {
            return Err(bad(format!("non-finite coordinate in point {i}")));
        }
        points.push(Point::new(x as f64, y as f64));
    }

    Ok(points)
}

fn write_points(out: &mut Vec<u8>, points: &[Point]) -> CodecResult<()> {
    let count =
        u32::try_from(points.len()).map_err(|_| bad("point count does not fit u32 header"))?;
    write_u32(out, count);
    for (i, p) in points.iter().enumerate() {
        let (x, y) = (p.x as f32, p.y as f32);
        if !x.is_finite() || !y.is_finite() {
            return Err(bad(format!("coordinate of point {i} does not fit f32")));
        }
        write_f32(out, x);
        write_f32(out, y);
    }
    Ok(())
}

/// Encode a point list. Coordinates are narrowed to f32; a coordinate that
/// is non-finite or outside f32 range is a format error.
pub fn encode_point_set(points: &[Point]) -> CodecResult<Vec<u8>> {
    let len = point_set_len(points.len()).ok_or_else(|| bad("point set too large"))?;
    let mut out = Vec::with_capacity(len);
    write_points(&mut out, points)?;
    Ok(out)
}

/// Decode a point list. An empty set (count = 0) is valid.
pub fn decode_point_set(mut p: &[u8]) -> CodecResult<Vec<Point>> {
    if p.len() < COUNT_BYTES {
        return Err(bad("binary data too short"));
    }
    read_points(&mut p)
}

/// Encode points followed by triangles. Every index must be `< points.len()`.
pub fn triangles_to_binary(points: &[Point], triangles: &[Triangle]) -> CodecResult<Vec<u8>> {
    let len = triangle_set_len(points.len(), triangles.len())
        .ok_or_else(|| bad("triangle set too large"))?;
    let mut out = Vec::with_capacity(len);

    write_points(&mut out, points)?;

    let count = u32::try_from(triangles.len())
        .map_err(|_| bad("triangle count does not fit u32 header"))?;
    write_u32(&mut out, count);

    for (t, tri) in triangles.iter().enumerate() {
        for &index in &tri.0 {
            if index >= points.len() {
                return Err(CodecError::IndexRange {
                    triangle: t,
                    index,
                    point_count: points.len(),
                });
            }
            // points.len() fits u32 (checked by write_points), so index does too.
            write_u32(&mut out, index as u32);
        }
    }

    Ok(out)
}

/// Decode points followed by triangles, validating every triangle against
/// the decoded point count.
pub fn binary_to_triangles(mut p: &[u8]) -> CodecResult<(Vec<Point>, Vec<Triangle>)> {
    if p.len() < COUNT_BYTES {
        return Err(bad("binary data too short"));
    }
    let points = read_points(&mut p)?;

    let count = le_u32(&mut p, "triangle count")? as usize;
    let bytes = count
        .checked_mul(TRIANGLE_RECORD_BYTES)
        .ok_or_else(|| bad("triangle count overflow"))?;
    let raw = take(&mut p, bytes, "triangle records")?;

    let mut triangles = Vec::with_capacity(count);
    for (t, rec) in raw.chunks_exact(TRIANGLE_RECORD_BYTES).enumerate() {
        let indices = [
            u32_at(rec, 0) as usize,
            u32_at(rec, 4) as usize,
            u32_at(rec, 8) as usize,
        ];

        if let Some(&index) = indices.iter().find(|&&i| i >= points.len()) {
            return Err(CodecError::IndexRange {
                triangle: t,
                index,
                point_count: points.len(),
            });
        }

        let tri = Triangle(indices);
        if !tri.has_distinct_vertices() {
            return Err(CodecError::DuplicateVertex {
                triangle: t,
                indices,
            });
        }
        triangles.push(tri);
    }

    Ok((points, triangles))
}
