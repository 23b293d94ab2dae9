//! Encoded polyline format.
//!
//! Each coordinate is scaled by 1e5, rounded, and delta-encoded against the
//! previous point (the first against 0,0). Deltas are zig-zag mapped to
//! unsigned values and written as little-endian 5-bit groups, each offset by
//! 63 into printable ASCII, with 0x20 set on every group but the last.

use crate::domain::Coordinate;

const PRECISION: f64 = 1e5;
const CHUNK_OFFSET: u8 = 63;
const CONTINUATION: u64 = 0x20;
const CHUNK_MASK: u64 = 0x1f;

/// Encode a sequence of coordinates.
///
/// ```
/// use crawl_server::domain::Coordinate;
/// use crawl_server::geo::encode;
///
/// let path = [
///     Coordinate::new(38.5, -120.2),
///     Coordinate::new(40.7, -120.95),
///     Coordinate::new(43.252, -126.453),
/// ];
/// assert_eq!(encode(&path), "_p~iF~ps|U_ulLnnqC_mqNvxq`@");
/// assert_eq!(encode(&[]), "");
/// ```
pub fn encode(points: &[Coordinate]) -> String {
    let mut out = String::new();
    let mut prev_lat = 0i64;
    let mut prev_lng = 0i64;

    for point in points {
        let lat = scale(point.lat);
        let lng = scale(point.lng);

        encode_signed(lat - prev_lat, &mut out);
        encode_signed(lng - prev_lng, &mut out);

        prev_lat = lat;
        prev_lng = lng;
    }

    out
}

/// Decode an encoded polyline.
///
/// Decoding is lenient: input that stops part-way through a value, contains
/// bytes outside the encoding alphabet, or accumulates past the `i64` range
/// yields the points that were complete up to that position.
///
/// ```
/// use crawl_server::domain::Coordinate;
/// use crawl_server::geo::decode;
///
/// let path = decode("_p~iF~ps|U_ulLnnqC_mqNvxq`@");
/// assert_eq!(path.len(), 3);
/// assert_eq!(path[0], Coordinate::new(38.5, -120.2));
/// assert!(decode("").is_empty());
/// ```
pub fn decode(encoded: &str) -> Vec<Coordinate> {
    let mut points = Vec::new();
    let mut bytes = encoded.bytes();
    let mut lat = 0i64;
    let mut lng = 0i64;

    loop {
        let Some(d_lat) = decode_signed(&mut bytes) else {
            break;
        };
        let Some(d_lng) = decode_signed(&mut bytes) else {
            break;
        };

        let (Some(next_lat), Some(next_lng)) = (lat.checked_add(d_lat), lng.checked_add(d_lng))
        else {
            break;
        };
        lat = next_lat;
        lng = next_lng;

        points.push(Coordinate::new(lat as f64 / PRECISION, lng as f64 / PRECISION));
    }

    points
}

fn scale(degrees: f64) -> i64 {
    (degrees * PRECISION).round() as i64
}

fn encode_signed(value: i64, out: &mut String) {
    let zigzag = if value < 0 {
        !((value as u64) << 1)
    } else {
        (value as u64) << 1
    };
    encode_unsigned(zigzag, out);
}

fn encode_unsigned(mut value: u64, out: &mut String) {
    while value >= CONTINUATION {
        out.push(chunk_char((CONTINUATION | (value & CHUNK_MASK)) as u8));
        value >>= 5;
    }
    out.push(chunk_char(value as u8));
}

fn chunk_char(chunk: u8) -> char {
    char::from(chunk + CHUNK_OFFSET)
}

/// Read one zig-zag value. `None` on end of input or malformed data.
fn decode_signed(bytes: &mut impl Iterator<Item = u8>) -> Option<i64> {
    let mut result = 0u64;
    let mut shift = 0u32;

    loop {
        let byte = bytes.next()?;
        let chunk = u64::from(byte.checked_sub(CHUNK_OFFSET)?);
        if chunk > 0x3f || shift >= 64 {
            return None;
        }

        result |= (chunk & CHUNK_MASK) << shift;
        shift += 5;

        if chunk < CONTINUATION {
            break;
        }
    }

    let magnitude = (result >> 1) as i64;
    Some(if result & 1 != 0 { !magnitude } else { magnitude })
}
