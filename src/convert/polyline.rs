//! encoded polyline algorithm at precision level 5: each coordinate is
//! rounded to 5 decimal digits, delta-coded against the previous point
//! (the first point against origin 0,0), zig-zag signed, and packed into
//! 5-bit groups with a continuation bit, offset by 63 into printable ASCII.

const PRECISION: f64 = 1e5;

/// encodes an ordered sequence of (latitude, longitude) points into one
/// compact printable string.
pub fn encode(points: &[(f64, f64)]) -> String {
    let mut encoded = String::new();
    let mut prev_lat: i64 = 0;
    let mut prev_lon: i64 = 0;
    for &(lat, lon) in points {
        let lat_e5 = (lat * PRECISION).round() as i64;
        let lon_e5 = (lon * PRECISION).round() as i64;
        encode_value(lat_e5 - prev_lat, &mut encoded);
        encode_value(lon_e5 - prev_lon, &mut encoded);
        prev_lat = lat_e5;
        prev_lon = lon_e5;
    }
    encoded
}

/// decodes a precision-5 polyline back into (latitude, longitude) points.
/// decoding stops at a truncated trailing value.
pub fn decode(encoded: &str) -> Vec<(f64, f64)> {
    let bytes = encoded.as_bytes();
    let mut points = Vec::new();
    let mut cursor = 0;
    let mut lat: i64 = 0;
    let mut lon: i64 = 0;
    while cursor < bytes.len() {
        let (delta_lat, next) = match decode_value(bytes, cursor) {
            Some(result) => result,
            None => break,
        };
        let (delta_lon, next) = match decode_value(bytes, next) {
            Some(result) => result,
            None => break,
        };
        lat += delta_lat;
        lon += delta_lon;
        points.push((lat as f64 / PRECISION, lon as f64 / PRECISION));
        cursor = next;
    }
    points
}

fn encode_value(value: i64, out: &mut String) {
    // zig-zag: left shift, invert when negative so the sign lives in bit 0
    let mut v = if value < 0 { !(value << 1) } else { value << 1 };
    while v >= 0x20 {
        out.push((((0x20 | (v & 0x1f)) + 63) as u8) as char);
        v >>= 5;
    }
    out.push(((v + 63) as u8) as char);
}

fn decode_value(bytes: &[u8], mut cursor: usize) -> Option<(i64, usize)> {
    let mut result: i64 = 0;
    let mut shift = 0;
    loop {
        let chunk = (*bytes.get(cursor)? as i64) - 63;
        cursor += 1;
        // a corrupt run of continuation bytes would shift past the value width
        if shift >= 64 {
            return None;
        }
        result |= (chunk & 0x1f) << shift;
        shift += 5;
        if chunk < 0x20 {
            break;
        }
    }
    let value = if result & 1 != 0 {
        !(result >> 1)
    } else {
        result >> 1
    };
    Some((value, cursor))
}
