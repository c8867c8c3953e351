//! WBMP (Wireless Application Protocol bitmap), type 0 only.
//!
//! Layout: type (0), fixed header (0), width and height as multi-byte
//! integers (7 bits per byte, high bit set on all but the last byte), then
//! packed rows with a set bit meaning white.

use super::narrow::MonoBitmap;
use crate::error::EncodeError;

pub fn encode(bitmap: &MonoBitmap) -> Result<Vec<u8>, EncodeError> {
    if bitmap.width() == 0 || bitmap.height() == 0 {
        return Err(EncodeError::WbmpDimensions {
            width: bitmap.width(),
            height: bitmap.height(),
        });
    }

    let mut out = Vec::with_capacity(bitmap.data().len() + 12);
    out.push(0x00);
    out.push(0x00);
    write_multibyte(&mut out, bitmap.width());
    write_multibyte(&mut out, bitmap.height());
    out.extend_from_slice(bitmap.data());
    Ok(out)
}

pub fn decode(data: &[u8]) -> Result<MonoBitmap, EncodeError> {
    let mut pos = 0usize;
    let type_field = read_multibyte(data, &mut pos)?;
    if type_field != 0 {
        return Err(EncodeError::WbmpDecode("only type 0 is supported"));
    }
    let fix_header = *data
        .get(pos)
        .ok_or(EncodeError::WbmpDecode("truncated header"))?;
    pos += 1;
    if fix_header & 0x80 != 0 {
        return Err(EncodeError::WbmpDecode("extension headers are not supported"));
    }
    let width = read_multibyte(data, &mut pos)?;
    let height = read_multibyte(data, &mut pos)?;

    MonoBitmap::from_packed(width, height, data[pos..].to_vec())
        .ok_or(EncodeError::WbmpDecode("pixel data length does not match dimensions"))
}

fn write_multibyte(out: &mut Vec<u8>, value: u32) {
    let mut groups = [0u8; 5];
    let mut n = 0;
    let mut v = value;
    loop {
        groups[n] = (v & 0x7f) as u8;
        n += 1;
        v >>= 7;
        if v == 0 {
            break;
        }
    }
    for i in (0..n).rev() {
        let continuation = if i > 0 { 0x80 } else { 0x00 };
        out.push(groups[i] | continuation);
    }
}

fn read_multibyte(data: &[u8], pos: &mut usize) -> Result<u32, EncodeError> {
    let mut value: u32 = 0;
    for _ in 0..5 {
        let byte = *data
            .get(*pos)
            .ok_or(EncodeError::WbmpDecode("truncated header"))?;
        *pos += 1;
        value = value
            .checked_mul(128)
            .ok_or(EncodeError::WbmpDecode("multi-byte integer overflow"))?
            | (byte & 0x7f) as u32;
        if byte & 0x80 == 0 {
            return Ok(value);
        }
    }
    Err(EncodeError::WbmpDecode("multi-byte integer too long"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_multibyte_encoding() {
        let mut out = Vec::new();
        write_multibyte(&mut out, 100);
        assert_eq!(out, vec![100]);

        out.clear();
        write_multibyte(&mut out, 500);
        // 500 = 3 * 128 + 116
        assert_eq!(out, vec![0x83, 0x74]);

        let mut pos = 0;
        assert_eq!(read_multibyte(&out, &mut pos).unwrap(), 500);
        assert_eq!(pos, 2);
    }

    #[test]
    fn test_header_and_payload_layout() {
        let mut bitmap = MonoBitmap::new(9, 2);
        bitmap.set(8, 0, true);
        let bytes = encode(&bitmap).unwrap();
        assert_eq!(bytes, vec![0, 0, 9, 2, 0x00, 0x80, 0x00, 0x00]);
    }

    #[test]
    fn test_decode_reads_back_pixels() {
        let mut bitmap = MonoBitmap::new(500, 3);
        bitmap.set(0, 0, true);
        bitmap.set(499, 2, true);
        let decoded = decode(&encode(&bitmap).unwrap()).unwrap();
        assert_eq!(decoded, bitmap);
    }

    #[test]
    fn test_decode_rejects_truncated_data() {
        assert!(decode(&[0, 0, 8]).is_err());
        assert!(decode(&[0, 0, 8, 1]).is_err());
        assert!(decode(&[1, 0, 8, 1, 0]).is_err());
    }

    #[test]
    fn test_empty_bitmap_rejected() {
        assert!(matches!(
            encode(&MonoBitmap::new(0, 4)),
            Err(EncodeError::WbmpDimensions { width: 0, height: 4 })
        ));
    }
}
