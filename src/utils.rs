use base64::Engine;
use encoding_rs::UTF_8;

const DEFAULT_DATA_URL_TYPE: &str = "application/octet-stream";
const HEX_LINE_WIDTH: usize = 16;

/// Decodes bytes as UTF-8, honouring a leading BOM and replacing malformed
/// sequences with U+FFFD.
pub fn decode_text(bytes: &[u8]) -> String {
    let (text, _, _) = UTF_8.decode(bytes);
    text.into_owned()
}

/// One char per byte, each char carrying the byte's value as its code point.
pub fn binary_string(bytes: &[u8]) -> String {
    bytes.iter().map(|&b| char::from(b)).collect()
}

pub fn data_url(mime_type: &str, bytes: &[u8]) -> String {
    let mime_type = if mime_type.is_empty() {
        DEFAULT_DATA_URL_TYPE
    } else {
        mime_type
    };
    let payload = base64::engine::general_purpose::STANDARD.encode(bytes);
    format!("data:{mime_type};base64,{payload}")
}

/// Renders bytes as newline separated hex rows so binary payloads can go
/// through a line diff.
pub fn hex_dump(bytes: &[u8]) -> String {
    let mut output = String::new();
    for (i, row) in bytes.chunks(HEX_LINE_WIDTH).enumerate() {
        if i > 0 {
            output.push('\n');
        }
        let offset = i * HEX_LINE_WIDTH;
        output.push_str(&format!("{offset:08x} "));
        let encoded = hex::encode(row);
        for pair in encoded.as_bytes().chunks(2) {
            output.push(' ');
            output.extend(pair.iter().map(|&b| char::from(b)));
        }
    }
    output
}
