use chardetng::EncodingDetector;
use encoding_rs::Encoding;

/// Response body decoded to UTF-8, plus the encoding that was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodedBody {
    pub text: String,
    pub encoding: &'static str,
}

/// Decodes response bytes to UTF-8: BOM first, then the Content-Type
/// charset parameter, then statistical detection.
///
/// Decoding is total: undecodable sequences become replacement characters
/// rather than errors, since a partially mangled page is still worth
/// running through extraction.
pub fn decode_body(bytes: &[u8], content_type: Option<&str>) -> DecodedBody {
    if let Some((encoding, _)) = Encoding::for_bom(bytes) {
        return decode_with(bytes, encoding);
    }
    if let Some(encoding) = content_type.and_then(charset_of) {
        return decode_with(bytes, encoding);
    }
    let mut detector = EncodingDetector::new();
    detector.feed(bytes, true);
    decode_with(bytes, detector.guess(None, true))
}

fn charset_of(content_type: &str) -> Option<&'static Encoding> {
    content_type.split(';').find_map(|part| {
        let (key, value) = part.trim().split_once('=')?;
        if !key.trim().eq_ignore_ascii_case("charset") {
            return None;
        }
        Encoding::for_label(value.trim_matches([' ', '"', '\''].as_ref()).as_bytes())
    })
}

fn decode_with(bytes: &[u8], encoding: &'static Encoding) -> DecodedBody {
    let (text, used, _) = encoding.decode(bytes);
    DecodedBody {
        text: text.into_owned(),
        encoding: used.name(),
    }
}
