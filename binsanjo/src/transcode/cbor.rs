//! CBOR transcoding: encode a Sanjo document as CBOR binary data.
//!
//! The document keeps its own shape: every class is a map with the text keys
//! "name", "values", and "children". Scalars are text strings and lists are
//! arrays of text strings.

use ciborium::value::Value as CborValue;
use libsanjo::Document;
use std::fmt::Write as FmtWrite;

/// Encode a document as CBOR bytes.
pub fn encode(doc: &Document) -> Result<Vec<u8>, String> {
    let mut buf = Vec::new();
    ciborium::ser::into_writer(doc, &mut buf).map_err(|e| format!("CBOR encode error: {}", e))?;
    Ok(buf)
}

// ---------------------------------------------------------------------------
// Diagnostic notation (RFC 8949 §8)
// ---------------------------------------------------------------------------

/// Render CBOR bytes in diagnostic notation.
pub fn diagnostic(input: &[u8]) -> Result<String, String> {
    let cbor_value: CborValue =
        ciborium::de::from_reader(input).map_err(|e| format!("CBOR decode error: {}", e))?;
    let mut out = String::new();
    diag_value(&mut out, &cbor_value, 0);
    out.push('\n');
    Ok(out)
}

fn diag_value(out: &mut String, val: &CborValue, indent: usize) {
    // Documents only ever encode text, arrays and maps.
    match val {
        CborValue::Text(s) => diag_text(out, s),
        CborValue::Array(arr) => diag_array(out, arr, indent),
        CborValue::Map(pairs) => diag_map(out, pairs, indent),
        _ => {
            let _ = write!(out, "<?unknown {:?}>", val);
        }
    }
}

fn diag_text(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                let _ = write!(out, "\\u{:04x}", c as u32);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}

fn push_indent(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat(' ').take(indent));
}

fn diag_array(out: &mut String, arr: &[CborValue], indent: usize) {
    if arr.is_empty() {
        out.push_str("[]");
        return;
    }
    // Lists of strings stay on one line
    if arr.iter().all(|v| matches!(v, CborValue::Text(_))) {
        out.push('[');
        for (i, item) in arr.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            diag_value(out, item, indent);
        }
        out.push(']');
        return;
    }
    out.push_str("[\n");
    let child_indent = indent + 2;
    for (i, item) in arr.iter().enumerate() {
        push_indent(out, child_indent);
        diag_value(out, item, child_indent);
        if i < arr.len() - 1 {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, indent);
    out.push(']');
}

fn diag_map(out: &mut String, pairs: &[(CborValue, CborValue)], indent: usize) {
    if pairs.is_empty() {
        out.push_str("{}");
        return;
    }
    out.push_str("{\n");
    let child_indent = indent + 2;
    for (i, (k, v)) in pairs.iter().enumerate() {
        push_indent(out, child_indent);
        diag_value(out, k, child_indent);
        out.push_str(": ");
        diag_value(out, v, child_indent);
        if i < pairs.len() - 1 {
            out.push(',');
        }
        out.push('\n');
    }
    push_indent(out, indent);
    out.push('}');
}

#[cfg(test)]
mod tests {
    use super::*;
    use libsanjo::parse;

    #[test]
    fn test_encode_decodes_to_same_shape() {
        let doc = parse(":A\n    .x=1").unwrap();
        let bytes = encode(&doc).unwrap();
        let value: CborValue = ciborium::de::from_reader(&bytes[..]).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map.len(), 3);
        assert_eq!(map[0].0.as_text(), Some("name"));
    }

    #[test]
    fn test_diagnostic() {
        let doc = parse(".tags[]=a,b").unwrap();
        let diag = diagnostic(&encode(&doc).unwrap()).unwrap();
        assert_eq!(
            diag,
            "{\n  \"name\": \"\",\n  \"values\": {\n    \"tags\": [\"a\", \"b\"]\n  },\n  \"children\": []\n}\n"
        );
    }

    #[test]
    fn test_diagnostic_marks_foreign_items() {
        // 0x01 is the unsigned integer 1, which no document produces.
        let diag = diagnostic(&[0x01]).unwrap();
        assert!(diag.starts_with("<?unknown"), "{}", diag);
    }
}
