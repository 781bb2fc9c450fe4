//! Low-level PDF object emission.
//!
//! Objects are written sequentially with their byte offsets tracked so the
//! cross-reference table can be emitted at the end. Output contains no
//! timestamps or file identifiers, so the same objects always produce the
//! same bytes.

/// Sequential writer for numbered PDF objects.
pub(crate) struct ObjectWriter {
    buf: Vec<u8>,
    /// Byte offset of each object, indexed by object id. Index 0 is the
    /// free-list head and stays 0.
    offsets: Vec<usize>,
}

impl ObjectWriter {
    /// Create a writer and emit the file header.
    pub fn new() -> Self {
        let mut writer = Self {
            buf: Vec::new(),
            offsets: vec![0],
        };
        // Version header plus the conventional binary-marker comment.
        writer.buf.extend_from_slice(b"%PDF-1.4\n");
        writer.buf.extend_from_slice(&[b'%', 0xE2, 0xE3, 0xCF, 0xD3, b'\n']);
        writer
    }

    /// Emit object `id` with the given body (dictionary or stream).
    pub fn write_object(&mut self, id: usize, body: &[u8]) {
        if self.offsets.len() <= id {
            self.offsets.resize(id + 1, 0);
        }
        self.offsets[id] = self.buf.len();
        self.buf
            .extend_from_slice(format!("{} 0 obj\n", id).as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    /// Emit the xref table and trailer, consuming the writer.
    pub fn finish(mut self, root_id: usize, info_id: Option<usize>) -> Vec<u8> {
        let size = self.offsets.len();
        let xref_start = self.buf.len();
        self.buf
            .extend_from_slice(format!("xref\n0 {}\n", size).as_bytes());
        self.buf.extend_from_slice(b"0000000000 65535 f \n");
        for id in 1..size {
            self.buf
                .extend_from_slice(format!("{:010} 00000 n \n", self.offsets[id]).as_bytes());
        }
        let mut trailer = format!("trailer\n<< /Size {} /Root {} 0 R", size, root_id);
        if let Some(id) = info_id {
            trailer.push_str(&format!(" /Info {} 0 R", id));
        }
        trailer.push_str(&format!(" >>\nstartxref\n{}\n%%EOF\n", xref_start));
        self.buf.extend_from_slice(trailer.as_bytes());
        self.buf
    }
}

/// Build a stream object body from extra dictionary entries and raw data.
pub(crate) fn stream_object(dict_entries: &str, data: &[u8]) -> Vec<u8> {
    let mut body =
        format!("<< {}/Length {} >>\nstream\n", dict_entries, data.len()).into_bytes();
    body.extend_from_slice(data);
    body.extend_from_slice(b"\nendstream");
    body
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_and_trailer_framing() {
        let writer = ObjectWriter::new();
        let bytes = writer.finish(1, None);
        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("trailer\n<< /Size 1 /Root 1 0 R >>"));
    }

    #[test]
    fn test_offsets_recorded_in_xref() {
        let mut writer = ObjectWriter::new();
        writer.write_object(1, b"<< /Type /Catalog /Pages 2 0 R >>");
        writer.write_object(2, b"<< /Type /Pages /Kids [] /Count 0 >>");
        let bytes = writer.finish(1, None);
        let text = String::from_utf8_lossy(&bytes);

        // Both objects appear before the xref and have non-zero offsets.
        assert!(text.contains("1 0 obj"));
        assert!(text.contains("2 0 obj"));
        assert!(text.contains("xref\n0 3\n"));
        // Offsets must be measured in raw bytes (the header contains a
        // non-UTF-8 marker line).
        let offset_1 = bytes
            .windows(7)
            .position(|w| w == b"1 0 obj")
            .unwrap();
        assert!(text.contains(&format!("{:010} 00000 n", offset_1)));
    }

    #[test]
    fn test_info_reference_in_trailer() {
        let mut writer = ObjectWriter::new();
        writer.write_object(1, b"<< >>");
        writer.write_object(2, b"<< /Title (t) >>");
        let bytes = writer.finish(1, Some(2));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Info 2 0 R"));
    }

    #[test]
    fn test_stream_object_length() {
        let body = stream_object("/Filter /FlateDecode ", b"abc");
        let text = String::from_utf8_lossy(&body);
        assert!(text.starts_with("<< /Filter /FlateDecode /Length 3 >>\nstream\n"));
        assert!(text.ends_with("abc\nendstream"));
    }
}
