//! `multipart/x-mixed-replace` framing for pushing whole images.
//!
//! Each part is the image followed by the next boundary and the next part's
//! header, so a client can display a frame as soon as it arrives.

use bytes::{BufMut, Bytes, BytesMut};

pub const MULTIPART_BOUNDARY: &str = "]]>?><%";

#[derive(Debug, Clone)]
pub struct MultipartFramer {
    boundary: String,
    part_content_type: String,
}

impl MultipartFramer {
    pub fn new(boundary: impl Into<String>, part_content_type: impl Into<String>) -> Self {
        Self {
            boundary: boundary.into(),
            part_content_type: part_content_type.into(),
        }
    }

    pub fn boundary(&self) -> &str {
        &self.boundary
    }

    /// Value of the response `Content-Type` header
    pub fn content_type(&self) -> String {
        format!("multipart/x-mixed-replace; boundary=\"{}\"", self.boundary)
    }

    /// Written once, right after the response headers
    pub fn preamble(&self) -> Bytes {
        let mut buf = BytesMut::new();
        self.put_part_header(&mut buf);
        buf.freeze()
    }

    pub fn frame(&self, image: &[u8]) -> Bytes {
        let mut buf = BytesMut::with_capacity(image.len() + self.boundary.len() + 64);
        buf.put_slice(image);
        buf.put_slice(b"\r\n");
        self.put_part_header(&mut buf);
        buf.freeze()
    }

    fn put_part_header(&self, buf: &mut BytesMut) {
        buf.put_slice(b"--");
        buf.put_slice(self.boundary.as_bytes());
        buf.put_slice(b"\r\nContent-Type: ");
        buf.put_slice(self.part_content_type.as_bytes());
        buf.put_slice(b"\r\n\r\n");
    }
}

impl Default for MultipartFramer {
    fn default() -> Self {
        Self::new(MULTIPART_BOUNDARY, "image/svg+xml")
    }
}
