pub mod multipart;
pub mod sse;
