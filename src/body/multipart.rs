//! # Multipart body
//!
//! This module contains the [`Boundary`] and the [`MultipartBody`] stream
//! which serializes form fields and files as `multipart/form-data`.
//!
//! Part headers and text values are buffered, file contents are pulled from
//! disk in fixed-size chunks while the body is read, so an upload never needs
//! the whole file in memory.

use crate::core::{
    utils::{
        encoding::encode_text,
        headers::{APPLICATION_OCTET_STREAM, MULTIPART_FORM_DATA},
    },
    FileAttachment, Parameter, ServiceClientError,
};
use encoding_rs::Encoding;
use log::debug;
use new_mime_guess::MimeGuess;
use std::{
    collections::VecDeque,
    fmt::Display,
    fs::File,
    io::{self, Cursor, Read},
    path::PathBuf,
    time::{SystemTime, UNIX_EPOCH},
};
use uuid::Uuid;

/// Default size of a single read from an attached file.
pub const DEFAULT_CHUNK_SIZE: usize = 4096;

const LINE_FEED: &str = "\r\n";
const HYPHENS: &str = "--";

/// Part delimiter of a single request.
///
/// Generated once per request and used by every part delimiter and by the
/// `Content-Type` header. Field values are not escaped, so a value which
/// contains the boundary verbatim would corrupt the body.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Boundary(String);

impl Boundary {
    /// Time based boundary with a random suffix: `===<millis><uuid>===`.
    pub fn generate() -> Self {
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|elapsed| elapsed.as_millis())
            .unwrap_or_default();

        Self(format!("==={}{}===", millis, Uuid::new_v4().simple()))
    }

    /// Use `value` as boundary.
    pub fn new<S>(value: S) -> Self
    where
        S: Into<String>,
    {
        Self(value.into())
    }

    /// Raw boundary value.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// `Content-Type` header value announcing this boundary.
    pub fn content_type(&self) -> String {
        format!("{MULTIPART_FORM_DATA}; boundary={}", self.0)
    }
}

impl Display for Boundary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug)]
struct FileSegment {
    path: PathBuf,
    file: File,
    remaining: u64,
}

impl FileSegment {
    fn read_chunk(&mut self, buf: &mut [u8], chunk_size: usize) -> io::Result<usize> {
        if self.remaining == 0 {
            return Ok(0);
        }

        let limit = buf
            .len()
            .min(chunk_size)
            .min(usize::try_from(self.remaining).unwrap_or(usize::MAX));
        let read = self.file.read(&mut buf[..limit])?;

        if read == 0 {
            return Err(io::Error::new(
                io::ErrorKind::UnexpectedEof,
                format!(
                    "{} ended {} bytes early",
                    self.path.display(),
                    self.remaining
                ),
            ));
        }

        self.remaining -= read as u64;
        Ok(read)
    }
}

#[derive(Debug)]
enum Segment {
    Bytes(Cursor<Vec<u8>>),
    File(FileSegment),
}

/// Streamed `multipart/form-data` body.
///
/// Implements [`Read`], so it can be handed to an HTTP client as a streaming
/// body. The exact length is known up front from the part headers and the
/// file sizes taken when the files were opened.
///
/// Opened files are closed as soon as their part has been read, or when the
/// body is dropped.
#[derive(Debug)]
pub struct MultipartBody {
    segments: VecDeque<Segment>,
    content_length: u64,
    chunk_size: usize,
}

impl MultipartBody {
    /// Start serializing a body delimited by `boundary`.
    ///
    /// `charset_label` is the name announced in text parts, `charset` the
    /// encoder used for every textual line.
    pub fn encoder<'a>(
        boundary: &'a Boundary,
        charset: &'static Encoding,
        charset_label: &'a str,
    ) -> MultipartEncoder<'a> {
        MultipartEncoder {
            boundary,
            charset,
            charset_label,
            chunk_size: DEFAULT_CHUNK_SIZE,
            pending: Vec::new(),
            segments: VecDeque::new(),
            content_length: 0,
        }
    }

    /// Total number of bytes the body will produce.
    pub fn content_length(&self) -> u64 {
        self.content_length
    }
}

impl Read for MultipartBody {
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        if buf.is_empty() {
            return Ok(0);
        }

        while let Some(segment) = self.segments.front_mut() {
            let read = match segment {
                Segment::Bytes(cursor) => cursor.read(buf)?,
                Segment::File(file) => file.read_chunk(buf, self.chunk_size)?,
            };

            if read > 0 {
                return Ok(read);
            }

            self.segments.pop_front();
        }

        Ok(0)
    }
}

/// Collects the parts of a [`MultipartBody`].
///
/// Parts are written in the order they are added. Files are opened right
/// away, so a missing file fails before anything is sent.
#[derive(Debug)]
pub struct MultipartEncoder<'a> {
    boundary: &'a Boundary,
    charset: &'static Encoding,
    charset_label: &'a str,
    chunk_size: usize,
    pending: Vec<u8>,
    segments: VecDeque<Segment>,
    content_length: u64,
}

impl MultipartEncoder<'_> {
    /// Read attached files `chunk_size` bytes at a time.
    pub fn chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Append text part for `param`.
    pub fn text(mut self, param: &Parameter) -> Result<Self, ServiceClientError> {
        let part = format!(
            "{HYPHENS}{boundary}{LINE_FEED}\
             Content-Disposition: form-data; name=\"{name}\"{LINE_FEED}\
             Content-Type: text/plain; charset={charset}{LINE_FEED}\
             {LINE_FEED}\
             {value}{LINE_FEED}",
            boundary = self.boundary,
            name = param.name,
            charset = self.charset_label,
            value = param.value,
        );

        self.push_text(&part)?;
        Ok(self)
    }

    /// Append file part for `attachment`.
    ///
    /// # Errors
    /// [`ServiceClientError::FileAccess`] when the file can't be opened or is
    /// not a regular file.
    pub fn file(mut self, attachment: &FileAttachment) -> Result<Self, ServiceClientError> {
        let path = attachment.path.clone();
        let file_access = |details: String| ServiceClientError::FileAccess {
            path: path.clone(),
            details,
        };

        let file = File::open(&path).map_err(|err| file_access(err.to_string()))?;
        let metadata = file.metadata().map_err(|err| file_access(err.to_string()))?;
        if !metadata.is_file() {
            return Err(file_access("not a regular file".into()));
        }

        let file_name = attachment.file_name();
        let content_type = MimeGuess::from_path(&file_name)
            .first()
            .map(|mime| mime.to_string())
            .unwrap_or_else(|| APPLICATION_OCTET_STREAM.into());

        let part = format!(
            "{HYPHENS}{boundary}{LINE_FEED}\
             Content-Disposition: form-data; name=\"{name}\"; filename=\"{file_name}\"{LINE_FEED}\
             Content-Type: {content_type}{LINE_FEED}\
             Content-Transfer-Encoding: binary{LINE_FEED}\
             {LINE_FEED}",
            boundary = self.boundary,
            name = attachment.field_name,
        );
        self.push_text(&part)?;
        self.flush_pending();

        debug!(
            "streaming {} ({} bytes, {content_type})",
            path.display(),
            metadata.len()
        );
        self.content_length += metadata.len();
        self.segments.push_back(Segment::File(FileSegment {
            path,
            file,
            remaining: metadata.len(),
        }));

        self.push_text(LINE_FEED)?;
        Ok(self)
    }

    /// Append closing delimiter and produce the body.
    pub fn finish(mut self) -> Result<MultipartBody, ServiceClientError> {
        let closing = format!("{HYPHENS}{}{HYPHENS}{LINE_FEED}", self.boundary);
        self.push_text(&closing)?;
        self.flush_pending();

        Ok(MultipartBody {
            segments: self.segments,
            content_length: self.content_length,
            chunk_size: self.chunk_size,
        })
    }

    fn push_text(&mut self, text: &str) -> Result<(), ServiceClientError> {
        let bytes = encode_text(text, self.charset)?;
        self.content_length += bytes.len() as u64;
        self.pending.extend_from_slice(&bytes);
        Ok(())
    }

    fn flush_pending(&mut self) {
        if !self.pending.is_empty() {
            let bytes = std::mem::take(&mut self.pending);
            self.segments.push_back(Segment::Bytes(Cursor::new(bytes)));
        }
    }
}
