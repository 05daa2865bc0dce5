//! # Request parameters
//!
//! This module contains the [`ParameterSet`] which collects form fields, file
//! attachments and headers for a single request.

use std::path::{Path, PathBuf};

/// Named form field.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Parameter {
    /// field name
    pub name: String,

    /// field value
    pub value: String,
}

/// File which should be uploaded with a multipart request.
///
/// Only the path is stored. The file is opened when the request is prepared
/// for sending.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct FileAttachment {
    /// name of the form field which carries the file (not the file name)
    pub field_name: String,

    /// location of the file on disk
    pub path: PathBuf,
}

impl FileAttachment {
    /// Last component of [`path`], used as the `filename` of the part.
    ///
    /// [`path`]: FileAttachment::path
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_default()
    }
}

/// Request header.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct Header {
    /// header name
    pub name: String,

    /// header value
    pub value: String,
}

impl Header {
    /// Case-insensitive header name comparison.
    pub fn is(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }
}

/// Ordered collections of parameters, files and headers.
///
/// Nothing is validated here: callers are responsible for valid header tokens
/// and existing files. Insertion order is kept and duplicates are allowed.
///
/// # Examples
/// ```
/// use serviceclient::core::ParameterSet;
///
/// let mut set = ParameterSet::default();
/// set.add_param("q", "hi there")
///     .add_header("Accept", "application/json")
///     .add_file("avatar", "/tmp/me.png");
///
/// assert!(set.has_files());
/// ```
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct ParameterSet {
    params: Vec<Parameter>,
    files: Vec<FileAttachment>,
    headers: Vec<Header>,
}

impl ParameterSet {
    /// Append form field.
    pub fn add_param<N, V>(&mut self, name: N, value: V) -> &mut Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.params.push(Parameter {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Append file attachment.
    pub fn add_file<N, P>(&mut self, field_name: N, path: P) -> &mut Self
    where
        N: Into<String>,
        P: AsRef<Path>,
    {
        self.files.push(FileAttachment {
            field_name: field_name.into(),
            path: path.as_ref().to_path_buf(),
        });
        self
    }

    /// Append header. Headers with the same name are all kept.
    pub fn add_header<N, V>(&mut self, name: N, value: V) -> &mut Self
    where
        N: Into<String>,
        V: Into<String>,
    {
        self.headers.push(Header {
            name: name.into(),
            value: value.into(),
        });
        self
    }

    /// Form fields in insertion order.
    pub fn params(&self) -> &[Parameter] {
        &self.params
    }

    /// File attachments in insertion order.
    pub fn files(&self) -> &[FileAttachment] {
        &self.files
    }

    /// Headers in insertion order.
    pub fn headers(&self) -> &[Header] {
        &self.headers
    }

    /// Whether at least one file attachment has been added.
    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }

    /// Whether the caller supplied a header with `name` (case-insensitive).
    pub fn has_header(&self, name: &str) -> bool {
        self.headers.iter().any(|header| header.is(name))
    }
}
