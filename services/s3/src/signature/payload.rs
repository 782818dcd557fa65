// Licensed to the Apache Software Foundation (ASF) under one
// or more contributor license agreements.  See the NOTICE file
// distributed with this work for additional information
// regarding copyright ownership.  The ASF licenses this file
// to you under the Apache License, Version 2.0 (the
// "License"); you may not use this file except in compliance
// with the License.  You may obtain a copy of the License at
//
//   http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing,
// software distributed under the License is distributed on an
// "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY
// KIND, either express or implied.  See the License for the
// specific language governing permissions and limitations
// under the License.

use bytes::Bytes;
use futures::TryStreamExt;
use s3sign_core::hash::{hex_sha256, Sha256Hasher};
use s3sign_core::{Error, Result};
use std::fmt::{self, Debug};
use std::io::{self, Cursor, SeekFrom};
use std::path::Path;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncSeek, AsyncSeekExt, Take};
use tokio_util::io::ReaderStream;

/// Request body as seen by a signature.
#[derive(Debug)]
pub enum Payload<'a> {
    /// In-memory bytes.
    Bytes(&'a [u8]),
    /// A buffer cursor, digested from its current position to the end.
    ///
    /// The cursor position is left untouched.
    Buffer(&'a Cursor<Bytes>),
    /// A seekable stream that must be read to be digested.
    File(&'a mut FilePayload),
}

impl Payload<'_> {
    /// Returns true if the payload is available without I/O.
    pub fn is_in_memory(&self) -> bool {
        !matches!(self, Payload::File(_))
    }

    /// Borrow the in-memory content, `None` for a file payload.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Payload::Bytes(bs) => Some(*bs),
            Payload::Buffer(cursor) => Some(remaining(cursor)),
            Payload::File(_) => None,
        }
    }
}

impl<'a> From<&'a [u8]> for Payload<'a> {
    fn from(bs: &'a [u8]) -> Self {
        Payload::Bytes(bs)
    }
}

impl<'a> From<&'a Cursor<Bytes>> for Payload<'a> {
    fn from(cursor: &'a Cursor<Bytes>) -> Self {
        Payload::Buffer(cursor)
    }
}

impl<'a> From<&'a mut FilePayload> for Payload<'a> {
    fn from(file: &'a mut FilePayload) -> Self {
        Payload::File(file)
    }
}

pub(crate) fn remaining(cursor: &Cursor<Bytes>) -> &[u8] {
    let buf = cursor.get_ref();
    let pos = usize::try_from(cursor.position())
        .unwrap_or(usize::MAX)
        .min(buf.len());
    &buf[pos..]
}

/// Reader that can back a [`FilePayload`].
pub trait PayloadReader: AsyncRead + AsyncSeek + Unpin + Send {}

impl<T: AsyncRead + AsyncSeek + Unpin + Send> PayloadReader for T {}

/// A streamed request body, such as an open file.
///
/// The caller keeps ownership: after a V4 signature digests it, the reader is
/// back at position 0 and [`FilePayload::read_length`] holds the number of
/// bytes digested, so [`FilePayload::reader`] can be used to send the body.
pub struct FilePayload {
    reader: Box<dyn PayloadReader>,
    read_length: Option<u64>,
}

impl Debug for FilePayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilePayload")
            .field("read_length", &self.read_length)
            .finish_non_exhaustive()
    }
}

impl FilePayload {
    /// Wrap a seekable reader.
    pub fn new(reader: impl PayloadReader + 'static) -> Self {
        Self {
            reader: Box::new(reader),
            read_length: None,
        }
    }

    /// Open the file at `path`.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = tokio::fs::File::open(path).await.map_err(|e| {
            Error::request_invalid(format!("failed to open payload {}", path.display()))
                .with_source(e)
        })?;

        Ok(Self::new(file))
    }

    /// Number of bytes the body consists of, known once it has been digested.
    pub fn read_length(&self) -> Option<u64> {
        self.read_length
    }

    /// Reader over the body, limited to [`FilePayload::read_length`] when known.
    pub fn reader(&mut self) -> Take<&mut Box<dyn PayloadReader>> {
        let limit = self.read_length.unwrap_or(u64::MAX);
        (&mut self.reader).take(limit)
    }

    /// Stream the whole body through SHA-256.
    ///
    /// On success the reader is rewound and the read length set to the
    /// number of bytes consumed. On failure neither is touched.
    pub(crate) async fn digest(&mut self) -> io::Result<String> {
        self.reader.seek(SeekFrom::Start(0)).await?;

        let init = (Sha256Hasher::new(), 0u64);
        let (hasher, total) = ReaderStream::new(&mut self.reader)
            .try_fold(init, |(mut hasher, total), chunk| async move {
                hasher.update(&chunk);
                Ok((hasher, total + chunk.len() as u64))
            })
            .await?;

        self.reader.seek(SeekFrom::Start(0)).await?;
        self.read_length = Some(total);

        Ok(hasher.finish_hex())
    }
}

/// Digest an in-memory payload.
pub(crate) fn digest_in_memory(content: &[u8]) -> String {
    hex_sha256(content)
}
