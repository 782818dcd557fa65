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

mod factory;
pub use factory::SignatureFactory;

mod payload;
pub use payload::{FilePayload, Payload, PayloadReader};

mod v2;
pub use v2::V2Signature;

mod v4;
pub use v4::V4Signature;

use http::{HeaderMap, Method};
use s3sign_core::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Signature protocol version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SignatureVersion {
    /// HMAC-SHA1 over a short string to sign.
    V2,
    /// AWS4-HMAC-SHA256 over the canonical request.
    #[default]
    V4,
}

impl FromStr for SignatureVersion {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "v2" | "2" => Ok(SignatureVersion::V2),
            "v4" | "4" => Ok(SignatureVersion::V4),
            v => Err(Error::config_invalid(format!(
                "unsupported signature version: {v}"
            ))),
        }
    }
}

impl fmt::Display for SignatureVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SignatureVersion::V2 => write!(f, "V2"),
            SignatureVersion::V4 => write!(f, "V4"),
        }
    }
}

/// A configured signature, built by [`SignatureFactory`].
#[derive(Debug, Clone)]
pub enum Signature {
    /// Signature Version 2.
    V2(V2Signature),
    /// Signature Version 4.
    V4(V4Signature),
}

impl Signature {
    /// Version of this signature.
    pub fn version(&self) -> SignatureVersion {
        match self {
            Signature::V2(_) => SignatureVersion::V2,
            Signature::V4(_) => SignatureVersion::V4,
        }
    }

    /// Borrow as a V2 signature.
    pub fn as_v2(&self) -> Option<&V2Signature> {
        match self {
            Signature::V2(s) => Some(s),
            Signature::V4(_) => None,
        }
    }

    /// Borrow as a V4 signature.
    pub fn as_v4(&self) -> Option<&V4Signature> {
        match self {
            Signature::V4(s) => Some(s),
            Signature::V2(_) => None,
        }
    }

    /// Compute the `Authorization` value for `/bucket/key`.
    ///
    /// V2 only accepts in-memory payloads; a file payload fails with
    /// `RequestInvalid`.
    pub async fn authorize(
        &self,
        headers: &mut HeaderMap,
        method: &Method,
        bucket: &str,
        key: &str,
        payload: Payload<'_>,
    ) -> Result<String> {
        match self {
            Signature::V2(s) => {
                let bs = payload.as_bytes().ok_or_else(|| {
                    Error::request_invalid("V2 signature only supports in-memory payloads")
                })?;
                s.authorization(headers, method, bucket, key, bs)
            }
            Signature::V4(s) => {
                s.authorization_for_object(headers, method, bucket, key, payload)
                    .await
            }
        }
    }
}
