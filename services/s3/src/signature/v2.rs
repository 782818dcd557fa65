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

use crate::constants::*;
use crate::Credential;
use http::header::CONTENT_TYPE;
use http::{HeaderMap, HeaderValue, Method};
use log::debug;
use s3sign_core::hash::base64_hmac_sha1;
use s3sign_core::time::{format_http_date, now, DateTime};
use s3sign_core::Result;
use std::collections::BTreeMap;
use std::fmt::Write;

/// Signature Version 2 for S3.
///
/// Signing is synchronous and only ever looks at in-memory payloads. The
/// date header is regenerated on every call, so two signatures of the same
/// request never match.
///
/// - [Signing and authenticating REST requests](https://docs.aws.amazon.com/AmazonS3/latest/userguide/RESTAuthentication.html)
#[derive(Debug, Clone)]
pub struct V2Signature {
    credential: Credential,

    time: Option<DateTime>,
}

impl V2Signature {
    /// Create a new V2 signature bound to the credential.
    pub fn new(credential: Credential) -> Self {
        Self {
            credential,
            time: None,
        }
    }

    /// Specify the signing time.
    ///
    /// # Note
    ///
    /// We should always take current time to sign requests.
    /// Only use this function for testing.
    #[cfg(test)]
    pub fn with_time(mut self, time: DateTime) -> Self {
        self.time = Some(time);
        self
    }

    /// The bound credential.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Compute the `Authorization` value for `/bucket/key`.
    ///
    /// `x-amz-date`, and `x-amz-security-token` for temporary credentials,
    /// are inserted into `headers`. A key starting with `?` addresses the
    /// bucket itself and is signed as an empty key.
    pub fn authorization(
        &self,
        headers: &mut HeaderMap,
        method: &Method,
        bucket: &str,
        key: &str,
        payload: &[u8],
    ) -> Result<String> {
        let now = self.time.unwrap_or_else(now);
        debug!(
            "signing {method} /{bucket}/{key} with a {} bytes payload",
            payload.len()
        );

        let date = HeaderValue::try_from(format_http_date(now))?;
        let token = match self.credential.session_token() {
            Some(token) => {
                let mut value = HeaderValue::from_str(token)?;
                value.set_sensitive(true);
                Some(value)
            }
            None => None,
        };

        // Staged on a copy so `headers` is only touched once signing has succeeded.
        let mut staged = headers.clone();
        staged.insert(X_AMZ_DATE, date);
        if let Some(token) = token {
            staged.insert(X_AMZ_SECURITY_TOKEN, token);
        }

        let string_to_sign = string_to_sign(&staged, method, bucket, key)?;
        debug!("calculated string to sign: {string_to_sign:?}");

        let signature = base64_hmac_sha1(
            self.credential.secret_access_key().as_bytes(),
            string_to_sign.as_bytes(),
        )?;
        *headers = staged;

        Ok(format!(
            "AWS {}:{}",
            self.credential.access_key_id(),
            signature
        ))
    }
}

/// StringToSign = HTTP-Verb + "\n" +
///     Content-MD5 + "\n" +
///     Content-Type + "\n" +
///     Date + "\n" +
///     CanonicalizedAmzHeaders +
///     CanonicalizedResource;
///
/// The `Date` slot stays empty since `x-amz-date` is always sent.
fn string_to_sign(headers: &HeaderMap, method: &Method, bucket: &str, key: &str) -> Result<String> {
    let mut s = String::new();
    writeln!(s, "{method}")?;
    writeln!(s, "{}", header_or_empty(headers, CONTENT_MD5)?)?;
    writeln!(s, "{}", header_or_empty(headers, CONTENT_TYPE.as_str())?)?;
    writeln!(s)?;
    for (name, value) in canonicalized_amz_headers(headers)? {
        writeln!(s, "{name}:{value}")?;
    }

    let key = if key.starts_with('?') { "" } else { key };
    write!(s, "/{bucket}/{key}")?;

    Ok(s)
}

fn header_or_empty<'a>(headers: &'a HeaderMap, name: &str) -> Result<&'a str> {
    match headers.get(name) {
        Some(v) => Ok(v.to_str()?),
        None => Ok(""),
    }
}

/// All `x-amz-` headers, sorted by name, repeated values joined by `,`.
fn canonicalized_amz_headers(headers: &HeaderMap) -> Result<BTreeMap<&str, String>> {
    let mut amz: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
    for (name, value) in headers {
        if name.as_str().starts_with(X_AMZ_PREFIX) {
            amz.entry(name.as_str())
                .or_default()
                .push(value.to_str()?.trim());
        }
    }

    Ok(amz.into_iter().map(|(k, v)| (k, v.join(","))).collect())
}
