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

use super::payload::{digest_in_memory, remaining, Payload};
use crate::constants::*;
use crate::sign_request::RequestSigner;
use crate::Credential;
use http::header::{CONTENT_TYPE, HOST};
use http::uri::Authority;
use http::{HeaderMap, HeaderName, HeaderValue, Method, Uri};
use log::debug;
use percent_encoding::utf8_percent_encode;
use s3sign_core::time::{format_iso8601, now, DateTime};
use s3sign_core::{Error, Result};
use std::time::Duration;

/// Signature Version 4 for S3, bound to one host.
///
/// Signing is asynchronous because a file payload has to be streamed to
/// compute its SHA-256. The digest always completes before anything is
/// signed; a failed digest leaves the request headers untouched.
#[derive(Debug, Clone)]
pub struct V4Signature {
    host: Uri,
    authority: Authority,
    credential: Credential,
    signer: RequestSigner,
    digest_timeout: Duration,

    time: Option<DateTime>,
}

impl V4Signature {
    /// Create a new V4 signature.
    ///
    /// Fails with `ConfigInvalid` if `host` has no authority.
    pub fn new(
        host: Uri,
        credential: Credential,
        signer: RequestSigner,
        digest_timeout: Duration,
    ) -> Result<Self> {
        let authority = host
            .authority()
            .cloned()
            .ok_or_else(|| Error::config_invalid(format!("host {host} has no authority")))?;

        Ok(Self {
            host,
            authority,
            credential,
            signer,
            digest_timeout,
            time: None,
        })
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

    /// The bound host.
    pub fn host(&self) -> &Uri {
        &self.host
    }

    /// The bound credential.
    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    /// Compute the `Authorization` value for a request to the bound host
    /// URI itself, path and query included.
    pub async fn authorization(
        &self,
        headers: &mut HeaderMap,
        method: &Method,
        payload: Payload<'_>,
    ) -> Result<String> {
        let path = self.host.path().to_string();
        let query = self.host.query().map(str::to_string);

        self.sign(headers, method, &path, query.as_deref(), payload)
            .await
    }

    /// Compute the `Authorization` value for the path-style object
    /// `/bucket/key` on the bound host.
    ///
    /// `key` is the raw object key; it is URI-encoded here, so a literal
    /// `%` in the key is signed as `%25`. A key starting with `?` addresses
    /// the bucket, with the rest of the key used as the query.
    pub async fn authorization_for_object(
        &self,
        headers: &mut HeaderMap,
        method: &Method,
        bucket: &str,
        key: &str,
        payload: Payload<'_>,
    ) -> Result<String> {
        let (path, query) = match key.strip_prefix('?') {
            Some(query) => (format!("/{bucket}/"), Some(query)),
            None => (format!("/{bucket}/{key}"), None),
        };
        let path = utf8_percent_encode(&path, &AWS_URI_ENCODE_SET).to_string();

        self.sign(headers, method, &path, query, payload).await
    }

    async fn sign(
        &self,
        headers: &mut HeaderMap,
        method: &Method,
        path: &str,
        query: Option<&str>,
        payload: Payload<'_>,
    ) -> Result<String> {
        let content_sha256 = self.digest(payload).await?;
        let now = self.time.unwrap_or_else(now);

        // `headers` is only touched once signing has succeeded.
        let mut values = vec![
            (HOST, HeaderValue::from_str(self.authority.as_str())?),
            (
                HeaderName::from_static(X_AMZ_DATE),
                HeaderValue::try_from(format_iso8601(now))?,
            ),
            (
                HeaderName::from_static(X_AMZ_CONTENT_SHA_256),
                HeaderValue::try_from(content_sha256)?,
            ),
        ];
        if let Some(token) = self.credential.session_token() {
            let mut value = HeaderValue::from_str(token)?;
            // Set token value sensitive to avoid leaking.
            value.set_sensitive(true);
            values.push((HeaderName::from_static(X_AMZ_SECURITY_TOKEN), value));
        }

        let mut signed = HeaderMap::new();
        for (name, value) in headers.iter() {
            if name.as_str().starts_with(X_AMZ_PREFIX)
                || name.as_str() == CONTENT_MD5
                || *name == CONTENT_TYPE
            {
                signed.append(name.clone(), value.clone());
            }
        }

        for (name, value) in &values {
            signed.insert(name.clone(), value.clone());
        }

        let authorization = self
            .signer
            .sign(&self.credential, method, path, query, &signed, now)?;
        for (name, value) in values {
            headers.insert(name, value);
        }

        Ok(authorization)
    }

    async fn digest(&self, payload: Payload<'_>) -> Result<String> {
        let file = match payload {
            Payload::Bytes(bs) => return Ok(digest_in_memory(bs)),
            Payload::Buffer(cursor) => return Ok(digest_in_memory(remaining(cursor))),
            Payload::File(file) => file,
        };

        match tokio::time::timeout(self.digest_timeout, file.digest()).await {
            Ok(Ok(digest)) => {
                debug!(
                    "digested file payload of {} bytes",
                    file.read_length().unwrap_or_default()
                );
                Ok(digest)
            }
            Ok(Err(err)) => {
                Err(Error::digest_failed("failed to read file payload").with_source(err))
            }
            Err(_) => Err(Error::digest_failed(format!(
                "file payload digest timed out after {:?}",
                self.digest_timeout
            ))),
        }
    }
}
