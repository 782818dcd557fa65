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

//! AWS Signature Version 4 canonicalization and signing.
//!
//! - [Signature Version 4 signing process](https://docs.aws.amazon.com/general/latest/gr/signature-version-4.html)

use crate::constants::*;
use crate::Credential;
use http::{HeaderMap, HeaderValue, Method};
use log::debug;
use percent_encoding::{percent_decode_str, utf8_percent_encode};
use s3sign_core::hash::{hex_hmac_sha256, hex_sha256, hmac_sha256};
use s3sign_core::time::{format_date, format_iso8601, DateTime};
use s3sign_core::Result;
use std::fmt::Write;

/// RequestSigner computes the V4 `Authorization` value for a request.
///
/// It signs exactly the headers it is given: callers decide which headers
/// take part in the canonical request.
#[derive(Debug, Clone)]
pub struct RequestSigner {
    service: String,
    region: String,
}

impl RequestSigner {
    /// Create a new signer for the given service and region.
    pub fn new(service: &str, region: &str) -> Self {
        Self {
            service: service.into(),
            region: region.into(),
        }
    }

    /// Region used in the credential scope.
    pub fn region(&self) -> &str {
        &self.region
    }

    /// Service used in the credential scope.
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Build the authorization value.
    ///
    /// `path` may be percent-encoded already; it is decoded and re-encoded
    /// with the AWS rules. `query` is the raw query string without `?`.
    pub fn sign(
        &self,
        cred: &Credential,
        method: &Method,
        path: &str,
        query: Option<&str>,
        headers: &HeaderMap,
        now: DateTime,
    ) -> Result<String> {
        let headers = normalize_headers(headers)?;
        let signed_headers = headers
            .iter()
            .map(|(k, _)| k.as_str())
            .collect::<Vec<_>>()
            .join(";");

        let creq = canonical_request_string(method, path, query, &headers, &signed_headers)?;
        debug!("calculated canonical request: {creq}");
        let encoded_req = hex_sha256(creq.as_bytes());

        // Scope: "20220313/<region>/<service>/aws4_request"
        let scope = format!(
            "{}/{}/{}/aws4_request",
            format_date(now),
            self.region,
            self.service
        );
        debug!("calculated scope: {scope}");

        // StringToSign:
        //
        // AWS4-HMAC-SHA256
        // 20220313T072004Z
        // 20220313/<region>/<service>/aws4_request
        // <hashed_canonical_request>
        let string_to_sign = {
            let mut f = String::new();
            writeln!(f, "AWS4-HMAC-SHA256")?;
            writeln!(f, "{}", format_iso8601(now))?;
            writeln!(f, "{}", &scope)?;
            write!(f, "{}", &encoded_req)?;
            f
        };
        debug!("calculated string to sign: {string_to_sign}");

        let signing_key =
            generate_signing_key(cred.secret_access_key(), now, &self.region, &self.service)?;
        let signature = hex_hmac_sha256(&signing_key, string_to_sign.as_bytes())?;

        Ok(format!(
            "AWS4-HMAC-SHA256 Credential={}/{}, SignedHeaders={}, Signature={}",
            cred.access_key_id(),
            scope,
            signed_headers,
            signature
        ))
    }
}

/// Lowercased names sorted, values trimmed, repeated values joined by `,`.
fn normalize_headers(headers: &HeaderMap) -> Result<Vec<(String, String)>> {
    let mut normalized = Vec::with_capacity(headers.keys_len());
    for name in headers.keys() {
        let values = headers
            .get_all(name)
            .iter()
            .map(header_value_normalize)
            .collect::<Result<Vec<_>>>()?;
        normalized.push((name.as_str().to_lowercase(), values.join(",")));
    }
    normalized.sort();

    Ok(normalized)
}

fn header_value_normalize(v: &HeaderValue) -> Result<String> {
    let v = v.to_str()?;
    // Sequential spaces are folded into one, per the canonical header rules.
    Ok(v.split_whitespace().collect::<Vec<_>>().join(" "))
}

fn canonical_request_string(
    method: &Method,
    path: &str,
    query: Option<&str>,
    headers: &[(String, String)],
    signed_headers: &str,
) -> Result<String> {
    // 256 is specially chosen to avoid reallocation for most requests.
    let mut f = String::with_capacity(256);

    // Insert method
    writeln!(f, "{method}")?;
    // Insert encoded path
    let path = percent_decode_str(path).decode_utf8_lossy();
    let path = if path.is_empty() { "/".into() } else { path };
    writeln!(f, "{}", utf8_percent_encode(&path, &AWS_URI_ENCODE_SET))?;
    // Insert query
    writeln!(f, "{}", canonical_query_string(query.unwrap_or_default()))?;
    // Insert signed headers
    for (name, value) in headers {
        writeln!(f, "{name}:{value}")?;
    }
    writeln!(f)?;
    writeln!(f, "{signed_headers}")?;

    let content_sha256 = headers
        .iter()
        .find(|(k, _)| k == X_AMZ_CONTENT_SHA_256)
        .map(|(_, v)| v.as_str())
        .unwrap_or("UNSIGNED-PAYLOAD");
    write!(f, "{content_sha256}")?;

    Ok(f)
}

fn canonical_query_string(query: &str) -> String {
    if query.is_empty() {
        return String::new();
    }

    let mut pairs = form_urlencoded::parse(query.as_bytes())
        .map(|(k, v)| (k.into_owned(), v.into_owned()))
        .collect::<Vec<_>>();
    // Sort by param name
    pairs.sort();

    pairs
        .iter()
        .map(|(k, v)| {
            format!(
                "{}={}",
                utf8_percent_encode(k, &AWS_QUERY_ENCODE_SET),
                utf8_percent_encode(v, &AWS_QUERY_ENCODE_SET)
            )
        })
        .collect::<Vec<_>>()
        .join("&")
}

fn generate_signing_key(
    secret: &str,
    time: DateTime,
    region: &str,
    service: &str,
) -> Result<Vec<u8>> {
    // Sign secret
    let secret = format!("AWS4{secret}");
    // Sign date
    let sign_date = hmac_sha256(secret.as_bytes(), format_date(time).as_bytes())?;
    // Sign region
    let sign_region = hmac_sha256(sign_date.as_slice(), region.as_bytes())?;
    // Sign service
    let sign_service = hmac_sha256(sign_region.as_slice(), service.as_bytes())?;
    // Sign request
    hmac_sha256(sign_service.as_slice(), "aws4_request".as_bytes())
}
