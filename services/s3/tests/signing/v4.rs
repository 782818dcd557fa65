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

use http::{HeaderMap, HeaderValue, Method};
use s3sign_core::hash::hex_sha256;
use s3sign_core::ErrorKind;
use s3sign_s3::{Credential, FilePayload, Payload, SignatureFactory, SignatureVersion};
use std::io::Write;
use std::time::Duration;
use tempfile::NamedTempFile;
use tokio::io::AsyncReadExt;

fn v4() -> anyhow::Result<s3sign_s3::Signature> {
    Ok(SignatureFactory::new(SignatureVersion::V4)
        .with_host("http://127.0.0.1:9000")?
        .with_credential(Credential::new("AK", "SK").with_session_token("TOKEN"))?
        .with_digest_timeout(Duration::from_secs(10))
        .build()?)
}

#[tokio::test]
async fn test_v4_file_payload_from_disk() -> anyhow::Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();

    let content = b"0123456789".repeat(5_000);
    let mut file = NamedTempFile::new()?;
    file.write_all(&content)?;

    let mut payload = FilePayload::open(file.path()).await?;
    let mut headers = HeaderMap::new();
    headers.insert(
        "content-type",
        HeaderValue::from_static("application/octet-stream"),
    );

    let authorization = v4()?
        .authorize(
            &mut headers,
            &Method::PUT,
            "bucket",
            "dir/file.bin",
            Payload::File(&mut payload),
        )
        .await?;

    assert!(authorization.starts_with("AWS4-HMAC-SHA256 Credential=AK/"));
    assert!(authorization.contains(
        "SignedHeaders=content-type;host;x-amz-content-sha256;x-amz-date;x-amz-security-token,"
    ));
    assert_eq!(
        headers["x-amz-content-sha256"],
        hex_sha256(&content).as_str()
    );
    assert_eq!(headers["x-amz-security-token"], "TOKEN");
    assert_eq!(headers["host"], "127.0.0.1:9000");

    assert_eq!(payload.read_length(), Some(content.len() as u64));
    let mut body = Vec::new();
    payload.reader().read_to_end(&mut body).await?;
    assert_eq!(body, content);

    Ok(())
}

#[tokio::test]
async fn test_v4_concurrent_calls_are_independent() -> anyhow::Result<()> {
    let signature = v4()?;

    let mut first = HeaderMap::new();
    let mut second = HeaderMap::new();
    let (a, b) = tokio::join!(
        signature.authorize(&mut first, &Method::PUT, "b", "a", Payload::Bytes(b"a")),
        signature.authorize(&mut second, &Method::PUT, "b", "b", Payload::Bytes(b"b")),
    );
    a?;
    b?;

    assert_eq!(first["x-amz-content-sha256"], hex_sha256(b"a").as_str());
    assert_eq!(second["x-amz-content-sha256"], hex_sha256(b"b").as_str());
    Ok(())
}

#[test]
fn test_v4_unencodable_token_rejected_by_factory() -> anyhow::Result<()> {
    let err = SignatureFactory::default()
        .with_host("http://127.0.0.1:9000")?
        .with_credential(Credential::new("AK", "SK").with_session_token("bad\ntoken"))
        .expect_err("token with newline must be rejected");
    assert_eq!(err.kind(), ErrorKind::ConfigInvalid);
    Ok(())
}
