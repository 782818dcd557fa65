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

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use http::{HeaderMap, Method};
use s3sign_core::hash::base64_hmac_sha1;
use s3sign_s3::{Credential, SignatureFactory, SignatureVersion};

fn v2(cred: Credential) -> anyhow::Result<s3sign_s3::Signature> {
    Ok(SignatureFactory::new(SignatureVersion::V2)
        .with_credential(cred)?
        .build()?)
}

#[test]
fn test_v2_end_to_end() -> anyhow::Result<()> {
    let signature = v2(Credential::new("AK", "SK"))?;
    let v2 = signature.as_v2().expect("must be v2");

    let mut headers = HeaderMap::new();
    let authorization = v2.authorization(&mut headers, &Method::GET, "b", "k", b"")?;

    let date = headers
        .get("x-amz-date")
        .expect("date must be inserted")
        .to_str()?
        .to_string();
    let expected = base64_hmac_sha1(
        b"SK",
        format!("GET\n\n\n\nx-amz-date:{date}\n/b/k").as_bytes(),
    )?;
    assert_eq!(authorization, format!("AWS AK:{expected}"));

    // HMAC-SHA1 output is 20 bytes.
    let (_, sig) = authorization
        .split_once(':')
        .expect("authorization must contain a colon");
    assert_eq!(STANDARD.decode(sig)?.len(), 20);
    Ok(())
}

#[test]
fn test_v2_date_header_regenerated() -> anyhow::Result<()> {
    let signature = v2(Credential::new("AK", "SK"))?;
    let v2 = signature.as_v2().expect("must be v2");

    let mut headers = HeaderMap::new();
    v2.authorization(&mut headers, &Method::GET, "b", "k", b"")?;
    std::thread::sleep(std::time::Duration::from_millis(1100));
    let first_date = headers["x-amz-date"].clone();
    v2.authorization(&mut headers, &Method::GET, "b", "k", b"")?;

    assert_ne!(first_date, headers["x-amz-date"]);
    assert_eq!(headers.get_all("x-amz-date").iter().count(), 1);
    Ok(())
}
