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

use anyhow::Result;
use http::{HeaderMap, Method, StatusCode};
use log::{debug, warn};
use reqwest::Client;
use s3sign_core::{Context, OsEnv};
use s3sign_file_read_tokio::TokioFileRead;
use s3sign_s3::{
    Config, DefaultCredentialProvider, FilePayload, Payload, Signature, SignatureFactory,
    SignatureVersion,
};
use std::env;
use std::io::Write;
use tokio::io::AsyncReadExt;

struct LiveTarget {
    url: String,
    bucket: String,
    v2: Signature,
    v4: Signature,
}

async fn init_live_test() -> Option<LiveTarget> {
    let _ = env_logger::builder().is_test(true).try_init();
    let _ = dotenv::dotenv();

    if env::var("S3SIGN_TEST").ok().as_deref() != Some("on") {
        return None;
    }

    let ctx = Context::new().with_file_read(TokioFileRead).with_env(OsEnv);
    let config = Config::default().from_env(&ctx);
    let cred = DefaultCredentialProvider::new(&config)
        .resolve(&ctx)
        .await
        .expect("credential must be configured for live tests");

    let url = env::var("S3SIGN_URL").expect("env S3SIGN_URL must set");
    let bucket = env::var("S3SIGN_BUCKET").expect("env S3SIGN_BUCKET must set");

    let v4 = SignatureFactory::new(SignatureVersion::V4)
        .with_config(&config)
        .with_host(&url)
        .and_then(|f| f.with_credential(cred.clone()))
        .and_then(|f| f.build())
        .expect("v4 signature must build");
    let v2 = SignatureFactory::new(SignatureVersion::V2)
        .with_credential(cred)
        .and_then(|f| f.build())
        .expect("v2 signature must build");

    Some(LiveTarget {
        url,
        bucket,
        v2,
        v4,
    })
}

async fn send(
    target: &LiveTarget,
    method: Method,
    key: &str,
    mut headers: HeaderMap,
    authorization: String,
    body: Vec<u8>,
) -> Result<StatusCode> {
    headers.insert(http::header::AUTHORIZATION, authorization.parse()?);

    let url = format!("{}/{}/{}", target.url, target.bucket, key);
    let resp = Client::new()
        .request(method, url)
        .headers(headers)
        .body(body)
        .send()
        .await?;

    debug!("got response: {resp:?}");
    Ok(resp.status())
}

#[tokio::test]
async fn test_live_head_missing_object_v4() -> Result<()> {
    let Some(target) = init_live_test().await else {
        warn!("S3SIGN_TEST is not set, skipped");
        return Ok(());
    };

    let mut headers = HeaderMap::new();
    let authorization = target
        .v4
        .authorize(
            &mut headers,
            &Method::HEAD,
            &target.bucket,
            "not_exist_file",
            Payload::Bytes(b""),
        )
        .await?;

    let status = send(
        &target,
        Method::HEAD,
        "not_exist_file",
        headers,
        authorization,
        vec![],
    )
    .await?;
    assert_eq!(StatusCode::NOT_FOUND, status);
    Ok(())
}

#[tokio::test]
async fn test_live_put_object_v4() -> Result<()> {
    let Some(target) = init_live_test().await else {
        warn!("S3SIGN_TEST is not set, skipped");
        return Ok(());
    };

    let body = b"Hello, World!".to_vec();
    let mut headers = HeaderMap::new();
    let authorization = target
        .v4
        .authorize(
            &mut headers,
            &Method::PUT,
            &target.bucket,
            "put_object_test",
            Payload::Bytes(&body),
        )
        .await?;

    let status = send(
        &target,
        Method::PUT,
        "put_object_test",
        headers,
        authorization,
        body,
    )
    .await?;
    assert_eq!(StatusCode::OK, status);
    Ok(())
}

#[tokio::test]
async fn test_live_put_file_v4() -> Result<()> {
    let Some(target) = init_live_test().await else {
        warn!("S3SIGN_TEST is not set, skipped");
        return Ok(());
    };

    let mut file = tempfile::NamedTempFile::new()?;
    file.write_all(&b"file payload ".repeat(1024))?;
    let mut payload = FilePayload::open(file.path()).await?;

    let mut headers = HeaderMap::new();
    let authorization = target
        .v4
        .authorize(
            &mut headers,
            &Method::PUT,
            &target.bucket,
            "put_file_test",
            Payload::File(&mut payload),
        )
        .await?;

    let mut body = Vec::new();
    payload.reader().read_to_end(&mut body).await?;

    let status = send(
        &target,
        Method::PUT,
        "put_file_test",
        headers,
        authorization,
        body,
    )
    .await?;
    assert_eq!(StatusCode::OK, status);
    Ok(())
}

#[tokio::test]
async fn test_live_head_missing_object_v2() -> Result<()> {
    let Some(target) = init_live_test().await else {
        warn!("S3SIGN_TEST is not set, skipped");
        return Ok(());
    };

    let mut headers = HeaderMap::new();
    let authorization = target
        .v2
        .authorize(
            &mut headers,
            &Method::HEAD,
            &target.bucket,
            "not_exist_file",
            Payload::Bytes(b""),
        )
        .await?;

    let status = send(
        &target,
        Method::HEAD,
        "not_exist_file",
        headers,
        authorization,
        vec![],
    )
    .await?;
    assert_eq!(StatusCode::NOT_FOUND, status);
    Ok(())
}
