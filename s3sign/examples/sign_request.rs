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
use s3sign::s3::{FilePayload, Payload, SignatureVersion};
use std::env;

#[tokio::main]
async fn main() -> Result<()> {
    let _ = env_logger::builder().try_init();

    // Usage: sign_request <host> <bucket> <key> [file]
    let mut args = env::args().skip(1);
    let host = args
        .next()
        .unwrap_or_else(|| "https://s3.amazonaws.com".to_string());
    let bucket = args.next().unwrap_or_else(|| "examplebucket".to_string());
    let key = args.next().unwrap_or_else(|| "hello.txt".to_string());
    let file = args.next();

    let credential = s3sign::resolve_credentials().await?;
    let signature = s3sign::build_signature(SignatureVersion::V4, &host, credential)?;

    let mut headers = http::HeaderMap::new();
    let authorization = match file {
        Some(path) => {
            let mut payload = FilePayload::open(&path).await?;
            let authorization = signature
                .authorize(
                    &mut headers,
                    &http::Method::PUT,
                    &bucket,
                    &key,
                    Payload::File(&mut payload),
                )
                .await?;
            println!("body length: {:?}", payload.read_length());
            authorization
        }
        None => {
            signature
                .authorize(
                    &mut headers,
                    &http::Method::GET,
                    &bucket,
                    &key,
                    Payload::Bytes(b""),
                )
                .await?
        }
    };

    for (name, value) in &headers {
        println!("{name}: {value:?}");
    }
    println!("authorization: {authorization}");

    Ok(())
}
