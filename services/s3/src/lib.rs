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

//! Request authentication for S3-compatible object stores.
//!
//! This crate resolves S3 credentials and computes the `Authorization`
//! header value for Signature Version 2 and Signature Version 4.
//!
//! ## Quick Start
//!
//! ```no_run
//! use http::{HeaderMap, Method};
//! use s3sign_core::{Context, OsEnv, Result};
//! use s3sign_file_read_tokio::TokioFileRead;
//! use s3sign_s3::{Config, DefaultCredentialProvider, Payload, SignatureFactory, SignatureVersion};
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let ctx = Context::new()
//!         .with_file_read(TokioFileRead)
//!         .with_env(OsEnv);
//!
//!     let config = Config::default().from_env(&ctx);
//!     let credential = DefaultCredentialProvider::new(&config).resolve(&ctx).await?;
//!
//!     let signature = SignatureFactory::new(SignatureVersion::V4)
//!         .with_config(&config)
//!         .with_host("https://s3.amazonaws.com")?
//!         .with_credential(credential)?
//!         .build()?;
//!
//!     let mut headers = HeaderMap::new();
//!     let authorization = signature
//!         .authorize(&mut headers, &Method::GET, "bucket", "object.txt", Payload::Bytes(b""))
//!         .await?;
//!     println!("Authorization: {authorization}");
//!     Ok(())
//! }
//! ```
//!
//! ## Credential Sources
//!
//! [`DefaultCredentialProvider`] tries, in order:
//!
//! 1. System properties `aws.accessKeyId` and `aws.secretKey`, see [`s3sign_core::Props`]
//! 2. Environment variables:
//!
//! ```bash
//! export AWS_ACCESS_KEY_ID=your-access-key-id
//! export AWS_SECRET_ACCESS_KEY=your-secret-access-key
//! ```
//!
//! 3. The `[default]` profile of `~/.aws/credentials` (or `AWS_SHARED_CREDENTIALS_FILE`)
//!
//! Setting [`Config::profile`] restricts resolution to that single profile.
//!
//! ## File Payloads
//!
//! V4 signing streams a [`FilePayload`] to compute its digest and rewinds it
//! afterwards, so the same handle can be sent as the request body.

mod constants;

mod config;
pub use config::Config;

mod credential;
pub use credential::Credential;

mod provide_credential;
pub use provide_credential::*;

mod sign_request;
pub use sign_request::RequestSigner;

mod signature;
pub use signature::{
    FilePayload, Payload, PayloadReader, Signature, SignatureFactory, SignatureVersion,
    V2Signature, V4Signature,
};
