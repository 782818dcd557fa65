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

//! Sign requests to S3-compatible object stores.
//!
//! `s3sign` bundles [`s3sign_core`] and the S3 service crate behind three
//! entry points:
//!
//! - [`default_context`]: a [`Context`] reading files with tokio and the
//!   process environment.
//! - [`resolve_credentials`]: run the default credential chain, failing with
//!   [`ErrorKind::CredentialNotFound`] when no source has credentials.
//! - [`build_signature`]: a V2 or V4 [`s3::Signature`] bound to a host and a
//!   credential.
//!
//! ```no_run
//! use s3sign::s3::{Payload, SignatureVersion};
//!
//! # #[tokio::main]
//! # async fn main() -> s3sign::Result<()> {
//! let credential = s3sign::resolve_credentials().await?;
//! let signature = s3sign::build_signature(
//!     SignatureVersion::V4,
//!     "https://s3.amazonaws.com",
//!     credential,
//! )?;
//!
//! let mut headers = http::HeaderMap::new();
//! let authorization = signature
//!     .authorize(&mut headers, &http::Method::GET, "bucket", "key", Payload::Bytes(b""))
//!     .await?;
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub use s3sign_core::*;

/// S3 credentials and signatures.
pub mod s3 {
    pub use s3sign_s3::*;
}

use s3::{
    Config, Credential, DefaultCredentialProvider, Signature, SignatureFactory, SignatureVersion,
};

/// Create a context with tokio file reading and the OS environment.
///
/// System properties are left empty; use [`Context::with_props`] to
/// provide them.
#[cfg(feature = "default-context")]
pub fn default_context() -> Context {
    Context::new()
        .with_file_read(s3sign_file_read_tokio::TokioFileRead)
        .with_env(OsEnv)
}

/// Resolve credentials with [`default_context`] and the config taken from
/// the environment.
#[cfg(feature = "default-context")]
pub async fn resolve_credentials() -> Result<Credential> {
    let ctx = default_context();
    let config = Config::default().from_env(&ctx);
    resolve_credentials_with(&ctx, &config).await
}

/// Resolve credentials from the given context and config.
pub async fn resolve_credentials_with(ctx: &Context, config: &Config) -> Result<Credential> {
    let credential = DefaultCredentialProvider::new(config).resolve(ctx).await?;
    log::debug!("resolved credential: {credential:?}");
    Ok(credential)
}

/// Build a signature bound to `host` and `credential`.
///
/// Fails with [`ErrorKind::ConfigInvalid`] if the credential is invalid or
/// the host is not an absolute URI.
pub fn build_signature(
    version: SignatureVersion,
    host: &str,
    credential: Credential,
) -> Result<Signature> {
    SignatureFactory::new(version)
        .with_host(host)?
        .with_credential(credential)?
        .build()
}
