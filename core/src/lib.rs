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

//! Core components for authenticating object store requests.
//!
//! This crate provides the foundational types and traits shared by the
//! s3sign crates.
//!
//! ## Overview
//!
//! - **Context**: A container that holds implementations for file reading,
//!   environment variables and system properties.
//! - **Traits**: [`ProvideCredential`] for a single credential source and
//!   [`SigningCredential`] for validating what a source returned.
//! - **Chain**: [`ProvideCredentialChain`] tries sources in order and fails
//!   loudly when none of them has a credential.
//!
//! ## Example
//!
//! ```no_run
//! use async_trait::async_trait;
//! use s3sign_core::{Context, ProvideCredential, ProvideCredentialChain, Result, SigningCredential};
//!
//! #[derive(Clone, Debug)]
//! struct MyCredential {
//!     key: String,
//!     secret: String,
//! }
//!
//! impl SigningCredential for MyCredential {
//!     fn is_valid(&self) -> bool {
//!         !self.key.is_empty() && !self.secret.is_empty()
//!     }
//! }
//!
//! #[derive(Debug)]
//! struct MyLoader;
//!
//! #[async_trait]
//! impl ProvideCredential for MyLoader {
//!     type Credential = MyCredential;
//!
//!     async fn provide_credential(&self, _: &Context) -> Result<Option<Self::Credential>> {
//!         Ok(Some(MyCredential {
//!             key: "my-access-key".to_string(),
//!             secret: "my-secret-key".to_string(),
//!         }))
//!     }
//! }
//!
//! # async fn example() -> Result<()> {
//! let chain = ProvideCredentialChain::new().push(MyLoader);
//! let cred = chain.resolve(&Context::new()).await?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Utilities
//!
//! - [`hash`]: Cryptographic hashing utilities
//! - [`time`]: Time formatting utilities
//! - [`utils`]: General utilities including data redaction

// Make sure all our public APIs have docs.
#![warn(missing_docs)]

pub mod hash;
pub mod time;
pub mod utils;

mod context;
pub use context::{
    Context, Env, FileRead, NoopEnv, NoopFileRead, NoopProps, OsEnv, Props, StaticEnv, StaticProps,
};

mod error;
pub use error::{Error, ErrorKind, Result};

mod api;
pub use api::{ProvideCredential, SigningCredential};

mod chain;
pub use chain::ProvideCredentialChain;
