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

use crate::provide_credential::{
    EnvCredentialProvider, ProfileCredentialProvider, SystemPropsCredentialProvider,
};
use crate::{Config, Credential};
use async_trait::async_trait;
use s3sign_core::{Context, ProvideCredential, ProvideCredentialChain, Result};

/// DefaultCredentialProvider resolves S3 credentials the usual way.
///
/// Without an explicit profile the sources are tried in this order:
///
/// 1. System properties (`aws.accessKeyId`, `aws.secretKey`)
/// 2. Environment variables (`AWS_ACCESS_KEY_ID`, `AWS_SECRET_ACCESS_KEY`)
/// 3. The `default` profile of the shared credentials file
///
/// With [`Config::profile`] set, only that profile is consulted.
#[derive(Debug)]
pub struct DefaultCredentialProvider {
    chain: ProvideCredentialChain<Credential>,
}

impl Default for DefaultCredentialProvider {
    fn default() -> Self {
        Self::new(&Config::default())
    }
}

impl DefaultCredentialProvider {
    /// Create a new `DefaultCredentialProvider` from config.
    pub fn new(config: &Config) -> Self {
        let profile = |name: &str| {
            let provider = ProfileCredentialProvider::new(name);
            match &config.credentials_file {
                Some(path) => provider.with_credentials_file(path),
                None => provider,
            }
        };

        let chain = match &config.profile {
            Some(name) => ProvideCredentialChain::new().push(profile(name)),
            None => ProvideCredentialChain::new()
                .push(SystemPropsCredentialProvider::new())
                .push(EnvCredentialProvider::new())
                .push(profile(crate::constants::DEFAULT_PROFILE)),
        };

        Self { chain }
    }

    /// Create with a custom credential chain.
    pub fn with_chain(chain: ProvideCredentialChain<Credential>) -> Self {
        Self { chain }
    }

    /// Resolve a credential or fail with `CredentialNotFound`.
    pub async fn resolve(&self, ctx: &Context) -> Result<Credential> {
        self.chain.resolve(ctx).await
    }
}

#[async_trait]
impl ProvideCredential for DefaultCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        self.chain.provide_credential(ctx).await
    }
}
