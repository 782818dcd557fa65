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

use crate::{constants::*, Credential};
use async_trait::async_trait;
use s3sign_core::{Context, ProvideCredential, Result};

/// SystemPropsCredentialProvider loads credentials from system properties.
///
/// This provider looks for the following properties:
/// - `aws.accessKeyId`: The access key ID
/// - `aws.secretKey`: The secret access key
///
/// Both must be non-blank after trimming. Session tokens are not read from
/// properties.
#[derive(Debug, Default, Clone)]
pub struct SystemPropsCredentialProvider;

impl SystemPropsCredentialProvider {
    /// Create a new SystemPropsCredentialProvider.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProvideCredential for SystemPropsCredentialProvider {
    type Credential = Credential;

    async fn provide_credential(&self, ctx: &Context) -> Result<Option<Self::Credential>> {
        let access_key_id = ctx.prop(AWS_ACCESS_KEY_ID_PROP);
        let secret_access_key = ctx.prop(AWS_SECRET_KEY_PROP);

        Ok(Credential::from_parts(
            access_key_id.as_deref(),
            secret_access_key.as_deref(),
            None,
        ))
    }
}
