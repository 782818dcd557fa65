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

use crate::constants::*;
use s3sign_core::Context;
use std::time::Duration;

/// Config carries the settings shared by credential resolution and signing.
///
/// Values set programmatically take precedence; [`Config::from_env`] only
/// fills what is still at its default.
#[derive(Clone, Debug)]
pub struct Config {
    /// Profile to read from the shared credentials file.
    ///
    /// When set, resolution uses exactly this profile and nothing else.
    pub profile: Option<String>,
    /// Path to the shared credentials file, `~/.aws/credentials` if unset.
    ///
    /// Loaded from env `AWS_SHARED_CREDENTIALS_FILE`.
    pub credentials_file: Option<String>,
    /// Region used in the V4 credential scope.
    ///
    /// Loaded from env `AWS_REGION`, then `AWS_DEFAULT_REGION`.
    pub region: String,
    /// Service name used in the V4 credential scope.
    pub service: String,
    /// Upper bound for digesting a file-backed payload.
    pub digest_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            profile: None,
            credentials_file: None,
            region: DEFAULT_REGION.to_string(),
            service: DEFAULT_SERVICE.to_string(),
            digest_timeout: Duration::from_secs(300),
        }
    }
}

impl Config {
    /// Fill unset values from environment variables.
    pub fn from_env(mut self, ctx: &Context) -> Self {
        if self.credentials_file.is_none() {
            self.credentials_file = ctx.env_var(AWS_SHARED_CREDENTIALS_FILE);
        }
        if self.region == DEFAULT_REGION {
            if let Some(region) = ctx
                .env_var(AWS_REGION)
                .or_else(|| ctx.env_var(AWS_DEFAULT_REGION))
                .filter(|v| !v.trim().is_empty())
            {
                self.region = region;
            }
        }

        self
    }

    /// Use the given profile exclusively.
    pub fn with_profile(mut self, profile: impl Into<String>) -> Self {
        self.profile = Some(profile.into());
        self
    }
}
