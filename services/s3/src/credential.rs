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

use s3sign_core::time::{now, DateTime};
use s3sign_core::utils::Redact;
use s3sign_core::SigningCredential;
use std::fmt::{Debug, Formatter};

/// Credential that holds the access key, secret key and an optional session token.
///
/// A credential is valid iff both keys are non-blank. The session token is
/// independent of validity: it only decides whether requests carry
/// `x-amz-security-token`.
#[derive(Default, Clone, PartialEq, Eq)]
pub struct Credential {
    access_key_id: String,
    secret_access_key: String,
    session_token: Option<String>,
    expires_in: Option<DateTime>,
}

impl Credential {
    /// Create a credential from an access key and a secret key.
    pub fn new(access_key_id: impl Into<String>, secret_access_key: impl Into<String>) -> Self {
        Self {
            access_key_id: access_key_id.into(),
            secret_access_key: secret_access_key.into(),
            session_token: None,
            expires_in: None,
        }
    }

    /// Build a credential from optional parts, as captured from a source.
    ///
    /// Blank values are treated as absent. Returns `None` unless both keys
    /// are present; a present session token upgrades the result to a
    /// temporary credential.
    pub fn from_parts(
        access_key_id: Option<&str>,
        secret_access_key: Option<&str>,
        session_token: Option<&str>,
    ) -> Option<Self> {
        fn present(v: Option<&str>) -> Option<&str> {
            v.map(str::trim).filter(|v| !v.is_empty())
        }

        let cred = Self::new(present(access_key_id)?, present(secret_access_key)?);
        Some(match present(session_token) {
            Some(token) => cred.with_session_token(token),
            None => cred,
        })
    }

    /// Attach a session token, consuming the credential.
    pub fn with_session_token(mut self, token: impl Into<String>) -> Self {
        self.session_token = Some(token.into());
        self
    }

    /// Attach an expiry time, consuming the credential.
    pub fn with_expires_in(mut self, expires_in: DateTime) -> Self {
        self.expires_in = Some(expires_in);
        self
    }

    /// Replace the session token, used when temporary credentials are refreshed.
    pub fn set_session_token(&mut self, token: impl Into<String>) -> &mut Self {
        self.session_token = Some(token.into());
        self
    }

    /// Access key id.
    pub fn access_key_id(&self) -> &str {
        &self.access_key_id
    }

    /// Secret access key.
    pub fn secret_access_key(&self) -> &str {
        &self.secret_access_key
    }

    /// Session token, if this is a temporary credential.
    pub fn session_token(&self) -> Option<&str> {
        self.session_token.as_deref()
    }

    /// Returns true if a session token is attached.
    pub fn has_session_token(&self) -> bool {
        self.session_token.is_some()
    }

    /// Expiry time of a temporary credential.
    pub fn expires_in(&self) -> Option<DateTime> {
        self.expires_in
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credential")
            .field("access_key_id", &Redact::from(&self.access_key_id))
            .field("secret_access_key", &Redact::from(&self.secret_access_key))
            .field("session_token", &Redact::from(&self.session_token))
            .field("expires_in", &self.expires_in)
            .finish()
    }
}

impl SigningCredential for Credential {
    fn is_valid(&self) -> bool {
        if self.access_key_id.trim().is_empty() || self.secret_access_key.trim().is_empty() {
            return false;
        }
        // Take 120s as buffer to avoid edge cases.
        if let Some(valid) = self
            .expires_in
            .map(|v| v > now() + chrono::TimeDelta::seconds(120))
        {
            return valid;
        }

        true
    }
}
