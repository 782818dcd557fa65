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

use super::create_test_context;
use s3sign_core::{ErrorKind, ProvideCredential, ProvideCredentialChain};
use s3sign_s3::{
    Config, Credential, DefaultCredentialProvider, EnvCredentialProvider,
    ProfileCredentialProvider, StaticCredentialProvider, SystemPropsCredentialProvider,
};
use std::fs;
use tempfile::tempdir;

#[tokio::test]
async fn test_chain_order_props_env_profile() -> anyhow::Result<()> {
    let home = tempdir()?;
    fs::create_dir_all(home.path().join(".aws"))?;
    fs::write(
        home.path().join(".aws/credentials"),
        "[default]\naws_access_key_id = profile_ak\naws_secret_access_key = profile_sk\n",
    )?;

    let everything = create_test_context(
        Some(home.path().to_path_buf()),
        &[
            ("AWS_ACCESS_KEY_ID", "env_ak"),
            ("AWS_SECRET_ACCESS_KEY", "env_sk"),
        ],
        &[("aws.accessKeyId", "prop_ak"), ("aws.secretKey", "prop_sk")],
    );
    let provider = DefaultCredentialProvider::default();
    assert_eq!(
        provider.resolve(&everything).await?.access_key_id(),
        "prop_ak"
    );

    let no_props = create_test_context(
        Some(home.path().to_path_buf()),
        &[
            ("AWS_ACCESS_KEY_ID", "env_ak"),
            ("AWS_SECRET_ACCESS_KEY", "env_sk"),
        ],
        &[],
    );
    assert_eq!(provider.resolve(&no_props).await?.access_key_id(), "env_ak");

    let profile_only = create_test_context(Some(home.path().to_path_buf()), &[], &[]);
    assert_eq!(
        provider.resolve(&profile_only).await?.access_key_id(),
        "profile_ak"
    );

    let nothing = create_test_context(None, &[], &[]);
    let err = provider
        .resolve(&nothing)
        .await
        .expect_err("no source must fail loudly");
    assert_eq!(err.kind(), ErrorKind::CredentialNotFound);

    Ok(())
}

#[tokio::test]
async fn test_custom_chain_skips_invalid_static() -> anyhow::Result<()> {
    let ctx = create_test_context(
        None,
        &[
            ("AWS_ACCESS_KEY_ID", "env_ak"),
            ("AWS_SECRET_ACCESS_KEY", "env_sk"),
        ],
        &[],
    );

    let chain = ProvideCredentialChain::new()
        .push(StaticCredentialProvider::new("", "no_access_key"))
        .push(SystemPropsCredentialProvider::new())
        .push(ProfileCredentialProvider::default())
        .push(EnvCredentialProvider::new());

    let cred = chain
        .provide_credential(&ctx)
        .await?
        .expect("env must be reached");
    assert_eq!(cred, Credential::new("env_ak", "env_sk"));

    Ok(())
}

#[tokio::test]
async fn test_explicit_profile_from_config() -> anyhow::Result<()> {
    let ctx = create_test_context(
        None,
        &[(
            "AWS_SHARED_CREDENTIALS_FILE",
            concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/credentials"),
        )],
        &[("aws.accessKeyId", "prop_ak"), ("aws.secretKey", "prop_sk")],
    );

    let config = Config::default().from_env(&ctx).with_profile("test");
    let cred = DefaultCredentialProvider::new(&config).resolve(&ctx).await?;

    assert_eq!(cred.access_key_id(), "TESTACCESSKEYID");
    assert_eq!(cred.secret_access_key(), "TESTSECRETACCESSKEY");
    assert_eq!(cred.session_token(), Some("TESTSESSIONTOKEN"));

    Ok(())
}

#[tokio::test]
async fn test_partial_profile_is_absent() -> anyhow::Result<()> {
    let ctx = create_test_context(None, &[], &[]);

    let cred = ProfileCredentialProvider::new("partial")
        .with_credentials_file(concat!(env!("CARGO_MANIFEST_DIR"), "/testdata/credentials"))
        .provide_credential(&ctx)
        .await?;
    assert!(cred.is_none());

    Ok(())
}
