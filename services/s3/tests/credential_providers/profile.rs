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
use s3sign_core::ProvideCredential;
use s3sign_s3::ProfileCredentialProvider;
use std::io::Write;
use tempfile::NamedTempFile;

async fn load(
    content: &str,
    profile: &str,
) -> anyhow::Result<Option<(String, String, Option<String>)>> {
    let mut file = NamedTempFile::new()?;
    file.write_all(content.as_bytes())?;

    let ctx = create_test_context(None, &[], &[]);
    let cred = ProfileCredentialProvider::new(profile)
        .with_credentials_file(file.path().to_string_lossy())
        .provide_credential(&ctx)
        .await?;

    Ok(cred.map(|c| {
        (
            c.access_key_id().to_string(),
            c.secret_access_key().to_string(),
            c.session_token().map(str::to_string),
        )
    }))
}

#[tokio::test]
async fn test_keys_of_next_profile_are_not_picked_up() -> anyhow::Result<()> {
    let content = "\
[default]
aws_access_key_id = DEFAULT_AK

[other]
aws_secret_access_key = OTHER_SK
aws_session_token = OTHER_TOKEN
";
    assert_eq!(load(content, "default").await?, None);
    assert_eq!(load(content, "other").await?, None);

    Ok(())
}

#[tokio::test]
async fn test_profile_reentered_later_in_file() -> anyhow::Result<()> {
    let content = "\
[default]
aws_access_key_id = FIRST_AK
aws_secret_access_key = FIRST_SK

[other]
aws_access_key_id = OTHER_AK

[default]
aws_access_key_id = SECOND_AK
";
    assert_eq!(
        load(content, "default").await?,
        Some(("SECOND_AK".to_string(), "FIRST_SK".to_string(), None))
    );

    Ok(())
}

#[tokio::test]
async fn test_comments_and_unknown_keys_ignored() -> anyhow::Result<()> {
    let content = "\
# managed by hand
[default]
region = us-east-1
aws_access_key_id=AK
aws_secret_access_key   =   SK
aws_session_token =
";
    assert_eq!(
        load(content, "default").await?,
        Some(("AK".to_string(), "SK".to_string(), None))
    );

    Ok(())
}

#[tokio::test]
async fn test_all_three_values() -> anyhow::Result<()> {
    let content = "\
[ci]
aws_access_key_id = AK
aws_secret_access_key = SK
aws_session_token = TOKEN
";
    let (ak, sk, token) = load(content, "ci").await?.expect("profile must load");
    assert_eq!(ak, "AK");
    assert_eq!(sk, "SK");
    assert_eq!(token.as_deref(), Some("TOKEN"));

    Ok(())
}
