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

mod chain;
mod profile;

use s3sign_core::{Context, StaticEnv, StaticProps};
use s3sign_file_read_tokio::TokioFileRead;
use std::collections::HashMap;
use std::path::PathBuf;

pub fn create_test_context(
    home_dir: Option<PathBuf>,
    envs: &[(&str, &str)],
    props: &[(&str, &str)],
) -> Context {
    let _ = env_logger::builder().is_test(true).try_init();

    Context::new()
        .with_file_read(TokioFileRead)
        .with_env(StaticEnv {
            home_dir,
            envs: envs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect::<HashMap<_, _>>(),
        })
        .with_props(StaticProps::new(props.iter().copied()))
}
