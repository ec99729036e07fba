/*
 * Copyright © 2025, United States Government, as represented by the Administrator of
 * the National Aeronautics and Space Administration. All rights reserved.
 *
 * The “ODIN” software is licensed under the Apache License, Version 2.0 (the "License");
 * you may not use this file except in compliance with the License. You may obtain a copy
 * of the License at http://www.apache.org/licenses/LICENSE-2.0.
 *
 * Unless required by applicable law or agreed to in writing, software distributed under
 * the License is distributed on an "AS IS" BASIS, WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND,
 * either express or implied. See the License for the specific language governing permissions
 * and limitations under the License.
 */
#![allow(unused)]

/// RON based configuration support.
/// Config files are looked up in an explicit path, then in `$FLEET_CONFIG_DIR` and finally in `./configs`.
/// Each crate defines its own config struct with a `Default` impl so that tools also run without any file

use std::{env, fs, path::{Path,PathBuf}};
use serde::{Serialize,Deserialize};
use crate::errors::{Result,FleetCommonError};

pub const CONFIGS: &'static str = "configs";
pub const CONFIG_DIR_ENV: &'static str = "FLEET_CONFIG_DIR";

pub fn find_config_file (filename: &str)->Option<PathBuf> {
    let path = Path::new(filename);
    if path.is_file() { return Some(path.to_path_buf()) }

    if let Ok(dir) = env::var(CONFIG_DIR_ENV) {
        let path = Path::new(&dir).join(filename);
        if path.is_file() { return Some(path) }
    }

    let path = Path::new(CONFIGS).join(filename);
    if path.is_file() { Some(path) } else { None }
}

pub fn load_config_path<C,P> (path: P) -> Result<C> where C: for <'a> Deserialize<'a>, P: AsRef<Path> {
    let data = fs::read( path.as_ref())?;
    Ok( ron::de::from_bytes( data.as_slice())? )
}

pub fn load_config<C> (filename: &str) -> Result<C> where C: for <'a> Deserialize<'a> {
    if let Some(path) = find_config_file( filename) {
        load_config_path( path)
    } else {
        Err( FleetCommonError::ConfigNotFoundError( filename.to_string()))
    }
}

/// load the config if we have one, otherwise fall back to its default
pub fn load_config_or_default<C> (filename: Option<&str>) -> Result<C> where C: for <'a> Deserialize<'a> + Default {
    match filename {
        Some(filename) => load_config( filename),
        None => Ok( C::default() )
    }
}

/// serialize a config so that it can be used as a template
pub fn to_config_string<C> (config: &C) -> Result<String> where C: Serialize {
    Ok( ron::ser::to_string_pretty( config, ron::ser::PrettyConfig::default())? )
}
