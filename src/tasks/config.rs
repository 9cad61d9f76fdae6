/* ************************************************************************ **
** This file is part of lazymat, and is licensed under EITHER the MIT       **
** license or the Apache 2.0 license, at your option.                       **
**                                                                          **
**     http://www.apache.org/licenses/LICENSE-2.0                           **
**     http://opensource.org/licenses/MIT                                   **
** ************************************************************************ */

// NOTE: Please read settings through the YamlRead trait rather than
//       calling serde_yaml directly, so that typos in config files
//       get reported instead of silently ignored.

use std::io::Read;

/// Provides an alternative to `serde_yaml::from_reader` that warns
/// about keys which were not used.
pub trait YamlRead: for<'de> serde::Deserialize<'de> {
    fn from_reader(mut r: impl Read) -> Result<Self, serde_yaml::Error>
    { YamlRead::from_dyn_reader(&mut r) }

    fn from_dyn_reader(r: &mut dyn Read) -> Result<Self, serde_yaml::Error> {
        // serde_ignored needs a Deserializer, and serde_yaml::Value is one.
        Self::from_value(serde_yaml::from_reader(r)?)
    }

    fn from_value(value: serde_yaml::Value) -> Result<Self, serde_yaml::Error>;
}

macro_rules! derive_yaml_read {
    ($Type:ty) => {
        impl YamlRead for $Type {
            fn from_value(value: serde_yaml::Value) -> Result<$Type, serde_yaml::Error> {
                serde_ignored::deserialize(
                    value,
                    |path| warn!("Unused config item (possible typo?): {}", path),
                )
            }
        }
    };
}

/// Settings for `lazymat-demo`.
///
/// Every field has a default, so an empty document is valid.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "kebab-case")]
pub struct Settings {
    #[serde(default)]
    pub benchmark: Benchmark,
}
derive_yaml_read!{Settings}

/// The lazy evaluation benchmark, `K = (K + K) + (K + (K + K))` on a
/// rank-3 matrix.
#[derive(Serialize, Deserialize)]
#[derive(Debug, Clone, PartialEq)]
#[serde(rename_all = "kebab-case")]
pub struct Benchmark {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_shape")]
    pub shape: [usize; 3],
    #[serde(default = "default_repeats")]
    pub repeats: u32,
}
fn default_enabled() -> bool { true }
fn default_shape() -> [usize; 3] { [100, 200, 300] }
fn default_repeats() -> u32 { 1 }

impl Default for Benchmark {
    fn default() -> Self {
        Benchmark {
            enabled: default_enabled(),
            shape: default_shape(),
            repeats: default_repeats(),
        }
    }
}
