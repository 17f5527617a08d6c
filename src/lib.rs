pub mod action;
pub mod convert;
pub mod dialog;
pub mod encoding;
pub mod error;
pub mod id3v1;
pub mod metadata;

pub const PLUGIN_NAME: &str = "Convert Encoding";
pub const PLUGIN_AUTHOR: &str = "Philip Jägenstedt";
pub const PLUGIN_DESCRIPTION: &str = "Convert the tags of individual files or clusters between \
    different character encodings. This is often necessary with files that have only ID3v1 tags \
    in a non-Latin encoding.";
pub const PLUGIN_VERSION: &str = "0.2";
pub const PLUGIN_API_VERSIONS: [&str; 2] = ["0.9.0", "0.10"];
