use std::path::PathBuf;

/// Storage key under which the platform collection is persisted.
pub const STORAGE_KEY: &str = "tokenbank_platforms";

/// Forward-looking window used by "expiring soon" checks when none is given.
pub const DEFAULT_EXPIRY_THRESHOLD_DAYS: i64 = 7;

/// Prefix of every generated platform id.
pub const ID_PREFIX: &str = "platform_";

/// Length of the random base36 suffix of a platform id.
pub const ID_RANDOM_LEN: usize = 9;

pub fn storage_file_name() -> String {
    format!("{STORAGE_KEY}.json")
}

pub fn default_data_dir() -> PathBuf {
    if let Some(data) = dirs::data_dir() {
        data.join("tokenbank")
    } else {
        PathBuf::from(".tokenbank-data")
    }
}
