/// Application name
pub const APP_NAME: &str = "Star Destiny";

/// Number of records in the constellation catalog (二十八宿)
pub const CATALOG_SIZE: usize = 28;

/// Earliest birth year accepted by the date picker
pub const MIN_BIRTH_YEAR: i32 = 1950;

/// Storage key holding the last resolved record (JSON)
pub const RECORD_KEY: &str = "star_destiny_record";

/// Storage key holding the device token
pub const DEVICE_TOKEN_KEY: &str = "star_destiny_device_uuid";

/// Prefix of the unique-channel dedup flag; the policy version is appended
pub const DEDUP_KEY_PREFIX: &str = "star_destiny_synced_unique_";

/// Dedup policy version. Bumping it resets the unique-observation population.
pub const DEFAULT_DEDUP_VERSION: &str = "v5_final";

/// Value written into a set flag slot
pub const FLAG_SET_VALUE: &str = "true";

/// Device token prefix
pub const DEVICE_TOKEN_PREFIX: &str = "dev";

/// Length of the random suffix of a device token (base36 chars)
pub const DEVICE_TOKEN_RANDOM_LEN: usize = 8;

/// Sent as `userName` when no enrichment name is available
pub const UNSPECIFIED_NAME: &str = "unspecified";
