//! Configuration keys and defaults

pub const DEFAULT_SERVER_PORT: u16 = 8700;

pub const SERVER_ADDRESS_PROPERTY: &str = "server.address";
pub const SERVER_PORT_PROPERTY: &str = "server.port";

pub const STANDALONE_MODE_PROPERTY: &str = "hangar.standalone";
pub const DATA_DIR_PROPERTY: &str = "hangar.dataDir";
pub const CLIENT_CACHE_TTL_PROPERTY: &str = "hangar.cache.clientTtlSecs";

pub const LOG_LEVEL_PROPERTY: &str = "hangar.logs.level";
pub const LOG_DIR_PROPERTY: &str = "hangar.logs.dir";
pub const LOG_FILE_PROPERTY: &str = "hangar.logs.file";

pub const DB_URL_PROPERTY: &str = "db.url";

pub const STORAGE_MODE_PROPERTY: &str = "storage.mode";
pub const STORAGE_MODE_LOCAL: &str = "local";
pub const STORAGE_MODE_S3: &str = "s3";
