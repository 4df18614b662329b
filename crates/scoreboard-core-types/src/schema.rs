//! Field keys and event names for operation logs
//!
//! The logging macros and the test capture both read from here, so a
//! renamed key only changes in one place.

/// Module path of the code that logged the event
pub const FIELD_COMPONENT: &str = "component";
/// Operation name, `<entity>.<action>` (e.g. `team.save`, `schema.converge`)
pub const FIELD_OP: &str = "op";
/// One of [`EVENT_START`], [`EVENT_END`], [`EVENT_END_ERROR`]
pub const FIELD_EVENT: &str = "event";
pub const FIELD_DURATION_MS: &str = "duration_ms";

/// Row id the operation targets; 0 while inserting
pub const FIELD_ENTITY_ID: &str = "entity_id";
/// Rows returned by a bulk load
pub const FIELD_ROWS: &str = "rows";

pub const FIELD_MIGRATION_ID: &str = "migration_id";
pub const FIELD_TABLE: &str = "table";
pub const FIELD_COLUMN: &str = "column";

pub const FIELD_ERR_KIND: &str = "err_kind";
/// Stable `ERR_*` code of the failure
pub const FIELD_ERR_CODE: &str = "err_code";
pub const FIELD_ERR_MESSAGE: &str = "err_message";

pub const EVENT_START: &str = "start";
pub const EVENT_END: &str = "end";
pub const EVENT_END_ERROR: &str = "end_error";

/// Every field key above
pub const ALL_FIELDS: [&str; 12] = [
    FIELD_COMPONENT,
    FIELD_OP,
    FIELD_EVENT,
    FIELD_DURATION_MS,
    FIELD_ENTITY_ID,
    FIELD_ROWS,
    FIELD_MIGRATION_ID,
    FIELD_TABLE,
    FIELD_COLUMN,
    FIELD_ERR_KIND,
    FIELD_ERR_CODE,
    FIELD_ERR_MESSAGE,
];
