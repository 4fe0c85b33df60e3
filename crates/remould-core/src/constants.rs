//! Shared pipeline constants

/// Float separators tried in priority order; the first one present in the
/// input wins and is normalized to `.`.
pub const DEFAULT_FLOAT_SEPARATORS: [char; 2] = [',', '.'];

/// Array separators tried in priority order.
pub const DEFAULT_ARRAY_SEPARATORS: [char; 4] = ['-', '@', '—', ','];

/// 1-based capture group extracted by a regex handler unless configured.
pub const DEFAULT_REGEX_GROUP: usize = 1;

/// European date output pattern (`dd.mm.yyyy`).
pub const EUROPEAN_DATE_FORMAT: &str = "%d.%m.%Y";

/// European datetime output pattern.
pub const EUROPEAN_DATETIME_FORMAT: &str = "%d.%m.%Y %H:%M:%S";

/// American date output pattern (`yyyy-mm-dd`).
pub const AMERICAN_DATE_FORMAT: &str = "%Y-%m-%d";

/// American datetime output pattern.
pub const AMERICAN_DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Input formats tried by date fields, datetime formats first so a time
/// component is never silently dropped.
pub const DEFAULT_DATE_INPUT_FORMATS: [&str; 12] = [
	"%Y-%m-%d %H:%M:%S",
	"%Y-%m-%dT%H:%M:%S",
	"%d.%m.%Y %H:%M:%S",
	"%d/%m/%Y %H:%M:%S",
	"%Y-%m-%d",
	"%d.%m.%Y",
	"%d/%m/%Y",
	"%m/%d/%Y",
	"%b %d %Y",
	"%b %d, %Y",
	"%d %b %Y",
	"%B %d, %Y",
];
