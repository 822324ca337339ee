/// Maximum length of a school name.
pub const SCHOOL_NAME_MAX_LEN: usize = 20;

/// Maximum length of an in-school nickname.
pub const NICKNAME_MAX_LEN: usize = 20;

/// Maximum length of a news title.
pub const NEWS_TITLE_MAX_LEN: usize = 100;

/// Maximum length of a news body.
pub const NEWS_CONTENT_MAX_LEN: usize = 1000;

/// Maximum length of a user name.
pub const USER_NAME_MAX_LEN: usize = 50;

/// Upper bound for a single page of list results.
pub const MAX_PAGE_SIZE: i64 = 100;

/// Default page size when a caller does not supply one.
pub const DEFAULT_PAGE_SIZE: i64 = 10;
