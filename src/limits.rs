/// Page size the reference source uses when the token is empty.
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Largest page a token may request; bigger requests are clamped.
pub const MAX_PAGE_SIZE: u32 = 100_000;

/// Deepest parent chain `hierarchy::full_name` will walk.
pub const MAX_HIERARCHY_DEPTH: usize = 10_000;
