pub const DEFAULT_BOARD_ROWS: usize = 12;
pub const DEFAULT_BOARD_COLS: usize = 12;
pub const DEFAULT_HISTORY_CAPACITY: usize = 10_000;
pub const MIN_ZOOM: u8 = 1;
pub const MAX_ZOOM: u8 = 3;
pub const DEFAULT_REPLAY_DELAY_MS: u64 = 500;
pub const DEFAULT_POLL_INTERVAL_MS: u64 = 50;
