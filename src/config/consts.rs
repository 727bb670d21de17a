// src/config/consts.rs

// Store
pub const MAIN_STORE_URL: &str = "https://onlinestore.mini.com.tr";
pub const STOCK_LIST_URL: &str = "https://onlinestore.mini.com.tr/stok-listesi?modelCodes=41GA";

// Target
pub const TARGET_MODEL: &str = "COUNTRYMAN E";
pub const TARGET_PACK: &str = "Favoured";
pub const DESIGN_BUTTON_TEXT: &str = "Tasarla";

// Schedule
pub const CHECK_INTERVAL_MINUTES: u64 = 5; // be respectful to the server
pub const STATUS_REPORT_HOURS: u64 = 24;
pub const ERROR_COOLDOWN_SECS: u64 = 60;
pub const FATAL_PAUSE_SECS: u64 = 300; // give the supervisor something to restart
// Upper bounds for the schedule flags; keeps the seconds arithmetic far from overflow.
pub const MAX_INTERVAL_MINUTES: u64 = 7 * 24 * 60;
pub const MAX_REPORT_HOURS: u64 = 366 * 24;
pub const MAX_FATAL_PAUSE_SECS: u64 = 24 * 3600;

// Browser
pub const NAVIGATION_TIMEOUT_SECS: u64 = 30;
pub const RENDER_BUDGET_MS: u64 = 5_000; // client-side rendering + stock list load
pub const BROWSER_LOCALE: &str = "tr-TR";
pub const WINDOW_SIZE: (u32, u32) = (1920, 1080);
pub const BROWSER_CANDIDATES: &[&str] = &[
    "chromium",
    "chromium-browser",
    "google-chrome",
    "google-chrome-stable",
    "chrome",
];

// Notifications
pub const TELEGRAM_API_BASE: &str = "https://api.telegram.org";
pub const SMTP_SERVER: &str = "smtp.gmail.com";
pub const SMTP_PORT: u16 = 587;
pub const EVIDENCE_IN_ALERT: usize = 3;
pub const EVIDENCE_MAX_CHARS: usize = 200;

// Logging
pub const LOG_FILE: &str = "mini_monitor.log";
