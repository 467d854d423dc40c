//! Minimal global logger used by the ardor crates.
//!
//! Nothing is logged until a [`Logger`] is installed with [`set_logger`], the logging macros are no-ops until then.

use core::{
    fmt::{Display, Arguments, Write as _},
    sync::atomic::{AtomicU8, self},
};
use std::{
    io,
    time::{SystemTime, UNIX_EPOCH},
};
use parking_lot::{RwLock, Mutex, const_rwlock, const_mutex};

static LOGGER : RwLock<Option<&'static Logger>> = const_rwlock(None);

/// Install the global logger
pub fn set_logger(logger: &'static Logger) {
    *LOGGER.write() = Some(logger);
}

/// Remove the global logger, flushing it first
pub fn clear_logger() {
    if let Some(logger) = LOGGER.write().take() {
        logger.flush();
    }
}

/// Get the global logger, if one was installed
pub fn get_logger() -> Option<&'static Logger> {
    *LOGGER.read()
}

/// Severity of a message, ordered from most to least important
#[repr(u8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum LogLevel {
    /// The program can't reasonably continue
    Severe,
    /// A caller asked for something that could not be done
    Error,
    /// A request was rejected or silently adjusted
    Warning,
    Info,
    Verbose,
    /// Most detailed level, also shows where the message came from
    Debug,
}

impl LogLevel {
    /// Fixed width tag written in front of each message
    const fn tag(self) -> &'static str {
        match self {
            LogLevel::Severe  => "[SEVERE ]",
            LogLevel::Error   => "[ERROR  ]",
            LogLevel::Warning => "[WARNING]",
            LogLevel::Info    => "[INFO   ]",
            LogLevel::Verbose => "[VERBOSE]",
            LogLevel::Debug   => "[DEBUG  ]",
        }
    }

    /// ANSI escape sequence used for the tag
    const fn ansi_style(self) -> &'static str {
        match self {
            LogLevel::Severe  => "\x1B[1m\x1B[41m\x1B[30m",
            LogLevel::Error   => "\x1B[91m",
            LogLevel::Warning => "\x1B[93m",
            LogLevel::Info    => "\x1B[37m",
            LogLevel::Verbose => "\x1B[90m",
            LogLevel::Debug   => "\x1B[94m",
        }
    }

    /// Whether messages at this level include the file, line and function they were logged from
    const fn shows_source(self) -> bool {
        matches!(self, LogLevel::Severe | LogLevel::Error | LogLevel::Debug)
    }
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_fmt(format_args!("{}{}\x1B[0m", self.ansi_style(), self.tag()))
    }
}

/// Category a message belongs to, e.g. the crate or subsystem logging it
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct LogCategory {
    name : &'static str,
    sub  : Option<&'static str>,
}

impl LogCategory {
    pub const fn new(name: &'static str) -> Self {
        Self { name, sub: None }
    }

    pub const fn new_with_sub(name: &'static str, sub: &'static str) -> Self {
        Self { name, sub: Some(sub) }
    }
}

impl Display for LogCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name)?;
        if let Some(sub) = self.sub {
            f.write_fmt(format_args!("({sub})"))?;
        }
        Ok(())
    }
}

/// Time since the unix epoch at which a message was logged
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub struct TimeStamp {
    millis : u128,
}

impl TimeStamp {
    /// Get the current timestamp
    pub fn now() -> Self {
        let millis = SystemTime::now().duration_since(UNIX_EPOCH).map_or(0, |dur| dur.as_millis());
        Self { millis }
    }

    /// Milliseconds since the unix epoch
    pub const fn millis(&self) -> u128 {
        self.millis
    }
}

impl Display for TimeStamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let secs_of_day = (self.millis / 1000) % 86_400;
        f.write_fmt(format_args!("{:02}:{:02}:{:02}.{:03}", secs_of_day / 3600, (secs_of_day / 60) % 60, secs_of_day % 60, self.millis % 1000))
    }
}

/// Source location and time of a message, usually created with [`log_location!`]
pub struct LogLocation {
    file     : &'static str,
    line     : u32,
    function : &'static str,
    time     : TimeStamp,
}

impl LogLocation {
    pub const fn new(file: &'static str, line: u32, function: &'static str, time: TimeStamp) -> Self {
        Self { file, line, function, time }
    }

    pub const fn file(&self) -> &str {
        self.file
    }

    pub const fn line(&self) -> u32 {
        self.line
    }

    /// Path of the function that logged the message, empty when it wasn't recorded
    pub const fn function(&self) -> &str {
        self.function
    }

    pub const fn timestamp(&self) -> TimeStamp {
        self.time
    }
}

/// ` (file:line: function)` suffix for levels that show their source
struct SourceSuffix<'a>(&'a LogLocation, LogLevel);

impl Display for SourceSuffix<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let SourceSuffix(loc, level) = self;
        if !level.shows_source() {
            return Ok(());
        }
        f.write_fmt(format_args!(" ({}:{}: {})", loc.file, loc.line, loc.function))
    }
}

/// Name of the function item passed in, used by [`log_location!`]
pub fn get_func_name<F>(_: F) -> &'static str {
    core::any::type_name::<F>()
}

/// Capture the current file, line and time, optionally with the function item logging the message
#[macro_export]
macro_rules! log_location {
    () => {
        $crate::LogLocation::new(file!(), line!(), "", $crate::TimeStamp::now())
    };
    ($func:expr) => {
        $crate::LogLocation::new(file!(), line!(), $crate::get_func_name($func), $crate::TimeStamp::now())
    };
}

type Writer = Box<dyn io::Write + Send>;

const MAX_WRITERS : usize = 8;
/// Buffered text is written out once it grows past this size
const BUFFER_LIMIT : usize = 4 * 1024;

/// Destinations and pending output of a [`Logger`]
struct Sinks {
    writers  : [Option<Writer>; MAX_WRITERS],
    pending  : String,
    eager    : bool,
    console  : bool,
}

impl Sinks {
    const fn new() -> Self {
        const EMPTY : Option<Writer> = None;
        Self {
            writers: [EMPTY; MAX_WRITERS],
            pending: String::new(),
            eager: false,
            console: true,
        }
    }

    fn append(&mut self, args: Arguments) {
        if self.pending.capacity() == 0 {
            self.pending.reserve(BUFFER_LIMIT);
        }
        _ = self.pending.write_fmt(args);
    }

    fn drain(&mut self) {
        if self.pending.is_empty() {
            return;
        }

        let bytes = self.pending.as_bytes();
        if self.console {
            write_out(&mut io::stdout().lock(), bytes);
        }
        for writer in self.writers.iter_mut().flatten() {
            write_out(writer, bytes);
        }
        self.pending.clear();
    }
}

/// Output errors are ignored, a failing sink must not take down the caller
fn write_out<W: io::Write + ?Sized>(out: &mut W, bytes: &[u8]) {
    _ = out.write_all(bytes);
    _ = out.flush();
}

/// Buffered logger writing to the console and up to 8 additional writers, e.g. a file or an in-memory buffer
pub struct Logger {
    sinks     : Mutex<Sinks>,
    max_level : AtomicU8,
}

impl Logger {
    /// Create a logger that writes every level to the console
    pub const fn new() -> Self {
        Self {
            sinks: const_mutex(Sinks::new()),
            max_level: AtomicU8::new(LogLevel::Debug as u8),
        }
    }

    /// Drop messages less important than `level`
    pub fn set_max_level(&self, level: LogLevel) {
        self.max_level.store(level as u8, atomic::Ordering::Relaxed)
    }

    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level <= self.current_max_level()
    }

    fn current_max_level(&self) -> LogLevel {
        match self.max_level.load(atomic::Ordering::Relaxed) {
            0 => LogLevel::Severe,
            1 => LogLevel::Error,
            2 => LogLevel::Warning,
            3 => LogLevel::Info,
            4 => LogLevel::Verbose,
            _ => LogLevel::Debug,
        }
    }

    /// Write every message out immediately instead of buffering it
    pub fn set_always_flush(&self, always_flush: bool) {
        self.sinks.lock().eager = always_flush;
    }

    pub fn set_log_to_console(&self, log_to_console: bool) {
        let mut sinks = self.sinks.lock();
        // Buffered messages go to the destinations that were active when they were logged
        sinks.drain();
        sinks.console = log_to_console;
    }

    /// Register an extra writer, returning the slot it occupies
    ///
    /// When all slots are taken the writer is handed back as the error.
    pub fn add_writer(&self, writer: Writer) -> Result<usize, Writer> {
        let mut sinks = self.sinks.lock();
        match sinks.writers.iter().position(Option::is_none) {
            Some(slot) => {
                sinks.writers[slot] = Some(writer);
                Ok(slot)
            },
            None => Err(writer),
        }
    }

    /// Unregister the writer in `slot`, it still receives everything logged before this call
    pub fn remove_writer(&self, slot: usize) -> Option<Writer> {
        let mut sinks = self.sinks.lock();
        sinks.drain();
        sinks.writers.get_mut(slot)?.take()
    }

    pub fn log(&self, category: LogCategory, level: LogLevel, loc: LogLocation, text: &str) {
        self.log_fmt(category, level, loc, format_args!("{text}"))
    }

    /// Format a message as `<time> <level> [<category>]<source>: <message>` and buffer it
    pub fn log_fmt(&self, category: LogCategory, level: LogLevel, loc: LogLocation, message: Arguments) {
        if !self.is_enabled(level) {
            return;
        }

        let time = loc.timestamp();
        let source = SourceSuffix(&loc, level);
        let mut sinks = self.sinks.lock();
        sinks.append(format_args!("\x1B[38m{time}\x1B[0m {level} [{category}]{source}: {message}\n"));
        if sinks.eager || sinks.pending.len() > BUFFER_LIMIT {
            sinks.drain();
        }
    }

    /// Write out all buffered messages
    pub fn flush(&self) {
        self.sinks.lock().drain()
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for Logger {
    fn drop(&mut self) {
        self.flush();
    }
}

/// Log a message through the global logger, if one is installed
///
/// `$loc` is a [`LogLocation`], see [`log_location!`].
#[macro_export]
macro_rules! log_at {
    ($category:expr, $level:expr, $loc:expr, $($fmt:tt)+) => {
        if let Some(logger) = $crate::get_logger() {
            logger.log_fmt($category, $level, $loc, format_args!($($fmt)+));
        }
    };
}

/// Log a message at `$level`, recording the function item `$func` it was logged from
#[macro_export]
macro_rules! log {
    ($category:expr, $level:expr, $func:expr, $($fmt:tt)+) => {
        $crate::log_at!($category, $level, $crate::log_location!($func), $($fmt)+)
    };
}

#[macro_export]
macro_rules! log_severe {
    ($category:expr, $func:expr, $($fmt:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Severe, $func, $($fmt)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($category:expr, $func:expr, $($fmt:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Error, $func, $($fmt)+)
    };
}

#[macro_export]
macro_rules! log_warning {
    ($category:expr, $($fmt:tt)+) => {
        $crate::log_at!($category, $crate::LogLevel::Warning, $crate::log_location!(), $($fmt)+)
    };
}

#[macro_export]
macro_rules! log_info {
    ($category:expr, $($fmt:tt)+) => {
        $crate::log_at!($category, $crate::LogLevel::Info, $crate::log_location!(), $($fmt)+)
    };
}

#[macro_export]
macro_rules! log_verbose {
    ($category:expr, $($fmt:tt)+) => {
        $crate::log_at!($category, $crate::LogLevel::Verbose, $crate::log_location!(), $($fmt)+)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($category:expr, $func:expr, $($fmt:tt)+) => {
        $crate::log!($category, $crate::LogLevel::Debug, $func, $($fmt)+)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[derive(Clone, Default)]
    struct SharedBuffer(Arc<Mutex<Vec<u8>>>);

    impl io::Write for SharedBuffer {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    const CAT : LogCategory = LogCategory::new_with_sub("Logging", "Test");

    fn contents(buf: &SharedBuffer) -> String {
        String::from_utf8_lossy(&buf.0.lock()).into_owned()
    }

    #[test]
    fn writes_to_writer_on_flush() {
        let logger = Logger::new();
        logger.set_log_to_console(false);
        let buf = SharedBuffer::default();
        assert_eq!(logger.add_writer(Box::new(buf.clone())).ok(), Some(0));

        logger.log(CAT, LogLevel::Info, log_location!(), "hello");
        assert!(contents(&buf).is_empty());

        logger.flush();
        let text = contents(&buf);
        assert!(text.contains("[Logging(Test)]"));
        assert!(text.contains("hello"));
        assert!(text.ends_with('\n'));
    }

    #[test]
    fn max_level_filters() {
        let logger = Logger::new();
        logger.set_log_to_console(false);
        logger.set_always_flush(true);
        let buf = SharedBuffer::default();
        _ = logger.add_writer(Box::new(buf.clone()));

        logger.set_max_level(LogLevel::Warning);
        logger.log_fmt(CAT, LogLevel::Verbose, log_location!(), format_args!("hidden {}", 1));
        logger.log_fmt(CAT, LogLevel::Error, log_location!(writes_to_writer_on_flush), format_args!("shown {}", 2));

        let text = contents(&buf);
        assert!(!text.contains("hidden"));
        assert!(text.contains("shown 2"));
        assert!(text.contains("writes_to_writer_on_flush"));
    }

    #[test]
    fn writer_slots_are_bounded() {
        let logger = Logger::new();
        logger.set_log_to_console(false);
        for i in 0..MAX_WRITERS {
            assert_eq!(logger.add_writer(Box::new(io::sink())).ok(), Some(i));
        }
        assert!(logger.add_writer(Box::new(io::sink())).is_err());
        assert!(logger.remove_writer(3).is_some());
        assert!(logger.remove_writer(3).is_none());
        assert_eq!(logger.add_writer(Box::new(io::sink())).ok(), Some(3));
    }

    #[test]
    fn category_display() {
        assert_eq!(LogCategory::new("Math").to_string(), "Math");
        assert_eq!(LogCategory::new_with_sub("Math", "Pool").to_string(), "Math(Pool)");
    }
}
