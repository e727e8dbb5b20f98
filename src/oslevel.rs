//! OS level validation and request type classification.
//!
//! An OS level names what to update to:
//!
//! | Form                | Meaning                               |
//! |---------------------|---------------------------------------|
//! | blank / `Latest`    | latest SP of the running TL           |
//! | `YYYY-TT`           | a TL (or its last SP with `last_sp`)  |
//! | `YYYY-TT-00(-0000)` | a TL                                  |
//! | `YYYY-TT-SS`        | an SP, build number looked up         |
//! | `YYYY-TT-SS-BBBB`   | an SP, fully specified                |

use std::sync::LazyLock;

use regex::Regex;
use tracing::{debug, info};

use crate::error::{Result, SumaError};
use crate::report::RunReport;
use crate::types::RequestType;

/// Canonical spelling of the latest level.
pub const LATEST: &str = "Latest";

static TL_ONLY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}$").expect("valid regex"));
static TL_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2})(?:-00|-00-0000)?$").expect("valid regex")
});
static SP_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([0-9]{4}-[0-9]{2}-[0-9]{2})(?:-[0-9]{4})?$").expect("valid regex")
});
static FULL_SP: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}-[0-9]{4}$").expect("valid regex")
});
static SYSTEM_LEVEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}(?:-[0-9]{2}|-[0-9]{4})?$").expect("valid regex")
});
static ZERO_LEVEL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}(?:-00|-00-00|-00-00-0000)?$").expect("valid regex")
});
static GENERAL_FORM: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[0-9]{4}-[0-9]{2}(?:-[0-9]{2}|-[0-9]{2}-[0-9]{4})?$").expect("valid regex")
});

/// Check the user-supplied level and return its canonical form.
///
/// Blank and any casing of `latest` become `Latest`. Levels whose TL or SP
/// component is all zeros, and anything outside `YYYY-TT(-SS(-BBBB))`, are
/// configuration errors.
pub fn normalize_oslevel(raw: &str) -> Result<String> {
    if raw.trim().is_empty() || raw.eq_ignore_ascii_case(LATEST) {
        return Ok(LATEST.to_string());
    }
    if ZERO_LEVEL.is_match(raw) {
        return Err(SumaError::config(format!(
            "oslevel is '{}', specify a non 0 value for the Technical Level or the Service Pack",
            raw
        )));
    }
    if !GENERAL_FORM.is_match(raw) {
        return Err(SumaError::config(format!(
            "oslevel is '{}', should respect the format: xxxx-xx or xxxx-xx-xx or xxxx-xx-xx-xxxx",
            raw
        )));
    }
    Ok(raw.to_string())
}

/// Compute the SUMA request type for a level.
///
/// First match wins:
/// 1. blank or exactly `Latest` → `Latest`
/// 2. `YYYY-TT` with `last_sp` → `SP`
/// 3. `YYYY-TT(-00|-00-0000)` → `TL` (`last_sp` ignored, noted in the report)
/// 4. `YYYY-TT-SS(-BBBB)` → `SP`
///
/// Anything else is a configuration error.
pub fn classify(oslevel: &str, last_sp: bool, report: &mut RunReport) -> Result<RequestType> {
    let rq_type = if oslevel.trim().is_empty() || oslevel == LATEST {
        RequestType::Latest
    } else if last_sp && TL_ONLY.is_match(oslevel) {
        RequestType::Sp
    } else if TL_FORM.is_match(oslevel) {
        if last_sp {
            let msg = format!(
                "Parameter last_sp={} is ignored when oslevel is a TL {}.",
                last_sp, oslevel
            );
            info!("{}", msg);
            report.push_message(msg);
        }
        RequestType::Tl
    } else if SP_FORM.is_match(oslevel) {
        RequestType::Sp
    } else {
        return Err(SumaError::config(format!(
            "oslevel is '{}', parsing error",
            oslevel
        )));
    };
    debug!("classify({:?}, last_sp={}) = {}", oslevel, last_sp, rq_type);
    Ok(rq_type)
}

/// `YYYY-TT` part of a TL form level.
pub fn technology_level(oslevel: &str) -> Option<&str> {
    TL_FORM
        .captures(oslevel)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// True for a fully specified `YYYY-TT-SS-BBBB` level.
pub fn is_full_sp(oslevel: &str) -> bool {
    FULL_SP.is_match(oslevel)
}

/// True for output `oslevel -s` is expected to print.
pub fn is_system_level(level: &str) -> bool {
    SYSTEM_LEVEL.is_match(level)
}

/// First `n` characters of a level, or the whole level when shorter.
pub(crate) fn prefix(level: &str, n: usize) -> &str {
    level.char_indices().nth(n).map_or(level, |(i, _)| &level[..i])
}
