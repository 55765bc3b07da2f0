// Agency FFI - C interface over the agency data gateway
//
// Every `char*` handed out here is caller-owned and must go back through
// `agency_free_context`. Failures surface as NULL (string results) or -1
// (`agency_verify_issue`); the cause is written to the `log` facade.

mod owned;

pub use owned::{
    agency_info, all_agencies, agencies_by_domain, agencies_by_tier, ascii_art, context,
    issue_finder, research_connector, verify_issue, AgencyString, BindingError,
};

use gateway::{AssetKind, Gateway, GatewayError, IssueVerdict};
use log::{debug, warn};
use std::ffi::{c_char, c_int, CStr, CString};
use std::ptr;
use std::sync::OnceLock;

const AGENCY_FFI_ABI_VERSION: u32 = 1;
const AGENCY_FFI_VERSION_STRING: &CStr = c"agency-ffi-abi-v1";

const VERIFY_VALID: c_int = 1;
const VERIFY_INVALID: c_int = 0;
const VERIFY_ERROR: c_int = -1;

static GATEWAY: OnceLock<Gateway> = OnceLock::new();

/// The process-wide gateway, configured from `AGENCY_*` variables on first
/// use. Its catalog is loaded lazily and at most once.
pub fn global_gateway() -> &'static Gateway {
    GATEWAY.get_or_init(Gateway::from_env)
}

// ================================================================================================
// ARGUMENT / RESULT CONVERSION
// ================================================================================================

/// Borrows a caller string. NULL and non-UTF-8 input are rejected.
///
/// # Safety
/// `ptr` must be NULL or a valid null-terminated string that outlives the
/// returned reference.
unsafe fn str_arg<'a>(ptr: *const c_char, name: &str) -> Option<&'a str> {
    if ptr.is_null() {
        warn!("Rejected NULL '{}' argument", name);
        return None;
    }
    match CStr::from_ptr(ptr).to_str() {
        Ok(s) => Some(s),
        Err(e) => {
            warn!("Rejected non-UTF-8 '{}' argument: {}", name, e);
            None
        }
    }
}

/// Hands a gateway result to the caller as an owned C string, or NULL.
fn into_raw_string(op: &str, result: gateway::Result<String>) -> *mut c_char {
    into_raw_bytes(op, result.map(String::into_bytes))
}

/// Byte form of [`into_raw_string`]. Asset files go out unchanged, whatever
/// their encoding; only an interior NUL byte is refused.
fn into_raw_bytes(op: &str, result: gateway::Result<Vec<u8>>) -> *mut c_char {
    match result {
        Ok(bytes) => match CString::new(bytes) {
            Ok(c_string) => c_string.into_raw(),
            Err(e) => {
                warn!("{}: result has a NUL byte at {}", op, e.nul_position());
                ptr::null_mut()
            }
        },
        Err(e) => {
            log_failure(op, &e);
            ptr::null_mut()
        }
    }
}

fn log_failure(op: &str, e: &GatewayError) {
    match e {
        // Already reported by the gateway when the load failed
        _ if e.is_config_error() => debug!("{}: {}", op, e),
        GatewayError::AgencyNotFound(_) | GatewayError::AssetNotFound { .. } => {
            debug!("{}: {}", op, e)
        }
        _ => warn!("{}: {}", op, e),
    }
}

// ================================================================================================
// LOOKUPS
// ================================================================================================

/// Full agency record as pretty-printed JSON, or NULL.
///
/// # Safety
/// `agency` must be NULL or a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn agency_get_context(agency: *const c_char) -> *mut c_char {
    let Some(agency) = str_arg(agency, "agency") else {
        return ptr::null_mut();
    };
    into_raw_string("agency_get_context", global_gateway().context(agency))
}

/// Contents of `<acronym>_finder.py`, or NULL.
///
/// # Safety
/// `agency` must be NULL or a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn agency_get_issue_finder(agency: *const c_char) -> *mut c_char {
    let Some(agency) = str_arg(agency, "agency") else {
        return ptr::null_mut();
    };
    into_raw_bytes(
        "agency_get_issue_finder",
        global_gateway().asset_bytes(AssetKind::IssueFinder, agency),
    )
}

/// Contents of `<acronym>_connector.py`, or NULL.
///
/// # Safety
/// `agency` must be NULL or a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn agency_get_research_connector(agency: *const c_char) -> *mut c_char {
    let Some(agency) = str_arg(agency, "agency") else {
        return ptr::null_mut();
    };
    into_raw_bytes(
        "agency_get_research_connector",
        global_gateway().asset_bytes(AssetKind::ResearchConnector, agency),
    )
}

/// Contents of `<acronym>_ascii.txt`, or NULL.
///
/// # Safety
/// `agency` must be NULL or a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn agency_get_ascii_art(agency: *const c_char) -> *mut c_char {
    let Some(agency) = str_arg(agency, "agency") else {
        return ptr::null_mut();
    };
    into_raw_bytes(
        "agency_get_ascii_art",
        global_gateway().asset_bytes(AssetKind::AsciiArt, agency),
    )
}

/// Releases a string returned by any `agency_get_*` function. NULL is a no-op.
///
/// # Safety
/// `context` must be NULL or a pointer returned by this library that has not
/// been released yet. It must not be used afterwards.
#[no_mangle]
pub unsafe extern "C" fn agency_free_context(context: *mut c_char) {
    if context.is_null() {
        return;
    }
    drop(CString::from_raw(context));
}

// ================================================================================================
// LISTINGS
// ================================================================================================

/// JSON array of every acronym in catalog order, or NULL if the catalog
/// cannot be loaded.
#[no_mangle]
pub extern "C" fn agency_get_all_agencies() -> *mut c_char {
    into_raw_string("agency_get_all_agencies", global_gateway().all_agencies())
}

/// JSON array of acronyms in `tier` (`[]` when none), or NULL if the catalog
/// cannot be loaded.
#[no_mangle]
pub extern "C" fn agency_get_agencies_by_tier(tier: c_int) -> *mut c_char {
    into_raw_string(
        "agency_get_agencies_by_tier",
        global_gateway().agencies_by_tier(i64::from(tier)),
    )
}

/// JSON array of acronyms in `domain` (`[]` when none), or NULL.
///
/// # Safety
/// `domain` must be NULL or a valid null-terminated string.
#[no_mangle]
pub unsafe extern "C" fn agency_get_agencies_by_domain(domain: *const c_char) -> *mut c_char {
    let Some(domain) = str_arg(domain, "domain") else {
        return ptr::null_mut();
    };
    into_raw_string(
        "agency_get_agencies_by_domain",
        global_gateway().agencies_by_domain(domain),
    )
}

// ================================================================================================
// VERIFICATION
// ================================================================================================

/// Checks an issue payload for its required keys.
///
/// Returns 1 when all are present, 0 when any is missing and -1 when the
/// payload is not JSON or an argument is unusable.
///
/// # Safety
/// Both arguments must be NULL or valid null-terminated strings.
#[no_mangle]
pub unsafe extern "C" fn agency_verify_issue(
    agency: *const c_char,
    issue_json: *const c_char,
) -> c_int {
    let (Some(agency), Some(issue_json)) =
        (str_arg(agency, "agency"), str_arg(issue_json, "issue_json"))
    else {
        return VERIFY_ERROR;
    };

    match global_gateway().verify_issue(agency, issue_json) {
        Ok(IssueVerdict::Valid) => VERIFY_VALID,
        Ok(IssueVerdict::Invalid { .. }) => VERIFY_INVALID,
        Err(e) => {
            log_failure("agency_verify_issue", &e);
            VERIFY_ERROR
        }
    }
}

// ================================================================================================
// LIBRARY INFO
// ================================================================================================

/// Health check for the FFI bridge
#[no_mangle]
pub extern "C" fn agency_health_check() -> u8 {
    1 // Returns 1 if library loaded successfully
}

/// ABI version implemented by this library
#[no_mangle]
pub extern "C" fn agency_ffi_version() -> u32 {
    AGENCY_FFI_ABI_VERSION
}

/// Static version string for diagnostics. Never pass it to `agency_free_context`.
#[no_mangle]
pub extern "C" fn agency_ffi_version_string() -> *const c_char {
    AGENCY_FFI_VERSION_STRING.as_ptr()
}

/// Routes the library's log records to stderr. `RUST_LOG` sets the filter
/// (default `warn`). Calling it again, or after the host installed its own
/// logger, does nothing.
#[no_mangle]
pub extern "C" fn agency_init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .try_init();
}
