//! Safe Rust face of the C surface.
//!
//! [`AgencyString`] owns a `char*` returned by an `agency_get_*` function and
//! releases it through `agency_free_context` on drop. The free functions
//! below call the C entry points the same way a foreign host would.

use std::ffi::{c_char, CStr, CString};
use std::fmt;
use std::ptr::NonNull;

use gateway::Agency;
use thiserror::Error;

use crate::{
    agency_free_context, agency_get_agencies_by_domain, agency_get_agencies_by_tier,
    agency_get_all_agencies, agency_get_ascii_art, agency_get_context, agency_get_issue_finder,
    agency_get_research_connector, agency_verify_issue,
};

/// Failures seen from the caller's side of the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BindingError {
    /// The call returned NULL or -1
    #[error("agency operation failed")]
    OperationFailed,
    /// An argument contained an interior NUL byte
    #[error("argument contains a NUL byte")]
    InvalidArgument,
    /// A returned string was not UTF-8 or not the expected JSON
    #[error("result could not be converted")]
    Conversion,
}

/// Caller-owned string returned across the C boundary.
pub struct AgencyString {
    ptr: NonNull<c_char>,
}

impl AgencyString {
    /// Takes ownership of `ptr`. Returns `None` for NULL.
    ///
    /// # Safety
    /// `ptr` must be NULL or a string returned by an `agency_get_*` function
    /// that has not been released and is not owned elsewhere.
    pub unsafe fn from_raw(ptr: *mut c_char) -> Option<Self> {
        NonNull::new(ptr).map(|ptr| Self { ptr })
    }

    pub fn as_c_str(&self) -> &CStr {
        // SAFETY: ptr is a live, null-terminated string owned by self
        unsafe { CStr::from_ptr(self.ptr.as_ptr()) }
    }

    pub fn to_str(&self) -> Result<&str, BindingError> {
        self.as_c_str().to_str().map_err(|_| BindingError::Conversion)
    }

    /// Gives the pointer back without releasing it.
    pub fn into_raw(self) -> *mut c_char {
        let ptr = self.ptr.as_ptr();
        std::mem::forget(self);
        ptr
    }
}

impl Drop for AgencyString {
    fn drop(&mut self) {
        // SAFETY: ptr came from this library and is released exactly once
        unsafe { agency_free_context(self.ptr.as_ptr()) }
    }
}

impl fmt::Debug for AgencyString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AgencyString").field(&self.as_c_str()).finish()
    }
}

fn c_arg(value: &str) -> Result<CString, BindingError> {
    CString::new(value).map_err(|_| BindingError::InvalidArgument)
}

fn take(ptr: *mut c_char) -> Result<AgencyString, BindingError> {
    // SAFETY: every caller passes a fresh result of an agency_get_* call
    unsafe { AgencyString::from_raw(ptr) }.ok_or(BindingError::OperationFailed)
}

fn take_list(ptr: *mut c_char) -> Result<Vec<String>, BindingError> {
    let owned = take(ptr)?;
    serde_json::from_str(owned.to_str()?).map_err(|_| BindingError::Conversion)
}

pub fn context(agency: &str) -> Result<AgencyString, BindingError> {
    let agency = c_arg(agency)?;
    take(unsafe { agency_get_context(agency.as_ptr()) })
}

pub fn issue_finder(agency: &str) -> Result<AgencyString, BindingError> {
    let agency = c_arg(agency)?;
    take(unsafe { agency_get_issue_finder(agency.as_ptr()) })
}

pub fn research_connector(agency: &str) -> Result<AgencyString, BindingError> {
    let agency = c_arg(agency)?;
    take(unsafe { agency_get_research_connector(agency.as_ptr()) })
}

pub fn ascii_art(agency: &str) -> Result<AgencyString, BindingError> {
    let agency = c_arg(agency)?;
    take(unsafe { agency_get_ascii_art(agency.as_ptr()) })
}

pub fn all_agencies() -> Result<Vec<String>, BindingError> {
    take_list(agency_get_all_agencies())
}

pub fn agencies_by_tier(tier: i32) -> Result<Vec<String>, BindingError> {
    take_list(agency_get_agencies_by_tier(tier))
}

pub fn agencies_by_domain(domain: &str) -> Result<Vec<String>, BindingError> {
    let domain = c_arg(domain)?;
    take_list(unsafe { agency_get_agencies_by_domain(domain.as_ptr()) })
}

/// `Ok(true)` for a valid issue, `Ok(false)` for a missing key.
pub fn verify_issue(agency: &str, issue_json: &str) -> Result<bool, BindingError> {
    let agency = c_arg(agency)?;
    let issue_json = c_arg(issue_json)?;
    match unsafe { agency_verify_issue(agency.as_ptr(), issue_json.as_ptr()) } {
        1 => Ok(true),
        0 => Ok(false),
        _ => Err(BindingError::OperationFailed),
    }
}

/// Typed projection of the context document.
pub fn agency_info(agency: &str) -> Result<Agency, BindingError> {
    let owned = context(agency)?;
    let record: serde_json::Value =
        serde_json::from_str(owned.to_str()?).map_err(|_| BindingError::Conversion)?;
    Agency::from_record(&record).map_err(|_| BindingError::Conversion)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binding_error_messages() {
        assert_eq!(BindingError::OperationFailed.to_string(), "agency operation failed");
        assert_eq!(BindingError::InvalidArgument.to_string(), "argument contains a NUL byte");
        let boxed: Box<dyn std::error::Error> = Box::new(BindingError::Conversion);
        assert_eq!(boxed.to_string(), "result could not be converted");
    }

    #[test]
    fn null_is_not_owned() {
        assert!(unsafe { AgencyString::from_raw(std::ptr::null_mut()) }.is_none());
        assert_eq!(take(std::ptr::null_mut()).unwrap_err(), BindingError::OperationFailed);
    }

    #[test]
    fn owned_string_reads_and_releases() {
        let raw = CString::new("{\n  \"acronym\": \"VA\"\n}").unwrap().into_raw();
        let owned = unsafe { AgencyString::from_raw(raw) }.unwrap();
        assert!(owned.to_str().unwrap().contains("\"VA\""));
        drop(owned);
    }

    #[test]
    fn into_raw_hands_back_ownership() {
        let raw = CString::new("[]").unwrap().into_raw();
        let owned = unsafe { AgencyString::from_raw(raw) }.unwrap();
        let back = owned.into_raw();
        assert_eq!(back, raw);
        unsafe { agency_free_context(back) };
    }

    #[test]
    fn interior_nul_argument_is_rejected() {
        assert_eq!(context("HH\0S").unwrap_err(), BindingError::InvalidArgument);
        assert_eq!(
            verify_issue("HHS", "{\"id\":\0}").unwrap_err(),
            BindingError::InvalidArgument
        );
    }

    #[test]
    fn verify_issue_maps_codes() {
        let complete = r#"{"id":1,"title":"t","description":"d","affected_areas":[]}"#;
        assert!(verify_issue("HHS", complete).unwrap());
        assert!(!verify_issue("HHS", r#"{"id":1,"title":"t"}"#).unwrap());
        assert_eq!(
            verify_issue("HHS", "{not json").unwrap_err(),
            BindingError::OperationFailed
        );
    }
}
