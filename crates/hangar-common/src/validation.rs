//! Input validation utilities for Hangar
//!
//! Plain validation functions shared by the registry services and the
//! console handlers. Each returns a `validator::ValidationError` whose code
//! names the failed rule.

use std::sync::LazyLock;

use validator::ValidationError;

/// Maximum length for client name field
pub const MAX_NAME_LENGTH: usize = 128;

/// Maximum length for client address field
pub const MAX_ADDRESS_LENGTH: usize = 200;

/// Maximum length for email field
pub const MAX_EMAIL_LENGTH: usize = 254;

/// Maximum length for VM password field
pub const MAX_PASSWORD_LENGTH: usize = 128;

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$")
        .expect("Invalid regex pattern")
});

static VM_ADDR_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^(\d{1,3})\.(\d{1,3})\.(\d{1,3})\.(\d{1,3})(?::(\d{1,5}))?$")
        .expect("Invalid regex pattern")
});

/// Validate a client display name
///
/// Names must be non-empty after trimming and bounded in length.
pub fn validate_name(name: &str) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::new("name_empty"));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::new("name_too_long"));
    }
    Ok(())
}

/// Validate an email address
///
/// The email must be non-empty, RFC-shaped (local@domain.tld) and bounded
/// in length.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    if email.is_empty() {
        return Err(ValidationError::new("email_empty"));
    }
    if email.len() > MAX_EMAIL_LENGTH {
        return Err(ValidationError::new("email_too_long"));
    }
    if !EMAIL_REGEX.is_match(email) {
        return Err(ValidationError::new("email_malformed"));
    }
    Ok(())
}

/// Validate a postal address
pub fn validate_address(address: &str) -> Result<(), ValidationError> {
    if address.len() > MAX_ADDRESS_LENGTH {
        return Err(ValidationError::new("address_too_long"));
    }
    Ok(())
}

/// Validate a VM address in dotted-quad form with an optional port
///
/// Accepts `a.b.c.d` and `a.b.c.d:port` where every octet is <= 255 and the
/// port, when present, is 1-65535.
pub fn validate_vm_addr(addr: &str) -> Result<(), ValidationError> {
    let captures = VM_ADDR_REGEX
        .captures(addr)
        .ok_or_else(|| ValidationError::new("vm_addr_malformed"))?;

    for i in 1..=4 {
        let octet: u32 = captures[i]
            .parse()
            .map_err(|_| ValidationError::new("vm_addr_malformed"))?;
        if octet > 255 {
            return Err(ValidationError::new("vm_addr_octet_out_of_range"));
        }
    }

    if let Some(port) = captures.get(5) {
        let port: u32 = port
            .as_str()
            .parse()
            .map_err(|_| ValidationError::new("vm_addr_malformed"))?;
        if port == 0 || port > 65535 {
            return Err(ValidationError::new("vm_addr_port_out_of_range"));
        }
    }

    Ok(())
}

/// Validate a VM password
///
/// Passwords must contain at least one non-whitespace character.
pub fn validate_vm_password(password: &str) -> Result<(), ValidationError> {
    if password.trim().is_empty() {
        return Err(ValidationError::new("password_blank"));
    }
    if password.len() > MAX_PASSWORD_LENGTH {
        return Err(ValidationError::new("password_too_long"));
    }
    Ok(())
}
