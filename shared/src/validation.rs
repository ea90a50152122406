//! Input validation functions
//!
//! Field-level checks shared by request handlers. Each validator returns a
//! short human-readable message suitable for a `BadInput` response.

use rust_decimal::Decimal;
use validator::ValidateEmail;

/// Minimum password length accepted at registration and login
pub const MIN_PASSWORD_LEN: usize = 6;

/// bcrypt only consumes the first 72 bytes of its input
pub const MAX_PASSWORD_BYTES: usize = 72;

/// Validate email format
pub fn validate_email(email: &str) -> Result<(), String> {
    if email.is_empty() {
        return Err("Email cannot be empty".to_string());
    }
    if email.len() > 255 {
        return Err("Email too long".to_string());
    }
    let email_regex = regex_lite::Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map_err(|e| format!("Email pattern error: {}", e))?;
    if !email_regex.is_match(email) || !email.validate_email() {
        return Err("Invalid email format".to_string());
    }
    Ok(())
}

/// Validate password length
pub fn validate_password(password: &str) -> Result<(), String> {
    if password.len() < MIN_PASSWORD_LEN {
        return Err(format!(
            "Password must be at least {} characters",
            MIN_PASSWORD_LEN
        ));
    }
    if password.len() > MAX_PASSWORD_BYTES {
        return Err("Password too long".to_string());
    }
    Ok(())
}

/// Validate a required free-text field such as a display name
pub fn validate_required(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("{} is required", field));
    }
    if value.len() > 255 {
        return Err(format!("{} too long", field));
    }
    Ok(())
}

/// Decimal places stored for money columns (`NUMERIC(18, 2)`)
pub const MONEY_SCALE: u32 = 2;

/// Largest value a `NUMERIC(18, 2)` column holds
pub fn max_money() -> Decimal {
    Decimal::new(999_999_999_999_999_999, MONEY_SCALE)
}

/// Money must be positive, whole cents, and fit the column
fn validate_money(field: &str, value: Decimal) -> Result<(), String> {
    if value <= Decimal::ZERO {
        return Err(format!("{} must be greater than zero", field));
    }
    if value.normalize().scale() > MONEY_SCALE {
        return Err(format!(
            "{} must have at most {} decimal places",
            field, MONEY_SCALE
        ));
    }
    if value > max_money() {
        return Err(format!("{} is too large", field));
    }
    Ok(())
}

/// Validate a product price
pub fn validate_price(price: Decimal) -> Result<(), String> {
    validate_money("Price", price)
}

/// Validate a deposit amount
pub fn validate_amount(amount: Decimal) -> Result<(), String> {
    validate_money("Amount", amount)
}

/// Validate a bank account number
pub fn validate_account_no(account_no: &str) -> Result<(), String> {
    validate_required("Account number", account_no)
}
