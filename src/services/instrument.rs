//! Instrument code normalization

use crate::error::{AppError, Result};

/// Listed instrument codes are six characters wide
pub const CODE_WIDTH: usize = 6;

/// Normalize a user-supplied instrument code.
///
/// Trims, upper-cases and left-pads with `'0'` to [`CODE_WIDTH`]
/// (`"5930"` -> `"005930"`). Empty, over-long or non-alphanumeric input
/// is rejected.
pub fn normalize_code(raw: &str) -> Result<String> {
    let code = raw.trim();

    if code.is_empty() {
        return Err(AppError::InvalidInput("Instrument code is required".to_string()));
    }

    if !code.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::InvalidInput(format!(
            "Instrument code '{}' must be alphanumeric",
            code
        )));
    }

    if code.len() > CODE_WIDTH {
        return Err(AppError::InvalidInput(format!(
            "Instrument code '{}' is longer than {} characters",
            code, CODE_WIDTH
        )));
    }

    Ok(format!("{:0>width$}", code.to_ascii_uppercase(), width = CODE_WIDTH))
}
