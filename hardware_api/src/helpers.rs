use pos_common::{Quantity, Rupees};
use serde_json::Value;

use crate::StoreApiError;

/// The backend reports prices inconsistently: sometimes a JSON number, sometimes a decimal string ("450.00").
/// Normalize either form into paisa.
pub fn parse_price(value: &Value) -> Result<Rupees, StoreApiError> {
    match value {
        Value::Number(n) => {
            let amount = n.as_f64().ok_or_else(|| StoreApiError::InvalidCurrencyAmount(n.to_string()))?;
            Rupees::try_from(amount).map_err(|e| StoreApiError::InvalidCurrencyAmount(e.to_string()))
        },
        Value::String(s) => parse_price_str(s),
        other => Err(StoreApiError::InvalidCurrencyAmount(other.to_string())),
    }
}

pub fn parse_price_str(price: &str) -> Result<Rupees, StoreApiError> {
    let mut parts = price.split('.');
    let whole_units = parts
        .next()
        .ok_or_else(|| StoreApiError::InvalidCurrencyAmount(price.to_string()))?
        .parse::<i64>()
        .map_err(|e| StoreApiError::InvalidCurrencyAmount(format!("Invalid price value: {price}. {e}.")))?;
    let paisa = match parts.next() {
        None => 0,
        // the fraction must be plain ASCII digits before we slice it; anything else is malformed backend data
        Some(frac) if frac.bytes().all(|b| b.is_ascii_digit()) => {
            // "450.5" means 50 paisa, not 5
            let padded = format!("{frac:0<2}");
            padded[..2]
                .parse::<i64>()
                .map_err(|e| StoreApiError::InvalidCurrencyAmount(format!("Invalid price value: {price}. {e}.")))?
        },
        Some(_) => return Err(StoreApiError::InvalidCurrencyAmount(format!("Invalid price value: {price}."))),
    };
    let sign = if price.trim_start().starts_with('-') { -1 } else { 1 };
    Ok(Rupees::from(100 * whole_units + sign * paisa))
}

/// Stock and sale quantities arrive as JSON numbers or strings; missing/null means zero.
pub fn parse_quantity(value: &Value) -> Result<Quantity, StoreApiError> {
    match value {
        Value::Null => Ok(Quantity::ZERO),
        Value::Number(n) => {
            let qty = n.as_f64().ok_or_else(|| StoreApiError::InvalidQuantity(n.to_string()))?;
            Quantity::try_from(qty).map_err(|e| StoreApiError::InvalidQuantity(e.to_string()))
        },
        Value::String(s) => {
            let qty = s.parse::<f64>().map_err(|e| StoreApiError::InvalidQuantity(format!("{s}: {e}")))?;
            Quantity::try_from(qty).map_err(|e| StoreApiError::InvalidQuantity(e.to_string()))
        },
        other => Err(StoreApiError::InvalidQuantity(other.to_string())),
    }
}

/// Record identifiers are usually JSON numbers, but some endpoints stringify them.
pub fn parse_id(value: &Value, field: &str) -> Result<i64, StoreApiError> {
    match value {
        Value::Number(n) => n.as_i64().ok_or_else(|| StoreApiError::JsonError(format!("'{field}' is not an integer"))),
        Value::String(s) => {
            s.parse::<i64>().map_err(|e| StoreApiError::JsonError(format!("'{field}' is not an integer: {e}")))
        },
        _ => Err(StoreApiError::JsonError(format!("'{field}' is missing or not an identifier"))),
    }
}
