mod quantity;
mod rupees;

pub mod op;

pub use quantity::{Quantity, QuantityConversionError};
pub use rupees::{Rupees, RupeesConversionError, PKR_CURRENCY_CODE};
