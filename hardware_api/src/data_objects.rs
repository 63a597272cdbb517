use std::{fmt::Display, str::FromStr};

use pos_common::{Quantity, Rupees};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::{
    helpers::{parse_id, parse_price, parse_quantity},
    StoreApiError,
};

//--------------------------------------     Identifiers     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ProductId(pub i64);

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "P-{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CustomerId(pub i64);

impl Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "C-{}", self.0)
    }
}

impl From<i64> for CustomerId {
    fn from(value: i64) -> Self {
        Self(value)
    }
}

//--------------------------------------      Product        ---------------------------------------------------------
/// A sellable catalog entry. The cart copies the fields it needs when a line is added; a later catalog refresh does
/// not touch lines already in the cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub sku: String,
    pub price: Rupees,
    pub stock: Quantity,
    pub unit: String,
    pub category: String,
}

impl Product {
    /// Normalizes one product item from the backend's loose JSON into the strict internal shape.
    /// `id`, `name` and `price` are required; the descriptive fields get sensible defaults.
    pub fn from_value(item: &Value) -> Result<Self, StoreApiError> {
        let id = ProductId(parse_id(&item["id"], "id")?);
        let name = item["name"]
            .as_str()
            .ok_or_else(|| StoreApiError::JsonError(format!("Product {id} has no 'name'")))?
            .to_string();
        let price = parse_price(&item["price"])?;
        let sku = item["sku"].as_str().unwrap_or_default().to_string();
        let stock = parse_quantity(&item["stock"])?;
        let unit = item["unit"].as_str().unwrap_or("piece").to_string();
        let category = item["category"].as_str().unwrap_or_default().to_string();
        Ok(Self { id, name, sku, price, stock, unit, category })
    }
}

//--------------------------------------      Customer       ---------------------------------------------------------
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
}

impl Customer {
    pub fn from_value(item: &Value) -> Result<Self, StoreApiError> {
        let id = CustomerId(parse_id(&item["id"], "id")?);
        let name = item["name"]
            .as_str()
            .ok_or_else(|| StoreApiError::JsonError(format!("Customer {id} has no 'name'")))?
            .to_string();
        let phone = item["phone"].as_str().unwrap_or_default().to_string();
        Ok(Self { id, name, phone })
    }
}

/// Payload for the quick-create customer action on the POS screen.
#[derive(Debug, Clone, Serialize)]
pub struct NewCustomer {
    pub name: String,
    pub phone: String,
    #[serde(rename = "type")]
    pub customer_type: String,
    #[serde(rename = "creditLimit", serialize_with = "ser_rupees")]
    pub credit_limit: Rupees,
}

impl NewCustomer {
    pub fn walk_up(name: &str, phone: &str) -> Self {
        Self {
            name: name.to_string(),
            phone: phone.to_string(),
            customer_type: "regular".to_string(),
            credit_limit: Rupees::default(),
        }
    }
}

//--------------------------------------   PaymentMethod     ---------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    #[default]
    Cash,
    Credit,
    Card,
    BankTransfer,
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "cash"),
            PaymentMethod::Credit => write!(f, "credit"),
            PaymentMethod::Card => write!(f, "card"),
            PaymentMethod::BankTransfer => write!(f, "bank_transfer"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid payment method: {0}")]
pub struct PaymentMethodConversionError(String);

impl FromStr for PaymentMethod {
    type Err = PaymentMethodConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "cash" => Ok(Self::Cash),
            "credit" => Ok(Self::Credit),
            "card" => Ok(Self::Card),
            "bank_transfer" => Ok(Self::BankTransfer),
            s => Err(PaymentMethodConversionError(s.to_string())),
        }
    }
}

//--------------------------------------    OrderStatus      ---------------------------------------------------------
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    /// The sale is paid and fulfilled at the counter.
    #[default]
    Completed,
    /// The sale is recorded but payment or delivery is outstanding.
    Pending,
    Processing,
    Cancelled,
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrderStatus::Completed => write!(f, "completed"),
            OrderStatus::Pending => write!(f, "pending"),
            OrderStatus::Processing => write!(f, "processing"),
            OrderStatus::Cancelled => write!(f, "cancelled"),
        }
    }
}

#[derive(Debug, Clone, Error)]
#[error("Invalid order status: {0}")]
pub struct OrderStatusConversionError(String);

impl FromStr for OrderStatus {
    type Err = OrderStatusConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "completed" => Ok(Self::Completed),
            "pending" => Ok(Self::Pending),
            "processing" => Ok(Self::Processing),
            "cancelled" => Ok(Self::Cancelled),
            s => Err(OrderStatusConversionError(s.to_string())),
        }
    }
}

//--------------------------------------       NewSale       ---------------------------------------------------------
/// The order-creation wire payload. Currency and quantity fields go out as decimal JSON numbers, which is what the
/// WordPress backend expects; everything internal stays fixed-point.
#[derive(Debug, Clone, Serialize)]
pub struct NewSale {
    #[serde(rename = "customerId")]
    pub customer_id: Option<CustomerId>,
    pub items: Vec<SaleItem>,
    #[serde(rename = "paymentMethod")]
    pub payment_method: PaymentMethod,
    pub status: OrderStatus,
    #[serde(rename = "totalAmount", serialize_with = "ser_rupees")]
    pub total_amount: Rupees,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SaleItem {
    #[serde(rename = "productId")]
    pub product_id: ProductId,
    #[serde(serialize_with = "ser_quantity")]
    pub quantity: Quantity,
    #[serde(rename = "unitPrice", serialize_with = "ser_rupees")]
    pub unit_price: Rupees,
    #[serde(serialize_with = "ser_rupees")]
    pub total: Rupees,
}

pub fn ser_rupees<S>(amount: &Rupees, s: S) -> Result<S::Ok, S::Error>
where S: serde::Serializer {
    s.serialize_f64(amount.to_decimal())
}

pub fn ser_quantity<S>(qty: &Quantity, s: S) -> Result<S::Ok, S::Error>
where S: serde::Serializer {
    s.serialize_f64(qty.to_decimal())
}

//--------------------------------------  SaleConfirmation   ---------------------------------------------------------
#[derive(Debug, Clone)]
pub struct SaleConfirmation {
    pub sale_id: Option<i64>,
    pub message: Option<String>,
}

impl SaleConfirmation {
    pub fn from_value(data: &Value, message: Option<String>) -> Self {
        let sale_id = [&data["id"], &data["saleId"], &data["orderId"]]
            .into_iter()
            .find_map(|v| parse_id(v, "id").ok());
        Self { sale_id, message }
    }
}

//--------------------------------------      Envelope       ---------------------------------------------------------
/// Unwraps the backend's `{ success, data, message? }` envelope. A missing `success` flag is treated as success
/// (some endpoints omit it); an explicit `success: false` becomes [`StoreApiError::Rejected`].
pub fn envelope_data(body: &Value) -> Result<(&Value, Option<String>), StoreApiError> {
    let message = body["message"].as_str().map(|s| s.to_string());
    if body["success"].as_bool() == Some(false) {
        return Err(StoreApiError::Rejected(message.unwrap_or_else(|| "The request was not successful".to_string())));
    }
    Ok((&body["data"], message))
}

/// Pulls the item array out of `data`, whichever of the backend's two shapes it arrived in:
/// `data: { <key>: [..] }` or the bare `data: [..]`.
pub fn collection<'a>(data: &'a Value, key: &str) -> Result<&'a Vec<Value>, StoreApiError> {
    data[key]
        .as_array()
        .or_else(|| data.as_array())
        .ok_or_else(|| StoreApiError::JsonError(format!("Response contains neither 'data.{key}' nor a 'data' array")))
}
