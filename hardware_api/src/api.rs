use std::sync::Arc;

use log::*;
use reqwest::{
    header::{HeaderMap, HeaderValue},
    Client,
    Method,
};
use serde::Serialize;
use serde_json::Value;

use crate::{
    config::StoreApiConfig,
    data_objects::{collection, envelope_data, Customer, NewCustomer, NewSale, Product, SaleConfirmation},
    StoreApiError,
};

//--------------------------------------      Filters        ---------------------------------------------------------
/// Query filters for the catalog listing. Every field is optional; the backend applies its own defaults.
#[derive(Debug, Clone, Default)]
pub struct ProductFilter {
    pub search: Option<String>,
    pub category: Option<String>,
    pub status: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl ProductFilter {
    pub fn with_search(mut self, term: &str) -> Self {
        self.search = Some(term.to_string());
        self
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.category = Some(category.to_string());
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn with_page(mut self, page: u32, per_page: u32) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(5);
        if let Some(s) = &self.search {
            params.push(("search", s.clone()));
        }
        if let Some(c) = &self.category {
            params.push(("category", c.clone()));
        }
        if let Some(s) = &self.status {
            params.push(("status", s.clone()));
        }
        if let Some(p) = self.page {
            params.push(("page", p.to_string()));
        }
        if let Some(pp) = self.per_page {
            params.push(("per_page", pp.to_string()));
        }
        params
    }
}

#[derive(Debug, Clone, Default)]
pub struct CustomerFilter {
    pub search: Option<String>,
    pub page: Option<u32>,
    pub per_page: Option<u32>,
}

impl CustomerFilter {
    pub fn with_search(mut self, term: &str) -> Self {
        self.search = Some(term.to_string());
        self
    }

    pub fn with_page(mut self, page: u32, per_page: u32) -> Self {
        self.page = Some(page);
        self.per_page = Some(per_page);
        self
    }

    fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::with_capacity(3);
        if let Some(s) = &self.search {
            params.push(("search", s.clone()));
        }
        if let Some(p) = self.page {
            params.push(("page", p.to_string()));
        }
        if let Some(pp) = self.per_page {
            params.push(("per_page", pp.to_string()));
        }
        params
    }
}

//--------------------------------------     HardwareApi     ---------------------------------------------------------
/// Client for the store's WordPress REST backend. One instance is shared by the POS view and the snapshot refresh
/// tasks; the underlying connection pool lives in the `Arc`ed reqwest client.
#[derive(Clone)]
pub struct HardwareApi {
    config: StoreApiConfig,
    client: Arc<Client>,
}

impl HardwareApi {
    pub fn new(config: StoreApiConfig) -> Result<Self, StoreApiError> {
        let mut headers = HeaderMap::with_capacity(2);
        let val = HeaderValue::from_str(&config.api_key.bearer())
            .map_err(|e| StoreApiError::Initialization(e.to_string()))?;
        headers.insert("Authorization", val);
        headers.insert("Content-Type", HeaderValue::from_static("application/json"));
        let client = Client::builder()
            .default_headers(headers)
            .build()
            .map_err(|e| StoreApiError::Initialization(e.to_string()))?;
        Ok(Self { config, client: Arc::new(client) })
    }

    /// Sends one request and returns the raw JSON body. Every backend endpoint speaks JSON, so there is no generic
    /// response type here; [`HardwareApi::envelope_query`] is the layer the endpoints actually use.
    async fn send<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<B>,
    ) -> Result<Value, StoreApiError> {
        let url = self.url(path);
        trace!("Sending REST query: {url}");
        let mut req = self.client.request(method, url);
        if !params.is_empty() {
            req = req.query(params);
        }
        if let Some(body) = body {
            req = req.json(&body);
        }
        let response = req.send().await.map_err(|e| StoreApiError::RestResponseError(e.to_string()))?;
        if response.status().is_success() {
            trace!("REST query successful. {}", response.status());
            response.json::<Value>().await.map_err(|e| StoreApiError::JsonError(e.to_string()))
        } else {
            let status = response.status().as_u16();
            let message = response.text().await.map_err(|e| StoreApiError::RestResponseError(e.to_string()))?;
            Err(StoreApiError::QueryError { status, message })
        }
    }

    /// Sends one request and unwraps the backend's `{ success, data, message? }` envelope, so the endpoint methods
    /// only ever see the `data` payload. An explicit `success: false` surfaces as [`StoreApiError::Rejected`].
    pub async fn envelope_query<B: Serialize>(
        &self,
        method: Method,
        path: &str,
        params: &[(&str, String)],
        body: Option<B>,
    ) -> Result<(Value, Option<String>), StoreApiError> {
        let mut body = self.send(method, path, params, body).await?;
        let (_, message) = envelope_data(&body)?;
        Ok((body["data"].take(), message))
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url)
    }

    /// Fetches one page of the product catalog, normalizing whichever envelope shape the backend returns.
    pub async fn fetch_products(&self, filter: &ProductFilter) -> Result<Vec<Product>, StoreApiError> {
        debug!("Fetching products: {filter:?}");
        let (data, _) = self.envelope_query::<()>(Method::GET, "/products", &filter.to_params(), None).await?;
        let products =
            collection(&data, "products")?.iter().map(Product::from_value).collect::<Result<Vec<Product>, _>>()?;
        info!("Fetched {} products", products.len());
        Ok(products)
    }

    pub async fn fetch_customers(&self, filter: &CustomerFilter) -> Result<Vec<Customer>, StoreApiError> {
        debug!("Fetching customers: {filter:?}");
        let (data, _) = self.envelope_query::<()>(Method::GET, "/customers", &filter.to_params(), None).await?;
        let customers =
            collection(&data, "customers")?.iter().map(Customer::from_value).collect::<Result<Vec<Customer>, _>>()?;
        info!("Fetched {} customers", customers.len());
        Ok(customers)
    }

    /// Quick-create for a customer standing at the counter.
    pub async fn create_customer(&self, new_customer: &NewCustomer) -> Result<Customer, StoreApiError> {
        debug!("Creating customer '{}'", new_customer.name);
        let (data, _) = self.envelope_query(Method::POST, "/customers", &[], Some(new_customer)).await?;
        // some backend versions nest the record one level deeper
        let record = if data["customer"].is_object() { &data["customer"] } else { &data };
        let customer = Customer::from_value(record)?;
        info!("Created customer {} ({})", customer.id, customer.name);
        Ok(customer)
    }

    /// Submits a completed cart as a new sale. One request, no retry; stock sufficiency and any other business
    /// rules are enforced by the backend, which reports them as a rejection.
    pub async fn create_sale(&self, sale: &NewSale) -> Result<SaleConfirmation, StoreApiError> {
        debug!("Submitting sale of {} line items for {}", sale.items.len(), sale.total_amount);
        let (data, message) = self.envelope_query(Method::POST, "/sales", &[], Some(sale)).await?;
        let confirmation = SaleConfirmation::from_value(&data, message);
        info!("Sale recorded: {:?}", confirmation.sale_id);
        Ok(confirmation)
    }
}
