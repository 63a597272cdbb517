use hardware_api::{HardwareApi, NewSale, SaleConfirmation, StoreApiError};

/// The checkout assembler's seam to the order-creation collaborator. [`HardwareApi`] is the production
/// implementation; tests substitute a scripted one.
#[allow(async_fn_in_trait)]
pub trait SaleSubmitter {
    async fn create_sale(&self, sale: &NewSale) -> Result<SaleConfirmation, StoreApiError>;
}

impl SaleSubmitter for HardwareApi {
    async fn create_sale(&self, sale: &NewSale) -> Result<SaleConfirmation, StoreApiError> {
        HardwareApi::create_sale(self, sale).await
    }
}
