pub mod currencyfreaks;
pub mod metalpriceapi;
