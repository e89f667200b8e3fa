//! Vehicle lookups.

use cargoapp_auth::SessionProvider;
use serde::Deserialize;

use crate::error::GatewayError;
use crate::gateway::{FunctionRequest, Gateway};

#[derive(Clone, Debug, Deserialize)]
pub struct DriverInfo {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub vehicle_id: Option<String>,
}

/// Look up the driver currently assigned to a vehicle.
pub async fn get_driver_by_vehicle<P: SessionProvider>(
    gateway: &Gateway<P>,
    vehicle_id: &str,
) -> Result<DriverInfo, GatewayError> {
    let req = FunctionRequest::new("get-driver-by-vehicle").query("vehicle_id", vehicle_id.to_owned());
    let value = gateway.invoke(req).await?;
    Ok(serde_json::from_value(value)?)
}
