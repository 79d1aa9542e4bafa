//! Response envelope for list endpoints and the dashboard.

use serde::Serialize;

/// `{ "data": T }` envelope. Single resources are returned bare.
///
/// ```ignore
/// Ok(Json(DataResponse { data: products }))
/// ```
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
}
