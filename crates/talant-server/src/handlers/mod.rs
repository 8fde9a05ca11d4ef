pub mod records;
pub mod session;

use uuid::Uuid;

use crate::error::Error;

/// Parse a record id taken from the request path.
pub(super) fn parse_id(raw: &str) -> Result<Uuid, Error> {
  Uuid::parse_str(raw).map_err(|_| Error::BadRequest(format!("invalid id: {raw}")))
}
