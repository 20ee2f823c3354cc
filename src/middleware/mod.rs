pub mod error_handler;
pub mod permissions;
pub mod request_id;

pub use error_handler::{error_response, not_found, ErrorHandler};
pub use permissions::{require_permission, OPERATOR_ROLE_HEADER};
pub use request_id::{RequestId, RequestIdValue, REQUEST_ID_HEADER};
