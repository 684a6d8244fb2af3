//! Object model crossing the host/provider boundary.

pub mod callback;
pub mod form;
pub mod order;
pub mod request;

pub use callback::{CallbackResult, PaymentStatus, TransactionInfo};
pub use form::{FormMethod, PaymentForm, PaymentFormResult, PaymentUrls};
pub use order::{OrderReference, ParseOrderReferenceError, PaymentOrder, TotalPrice};
pub use request::CallbackRequest;
