//! Core type definitions shared by every endpoint.

pub mod ids;
pub mod values;

pub use ids::{GraphId, UserToken, Username, WebhookHash};
pub use values::{
    format_date, parse_date, GraphColor, GraphType, Quantity, SelfSufficient, SvgMode, Timezone,
    WebhookType, DATE_FORMAT,
};
