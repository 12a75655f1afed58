use std::borrow::Cow;
use std::sync::Arc;

/// Currency code (ISO 4217) - mostly static
pub type Currency = Cow<'static, str>;

/// Ticker symbol shared between stocks and quotes
pub type Ticker = Arc<str>;
