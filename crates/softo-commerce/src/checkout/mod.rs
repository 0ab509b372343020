//! Checkout module.
//!
//! Checkout hands a pre-filled order summary to WhatsApp; there is no in-app
//! payment flow.

mod whatsapp;

pub use whatsapp::{build_link, build_message, encode_component, CheckoutConfig, WHATSAPP_BASE_URL};
