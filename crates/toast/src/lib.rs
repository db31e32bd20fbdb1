//! `assetdesk-toast`: transient, auto-dismissing notifications.
//!
//! A [`ToastStore`] is constructed once by the application and handed to
//! whoever needs to show or read toasts. It requires a Tokio runtime for
//! expiring toasts.

pub mod store;
pub mod toast;

pub use store::{ToastConfig, ToastStore, ZeroDuration, DEFAULT_DURATION};
pub use toast::{Toast, ToastId, ToastKind};
