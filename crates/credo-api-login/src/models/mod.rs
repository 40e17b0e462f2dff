//! Request, view-model, and catalog types for the login flow.

pub mod error_catalog;
pub mod requests;
pub mod view;

pub use requests::{LoginForm, LoginQuery};
pub use view::LoginView;
