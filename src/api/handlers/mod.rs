pub mod accounts;
pub mod health;
mod helpers;
pub mod transfers;
pub mod users;

pub use accounts::{create_account, get_account, list_accounts};
pub use health::health_check;
pub use transfers::create_transfer;
pub use users::{create_user, login_user};
