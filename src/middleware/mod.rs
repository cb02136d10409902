pub mod auth;
pub mod response;

pub use auth::{Authorized, DeleteDrinks, GetDrinksDetail, PatchDrinks, PostDrinks, Scope};
pub use response::{ApiResponse, ApiResult, Deleted, DrinkList};
