pub mod drink;

pub use drink::{Drink, DrinkChanges, DrinkPayload, DrinkRow, DrinkSummary, Ingredient, NewDrink};
