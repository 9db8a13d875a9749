//! Data models shared between the store server and its clients

pub mod ingredient;
pub mod inventory;
pub mod order;

pub use ingredient::{IngredientCategory, IngredientOption};
pub use inventory::{InventoryItem, StockLevel};
pub use order::{Order, OrderCreate, OrderStatus, PizzaConfig};
