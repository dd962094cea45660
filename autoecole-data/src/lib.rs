mod loader;

pub use loader::{TarifLoader, TarifLoaderError, TarifRecord};
