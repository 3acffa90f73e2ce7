//! Neural-network layers, losses and parameter persistence.

pub mod init;
pub mod layers;
pub mod losses;
pub mod module;
pub mod parameter;
pub mod state_dict;

pub use layers::linear::Linear;
pub use layers::relu::ReLU;
pub use losses::mse::{MSELoss, Reduction};
pub use module::Module;
pub use parameter::Parameter;
pub use state_dict::{load_state_dict, save_state_dict, StateDict, TensorRecord};
