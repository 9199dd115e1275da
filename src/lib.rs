pub mod cli;
pub mod fireworks;
pub mod io;
pub mod logging;
pub mod model;
pub mod ops;
pub mod parse;
pub mod tui;
pub mod util;
