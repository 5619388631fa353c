mod flag;
mod name;
mod operation;
mod time;

pub use self::{flag::*, name::*, operation::*, time::*};
