mod apuesta;
mod impls;
mod requests;
mod responses;
mod util;

pub use self::apuesta::*;
pub use requests::*;
pub use responses::*;
pub use util::*;
