// Not every utils is used in every test, so we allow dead code
#![allow(unused_imports, dead_code)]

mod test_setup;
pub use test_setup::*;
mod mock_signer;
pub use mock_signer::*;
mod utils;
pub use utils::*;
