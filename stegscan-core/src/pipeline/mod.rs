//! Sequential analysis pipeline
//!
//! Four stages run in a fixed order, each seeing the findings accumulated
//! by the stages before it: reconnaissance, steganography extraction,
//! pattern hunting, and decoding. A stage failure is recorded in the report
//! and never stops the stages after it.

pub mod decode;
pub mod patterns;
pub mod recon;
pub mod runner;
pub mod stego;
pub mod traits;

pub use decode::DecodeStage;
pub use patterns::PatternStage;
pub use recon::ReconStage;
pub use runner::Pipeline;
pub use stego::StegoStage;
pub use traits::{Stage, StageContext, StageOutput};
