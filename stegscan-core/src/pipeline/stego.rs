//! Steganography stage: steghide extraction and binwalk scanning

use async_trait::async_trait;

use crate::tools::wrappers::{binwalk, steghide};
use crate::Result;

use super::{Stage, StageContext, StageOutput};

/// Hidden-data pass: passwordless steghide extraction (or the configured
/// passphrase), then a binwalk signature scan
pub struct StegoStage;

#[async_trait]
impl Stage for StegoStage {
    fn name(&self) -> &str {
        "stego"
    }

    async fn run(&self, ctx: &StageContext<'_>) -> Result<StageOutput> {
        let mut output = StageOutput::default();

        let password = ctx.config.tools.steghide_password.as_str();
        output.absorb(
            steghide::run(ctx.invoker, ctx.target, password).await,
            ctx.classifier,
        );
        output.absorb(binwalk::run(ctx.invoker, ctx.target).await, ctx.classifier);

        Ok(output)
    }
}
