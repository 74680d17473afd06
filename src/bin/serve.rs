use anyhow::Result;

use guardrail_gpt::config::Config;
use guardrail_gpt::logging::init_logging;

fn main() -> Result<()> {
    init_logging();
    let config = Config::from_env()?;

    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(guardrail_gpt::start_server(config))
}
