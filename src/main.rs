use anyhow::Context;
use shapes3d::{ShapesApp, ViewportConfig};

const DEFAULT_LOG_FILTER: &str = "info,wgpu_core=warn,wgpu_hal=warn,naga=warn";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(DEFAULT_LOG_FILTER))
        .init();

    let app = ShapesApp::new(ViewportConfig::default()).context("failed to create the event loop")?;
    app.run().context("viewport exited with an error")
}
