use std::process::ExitCode;

use equipotential::Viewer;

fn main() -> ExitCode {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("info,wgpu_core=warn,wgpu_hal=warn,naga=warn"),
    )
    .init();

    match Viewer::new().run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("startup failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
